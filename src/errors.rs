// src/errors.rs

//! Crate-wide error type.
//!
//! Every failure the loader can produce falls into one of three fatal
//! categories, plus plain I/O failures from reading the document or the
//! toolchain descriptor. The first violation encountered aborts the load.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    /// The document (or descriptor) does not follow the grammar: TOML syntax
    /// errors, unknown keys, values outside the recognized shapes.
    #[error("malformed config: {0}")]
    MalformedConfig(String),

    /// A symbolic reference points at nothing: an unknown `toolchain.<field>`,
    /// a signing alias with no declared config, a source root that does not
    /// exist.
    #[error("unresolved reference: {0}")]
    UnresolvedReference(String),

    /// A well-formed, fully resolved value breaks an ordering or subset rule.
    #[error("invariant violation: {0}")]
    InvariantViolation(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::MalformedConfig(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ConfigError>;
