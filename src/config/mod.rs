// src/config/mod.rs

//! Module document loading, resolution and validation.
//!
//! Responsibilities:
//! - Define the TOML-backed document model and the resolved `BuildConfig`
//!   (`model.rs`).
//! - Load a document from disk (`loader.rs`).
//! - Resolve `toolchain.<field>` references (`resolve.rs`).
//! - Check ordering/subset/reference invariants (`validate.rs`).

pub mod loader;
pub mod model;
pub mod resolve;
pub mod validate;

pub use loader::{load_and_validate, load_from_path, load_with_descriptor};
pub use model::{BuildConfig, JavaLevel, RawDocument};
pub use resolve::resolve_document;
pub use validate::{validate_build_config, ValidationContext};
