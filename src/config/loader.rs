// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::config::model::{BuildConfig, RawDocument};
use crate::config::resolve::{resolve_document, supported_abis};
use crate::config::validate::{validate_build_config, ValidationContext};
use crate::errors::{ConfigError, Result};
use crate::toolchain::{discover_descriptor, ToolchainDescriptor};

/// Load a module document from a given path and return the raw `RawDocument`.
///
/// This only performs TOML deserialization; it does **not** resolve toolchain
/// references or check invariants. Use [`load_and_validate`] for that.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawDocument> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let raw: RawDocument = toml::from_str(&contents)
        .map_err(|e| ConfigError::MalformedConfig(format!("{}: {e}", path.display())))?;

    Ok(raw)
}

/// Load a module document and run the full pipeline.
///
/// This is the recommended entry point for the rest of the application:
///
/// - Reads TOML.
/// - Discovers the toolchain descriptor via `toolchain.source` (a document
///   without symbolic references loads fine when none is present).
/// - Resolves `toolchain.<field>` references.
/// - Checks SDK ordering, ABI subset, signing alias and source-root rules.
///
/// The first violation aborts the load.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<BuildConfig> {
    let path = path.as_ref();
    let raw = load_from_path(path)?;
    let doc_dir = document_dir(path);

    let descriptor = discover_descriptor(&doc_dir, &raw.toolchain.source)?;
    finish_load(&raw, &doc_dir, descriptor.as_ref())
}

/// Same pipeline as [`load_and_validate`], but with the descriptor supplied by
/// the caller instead of discovered next to the source tree.
pub fn load_with_descriptor(
    path: impl AsRef<Path>,
    descriptor: Option<&ToolchainDescriptor>,
) -> Result<BuildConfig> {
    let path = path.as_ref();
    let raw = load_from_path(path)?;
    let doc_dir = document_dir(path);
    finish_load(&raw, &doc_dir, descriptor)
}

fn finish_load(
    raw: &RawDocument,
    doc_dir: &Path,
    descriptor: Option<&ToolchainDescriptor>,
) -> Result<BuildConfig> {
    let cfg = resolve_document(raw, descriptor)?;

    let supported = supported_abis(descriptor);
    let aliases = raw.signing_aliases();
    let ctx = ValidationContext {
        doc_dir,
        supported_abis: &supported,
        signing_aliases: &aliases,
    };
    validate_build_config(&cfg, &ctx)?;

    info!(
        application_id = %cfg.application_id,
        min_sdk = cfg.sdk.min,
        target_sdk = cfg.sdk.target,
        compile_sdk = cfg.sdk.compile,
        "module config loaded"
    );
    debug!(abis = ?cfg.abi_filters, signing = %cfg.signing_config, "resolved packaging settings");

    Ok(cfg)
}

fn document_dir(path: &Path) -> PathBuf {
    path.parent()
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Helper to resolve a default document path.
///
/// Currently this just returns `Mobicfg.toml` in the current working
/// directory.
pub fn default_config_path() -> PathBuf {
    PathBuf::from("Mobicfg.toml")
}
