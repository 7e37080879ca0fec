// src/config/validate.rs

use std::collections::BTreeSet;
use std::path::Path;

use regex::Regex;

use crate::config::model::{BuildConfig, APPLICATION_PLUGIN};
use crate::errors::{ConfigError, Result};

/// Everything validation needs besides the config itself: where the document
/// lives (for the source-root check), which ABIs the toolchain supports, and
/// which signing aliases the document declares.
pub struct ValidationContext<'a> {
    pub doc_dir: &'a Path,
    pub supported_abis: &'a BTreeSet<String>,
    pub signing_aliases: &'a BTreeSet<String>,
}

/// Run semantic validation against a resolved configuration.
///
/// Checks, in order, stopping at the first failure:
/// - the plugin list declares the application plugin
/// - `applicationId` and `namespace` are reverse-domain identifiers
/// - `ndkVersion` (when present) is a dotted numeric triple
/// - `minSdk <= targetSdk <= compileSdk`
/// - `versionCode >= 1` and `versionName` is non-empty
/// - `sourceCompatibility <= targetCompatibility` and `jvmTarget` matches
/// - every ABI filter is in the toolchain's supported set
/// - the signing alias names a declared (or built-in) signing config
/// - the source root exists relative to the document
pub fn validate_build_config(cfg: &BuildConfig, ctx: &ValidationContext<'_>) -> Result<()> {
    validate_plugins(cfg)?;
    validate_identifiers(cfg)?;
    validate_ndk_version(cfg)?;
    validate_sdk_ordering(cfg)?;
    validate_version(cfg)?;
    validate_compat(cfg)?;
    validate_abi_filters(cfg, ctx.supported_abis)?;
    validate_signing_alias(cfg, ctx.signing_aliases)?;
    validate_source_root(cfg, ctx.doc_dir)?;
    Ok(())
}

fn validate_plugins(cfg: &BuildConfig) -> Result<()> {
    if !cfg.plugins.iter().any(|p| p == APPLICATION_PLUGIN) {
        return Err(ConfigError::InvariantViolation(format!(
            "plugins must include '{APPLICATION_PLUGIN}' for an application module (got {:?})",
            cfg.plugins
        )));
    }
    Ok(())
}

fn validate_identifiers(cfg: &BuildConfig) -> Result<()> {
    // Two or more dot-separated segments, each starting with a letter.
    let id_re = Regex::new(r"^[A-Za-z][A-Za-z0-9_]*(\.[A-Za-z][A-Za-z0-9_]*)+$")
        .expect("identifier regex is valid");

    if !id_re.is_match(&cfg.application_id) {
        return Err(ConfigError::InvariantViolation(format!(
            "applicationId '{}' is not a reverse-domain identifier",
            cfg.application_id
        )));
    }
    if !id_re.is_match(&cfg.namespace) {
        return Err(ConfigError::InvariantViolation(format!(
            "namespace '{}' is not a reverse-domain identifier",
            cfg.namespace
        )));
    }
    Ok(())
}

fn validate_ndk_version(cfg: &BuildConfig) -> Result<()> {
    let Some(ndk) = &cfg.ndk_version else {
        return Ok(());
    };
    let ndk_re = Regex::new(r"^\d+\.\d+\.\d+$").expect("ndk version regex is valid");
    if !ndk_re.is_match(ndk) {
        return Err(ConfigError::MalformedConfig(format!(
            "module.ndkVersion '{ndk}' is not a dotted numeric triple"
        )));
    }
    Ok(())
}

fn validate_sdk_ordering(cfg: &BuildConfig) -> Result<()> {
    let sdk = &cfg.sdk;
    if !(sdk.min <= sdk.target && sdk.target <= sdk.compile) {
        return Err(ConfigError::InvariantViolation(format!(
            "SDK versions must satisfy minSdk <= targetSdk <= compileSdk (got min={}, target={}, compile={})",
            sdk.min, sdk.target, sdk.compile
        )));
    }
    Ok(())
}

fn validate_version(cfg: &BuildConfig) -> Result<()> {
    if cfg.version.code < 1 {
        return Err(ConfigError::InvariantViolation(format!(
            "defaultConfig.versionCode must be >= 1 (got {})",
            cfg.version.code
        )));
    }
    if cfg.version.name.is_empty() {
        return Err(ConfigError::InvariantViolation(
            "defaultConfig.versionName must not be empty".to_string(),
        ));
    }
    Ok(())
}

fn validate_compat(cfg: &BuildConfig) -> Result<()> {
    let compat = &cfg.compat;
    if compat.source > compat.target {
        return Err(ConfigError::InvariantViolation(format!(
            "sourceCompatibility {} exceeds targetCompatibility {}",
            compat.source, compat.target
        )));
    }
    if compat.jvm_target != compat.target {
        return Err(ConfigError::InvariantViolation(format!(
            "jvmTarget {} must match targetCompatibility {}",
            compat.jvm_target, compat.target
        )));
    }
    Ok(())
}

fn validate_abi_filters(cfg: &BuildConfig, supported: &BTreeSet<String>) -> Result<()> {
    for abi in &cfg.abi_filters {
        if !supported.contains(abi) {
            return Err(ConfigError::InvariantViolation(format!(
                "abiFilters contains '{abi}', which the toolchain does not support (supported: {supported:?})"
            )));
        }
    }
    Ok(())
}

fn validate_signing_alias(cfg: &BuildConfig, aliases: &BTreeSet<String>) -> Result<()> {
    if !aliases.contains(&cfg.signing_config) {
        return Err(ConfigError::UnresolvedReference(format!(
            "buildTypes.release.signingConfig '{}' names no declared signing config (declared: {aliases:?})",
            cfg.signing_config
        )));
    }
    Ok(())
}

fn validate_source_root(cfg: &BuildConfig, doc_dir: &Path) -> Result<()> {
    let resolved = doc_dir.join(&cfg.source_root);
    if !resolved.is_dir() {
        return Err(ConfigError::UnresolvedReference(format!(
            "toolchain.source '{}' does not exist relative to the document ({})",
            cfg.source_root.display(),
            resolved.display()
        )));
    }
    Ok(())
}
