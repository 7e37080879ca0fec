// src/toolchain.rs

//! The toolchain descriptor consumed by the loader.
//!
//! The descriptor lives at `toolchain.toml` inside the shared source tree and
//! carries the resolved values behind `toolchain.<field>` references, plus the
//! ABI set the toolchain can package native libraries for.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::errors::{ConfigError, Result};

/// File name of the descriptor inside the source root.
pub const DESCRIPTOR_FILE: &str = "toolchain.toml";

/// ABIs every toolchain release can package; used when the descriptor does not
/// narrow the set (or when no descriptor is present at all).
pub const DEFAULT_SUPPORTED_ABIS: &[&str] = &["armeabi-v7a", "arm64-v8a", "x86", "x86_64"];

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ToolchainDescriptor {
    #[serde(rename = "compileSdkVersion")]
    pub compile_sdk_version: u32,

    #[serde(rename = "minSdkVersion")]
    pub min_sdk_version: u32,

    #[serde(rename = "targetSdkVersion")]
    pub target_sdk_version: u32,

    #[serde(rename = "versionCode")]
    pub version_code: u32,

    #[serde(rename = "versionName")]
    pub version_name: String,

    #[serde(rename = "supportedAbis", default = "default_supported_abis")]
    pub supported_abis: BTreeSet<String>,
}

pub fn default_supported_abis() -> BTreeSet<String> {
    DEFAULT_SUPPORTED_ABIS.iter().map(|s| s.to_string()).collect()
}

impl ToolchainDescriptor {
    /// Look up an integer field by its reference name (`compileSdkVersion`,
    /// `minSdkVersion`, `targetSdkVersion`, `versionCode`).
    pub fn int_field(&self, name: &str) -> Option<u32> {
        match name {
            "compileSdkVersion" => Some(self.compile_sdk_version),
            "minSdkVersion" => Some(self.min_sdk_version),
            "targetSdkVersion" => Some(self.target_sdk_version),
            "versionCode" => Some(self.version_code),
            _ => None,
        }
    }

    /// Look up a string field by its reference name (`versionName`).
    pub fn str_field(&self, name: &str) -> Option<&str> {
        match name {
            "versionName" => Some(&self.version_name),
            _ => None,
        }
    }
}

/// Read and parse a descriptor file.
pub fn load_descriptor(path: impl AsRef<Path>) -> Result<ToolchainDescriptor> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let descriptor: ToolchainDescriptor = toml::from_str(&contents).map_err(|e| {
        ConfigError::MalformedConfig(format!("toolchain descriptor {}: {e}", path.display()))
    })?;

    debug!(path = %path.display(), "loaded toolchain descriptor");
    Ok(descriptor)
}

/// Look for a descriptor in the source root referenced by the document.
///
/// Returns `Ok(None)` when no descriptor file exists there; a document without
/// symbolic references loads fine without one.
pub fn discover_descriptor(doc_dir: &Path, source: &Path) -> Result<Option<ToolchainDescriptor>> {
    let candidate = doc_dir.join(source).join(DESCRIPTOR_FILE);
    if !candidate.is_file() {
        debug!(path = %candidate.display(), "no toolchain descriptor found");
        return Ok(None);
    }
    Ok(Some(load_descriptor(&candidate)?))
}
