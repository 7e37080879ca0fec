// src/config/resolve.rs

//! Symbolic reference resolution: `RawDocument` → `BuildConfig`.
//!
//! Resolution is pure. It turns `toolchain.<field>` references into the
//! descriptor's values, collapses the ABI list into a set, and derives
//! `jvmTarget` when the document leaves it out. Invariant checks happen
//! afterwards in `validate`.

use std::collections::BTreeSet;

use tracing::debug;

use crate::config::model::{
    AppVersion, BuildConfig, IntOrRef, LanguageCompat, RawDocument, SdkVersions, REF_PREFIX,
};
use crate::errors::{ConfigError, Result};
use crate::toolchain::ToolchainDescriptor;

/// Resolve every symbolic reference in `raw` against `descriptor`.
///
/// A document with no references resolves without a descriptor; the first
/// reference encountered with `descriptor == None` fails with
/// `UnresolvedReference`.
pub fn resolve_document(
    raw: &RawDocument,
    descriptor: Option<&ToolchainDescriptor>,
) -> Result<BuildConfig> {
    let compile = resolve_int("module.compileSdk", &raw.module.compile_sdk, descriptor)?;
    let min = resolve_int("defaultConfig.minSdk", &raw.default_config.min_sdk, descriptor)?;
    let target = resolve_int(
        "defaultConfig.targetSdk",
        &raw.default_config.target_sdk,
        descriptor,
    )?;
    let version_code = resolve_int(
        "defaultConfig.versionCode",
        &raw.default_config.version_code,
        descriptor,
    )?;
    let version_name = resolve_string(
        "defaultConfig.versionName",
        &raw.default_config.version_name,
        descriptor,
    )?;

    // Duplicates collapse; an empty list means the full supported set.
    let abi_filters: BTreeSet<String> = if raw.default_config.abi_filters.is_empty() {
        debug!("abiFilters omitted, defaulting to the toolchain's supported set");
        supported_abis(descriptor)
    } else {
        raw.default_config.abi_filters.iter().cloned().collect()
    };

    let compat = LanguageCompat {
        source: raw.compile_options.source_compatibility,
        target: raw.compile_options.target_compatibility,
        jvm_target: raw
            .compile_options
            .jvm_target
            .unwrap_or(raw.compile_options.target_compatibility),
    };

    Ok(BuildConfig {
        plugins: raw.plugins.clone(),
        namespace: raw.module.namespace.clone(),
        application_id: raw.default_config.application_id.clone(),
        ndk_version: raw.module.ndk_version.clone(),
        abi_filters,
        signing_config: raw.build_types.release.signing_config.clone(),
        source_root: raw.toolchain.source.clone(),
        sdk: SdkVersions {
            compile,
            min,
            target,
        },
        version: AppVersion {
            code: version_code,
            name: version_name,
        },
        compat,
    })
}

/// The ABI set the toolchain can package for, falling back to the defaults
/// when no descriptor is available.
pub fn supported_abis(descriptor: Option<&ToolchainDescriptor>) -> BTreeSet<String> {
    descriptor
        .map(|d| d.supported_abis.clone())
        .unwrap_or_else(crate::toolchain::default_supported_abis)
}

fn resolve_int(key: &str, spec: &IntOrRef, descriptor: Option<&ToolchainDescriptor>) -> Result<u32> {
    match spec {
        IntOrRef::Int(v) => Ok(*v),
        IntOrRef::Ref(r) => {
            let field = ref_field(key, r)?;
            let descriptor = require_descriptor(key, r, descriptor)?;
            descriptor.int_field(field).ok_or_else(|| {
                ConfigError::UnresolvedReference(format!(
                    "{key} = \"{r}\": toolchain descriptor has no integer field '{field}'"
                ))
            })
        }
    }
}

fn resolve_string(
    key: &str,
    value: &str,
    descriptor: Option<&ToolchainDescriptor>,
) -> Result<String> {
    // String fields carry a reference exactly when they use the prefix.
    if !value.starts_with(REF_PREFIX) {
        return Ok(value.to_string());
    }
    let field = ref_field(key, value)?;
    let descriptor = require_descriptor(key, value, descriptor)?;
    descriptor
        .str_field(field)
        .map(|s| s.to_string())
        .ok_or_else(|| {
            ConfigError::UnresolvedReference(format!(
                "{key} = \"{value}\": toolchain descriptor has no string field '{field}'"
            ))
        })
}

fn ref_field<'a>(key: &str, reference: &'a str) -> Result<&'a str> {
    match reference.strip_prefix(REF_PREFIX) {
        Some(field) if !field.is_empty() => Ok(field),
        _ => Err(ConfigError::MalformedConfig(format!(
            "{key} = \"{reference}\": expected an integer or a '{REF_PREFIX}<field>' reference"
        ))),
    }
}

fn require_descriptor<'a>(
    key: &str,
    reference: &str,
    descriptor: Option<&'a ToolchainDescriptor>,
) -> Result<&'a ToolchainDescriptor> {
    descriptor.ok_or_else(|| {
        ConfigError::UnresolvedReference(format!(
            "{key} = \"{reference}\": no toolchain descriptor available to resolve it"
        ))
    })
}
