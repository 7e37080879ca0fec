// src/lib.rs

pub mod cli;
pub mod config;
pub mod errors;
pub mod logging;
pub mod toolchain;

use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::debug;

use crate::cli::CliArgs;
use crate::config::loader::{load_and_validate, load_with_descriptor};
use crate::config::model::BuildConfig;
use crate::toolchain::load_descriptor;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - document loading + descriptor discovery (or the `--toolchain` override)
/// - reference resolution and invariant validation
/// - summary or JSON output of the resolved configuration
pub fn run(args: CliArgs) -> Result<()> {
    let config_path = PathBuf::from(&args.config);

    let cfg = match &args.toolchain {
        Some(descriptor_path) => {
            let descriptor = load_descriptor(Path::new(descriptor_path))?;
            load_with_descriptor(&config_path, Some(&descriptor))?
        }
        None => load_and_validate(&config_path)?,
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&cfg)?);
    } else {
        print_resolved(&cfg);
    }

    debug!("document check complete (no build performed)");
    Ok(())
}

/// Human-readable dump of a resolved configuration.
fn print_resolved(cfg: &BuildConfig) {
    println!("mobicfg: module config OK");
    println!("  applicationId: {}", cfg.application_id);
    println!("  namespace:     {}", cfg.namespace);
    println!(
        "  sdk:           min={} target={} compile={}",
        cfg.sdk.min, cfg.sdk.target, cfg.sdk.compile
    );
    println!(
        "  version:       {} (code {})",
        cfg.version.name, cfg.version.code
    );
    println!(
        "  compat:        source={} target={} jvmTarget={}",
        cfg.compat.source, cfg.compat.target, cfg.compat.jvm_target
    );
    if let Some(ref ndk) = cfg.ndk_version {
        println!("  ndkVersion:    {ndk}");
    }
    println!("  abiFilters:    {:?}", cfg.abi_filters);
    println!("  signingConfig: {}", cfg.signing_config);
    println!("  sourceRoot:    {}", cfg.source_root.display());

    println!();
    println!("plugins ({}):", cfg.plugins.len());
    for plugin in &cfg.plugins {
        println!("  - {plugin}");
    }
}
