// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, ValueEnum};

/// Command-line arguments for `mobicfg`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "mobicfg",
    version,
    about = "Validate and resolve a mobile app module build configuration.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the module document (TOML).
    ///
    /// Default: `Mobicfg.toml` in the current working directory.
    #[arg(long, value_name = "PATH", default_value = "Mobicfg.toml")]
    pub config: String,

    /// Path to a toolchain descriptor, overriding discovery via the
    /// document's `toolchain.source` pointer.
    #[arg(long, value_name = "PATH")]
    pub toolchain: Option<String>,

    /// Print the resolved configuration as JSON instead of the summary.
    #[arg(long)]
    pub json: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `MOBICFG_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
