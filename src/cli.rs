// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, ValueEnum};

/// Command-line arguments for `passgraph`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "passgraph",
    version,
    about = "Compile a render pipeline description into a pass schedule and run it.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the pipeline description (TOML).
    #[arg(long, value_name = "PATH", default_value = "Passgraph.toml")]
    pub pipeline: String,

    /// Validate and compile, print the schedule, but don't execute any pass.
    #[arg(long)]
    pub dry_run: bool,

    /// Number of frames to execute, at least 1 (overrides `[config].frames`).
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u64).range(1..))]
    pub frames: Option<u64>,

    /// Print the passes downstream of a node and exit.
    ///
    /// Accepts `resource:NAME`, `pass:NAME`, or a bare name (resources are
    /// looked up first).
    #[arg(long, value_name = "NODE")]
    pub downstream: Option<String>,

    /// Keep running and recompile whenever the pipeline file changes.
    #[arg(long)]
    pub watch: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `PASSGRAPH_LOG` or a default level will be used.
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
