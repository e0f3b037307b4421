// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, ValueEnum};

use crate::types::NotifierKind;

/// Command-line arguments for `stylewatch`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "stylewatch",
    version,
    about = "Compile SCSS into compressed, vendor-prefixed CSS and rebuild on change.",
    long_about = None
)]
pub struct CliArgs {
    /// Task to run: `css` (compile once), `watch` (compile, then rebuild on
    /// change) or `default` (same as `css`).
    #[arg(value_name = "TASK", default_value = "default")]
    pub task: String,

    /// Path to the config file (TOML).
    ///
    /// If omitted, `Stylewatch.toml` in the current directory is used when it
    /// exists, and built-in defaults otherwise.
    #[arg(long, value_name = "PATH")]
    pub config: Option<String>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `STYLEWATCH_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Where to surface compile errors; overrides `[notify].backend`.
    #[arg(long, value_enum, value_name = "KIND")]
    pub notifier: Option<NotifierKind>,

    /// Exit with status 1 when a one-shot compile fails.
    #[arg(long)]
    pub fail_on_error: bool,

    /// Resolve config and print the task plan, but don't compile anything.
    #[arg(long)]
    pub dry_run: bool,
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
