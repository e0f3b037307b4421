// src/logging.rs

//! `tracing` subscriber setup.
//!
//! The filter comes from, in order:
//! 1. `--log-level`, applied to stylewatch's own targets
//! 2. `STYLEWATCH_LOG`, a full `EnvFilter` directive string
//!    (e.g. `"debug"` or `"stylewatch::watch=trace,notify=debug"`)
//! 3. `info` for stylewatch, `warn` for everything else
//!
//! Output goes to stderr.

use anyhow::{anyhow, Result};
use tracing_subscriber::{fmt, EnvFilter};

use crate::cli::LogLevel;

/// Environment variable consulted when `--log-level` is absent.
pub const LOG_ENV_VAR: &str = "STYLEWATCH_LOG";

/// Install the global subscriber. Call once at startup.
pub fn init_logging(cli_level: Option<LogLevel>) -> Result<()> {
    let env = std::env::var(LOG_ENV_VAR).ok();
    let filter = build_filter(cli_level, env.as_deref())?;

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow!("installing log subscriber: {e}"))
}

fn build_filter(cli_level: Option<LogLevel>, env: Option<&str>) -> Result<EnvFilter> {
    let directives = match (cli_level, env.map(str::trim)) {
        (Some(lvl), _) => default_directives(level_name(lvl)),
        (None, Some(env)) if !env.is_empty() => env.to_string(),
        _ => default_directives("info"),
    };
    EnvFilter::try_new(&directives)
        .map_err(|e| anyhow!("invalid {LOG_ENV_VAR} value {directives:?}: {e}"))
}

/// Our own level for stylewatch, `warn` for dependencies.
fn default_directives(level: &str) -> String {
    format!("warn,stylewatch={level}")
}

fn level_name(lvl: LogLevel) -> &'static str {
    match lvl {
        LogLevel::Error => "error",
        LogLevel::Warn => "warn",
        LogLevel::Info => "info",
        LogLevel::Debug => "debug",
        LogLevel::Trace => "trace",
    }
}
