// src/config/validate.rs

use std::path::Path;

use globset::Glob;
use lightningcss::targets::Browsers;

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{Result, StylewatchError};

/// Upper bound for `[watch].debounce_ms`.
pub const MAX_DEBOUNCE_MS: u64 = 10_000;

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = StylewatchError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw))
    }
}

/// Run every semantic check on a raw config.
pub fn validate_config(cfg: &RawConfigFile) -> Result<()> {
    validate_raw_config(cfg)
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    validate_paths(cfg)?;
    validate_browsers(cfg)?;
    validate_watch(cfg)?;
    validate_global_config(cfg)?;
    Ok(())
}

fn validate_paths(cfg: &RawConfigFile) -> Result<()> {
    let paths = &cfg.paths;

    if paths.entry.trim().is_empty() {
        return Err(config_error("[paths].entry must not be empty"));
    }
    if Path::new(&paths.entry).is_absolute() {
        return Err(config_error(format!(
            "[paths].entry must be relative to [paths].source (got '{}')",
            paths.entry
        )));
    }
    if paths.source.trim().is_empty() {
        return Err(config_error("[paths].source must not be empty"));
    }
    if paths.output.trim().is_empty() {
        return Err(config_error("[paths].output must not be empty"));
    }
    for vendor in &paths.vendor {
        if vendor.trim().is_empty() {
            return Err(config_error("[paths].vendor entries must not be empty"));
        }
    }
    Ok(())
}

fn validate_browsers(cfg: &RawConfigFile) -> Result<()> {
    if cfg.compile.browsers.is_empty() {
        return Ok(());
    }
    Browsers::from_browserslist(cfg.compile.browsers.iter()).map_err(|e| {
        config_error(format!(
            "[compile].browsers is not a valid browserslist query: {e}"
        ))
    })?;
    Ok(())
}

fn validate_watch(cfg: &RawConfigFile) -> Result<()> {
    let watch = &cfg.watch;

    if watch.patterns.is_empty() {
        return Err(config_error("[watch].patterns must contain at least one glob"));
    }
    for pat in watch.patterns.iter().chain(watch.exclude.iter()) {
        Glob::new(pat)
            .map_err(|e| config_error(format!("invalid glob pattern '{pat}': {e}")))?;
    }
    if watch.debounce_ms > MAX_DEBOUNCE_MS {
        return Err(config_error(format!(
            "[watch].debounce_ms must be <= {MAX_DEBOUNCE_MS} (got {})",
            watch.debounce_ms
        )));
    }
    Ok(())
}

fn validate_global_config(cfg: &RawConfigFile) -> Result<()> {
    // triggered_while_running_behaviour is strongly typed and validated
    // during deserialization.
    if cfg.config.queue_length == 0 {
        return Err(config_error("[config].queue_length must be >= 1 (got 0)"));
    }
    Ok(())
}

fn config_error(msg: impl Into<String>) -> StylewatchError {
    StylewatchError::ConfigError(msg.into())
}
