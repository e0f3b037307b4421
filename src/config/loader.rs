// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{Result, StylewatchError};

/// File looked up in the current directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "Stylewatch.toml";

/// Load a configuration file from a given path and return the raw `RawConfigFile`.
///
/// This only performs TOML deserialization; it does **not** perform semantic
/// validation. Use [`load_and_validate`] for that.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawConfigFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let config: RawConfigFile = toml::from_str(&contents)?;

    Ok(config)
}

/// Load a configuration file from path and validate it.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<ConfigFile> {
    let raw_config = load_from_path(&path)?;
    let config = ConfigFile::try_from(raw_config)?;
    Ok(config)
}

/// Default config location: `Stylewatch.toml` in the current directory.
pub fn default_config_path() -> PathBuf {
    PathBuf::from(DEFAULT_CONFIG_FILE)
}

/// A validated config plus the directory its relative paths hang off.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: ConfigFile,
    /// Directory containing the config file, or the working directory when
    /// running on built-in defaults.
    pub base_dir: PathBuf,
    /// The file that was read, if any.
    pub path: Option<PathBuf>,
}

/// Config lookup used by the CLI.
///
/// - An explicit path must exist.
/// - Without one, `Stylewatch.toml` is used when present.
/// - Otherwise the built-in defaults apply, relative to the working directory.
pub fn load_for_cli(explicit: Option<&Path>) -> Result<LoadedConfig> {
    let candidate = match explicit {
        Some(path) => {
            if !path.is_file() {
                return Err(StylewatchError::ConfigError(format!(
                    "config file {:?} does not exist",
                    path
                )));
            }
            Some(path.to_path_buf())
        }
        None => {
            let path = default_config_path();
            path.is_file().then_some(path)
        }
    };

    match candidate {
        Some(path) => {
            let config = load_and_validate(&path)?;
            let base_dir = config_root_dir(&path);
            info!(config = ?path, base = ?base_dir, "loaded config file");
            Ok(LoadedConfig {
                config,
                base_dir,
                path: Some(path),
            })
        }
        None => {
            debug!("no config file found; using built-in defaults");
            let config = ConfigFile::try_from(RawConfigFile::default())?;
            Ok(LoadedConfig {
                config,
                base_dir: working_dir(),
                path: None,
            })
        }
    }
}

/// Directory relative paths in a config file are resolved against.
///
/// - If the config path has a non-empty parent (e.g. "site/Stylewatch.toml"),
///   we use that directory.
/// - If it's just a bare filename like "Stylewatch.toml" (parent = ""),
///   we fall back to the current working directory.
pub fn config_root_dir(config_path: &Path) -> PathBuf {
    match config_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => working_dir(),
    }
}

fn working_dir() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}
