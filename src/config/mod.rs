// src/config/mod.rs

//! Configuration loading and validation for stylewatch.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a config file from disk, or fall back to defaults (`loader.rs`).
//! - Validate paths, globs and browser queries (`validate.rs`).
//! - Resolve everything into concrete build inputs (`resolve.rs`).

pub mod loader;
pub mod model;
pub mod resolve;
pub mod validate;

pub use loader::{load_and_validate, load_for_cli, load_from_path, LoadedConfig};
pub use model::{
    CompileSection, ConfigFile, ConfigSection, NotifySection, PathsSection, RawConfigFile,
    WatchSection,
};
pub use resolve::ResolvedConfig;
pub use validate::validate_config;
