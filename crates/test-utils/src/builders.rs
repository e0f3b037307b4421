#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use stylewatch::config::{ConfigFile, RawConfigFile, ResolvedConfig};
use stylewatch::types::{NotifierKind, OutputStyle, TriggerWhileRunningBehaviour};
use tempfile::TempDir;

/// Builder for `ConfigFile` to simplify test setup.
pub struct ConfigFileBuilder {
    config: RawConfigFile,
}

impl ConfigFileBuilder {
    pub fn new() -> Self {
        let mut config = RawConfigFile::default();
        // Tests must never pop up desktop notifications.
        config.notify.backend = NotifierKind::None;
        Self { config }
    }

    pub fn browsers(mut self, queries: &[&str]) -> Self {
        self.config.compile.browsers = queries.iter().map(|q| q.to_string()).collect();
        self
    }

    pub fn style(mut self, style: OutputStyle) -> Self {
        self.config.compile.style = style;
        self
    }

    pub fn vendor(mut self, packages: &[&str]) -> Self {
        self.config.paths.vendor = packages.iter().map(|p| p.to_string()).collect();
        self
    }

    pub fn debounce_ms(mut self, ms: u64) -> Self {
        self.config.watch.debounce_ms = ms;
        self
    }

    pub fn use_hash(mut self, val: bool) -> Self {
        self.config.watch.use_hash = val;
        self
    }

    pub fn behaviour(mut self, behaviour: TriggerWhileRunningBehaviour, queue_length: usize) -> Self {
        self.config.config.triggered_while_running_behaviour = behaviour;
        self.config.config.queue_length = queue_length;
        self
    }

    pub fn build(self) -> ConfigFile {
        ConfigFile::try_from(self.config).expect("Failed to build valid config from builder")
    }

    /// Build and resolve against `base_dir`.
    pub fn resolve(self, base_dir: &Path) -> ResolvedConfig {
        ResolvedConfig::resolve(&self.build(), base_dir).expect("Failed to resolve config")
    }
}

impl Default for ConfigFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A throwaway project directory with the stock layout:
/// `scss/`, `node_modules/bulma/`, `public/css/`.
pub struct Project {
    dir: TempDir,
}

impl Project {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("creating temp project dir");
        fs::create_dir_all(dir.path().join("scss")).expect("creating scss dir");
        Self { dir }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Write a file relative to the project root, creating directories.
    pub fn write(&self, rel: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("creating parent dir");
        }
        fs::write(&path, contents).expect("writing fixture file");
        path
    }

    pub fn output_path(&self) -> PathBuf {
        self.dir.path().join("public/css/bundle.css")
    }

    /// Contents of `public/css/bundle.css`, if it exists.
    pub fn output(&self) -> Option<String> {
        fs::read_to_string(self.output_path()).ok()
    }

    /// Resolve a config built by `builder` against this project.
    pub fn resolve(&self, builder: ConfigFileBuilder) -> ResolvedConfig {
        builder.resolve(self.root())
    }
}

impl Default for Project {
    fn default() -> Self {
        Self::new()
    }
}
