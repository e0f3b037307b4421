// src/config/model.rs

use serde::Deserialize;

use crate::types::{NotifierKind, OutputStyle, TriggerWhileRunningBehaviour};

/// Top-level configuration as read from a TOML file.
///
/// ```toml
/// [paths]
/// source = "./scss"
/// library = "./node_modules"
/// vendor = ["bulma"]
///
/// [compile]
/// browsers = ["defaults"]
///
/// [watch]
/// patterns = ["*.scss"]
/// ```
///
/// All sections are optional; an empty file (or no file at all) reproduces
/// the stock pipeline: `scss/bundle.scss` → `public/css/bundle.css`.
///
/// This is the raw form; use `ConfigFile::try_from` (or
/// [`crate::config::load_and_validate`]) to get a validated [`ConfigFile`].
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawConfigFile {
    #[serde(default)]
    pub paths: PathsSection,

    #[serde(default)]
    pub compile: CompileSection,

    #[serde(default)]
    pub watch: WatchSection,

    /// Trigger-while-running policy from `[config]`.
    #[serde(default)]
    pub config: ConfigSection,

    #[serde(default)]
    pub notify: NotifySection,
}

/// Validated configuration.
///
/// Fields are public for reading; construction goes through `TryFrom`.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pub paths: PathsSection,
    pub compile: CompileSection,
    pub watch: WatchSection,
    pub config: ConfigSection,
    pub notify: NotifySection,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(raw: RawConfigFile) -> Self {
        Self {
            paths: raw.paths,
            compile: raw.compile,
            watch: raw.watch,
            config: raw.config,
            notify: raw.notify,
        }
    }
}

/// `[paths]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct PathsSection {
    /// Directory holding the entry stylesheet and its partials.
    #[serde(default = "default_source")]
    pub source: String,

    /// Directory holding third-party stylesheet packages.
    #[serde(default = "default_library")]
    pub library: String,

    /// Packages under `library` added as include roots, in order.
    #[serde(default = "default_vendor")]
    pub vendor: Vec<String>,

    /// Entry file, relative to `source`.
    #[serde(default = "default_entry")]
    pub entry: String,

    /// Output directory; the CSS file is named after the entry.
    #[serde(default = "default_output")]
    pub output: String,
}

fn default_source() -> String {
    "./scss".to_string()
}

fn default_library() -> String {
    "./node_modules".to_string()
}

fn default_vendor() -> Vec<String> {
    vec!["bulma".to_string()]
}

fn default_entry() -> String {
    "bundle.scss".to_string()
}

fn default_output() -> String {
    "./public/css".to_string()
}

impl Default for PathsSection {
    fn default() -> Self {
        Self {
            source: default_source(),
            library: default_library(),
            vendor: default_vendor(),
            entry: default_entry(),
            output: default_output(),
        }
    }
}

/// `[compile]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct CompileSection {
    #[serde(default)]
    pub style: OutputStyle,

    /// Browserslist queries deciding which vendor prefixes are emitted.
    #[serde(default = "default_browsers")]
    pub browsers: Vec<String>,

    /// Extra include roots, searched after `source` and the vendor roots.
    #[serde(default)]
    pub load_paths: Vec<String>,
}

fn default_browsers() -> Vec<String> {
    vec!["defaults".to_string()]
}

impl Default for CompileSection {
    fn default() -> Self {
        Self {
            style: OutputStyle::default(),
            browsers: default_browsers(),
            load_paths: Vec::new(),
        }
    }
}

/// `[watch]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct WatchSection {
    /// Globs relative to `paths.source` that trigger a rebuild.
    #[serde(default = "default_watch_patterns")]
    pub patterns: Vec<String>,

    /// Globs relative to `paths.source` that never trigger a rebuild.
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Watch subdirectories of `paths.source` too.
    #[serde(default)]
    pub recursive: bool,

    /// Window in which a burst of filesystem events collapses into one trigger.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Only rebuild when the watched files' content actually changed.
    #[serde(default = "default_use_hash")]
    pub use_hash: bool,
}

fn default_watch_patterns() -> Vec<String> {
    vec!["*.scss".to_string()]
}

fn default_debounce_ms() -> u64 {
    50
}

fn default_use_hash() -> bool {
    true
}

impl Default for WatchSection {
    fn default() -> Self {
        Self {
            patterns: default_watch_patterns(),
            exclude: Vec::new(),
            recursive: false,
            debounce_ms: default_debounce_ms(),
            use_hash: default_use_hash(),
        }
    }
}

/// `[config]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigSection {
    /// `"queue"` (default) or `"drop"`.
    #[serde(default)]
    pub triggered_while_running_behaviour: TriggerWhileRunningBehaviour,

    /// Maximum number of reruns remembered while a compile is running.
    #[serde(default = "default_queue_length")]
    pub queue_length: usize,
}

fn default_queue_length() -> usize {
    1
}

impl Default for ConfigSection {
    fn default() -> Self {
        Self {
            triggered_while_running_behaviour: TriggerWhileRunningBehaviour::default(),
            queue_length: default_queue_length(),
        }
    }
}

/// `[notify]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct NotifySection {
    #[serde(default)]
    pub backend: NotifierKind,

    /// Title used for desktop notifications.
    #[serde(default = "default_title")]
    pub title: String,
}

fn default_title() -> String {
    "stylewatch".to_string()
}

impl Default for NotifySection {
    fn default() -> Self {
        Self {
            backend: NotifierKind::default(),
            title: default_title(),
        }
    }
}
