// src/config/resolve.rs

//! Turn a validated [`ConfigFile`] into the concrete paths and options the
//! pipeline and watcher work with.

use std::path::{Component, Path, PathBuf};

use crate::config::model::{ConfigFile, ConfigSection, NotifySection, WatchSection};
use crate::errors::{Result, StylewatchError};
use crate::pipeline::PrefixOptions;
use crate::types::OutputStyle;

/// Everything one build needs, with paths resolved against the base directory.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Directory holding the entry stylesheet and partials (the watch root).
    pub source_dir: PathBuf,
    pub entry_path: PathBuf,
    /// Import search roots, in lookup order.
    pub include_roots: Vec<PathBuf>,
    pub output_dir: PathBuf,
    /// `<output_dir>/<entry stem>.css`
    pub output_path: PathBuf,
    pub style: OutputStyle,
    pub prefix: PrefixOptions,
    pub watch: WatchSection,
    pub config: ConfigSection,
    pub notify: NotifySection,
}

impl ResolvedConfig {
    pub fn resolve(cfg: &ConfigFile, base_dir: &Path) -> Result<Self> {
        let paths = &cfg.paths;

        let source_dir = resolve_path(base_dir, &paths.source);
        let library_dir = resolve_path(base_dir, &paths.library);
        let entry_path = resolve_path(&source_dir, &paths.entry);
        let output_dir = resolve_path(base_dir, &paths.output);

        let stem = entry_path
            .file_stem()
            .and_then(|s| s.to_str())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| {
                StylewatchError::ConfigError(format!(
                    "[paths].entry has no file name: '{}'",
                    paths.entry
                ))
            })?;
        let output_path = output_dir.join(format!("{stem}.css"));

        let mut include_roots = vec![source_dir.clone()];
        include_roots.extend(paths.vendor.iter().map(|v| resolve_path(&library_dir, v)));
        include_roots.extend(
            cfg.compile
                .load_paths
                .iter()
                .map(|p| resolve_path(base_dir, p)),
        );

        let prefix = PrefixOptions::from_browserslist(&cfg.compile.browsers, cfg.compile.style)
            .map_err(|e| StylewatchError::ConfigError(e.to_string()))?;

        Ok(Self {
            source_dir,
            entry_path,
            include_roots,
            output_dir,
            output_path,
            style: cfg.compile.style,
            prefix,
            watch: cfg.watch.clone(),
            config: cfg.config.clone(),
            notify: cfg.notify.clone(),
        })
    }
}

/// Join `path` onto `base` unless it is absolute, dropping `.` components so
/// that `./scss` and `scss` resolve to the same place.
pub fn resolve_path(base: &Path, path: &str) -> PathBuf {
    let path = Path::new(path);
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    };
    joined
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::model::RawConfigFile;

    fn defaults() -> ConfigFile {
        ConfigFile::try_from(RawConfigFile::default()).unwrap()
    }

    #[test]
    fn defaults_resolve_to_stock_layout() {
        let resolved = ResolvedConfig::resolve(&defaults(), Path::new("site")).unwrap();

        assert_eq!(resolved.source_dir, PathBuf::from("site/scss"));
        assert_eq!(resolved.entry_path, PathBuf::from("site/scss/bundle.scss"));
        assert_eq!(
            resolved.include_roots,
            vec![
                PathBuf::from("site/scss"),
                PathBuf::from("site/node_modules/bulma"),
            ]
        );
        assert_eq!(resolved.output_path, PathBuf::from("site/public/css/bundle.css"));
        assert!(resolved.style.is_compressed());
    }

    #[test]
    fn extra_load_paths_come_last() {
        let mut raw = RawConfigFile::default();
        raw.compile.load_paths = vec!["./shared".to_string()];
        raw.paths.vendor = vec![];
        let cfg = ConfigFile::try_from(raw).unwrap();

        let resolved = ResolvedConfig::resolve(&cfg, Path::new("")).unwrap();
        assert_eq!(
            resolved.include_roots,
            vec![PathBuf::from("scss"), PathBuf::from("shared")]
        );
    }

    #[test]
    fn output_is_named_after_entry() {
        let mut raw = RawConfigFile::default();
        raw.paths.entry = "themes/dark.scss".to_string();
        let cfg = ConfigFile::try_from(raw).unwrap();

        let resolved = ResolvedConfig::resolve(&cfg, Path::new("")).unwrap();
        assert_eq!(resolved.output_path, PathBuf::from("public/css/dark.css"));
    }
}
