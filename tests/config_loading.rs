// tests/config_loading.rs

use std::fs;
use std::path::{Path, PathBuf};

use stylewatch::config::{load_and_validate, load_for_cli, ResolvedConfig};
use stylewatch::errors::StylewatchError;
use stylewatch::fs::RealFileSystem;
use stylewatch::pipeline::build;
use stylewatch::types::{NotifierKind, OutputStyle, TriggerWhileRunningBehaviour};
use stylewatch_test_utils::builders::Project;
use stylewatch_test_utils::init_tracing;

fn demos_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("demos")
}

#[test]
fn demo_config_loads_with_expected_values() {
    init_tracing();
    let cfg = load_and_validate(demos_dir().join("Stylewatch.toml")).unwrap();

    assert_eq!(cfg.paths.vendor, vec!["bulma".to_string()]);
    assert_eq!(cfg.paths.entry, "bundle.scss");
    assert_eq!(cfg.compile.style, OutputStyle::Compressed);
    assert_eq!(cfg.compile.browsers.len(), 4);
    assert_eq!(cfg.watch.exclude, vec!["_scratch*.scss".to_string()]);
    assert_eq!(
        cfg.config.triggered_while_running_behaviour,
        TriggerWhileRunningBehaviour::Queue
    );
    assert_eq!(cfg.config.queue_length, 1);
    assert_eq!(cfg.notify.backend, NotifierKind::Desktop);
}

#[test]
fn explicit_config_path_sets_the_base_dir() {
    init_tracing();
    let path = demos_dir().join("Stylewatch.toml");
    let loaded = load_for_cli(Some(&path)).unwrap();

    assert_eq!(loaded.base_dir, demos_dir());
    assert_eq!(loaded.path.as_deref(), Some(path.as_path()));

    let resolved = ResolvedConfig::resolve(&loaded.config, &loaded.base_dir).unwrap();
    assert_eq!(resolved.source_dir, demos_dir().join("scss"));
    assert_eq!(resolved.entry_path, demos_dir().join("scss/bundle.scss"));
    assert_eq!(
        resolved.include_roots,
        vec![demos_dir().join("scss"), demos_dir().join("node_modules/bulma")]
    );
    assert_eq!(resolved.output_path, demos_dir().join("public/css/bundle.css"));
}

#[test]
fn demo_stylesheets_compile() {
    init_tracing();
    let project = Project::new();
    for name in ["bundle.scss", "_variables.scss", "_layout.scss"] {
        let contents = fs::read_to_string(demos_dir().join("scss").join(name)).unwrap();
        project.write(&format!("scss/{name}"), &contents);
    }
    let cfg = load_and_validate(demos_dir().join("Stylewatch.toml")).unwrap();
    let resolved = ResolvedConfig::resolve(&cfg, project.root()).unwrap();

    let outcome = build(&resolved, &RealFileSystem).unwrap();
    assert!(outcome.is_success(), "{outcome:?}");

    let css = project.output().unwrap();
    assert!(css.contains(".columns .column"), "{css}");
    assert!(css.contains("display:flex"), "{css}");
    assert!(css.contains("#00d1b2"), "{css}");
}

#[test]
fn missing_explicit_config_is_an_error() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.toml");

    match load_for_cli(Some(&missing)) {
        Err(StylewatchError::ConfigError(msg)) => assert!(msg.contains("does not exist")),
        other => panic!("expected ConfigError, got {other:?}"),
    }
}

#[test]
fn empty_file_gives_the_stock_layout() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Stylewatch.toml");
    fs::write(&path, "").unwrap();

    let cfg = load_and_validate(&path).unwrap();
    let resolved = ResolvedConfig::resolve(&cfg, dir.path()).unwrap();

    assert_eq!(resolved.entry_path, dir.path().join("scss/bundle.scss"));
    assert_eq!(resolved.output_path, dir.path().join("public/css/bundle.css"));
    assert_eq!(resolved.watch.debounce_ms, 50);
    assert!(resolved.watch.use_hash);
}

#[test]
fn malformed_and_invalid_files_are_rejected() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();

    let syntax = dir.path().join("syntax.toml");
    fs::write(&syntax, "[paths\nsource = 1").unwrap();
    assert!(matches!(
        load_and_validate(&syntax),
        Err(StylewatchError::TomlError(_))
    ));

    let behaviour = dir.path().join("behaviour.toml");
    fs::write(
        &behaviour,
        "[config]\ntriggered_while_running_behaviour = \"restart\"\n",
    )
    .unwrap();
    assert!(matches!(
        load_and_validate(&behaviour),
        Err(StylewatchError::TomlError(_))
    ));

    let browsers = dir.path().join("browsers.toml");
    fs::write(&browsers, "[compile]\nbrowsers = [\"not a real browser 99\"]\n").unwrap();
    assert!(matches!(
        load_and_validate(&browsers),
        Err(StylewatchError::ConfigError(_))
    ));
}
