// tests/compile_pipeline.rs

use std::fs;

use stylewatch::errors::CompileStage;
use stylewatch::fs::RealFileSystem;
use stylewatch::pipeline::{build, compile, BuildOutcome, WriteStatus};
use stylewatch_test_utils::builders::{ConfigFileBuilder, Project};
use stylewatch_test_utils::init_tracing;

#[test]
fn partial_rule_lands_in_minified_output() {
    init_tracing();
    let project = Project::new();
    project.write("scss/bundle.scss", "@import \"card\";\n");
    project.write(
        "scss/_card.scss",
        "/* card styles */\n.card {\n    padding: 1rem;\n}\n",
    );
    let cfg = project.resolve(ConfigFileBuilder::new().browsers(&[]));

    let outcome = build(&cfg, &RealFileSystem).unwrap();
    assert!(matches!(
        outcome,
        BuildOutcome::Built { status: WriteStatus::Written, .. }
    ));

    let css = project.output().expect("output written");
    assert!(css.contains(".card{padding:1rem}"), "{css}");
    assert!(!css.contains("card styles"), "{css}");
    assert!(!css.trim_end().contains('\n'), "{css}");
}

#[test]
fn vendor_root_is_searched_for_imports() {
    init_tracing();
    let project = Project::new();
    project.write("scss/bundle.scss", "@import \"sass/helpers\";\n.hero { @extend .is-clearfix; }\n");
    project.write(
        "node_modules/bulma/sass/_helpers.scss",
        ".is-clearfix { clear: both; }\n",
    );
    let cfg = project.resolve(ConfigFileBuilder::new().browsers(&[]));

    let artifact = compile(&cfg, &RealFileSystem).unwrap();
    assert!(artifact.code.contains("clear:both"), "{}", artifact.code);
    assert!(artifact.code.contains(".hero"), "{}", artifact.code);
}

#[test]
fn flexbox_gets_vendor_prefixes_for_old_browsers() {
    init_tracing();
    let project = Project::new();
    project.write("scss/bundle.scss", ".row { display: flex; }\n");
    let cfg = project.resolve(ConfigFileBuilder::new().browsers(&["safari 6"]));

    build(&cfg, &RealFileSystem).unwrap();

    let css = project.output().unwrap();
    assert!(css.contains("display:-webkit-"), "{css}");
    assert!(css.contains("display:flex"), "{css}");
}

#[test]
fn syntax_error_leaves_previous_output_untouched() {
    init_tracing();
    let project = Project::new();
    project.write("scss/bundle.scss", ".ok { color: red; }\n");
    let cfg = project.resolve(ConfigFileBuilder::new().browsers(&[]));

    build(&cfg, &RealFileSystem).unwrap();
    let before = project.output().unwrap();

    project.write("scss/bundle.scss", ".ok { color: red;\n");
    let outcome = build(&cfg, &RealFileSystem).unwrap();

    match outcome {
        BuildOutcome::Failed(err) => {
            assert_eq!(err.stage, CompileStage::Sass);
            assert!(err.notification_message().starts_with("Error: "));
            assert!(err.notification_message().len() > "Error: ".len());
        }
        other => panic!("expected a compilation failure, got {other:?}"),
    }
    assert_eq!(project.output().unwrap(), before);
}

#[test]
fn syntax_error_on_first_build_writes_nothing() {
    init_tracing();
    let project = Project::new();
    project.write("scss/bundle.scss", "@import \"missing-partial\";\n");
    let cfg = project.resolve(ConfigFileBuilder::new());

    let outcome = build(&cfg, &RealFileSystem).unwrap();
    assert!(!outcome.is_success());
    assert!(project.output().is_none());
    assert!(!project.root().join("public").exists());
}

#[test]
fn unchanged_inputs_give_byte_identical_output() {
    init_tracing();
    let project = Project::new();
    project.write("scss/bundle.scss", "@import \"a\";\n.b { margin: 0 auto; }\n");
    project.write("scss/_a.scss", "$c: #336699;\n.a { color: $c; display: flex; }\n");
    let cfg = project.resolve(ConfigFileBuilder::new());

    build(&cfg, &RealFileSystem).unwrap();
    let first = fs::read(project.output_path()).unwrap();

    let second = build(&cfg, &RealFileSystem).unwrap();
    assert!(matches!(
        second,
        BuildOutcome::Built { status: WriteStatus::Unchanged, .. }
    ));
    assert_eq!(fs::read(project.output_path()).unwrap(), first);

    let a = compile(&cfg, &RealFileSystem).unwrap();
    let b = compile(&cfg, &RealFileSystem).unwrap();
    assert_eq!(a, b);
}
