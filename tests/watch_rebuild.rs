// tests/watch_rebuild.rs

use std::sync::Arc;
use std::time::Duration;

use stylewatch::engine::{RuntimeEvent, TriggerReason};
use stylewatch::fs::{FileSystem, RealFileSystem};
use stylewatch::notifier::RecordingNotifier;
use stylewatch::watch::{spawn_watcher, SourceTracker, WatchOptions, WatchProfile};
use stylewatch::{run_css, run_watch};
use stylewatch::config::ResolvedConfig;
use stylewatch_test_utils::builders::{ConfigFileBuilder, Project};
use stylewatch_test_utils::{init_tracing, with_timeout};
use tokio::sync::mpsc;
use tokio::time::sleep;

/// A tracker that has seen one build of the current sources.
fn built_tracker(cfg: &ResolvedConfig) -> Arc<SourceTracker> {
    let tracker = SourceTracker::for_config(cfg, Arc::new(RealFileSystem))
        .unwrap()
        .expect("use_hash is on");
    tracker.record_build();
    tracker
}

#[tokio::test]
async fn saving_a_partial_sends_one_trigger() {
    init_tracing();
    let project = Project::new();
    project.write("scss/bundle.scss", "@import \"a\";\n");
    project.write("scss/_a.scss", ".a{color:red}\n");
    let cfg = project.resolve(ConfigFileBuilder::new().debounce_ms(100).use_hash(false));

    let (tx, mut rx) = mpsc::channel(16);
    let _handle = spawn_watcher(
        cfg.source_dir.clone(),
        WatchProfile::from_section(&cfg.watch).unwrap(),
        WatchOptions::from(&cfg.watch),
        Arc::new(RealFileSystem),
        None,
        tx,
    )
    .unwrap();

    project.write("scss/_a.scss", ".a{color:blue}\n");

    let event = with_timeout(rx.recv()).await.expect("watcher trigger");
    assert!(matches!(
        event,
        RuntimeEvent::BuildTriggered {
            reason: TriggerReason::FileWatch
        }
    ));
}

#[tokio::test]
async fn identical_save_and_ignored_files_do_not_trigger() {
    init_tracing();
    let project = Project::new();
    project.write("scss/bundle.scss", ".a{color:red}\n");
    project.write("scss/notes.txt", "todo\n");
    let cfg = project.resolve(ConfigFileBuilder::new().debounce_ms(20).use_hash(true));
    let tracker = built_tracker(&cfg);

    let (tx, mut rx) = mpsc::channel(16);
    let _handle = spawn_watcher(
        cfg.source_dir.clone(),
        WatchProfile::from_section(&cfg.watch).unwrap(),
        WatchOptions::from(&cfg.watch),
        Arc::new(RealFileSystem),
        Some(tracker),
        tx,
    )
    .unwrap();

    project.write("scss/bundle.scss", ".a{color:red}\n");
    project.write("scss/notes.txt", "done\n");

    let got = tokio::time::timeout(Duration::from_millis(600), rx.recv()).await;
    assert!(got.is_err(), "unexpected trigger: {got:?}");
}

#[tokio::test]
async fn edits_before_the_watcher_starts_are_not_lost() {
    init_tracing();
    let project = Project::new();
    project.write("scss/bundle.scss", ".a{color:red}\n");
    let cfg = project.resolve(ConfigFileBuilder::new().debounce_ms(20));
    let tracker = built_tracker(&cfg);

    // Edited after the build, before anything watches.
    project.write("scss/bundle.scss", ".a{color:blue}\n");

    let (tx, mut rx) = mpsc::channel(16);
    let _handle = spawn_watcher(
        cfg.source_dir.clone(),
        WatchProfile::from_section(&cfg.watch).unwrap(),
        WatchOptions::from(&cfg.watch),
        Arc::new(RealFileSystem),
        Some(tracker),
        tx,
    )
    .unwrap();

    let event = with_timeout(rx.recv()).await.expect("startup trigger");
    assert!(matches!(event, RuntimeEvent::BuildTriggered { .. }));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn editing_a_partial_rebuilds_the_bundle() {
    init_tracing();
    let project = Project::new();
    project.write("scss/bundle.scss", "@import \"rules\";\n");
    project.write("scss/_rules.scss", ".keep{color:red}\n.gone{color:blue}\n");
    let cfg = Arc::new(project.resolve(ConfigFileBuilder::new().browsers(&[]).debounce_ms(20)));
    let fs: Arc<dyn FileSystem> = Arc::new(RealFileSystem);
    let notifier = RecordingNotifier::new();
    let tracker = SourceTracker::for_config(&cfg, Arc::clone(&fs)).unwrap();

    let first = run_css(
        Arc::clone(&cfg),
        Arc::clone(&fs),
        Arc::new(notifier.clone()),
        tracker.clone(),
    )
    .await
    .unwrap();
    assert_eq!(first.builds, 1);
    assert!(project.output().unwrap().contains(".gone"));

    let watch = tokio::spawn(run_watch(
        Arc::clone(&cfg),
        Arc::clone(&fs),
        Arc::new(notifier.clone()),
        tracker,
    ));
    // Let the watcher register before editing.
    sleep(Duration::from_millis(300)).await;

    project.write("scss/_rules.scss", ".keep{color:red}\n");

    with_timeout(async {
        loop {
            if let Some(css) = project.output() {
                if css.contains(".keep") && !css.contains(".gone") {
                    break;
                }
            }
            sleep(Duration::from_millis(50)).await;
        }
    })
    .await;

    // A broken save keeps the last good output and notifies.
    project.write("scss/_rules.scss", ".keep{color:red\n");
    with_timeout(async {
        while notifier.messages().is_empty() {
            sleep(Duration::from_millis(50)).await;
        }
    })
    .await;
    assert!(notifier.messages()[0].starts_with("Error: "));
    assert_eq!(project.output().unwrap().trim(), ".keep{color:red}");

    watch.abort();
}
