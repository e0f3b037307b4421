// src/lib.rs

pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod fs;
pub mod logging;
pub mod notifier;
pub mod pipeline;
pub mod tasks;
pub mod types;
pub mod watch;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::config::{load_for_cli, NotifySection, ResolvedConfig};
use crate::engine::{CoreRuntime, RunSummary, Runtime, RuntimeEvent, RuntimeOptions, TriggerReason};
use crate::exec::RealCompileBackend;
use crate::fs::{FileSystem, RealFileSystem};
use crate::notifier::Notifier;
use crate::tasks::{TaskGraph, TaskKind};
use crate::types::NotifierKind;
use crate::watch::{spawn_watcher, SourceTracker, WatchOptions, WatchProfile};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading and path resolution
/// - the task plan (`watch` and `default` run `css` first)
/// - runtime + compile backend + notifier
/// - (for `watch`) the file watcher and Ctrl-C handling
///
/// Returns the combined build counters of every step that ran.
pub async fn run(args: CliArgs) -> Result<RunSummary> {
    let graph = TaskGraph::builtin();
    let task = graph.find(&args.task)?;

    let loaded = load_for_cli(args.config.as_deref().map(Path::new))?;
    let resolved = Arc::new(ResolvedConfig::resolve(&loaded.config, &loaded.base_dir)?);

    let plan = graph.plan(task)?;
    info!(%task, plan = ?plan, "task plan");

    let notifier_kind = effective_notifier(args.notifier, &resolved.notify);

    if args.dry_run {
        print_dry_run(&resolved, loaded.path.as_deref(), notifier_kind, &plan);
        return Ok(RunSummary::default());
    }

    let notifier = notifier::from_kind(notifier_kind, &resolved.notify.title);
    let fs: Arc<dyn FileSystem> = Arc::new(RealFileSystem);
    let tracker = SourceTracker::for_config(&resolved, Arc::clone(&fs))?;

    let mut summary = RunSummary::default();
    for task in plan {
        let step = match task {
            TaskKind::Css => {
                run_css(
                    Arc::clone(&resolved),
                    Arc::clone(&fs),
                    Arc::clone(&notifier),
                    tracker.clone(),
                )
                .await?
            }
            TaskKind::Watch => {
                run_watch(
                    Arc::clone(&resolved),
                    Arc::clone(&fs),
                    Arc::clone(&notifier),
                    tracker.clone(),
                )
                .await?
            }
            TaskKind::Default => {
                debug!("default task is an alias; nothing left to do");
                RunSummary::default()
            }
        };
        merge_summary(&mut summary, step);
    }

    Ok(summary)
}

/// Process exit status for a finished run.
///
/// Compile errors only count with `--fail-on-error`.
pub fn exit_code(summary: &RunSummary, fail_on_error: bool) -> i32 {
    if fail_on_error && summary.failures > 0 { 1 } else { 0 }
}

/// `--notifier` wins over `[notify].backend`.
pub fn effective_notifier(cli: Option<NotifierKind>, section: &NotifySection) -> NotifierKind {
    cli.unwrap_or(section.backend)
}

/// Compile once and return.
///
/// `tracker`, when given, records the sources this build compiled so that a
/// later `watch` step can tell whether they changed since.
pub async fn run_css(
    config: Arc<ResolvedConfig>,
    fs: Arc<dyn FileSystem>,
    notifier: Arc<dyn Notifier>,
    tracker: Option<Arc<SourceTracker>>,
) -> errors::Result<RunSummary> {
    let (rt_tx, rt_rx) = mpsc::channel::<RuntimeEvent>(64);
    let backend = RealCompileBackend::new(Arc::clone(&config), fs, tracker, rt_tx.clone());

    rt_tx
        .send(RuntimeEvent::BuildTriggered {
            reason: TriggerReason::Manual,
        })
        .await
        .map_err(anyhow::Error::from)?;

    let core = CoreRuntime::new(
        config.config.triggered_while_running_behaviour,
        config.config.queue_length,
        RuntimeOptions {
            exit_when_idle: true,
        },
    );
    Runtime::new(core, rt_rx, backend, notifier).run().await
}

/// Rebuild on every relevant change under the source directory until Ctrl-C.
///
/// Does not build up front; the task plan runs `css` before this. With a
/// tracker shared with that step, edits made in between still trigger a
/// rebuild as soon as the watcher is up.
pub async fn run_watch(
    config: Arc<ResolvedConfig>,
    fs: Arc<dyn FileSystem>,
    notifier: Arc<dyn Notifier>,
    tracker: Option<Arc<SourceTracker>>,
) -> errors::Result<RunSummary> {
    let (rt_tx, rt_rx) = mpsc::channel::<RuntimeEvent>(64);
    let backend = RealCompileBackend::new(
        Arc::clone(&config),
        Arc::clone(&fs),
        tracker.clone(),
        rt_tx.clone(),
    );

    let profile = WatchProfile::from_section(&config.watch)?;
    let _watcher_handle = spawn_watcher(
        config.source_dir.clone(),
        profile,
        WatchOptions::from(&config.watch),
        fs,
        tracker,
        rt_tx.clone(),
    )?;

    // Ctrl-C → graceful shutdown.
    {
        let tx = rt_tx.clone();
        tokio::spawn(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                eprintln!("failed to listen for Ctrl+C: {e}");
                return;
            }
            let _ = tx.send(RuntimeEvent::ShutdownRequested).await;
        });
    }

    info!(source = ?config.source_dir, "watching for changes (Ctrl-C to stop)");

    let core = CoreRuntime::new(
        config.config.triggered_while_running_behaviour,
        config.config.queue_length,
        RuntimeOptions {
            exit_when_idle: false,
        },
    );
    Runtime::new(core, rt_rx, backend, notifier).run().await
}

fn merge_summary(total: &mut RunSummary, step: RunSummary) {
    total.builds += step.builds;
    total.failures += step.failures;
    if step.last_digest.is_some() {
        total.last_digest = step.last_digest;
    }
}

/// Dry-run output: resolved paths, options and the task plan.
fn print_dry_run(
    cfg: &ResolvedConfig,
    config_path: Option<&Path>,
    notifier: NotifierKind,
    plan: &[TaskKind],
) {
    println!("stylewatch dry-run");
    match config_path {
        Some(p) => println!("  config file = {}", p.display()),
        None => println!("  config file = (built-in defaults)"),
    }
    println!("  entry       = {}", cfg.entry_path.display());
    println!("  include     = {:?}", display_paths(&cfg.include_roots));
    println!("  output      = {}", cfg.output_path.display());
    println!("  style       = {:?}", cfg.style);
    println!("  browsers    = {:?}", cfg.prefix.targets.browsers);
    println!(
        "  watch       = {:?} (exclude {:?}, recursive {})",
        cfg.watch.patterns, cfg.watch.exclude, cfg.watch.recursive
    );
    println!(
        "  while running = {:?} (queue_length {})",
        cfg.config.triggered_while_running_behaviour, cfg.config.queue_length
    );
    println!("  notifier    = {:?}", notifier);
    println!();

    let names: Vec<&str> = plan.iter().map(|t| t.name()).collect();
    println!("plan: {}", names.join(" -> "));

    debug!("dry-run complete (no compilation)");
}

fn display_paths(paths: &[PathBuf]) -> Vec<String> {
    paths.iter().map(|p| p.display().to_string()).collect()
}
