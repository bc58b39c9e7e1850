// src/lib.rs

pub mod classify;
pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod event;
pub mod logging;
pub mod presets;
pub mod render;
pub mod session;
pub mod types;

use std::fs;

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use crate::classify::scan;
use crate::cli::CliArgs;
use crate::config::load_or_default;
use crate::engine::{Pace, RunOutcome};
use crate::presets::PresetCatalog;
use crate::render::{format_phases, SnapshotPrinter};
use crate::session::Session;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading and the preset catalog
/// - the session (classifier + scheduler + runner)
/// - rendering of the live snapshots to stdout
/// - Ctrl-C handling
pub async fn run(args: CliArgs) -> Result<()> {
    let cfg = load_or_default(args.config.as_deref())?;
    let catalog = cfg.catalog();

    if args.list_examples {
        print_examples(&catalog);
        return Ok(());
    }

    let pace = if args.instant {
        Pace::instant()
    } else {
        args.speed.map(Pace::from).unwrap_or_else(|| cfg.pace())
    };

    let mut session = Session::new(catalog, pace);

    let (source, selected) = match args.source {
        Some(ref path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading program text from {}", path.display()))?;
            (text, None)
        }
        None => {
            let key = args
                .example
                .clone()
                .unwrap_or_else(|| cfg.default_example().to_string());
            session.change_example(&key).await?;
            (session.source().to_string(), Some(key))
        }
    };

    if args.dry_run {
        print_dry_run(selected.as_deref(), &source);
        return Ok(());
    }

    let mut snapshots = session.subscribe();
    let mut printer = SnapshotPrinter::new(args.show_queues);

    session.start(&source, pace)?;

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            changed = snapshots.changed() => {
                if changed.is_err() {
                    break;
                }
                let snapshot = snapshots.borrow_and_update().clone();
                for line in printer.render(&snapshot) {
                    println!("{line}");
                }
                if snapshot.is_complete() {
                    break;
                }
            }
            res = &mut ctrl_c => {
                if let Err(e) = res {
                    warn!(error = %e, "failed to listen for Ctrl+C");
                }
                info!("interrupted; resetting simulation");
                session.reset().await;
                return Ok(());
            }
        }
    }

    match session.wait().await {
        Some(RunOutcome::Completed(log)) => {
            debug!(events = log.len(), outputs = ?log.outputs(), "run completed");
        }
        Some(RunOutcome::Cancelled) => info!("run was cancelled"),
        None => {}
    }

    Ok(())
}

/// Print the preset catalog.
fn print_examples(catalog: &PresetCatalog) {
    println!("examples ({}):", catalog.len());
    for preset in catalog.iter() {
        println!("  - {:<20} {}", preset.key, preset.name);
        if !preset.description.is_empty() {
            println!("      {}", preset.description);
        }
    }
}

/// Dry-run output: show how the program text was classified.
fn print_dry_run(selected: Option<&str>, source: &str) {
    let result = scan(source);

    println!("loopviz dry-run");
    if let Some(key) = selected {
        println!("  example = {key}");
    }
    println!();

    let groups = &result.groups;
    println!("sync ({}): {:?}", groups.sync.len(), groups.sync);
    println!("nextTick ({}): {:?}", groups.priority_micro.len(), groups.priority_micro);
    println!("promise ({}): {:?}", groups.secondary_micro.len(), groups.secondary_micro);
    println!("timer ({}): {:?}", groups.timer.len(), groups.timer);
    println!("immediate ({}): {:?}", groups.immediate.len(), groups.immediate);

    if !result.misses.is_empty() {
        println!();
        println!("dropped lines (marker without a same-line label):");
        for miss in result.misses.iter() {
            println!("  line {}: {}", miss.line, miss.group);
        }
    }

    println!();
    println!("expected output order: {:?}", groups.expected_output_order());

    println!();
    println!("loop phases:");
    for line in format_phases() {
        println!("{line}");
    }

    debug!("dry-run complete (no execution)");
}
