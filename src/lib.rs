// src/lib.rs

pub mod cli;
pub mod config;
pub mod digraph;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod logging;
pub mod pipeline;
pub mod render_graph;
pub mod types;
pub mod watch;

use std::path::PathBuf;

use anyhow::Result;
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::config::loader::load_and_validate;
use crate::config::model::PipelineFile;
use crate::engine::{CoreRuntime, Runtime, RuntimeEvent, RuntimeOptions};
use crate::exec::{CommandQueue, TraceRenderer, run_frames};
use crate::pipeline::{BuiltPipeline, build_render_graph};

pub use crate::digraph::{CycleError, DirectedGraph};
pub use crate::errors::PassgraphError;
pub use crate::render_graph::{
    DependencyBuilder, GraphState, Node, NodeKind, Pass, PassId, RenderGraph, ResourceId,
};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - pipeline loading and validation
/// - render graph construction and compilation
/// - frame execution
/// - (optional) file watcher, reload runtime and Ctrl-C handling
pub async fn run(args: CliArgs) -> Result<()> {
    if args.frames == Some(0) {
        return Err(PassgraphError::PipelineError(
            "--frames must be >= 1 (got 0); use --dry-run to compile only".to_string(),
        )
        .into());
    }

    let pipeline_path = PathBuf::from(&args.pipeline);
    let pipeline = load_and_validate(&pipeline_path)?;

    let mut built = build_render_graph(&pipeline)?;

    if let Some(node) = args.downstream.as_deref() {
        // Passes declare their edges during compile.
        built.graph.compile()?;
        print_downstream(&built, node)?;
        return Ok(());
    }

    if args.dry_run {
        built.graph.compile()?;
        print_dry_run(&pipeline, &built);
        return Ok(());
    }

    if args.watch {
        return run_watch(pipeline_path, args.frames).await;
    }

    let frames = args.frames.unwrap_or(pipeline.config.frames);
    let mut renderer = TraceRenderer::new();
    let mut queue = CommandQueue::new();
    run_frames(&mut built.graph, &mut renderer, &mut queue, frames)?;

    for submission in queue.drain() {
        println!("frame {} {}", submission.frame, submission.pass);
    }

    Ok(())
}

async fn run_watch(pipeline_path: PathBuf, frames: Option<u64>) -> Result<()> {
    // Runtime event channel.
    let (rt_tx, rt_rx) = mpsc::channel::<RuntimeEvent>(64);

    let watcher = crate::watch::spawn_watcher(&pipeline_path, rt_tx.clone())?;

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

    let core = CoreRuntime::new(watcher.path());
    let runtime = Runtime::new(core, rt_rx, RuntimeOptions { frames });
    let report = runtime.run().await?;

    info!(
        applied = report.reloads_applied,
        failed = report.reloads_failed,
        frames = report.frames_run,
        "watch mode finished"
    );
    Ok(())
}

/// Print the passes that depend on `node`, one per line, in handle order.
fn print_downstream(built: &BuiltPipeline, node: &str) -> Result<()> {
    let resolved = built.resolve_node(node)?;
    for id in built.graph.downstream_passes(resolved) {
        if let Some(name) = built.graph.pass_name(id) {
            println!("{name}");
        }
    }
    Ok(())
}

/// Dry-run output: print resources, passes and the compiled schedule.
fn print_dry_run(pipeline: &PipelineFile, built: &BuiltPipeline) {
    println!("passgraph dry-run");
    println!("  config.frames = {}", pipeline.config.frames);
    println!(
        "  config.allow_undeclared_resources = {}",
        pipeline.config.allow_undeclared_resources
    );
    println!();

    println!("resources ({}):", built.resources.len());
    for name in built.resources.keys() {
        match pipeline.resource.get(name).and_then(|r| r.description.as_deref()) {
            Some(description) => println!("  - {name}: {description}"),
            None => println!("  - {name}"),
        }
    }
    println!();

    println!("schedule ({} passes):", built.graph.schedule().len());
    for (position, name) in built.schedule_names().into_iter().enumerate() {
        println!("  {}. {name}", position + 1);
        if let Some(cfg) = pipeline.pass.get(name) {
            if !cfg.reads.is_empty() {
                println!("      reads: {:?}", cfg.reads);
            }
            if !cfg.optional_reads.is_empty() {
                println!("      optional_reads: {:?}", cfg.optional_reads);
            }
            if !cfg.writes.is_empty() {
                println!("      writes: {:?}", cfg.writes);
            }
        }
    }

    debug!("dry-run complete (no execution)");
}
