// src/engine/event_handlers.rs

//! Event handling logic for the core runtime.

use std::path::Path;

use tracing::trace;

/// Command produced by the pure core, to be executed by the outer IO shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreCommand {
    /// Re-read the pipeline file and rebuild the render graph.
    ReloadPipeline,
    /// Stop the runtime.
    RequestExit,
}

/// Decision returned by the core after handling a single `RuntimeEvent`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreStep {
    /// Commands the IO shell should execute, in order.
    pub commands: Vec<CoreCommand>,
    /// Whether the outer runtime loop should keep running.
    pub keep_running: bool,
}

impl CoreStep {
    pub fn idle() -> Self {
        Self {
            commands: Vec::new(),
            keep_running: true,
        }
    }
}

/// Handle a change notification for `changed`.
///
/// Only the pipeline file itself matters; anything else in the watched
/// directory is ignored.
pub fn handle_pipeline_change(pipeline_path: &Path, changed: &Path) -> CoreStep {
    if !same_file(pipeline_path, changed) {
        trace!(path = ?changed, "ignoring change to unrelated file");
        return CoreStep::idle();
    }

    CoreStep {
        commands: vec![CoreCommand::ReloadPipeline],
        keep_running: true,
    }
}

pub fn handle_shutdown() -> CoreStep {
    CoreStep {
        commands: vec![CoreCommand::RequestExit],
        keep_running: false,
    }
}

/// Path comparison without touching the filesystem.
///
/// A relative `pipeline_path` also matches any absolute path ending in it.
fn same_file(pipeline_path: &Path, changed: &Path) -> bool {
    if pipeline_path == changed {
        return true;
    }
    pipeline_path.is_relative() && changed.ends_with(pipeline_path)
}
