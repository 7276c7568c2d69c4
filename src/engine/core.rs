// src/engine/core.rs

//! Pure core runtime state machine.
//!
//! This module contains a synchronous, deterministic "core runtime" that
//! consumes [`RuntimeEvent`]s and produces a list of "commands" describing
//! what the IO shell should do next.
//!
//! The async/IO-heavy shell (`engine::runtime::Runtime`) is responsible for:
//! - reading events from channels
//! - reading, validating and compiling the pipeline
//! - handling Ctrl+C / shutdown
//!
//! The core is intended to be tested without any Tokio, channels or
//! filesystem.

use std::path::{Path, PathBuf};

use crate::engine::RuntimeEvent;
use crate::engine::event_handlers::{CoreStep, handle_pipeline_change, handle_shutdown};

/// Pure core runtime state.
#[derive(Debug)]
pub struct CoreRuntime {
    pipeline_path: PathBuf,
    reloads_requested: u64,
    shutting_down: bool,
}

impl CoreRuntime {
    pub fn new(pipeline_path: impl Into<PathBuf>) -> Self {
        Self {
            pipeline_path: pipeline_path.into(),
            reloads_requested: 0,
            shutting_down: false,
        }
    }

    pub fn pipeline_path(&self) -> &Path {
        &self.pipeline_path
    }

    /// How many reloads the core has asked for so far.
    pub fn reloads_requested(&self) -> u64 {
        self.reloads_requested
    }

    pub fn is_shutting_down(&self) -> bool {
        self.shutting_down
    }

    /// Handle a single runtime event, updating core state and returning the
    /// resulting commands for the IO shell.
    ///
    /// After a shutdown request every further event is ignored.
    pub fn step(&mut self, event: RuntimeEvent) -> CoreStep {
        if self.shutting_down {
            return CoreStep {
                commands: Vec::new(),
                keep_running: false,
            };
        }

        match event {
            RuntimeEvent::PipelineChanged { path } => {
                let step = handle_pipeline_change(&self.pipeline_path, &path);
                if !step.commands.is_empty() {
                    self.reloads_requested += 1;
                }
                step
            }
            RuntimeEvent::ShutdownRequested => {
                self.shutting_down = true;
                handle_shutdown()
            }
        }
    }
}
