// src/engine/mod.rs

//! Watch-mode engine.
//!
//! This module ties together:
//! - pipeline change notifications from the watcher
//! - reloading, rebuilding and recompiling the render graph
//! - shutdown signals
//!
//! The pure core state machine lives in [`core`]; the async/IO shell is
//! implemented in [`runtime`].

use std::path::PathBuf;

/// Runtime options used by the async shell.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuntimeOptions {
    /// Frames to run after each successful reload. `None` uses
    /// `[config].frames` from the reloaded pipeline.
    pub frames: Option<u64>,
}

/// Events flowing into the runtime from the watcher and signal handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimeEvent {
    /// A file in the watched directory was created or modified.
    PipelineChanged { path: PathBuf },
    /// Graceful shutdown requested (e.g. Ctrl-C).
    ShutdownRequested,
}

pub mod core;
pub mod event_handlers;
pub mod runtime;

pub use core::CoreRuntime;
pub use event_handlers::{CoreCommand, CoreStep};
pub use runtime::{ReloadOutcome, Runtime, RuntimeReport};
