// src/exec/mod.rs

//! Execution layer for the CLI.
//!
//! - [`renderer`] holds `TraceRenderer`, the renderer handle passes receive.
//! - [`queue`] holds `CommandQueue`, where passes record their submissions.
//! - [`frames`] drives a `RenderGraph` for a number of frames.

pub mod frames;
pub mod queue;
pub mod renderer;

pub use frames::run_frames;
pub use queue::{CommandQueue, Submission};
pub use renderer::TraceRenderer;
