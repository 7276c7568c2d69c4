// src/pipeline/mod.rs

//! Turning a pipeline description into a `RenderGraph`.

pub mod build;
pub mod pass;

pub use build::{BuiltPipeline, build_render_graph};
pub use pass::PipelinePass;
