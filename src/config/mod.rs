// src/config/mod.rs

//! Pipeline description loading and validation.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a pipeline file from disk (`loader.rs`).
//! - Validate it before any render graph is built (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{load_and_validate, load_from_path, parse_and_validate};
pub use model::{ConfigSection, PassConfig, PipelineFile, RawPipelineFile, ResourceConfig};
pub use validate::validate_pipeline;
