#![allow(dead_code)]

use std::collections::BTreeMap;
use passgraph::config::{ConfigSection, PassConfig, PipelineFile, RawPipelineFile, ResourceConfig};
use passgraph::types::ReloadFailureBehaviour;

/// Builder for `RawPipelineFile` / `PipelineFile` to simplify test setup.
pub struct PipelineBuilder {
    raw: RawPipelineFile,
}

impl PipelineBuilder {
    pub fn new() -> Self {
        Self {
            raw: RawPipelineFile {
                config: ConfigSection::default(),
                resource: BTreeMap::new(),
                pass: BTreeMap::new(),
            },
        }
    }

    pub fn with_pass(mut self, name: &str, pass: PassConfig) -> Self {
        self.raw.pass.insert(name.to_string(), pass);
        self
    }

    pub fn with_resource(mut self, name: &str) -> Self {
        self.raw
            .resource
            .insert(name.to_string(), ResourceConfig::default());
        self
    }

    pub fn frames(mut self, frames: u64) -> Self {
        self.raw.config.frames = frames;
        self
    }

    pub fn allow_undeclared_resources(mut self, allow: bool) -> Self {
        self.raw.config.allow_undeclared_resources = allow;
        self
    }

    pub fn on_reload_error(mut self, behaviour: ReloadFailureBehaviour) -> Self {
        self.raw.config.on_reload_error = behaviour;
        self
    }

    /// The unvalidated model, for tests that expect validation to fail.
    pub fn build_raw(self) -> RawPipelineFile {
        self.raw
    }

    pub fn build(self) -> PipelineFile {
        PipelineFile::try_from(self.raw).expect("Failed to build valid pipeline from builder")
    }
}

impl Default for PipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for `PassConfig`.
pub struct PassConfigBuilder {
    pass: PassConfig,
}

impl PassConfigBuilder {
    pub fn new() -> Self {
        Self {
            pass: PassConfig::default(),
        }
    }

    pub fn reads(mut self, resource: &str) -> Self {
        self.pass.reads.push(resource.to_string());
        self
    }

    pub fn optional_reads(mut self, resource: &str) -> Self {
        self.pass.optional_reads.push(resource.to_string());
        self
    }

    pub fn writes(mut self, resource: &str) -> Self {
        self.pass.writes.push(resource.to_string());
        self
    }

    pub fn build(self) -> PassConfig {
        self.pass
    }
}

impl Default for PassConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
