// src/config/model.rs

use std::collections::{BTreeMap, BTreeSet};

use serde::Deserialize;

use crate::types::ReloadFailureBehaviour;

/// Pipeline description exactly as read from a TOML file (unvalidated).
///
/// ```toml
/// [config]
/// frames = 1
///
/// [resource.color]
/// description = "HDR colour target"
///
/// [pass.geometry]
/// writes = ["color", "depth"]
///
/// [pass.lighting]
/// reads = ["color"]
/// writes = ["final"]
/// ```
///
/// All sections are optional and have reasonable defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct RawPipelineFile {
    /// Global behaviour from `[config]`.
    #[serde(default)]
    pub config: ConfigSection,

    /// Explicitly declared resources from `[resource.<name>]`.
    #[serde(default)]
    pub resource: BTreeMap<String, ResourceConfig>,

    /// All passes from `[pass.<name>]`.
    ///
    /// Keys are the pass names; passes are created in key order.
    #[serde(default)]
    pub pass: BTreeMap<String, PassConfig>,
}

/// A validated pipeline description.
///
/// Only obtainable through `PipelineFile::try_from(raw)` (or the loader), so
/// holders can assume references resolve and the pass graph is acyclic.
#[derive(Debug, Clone)]
pub struct PipelineFile {
    pub(crate) config: ConfigSection,
    pub(crate) resource: BTreeMap<String, ResourceConfig>,
    pub(crate) pass: BTreeMap<String, PassConfig>,
}

impl PipelineFile {
    pub(crate) fn new_unchecked(
        config: ConfigSection,
        resource: BTreeMap<String, ResourceConfig>,
        pass: BTreeMap<String, PassConfig>,
    ) -> Self {
        Self {
            config,
            resource,
            pass,
        }
    }

    pub fn config(&self) -> &ConfigSection {
        &self.config
    }

    /// Declared `[resource.<name>]` sections.
    pub fn resources(&self) -> &BTreeMap<String, ResourceConfig> {
        &self.resource
    }

    /// `[pass.<name>]` sections, keyed (and later created) by name.
    pub fn passes(&self) -> &BTreeMap<String, PassConfig> {
        &self.pass
    }

    /// Names of every resource that exists in this pipeline.
    ///
    /// Declared resources, plus anything named in `reads`/`writes` when
    /// undeclared resources are allowed. `optional_reads` never create a
    /// resource.
    pub fn resource_names(&self) -> BTreeSet<&str> {
        let mut names: BTreeSet<&str> = self.resource.keys().map(String::as_str).collect();

        if self.config.allow_undeclared_resources {
            for pass in self.pass.values() {
                names.extend(pass.reads.iter().map(String::as_str));
                names.extend(pass.writes.iter().map(String::as_str));
            }
        }

        names
    }
}

/// `[config]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigSection {
    /// How many frames a normal run executes.
    #[serde(default = "default_frames")]
    pub frames: u64,

    /// If false, every resource named in `reads`/`writes` must have a
    /// `[resource.<name>]` section.
    #[serde(default = "default_allow_undeclared_resources")]
    pub allow_undeclared_resources: bool,

    /// `"keep_last"` (default) or `"exit"`; only used in watch mode.
    #[serde(default)]
    pub on_reload_error: ReloadFailureBehaviour,
}

fn default_frames() -> u64 {
    1
}

fn default_allow_undeclared_resources() -> bool {
    true
}

impl Default for ConfigSection {
    fn default() -> Self {
        Self {
            frames: default_frames(),
            allow_undeclared_resources: default_allow_undeclared_resources(),
            on_reload_error: ReloadFailureBehaviour::default(),
        }
    }
}

/// `[resource.<name>]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResourceConfig {
    #[serde(default)]
    pub description: Option<String>,
}

/// `[pass.<name>]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PassConfig {
    /// Resources this pass consumes; each must be produced before it runs.
    #[serde(default)]
    pub reads: Vec<String>,

    /// Inputs used only if the resource exists in the pipeline.
    ///
    /// A name nothing declares or touches is dropped silently.
    #[serde(default)]
    pub optional_reads: Vec<String>,

    /// Resources this pass produces.
    #[serde(default)]
    pub writes: Vec<String>,

    #[serde(default)]
    pub description: Option<String>,
}
