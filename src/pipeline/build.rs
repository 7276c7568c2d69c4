// src/pipeline/build.rs

use std::collections::BTreeMap;

use tracing::{debug, trace};

use crate::config::PipelineFile;
use crate::errors::{PassgraphError, Result};
use crate::exec::{CommandQueue, TraceRenderer};
use crate::pipeline::PipelinePass;
use crate::render_graph::{Node, PassId, RenderGraph, ResourceId};

/// The render graph for a pipeline file plus name lookups into it.
#[derive(Debug)]
pub struct BuiltPipeline {
    pub graph: RenderGraph<TraceRenderer, CommandQueue>,
    pub passes: BTreeMap<String, PassId>,
    pub resources: BTreeMap<String, ResourceId>,
}

impl BuiltPipeline {
    /// Resolve a node name as given on the command line.
    ///
    /// `resource:NAME` and `pass:NAME` pick the namespace explicitly; a bare
    /// name is looked up as a resource first, then as a pass.
    pub fn resolve_node(&self, query: &str) -> Result<Node> {
        let found = if let Some(name) = query.strip_prefix("resource:") {
            self.resources.get(name).copied().map(Node::Resource)
        } else if let Some(name) = query.strip_prefix("pass:") {
            self.passes.get(name).copied().map(Node::Pass)
        } else {
            self.resources
                .get(query)
                .copied()
                .map(Node::Resource)
                .or_else(|| self.passes.get(query).copied().map(Node::Pass))
        };

        found.ok_or_else(|| {
            PassgraphError::UnknownNode(format!(
                "no pass or resource named '{query}' in the pipeline"
            ))
        })
    }

    /// Names of the scheduled passes, in schedule order.
    pub fn schedule_names(&self) -> Vec<&str> {
        self.graph
            .schedule()
            .iter()
            .filter_map(|&id| self.graph.pass_name(id))
            .collect()
    }
}

/// Build a render graph from a validated pipeline.
///
/// Resources are created first, then one [`PipelinePass`] per
/// `[pass.<name>]` section. Nothing is compiled here; passes declare their
/// reads and writes on the first compile.
pub fn build_render_graph(pipeline: &PipelineFile) -> Result<BuiltPipeline> {
    let mut graph: RenderGraph<TraceRenderer, CommandQueue> = RenderGraph::new();
    let mut resources = BTreeMap::new();
    let mut passes = BTreeMap::new();

    for name in pipeline.resource_names() {
        let id = graph.add_resource(name);
        resources.insert(name.to_string(), id);
    }

    for (name, cfg) in pipeline.pass.iter() {
        let reads = resolve_all(&resources, name, &cfg.reads)?;
        let writes = resolve_all(&resources, name, &cfg.writes)?;
        let optional_reads: Vec<Option<ResourceId>> = cfg
            .optional_reads
            .iter()
            .map(|resource| {
                let id = resources.get(resource).copied();
                if id.is_none() {
                    trace!(pass = %name, resource = %resource, "optional read not present");
                }
                id
            })
            .collect();

        let id = graph.add_pass(PipelinePass::new(
            name.clone(),
            reads,
            optional_reads,
            writes,
        ));
        passes.insert(name.clone(), id);
    }

    debug!(
        passes = passes.len(),
        resources = resources.len(),
        "pipeline: built render graph"
    );

    Ok(BuiltPipeline {
        graph,
        passes,
        resources,
    })
}

fn resolve_all(
    resources: &BTreeMap<String, ResourceId>,
    pass: &str,
    names: &[String],
) -> Result<Vec<ResourceId>> {
    names
        .iter()
        .map(|name| {
            resources.get(name).copied().ok_or_else(|| {
                PassgraphError::PipelineError(format!(
                    "pass '{pass}' references unknown resource '{name}'"
                ))
            })
        })
        .collect()
}
