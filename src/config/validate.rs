// src/config/validate.rs

use crate::config::model::{PipelineFile, RawPipelineFile};
use crate::digraph::DirectedGraph;
use crate::errors::{PassgraphError, Result};

impl TryFrom<RawPipelineFile> for PipelineFile {
    type Error = crate::errors::PassgraphError;

    fn try_from(raw: RawPipelineFile) -> std::result::Result<Self, Self::Error> {
        validate_pipeline(&raw)?;
        Ok(PipelineFile::new_unchecked(raw.config, raw.resource, raw.pass))
    }
}

/// Run every semantic check on a raw pipeline description.
pub fn validate_pipeline(cfg: &RawPipelineFile) -> Result<()> {
    ensure_has_passes(cfg)?;
    validate_global_config(cfg)?;
    validate_resource_references(cfg)?;
    validate_read_write_overlap(cfg)?;
    validate_dag(cfg)?;
    Ok(())
}

fn ensure_has_passes(cfg: &RawPipelineFile) -> Result<()> {
    if cfg.pass.is_empty() {
        return Err(PassgraphError::PipelineError(
            "pipeline must contain at least one [pass.<name>] section".to_string(),
        ));
    }
    Ok(())
}

fn validate_global_config(cfg: &RawPipelineFile) -> Result<()> {
    // on_reload_error is strongly typed and checked during deserialization.

    if cfg.config.frames == 0 {
        return Err(PassgraphError::PipelineError(
            "[config].frames must be >= 1 (got 0); use --dry-run to compile only".to_string(),
        ));
    }

    Ok(())
}

fn validate_resource_references(cfg: &RawPipelineFile) -> Result<()> {
    if cfg.config.allow_undeclared_resources {
        return Ok(());
    }

    for (name, pass) in cfg.pass.iter() {
        let named = pass
            .reads
            .iter()
            .map(|r| (r, "reads"))
            .chain(pass.writes.iter().map(|w| (w, "writes")));

        for (resource, field) in named {
            if !cfg.resource.contains_key(resource) {
                return Err(PassgraphError::PipelineError(format!(
                    "pass '{}' references unknown resource '{}' in `{}`",
                    name, resource, field
                )));
            }
        }
    }
    Ok(())
}

fn validate_read_write_overlap(cfg: &RawPipelineFile) -> Result<()> {
    for (name, pass) in cfg.pass.iter() {
        let reads = pass.reads.iter().chain(pass.optional_reads.iter());
        for resource in reads {
            if pass.writes.contains(resource) {
                return Err(PassgraphError::PipelineError(format!(
                    "pass '{}' cannot both read and write resource '{}'",
                    name, resource
                )));
            }
        }
    }
    Ok(())
}

/// Vertex type for checking the description before any `RenderGraph`
/// exists. Pass and resource names live in separate namespaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum PipelineNode<'a> {
    Pass(&'a str),
    Resource(&'a str),
}

fn validate_dag(cfg: &RawPipelineFile) -> Result<()> {
    // Same edge direction as the render graph:
    //   reads  -> resource -> pass
    //   writes -> pass -> resource
    // Optional reads are included whenever they could resolve; a cycle
    // through one would show up at compile time anyway.
    let mut graph: DirectedGraph<PipelineNode<'_>> = DirectedGraph::new();

    for name in cfg.pass.keys() {
        graph.add_vertex(PipelineNode::Pass(name.as_str()));
    }

    for (name, pass) in cfg.pass.iter() {
        let node = PipelineNode::Pass(name.as_str());
        for resource in pass.reads.iter().chain(pass.optional_reads.iter()) {
            graph.add_edge(PipelineNode::Resource(resource.as_str()), node);
        }
        for resource in pass.writes.iter() {
            graph.add_edge(node, PipelineNode::Resource(resource.as_str()));
        }
    }

    match graph.sort() {
        Ok(_order) => Ok(()),
        Err(cycle) => {
            let pass = cycle.unresolved().iter().find_map(|node| match node {
                PipelineNode::Pass(name) => Some(*name),
                PipelineNode::Resource(_) => None,
            });
            Err(PassgraphError::GraphCycle(format!(
                "cycle detected in render pipeline involving pass '{}'",
                pass.unwrap_or("?")
            )))
        }
    }
}
