// src/pipeline/pass.rs

use tracing::trace;

use crate::exec::{CommandQueue, TraceRenderer};
use crate::render_graph::{DependencyBuilder, Pass, ResourceId};

/// A pass built from a `[pass.<name>]` section.
///
/// It declares its dependencies when the graph compiles and, when executed,
/// submits one entry to the queue for the current frame.
#[derive(Debug, Clone)]
pub struct PipelinePass {
    name: String,
    reads: Vec<ResourceId>,
    optional_reads: Vec<Option<ResourceId>>,
    writes: Vec<ResourceId>,
}

impl PipelinePass {
    pub fn new(
        name: impl Into<String>,
        reads: Vec<ResourceId>,
        optional_reads: Vec<Option<ResourceId>>,
        writes: Vec<ResourceId>,
    ) -> Self {
        Self {
            name: name.into(),
            reads,
            optional_reads,
            writes,
        }
    }
}

impl Pass<TraceRenderer, CommandQueue> for PipelinePass {
    fn name(&self) -> &str {
        &self.name
    }

    fn declare_dependencies(&mut self, deps: &mut DependencyBuilder<'_>) {
        deps.read(self.reads.iter().copied())
            .read(self.optional_reads.iter().copied())
            .write(self.writes.iter().copied());
    }

    fn execute(&mut self, renderer: &mut TraceRenderer, queue: &mut CommandQueue) {
        trace!(pass = %self.name, frame = renderer.frame(), "pipeline pass: submit");
        renderer.record_pass(&self.name);
        queue.submit(self.name.clone(), renderer.frame());
    }
}
