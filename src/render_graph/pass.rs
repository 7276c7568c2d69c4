// src/render_graph/pass.rs

//! The `Pass` capability and the builder passes declare dependencies through.

use tracing::{trace, warn};

use crate::digraph::DirectedGraph;
use crate::render_graph::{Node, PassId, ResourceId};

/// A unit of scheduled work.
///
/// `R` and `Q` are the renderer and render-queue handles of the embedding
/// application. The scheduler hands them to [`execute`](Pass::execute)
/// untouched and never looks inside.
pub trait Pass<R: ?Sized, Q: ?Sized> {
    /// Name used in logs and diagnostics.
    fn name(&self) -> &str;

    /// Declare reads and writes.
    ///
    /// Called on every compile, before sorting.
    fn declare_dependencies(&mut self, deps: &mut DependencyBuilder<'_>);

    /// Do the pass's work. Called once per `RenderGraph::execute`, in
    /// schedule order.
    fn execute(&mut self, renderer: &mut R, queue: &mut Q);
}

/// Direction of a declared dependency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Access {
    Read,
    Write,
}

/// Handle given to [`Pass::declare_dependencies`].
///
/// Scoped to a single pass; every call adds edges between that pass and the
/// given resources.
pub struct DependencyBuilder<'a> {
    pass: PassId,
    graph: &'a mut DirectedGraph<Node>,
    resource_count: usize,
}

impl<'a> DependencyBuilder<'a> {
    pub(crate) fn new(
        pass: PassId,
        graph: &'a mut DirectedGraph<Node>,
        resource_count: usize,
    ) -> Self {
        Self {
            pass,
            graph,
            resource_count,
        }
    }

    /// The pass being declared.
    pub fn pass(&self) -> PassId {
        self.pass
    }

    /// The pass reads each resource: adds `resource -> pass`.
    ///
    /// `None` entries are skipped without complaint, so optional inputs can
    /// be passed straight through.
    pub fn read<I>(&mut self, resources: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<Option<ResourceId>>,
    {
        link(
            self.graph,
            self.resource_count,
            self.pass,
            resources,
            Access::Read,
        );
        self
    }

    /// The pass writes each resource: adds `pass -> resource`.
    pub fn write<I>(&mut self, resources: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<Option<ResourceId>>,
    {
        link(
            self.graph,
            self.resource_count,
            self.pass,
            resources,
            Access::Write,
        );
        self
    }
}

/// Insert one edge per present resource.
///
/// Returns how many edges were newly added.
pub(crate) fn link<I>(
    graph: &mut DirectedGraph<Node>,
    resource_count: usize,
    pass: PassId,
    resources: I,
    access: Access,
) -> usize
where
    I: IntoIterator,
    I::Item: Into<Option<ResourceId>>,
{
    let mut added = 0;

    for resource in resources {
        let Some(resource) = resource.into() else {
            trace!(pass = pass.index(), ?access, "absent resource; skipping");
            continue;
        };

        if resource.index() >= resource_count {
            warn!(
                pass = pass.index(),
                resource = resource.index(),
                ?access,
                "resource handle does not belong to this graph; ignoring"
            );
            continue;
        }

        let inserted = match access {
            Access::Read => graph.add_edge(Node::Resource(resource), Node::Pass(pass)),
            Access::Write => graph.add_edge(Node::Pass(pass), Node::Resource(resource)),
        };

        if inserted {
            added += 1;
        }
    }

    added
}
