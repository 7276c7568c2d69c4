// src/render_graph/graph.rs

use std::collections::BTreeSet;
use std::fmt;

use tracing::{debug, info, trace, warn};

use crate::digraph::DirectedGraph;
use crate::errors::{PassgraphError, Result};
use crate::render_graph::pass::{Access, DependencyBuilder, Pass, link};
use crate::render_graph::{Node, NodeKind, PassId, ResourceId};

/// Lifecycle of a [`RenderGraph`].
///
/// `Uninitialized -> Compiled -> Executed*`. Adding nodes, adding edges from
/// outside a compile, or calling [`RenderGraph::invalidate`] goes back to
/// `Uninitialized`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphState {
    Uninitialized,
    Compiled,
    Executed,
}

/// A named data handle. Only its identity matters to the scheduler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    name: String,
}

impl Resource {
    pub fn name(&self) -> &str {
        &self.name
    }
}

struct PassSlot<R: ?Sized, Q: ?Sized> {
    name: String,
    pass: Box<dyn Pass<R, Q>>,
}

/// Owns passes and resources and schedules the passes.
///
/// Compiling asks every pass for its reads/writes, sorts the resulting
/// pass/resource graph topologically and keeps only the passes. Executing
/// runs that schedule serially, compiling first if needed.
///
/// ```
/// use passgraph::render_graph::{DependencyBuilder, Pass, RenderGraph, ResourceId};
///
/// struct Step {
///     name: &'static str,
///     reads: Option<ResourceId>,
///     writes: Option<ResourceId>,
/// }
///
/// impl Pass<Vec<&'static str>, ()> for Step {
///     fn name(&self) -> &str {
///         self.name
///     }
///
///     fn declare_dependencies(&mut self, deps: &mut DependencyBuilder<'_>) {
///         deps.read([self.reads]);
///         deps.write([self.writes]);
///     }
///
///     fn execute(&mut self, log: &mut Vec<&'static str>, _queue: &mut ()) {
///         log.push(self.name);
///     }
/// }
///
/// let mut graph: RenderGraph<Vec<&'static str>, ()> = RenderGraph::new();
/// let color = graph.add_resource("color");
/// graph.add_pass(Step { name: "tonemap", reads: Some(color), writes: None });
/// graph.add_pass(Step { name: "geometry", reads: None, writes: Some(color) });
///
/// let mut log = Vec::new();
/// graph.execute(&mut log, &mut ())?;
/// assert_eq!(log, ["geometry", "tonemap"]);
/// # Ok::<(), passgraph::errors::PassgraphError>(())
/// ```
pub struct RenderGraph<R: ?Sized, Q: ?Sized> {
    passes: Vec<PassSlot<R, Q>>,
    resources: Vec<Resource>,
    dependencies: DirectedGraph<Node>,
    schedule: Vec<PassId>,
    state: GraphState,
    /// Completed `execute` calls since the graph was created.
    executions: u64,
}

impl<R: ?Sized, Q: ?Sized> fmt::Debug for RenderGraph<R, Q> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pass_names: Vec<&str> = self.passes.iter().map(|p| p.name.as_str()).collect();
        f.debug_struct("RenderGraph")
            .field("passes", &pass_names)
            .field("resources", &self.resources)
            .field("schedule", &self.schedule)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl<R: ?Sized, Q: ?Sized> Default for RenderGraph<R, Q> {
    fn default() -> Self {
        Self {
            passes: Vec::new(),
            resources: Vec::new(),
            dependencies: DirectedGraph::new(),
            schedule: Vec::new(),
            state: GraphState::Uninitialized,
            executions: 0,
        }
    }
}

impl<R: ?Sized, Q: ?Sized> RenderGraph<R, Q> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of `pass` and return its handle.
    ///
    /// The pass starts detached: it has no edges until it (or the caller)
    /// declares reads/writes, but it is already part of the schedule.
    pub fn add_pass<P>(&mut self, pass: P) -> PassId
    where
        P: Pass<R, Q> + 'static,
    {
        let id = PassId::new(self.passes.len());
        let name = pass.name().to_string();

        debug!(pass = %name, id = id.index(), "render graph: added pass");

        self.passes.push(PassSlot {
            name,
            pass: Box::new(pass),
        });
        self.dependencies.add_vertex(Node::Pass(id));
        self.invalidate();
        id
    }

    /// Create a resource node and return its handle.
    pub fn add_resource(&mut self, name: impl Into<String>) -> ResourceId {
        let id = ResourceId::new(self.resources.len());
        let name = name.into();

        debug!(resource = %name, id = id.index(), "render graph: added resource");

        self.resources.push(Resource { name });
        self.dependencies.add_vertex(Node::Resource(id));
        self.invalidate();
        id
    }

    /// Declare that `pass` reads each of `resources`.
    ///
    /// `None` entries are ignored.
    pub fn read<I>(&mut self, pass: PassId, resources: I)
    where
        I: IntoIterator,
        I::Item: Into<Option<ResourceId>>,
    {
        self.declare(pass, resources, Access::Read);
    }

    /// Declare that `pass` writes each of `resources`.
    ///
    /// `None` entries are ignored.
    pub fn write<I>(&mut self, pass: PassId, resources: I)
    where
        I: IntoIterator,
        I::Item: Into<Option<ResourceId>>,
    {
        self.declare(pass, resources, Access::Write);
    }

    fn declare<I>(&mut self, pass: PassId, resources: I, access: Access)
    where
        I: IntoIterator,
        I::Item: Into<Option<ResourceId>>,
    {
        if pass.index() >= self.passes.len() {
            warn!(
                pass = pass.index(),
                ?access,
                "pass handle does not belong to this graph; ignoring"
            );
            return;
        }

        let added = link(
            &mut self.dependencies,
            self.resources.len(),
            pass,
            resources,
            access,
        );

        if added > 0 {
            self.invalidate();
        }
    }

    /// Compute the pass schedule.
    ///
    /// Every pass declares its dependencies, the whole pass/resource graph
    /// is sorted, and the pass subsequence becomes the schedule. Edges from
    /// earlier compiles are kept. On a cycle nothing is scheduled and the
    /// graph stays `Uninitialized`.
    pub fn compile(&mut self) -> Result<&[PassId]> {
        self.schedule.clear();
        self.state = GraphState::Uninitialized;

        let resource_count = self.resources.len();
        for (index, slot) in self.passes.iter_mut().enumerate() {
            let mut deps =
                DependencyBuilder::new(PassId::new(index), &mut self.dependencies, resource_count);
            slot.pass.declare_dependencies(&mut deps);
        }

        let order = self.dependencies.sort().map_err(|err| {
            let unresolved = self.describe_nodes(err.unresolved());
            warn!(%unresolved, "render graph: dependency cycle");
            PassgraphError::GraphCycle(format!(
                "cycle detected in render graph; unresolved nodes: {unresolved}"
            ))
        })?;

        self.schedule = passes_only(&order);
        self.state = GraphState::Compiled;

        debug!(
            passes = self.schedule.len(),
            nodes = self.dependencies.vertex_count(),
            edges = self.dependencies.edge_count(),
            "render graph: compiled"
        );

        Ok(&self.schedule)
    }

    /// Run every scheduled pass once, in order.
    ///
    /// Compiles first when there is no current schedule; a compile error is
    /// returned before any pass runs.
    pub fn execute(&mut self, renderer: &mut R, queue: &mut Q) -> Result<()> {
        if self.state == GraphState::Uninitialized {
            info!("render graph: no schedule yet; compiling");
            self.compile()?;
        }

        for &id in &self.schedule {
            let slot = &mut self.passes[id.index()];
            trace!(pass = %slot.name, "render graph: executing pass");
            slot.pass.execute(renderer, queue);
        }

        self.executions += 1;
        self.state = GraphState::Executed;
        Ok(())
    }

    /// Drop the compiled schedule; the next `execute` recompiles.
    pub fn invalidate(&mut self) {
        if self.state != GraphState::Uninitialized {
            debug!("render graph: schedule invalidated");
        }
        self.schedule.clear();
        self.state = GraphState::Uninitialized;
    }

    pub fn state(&self) -> GraphState {
        self.state
    }

    /// The compiled schedule (empty until compiled).
    pub fn schedule(&self) -> &[PassId] {
        &self.schedule
    }

    /// Number of completed `execute` calls.
    pub fn executions(&self) -> u64 {
        self.executions
    }

    pub fn pass_count(&self) -> usize {
        self.passes.len()
    }

    pub fn resource_count(&self) -> usize {
        self.resources.len()
    }

    pub fn pass_name(&self, id: PassId) -> Option<&str> {
        self.passes.get(id.index()).map(|slot| slot.name.as_str())
    }

    pub fn resource(&self, id: ResourceId) -> Option<&Resource> {
        self.resources.get(id.index())
    }

    pub fn resource_name(&self, id: ResourceId) -> Option<&str> {
        self.resource(id).map(Resource::name)
    }

    pub fn node_name(&self, node: Node) -> Option<&str> {
        match node {
            Node::Pass(id) => self.pass_name(id),
            Node::Resource(id) => self.resource_name(id),
        }
    }

    /// First pass with the given name.
    pub fn find_pass(&self, name: &str) -> Option<PassId> {
        self.passes
            .iter()
            .position(|slot| slot.name == name)
            .map(PassId::new)
    }

    /// First resource with the given name.
    pub fn find_resource(&self, name: &str) -> Option<ResourceId> {
        self.resources
            .iter()
            .position(|resource| resource.name == name)
            .map(ResourceId::new)
    }

    /// Read-only view of the pass/resource dependency graph.
    pub fn dependencies(&self) -> &DirectedGraph<Node> {
        &self.dependencies
    }

    /// Passes that transitively depend on `node`, in handle order.
    ///
    /// Uses the edges declared so far; compile first to include what the
    /// passes declare lazily.
    pub fn downstream_passes(&self, node: Node) -> Vec<PassId> {
        let reached: BTreeSet<PassId> = self
            .dependencies
            .connected(node)
            .into_iter()
            .filter_map(Node::as_pass)
            .collect();
        reached.into_iter().collect()
    }

    fn describe_nodes(&self, nodes: &[Node]) -> String {
        nodes
            .iter()
            .map(|&node| {
                let name = self.node_name(node).unwrap_or("?");
                match node.kind() {
                    NodeKind::Pass => format!("pass '{name}'"),
                    NodeKind::Resource => format!("resource '{name}'"),
                }
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Keep the passes of a full node order, preserving their relative order.
pub fn passes_only(order: &[Node]) -> Vec<PassId> {
    order.iter().copied().filter_map(Node::as_pass).collect()
}
