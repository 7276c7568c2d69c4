// src/render_graph/mod.rs

//! Render-pass scheduling on top of [`DirectedGraph`](crate::digraph::DirectedGraph).
//!
//! - [`graph`] holds [`RenderGraph`], which owns passes and resources and
//!   turns their declared reads/writes into a serial pass schedule.
//! - [`pass`] defines the [`Pass`] trait and the [`DependencyBuilder`]
//!   passes use to declare what they read and write.
//!
//! Passes and resources live in arenas inside the `RenderGraph`; the
//! dependency graph only stores [`Node`] handles.

pub mod graph;
pub mod pass;

pub use graph::{GraphState, RenderGraph, Resource, passes_only};
pub use pass::{DependencyBuilder, Pass};

/// Handle to a pass owned by a [`RenderGraph`].
///
/// Only meaningful for the graph that created it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PassId(u32);

impl PassId {
    pub(crate) fn new(index: usize) -> Self {
        Self(index as u32)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Handle to a resource owned by a [`RenderGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ResourceId(u32);

impl ResourceId {
    pub(crate) fn new(index: usize) -> Self {
        Self(index as u32)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Discriminant of a [`Node`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Pass,
    Resource,
}

/// A vertex of the dependency graph.
///
/// Edges read "must happen before": `Resource -> Pass` for a read,
/// `Pass -> Resource` for a write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Node {
    Pass(PassId),
    Resource(ResourceId),
}

impl Node {
    pub fn kind(self) -> NodeKind {
        match self {
            Node::Pass(_) => NodeKind::Pass,
            Node::Resource(_) => NodeKind::Resource,
        }
    }

    pub fn as_pass(self) -> Option<PassId> {
        match self {
            Node::Pass(id) => Some(id),
            Node::Resource(_) => None,
        }
    }

    pub fn as_resource(self) -> Option<ResourceId> {
        match self {
            Node::Resource(id) => Some(id),
            Node::Pass(_) => None,
        }
    }
}

impl From<PassId> for Node {
    fn from(id: PassId) -> Self {
        Node::Pass(id)
    }
}

impl From<ResourceId> for Node {
    fn from(id: ResourceId) -> Self {
        Node::Resource(id)
    }
}
