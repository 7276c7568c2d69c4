// src/digraph/mod.rs

//! Generic directed graph container.
//!
//! - [`DirectedGraph`] maps every vertex to the vertices it points at.
//! - [`traverse`] adds reverse-graph construction and breadth-first
//!   reachability.
//! - [`sort`] holds the Kahn topological sort and its [`CycleError`].
//!
//! Vertices are small `Copy` identities (indices, enum handles, interned
//! names). The graph never owns what a vertex refers to.

pub mod sort;
pub mod traverse;

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

pub use sort::CycleError;

/// Directed graph keyed by vertex identity.
///
/// Invariants:
/// - every edge endpoint is a vertex, even when it has no outgoing edges;
/// - an edge is stored at most once;
/// - nothing is ever removed.
///
/// Vertices and successor lists iterate in insertion order. Callers should
/// only rely on that for exhaustiveness; the topological order of unrelated
/// vertices is not part of the contract.
#[derive(Debug, Clone)]
pub struct DirectedGraph<V> {
    /// Position of each vertex in `vertices` / `successors`.
    slots: HashMap<V, usize>,
    vertices: Vec<V>,
    successors: Vec<Vec<V>>,
    /// Edge set used to keep insertion idempotent.
    edges: HashSet<(V, V)>,
}

impl<V> Default for DirectedGraph<V> {
    fn default() -> Self {
        Self {
            slots: HashMap::new(),
            vertices: Vec::new(),
            successors: Vec::new(),
            edges: HashSet::new(),
        }
    }
}

impl<V> DirectedGraph<V>
where
    V: Copy + Eq + Hash,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `vertex` with no successors.
    ///
    /// Returns `false` (and changes nothing) if it was already present.
    pub fn add_vertex(&mut self, vertex: V) -> bool {
        if self.slots.contains_key(&vertex) {
            return false;
        }
        self.slots.insert(vertex, self.vertices.len());
        self.vertices.push(vertex);
        self.successors.push(Vec::new());
        true
    }

    /// Insert the edge `from -> to`, adding either endpoint if missing.
    ///
    /// Returns `false` if the edge already existed.
    pub fn add_edge(&mut self, from: V, to: V) -> bool {
        self.add_vertex(from);
        self.add_vertex(to);

        if !self.edges.insert((from, to)) {
            return false;
        }

        let slot = self.slots[&from];
        self.successors[slot].push(to);
        true
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Total number of edges in the graph.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Number of edges leaving `vertex` (0 for an unknown vertex).
    pub fn out_degree(&self, vertex: V) -> usize {
        self.slots
            .get(&vertex)
            .map(|&slot| self.successors[slot].len())
            .unwrap_or(0)
    }

    pub fn contains_vertex(&self, vertex: V) -> bool {
        self.slots.contains_key(&vertex)
    }

    pub fn contains_edge(&self, from: V, to: V) -> bool {
        self.edges.contains(&(from, to))
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// All vertices, in insertion order.
    pub fn vertices(&self) -> impl Iterator<Item = V> + '_ {
        self.vertices.iter().copied()
    }

    /// Direct successors of `vertex` (empty for an unknown vertex).
    pub fn successors(&self, vertex: V) -> impl Iterator<Item = V> + '_ {
        let list: &[V] = match self.slots.get(&vertex) {
            Some(&slot) => &self.successors[slot],
            None => &[],
        };
        list.iter().copied()
    }

    /// Visit every vertex once.
    pub fn for_each_vertex(&self, mut f: impl FnMut(V)) {
        for &vertex in &self.vertices {
            f(vertex);
        }
    }

    /// Visit every successor of `vertex` once.
    pub fn for_each_edge(&self, vertex: V, mut f: impl FnMut(V)) {
        for successor in self.successors(vertex) {
            f(successor);
        }
    }
}
