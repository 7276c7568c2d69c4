// src/digraph/sort.rs

//! Topological ordering (Kahn's algorithm) with explicit cycle detection.

use std::collections::{HashMap, HashSet, VecDeque};
use std::hash::Hash;

use thiserror::Error;
use tracing::trace;

use super::DirectedGraph;

/// The graph is not a DAG, so no total order exists.
///
/// `unresolved` lists every vertex that could not be placed, in vertex
/// order. Each of them is on a cycle or downstream of one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "graph contains a cycle ({} unresolved vertices: {unresolved:?})",
    .unresolved.len()
)]
pub struct CycleError<V> {
    unresolved: Vec<V>,
}

impl<V> CycleError<V> {
    pub fn unresolved(&self) -> &[V] {
        &self.unresolved
    }

    pub fn into_unresolved(self) -> Vec<V> {
        self.unresolved
    }
}

impl<V> DirectedGraph<V>
where
    V: Copy + Eq + Hash,
{
    /// Order every vertex so that each edge points forward.
    ///
    /// In-degrees come from [`reverse`](Self::reverse). Zero in-degree
    /// vertices enter a FIFO frontier in vertex order; relaxing an edge
    /// towards a vertex that is already placed or queued aborts the sort, as
    /// does running out of frontier with vertices left over. Either way the
    /// caller gets a [`CycleError`] and never a partial order.
    pub fn sort(&self) -> Result<Vec<V>, CycleError<V>> {
        let reversed = self.reverse();

        let mut in_degree: HashMap<V, usize> = self
            .vertices()
            .map(|vertex| (vertex, reversed.out_degree(vertex)))
            .collect();

        let mut frontier: VecDeque<V> = self
            .vertices()
            .filter(|vertex| in_degree[vertex] == 0)
            .collect();

        // Vertices that entered the frontier at some point (placed or not).
        let mut queued: HashSet<V> = frontier.iter().copied().collect();
        let mut order: Vec<V> = Vec::with_capacity(self.vertex_count());

        while let Some(vertex) = frontier.pop_front() {
            order.push(vertex);

            for next in self.successors(vertex) {
                if queued.contains(&next) {
                    trace!("edge into an already ordered vertex; graph has a cycle");
                    return Err(self.cycle_error(&queued));
                }

                if let Some(remaining) = in_degree.get_mut(&next) {
                    *remaining -= 1;
                    if *remaining == 0 {
                        queued.insert(next);
                        frontier.push_back(next);
                    }
                }
            }
        }

        if order.len() != self.vertex_count() {
            trace!(
                placed = order.len(),
                total = self.vertex_count(),
                "frontier exhausted with vertices left; graph has a cycle"
            );
            return Err(self.cycle_error(&queued));
        }

        Ok(order)
    }

    fn cycle_error(&self, queued: &HashSet<V>) -> CycleError<V> {
        CycleError {
            unresolved: self
                .vertices()
                .filter(|vertex| !queued.contains(vertex))
                .collect(),
        }
    }
}
