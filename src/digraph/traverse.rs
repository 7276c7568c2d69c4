// src/digraph/traverse.rs

//! Whole-graph transforms and reachability queries.

use std::collections::{HashSet, VecDeque};
use std::hash::Hash;

use super::DirectedGraph;

impl<V> DirectedGraph<V>
where
    V: Copy + Eq + Hash,
{
    /// Build a new graph with every edge inverted.
    ///
    /// The vertex set (and its order) is preserved, including isolated
    /// vertices, so `reverse().out_degree(v)` is the in-degree of `v`.
    pub fn reverse(&self) -> Self {
        let mut reversed = Self::new();

        for vertex in self.vertices() {
            reversed.add_vertex(vertex);
        }

        for from in self.vertices() {
            for to in self.successors(from) {
                reversed.add_edge(to, from);
            }
        }

        reversed
    }

    /// Vertices reachable from `source` through at least one edge.
    ///
    /// `source` itself is only part of the result if it lies on a cycle.
    pub fn connected(&self, source: V) -> HashSet<V> {
        self.connected_from([source])
    }

    /// Vertices reachable from any of `sources` through at least one edge.
    ///
    /// The frontier starts with the seeds but a vertex is only marked as
    /// visited once an edge leads to it. A seed therefore shows up in the
    /// result only when another seed (or a cycle) reaches it. Seeds that are
    /// not in the graph contribute nothing.
    pub fn connected_from<I>(&self, sources: I) -> HashSet<V>
    where
        I: IntoIterator<Item = V>,
    {
        let mut visited: HashSet<V> = HashSet::new();
        let mut frontier: VecDeque<V> = sources
            .into_iter()
            .filter(|&seed| self.contains_vertex(seed))
            .collect();

        while let Some(vertex) = frontier.pop_front() {
            for next in self.successors(vertex) {
                if visited.insert(next) {
                    frontier.push_back(next);
                }
            }
        }

        visited
    }
}
