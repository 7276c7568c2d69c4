// tests/digraph_basics.rs

use std::collections::HashSet;

use passgraph::digraph::DirectedGraph;

#[test]
fn test_add_edge_inserts_missing_endpoints() {
    let mut graph: DirectedGraph<u32> = DirectedGraph::new();
    assert!(graph.is_empty());

    assert!(graph.add_edge(1, 2));

    assert_eq!(graph.vertex_count(), 2);
    assert!(graph.contains_vertex(1));
    assert!(graph.contains_vertex(2));
    assert!(graph.contains_edge(1, 2));
    assert!(!graph.contains_edge(2, 1));
    assert_eq!(graph.out_degree(1), 1);
    assert_eq!(graph.out_degree(2), 0);
}

#[test]
fn test_duplicate_edge_is_ignored() {
    let mut graph: DirectedGraph<u32> = DirectedGraph::new();

    assert!(graph.add_edge(1, 2));
    assert!(!graph.add_edge(1, 2));
    assert!(!graph.add_edge(1, 2));

    assert_eq!(graph.edge_count(), 1);
    assert_eq!(graph.successors(1).collect::<Vec<_>>(), vec![2]);
}

#[test]
fn test_duplicate_vertex_is_ignored() {
    let mut graph: DirectedGraph<&str> = DirectedGraph::new();

    assert!(graph.add_vertex("a"));
    graph.add_edge("a", "b");
    assert!(!graph.add_vertex("a"));

    assert_eq!(graph.vertex_count(), 2);
    assert_eq!(graph.out_degree("a"), 1, "re-adding must not drop edges");
}

#[test]
fn test_isolated_vertex_is_kept() {
    let mut graph: DirectedGraph<u32> = DirectedGraph::new();
    graph.add_vertex(7);

    assert_eq!(graph.vertex_count(), 1);
    assert_eq!(graph.edge_count(), 0);
    assert_eq!(graph.sort().unwrap(), vec![7]);
}

#[test]
fn test_unknown_vertex_queries_are_empty() {
    let graph: DirectedGraph<u32> = DirectedGraph::new();

    assert_eq!(graph.out_degree(42), 0);
    assert_eq!(graph.successors(42).count(), 0);
    assert!(graph.connected(42).is_empty());
}

#[test]
fn test_for_each_visits_everything_once() {
    let mut graph: DirectedGraph<u32> = DirectedGraph::new();
    graph.add_edge(1, 2);
    graph.add_edge(1, 3);
    graph.add_vertex(4);

    let mut vertices = Vec::new();
    graph.for_each_vertex(|v| vertices.push(v));
    assert_eq!(vertices, vec![1, 2, 3, 4]);

    let mut successors = Vec::new();
    graph.for_each_edge(1, |v| successors.push(v));
    assert_eq!(successors, vec![2, 3]);
}

#[test]
fn test_reverse_inverts_edges_and_keeps_vertices() {
    let mut graph: DirectedGraph<u32> = DirectedGraph::new();
    graph.add_edge(1, 2);
    graph.add_edge(2, 3);
    graph.add_edge(1, 3);
    graph.add_vertex(9);

    let reversed = graph.reverse();

    assert_eq!(reversed.vertex_count(), graph.vertex_count());
    assert_eq!(reversed.edge_count(), graph.edge_count());
    assert!(reversed.contains_vertex(9));
    for (from, to) in [(1, 2), (2, 3), (1, 3)] {
        assert!(reversed.contains_edge(to, from));
        assert!(!reversed.contains_edge(from, to));
    }

    // reverse().out_degree is the in-degree.
    assert_eq!(reversed.out_degree(3), 2);
    assert_eq!(reversed.out_degree(1), 0);
}

#[test]
fn test_reverse_twice_restores_edges() {
    let mut graph: DirectedGraph<u32> = DirectedGraph::new();
    graph.add_edge(1, 2);
    graph.add_edge(3, 2);

    let round_trip = graph.reverse().reverse();

    assert_eq!(round_trip.edge_count(), 2);
    assert!(round_trip.contains_edge(1, 2));
    assert!(round_trip.contains_edge(3, 2));
}

#[test]
fn test_connected_excludes_source_without_cycle() {
    let mut graph: DirectedGraph<u32> = DirectedGraph::new();
    graph.add_edge(1, 2);
    graph.add_edge(2, 3);
    graph.add_edge(4, 3);

    let reached = graph.connected(1);

    assert_eq!(reached, HashSet::from([2, 3]));
}

#[test]
fn test_connected_includes_source_on_cycle() {
    let mut graph: DirectedGraph<u32> = DirectedGraph::new();
    graph.add_edge(1, 2);
    graph.add_edge(2, 1);

    let reached = graph.connected(1);

    assert_eq!(reached, HashSet::from([1, 2]));
}

#[test]
fn test_connected_from_multiple_seeds() {
    let mut graph: DirectedGraph<u32> = DirectedGraph::new();
    graph.add_edge(1, 2);
    graph.add_edge(3, 4);
    graph.add_edge(1, 3);

    // 3 is a seed but also reached from seed 1.
    let reached = graph.connected_from([1, 3]);
    assert_eq!(reached, HashSet::from([2, 3, 4]));

    // Seeds outside the graph contribute nothing.
    let reached = graph.connected_from([3, 99]);
    assert_eq!(reached, HashSet::from([4]));
}
