//! Tests for the compact adjacency layout.

use super::builder::{place_neighbors, prefix_offsets, tally_degrees};
use super::*;
use crate::ingest::{EdgeList, RawEdge};
use crate::observer::BuildPhase;

fn edge(u: i64, v: i64) -> RawEdge {
    RawEdge::new_checked(u, v, 1).unwrap()
}

fn sorted(block: &[u32]) -> Vec<u32> {
    let mut v = block.to_vec();
    v.sort_unstable();
    v
}

#[test]
fn test_triangle_layout() {
    // 1-2, 2-3, 1-3
    let graph = CompactGraph::from_pairs(&[(1, 2), (2, 3), (1, 3)]).unwrap();

    assert_eq!(graph.node_count(), 3);
    assert_eq!(graph.edge_count(), 3);
    assert_eq!(graph.degrees(), &[2, 2, 2]);
    assert_eq!(graph.offsets(), &[0, 2, 4]);
    assert_eq!(graph.offsets_with_sentinel(), &[0, 2, 4, 6]);

    // Blocks follow input order for each node.
    assert_eq!(graph.neighbors_of(0), &[1, 2]);
    assert_eq!(graph.neighbors_of(1), &[0, 2]);
    assert_eq!(graph.neighbors_of(2), &[1, 0]);
}

#[test]
fn test_empty_graph() {
    let graph = CompactGraph::from_pairs(&[]).unwrap();
    assert_eq!(graph.node_count(), 0);
    assert_eq!(graph.edge_count(), 0);
    assert!(graph.offsets().is_empty());
    assert_eq!(graph.offsets_with_sentinel(), &[0]);
    assert_eq!(graph.max_degree(), 0);
    assert_eq!(graph.mean_degree(), 0.0);
    assert!(graph.validate().is_ok());
}

#[test]
fn test_unused_ids_become_isolated_nodes() {
    let graph = CompactGraph::from_pairs(&[(2, 5)]).unwrap();

    assert_eq!(graph.node_count(), 5);
    assert_eq!(graph.degrees(), &[0, 1, 0, 0, 1]);
    assert_eq!(graph.offsets(), &[0, 0, 1, 1, 1]);
    assert!(graph.neighbors_of(0).is_empty());
    assert_eq!(graph.neighbors_of(1), &[4]);
    assert_eq!(graph.neighbors_of(4), &[1]);
    assert_eq!(graph.isolated_nodes().collect::<Vec<_>>(), vec![0, 2, 3]);
}

#[test]
fn test_duplicate_edges_are_preserved() {
    let graph = CompactGraph::from_pairs(&[(1, 2), (2, 1), (1, 2), (2, 3)]).unwrap();

    assert_eq!(graph.edge_count(), 4);
    assert_eq!(graph.degree_of(0), 3);
    assert_eq!(graph.neighbors_of(0), &[1, 1, 1]);
    assert_eq!(sorted(graph.neighbors_of(1)), vec![0, 0, 0, 2]);
    assert_eq!(graph.edge_multiplicity(0, 1), 3);
    assert_eq!(graph.edge_multiplicity(1, 0), 3);
    assert_eq!(graph.edge_multiplicity(1, 2), 1);
    assert!(!graph.has_edge(0, 2));
}

#[test]
fn test_star_degrees_and_stats() {
    let pairs: Vec<(i64, i64)> = (2..=6).map(|leaf| (1, leaf)).collect();
    let graph = CompactGraph::from_pairs(&pairs).unwrap();

    assert_eq!(graph.degree_of(0), 5);
    assert_eq!(graph.neighbors_of(0), &[1, 2, 3, 4, 5]);
    assert_eq!(graph.max_degree(), 5);
    assert_eq!(graph.min_degree(), 1);
    assert!((graph.mean_degree() - 10.0 / 6.0).abs() < 1e-12);

    let summary = graph.summary();
    assert_eq!(summary.nodes, 6);
    assert_eq!(summary.edges, 5);
    assert_eq!(summary.total_degree, 10);
    assert_eq!(summary.isolated_nodes, 0);
}

#[test]
fn test_checked_accessors() {
    let graph = CompactGraph::from_pairs(&[(1, 2)]).unwrap();
    assert_eq!(graph.try_degree_of(1), Some(1));
    assert_eq!(graph.try_degree_of(2), None);
    assert_eq!(graph.try_neighbors_of(0), Some(&[1u32][..]));
    assert_eq!(graph.try_neighbors_of(7), None);
}

#[test]
#[should_panic(expected = "out of bounds")]
fn test_neighbors_of_out_of_bounds_panics() {
    let graph = CompactGraph::from_pairs(&[(1, 2)]).unwrap();
    let _ = graph.neighbors_of(2);
}

#[test]
fn test_build_rejects_invalid_pairs() {
    assert!(matches!(
        CompactGraph::from_pairs(&[(1, 2), (4, 4)]),
        Err(GraphError::SelfLoop { line: 2, .. })
    ));
    assert!(matches!(
        CompactGraph::from_pairs(&[(0, 2)]),
        Err(GraphError::InvalidIdentifier { line: 1, value: 0 })
    ));
}

#[test]
fn test_tally_is_order_independent() {
    let a = [edge(1, 2), edge(3, 1), edge(2, 3)];
    let b = [a[2], a[0], a[1]];
    assert_eq!(tally_degrees(&a, 3).unwrap(), tally_degrees(&b, 3).unwrap());
}

#[test]
fn test_prefix_offsets() {
    assert_eq!(prefix_offsets(&[]), vec![0]);
    assert_eq!(prefix_offsets(&[2, 0, 3, 1]), vec![0, 2, 2, 5, 6]);
}

#[test]
fn test_placement_overflow_is_an_invariant_violation() {
    // Offsets sized for one edge, two edges placed.
    let sized_for = [edge(1, 2)];
    let offsets = prefix_offsets(&tally_degrees(&sized_for, 2).unwrap());
    let placed = [edge(1, 2), edge(1, 2)];

    let err = place_neighbors(&placed, &offsets).unwrap_err();
    assert!(matches!(err, GraphError::InvariantViolation { node: 0, .. }));
}

#[test]
fn test_placement_underfill_is_an_invariant_violation() {
    let sized_for = [edge(1, 2), edge(2, 3)];
    let offsets = prefix_offsets(&tally_degrees(&sized_for, 3).unwrap());
    let placed = [edge(1, 2)];

    let err = place_neighbors(&placed, &offsets).unwrap_err();
    assert!(matches!(err, GraphError::InvariantViolation { node: 1, .. }));
}

#[test]
fn test_decreasing_offsets_are_an_invariant_violation() {
    // Block 2 would end before it starts; placing must not index past the array.
    let err = place_neighbors(&[edge(1, 2)], &[0, 2, 4, 1]).unwrap_err();
    assert!(matches!(err, GraphError::InvariantViolation { node: 2, .. }));
}

#[test]
fn test_offsets_not_starting_at_zero_are_an_invariant_violation() {
    let err = place_neighbors(&[edge(1, 2)], &[1, 2, 3]).unwrap_err();
    assert!(matches!(err, GraphError::InvariantViolation { node: 0, .. }));
}

#[test]
fn test_endpoint_beyond_node_count_reports_input_id() {
    let edges = [edge(1, 4)];
    assert!(matches!(
        tally_degrees(&edges, 3),
        Err(GraphError::EndpointOutOfRange { id: 4, node_count: 3 })
    ));
    assert!(matches!(
        place_neighbors(&edges, &[0, 1, 1, 1]),
        Err(GraphError::EndpointOutOfRange { id: 4, node_count: 3 })
    ));
}

#[test]
fn test_manually_pushed_edges_keep_blocks_free_of_self_loops() {
    let mut list = EdgeList::new();
    assert!(matches!(
        list.push_checked(3, 3, 1),
        Err(GraphError::SelfLoop { line: 1, node: 3 })
    ));
    assert!(matches!(
        RawEdge::new_checked(0, 2, 2),
        Err(GraphError::InvalidIdentifier { line: 2, value: 0 })
    ));
    assert!(list.is_empty());
    assert_eq!(list.max_id(), 0);

    list.push(edge(3, 1));
    list.push(edge(2, 3));
    let graph = CompactGraph::from_edge_list(&list, &mut crate::observer::NoopObserver).unwrap();

    // Checked directly so release builds are covered too.
    for node in graph.nodes() {
        assert!(graph.neighbors_of(node).iter().all(|&v| v as usize != node));
    }
    assert_eq!(graph.neighbors_of(2), &[0, 1]);
}

#[test]
fn test_validate_detects_corruption() {
    let mut graph = CompactGraph::from_pairs(&[(1, 2), (2, 3)]).unwrap();
    assert!(graph.validate().is_ok());

    graph.neighbors[0] = 0;
    assert!(matches!(
        graph.validate(),
        Err(GraphError::InvariantViolation { node: 0, .. })
    ));

    let mut graph = CompactGraph::from_pairs(&[(1, 2), (2, 3)]).unwrap();
    graph.degrees[1] = 1;
    assert!(matches!(
        graph.validate(),
        Err(GraphError::InvariantViolation { node: 1, .. })
    ));
}

#[test]
fn test_builder_reports_phases_in_order() {
    let list = EdgeList::from_pairs(&[(1, 2), (2, 4)]).unwrap();
    let mut phases = Vec::new();
    let mut record = |p: BuildPhase| phases.push(p);
    let graph = CompactGraph::from_edge_list(&list, &mut record).unwrap();

    assert_eq!(
        phases,
        vec![
            BuildPhase::DegreesTallied {
                nodes: 4,
                total_degree: 4,
            },
            BuildPhase::OffsetsComputed,
            BuildPhase::PlacementFinished,
        ]
    );
    assert_eq!(graph.node_count(), 4);
}

#[test]
fn test_rebuild_is_identical() {
    let pairs = [(3, 1), (2, 5), (1, 2), (5, 3), (3, 1)];
    let a = CompactGraph::from_pairs(&pairs).unwrap();
    let b = CompactGraph::from_pairs(&pairs).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.neighbors(), b.neighbors());
}
