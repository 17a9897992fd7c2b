//! Maintenance-time connectivity scenarios over realistic venue layouts.

use marga_graph::{ConnectivityAnalyzer, NodeKind, RoutePlanner, VenueGraph, VenueNode};

/// Bidirectional edge between every node pair.
fn complete_venue(n: u32) -> VenueGraph {
    let mut graph = VenueGraph::new();
    for id in 0..n {
        graph
            .add_node(VenueNode::new(id, NodeKind::Decision))
            .unwrap();
    }
    for a in 0..n {
        for b in (a + 1)..n {
            graph.add_edge(a, b, false, 1.0).unwrap();
        }
    }
    graph
}

#[test]
fn complete_venues_are_connected() {
    for n in 1..8 {
        let graph = complete_venue(n);
        let analyzer = ConnectivityAnalyzer::new(&graph);
        assert!(analyzer.is_connected());
        assert!(analyzer.discontinuities().is_empty());
    }
}

#[test]
fn one_severed_direction_is_reported_exactly() {
    // Removing every outgoing edge of one node (making it a sink) breaks
    // exactly the (sink, other) pairs -- but removing a single directed edge
    // from a complete venue of 2 breaks exactly that ordered pair.
    let mut graph = complete_venue(2);
    graph.remove_edge(1, 0).unwrap();

    let analyzer = ConnectivityAnalyzer::new(&graph);
    assert!(!analyzer.is_connected());
    assert_eq!(analyzer.discontinuities(), vec![(1, 0)]);
}

#[test]
fn dead_end_destination_lists_all_unreachable_targets() {
    // Corridor loop A -> B -> C -> A with a one-way spur B -> D.
    // D is a trap: you can get in but not out.
    let mut graph = VenueGraph::new();
    let labels = ["A", "B", "C", "D"];
    for (id, label) in labels.iter().enumerate() {
        graph
            .add_node(VenueNode::with_label(
                id as u32,
                NodeKind::Decision,
                label,
            ))
            .unwrap();
    }
    graph.add_edge(0, 1, true, 1.0).unwrap();
    graph.add_edge(1, 2, true, 1.0).unwrap();
    graph.add_edge(2, 0, true, 1.0).unwrap();
    graph.add_edge(1, 3, true, 1.0).unwrap();

    let analyzer = ConnectivityAnalyzer::new(&graph);
    assert!(!analyzer.is_connected());
    assert_eq!(analyzer.discontinuities(), vec![(3, 0), (3, 1), (3, 2)]);

    // Planning still works into the trap, and reports the way back as broken
    let planner = RoutePlanner::new(&graph);
    assert_eq!(planner.plan(0, 3).path, vec![0, 1, 3]);
    assert!(!planner.plan(3, 0).success);
}

#[test]
fn maintainer_edit_then_recheck() {
    // Fixing the dead end by adding the missing return edge clears the report.
    let mut graph = VenueGraph::new();
    for id in 0..4 {
        graph
            .add_node(VenueNode::new(id, NodeKind::Decision))
            .unwrap();
    }
    graph.add_edge(0, 1, true, 1.0).unwrap();
    graph.add_edge(1, 2, true, 1.0).unwrap();
    graph.add_edge(2, 0, true, 1.0).unwrap();
    graph.add_edge(1, 3, true, 1.0).unwrap();

    assert!(!ConnectivityAnalyzer::new(&graph).is_connected());

    graph.add_edge(3, 1, true, 1.0).unwrap();

    let analyzer = ConnectivityAnalyzer::new(&graph);
    assert!(analyzer.is_connected());
    assert!(analyzer.discontinuities().is_empty());
}

#[test]
fn discontinuity_report_is_reproducible() {
    let mut graph = VenueGraph::new();
    for id in 0..6 {
        graph
            .add_node(VenueNode::new(id, NodeKind::Decision))
            .unwrap();
    }
    // Two disjoint islands: {0,1,2} and {3,4,5}
    graph.add_edge(0, 1, false, 1.0).unwrap();
    graph.add_edge(1, 2, false, 1.0).unwrap();
    graph.add_edge(3, 4, false, 1.0).unwrap();
    graph.add_edge(4, 5, false, 1.0).unwrap();

    let analyzer = ConnectivityAnalyzer::new(&graph);
    let report = analyzer.discontinuities();

    // 3 nodes per island, each missing 3 targets on the other side
    assert_eq!(report.len(), 18);
    // Source-ascending, target-ascending ordering
    assert_eq!(&report[..3], &[(0, 3), (0, 4), (0, 5)]);
    assert_eq!(report, analyzer.discontinuities());
}
