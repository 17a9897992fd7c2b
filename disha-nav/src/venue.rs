//! Built-in demo venue.
//!
//! A small gallery floor used by the daemon and the integration tests, so
//! the whole stack runs without venue data files or beacon hardware. Venue
//! data parsing stays external to the navigation core; this module plays
//! the role of that provider.

use dipa_io::config::{BeaconSpec, ScriptStep, VisibleBeacon};
use dipa_io::{BeaconId, DipaConfig, Proximity};
use marga_graph::{NodeId, NodeKind, VenueGraph, VenueNode};
use std::collections::HashMap;
use std::sync::Arc;

/// A loaded venue: graph, beacon placement, and the demo journey endpoints.
pub struct DemoVenue {
    /// Walkable topology (read-only during navigation)
    pub graph: Arc<VenueGraph>,
    /// Static beacon-to-node association
    pub beacon_map: HashMap<BeaconId, NodeId>,
    /// Journey start node
    pub start: NodeId,
    /// Journey destination node
    pub goal: NodeId,
}

impl DemoVenue {
    /// Label of a node, falling back to its id
    pub fn label(&self, id: NodeId) -> String {
        self.graph
            .node(id)
            .and_then(|n| n.label.clone())
            .unwrap_or_else(|| id.to_string())
    }
}

/// Build the demo gallery floor.
///
/// ```text
/// Lobby (0) -- Atrium (1) -- East corridor (2) -- Gallery (3)
///                  |
///               Cafe (4)
/// ```
///
/// All corridors are walkable in both directions, so the graph is strongly
/// connected. One beacon is anchored at every node (major 200).
pub fn demo_venue() -> DemoVenue {
    let mut graph = VenueGraph::new();

    let nodes = [
        (0, NodeKind::BeaconAnchor, "Lobby"),
        (1, NodeKind::Decision, "Atrium"),
        (2, NodeKind::Decision, "East corridor"),
        (3, NodeKind::Destination, "Gallery"),
        (4, NodeKind::Destination, "Cafe"),
    ];
    for (id, kind, label) in nodes {
        graph
            .add_node(VenueNode::with_label(id, kind, label))
            .expect("demo node ids are unique");
    }

    let edges = [(0, 1, 18.0), (1, 2, 25.0), (2, 3, 12.0), (1, 4, 20.0)];
    for (from, to, meters) in edges {
        graph
            .add_edge(from, to, false, meters)
            .expect("demo edges reference known nodes");
    }

    let beacon_map = (0..5)
        .map(|id| (BeaconId::new(200, id as u16 + 1), id))
        .collect();

    DemoVenue {
        graph: Arc::new(graph),
        beacon_map,
        start: 0,
        goal: 3,
    }
}

/// Interface configuration scripting a walk along the demo journey.
///
/// The timeline includes one flicker back to the lobby beacon between the
/// atrium and the corridor, which the tracker must hold position through.
pub fn demo_interface_config() -> DipaConfig {
    let mut config = DipaConfig::mock_defaults();

    config.mock.roster = vec![
        BeaconSpec {
            major: 200,
            minor: 1,
            base_rssi: -50,
        },
        BeaconSpec {
            major: 200,
            minor: 2,
            base_rssi: -54,
        },
        BeaconSpec {
            major: 200,
            minor: 3,
            base_rssi: -55,
        },
        BeaconSpec {
            major: 200,
            minor: 4,
            base_rssi: -52,
        },
    ];

    let step = |index: usize, proximity: Proximity| ScriptStep {
        hold_ms: 1500,
        visible: vec![VisibleBeacon {
            index,
            proximity,
            rssi_offset: 0,
        }],
    };

    config.mock.script = vec![
        step(0, Proximity::Immediate),
        step(1, Proximity::Near),
        // Cross-talk: the lobby beacon briefly reads strongest again
        step(0, Proximity::Near),
        step(2, Proximity::Near),
        step(3, Proximity::Immediate),
    ];
    config.mock.loop_script = false;

    config
}
