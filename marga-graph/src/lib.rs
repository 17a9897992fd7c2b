//! # Marga-Graph: Venue Topology and Route Planning
//!
//! Models an indoor venue as a directed, weighted graph of navigable nodes
//! (decision points, beacon anchors, destinations) and provides the
//! maintenance-time and planning algorithms that run over it.
//!
//! ## Quick Start
//!
//! ```rust
//! use marga_graph::{ConnectivityAnalyzer, NodeKind, RoutePlanner, VenueGraph, VenueNode};
//!
//! # fn main() -> marga_graph::Result<()> {
//! let mut graph = VenueGraph::new();
//! graph.add_node(VenueNode::with_label(0, NodeKind::Decision, "Lobby"))?;
//! graph.add_node(VenueNode::with_label(1, NodeKind::Destination, "Cafe"))?;
//! graph.add_edge(0, 1, false, 12.5)?;
//!
//! // Maintenance-time check: every node pair must be mutually reachable
//! let analyzer = ConnectivityAnalyzer::new(&graph);
//! assert!(analyzer.is_connected());
//!
//! // Plan a route for the tracker to follow
//! let plan = RoutePlanner::new(&graph).plan(0, 1);
//! assert_eq!(plan.path, vec![0, 1]);
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - [`graph`]: The [`VenueGraph`] structure and its construction contract
//! - [`connectivity`]: Full reachability analysis and discontinuity reporting
//! - [`planner`]: Dijkstra route planning over edge weights
//!
//! The graph is constructed once when venue data is loaded and is read-only
//! during navigation; maintainer edits must re-run the
//! [`ConnectivityAnalyzer`] afterwards.

pub mod connectivity;
pub mod error;
pub mod graph;
pub mod planner;

pub use connectivity::ConnectivityAnalyzer;
pub use error::{GraphError, Result};
pub use graph::{EdgeTo, NodeId, NodeKind, VenueGraph, VenueNode};
pub use planner::{PlanFailure, PlanResult, RoutePlanner};
