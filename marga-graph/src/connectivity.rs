//! Reachability analysis over a venue graph.
//!
//! Maintenance-time validation that the venue's walkable topology is fully
//! traversable: every ordered pair of distinct nodes must be connected by a
//! directed path. Broken pairs are enumerated exhaustively so maintainers
//! see exactly which links to fix, not just a boolean.

use crate::graph::{NodeId, VenueGraph};
use log::debug;
use std::collections::{HashSet, VecDeque};

/// An ordered node pair with no directed path from source to target.
///
/// The source (unreachable-from) node comes first.
pub type Discontinuity = (NodeId, NodeId);

/// Reachability analyzer borrowing a venue graph.
///
/// Per-source breadth-first search, O(V·(V+E)) over the whole graph. Venue
/// graphs are small (tens to low hundreds of nodes), so the naive sweep is
/// fine; a single Tarjan/Kosaraju SCC pass could replace it behind the same
/// contract if that ever stops being true.
pub struct ConnectivityAnalyzer<'a> {
    graph: &'a VenueGraph,
}

impl<'a> ConnectivityAnalyzer<'a> {
    /// Create an analyzer for the given graph
    pub fn new(graph: &'a VenueGraph) -> Self {
        Self { graph }
    }

    /// Whether a directed path exists from `from` to `to`.
    ///
    /// Breadth-first search from `from`, stopping at the first encounter of
    /// `to`. Unknown endpoints are never reachable, except that every known
    /// node reaches itself.
    pub fn reachable(&self, from: NodeId, to: NodeId) -> bool {
        if !self.graph.contains_node(from) || !self.graph.contains_node(to) {
            return false;
        }
        if from == to {
            return true;
        }

        let mut visited: HashSet<NodeId> = HashSet::new();
        let mut queue = VecDeque::new();
        visited.insert(from);
        queue.push_back(from);

        while let Some(current) = queue.pop_front() {
            for next in self.graph.neighbors(current) {
                if next == to {
                    return true;
                }
                if visited.insert(next) {
                    queue.push_back(next);
                }
            }
        }
        false
    }

    /// Whether every ordered pair of distinct nodes is reachable, i.e. the
    /// graph is strongly connected under directed-edge semantics.
    ///
    /// Short-circuits on the first node whose reachable set does not cover
    /// the graph. Graphs with zero or one node are trivially connected.
    pub fn is_connected(&self) -> bool {
        let total = self.graph.node_count();
        for source in self.graph.node_ids() {
            let reach = self.reachable_set(source);
            if reach.len() < total {
                debug!(
                    "[Connectivity] node {} reaches only {}/{} nodes",
                    source,
                    reach.len(),
                    total
                );
                return false;
            }
        }
        true
    }

    /// The complete list of failing ordered pairs `(source, target)`.
    ///
    /// Does not short-circuit: the full list goes to maintainer diagnostics.
    /// Pairs are ordered by source id ascending, then target id ascending,
    /// so the output is reproducible across calls on an unmodified graph.
    pub fn discontinuities(&self) -> Vec<Discontinuity> {
        let mut broken = Vec::new();
        for source in self.graph.node_ids() {
            let reach = self.reachable_set(source);
            for target in self.graph.node_ids() {
                if target != source && !reach.contains(&target) {
                    broken.push((source, target));
                }
            }
        }
        if !broken.is_empty() {
            debug!("[Connectivity] {} broken pairs", broken.len());
        }
        broken
    }

    /// All nodes reachable from `source`, including `source` itself.
    fn reachable_set(&self, source: NodeId) -> HashSet<NodeId> {
        let mut visited: HashSet<NodeId> = HashSet::new();
        let mut queue = VecDeque::new();
        visited.insert(source);
        queue.push_back(source);

        while let Some(current) = queue.pop_front() {
            for next in self.graph.neighbors(current) {
                if visited.insert(next) {
                    queue.push_back(next);
                }
            }
        }
        visited
    }
}
