//! Route planning over the venue graph.
//!
//! Dijkstra shortest-path search producing the ordered node sequence the
//! route tracker follows. Edge weights are physical distances, so the
//! cheapest route is the shortest walk.

use crate::graph::{NodeId, VenueGraph};
use log::{debug, trace};
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

/// A node in the Dijkstra frontier
#[derive(Clone, Debug)]
struct FrontierNode {
    id: NodeId,
    cost: f32,
}

impl Eq for FrontierNode {}

impl PartialEq for FrontierNode {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Ord for FrontierNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap behavior
        other
            .cost
            .partial_cmp(&self.cost)
            .unwrap_or(Ordering::Equal)
    }
}

impl PartialOrd for FrontierNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Result of a planning attempt
#[derive(Clone, Debug)]
pub struct PlanResult {
    /// Ordered node sequence from start to goal (empty if no route found)
    pub path: Vec<NodeId>,
    /// Total traversal cost
    pub cost: f32,
    /// Number of nodes expanded during search
    pub nodes_expanded: usize,
    /// Whether a route was found
    pub success: bool,
    /// Reason for failure (if any)
    pub failure_reason: Option<PlanFailure>,
}

impl PlanResult {
    fn failed(reason: PlanFailure, nodes_expanded: usize) -> Self {
        Self {
            path: Vec::new(),
            cost: f32::INFINITY,
            nodes_expanded,
            success: false,
            failure_reason: Some(reason),
        }
    }

    /// Number of nodes along the route
    pub fn len(&self) -> usize {
        self.path.len()
    }

    /// Whether the route is empty
    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }
}

/// Reason for plan failure
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PlanFailure {
    /// Start node is not in the graph
    UnknownStart,
    /// Goal node is not in the graph
    UnknownGoal,
    /// No directed path exists from start to goal
    NoRoute,
}

/// Dijkstra route planner borrowing a venue graph
pub struct RoutePlanner<'a> {
    graph: &'a VenueGraph,
}

impl<'a> RoutePlanner<'a> {
    /// Create a planner for the given graph
    pub fn new(graph: &'a VenueGraph) -> Self {
        Self { graph }
    }

    /// Find the cheapest route from `start` to `goal`.
    pub fn plan(&self, start: NodeId, goal: NodeId) -> PlanResult {
        trace!("[Planner] plan: start={} goal={}", start, goal);

        if !self.graph.contains_node(start) {
            debug!("[Planner] FAILED: UnknownStart ({})", start);
            return PlanResult::failed(PlanFailure::UnknownStart, 0);
        }
        if !self.graph.contains_node(goal) {
            debug!("[Planner] FAILED: UnknownGoal ({})", goal);
            return PlanResult::failed(PlanFailure::UnknownGoal, 0);
        }

        let mut frontier = BinaryHeap::new();
        let mut came_from: HashMap<NodeId, NodeId> = HashMap::new();
        let mut best_cost: HashMap<NodeId, f32> = HashMap::new();

        frontier.push(FrontierNode {
            id: start,
            cost: 0.0,
        });
        best_cost.insert(start, 0.0);

        let mut nodes_expanded = 0;

        while let Some(current) = frontier.pop() {
            nodes_expanded += 1;

            if current.id == goal {
                return self.reconstruct(came_from, start, goal, current.cost, nodes_expanded);
            }

            // Stale frontier entry for a node already settled cheaper
            if current.cost > best_cost.get(&current.id).copied().unwrap_or(f32::INFINITY) {
                continue;
            }

            for edge in self.graph.edges_from(current.id) {
                let tentative = current.cost + edge.weight;
                let known = best_cost.get(&edge.to).copied().unwrap_or(f32::INFINITY);
                if tentative < known {
                    best_cost.insert(edge.to, tentative);
                    came_from.insert(edge.to, current.id);
                    frontier.push(FrontierNode {
                        id: edge.to,
                        cost: tentative,
                    });
                }
            }
        }

        debug!(
            "[Planner] FAILED: NoRoute after expanding {} nodes",
            nodes_expanded
        );
        PlanResult::failed(PlanFailure::NoRoute, nodes_expanded)
    }

    fn reconstruct(
        &self,
        came_from: HashMap<NodeId, NodeId>,
        start: NodeId,
        goal: NodeId,
        cost: f32,
        nodes_expanded: usize,
    ) -> PlanResult {
        let mut path = vec![goal];
        let mut current = goal;
        while current != start {
            current = came_from[&current];
            path.push(current);
        }
        path.reverse();

        trace!(
            "[Planner] SUCCESS: {} nodes, cost={:.2}, expanded={}",
            path.len(),
            cost,
            nodes_expanded
        );

        PlanResult {
            path,
            cost,
            nodes_expanded,
            success: true,
            failure_reason: None,
        }
    }
}
