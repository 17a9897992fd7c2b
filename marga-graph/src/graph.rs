//! Venue topology: navigable nodes and directed weighted edges.

use crate::error::{GraphError, Result};
use std::collections::BTreeMap;

/// Stable node identifier, unique for the lifetime of a loaded venue.
pub type NodeId = u32;

/// Semantic role of a node in the venue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Corridor junction or other point where routes branch
    Decision,
    /// Navigable endpoint (room, counter, exit)
    Destination,
    /// Node anchored to a physical beacon installation
    BeaconAnchor,
}

/// A navigable point in the venue.
#[derive(Debug, Clone)]
pub struct VenueNode {
    /// Stable identifier
    pub id: NodeId,
    /// Semantic role
    pub kind: NodeKind,
    /// Human-readable label for diagnostics and UI
    pub label: Option<String>,
}

impl VenueNode {
    /// Create an unlabeled node
    pub fn new(id: NodeId, kind: NodeKind) -> Self {
        Self {
            id,
            kind,
            label: None,
        }
    }

    /// Create a labeled node
    pub fn with_label(id: NodeId, kind: NodeKind, label: &str) -> Self {
        Self {
            id,
            kind,
            label: Some(label.to_string()),
        }
    }
}

/// Outgoing edge entry: target node plus traversal cost.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeTo {
    /// Target node
    pub to: NodeId,
    /// Traversal cost (physical distance in meters); always non-negative
    pub weight: f32,
}

/// Directed, weighted graph of navigable venue nodes.
///
/// Owned by the venue session: constructed once when venue data is loaded,
/// read-only during navigation, mutable only in maintainer flows (which must
/// re-run the connectivity analyzer afterwards).
///
/// A bidirectional path is represented as two directed edges. The graph may
/// be disconnected; that is a reportable condition for the connectivity
/// analyzer, not an invariant violation.
///
/// Storage is keyed by node id in ascending order so that every traversal
/// and report produced from this graph is reproducible.
#[derive(Debug, Clone, Default)]
pub struct VenueGraph {
    nodes: BTreeMap<NodeId, VenueNode>,
    adjacency: BTreeMap<NodeId, Vec<EdgeTo>>,
}

impl VenueGraph {
    /// Create an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node to the graph.
    ///
    /// Fails with [`GraphError::DuplicateNode`] if the id is already in use;
    /// the existing node is never silently overwritten.
    pub fn add_node(&mut self, node: VenueNode) -> Result<()> {
        if self.nodes.contains_key(&node.id) {
            return Err(GraphError::DuplicateNode(node.id));
        }
        self.adjacency.insert(node.id, Vec::new());
        self.nodes.insert(node.id, node);
        Ok(())
    }

    /// Add an edge between two known nodes.
    ///
    /// With `directed == false` the edge is inserted in both directions.
    /// Re-adding an existing directed edge updates its weight in place.
    ///
    /// Fails with [`GraphError::InvalidNodeReference`] when either endpoint
    /// is unknown and [`GraphError::InvalidWeight`] when `weight` is negative
    /// or non-finite. Validation happens before any mutation, so a failed
    /// call leaves the graph unchanged even for bidirectional inserts.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId, directed: bool, weight: f32) -> Result<()> {
        if !self.nodes.contains_key(&from) {
            return Err(GraphError::InvalidNodeReference(from));
        }
        if !self.nodes.contains_key(&to) {
            return Err(GraphError::InvalidNodeReference(to));
        }
        if !weight.is_finite() || weight < 0.0 {
            return Err(GraphError::InvalidWeight { from, to, weight });
        }

        self.insert_directed(from, to, weight);
        if !directed {
            self.insert_directed(to, from, weight);
        }
        Ok(())
    }

    /// Remove the directed edge `from -> to`.
    ///
    /// Returns whether an edge was actually removed; removing an absent edge
    /// is not an error. Fails with [`GraphError::InvalidNodeReference`] when
    /// either endpoint is unknown.
    pub fn remove_edge(&mut self, from: NodeId, to: NodeId) -> Result<bool> {
        if !self.nodes.contains_key(&from) {
            return Err(GraphError::InvalidNodeReference(from));
        }
        if !self.nodes.contains_key(&to) {
            return Err(GraphError::InvalidNodeReference(to));
        }

        let edges = self.adjacency.get_mut(&from).expect("node has adjacency");
        let before = edges.len();
        edges.retain(|e| e.to != to);
        Ok(edges.len() != before)
    }

    /// Iterate over the successor node ids of `node`, in insertion order.
    ///
    /// Unknown nodes yield an empty iterator.
    pub fn neighbors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.edges_from(node).iter().map(|e| e.to)
    }

    /// Outgoing edges of `node` with their weights; empty for unknown nodes.
    pub fn edges_from(&self, node: NodeId) -> &[EdgeTo] {
        self.adjacency.get(&node).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Look up a node by id
    pub fn node(&self, id: NodeId) -> Option<&VenueNode> {
        self.nodes.get(&id)
    }

    /// Whether a node id is present
    pub fn contains_node(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Node ids in ascending order
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.keys().copied()
    }

    /// Number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of directed edges
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(Vec::len).sum()
    }

    /// Whether the graph has no nodes
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn insert_directed(&mut self, from: NodeId, to: NodeId, weight: f32) {
        let edges = self.adjacency.get_mut(&from).expect("validated endpoint");
        if let Some(existing) = edges.iter_mut().find(|e| e.to == to) {
            existing.weight = weight;
        } else {
            edges.push(EdgeTo { to, weight });
        }
    }
}
