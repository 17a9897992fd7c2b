//! Error types for Marga-Graph

use crate::graph::NodeId;

/// Result type alias
pub type Result<T> = std::result::Result<T, GraphError>;

/// Graph construction errors
///
/// All variants are fatal to the single failing operation only; the graph is
/// left unchanged (no partial edge is ever added).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GraphError {
    /// A node with this identifier already exists
    #[error("Duplicate node id {0}")]
    DuplicateNode(NodeId),

    /// An operation referenced a node id that is not in the graph
    #[error("Unknown node id {0}")]
    InvalidNodeReference(NodeId),

    /// Edge weights must be non-negative
    #[error("Invalid weight {weight} for edge {from} -> {to}")]
    InvalidWeight {
        /// Source node of the rejected edge
        from: NodeId,
        /// Target node of the rejected edge
        to: NodeId,
        /// The offending weight
        weight: f32,
    },
}
