//! Error types for graph construction and clustering

use crate::cluster::ClusterId;
use crate::graph::NodeId;
use thiserror::Error;

/// Result alias for the clustering core
pub type ClusterResult<T> = std::result::Result<T, ClusterError>;

/// Errors raised by the graph store and the clustering core
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClusterError {
    /// The normalization constant is zero, so modularity is undefined
    #[error("graph has no edges: modularity is undefined")]
    DegenerateGraph,

    /// Two clusters that share nodes (or the same cluster twice) were merged
    #[error("cannot merge clusters sharing node {shared}")]
    InvalidMerge { shared: NodeId },

    #[error("a cluster needs at least one member")]
    EmptyCluster,

    #[error("node {0} is not part of the graph")]
    UnknownNode(NodeId),

    #[error("cluster {0} is not part of the partition")]
    UnknownCluster(ClusterId),

    /// Edge weights must be finite and strictly positive
    #[error("invalid weight {weight} on edge {src} -> {dst}")]
    InvalidWeight {
        src: String,
        dst: String,
        weight: f64,
    },

    #[error("partition invariant violated: {0}")]
    PartitionInvariant(String),
}
