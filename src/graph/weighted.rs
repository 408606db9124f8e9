//! Hashed weighted directed graph used as the clustering input

use crate::error::{ClusterError, ClusterResult};
use petgraph::graphmap::DiGraphMap;
use petgraph::Direction;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Interned handle for a node label
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(pub u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

/// Directed graph with `f64` edge weights and string node labels.
///
/// Nodes iterate in insertion order, which gives the clusterer a
/// deterministic enumeration order. Edge lookups are O(1) expected.
#[derive(Debug, Clone)]
pub struct WeightedGraph {
    /// Adjacency keyed by interned node handles
    adjacency: DiGraphMap<NodeId, f64>,

    /// Mapping from labels to node handles
    id_to_index: HashMap<String, NodeId>,

    /// Node labels, indexed by `NodeId`
    node_ids: Vec<String>,
}

impl Default for WeightedGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl WeightedGraph {
    pub fn new() -> Self {
        Self::with_capacity(0, 0)
    }

    /// Create an empty graph with pre-allocated capacity
    pub fn with_capacity(node_count: usize, edge_count: usize) -> Self {
        Self {
            adjacency: DiGraphMap::with_capacity(node_count, edge_count),
            id_to_index: HashMap::with_capacity(node_count),
            node_ids: Vec::with_capacity(node_count),
        }
    }

    /// Get or create the node with the given label
    pub fn add_node(&mut self, label: &str) -> NodeId {
        if let Some(&id) = self.id_to_index.get(label) {
            return id;
        }

        let id = NodeId(self.node_ids.len() as u32);
        self.id_to_index.insert(label.to_string(), id);
        self.node_ids.push(label.to_string());
        self.adjacency.add_node(id);
        id
    }

    /// Insert or overwrite the directed edge `src -> dst`, creating both
    /// endpoints if needed.
    pub fn add_edge(&mut self, src: &str, dst: &str, weight: f64) -> ClusterResult<()> {
        if !weight.is_finite() || weight <= 0.0 {
            return Err(ClusterError::InvalidWeight {
                src: src.to_string(),
                dst: dst.to_string(),
                weight,
            });
        }

        let src_idx = self.add_node(src);
        let dst_idx = self.add_node(dst);

        self.adjacency.add_edge(src_idx, dst_idx, weight);
        Ok(())
    }

    pub fn node_id(&self, label: &str) -> Option<NodeId> {
        self.id_to_index.get(label).copied()
    }

    pub fn label(&self, node: NodeId) -> Option<&str> {
        self.node_ids.get(node.index()).map(String::as_str)
    }

    /// Label for display, falling back to the handle for foreign ids
    pub fn display_label(&self, node: NodeId) -> String {
        self.label(node)
            .map_or_else(|| node.to_string(), str::to_string)
    }

    pub fn contains_node(&self, node: NodeId) -> bool {
        self.adjacency.contains_node(node)
    }

    /// All nodes in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.adjacency.nodes()
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.node_count()
    }

    /// Number of directed edges stored (not their weight)
    pub fn total_edge_count(&self) -> usize {
        self.adjacency.edge_count()
    }

    /// Sum of all directed edge weights, recomputed from the stored edges
    pub fn total_weight(&self) -> f64 {
        self.adjacency.all_edges().map(|(_, _, &weight)| weight).sum()
    }

    /// Weight of `src -> dst`, or 0 when there is no such edge
    pub fn edge_weight(&self, src: NodeId, dst: NodeId) -> f64 {
        self.adjacency.edge_weight(src, dst).copied().unwrap_or(0.0)
    }

    /// Outgoing edges of a node as `(destination, weight)`
    pub fn out_edges(&self, node: NodeId) -> impl Iterator<Item = (NodeId, f64)> + '_ {
        self.adjacency.edges(node).map(|(_, dst, &weight)| (dst, weight))
    }

    /// Total weight of edges ending at `node`, self-loop included once
    pub fn in_strength(&self, node: NodeId) -> f64 {
        let incoming: f64 = self
            .adjacency
            .neighbors_directed(node, Direction::Incoming)
            .filter(|&src| src != node)
            .map(|src| self.edge_weight(src, node))
            .sum();

        incoming + self.edge_weight(node, node)
    }
}
