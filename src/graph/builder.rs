//! Graph construction module

use crate::error::ClusterResult;
use crate::graph::{NodeId, WeightedGraph};
use std::collections::HashMap;

/// Builder for incrementally constructing a WeightedGraph
pub struct GraphBuilder {
    /// Mapping from string IDs to node indices
    id_to_index: HashMap<String, NodeId>,

    /// Node string IDs
    node_ids: Vec<String>,

    /// Pending edges, validated on build
    edges: Vec<(NodeId, NodeId, f64)>,
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::with_capacity(0)
    }
}

impl GraphBuilder {
    /// Create a new graph builder with the given node capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            id_to_index: HashMap::with_capacity(capacity),
            node_ids: Vec::with_capacity(capacity),
            edges: Vec::new(),
        }
    }

    /// Get or create a node ID for the given string ID
    pub fn get_or_create_node(&mut self, id: &str) -> NodeId {
        if let Some(&idx) = self.id_to_index.get(id) {
            return idx;
        }

        let idx = NodeId(self.node_ids.len() as u32);
        self.id_to_index.insert(id.to_string(), idx);
        self.node_ids.push(id.to_string());
        idx
    }

    /// Add a weighted edge; a later edge between the same pair overwrites it
    pub fn add_edge(&mut self, src_id: &str, dst_id: &str, weight: f64) -> &mut Self {
        let src_idx = self.get_or_create_node(src_id);
        let dst_idx = self.get_or_create_node(dst_id);
        self.edges.push((src_idx, dst_idx, weight));
        self
    }

    /// Add an edge of weight 1
    pub fn add_unweighted_edge(&mut self, src_id: &str, dst_id: &str) -> &mut Self {
        self.add_edge(src_id, dst_id, 1.0)
    }

    /// Build the graph, rejecting invalid weights
    pub fn build(self) -> ClusterResult<WeightedGraph> {
        let mut graph = WeightedGraph::with_capacity(self.node_ids.len(), self.edges.len());

        // Registering labels first keeps builder handles valid in the graph
        for label in &self.node_ids {
            graph.add_node(label);
        }

        for (src, dst, weight) in self.edges {
            graph.add_edge(&self.node_ids[src.index()], &self.node_ids[dst.index()], weight)?;
        }

        log::debug!(
            "Built graph with {} nodes and {} edges",
            graph.node_count(),
            graph.total_edge_count()
        );

        Ok(graph)
    }
}
