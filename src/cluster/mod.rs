//! Cluster representation and modularity-driven clustering

pub mod agglomerative;
pub mod metrics;
pub mod modularity;
pub mod partition;

pub use agglomerative::{
    best_merge, AgglomerativeClusterer, ClusteringOutcome, ClusteringState, MergeCandidate,
    MergeRecord, Phase,
};
pub use metrics::ClusterMetrics;
pub use modularity::{edges_into, ModularityScorer};
pub use partition::{ClusterId, Partition};

use crate::error::{ClusterError, ClusterResult};
use crate::graph::{NodeId, WeightedGraph};
use std::collections::{BTreeMap, BTreeSet};

/// Per-member edge map: member node -> (other node -> weight)
pub type EdgeMap = BTreeMap<NodeId, BTreeMap<NodeId, f64>>;

/// One cell of a partition.
///
/// The edge maps are derived from the graph and the member set when the
/// cluster is built and never change afterwards. Merging builds a new
/// cluster.
#[derive(Debug, Clone, PartialEq)]
pub struct Cluster {
    /// Member nodes
    members: BTreeSet<NodeId>,

    /// Edges whose source and destination are both members
    intra_edges: EdgeMap,

    /// Edges leaving the cluster from a member
    inter_edges: EdgeMap,

    /// Weight of every edge that ends at a member
    in_strength: f64,
}

impl Cluster {
    /// Build a cluster by classifying the outgoing edges of every member
    pub fn build<I>(members: I, graph: &WeightedGraph) -> ClusterResult<Self>
    where
        I: IntoIterator<Item = NodeId>,
    {
        let members: BTreeSet<NodeId> = members.into_iter().collect();
        if members.is_empty() {
            return Err(ClusterError::EmptyCluster);
        }

        let mut intra_edges = EdgeMap::new();
        let mut inter_edges = EdgeMap::new();
        let mut in_strength = 0.0;

        for &src in &members {
            if !graph.contains_node(src) {
                return Err(ClusterError::UnknownNode(src));
            }

            let mut intra_row = BTreeMap::new();
            let mut inter_row = BTreeMap::new();
            for (dst, weight) in graph.out_edges(src) {
                if members.contains(&dst) {
                    intra_row.insert(dst, weight);
                } else {
                    inter_row.insert(dst, weight);
                }
            }

            intra_edges.insert(src, intra_row);
            inter_edges.insert(src, inter_row);
            in_strength += graph.in_strength(src);
        }

        Ok(Self {
            members,
            intra_edges,
            inter_edges,
            in_strength,
        })
    }

    /// Build the cluster holding the members of both inputs
    pub fn merge(a: &Cluster, b: &Cluster, graph: &WeightedGraph) -> ClusterResult<Self> {
        if let Some(&shared) = a.members.intersection(&b.members).next() {
            return Err(ClusterError::InvalidMerge { shared });
        }

        Self::build(a.members.union(&b.members).copied(), graph)
    }

    pub fn members(&self) -> &BTreeSet<NodeId> {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Always false for a built cluster
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.members.contains(&node)
    }

    pub fn is_disjoint(&self, other: &Cluster) -> bool {
        self.members.is_disjoint(&other.members)
    }

    pub fn intra_edges(&self) -> &EdgeMap {
        &self.intra_edges
    }

    pub fn inter_edges(&self) -> &EdgeMap {
        &self.inter_edges
    }

    /// Total weight of edges inside the cluster
    pub fn intra_weight_sum(&self) -> f64 {
        sum_weights(&self.intra_edges)
    }

    /// Total weight of edges leaving the cluster
    pub fn inter_weight_sum(&self) -> f64 {
        sum_weights(&self.inter_edges)
    }

    /// Total weight of edges starting at a member
    pub fn out_strength(&self) -> f64 {
        self.intra_weight_sum() + self.inter_weight_sum()
    }

    pub fn in_strength(&self) -> f64 {
        self.in_strength
    }
}

fn sum_weights(edges: &EdgeMap) -> f64 {
    edges.values().flat_map(|row| row.values()).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::fixtures;

    fn pair_graph() -> WeightedGraph {
        let mut graph = WeightedGraph::new();
        graph.add_edge("A", "B", 1.0).unwrap();
        graph.add_edge("B", "A", 1.0).unwrap();
        graph
    }

    fn ids(graph: &WeightedGraph, labels: &[&str]) -> Vec<NodeId> {
        labels.iter().map(|l| graph.node_id(l).unwrap()).collect()
    }

    #[test]
    fn singleton_edges_are_all_boundary() {
        let graph = pair_graph();
        let a = graph.node_id("A").unwrap();
        let cluster = Cluster::build([a], &graph).unwrap();

        assert_eq!(cluster.intra_weight_sum(), 0.0);
        assert_eq!(cluster.inter_weight_sum(), 1.0);
        assert_eq!(cluster.in_strength(), 1.0);
        assert!(cluster.intra_edges()[&a].is_empty());
    }

    #[test]
    fn merging_turns_boundary_edges_inward() {
        let graph = pair_graph();
        let [a, b] = [graph.node_id("A").unwrap(), graph.node_id("B").unwrap()];
        let ca = Cluster::build([a], &graph).unwrap();
        let cb = Cluster::build([b], &graph).unwrap();

        let merged = Cluster::merge(&ca, &cb, &graph).unwrap();
        assert_eq!(merged.len(), 2);
        assert_eq!(merged.intra_weight_sum(), 2.0);
        assert_eq!(merged.inter_weight_sum(), 0.0);
        assert!(merged.contains(a) && merged.contains(b));
    }

    #[test]
    fn rebuilding_is_idempotent() {
        let graph = fixtures::two_communities().unwrap();
        let members = ids(&graph, &["A", "B", "C", "E", "H"]);

        let first = Cluster::build(members.clone(), &graph).unwrap();
        let second = Cluster::build(members.into_iter().rev(), &graph).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn merging_overlapping_clusters_fails() {
        let graph = fixtures::two_communities().unwrap();
        let left = Cluster::build(ids(&graph, &["A", "B"]), &graph).unwrap();
        let right = Cluster::build(ids(&graph, &["B", "C"]), &graph).unwrap();

        let err = Cluster::merge(&left, &right, &graph).unwrap_err();
        assert_eq!(
            err,
            ClusterError::InvalidMerge {
                shared: graph.node_id("B").unwrap()
            }
        );
        assert!(Cluster::merge(&left, &left, &graph).is_err());
    }

    #[test]
    fn empty_and_foreign_members_are_rejected() {
        let graph = pair_graph();
        assert_eq!(
            Cluster::build(std::iter::empty(), &graph),
            Err(ClusterError::EmptyCluster)
        );
        assert_eq!(
            Cluster::build([NodeId(42)], &graph),
            Err(ClusterError::UnknownNode(NodeId(42)))
        );
    }

    #[test]
    fn dense_group_keeps_one_outgoing_bridge() {
        let graph = fixtures::two_communities().unwrap();
        let group = Cluster::build(ids(&graph, &["A", "B", "C", "D", "E", "F"]), &graph).unwrap();

        assert_eq!(group.intra_weight_sum(), 14.0);
        assert_eq!(group.inter_weight_sum(), 1.0);
        assert_eq!(group.in_strength(), 15.0);
        let e = graph.node_id("E").unwrap();
        let h = graph.node_id("H").unwrap();
        assert_eq!(group.inter_edges()[&e].get(&h), Some(&1.0));
    }
}
