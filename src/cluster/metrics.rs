//! Cluster statistics and metrics

use crate::cluster::{Cluster, ModularityScorer};
use crate::graph::NodeId;
use std::collections::BTreeMap;

/// Number of central nodes reported per cluster
const TOP_CENTRAL_NODES: usize = 5;

/// Summary statistics of one cluster
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterMetrics {
    pub size: usize,

    /// Weight of edges inside the cluster
    pub intra_weight: f64,

    /// Weight of edges leaving the cluster
    pub inter_weight: f64,

    /// Density: actual edges / potential edges
    pub density: f64,

    /// Contribution to partition modularity (None without a scorer)
    pub modularity: Option<f64>,

    /// Members with the highest intra-cluster degree
    pub central_nodes: Vec<NodeId>,
}

/// Calculate the metrics of a cluster
pub fn calculate_cluster_metrics(
    cluster: &Cluster,
    scorer: Option<&ModularityScorer>,
) -> ClusterMetrics {
    ClusterMetrics {
        size: cluster.len(),
        intra_weight: cluster.intra_weight_sum(),
        inter_weight: cluster.inter_weight_sum(),
        density: calculate_density(cluster),
        modularity: scorer.map(|scorer| scorer.cluster_modularity(cluster)),
        central_nodes: identify_central_nodes(cluster),
    }
}

/// Calculate density (actual edges / potential edges), ignoring self-loops
pub fn calculate_density(cluster: &Cluster) -> f64 {
    let n = cluster.len();
    if n <= 1 {
        return 1.0; // By convention, singleton clusters have density 1
    }

    // Potential edges = n * (n - 1) for directed graph
    let potential_edges = n * (n - 1);

    let actual_edges: usize = cluster
        .intra_edges()
        .iter()
        .map(|(src, row)| row.keys().filter(|dst| *dst != src).count())
        .sum();

    actual_edges as f64 / potential_edges as f64
}

/// Rank members by in- plus out-degree within the cluster
pub fn identify_central_nodes(cluster: &Cluster) -> Vec<NodeId> {
    let mut degrees: BTreeMap<NodeId, usize> =
        cluster.members().iter().map(|&node| (node, 0)).collect();

    for (&src, row) in cluster.intra_edges() {
        for &dst in row.keys().filter(|&&dst| dst != src) {
            *degrees.entry(src).or_default() += 1;
            *degrees.entry(dst).or_default() += 1;
        }
    }

    let mut nodes_by_degree: Vec<(NodeId, usize)> = degrees.into_iter().collect();
    // Sort by degree (descending); the stable sort keeps node order on ties
    nodes_by_degree.sort_by(|a, b| b.1.cmp(&a.1));

    nodes_by_degree
        .into_iter()
        .take(TOP_CENTRAL_NODES)
        .map(|(node, _)| node)
        .collect()
}
