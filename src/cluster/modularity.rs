//! Modularity scoring for clusters and candidate merges
//!
//! With `m` the normalization constant, a cluster contributes
//! `intra / m - expected` to the partition modularity, and merging two
//! clusters changes it by
//!
//! ```text
//! delta(c1, c2) = into(c1, c2) / m + into(c2, c1) / m - expected(c1, c2)
//! ```
//!
//! where `into(a, b)` is the weight on edges leaving `a` for a member of `b`.
//! The expected-edge term depends on the [`NullModel`]:
//!
//! - `Directed`: `out * in / m^2` per cluster, `(out1 * in2 + out2 * in1) / m^2`
//!   per merge (Newman's directed modularity).
//! - `Boundary`: `(inter / m)^2` per cluster, `2 * (inter1 / m) * (inter2 / m)`
//!   per merge, using only the weight that leaves each cluster.

use crate::cluster::{Cluster, Partition};
use crate::config::{ClusteringConfig, Normalization, NullModel};
use crate::error::{ClusterError, ClusterResult};
use crate::graph::WeightedGraph;

/// Weight on edges from members of `from` to members of `to`
pub fn edges_into(from: &Cluster, to: &Cluster) -> f64 {
    from.inter_edges()
        .values()
        .flat_map(|row| row.iter())
        .filter(|(dst, _)| to.contains(**dst))
        .map(|(_, weight)| weight)
        .sum()
}

/// Scores clusters and merges against a fixed graph-wide constant `m`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModularityScorer {
    mass: f64,
    null_model: NullModel,
}

impl ModularityScorer {
    /// Fails with `DegenerateGraph` when `m` would be zero
    pub fn new(
        graph: &WeightedGraph,
        normalization: Normalization,
        null_model: NullModel,
    ) -> ClusterResult<Self> {
        let mass = match normalization {
            Normalization::EdgeWeight => graph.total_weight(),
            Normalization::EdgeCount => graph.total_edge_count() as f64,
        };

        if mass <= 0.0 {
            return Err(ClusterError::DegenerateGraph);
        }

        Ok(Self {
            mass,
            null_model,
        })
    }

    pub fn from_config(graph: &WeightedGraph, config: &ClusteringConfig) -> ClusterResult<Self> {
        Self::new(graph, config.normalization, config.null_model)
    }

    /// The normalization constant `m`
    pub fn mass(&self) -> f64 {
        self.mass
    }

    /// Modularity contribution of a single cluster
    pub fn cluster_modularity(&self, cluster: &Cluster) -> f64 {
        let m = self.mass;
        let expected = match self.null_model {
            NullModel::Directed => (cluster.out_strength() / m) * (cluster.in_strength() / m),
            NullModel::Boundary => (cluster.inter_weight_sum() / m).powi(2),
        };

        cluster.intra_weight_sum() / m - expected
    }

    /// Sum of the contributions of every cluster in the partition
    pub fn partition_modularity(&self, partition: &Partition) -> f64 {
        partition
            .iter()
            .map(|(_, cluster)| self.cluster_modularity(cluster))
            .sum()
    }

    /// Predicted modularity change from merging `c1` and `c2`.
    ///
    /// Returns `None` when the clusters share nodes, which includes passing
    /// the same cluster twice: such pairs are never merge candidates.
    pub fn delta(&self, c1: &Cluster, c2: &Cluster) -> Option<f64> {
        if !c1.is_disjoint(c2) {
            return None;
        }

        let m = self.mass;
        let observed = edges_into(c1, c2) / m + edges_into(c2, c1) / m;
        let expected = match self.null_model {
            NullModel::Directed => {
                (c1.out_strength() / m) * (c2.in_strength() / m)
                    + (c2.out_strength() / m) * (c1.in_strength() / m)
            }
            NullModel::Boundary => {
                2.0 * ((c1.inter_weight_sum() / m) * (c2.inter_weight_sum() / m))
            }
        };

        Some(observed - expected)
    }
}
