//! Partition of a graph's nodes into clusters

use crate::cluster::Cluster;
use crate::error::{ClusterError, ClusterResult};
use crate::graph::{NodeId, WeightedGraph};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;

/// Stable handle of a cluster within a partition
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ClusterId(pub u32);

impl fmt::Display for ClusterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "c{}", self.0)
    }
}

/// Clusters addressed by id.
///
/// Ids are never reused: singletons get `0..n` in graph node order and every
/// merge allocates the next id. Cloning yields an independent snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct Partition {
    clusters: BTreeMap<ClusterId, Cluster>,
    next_id: u32,
}

impl Partition {
    /// One cluster per graph node
    pub fn singletons(graph: &WeightedGraph) -> ClusterResult<Self> {
        let mut clusters = BTreeMap::new();
        for (idx, node) in graph.nodes().enumerate() {
            clusters.insert(ClusterId(idx as u32), Cluster::build([node], graph)?);
        }

        Ok(Self {
            next_id: clusters.len() as u32,
            clusters,
        })
    }

    /// Partition from explicit node groups, checked against the graph
    pub fn from_groups<G>(groups: G, graph: &WeightedGraph) -> ClusterResult<Self>
    where
        G: IntoIterator,
        G::Item: IntoIterator<Item = NodeId>,
    {
        let mut clusters = BTreeMap::new();
        for (idx, group) in groups.into_iter().enumerate() {
            clusters.insert(ClusterId(idx as u32), Cluster::build(group, graph)?);
        }

        let partition = Self {
            next_id: clusters.len() as u32,
            clusters,
        };
        partition.validate(graph)?;
        Ok(partition)
    }

    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }

    pub fn get(&self, id: ClusterId) -> Option<&Cluster> {
        self.clusters.get(&id)
    }

    /// Clusters in ascending id order
    pub fn iter(&self) -> impl Iterator<Item = (ClusterId, &Cluster)> + '_ {
        self.clusters.iter().map(|(&id, cluster)| (id, cluster))
    }

    /// Replace two clusters with their union, returning the new cluster's id
    pub fn merge(
        &mut self,
        first: ClusterId,
        second: ClusterId,
        graph: &WeightedGraph,
    ) -> ClusterResult<ClusterId> {
        let a = self
            .clusters
            .get(&first)
            .ok_or(ClusterError::UnknownCluster(first))?;
        let b = self
            .clusters
            .get(&second)
            .ok_or(ClusterError::UnknownCluster(second))?;

        // Rejects first == second as well, since a cluster overlaps itself
        let merged = Cluster::merge(a, b, graph)?;

        self.clusters.remove(&first);
        self.clusters.remove(&second);

        let id = ClusterId(self.next_id);
        self.next_id += 1;
        self.clusters.insert(id, merged);
        Ok(id)
    }

    /// Check that clusters are non-empty, pairwise disjoint and cover the graph
    pub fn validate(&self, graph: &WeightedGraph) -> ClusterResult<()> {
        let mut seen = HashSet::with_capacity(graph.node_count());

        for (id, cluster) in self.iter() {
            if cluster.is_empty() {
                return Err(ClusterError::PartitionInvariant(format!(
                    "cluster {id} is empty"
                )));
            }

            for &node in cluster.members() {
                if !graph.contains_node(node) {
                    return Err(ClusterError::UnknownNode(node));
                }
                if !seen.insert(node) {
                    return Err(ClusterError::PartitionInvariant(format!(
                        "node {node} belongs to more than one cluster"
                    )));
                }
            }
        }

        if seen.len() != graph.node_count() {
            return Err(ClusterError::PartitionInvariant(format!(
                "clusters cover {} of {} nodes",
                seen.len(),
                graph.node_count()
            )));
        }

        Ok(())
    }

    /// Cluster of every node
    pub fn assignments(&self) -> HashMap<NodeId, ClusterId> {
        self.iter()
            .flat_map(|(id, cluster)| cluster.members().iter().map(move |&node| (node, id)))
            .collect()
    }

    /// Member labels per cluster, each group sorted and groups ordered by
    /// their first label
    pub fn labelled_groups(&self, graph: &WeightedGraph) -> Vec<Vec<String>> {
        let mut groups: Vec<Vec<String>> = self
            .iter()
            .map(|(_, cluster)| {
                let mut labels: Vec<String> = cluster
                    .members()
                    .iter()
                    .map(|&node| graph.display_label(node))
                    .collect();
                labels.sort();
                labels
            })
            .collect();

        groups.sort();
        groups
    }
}
