//! Community detection by greedy modularity merging (Newman's method)

pub mod cluster;
pub mod config;
pub mod error;
pub mod graph;
pub mod report;

pub use anyhow::{Result, anyhow};
pub use cluster::{
    AgglomerativeClusterer, Cluster, ClusterId, ClusteringOutcome, ModularityScorer, Partition,
};
pub use config::{BestTracking, ClusteringConfig, Normalization, NullModel};
pub use error::{ClusterError, ClusterResult};
pub use graph::{GraphBuilder, NodeId, WeightedGraph};
