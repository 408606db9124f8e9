//! Configuration management for the modularity clusterer

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// What the normalization constant `m` counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Normalization {
    /// Sum of edge weights
    EdgeWeight,
    /// Number of directed edges, regardless of weight
    EdgeCount,
}

/// Expected-edge term used by the modularity scorer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum NullModel {
    /// Penalize by the product of cluster out- and in-strengths
    Directed,
    /// Penalize by the product of outward boundary weights only
    Boundary,
}

/// Rule for snapshotting the best partition during a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum BestTracking {
    /// Snapshot after the merge with the largest single-step delta
    LargestStepDelta,
    /// Snapshot whenever total partition modularity reaches a new high
    PeakModularity,
}

/// Settings for an agglomerative clustering run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusteringConfig {
    /// Normalization constant used in every score
    pub normalization: Normalization,

    /// Expected-edge term of the modularity score
    pub null_model: NullModel,

    /// How the best-so-far partition is chosen
    pub best_tracking: BestTracking,

    /// Upper bound on the number of merges (None = until convergence)
    pub max_iterations: Option<usize>,

    /// Candidate pair count from which deltas are scored in parallel
    pub parallel_threshold: usize,
}

impl Default for ClusteringConfig {
    fn default() -> Self {
        Self {
            normalization: Normalization::EdgeWeight,
            null_model: NullModel::Directed,
            best_tracking: BestTracking::LargestStepDelta,
            max_iterations: None,
            parallel_threshold: 4096,
        }
    }
}

impl ClusteringConfig {
    /// Create a new configuration with custom values
    pub fn new(
        normalization: Normalization,
        null_model: NullModel,
        best_tracking: BestTracking,
        max_iterations: Option<usize>,
        parallel_threshold: usize,
    ) -> Self {
        Self {
            normalization,
            null_model,
            best_tracking,
            max_iterations,
            parallel_threshold,
        }
    }

    pub fn with_normalization(mut self, normalization: Normalization) -> Self {
        self.normalization = normalization;
        self
    }

    pub fn with_null_model(mut self, null_model: NullModel) -> Self {
        self.null_model = null_model;
        self
    }

    pub fn with_best_tracking(mut self, best_tracking: BestTracking) -> Self {
        self.best_tracking = best_tracking;
        self
    }

    /// Stop after at most `max_iterations` merges
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = Some(max_iterations);
        self
    }

    pub fn with_parallel_threshold(mut self, parallel_threshold: usize) -> Self {
        self.parallel_threshold = parallel_threshold;
        self
    }
}
