//! Greedy agglomerative modularity clustering (Newman's method)
//!
//! Every node starts in its own cluster. Each step scores all pairs of
//! clusters, merges the pair with the greatest delta modularity and stops
//! once no merge has a non-negative delta or a single cluster remains.
//!
//! Candidate pairs are enumerated by ascending cluster id, `(i, j)` with
//! `i < j`, and the first pair with the strictly greatest delta wins ties.
//! Large candidate sets are scored with rayon using the same tie-break, so
//! the parallel and sequential paths pick the same merge.

use crate::cluster::{Cluster, ClusterId, ModularityScorer, Partition};
use crate::config::{BestTracking, ClusteringConfig};
use crate::error::{ClusterError, ClusterResult};
use crate::graph::WeightedGraph;
use itertools::Itertools;
use rayon::prelude::*;
use serde::Serialize;

/// Lifecycle of a clustering run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Phase {
    Init,
    Iterating,
    Done,
}

/// Best-scoring pair of a single step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MergeCandidate {
    pub first: ClusterId,
    pub second: ClusterId,
    pub delta: f64,
}

/// One applied merge
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MergeRecord {
    /// 1-based merge number
    pub step: usize,
    pub first: ClusterId,
    pub second: ClusterId,
    /// Id of the cluster created by the merge
    pub merged: ClusterId,
    pub delta: f64,
    /// Partition modularity after the merge
    pub modularity: f64,
}

/// Everything a step reads and produces
#[derive(Debug, Clone)]
pub struct ClusteringState {
    pub phase: Phase,

    /// Partition after the latest merge
    pub current: Partition,

    /// Snapshot of the best partition observed so far
    pub best: Partition,

    /// Score of `best` under the configured tracking rule
    pub best_score: f64,

    pub history: Vec<MergeRecord>,
}

impl ClusteringState {
    pub fn iterations(&self) -> usize {
        self.history.len()
    }
}

/// Result of a finished run
#[derive(Debug, Clone)]
pub struct ClusteringOutcome {
    pub current: Partition,
    pub best: Partition,
    pub best_score: f64,
    pub history: Vec<MergeRecord>,

    /// Modularity of `current` (None for a degenerate graph)
    pub modularity: Option<f64>,

    /// Modularity of `best` (None for a degenerate graph)
    pub best_modularity: Option<f64>,

    /// The graph had no edges, so no merge was scored
    pub degenerate: bool,
}

impl ClusteringOutcome {
    pub fn iterations(&self) -> usize {
        self.history.len()
    }
}

/// Find the pair of clusters whose merge raises modularity the most
pub fn best_merge(
    partition: &Partition,
    scorer: &ModularityScorer,
    parallel_threshold: usize,
) -> Option<MergeCandidate> {
    let clusters: Vec<(ClusterId, &Cluster)> = partition.iter().collect();
    let pair_count = clusters.len() * clusters.len().saturating_sub(1) / 2;

    if pair_count >= parallel_threshold {
        best_merge_parallel(&clusters, scorer)
    } else {
        best_merge_sequential(&clusters, scorer)
    }
}

fn best_merge_sequential(
    clusters: &[(ClusterId, &Cluster)],
    scorer: &ModularityScorer,
) -> Option<MergeCandidate> {
    let mut best: Option<MergeCandidate> = None;

    for (&(first, a), &(second, b)) in clusters.iter().tuple_combinations() {
        let Some(delta) = scorer.delta(a, b) else {
            continue;
        };

        if best.map_or(true, |current| delta > current.delta) {
            best = Some(MergeCandidate {
                first,
                second,
                delta,
            });
        }
    }

    best
}

fn best_merge_parallel(
    clusters: &[(ClusterId, &Cluster)],
    scorer: &ModularityScorer,
) -> Option<MergeCandidate> {
    (0..clusters.len())
        .into_par_iter()
        .flat_map_iter(move |i| {
            let (first, a) = clusters[i];
            clusters[i + 1..].iter().filter_map(move |&(second, b)| {
                scorer.delta(a, b).map(|delta| MergeCandidate {
                    first,
                    second,
                    delta,
                })
            })
        })
        .reduce_with(prefer_candidate)
}

/// Higher delta wins; equal deltas go to the pair enumerated first
fn prefer_candidate(left: MergeCandidate, right: MergeCandidate) -> MergeCandidate {
    let right_first = (right.first, right.second) < (left.first, left.second);
    if right.delta > left.delta || (right.delta == left.delta && right_first) {
        right
    } else {
        left
    }
}

/// Drives a clustering run over a borrowed graph
pub struct AgglomerativeClusterer<'g> {
    graph: &'g WeightedGraph,
    config: ClusteringConfig,
}

impl<'g> AgglomerativeClusterer<'g> {
    pub fn new(graph: &'g WeightedGraph, config: ClusteringConfig) -> Self {
        Self { graph, config }
    }

    /// Scorer for this graph and configuration
    pub fn scorer(&self) -> ClusterResult<ModularityScorer> {
        ModularityScorer::from_config(self.graph, &self.config)
    }

    /// Singleton partition, copied as the initial best snapshot
    pub fn init(&self) -> ClusterResult<ClusteringState> {
        let current = Partition::singletons(self.graph)?;

        Ok(ClusteringState {
            phase: Phase::Init,
            best: current.clone(),
            current,
            best_score: 0.0,
            history: Vec::new(),
        })
    }

    /// Advance the run by at most one merge
    pub fn step(
        &self,
        mut state: ClusteringState,
        scorer: &ModularityScorer,
    ) -> ClusterResult<ClusteringState> {
        if state.phase == Phase::Init {
            state.best_score = match self.config.best_tracking {
                BestTracking::LargestStepDelta => 0.0,
                BestTracking::PeakModularity => scorer.partition_modularity(&state.current),
            };
            state.phase = Phase::Iterating;
        }

        if state.phase == Phase::Done {
            return Ok(state);
        }

        if state.current.len() <= 1 {
            state.phase = Phase::Done;
            return Ok(state);
        }

        if let Some(limit) = self.config.max_iterations {
            if state.iterations() >= limit {
                log::info!("Stopping after reaching the limit of {} merges", limit);
                state.phase = Phase::Done;
                return Ok(state);
            }
        }

        let candidate = match best_merge(&state.current, scorer, self.config.parallel_threshold) {
            Some(candidate) if candidate.delta >= 0.0 => candidate,
            Some(candidate) => {
                log::debug!(
                    "Best merge {} + {} has delta {:.6}; no improving merge left",
                    candidate.first,
                    candidate.second,
                    candidate.delta
                );
                state.phase = Phase::Done;
                return Ok(state);
            }
            None => {
                state.phase = Phase::Done;
                return Ok(state);
            }
        };

        let merged = state
            .current
            .merge(candidate.first, candidate.second, self.graph)?;
        let modularity = scorer.partition_modularity(&state.current);

        log::debug!(
            "Merged {} + {} into {} (delta {:.6}, modularity {:.6}, {} clusters left)",
            candidate.first,
            candidate.second,
            merged,
            candidate.delta,
            modularity,
            state.current.len()
        );

        let score = match self.config.best_tracking {
            BestTracking::LargestStepDelta => candidate.delta,
            BestTracking::PeakModularity => modularity,
        };
        if score > state.best_score {
            state.best_score = score;
            state.best = state.current.clone();
        }

        state.history.push(MergeRecord {
            step: state.history.len() + 1,
            first: candidate.first,
            second: candidate.second,
            merged,
            // a zero delta can come out as -0.0
            delta: candidate.delta + 0.0,
            modularity,
        });

        if state.current.len() <= 1 {
            state.phase = Phase::Done;
        }

        Ok(state)
    }

    /// Run from singletons until no improving merge remains
    pub fn run(&self) -> ClusterResult<ClusteringOutcome> {
        let mut state = self.init()?;

        let scorer = match self.scorer() {
            Ok(scorer) => scorer,
            Err(ClusterError::DegenerateGraph) => {
                log::warn!(
                    "Graph has no edges; keeping {} singleton clusters",
                    state.current.len()
                );
                return Ok(ClusteringOutcome {
                    current: state.current,
                    best: state.best,
                    best_score: 0.0,
                    history: state.history,
                    modularity: None,
                    best_modularity: None,
                    degenerate: true,
                });
            }
            Err(err) => return Err(err),
        };

        log::info!(
            "Clustering {} nodes and {} edges (m = {})",
            self.graph.node_count(),
            self.graph.total_edge_count(),
            scorer.mass()
        );

        while state.phase != Phase::Done {
            state = self.step(state, &scorer)?;
        }

        let modularity = scorer.partition_modularity(&state.current);
        let best_modularity = scorer.partition_modularity(&state.best);

        log::info!(
            "Finished after {} merges: {} clusters (modularity {:.6}), best snapshot has {} clusters (modularity {:.6})",
            state.iterations(),
            state.current.len(),
            modularity,
            state.best.len(),
            best_modularity
        );

        Ok(ClusteringOutcome {
            current: state.current,
            best: state.best,
            best_score: state.best_score,
            history: state.history,
            modularity: Some(modularity),
            best_modularity: Some(best_modularity),
            degenerate: false,
        })
    }
}
