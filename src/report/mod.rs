//! Results reporting and persistence module

use anyhow::Result;
use crate::cluster::metrics::calculate_cluster_metrics;
use crate::cluster::{ClusterId, ClusteringOutcome, MergeRecord, ModularityScorer, Partition};
use crate::config::ClusteringConfig;
use crate::graph::WeightedGraph;
use serde::Serialize;
use serde_json::{json, to_string_pretty};
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

/// Size and normalization of the clustered graph
#[derive(Debug, Clone, Serialize)]
pub struct GraphStats {
    pub node_count: usize,
    pub edge_count: usize,
    pub total_weight: f64,

    /// Normalization constant (None when the graph has no edges)
    pub mass: Option<f64>,
}

/// One cluster with its metrics, members resolved to labels
#[derive(Debug, Clone, Serialize)]
pub struct ClusterReport {
    pub id: ClusterId,
    pub size: usize,
    pub members: Vec<String>,
    pub intra_weight: f64,
    pub inter_weight: f64,
    pub density: f64,
    pub modularity: Option<f64>,
    pub central_nodes: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PartitionReport {
    pub cluster_count: usize,
    pub modularity: Option<f64>,
    pub clusters: Vec<ClusterReport>,
}

/// Serializable view of a finished run
#[derive(Debug, Clone, Serialize)]
pub struct ClusteringReport {
    pub graph: GraphStats,
    pub config: ClusteringConfig,
    pub degenerate: bool,
    pub iterations: usize,
    pub best_score: f64,
    pub current: PartitionReport,
    pub best: PartitionReport,
    pub history: Vec<MergeRecord>,
}

impl ClusteringReport {
    pub fn new(
        graph: &WeightedGraph,
        config: &ClusteringConfig,
        outcome: &ClusteringOutcome,
    ) -> Self {
        let scorer = ModularityScorer::from_config(graph, config).ok();

        Self {
            graph: GraphStats {
                node_count: graph.node_count(),
                edge_count: graph.total_edge_count(),
                total_weight: graph.total_weight(),
                mass: scorer.map(|scorer| scorer.mass()),
            },
            config: config.clone(),
            degenerate: outcome.degenerate,
            iterations: outcome.iterations(),
            best_score: outcome.best_score,
            current: partition_report(graph, &outcome.current, scorer.as_ref()),
            best: partition_report(graph, &outcome.best, scorer.as_ref()),
            history: outcome.history.clone(),
        }
    }
}

fn partition_report(
    graph: &WeightedGraph,
    partition: &Partition,
    scorer: Option<&ModularityScorer>,
) -> PartitionReport {
    let clusters = partition
        .iter()
        .map(|(id, cluster)| {
            let metrics = calculate_cluster_metrics(cluster, scorer);
            ClusterReport {
                id,
                size: metrics.size,
                members: cluster
                    .members()
                    .iter()
                    .map(|&node| graph.display_label(node))
                    .collect(),
                intra_weight: metrics.intra_weight,
                inter_weight: metrics.inter_weight,
                density: metrics.density,
                modularity: metrics.modularity,
                central_nodes: metrics
                    .central_nodes
                    .iter()
                    .map(|&node| graph.display_label(node))
                    .collect(),
            }
        })
        .collect();

    PartitionReport {
        cluster_count: partition.len(),
        modularity: scorer.map(|scorer| scorer.partition_modularity(partition)),
        clusters,
    }
}

/// Save a report to the specified directory
pub fn save_report(report: &ClusteringReport, output_dir: &str) -> Result<()> {
    log::info!("Saving clustering report to {}", output_dir);

    // Ensure output directory exists
    fs::create_dir_all(output_dir)?;

    save_summary(report, output_dir)?;
    save_partitions(report, output_dir)?;
    save_history(report, output_dir)?;

    log::info!("Report saved successfully");

    Ok(())
}

fn save_summary(report: &ClusteringReport, output_dir: &str) -> Result<()> {
    let path = Path::new(output_dir).join("summary.json");
    let mut file = File::create(path)?;

    let summary = json!({
        "graph_stats": report.graph,
        "config": report.config,
        "degenerate": report.degenerate,
        "iterations": report.iterations,
        "best_score": report.best_score,
        "current": {
            "cluster_count": report.current.cluster_count,
            "modularity": report.current.modularity,
        },
        "best": {
            "cluster_count": report.best.cluster_count,
            "modularity": report.best.modularity,
        },
    });

    file.write_all(to_string_pretty(&summary)?.as_bytes())?;

    Ok(())
}

fn save_partitions(report: &ClusteringReport, output_dir: &str) -> Result<()> {
    let path = Path::new(output_dir).join("partitions.json");
    let mut file = File::create(path)?;

    let partitions = json!({
        "current": report.current,
        "best": report.best,
    });

    file.write_all(to_string_pretty(&partitions)?.as_bytes())?;

    Ok(())
}

fn save_history(report: &ClusteringReport, output_dir: &str) -> Result<()> {
    let path = Path::new(output_dir).join("merge_history.json");
    let mut file = File::create(path)?;
    file.write_all(to_string_pretty(&report.history)?.as_bytes())?;

    Ok(())
}

/// Plain listing of both partitions: one label per line, clusters separated
/// by a blank line
pub fn render_text(graph: &WeightedGraph, outcome: &ClusteringOutcome) -> String {
    let mut text = String::new();

    for (title, partition) in [("output", &outcome.current), ("maximum output", &outcome.best)] {
        text.push_str(title);
        text.push('\n');
        for (_, cluster) in partition.iter() {
            for &node in cluster.members() {
                text.push_str(&graph.display_label(node));
                text.push('\n');
            }
            text.push('\n');
        }
    }

    text
}
