use anyhow::Result;
use clap::{Parser, ValueEnum};
use newman_cluster_analyzer::graph::fixtures;
use newman_cluster_analyzer::report::{self, ClusteringReport};
use newman_cluster_analyzer::{
    AgglomerativeClusterer, BestTracking, ClusteringConfig, Normalization, NullModel,
    WeightedGraph,
};

/// Built-in graphs the binary can cluster
#[derive(Debug, Clone, Copy, ValueEnum)]
enum Fixture {
    /// Two groups of six joined by two edges
    TwoCommunities,
    /// Two groups of five joined by one edge
    BridgedCommunities,
}

#[derive(Parser, Debug)]
#[clap(
    name = "newman-cluster-analyzer",
    about = "Greedy modularity community detection on sample graphs"
)]
struct Cli {
    /// Graph to cluster
    #[clap(long, value_enum, default_value = "two-communities")]
    fixture: Fixture,

    /// What the normalization constant counts
    #[clap(long, value_enum, default_value = "edge-weight")]
    normalization: Normalization,

    /// Expected-edge term of the modularity score
    #[clap(long, value_enum, default_value = "directed")]
    null_model: NullModel,

    /// How the best partition snapshot is chosen
    #[clap(long, value_enum, default_value = "largest-step-delta")]
    best_tracking: BestTracking,

    /// Maximum number of merges
    #[clap(long)]
    max_iterations: Option<usize>,

    /// Directory for the JSON report (skipped when absent)
    #[clap(long)]
    output_dir: Option<String>,

    /// Number of worker threads (0 = use all available cores)
    #[clap(long, default_value = "0")]
    threads: usize,

    /// Verbose logging
    #[clap(long, short)]
    verbose: bool,
}

fn load_fixture(fixture: Fixture) -> Result<WeightedGraph> {
    let graph = match fixture {
        Fixture::TwoCommunities => fixtures::two_communities()?,
        Fixture::BridgedCommunities => fixtures::bridged_communities()?,
    };
    Ok(graph)
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Cli::parse();

    // Configure logging
    let log_level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::new()
        .filter_level(log_level)
        .format_timestamp_millis()
        .init();

    // Set number of threads
    let num_threads = if args.threads > 0 {
        args.threads
    } else {
        // If threads = 0, use all available cores
        num_cpus::get()
    };

    log::info!("Using {} worker threads", num_threads);
    rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build_global()?;

    let graph = load_fixture(args.fixture)?;
    log::info!(
        "Loaded {:?} graph with {} nodes and {} edges",
        args.fixture,
        graph.node_count(),
        graph.total_edge_count()
    );

    let mut config = ClusteringConfig::default()
        .with_normalization(args.normalization)
        .with_null_model(args.null_model)
        .with_best_tracking(args.best_tracking);
    if let Some(max_iterations) = args.max_iterations {
        config = config.with_max_iterations(max_iterations);
    }

    let outcome = AgglomerativeClusterer::new(&graph, config.clone()).run()?;

    print!("{}", report::render_text(&graph, &outcome));

    if let Some(output_dir) = &args.output_dir {
        let clustering_report = ClusteringReport::new(&graph, &config, &outcome);
        report::save_report(&clustering_report, output_dir)?;
        log::info!("Report saved to {}", output_dir);
    }

    Ok(())
}
