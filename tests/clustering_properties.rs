use newman_cluster_analyzer::cluster::{best_merge, Phase};
use newman_cluster_analyzer::{
    AgglomerativeClusterer, BestTracking, Cluster, ClusteringConfig, ModularityScorer, NodeId,
    Normalization, NullModel, Partition, WeightedGraph,
};
use proptest::prelude::*;

/// Random graphs on up to eight nodes with small integer weights
fn arb_graph() -> impl Strategy<Value = WeightedGraph> {
    prop::collection::vec((0u8..8, 0u8..8, 1u8..5), 1..30).prop_map(|edges| {
        let mut graph = WeightedGraph::new();
        for (src, dst, weight) in edges {
            graph
                .add_edge(&format!("n{src}"), &format!("n{dst}"), f64::from(weight))
                .unwrap();
        }
        graph
    })
}

/// Split the nodes in two by the bits of `mask`
fn split(graph: &WeightedGraph, mask: u8) -> (Vec<NodeId>, Vec<NodeId>) {
    let mut left = Vec::new();
    let mut right = Vec::new();
    for (i, node) in graph.nodes().enumerate() {
        if (mask >> i) & 1 == 1 {
            left.push(node);
        } else {
            right.push(node);
        }
    }
    (left, right)
}

fn scorer_for(graph: &WeightedGraph, model: NullModel) -> ModularityScorer {
    ModularityScorer::new(graph, Normalization::EdgeWeight, model).unwrap()
}

proptest! {
    #[test]
    fn rebuilding_a_cluster_is_idempotent(graph in arb_graph(), mask in any::<u8>()) {
        let (members, _) = split(&graph, mask);
        prop_assume!(!members.is_empty());

        let first = Cluster::build(members.clone(), &graph).unwrap();
        let second = Cluster::build(members, &graph).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn delta_is_symmetric(graph in arb_graph(), mask in any::<u8>()) {
        let (left, right) = split(&graph, mask);
        prop_assume!(!left.is_empty() && !right.is_empty());

        let a = Cluster::build(left, &graph).unwrap();
        let b = Cluster::build(right, &graph).unwrap();
        for model in [NullModel::Directed, NullModel::Boundary] {
            let scorer = scorer_for(&graph, model);
            prop_assert_eq!(scorer.delta(&a, &b), scorer.delta(&b, &a));
        }
    }

    #[test]
    fn merging_never_loses_intra_weight(graph in arb_graph(), mask in any::<u8>()) {
        let (left, right) = split(&graph, mask);
        prop_assume!(!left.is_empty() && !right.is_empty());

        let a = Cluster::build(left, &graph).unwrap();
        let b = Cluster::build(right, &graph).unwrap();
        let merged = Cluster::merge(&a, &b, &graph).unwrap();
        prop_assert!(merged.intra_weight_sum() >= a.intra_weight_sum() + b.intra_weight_sum());
    }

    #[test]
    fn directed_delta_predicts_modularity_change(graph in arb_graph(), mask in any::<u8>()) {
        let (left, right) = split(&graph, mask);
        prop_assume!(!left.is_empty() && !right.is_empty());

        let scorer = scorer_for(&graph, NullModel::Directed);
        let before = Partition::from_groups([left.clone(), right.clone()], &graph).unwrap();
        let after = Partition::from_groups([graph.nodes().collect::<Vec<_>>()], &graph).unwrap();

        let a = Cluster::build(left, &graph).unwrap();
        let b = Cluster::build(right, &graph).unwrap();
        let delta = scorer.delta(&a, &b).unwrap();
        let change = scorer.partition_modularity(&after) - scorer.partition_modularity(&before);
        prop_assert!((delta - change).abs() < 1e-9);
    }

    #[test]
    fn partition_invariant_holds_after_every_step(graph in arb_graph()) {
        let clusterer = AgglomerativeClusterer::new(&graph, ClusteringConfig::default());
        let scorer = clusterer.scorer().unwrap();
        let mut state = clusterer.init().unwrap();

        while state.phase != Phase::Done {
            state = clusterer.step(state, &scorer).unwrap();
            state.current.validate(&graph).unwrap();
            state.best.validate(&graph).unwrap();
        }
        prop_assert_eq!(state.current.len() + state.iterations(), graph.node_count());
    }

    #[test]
    fn parallel_and_sequential_scoring_agree(graph in arb_graph()) {
        let sequential = AgglomerativeClusterer::new(
            &graph,
            ClusteringConfig::default().with_parallel_threshold(usize::MAX),
        )
        .run()
        .unwrap();
        let parallel = AgglomerativeClusterer::new(
            &graph,
            ClusteringConfig::default().with_parallel_threshold(0),
        )
        .run()
        .unwrap();

        prop_assert_eq!(sequential.history, parallel.history);
        prop_assert_eq!(sequential.best, parallel.best);
    }

    #[test]
    fn peak_tracking_keeps_the_highest_modularity(graph in arb_graph()) {
        let config = ClusteringConfig::default().with_best_tracking(BestTracking::PeakModularity);
        let outcome = AgglomerativeClusterer::new(&graph, config).run().unwrap();
        let best = outcome.best_modularity.unwrap();

        let singletons = Partition::singletons(&graph).unwrap();
        prop_assert!(best >= scorer_for(&graph, NullModel::Directed).partition_modularity(&singletons));
        for record in &outcome.history {
            prop_assert!(best >= record.modularity);
        }
    }

    #[test]
    fn every_applied_merge_was_non_negative(graph in arb_graph()) {
        let outcome = AgglomerativeClusterer::new(&graph, ClusteringConfig::default())
            .run()
            .unwrap();

        for record in &outcome.history {
            prop_assert!(record.delta >= 0.0);
        }
        if outcome.current.len() > 1 {
            let scorer = scorer_for(&graph, NullModel::Directed);
            let next = best_merge(&outcome.current, &scorer, usize::MAX).unwrap();
            prop_assert!(next.delta < 0.0);
        }
    }
}
