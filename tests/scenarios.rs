use newman_cluster_analyzer::graph::fixtures;
use newman_cluster_analyzer::{
    AgglomerativeClusterer, ClusteringConfig, GraphBuilder, Normalization, WeightedGraph,
};

/// Two dense triangles with no edge between them
const TWO_TRIANGLES: &[(&str, &str)] = &[
    ("A", "B"),
    ("B", "C"),
    ("C", "A"),
    ("A", "C"),
    ("D", "E"),
    ("E", "F"),
    ("F", "D"),
    ("D", "F"),
];

fn run(graph: &WeightedGraph, config: ClusteringConfig) -> Vec<String> {
    let outcome = AgglomerativeClusterer::new(graph, config).run().unwrap();
    outcome
        .current
        .labelled_groups(graph)
        .into_iter()
        .map(|group| group.join(""))
        .collect()
}

#[test]
fn dense_groups_are_recovered() {
    let graph = fixtures::two_communities().unwrap();
    assert_eq!(run(&graph, ClusteringConfig::default()), vec!["ABCDEF", "GHIJKL"]);
}

#[test]
fn dense_groups_without_bridges_are_recovered() {
    let mut builder = GraphBuilder::default();
    for &(src, dst) in TWO_TRIANGLES {
        builder.add_unweighted_edge(src, dst);
    }
    let graph = builder.build().unwrap();

    assert_eq!(run(&graph, ClusteringConfig::default()), vec!["ABC", "DEF"]);
}

#[test]
fn isolated_nodes_are_left_alone() {
    let mut builder = GraphBuilder::default();
    for label in ["p", "q", "r", "s", "t"] {
        builder.get_or_create_node(label);
    }
    let graph = builder.build().unwrap();
    let outcome = AgglomerativeClusterer::new(&graph, ClusteringConfig::default())
        .run()
        .unwrap();

    assert!(outcome.degenerate);
    assert_eq!(outcome.iterations(), 0);
    assert_eq!(outcome.current.len(), 5);
    assert_eq!(outcome.best.len(), 5);
}

#[test]
fn heavy_edges_decide_the_split_under_weight_normalization() {
    // a 4-cycle whose A-B and C-D links are much heavier than the others
    let mut builder = GraphBuilder::default();
    builder
        .add_edge("A", "B", 10.0)
        .add_edge("B", "A", 10.0)
        .add_edge("C", "D", 10.0)
        .add_edge("D", "C", 10.0)
        .add_unweighted_edge("B", "C")
        .add_unweighted_edge("D", "A");
    let graph = builder.build().unwrap();

    let config = ClusteringConfig::default().with_normalization(Normalization::EdgeWeight);
    assert_eq!(run(&graph, config), vec!["AB", "CD"]);
}
