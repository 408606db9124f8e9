//! Built-in sample graphs
//!
//! Both graphs have unit weights. `two_communities` is two dense groups of
//! six nodes joined by a pair of opposite edges; `bridged_communities` is
//! two groups of five joined by a single edge.

use crate::error::ClusterResult;
use crate::graph::{GraphBuilder, WeightedGraph};

const TWO_COMMUNITIES: &[(&str, &str)] = &[
    // first group
    ("A", "B"),
    ("A", "F"),
    ("B", "A"),
    ("B", "C"),
    ("B", "E"),
    ("C", "B"),
    ("C", "F"),
    ("D", "E"),
    ("D", "F"),
    ("E", "B"),
    ("E", "D"),
    ("F", "A"),
    ("F", "C"),
    ("F", "D"),
    // second group
    ("G", "H"),
    ("G", "K"),
    ("H", "G"),
    ("H", "I"),
    ("H", "L"),
    ("H", "K"),
    ("H", "J"),
    ("I", "H"),
    ("I", "J"),
    ("I", "L"),
    ("J", "H"),
    ("J", "I"),
    ("K", "G"),
    ("K", "H"),
    ("L", "H"),
    ("L", "I"),
    // between groups
    ("I", "F"),
    ("E", "H"),
];

const BRIDGED_COMMUNITIES: &[(&str, &str)] = &[
    ("A", "B"),
    ("A", "C"),
    ("A", "E"),
    ("A", "F"),
    ("C", "B"),
    ("C", "E"),
    ("E", "F"),
    ("F", "B"),
    ("G", "B"),
    ("G", "H"),
    ("H", "I"),
    ("H", "J"),
    ("I", "G"),
    ("J", "K"),
    ("K", "H"),
    ("K", "I"),
];

fn from_pairs(pairs: &[(&str, &str)]) -> ClusterResult<WeightedGraph> {
    let mut builder = GraphBuilder::with_capacity(pairs.len());
    for &(src, dst) in pairs {
        builder.add_unweighted_edge(src, dst);
    }
    builder.build()
}

/// Groups A-F and G-L, linked by I -> F and E -> H (32 edges)
pub fn two_communities() -> ClusterResult<WeightedGraph> {
    from_pairs(TWO_COMMUNITIES)
}

/// Groups {A, B, C, E, F} and G-K, linked by G -> B (16 edges)
pub fn bridged_communities() -> ClusterResult<WeightedGraph> {
    from_pairs(BRIDGED_COMMUNITIES)
}
