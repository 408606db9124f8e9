//! Graph representation module

pub mod builder;
pub mod fixtures;
pub mod weighted;

pub use builder::GraphBuilder;
pub use weighted::{NodeId, WeightedGraph};
