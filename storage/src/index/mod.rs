pub mod graph;

pub use graph::{AdjacencyGraph, BuildReport, GraphError, GraphOptions, MalformedEdgeReason};
