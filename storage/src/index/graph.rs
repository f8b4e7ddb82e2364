use linkprep_core::config::SelfLoopPolicy;
use linkprep_core::error::{ErrorCode, LinkPrepError};
use linkprep_core::model::{EdgePair, NodeId};
use std::collections::HashSet;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MalformedEdgeReason {
    OutOfRange { order: usize },
    SelfLoop,
}

impl std::fmt::Display for MalformedEdgeReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MalformedEdgeReason::OutOfRange { order } => {
                write!(f, "node id outside [0, {})", order)
            }
            MalformedEdgeReason::SelfLoop => write!(f, "self-loop"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("Malformed edge #{index} ({u}, {v}): {reason}")]
    MalformedEdge {
        index: usize,
        u: NodeId,
        v: NodeId,
        reason: MalformedEdgeReason,
    },
}

impl LinkPrepError for GraphError {
    fn error_code(&self) -> ErrorCode {
        match self {
            GraphError::MalformedEdge { .. } => ErrorCode::InvalidArgument,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GraphOptions {
    pub self_loops: SelfLoopPolicy,
}

/// What `build` silently folded away.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildReport {
    pub duplicate_edges: usize,
    pub skipped_self_loops: usize,
}

/// Undirected simple graph over the dense id space `[0, order)`.
///
/// Adjacency is a hash set per node, so `is_edge` is expected O(1).
/// `edges()` keeps first-seen order and orientation.
#[derive(Debug, Clone, Default)]
pub struct AdjacencyGraph {
    adjacency: Vec<HashSet<NodeId>>,
    edges: Vec<EdgePair>,
}

impl AdjacencyGraph {
    pub fn build(
        order: usize,
        pairs: impl IntoIterator<Item = EdgePair>,
        options: GraphOptions,
    ) -> Result<Self, GraphError> {
        Self::build_with_report(order, pairs, options).map(|(graph, _)| graph)
    }

    pub fn build_with_report(
        order: usize,
        pairs: impl IntoIterator<Item = EdgePair>,
        options: GraphOptions,
    ) -> Result<(Self, BuildReport), GraphError> {
        let mut graph = Self {
            adjacency: vec![HashSet::new(); order],
            edges: Vec::new(),
        };
        let mut report = BuildReport::default();

        for (index, (u, v)) in pairs.into_iter().enumerate() {
            if u >= order as u64 || v >= order as u64 {
                return Err(GraphError::MalformedEdge {
                    index,
                    u,
                    v,
                    reason: MalformedEdgeReason::OutOfRange { order },
                });
            }
            if u == v {
                match options.self_loops {
                    SelfLoopPolicy::Reject => {
                        return Err(GraphError::MalformedEdge {
                            index,
                            u,
                            v,
                            reason: MalformedEdgeReason::SelfLoop,
                        });
                    }
                    SelfLoopPolicy::Skip => {
                        warn!(index, node = u, "Skipping self-loop");
                        report.skipped_self_loops += 1;
                        continue;
                    }
                }
            }
            if !graph.insert(u, v) {
                report.duplicate_edges += 1;
            }
        }

        debug!(
            order,
            size = graph.size(),
            duplicates = report.duplicate_edges,
            "Graph built"
        );
        Ok((graph, report))
    }

    fn insert(&mut self, u: NodeId, v: NodeId) -> bool {
        if !self.adjacency[u as usize].insert(v) {
            return false;
        }
        self.adjacency[v as usize].insert(u);
        self.edges.push((u, v));
        true
    }

    /// Symmetric membership test. Ids outside the graph are never adjacent.
    pub fn is_edge(&self, u: NodeId, v: NodeId) -> bool {
        usize::try_from(u)
            .ok()
            .and_then(|u| self.adjacency.get(u))
            .is_some_and(|neighbors| neighbors.contains(&v))
    }

    /// Number of nodes.
    pub fn order(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of undirected edges.
    pub fn size(&self) -> usize {
        self.edges.len()
    }

    pub fn edges(&self) -> &[EdgePair] {
        &self.edges
    }

    pub fn neighbors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        usize::try_from(id)
            .ok()
            .and_then(|id| self.adjacency.get(id))
            .into_iter()
            .flat_map(|neighbors| neighbors.iter().copied())
    }

    pub fn degree(&self, id: NodeId) -> usize {
        usize::try_from(id)
            .ok()
            .and_then(|id| self.adjacency.get(id))
            .map_or(0, HashSet::len)
    }

    /// Nodes that are an endpoint of at least one edge.
    pub fn covered_nodes(&self) -> usize {
        self.adjacency.iter().filter(|n| !n.is_empty()).count()
    }

    /// `2|E| / (N (N - 1))`; zero for graphs with fewer than two nodes.
    pub fn density(&self) -> f64 {
        let n = self.order() as f64;
        if self.order() < 2 {
            return 0.0;
        }
        2.0 * self.size() as f64 / (n * (n - 1.0))
    }

    /// Ordered pairs `(u, v)` a uniform draw over `[0, N)²` may accept.
    pub fn non_edge_capacity(&self, include_self_pairs: bool) -> u128 {
        let n = self.order() as u128;
        let mut capacity = n * n - 2 * self.size() as u128;
        if !include_self_pairs {
            capacity -= n;
        }
        capacity
    }
}
