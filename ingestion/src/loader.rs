use crate::corpus::{read_abstracts, read_authors, Corpus};
use crate::edgelist::read_edge_list;
use crate::error::LoadError;
use linkprep_core::config::{GraphConfig, InputConfig, PrepConfig};
use std::path::{Path, PathBuf};
use storage::index::{AdjacencyGraph, GraphError, GraphOptions};
use tracing::{info, warn};

/// Side information and graph, with node count agreement already checked.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub corpus: Corpus,
    pub graph: AdjacencyGraph,
}

impl Dataset {
    /// Checks the node-count agreement between corpus and graph.
    pub fn new(corpus: Corpus, graph: AdjacencyGraph) -> Result<Self, LoadError> {
        let (abstracts, authors, graph_nodes) =
            (corpus.abstracts.len(), corpus.authors.len(), graph.order());
        if abstracts != authors || abstracts != graph_nodes {
            return Err(LoadError::Alignment {
                abstracts,
                authors,
                graph_nodes,
            });
        }
        Ok(Self { corpus, graph })
    }

    pub fn node_count(&self) -> usize {
        self.graph.order()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.size()
    }
}

pub struct DatasetLoader {
    input: InputConfig,
    graph: GraphConfig,
}

impl DatasetLoader {
    pub fn new(input: InputConfig, graph: GraphConfig) -> Self {
        Self { input, graph }
    }

    pub fn from_config(config: &PrepConfig) -> Self {
        Self::new(config.input.clone(), config.graph.clone())
    }

    pub fn abstracts_path(&self, dir: &Path) -> PathBuf {
        dir.join(&self.input.abstracts_file)
    }

    pub fn authors_path(&self, dir: &Path) -> PathBuf {
        dir.join(&self.input.authors_file)
    }

    pub fn edges_path(&self, dir: &Path) -> PathBuf {
        dir.join(&self.input.edges_file)
    }

    /// Load corpus and graph from `dir`.
    ///
    /// The corpus fixes the node count `N`; edges must reference ids in
    /// `[0, N)`. With `require_edge_coverage`, every node must also be an
    /// endpoint of some edge.
    pub fn load(&self, dir: &Path) -> Result<Dataset, LoadError> {
        let abstracts_path = self.abstracts_path(dir);
        let abstracts = read_abstracts(&abstracts_path, &self.input.field_separator)?;
        let authors = read_authors(
            &self.authors_path(dir),
            &self.input.field_separator,
            &self.input.author_delimiter,
        )?;
        info!(
            abstracts = abstracts.len(),
            authors = authors.len(),
            "Loaded corpus"
        );

        if abstracts.len() != authors.len() {
            return Err(LoadError::CorpusMismatch {
                abstracts: abstracts.len(),
                authors: authors.len(),
            });
        }
        let order = abstracts.len();

        let edges_path = self.edges_path(dir);
        let edge_list = read_edge_list(&edges_path, &self.input.edge_delimiter)?;
        let options = GraphOptions {
            self_loops: self.graph.self_loops,
        };
        let (graph, report) =
            AdjacencyGraph::build_with_report(order, edge_list.pairs.iter().copied(), options)
                .map_err(|e| match e {
                    GraphError::MalformedEdge { index, reason, .. } => LoadError::MalformedEdge {
                        path: edges_path.clone(),
                        line: edge_list.lines.get(index).copied().unwrap_or(0),
                        reason: reason.to_string(),
                    },
                })?;
        if report.duplicate_edges > 0 {
            warn!(
                duplicates = report.duplicate_edges,
                "Collapsed duplicate edges"
            );
        }

        if self.graph.require_edge_coverage && graph.covered_nodes() != order {
            return Err(LoadError::Alignment {
                abstracts: order,
                authors: order,
                graph_nodes: graph.covered_nodes(),
            });
        }

        info!(
            nodes = graph.order(),
            edges = graph.size(),
            density = graph.density(),
            "Loaded graph"
        );
        Dataset::new(
            Corpus {
                abstracts,
                authors,
            },
            graph,
        )
    }
}
