use linkprep_core::error::{io_error_code, ErrorCode, LinkPrepError};
use std::path::PathBuf;
use storage::index::GraphError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{}:{line}: missing field separator {separator:?}", .path.display())]
    MalformedLine {
        path: PathBuf,
        line: usize,
        separator: String,
    },
    #[error("{}:{line}: malformed edge: {reason}", .path.display())]
    MalformedEdge {
        path: PathBuf,
        line: usize,
        reason: String,
    },
    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),
    #[error("Corpus not aligned: {abstracts} abstracts, {authors} author lists")]
    CorpusMismatch { abstracts: usize, authors: usize },
    #[error(
        "Data not aligned: {abstracts} abstracts, {authors} author lists, {graph_nodes} graph nodes"
    )]
    Alignment {
        abstracts: usize,
        authors: usize,
        graph_nodes: usize,
    },
}

impl LoadError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        LoadError::Io {
            path: path.into(),
            source,
        }
    }
}

impl LinkPrepError for LoadError {
    fn error_code(&self) -> ErrorCode {
        match self {
            LoadError::Io { source, .. } => io_error_code(source),
            LoadError::MalformedLine { .. } | LoadError::MalformedEdge { .. } => {
                ErrorCode::InvalidArgument
            }
            LoadError::Graph(e) => e.error_code(),
            LoadError::CorpusMismatch { .. } | LoadError::Alignment { .. } => {
                ErrorCode::FailedPrecondition
            }
        }
    }
}
