use ingestion::{DatasetLoader, LoadError};
use linkprep_core::config::{GraphConfig, InputConfig, PrepConfig, SelfLoopPolicy};
use linkprep_core::error::{ErrorCode, LinkPrepError};
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn write_dataset(dir: &Path, abstracts: &str, authors: &str, edges: &str) {
    fs::write(dir.join("abstracts.txt"), abstracts).unwrap();
    fs::write(dir.join("authors.txt"), authors).unwrap();
    fs::write(dir.join("edgelist.txt"), edges).unwrap();
}

fn default_loader() -> DatasetLoader {
    DatasetLoader::from_config(&PrepConfig::default())
}

const ABSTRACTS: &str = "0|--|Paper zero\n1|--|Paper one\n2|--|Paper two\n3|--|Paper three\n";
const AUTHORS: &str = "0|--|A,B\n1|--|B\n2|--|C,D\n3|--|A\n";

#[test]
fn test_load_aligned_dataset() {
    let dir = tempdir().unwrap();
    write_dataset(dir.path(), ABSTRACTS, AUTHORS, "0,1\n1,2\n2,3\n3,0\n1,0\n");

    let dataset = default_loader().load(dir.path()).unwrap();
    assert_eq!(dataset.node_count(), 4);
    assert_eq!(dataset.edge_count(), 4);
    assert_eq!(dataset.corpus.abstracts[2], "Paper two");
    assert_eq!(dataset.corpus.authors[0], vec!["A", "B"]);
    assert_eq!(dataset.graph.edges()[3], (3, 0));
    assert!(dataset.graph.is_edge(0, 3));
}

#[test]
fn test_author_count_mismatch_is_corpus_error() {
    let dir = tempdir().unwrap();
    write_dataset(dir.path(), ABSTRACTS, "0|--|A\n1|--|B\n", "0,1\n2,3\n");

    let err = default_loader().load(dir.path()).unwrap_err();
    assert!(matches!(
        err,
        LoadError::CorpusMismatch {
            abstracts: 4,
            authors: 2,
        }
    ));
    assert_eq!(err.error_code(), ErrorCode::FailedPrecondition);
    assert!(!err.to_string().contains("graph nodes"));
}

#[test]
fn test_uncovered_node_is_alignment_error_unless_relaxed() {
    let dir = tempdir().unwrap();
    write_dataset(dir.path(), ABSTRACTS, AUTHORS, "0,1\n1,2\n");

    let err = default_loader().load(dir.path()).unwrap_err();
    assert!(matches!(err, LoadError::Alignment { graph_nodes: 3, .. }));

    let relaxed = DatasetLoader::new(
        InputConfig::default(),
        GraphConfig {
            require_edge_coverage: false,
            ..GraphConfig::default()
        },
    );
    let dataset = relaxed.load(dir.path()).unwrap();
    assert_eq!(dataset.node_count(), 4);
    assert_eq!(dataset.graph.degree(3), 0);
}

#[test]
fn test_out_of_range_edge_is_malformed() {
    let dir = tempdir().unwrap();
    write_dataset(dir.path(), ABSTRACTS, AUTHORS, "0,1\n2,3\n# comment\n3,4\n");

    let err = default_loader().load(dir.path()).unwrap_err();
    match &err {
        LoadError::MalformedEdge { line, reason, .. } => {
            assert_eq!(*line, 4);
            assert!(reason.contains("[0, 4)"), "{reason}");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(err.error_code(), ErrorCode::InvalidArgument);
}

#[test]
fn test_self_loop_policy() {
    let dir = tempdir().unwrap();
    write_dataset(dir.path(), ABSTRACTS, AUTHORS, "0,1\n2,2\n2,3\n");

    let err = default_loader().load(dir.path()).unwrap_err();
    assert!(matches!(err, LoadError::MalformedEdge { line: 2, .. }));

    let skipping = DatasetLoader::new(
        InputConfig::default(),
        GraphConfig {
            self_loops: SelfLoopPolicy::Skip,
            ..GraphConfig::default()
        },
    );
    let dataset = skipping.load(dir.path()).unwrap();
    assert_eq!(dataset.edge_count(), 2);
}

#[test]
fn test_missing_file_is_not_found() {
    let dir = tempdir().unwrap();
    let err = default_loader().load(dir.path()).unwrap_err();
    assert!(matches!(err, LoadError::Io { .. }));
    assert_eq!(err.error_code(), ErrorCode::NotFound);
    assert!(err.to_string().contains("abstracts.txt"));
}

#[test]
fn test_invalid_utf8_is_io_error() {
    let dir = tempdir().unwrap();
    write_dataset(dir.path(), ABSTRACTS, AUTHORS, "0,1\n2,3\n");
    fs::write(dir.path().join("abstracts.txt"), b"0|--|\xff\xfe\n").unwrap();

    let err = default_loader().load(dir.path()).unwrap_err();
    assert_eq!(err.error_code(), ErrorCode::DataLoss);
}
