use linkprep_core::error::{io_error_code, ErrorCode, LinkPrepError};
use linkprep_core::model::PartitionBundle;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use thiserror::Error;

pub const MIRROR_EXTENSION: &str = "json";

#[derive(Error, Debug)]
pub enum MirrorError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl LinkPrepError for MirrorError {
    fn error_code(&self) -> ErrorCode {
        match self {
            MirrorError::Io(e) => io_error_code(e),
            MirrorError::Json(_) => ErrorCode::DataLoss,
        }
    }
}

/// Object-serialized copy of a bundle for consumers that cannot read archives.
pub fn write_mirror(path: impl AsRef<Path>, bundle: &PartitionBundle) -> Result<u64, MirrorError> {
    let file = File::create(path.as_ref())?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer(&mut writer, bundle)?;
    writer.flush()?;
    writer.get_ref().sync_all()?;
    Ok(writer.get_ref().metadata()?.len())
}

pub fn read_mirror(path: impl AsRef<Path>) -> Result<PartitionBundle, MirrorError> {
    let reader = BufReader::new(File::open(path.as_ref())?);
    Ok(serde_json::from_reader(reader)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_mirror_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("part.json");
        let bundle = PartitionBundle {
            abstracts: vec!["text with \"quotes\"".to_string()],
            authors: vec![vec!["Grace".to_string(), "Alan".to_string()]],
            origin_edges: vec![],
            ..Default::default()
        };
        let written = write_mirror(&path, &bundle).unwrap();
        assert!(written > 0);
        assert_eq!(read_mirror(&path).unwrap(), bundle);
    }

    #[test]
    fn test_mirror_rejects_garbage() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, b"{\"abstracts\": [").unwrap();
        let err = read_mirror(&path).unwrap_err();
        assert_eq!(err.error_code(), ErrorCode::DataLoss);
    }
}
