use crate::bundle::{write_bundle, BundleError, BUNDLE_EXTENSION};
use crate::mirror::{write_mirror, MirrorError, MIRROR_EXTENSION};
use linkprep_core::error::{io_error_code, ErrorCode, LinkPrepError};
use linkprep_core::model::{PartitionBundle, PartitionLabel};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

pub const MANIFEST_VERSION: u32 = 1;
const STAGING_PREFIX: &str = ".linkprep-staging-";

#[derive(Error, Debug)]
pub enum PublishError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Bundle error: {0}")]
    Bundle(#[from] BundleError),
    #[error("Mirror error: {0}")]
    Mirror(#[from] MirrorError),
    #[error("Manifest error: {0}")]
    Manifest(#[from] serde_json::Error),
    #[error("Artifact {file} does not match manifest: {details}")]
    Mismatch { file: String, details: String },
}

impl LinkPrepError for PublishError {
    fn error_code(&self) -> ErrorCode {
        match self {
            PublishError::Io(e) => io_error_code(e),
            PublishError::Bundle(e) => e.error_code(),
            PublishError::Mirror(e) => e.error_code(),
            PublishError::Manifest(_) => ErrorCode::DataLoss,
            PublishError::Mismatch { .. } => ErrorCode::DataLoss,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactFormat {
    /// Canonical framed archive.
    Bundle,
    /// Compatibility mirror.
    Json,
}

impl ArtifactFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ArtifactFormat::Bundle => BUNDLE_EXTENSION,
            ArtifactFormat::Json => MIRROR_EXTENSION,
        }
    }
}

/// Run parameters recorded alongside the artifacts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunInfo {
    pub seed: u64,
    pub dev_ratio: f64,
    pub node_count: usize,
    pub edge_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartitionCounts {
    pub partition: PartitionLabel,
    pub positives: usize,
    pub negatives: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactEntry {
    pub file_name: String,
    pub partition: PartitionLabel,
    pub format: ArtifactFormat,
    pub bytes: u64,
    pub sha256: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    pub version: u32,
    pub run: RunInfo,
    pub partitions: Vec<PartitionCounts>,
    pub artifacts: Vec<ArtifactEntry>,
}

/// Writes every artifact of a run into a staging directory and only then moves
/// them into the output directory. The manifest is moved last, so its presence
/// marks a complete output set.
pub struct Publisher {
    dir: PathBuf,
    prefix: String,
}

impl Publisher {
    pub fn new(dir: impl AsRef<Path>, prefix: impl Into<String>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            prefix: prefix.into(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn artifact_name(&self, label: PartitionLabel, format: ArtifactFormat) -> String {
        format!("{}_{}.{}", self.prefix, label, format.extension())
    }

    pub fn artifact_path(&self, label: PartitionLabel, format: ArtifactFormat) -> PathBuf {
        self.dir.join(self.artifact_name(label, format))
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.dir.join(format!("{}_manifest.json", self.prefix))
    }

    pub fn publish(
        &self,
        run: &RunInfo,
        partitions: &[(PartitionLabel, &PartitionBundle)],
    ) -> Result<Manifest, PublishError> {
        fs::create_dir_all(&self.dir)?;

        // Dropping the TempDir removes whatever is still staged.
        let staging = tempfile::Builder::new()
            .prefix(STAGING_PREFIX)
            .tempdir_in(&self.dir)?;

        let mut artifacts = Vec::with_capacity(partitions.len() * 2);
        let mut counts = Vec::with_capacity(partitions.len());
        for (label, bundle) in partitions {
            for format in [ArtifactFormat::Bundle, ArtifactFormat::Json] {
                let file_name = self.artifact_name(*label, format);
                let staged = staging.path().join(&file_name);
                let bytes = match format {
                    ArtifactFormat::Bundle => write_bundle(&staged, bundle)?,
                    ArtifactFormat::Json => write_mirror(&staged, bundle)?,
                };
                let sha256 = sha256_file(&staged)?;
                debug!(file = %file_name, bytes, "Staged artifact");
                artifacts.push(ArtifactEntry {
                    file_name,
                    partition: *label,
                    format,
                    bytes,
                    sha256,
                });
            }
            counts.push(PartitionCounts {
                partition: *label,
                positives: bundle.positive_count(),
                negatives: bundle.negative_count(),
            });
        }

        let manifest = Manifest {
            version: MANIFEST_VERSION,
            run: run.clone(),
            partitions: counts,
            artifacts,
        };
        let manifest_path = self.manifest_path();
        let staged_manifest = staging.path().join(file_name_of(&manifest_path));
        write_json(&staged_manifest, &manifest)?;

        // A stale manifest would vouch for a half-replaced output set.
        if manifest_path.exists() {
            fs::remove_file(&manifest_path)?;
        }

        let mut published: Vec<PathBuf> = Vec::with_capacity(manifest.artifacts.len());
        for entry in &manifest.artifacts {
            let target = self.dir.join(&entry.file_name);
            if let Err(e) = fs::rename(staging.path().join(&entry.file_name), &target) {
                rollback(&published);
                return Err(e.into());
            }
            published.push(target);
        }
        if let Err(e) = fs::rename(&staged_manifest, &manifest_path) {
            rollback(&published);
            return Err(e.into());
        }

        info!(
            dir = %self.dir.display(),
            artifacts = manifest.artifacts.len(),
            "Published dataset"
        );
        Ok(manifest)
    }

    /// Re-hash every artifact listed in the manifest.
    pub fn verify(&self) -> Result<Manifest, PublishError> {
        let file = File::open(self.manifest_path())?;
        let manifest: Manifest = serde_json::from_reader(io::BufReader::new(file))?;

        for entry in &manifest.artifacts {
            let path = self.dir.join(&entry.file_name);
            let bytes = fs::metadata(&path)?.len();
            if bytes != entry.bytes {
                return Err(PublishError::Mismatch {
                    file: entry.file_name.clone(),
                    details: format!("expected {} bytes, found {}", entry.bytes, bytes),
                });
            }
            let digest = sha256_file(&path)?;
            if digest != entry.sha256 {
                return Err(PublishError::Mismatch {
                    file: entry.file_name.clone(),
                    details: "sha256 differs".to_string(),
                });
            }
        }
        Ok(manifest)
    }
}

fn rollback(published: &[PathBuf]) {
    for path in published {
        if let Err(e) = fs::remove_file(path) {
            warn!(path = %path.display(), error = %e, "Failed to roll back artifact");
        }
    }
}

fn file_name_of(path: &Path) -> &std::ffi::OsStr {
    path.file_name().unwrap_or_else(|| path.as_os_str())
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), PublishError> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, value)?;
    writer.flush()?;
    writer.get_ref().sync_all()?;
    Ok(())
}

pub fn sha256_file(path: impl AsRef<Path>) -> io::Result<String> {
    let mut hasher = Sha256::new();
    let mut file = File::open(path.as_ref())?;
    io::copy(&mut file, &mut hasher)?;
    Ok(format!("{:x}", hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_artifact_naming() {
        let publisher = Publisher::new("/data/out", "nullptr");
        assert_eq!(
            publisher.artifact_name(PartitionLabel::Train, ArtifactFormat::Bundle),
            "nullptr_train.rkyv"
        );
        assert_eq!(
            publisher.artifact_name(PartitionLabel::Dev, ArtifactFormat::Json),
            "nullptr_dev.json"
        );
        assert_eq!(
            publisher.manifest_path(),
            PathBuf::from("/data/out/nullptr_manifest.json")
        );
    }

    #[test]
    fn test_sha256_file_matches_known_digest() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("abc.txt");
        fs::write(&path, b"abc").unwrap();
        assert_eq!(
            sha256_file(&path).unwrap(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }
}
