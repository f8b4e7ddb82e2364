use crc32fast::Hasher;
use linkprep_core::error::{io_error_code, ErrorCode, LinkPrepError};
use linkprep_core::model::PartitionBundle;
use rkyv::{AlignedVec, Deserialize};
use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;
use thiserror::Error;

pub const BUNDLE_MAGIC: &[u8; 8] = b"LPBUNDLE";
pub const BUNDLE_VERSION: u32 = 1;
pub const BUNDLE_EXTENSION: &str = "rkyv";

/// magic (8) + version (4) + crc (4) + len (8)
const HEADER_LEN: usize = 24;

#[derive(Error, Debug)]
pub enum BundleError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Not a partition bundle (bad magic)")]
    BadMagic,
    #[error("Unsupported bundle version {0}")]
    UnsupportedVersion(u32),
    #[error("Truncated bundle: header declares {declared} payload bytes, found {found}")]
    Truncated { declared: u64, found: u64 },
    #[error("Data integrity error (CRC mismatch)")]
    CrcMismatch,
    #[error("Corrupt archive: {0}")]
    CorruptArchive(String),
}

impl LinkPrepError for BundleError {
    fn error_code(&self) -> ErrorCode {
        match self {
            BundleError::Io(e) => io_error_code(e),
            BundleError::Serialization(_) => ErrorCode::Internal,
            BundleError::BadMagic | BundleError::UnsupportedVersion(_) => {
                ErrorCode::InvalidArgument
            }
            BundleError::Truncated { .. }
            | BundleError::CrcMismatch
            | BundleError::CorruptArchive(_) => ErrorCode::DataLoss,
        }
    }
}

/// Encode a bundle as a framed archive.
/// Format: [magic: 8][version: u32 LE][crc32: u32 LE][len: u64 LE][payload: len bytes]
pub fn encode(bundle: &PartitionBundle) -> Result<Vec<u8>, BundleError> {
    let payload = rkyv::to_bytes::<_, 4096>(bundle)
        .map_err(|e| BundleError::Serialization(e.to_string()))?;

    let mut hasher = Hasher::new();
    hasher.update(&payload);
    let crc = hasher.finalize();

    let mut out = Vec::with_capacity(HEADER_LEN + payload.len());
    out.extend_from_slice(BUNDLE_MAGIC);
    out.extend_from_slice(&BUNDLE_VERSION.to_le_bytes());
    out.extend_from_slice(&crc.to_le_bytes());
    out.extend_from_slice(&(payload.len() as u64).to_le_bytes());
    out.extend_from_slice(&payload);
    Ok(out)
}

pub fn decode(bytes: &[u8]) -> Result<PartitionBundle, BundleError> {
    if bytes.len() < HEADER_LEN || &bytes[..8] != BUNDLE_MAGIC {
        return Err(BundleError::BadMagic);
    }

    let version = u32::from_le_bytes(word(&bytes[8..12]));
    if version != BUNDLE_VERSION {
        return Err(BundleError::UnsupportedVersion(version));
    }
    let crc = u32::from_le_bytes(word(&bytes[12..16]));
    let declared = u64::from_le_bytes(dword(&bytes[16..24]));

    let payload = &bytes[HEADER_LEN..];
    if payload.len() as u64 != declared {
        return Err(BundleError::Truncated {
            declared,
            found: payload.len() as u64,
        });
    }

    let mut hasher = Hasher::new();
    hasher.update(payload);
    if hasher.finalize() != crc {
        return Err(BundleError::CrcMismatch);
    }

    // Archives must be read from aligned memory.
    let mut aligned = AlignedVec::with_capacity(payload.len());
    aligned.extend_from_slice(payload);

    let archived = rkyv::check_archived_root::<PartitionBundle>(&aligned[..])
        .map_err(|e| BundleError::CorruptArchive(e.to_string()))?;
    archived
        .deserialize(&mut rkyv::Infallible)
        .map_err(|e| BundleError::CorruptArchive(e.to_string()))
}

/// Write the framed archive to `path` and fsync it.
pub fn write_bundle(path: impl AsRef<Path>, bundle: &PartitionBundle) -> Result<u64, BundleError> {
    let bytes = encode(bundle)?;
    let file = File::create(path.as_ref())?;
    let mut writer = BufWriter::new(file);
    writer.write_all(&bytes)?;
    writer.flush()?;
    writer.get_ref().sync_all()?;
    Ok(bytes.len() as u64)
}

pub fn read_bundle(path: impl AsRef<Path>) -> Result<PartitionBundle, BundleError> {
    let mut bytes = Vec::new();
    File::open(path.as_ref())?.read_to_end(&mut bytes)?;
    decode(&bytes)
}

fn word(slice: &[u8]) -> [u8; 4] {
    let mut out = [0u8; 4];
    out.copy_from_slice(slice);
    out
}

fn dword(slice: &[u8]) -> [u8; 8] {
    let mut out = [0u8; 8];
    out.copy_from_slice(slice);
    out
}
