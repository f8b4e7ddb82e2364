use linkprep_core::error::{ErrorCode, LinkPrepError};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SplitError {
    #[error("Dev ratio must be in (0, 1), got {0}")]
    InvalidRatio(f64),
}

impl LinkPrepError for SplitError {
    fn error_code(&self) -> ErrorCode {
        match self {
            SplitError::InvalidRatio(_) => ErrorCode::InvalidArgument,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SamplingError {
    #[error(
        "Sampling exhausted at slot {slot}: no non-edge found in {attempts} draws (density {density:.6})"
    )]
    Exhausted {
        slot: usize,
        attempts: u32,
        density: f64,
    },
}

impl LinkPrepError for SamplingError {
    fn error_code(&self) -> ErrorCode {
        match self {
            SamplingError::Exhausted { .. } => ErrorCode::ResourceExhausted,
        }
    }
}
