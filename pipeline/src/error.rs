use ingestion::LoadError;
use linkprep_core::error::{ErrorCode, LinkPrepError};
use sampler::{SamplingError, SplitError};
use storage::publish::PublishError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Load error: {0}")]
    Load(#[from] LoadError),
    #[error("Split error: {0}")]
    Split(#[from] SplitError),
    #[error("Sampling error: {0}")]
    Sampling(#[from] SamplingError),
    #[error("Publish error: {0}")]
    Publish(#[from] PublishError),
}

impl LinkPrepError for PipelineError {
    fn error_code(&self) -> ErrorCode {
        match self {
            PipelineError::Load(e) => e.error_code(),
            PipelineError::Split(e) => e.error_code(),
            PipelineError::Sampling(e) => e.error_code(),
            PipelineError::Publish(e) => e.error_code(),
        }
    }
}
