pub mod assemble;
pub mod error;
pub mod progress;
pub mod run;

pub use assemble::{assemble, DatasetBundles};
pub use error::PipelineError;
pub use progress::ProgressBarObserver;
pub use run::{prepare, run, PreparedDataset, RunReport};
