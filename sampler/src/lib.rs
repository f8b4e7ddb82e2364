pub mod error;
pub mod negative;
pub mod partition;
pub mod progress;

pub use error::{SamplingError, SplitError};
pub use negative::{NegativeSampler, NegativeSet, SamplerOptions};
pub use partition::{dev_size, partition, partition_with_rng, IndexSplit};
pub use progress::{LogObserver, NoopObserver, SlotObserver};
