pub mod corpus;
pub mod edgelist;
pub mod error;
pub mod loader;

pub use corpus::Corpus;
pub use error::LoadError;
pub use loader::{Dataset, DatasetLoader};
