pub mod bundle;
pub mod index;
pub mod mirror;
pub mod publish;
