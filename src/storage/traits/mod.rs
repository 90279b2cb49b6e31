//! Storage backend traits.

mod log_store;

pub use log_store::LogStore;
