//! Storage layer abstraction.
//!
//! Interaction logs live in device-local key-value storage. The
//! [`LogStore`] trait is the seam: the page's own storage, a directory of
//! JSON files, or an in-memory map for tests all plug in behind it.

pub mod codec;
mod filesystem;
mod memory;
pub mod traits;

pub use filesystem::FilesystemLogStore;
pub use memory::MemoryLogStore;
pub use traits::LogStore;
