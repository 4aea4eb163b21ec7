//! Core memory records and their durable file-backed store.

pub mod error;
pub mod model;
pub mod store;

/// Memory error type.
pub use error::MemoryError;
/// Core memory record model.
pub use model::CoreMemory;
/// File-backed memory store and shared handle.
pub use store::{DEFAULT_MEMORY_FILE, EMPTY_CONTEXT, EMPTY_LISTING, MemoryStore, SharedMemoryStore};
