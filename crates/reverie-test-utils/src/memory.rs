use reverie_memory::{CoreMemory, MemoryStore, SharedMemoryStore};
use std::path::Path;

/// A fully populated memory with a fixed timestamp.
pub fn sample_memory(id: &str) -> CoreMemory {
    CoreMemory::new(
        id,
        format!("Title {id}"),
        format!("Content {id}"),
        format!("Impact {id}"),
        format!("Weight {id}"),
    )
    .with_timestamp("2024-01-01T00:00:00.000000Z")
}

/// Open a shared store at `path` and add one sample memory per id.
pub fn seeded_store(path: &Path, ids: &[&str]) -> SharedMemoryStore {
    let store = MemoryStore::open_shared(path);
    {
        let mut guard = store.write();
        for id in ids {
            guard.add(sample_memory(id));
        }
    }
    store
}
