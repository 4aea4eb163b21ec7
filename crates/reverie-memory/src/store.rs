//! File-backed store owning the ordered collection of core memories.

use crate::error::MemoryError;
use crate::model::CoreMemory;
use log::{debug, error, info, warn};
use parking_lot::RwLock;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Default backing file name.
pub const DEFAULT_MEMORY_FILE: &str = "core_memories.json";
/// Context rendered when no memories exist yet.
pub const EMPTY_CONTEXT: &str = "CORE MEMORIES: None yet. This is your first conversation.";
/// Listing rendered by the view tool when no memories exist yet.
pub const EMPTY_LISTING: &str = "No core memories stored yet.";

/// Store handle shared between the tools and the prompt builder.
pub type SharedMemoryStore = Arc<RwLock<MemoryStore>>;

/// In-memory collection of core memories mirrored to a JSON file.
///
/// Construction never fails: a missing file starts empty and an unreadable
/// file is logged and treated as empty. Every `add` rewrites the whole file,
/// so after a successful save the file and the collection hold the same records.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    /// Backing file path.
    path: PathBuf,
    /// Records in insertion order, oldest first.
    memories: Vec<CoreMemory>,
}

impl MemoryStore {
    /// Open the store at `path`, loading any existing records.
    pub fn open(path: impl AsRef<Path>) -> Self {
        let mut store = Self {
            path: path.as_ref().to_path_buf(),
            memories: Vec::new(),
        };
        store.reload();
        store
    }

    /// Open the store and wrap it in a shared handle.
    pub fn open_shared(path: impl AsRef<Path>) -> SharedMemoryStore {
        Arc::new(RwLock::new(Self::open(path)))
    }

    /// Backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Re-read the backing file, falling back to an empty collection on failure.
    pub fn reload(&mut self) {
        if !self.path.exists() {
            info!(
                "no existing core memories found, starting fresh (path={})",
                self.path.display()
            );
            self.memories = Vec::new();
            return;
        }
        match read_memories(&self.path) {
            Ok(memories) => {
                info!(
                    "loaded core memories (count={}, path={})",
                    memories.len(),
                    self.path.display()
                );
                self.memories = memories;
            }
            Err(err) => {
                error!(
                    "error loading core memories (path={}): {}",
                    self.path.display(),
                    err
                );
                self.memories = Vec::new();
            }
        }
    }

    /// Rewrite the backing file with the full collection.
    pub fn save(&self) -> Result<(), MemoryError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let payload = serde_json::to_string_pretty(&self.memories)?;
        let temp_path = self.temp_path();
        let written = write_file(&temp_path, payload.as_bytes())
            .and_then(|()| std::fs::rename(&temp_path, &self.path));
        if let Err(err) = written {
            let _ = std::fs::remove_file(&temp_path);
            return Err(err.into());
        }
        info!(
            "saved core memories (count={}, path={})",
            self.memories.len(),
            self.path.display()
        );
        Ok(())
    }

    /// Append a record and persist the collection.
    ///
    /// A failed save is logged; the in-memory collection stays authoritative.
    pub fn add(&mut self, memory: CoreMemory) {
        if self.memories.iter().any(|existing| existing.id == memory.id) {
            warn!("storing core memory with duplicate id (id={})", memory.id);
        }
        debug!(
            "adding core memory (id={}, title_len={}, content_len={})",
            memory.id,
            memory.title.len(),
            memory.content.len()
        );
        self.memories.push(memory);
        if let Err(err) = self.save() {
            error!(
                "error saving core memories (path={}): {}",
                self.path.display(),
                err
            );
        }
    }

    /// All records in stored order.
    pub fn all(&self) -> &[CoreMemory] {
        &self.memories
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.memories.len()
    }

    /// Whether the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.memories.is_empty()
    }

    /// Render every record as the context block injected into the system prompt.
    pub fn render_context(&self) -> String {
        if self.memories.is_empty() {
            return EMPTY_CONTEXT.to_string();
        }
        let mut context = String::from("CORE MEMORIES:\n");
        for memory in &self.memories {
            context.push_str(&memory.to_string());
            context.push('\n');
        }
        context
    }

    /// Render every record, including its timestamp, for the view tool.
    pub fn render_listing(&self) -> String {
        if self.memories.is_empty() {
            return EMPTY_LISTING.to_string();
        }
        let mut listing = format!("You have {} core memories:\n\n", self.memories.len());
        for memory in &self.memories {
            listing.push_str(&memory.to_string());
            listing.push_str(&format!("STORED: {}\n\n", memory.timestamp_label()));
        }
        listing
    }

    /// Path of the scratch file used while saving.
    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

fn write_file(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .truncate(true)
        .write(true)
        .open(path)?;
    file.write_all(bytes)?;
    file.flush()
}

fn read_memories(path: &Path) -> Result<Vec<CoreMemory>, MemoryError> {
    let contents = std::fs::read_to_string(path)?;
    let memories: Vec<CoreMemory> = serde_json::from_str(&contents)?;
    Ok(memories)
}
