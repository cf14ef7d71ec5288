//! Local persistence for the to-do list.
//!
//! A single named slot holds the whole collection as a JSON array. Every
//! mutation overwrites the slot; there is no locking and the last writer wins.

mod error;

pub use error::StorageError;

use crate::state::TodoItem;
use log::*;
use std::{
    fs,
    path::{Path, PathBuf},
};

const FILE_NAME: &str = "todos.json";
const CORRUPT_SUFFIX: &str = "corrupt";

/// Slot holding the serialized to-do collection.
///
pub trait TodoStore: Send {
    /// Return the stored collection, or `None` if nothing was stored yet.
    fn load(&self) -> Result<Option<Vec<TodoItem>>, StorageError>;

    /// Overwrite the stored collection.
    fn save(&self, items: &[TodoItem]) -> Result<(), StorageError>;
}

/// Stores the collection as a JSON file.
///
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Return a store keeping its file in the given directory.
    ///
    pub fn in_dir(dir: &Path) -> FileStore {
        FileStore {
            path: dir.join(FILE_NAME),
        }
    }

    #[cfg(test)]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Move unreadable content out of the way so the next write keeps a copy.
    ///
    fn quarantine(&self) {
        let backup = self.path.with_extension(format!("json.{}", CORRUPT_SUFFIX));
        match fs::rename(&self.path, &backup) {
            Ok(()) => warn!("Moved unreadable to-do data to {}", backup.display()),
            Err(e) => error!(
                "Failed to move unreadable to-do data {}: {}",
                self.path.display(),
                e
            ),
        }
    }
}

impl TodoStore for FileStore {
    fn load(&self) -> Result<Option<Vec<TodoItem>>, StorageError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let contents = fs::read(&self.path).map_err(|e| StorageError::ReadFailed {
            path: self.path.clone(),
            source: e,
        })?;
        match parse(&contents) {
            Ok(items) => Ok(Some(items)),
            Err(e) => {
                self.quarantine();
                Err(e)
            }
        }
    }

    fn save(&self, items: &[TodoItem]) -> Result<(), StorageError> {
        let content = serde_json::to_string(items)?;
        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| StorageError::WriteFailed {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
            }
        }

        // Write beside the slot and rename so a crash never leaves half a file.
        let staging = self.path.with_extension("json.tmp");
        fs::write(&staging, content).map_err(|e| StorageError::WriteFailed {
            path: staging.clone(),
            source: e,
        })?;
        fs::rename(&staging, &self.path).map_err(|e| StorageError::WriteFailed {
            path: self.path.clone(),
            source: e,
        })?;
        Ok(())
    }
}

/// Decode the slot. Anything that is not a UTF-8 JSON array of items counts
/// as corrupt.
fn parse(contents: &[u8]) -> Result<Vec<TodoItem>, StorageError> {
    serde_json::from_slice(contents).map_err(|e| StorageError::Corrupt(e.to_string()))
}

/// Keeps the serialized collection in memory.
///
#[cfg(test)]
#[derive(Clone, Default)]
pub struct MemoryStore {
    slot: std::sync::Arc<std::sync::Mutex<Option<String>>>,
}

#[cfg(test)]
impl MemoryStore {
    pub fn with_contents(contents: &str) -> MemoryStore {
        let store = MemoryStore::default();
        *store.slot.lock().unwrap() = Some(contents.to_string());
        store
    }

    /// Return what a fresh reader of the slot would see.
    pub fn read_back(&self) -> Vec<TodoItem> {
        self.load().unwrap().unwrap_or_default()
    }
}

#[cfg(test)]
impl TodoStore for MemoryStore {
    fn load(&self) -> Result<Option<Vec<TodoItem>>, StorageError> {
        match self.slot.lock().unwrap().as_deref() {
            Some(contents) => parse(contents.as_bytes()).map(Some),
            None => Ok(None),
        }
    }

    fn save(&self, items: &[TodoItem]) -> Result<(), StorageError> {
        *self.slot.lock().unwrap() = Some(serde_json::to_string(items)?);
        Ok(())
    }
}
