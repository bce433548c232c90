use super::backend::HistoryBackend;
use super::blob_candidate_name;
use crate::error::{ClipError, Result};
use crate::model::Entry;
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

const VIRTUAL_IMAGES_DIR: &str = "/mem/images";

/// In-memory storage backend for testing.
///
/// Uses `RefCell` for interior mutability since clipshelf is single-threaded.
/// Counts blob operations so tests can assert that text entries never touch blob storage.
#[derive(Default)]
pub struct MemBackend {
    entries: RefCell<Option<Vec<Entry>>>,
    blobs: RefCell<BTreeMap<PathBuf, Vec<u8>>>,
    saves: Cell<usize>,
    blob_ops: Cell<usize>,
    simulate_write_error: Cell<bool>,
    simulate_load_error: Cell<bool>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend pre-populated with a persisted entry list, as if loaded from disk.
    pub fn with_entries(entries: Vec<Entry>) -> Self {
        let backend = Self::new();
        *backend.entries.borrow_mut() = Some(entries);
        backend
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        self.simulate_write_error.set(simulate);
    }

    /// Enable load error simulation (e.g. a corrupt history file).
    pub fn set_simulate_load_error(&self, simulate: bool) {
        self.simulate_load_error.set(simulate);
    }

    /// Put a blob in place without counting it as a blob operation.
    pub fn insert_blob(&self, path: impl Into<PathBuf>, bytes: Vec<u8>) {
        self.blobs.borrow_mut().insert(path.into(), bytes);
    }

    /// Remove a blob behind the store's back, simulating on-disk drift.
    pub fn forget_blob(&self, path: &Path) {
        self.blobs.borrow_mut().remove(path);
    }

    /// The last successfully saved entry list.
    pub fn saved_entries(&self) -> Option<Vec<Entry>> {
        self.entries.borrow().clone()
    }

    pub fn blob_paths(&self) -> Vec<PathBuf> {
        self.blobs.borrow().keys().cloned().collect()
    }

    pub fn save_count(&self) -> usize {
        self.saves.get()
    }

    /// Number of blob writes, reads and deletions performed through the trait.
    pub fn blob_op_count(&self) -> usize {
        self.blob_ops.get()
    }

    fn count_blob_op(&self) {
        self.blob_ops.set(self.blob_ops.get() + 1);
    }
}

impl HistoryBackend for MemBackend {
    fn load_entries(&self) -> Result<Vec<Entry>> {
        if self.simulate_load_error.get() {
            return Err(ClipError::Api("Simulated load error".to_string()));
        }
        Ok(self.entries.borrow().clone().unwrap_or_default())
    }

    fn save_entries(&self, entries: &[Entry]) -> Result<()> {
        if self.simulate_write_error.get() {
            return Err(ClipError::Api("Simulated write error".to_string()));
        }
        *self.entries.borrow_mut() = Some(entries.to_vec());
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }

    fn write_blob(&self, file_name: &str, bytes: &[u8]) -> Result<PathBuf> {
        self.count_blob_op();
        if self.simulate_write_error.get() {
            return Err(ClipError::Api("Simulated write error".to_string()));
        }
        let mut blobs = self.blobs.borrow_mut();
        let images = Path::new(VIRTUAL_IMAGES_DIR);
        let mut attempt = 0;
        let mut path = images.join(blob_candidate_name(file_name, attempt));
        while blobs.contains_key(&path) {
            attempt += 1;
            path = images.join(blob_candidate_name(file_name, attempt));
        }
        blobs.insert(path.clone(), bytes.to_vec());
        Ok(path)
    }

    fn read_blob(&self, path: &Path) -> Result<Option<Vec<u8>>> {
        self.count_blob_op();
        Ok(self.blobs.borrow().get(path).cloned())
    }

    fn delete_blob(&self, path: &Path) -> Result<()> {
        self.count_blob_op();
        self.blobs.borrow_mut().remove(path);
        Ok(())
    }

    fn blob_exists(&self, path: &Path) -> bool {
        self.blobs.borrow().contains_key(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colliding_blobs_get_numbered_names() {
        let backend = MemBackend::new();
        let first = backend.write_blob("clip.png", b"one").unwrap();
        let second = backend.write_blob("clip.png", b"two").unwrap();

        assert_eq!(first, Path::new(VIRTUAL_IMAGES_DIR).join("clip.png"));
        assert_eq!(second, Path::new(VIRTUAL_IMAGES_DIR).join("clip-1.png"));
        assert_eq!(backend.read_blob(&second).unwrap(), Some(b"two".to_vec()));
    }
}
