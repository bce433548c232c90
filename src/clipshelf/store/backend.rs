use crate::error::Result;
use crate::model::Entry;
use std::path::{Path, PathBuf};

/// Abstract interface for raw history storage I/O.
///
/// All methods take `&self`: implementations are either stateless file I/O or use
/// interior mutability, since clipshelf runs single-threaded.
pub trait HistoryBackend {
    // --- History Operations ---

    /// Load the persisted entry list, most recent first.
    /// Returns an empty list if nothing has been persisted yet.
    fn load_entries(&self) -> Result<Vec<Entry>>;

    /// Replace the persisted entry list with `entries`.
    fn save_entries(&self, entries: &[Entry]) -> Result<()>;

    // --- Blob Operations ---

    /// Store an image blob under a name derived from `file_name`, returning its
    /// absolute reference. Never overwrites an existing blob.
    fn write_blob(&self, file_name: &str, bytes: &[u8]) -> Result<PathBuf>;

    /// Read a blob. Returns Ok(None) if it does not exist.
    fn read_blob(&self, path: &Path) -> Result<Option<Vec<u8>>>;

    /// Delete a blob. Deleting a missing blob is not an error.
    fn delete_blob(&self, path: &Path) -> Result<()>;

    fn blob_exists(&self, path: &Path) -> bool;
}
