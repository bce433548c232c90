//! # History Store
//!
//! An ordered, capacity-bounded list of [`Entry`] values, most recent first.
//!
//! ## Invariants
//!
//! - Order is insertion order reversed; position 0 is the head. There is no other sort key.
//! - The list never holds more than `max_entries`; insertion past the limit evicts from the
//!   tail (oldest first), silently.
//! - An image entry owns exactly one blob. The blob is deleted when the entry leaves the
//!   list through eviction, deletion or clearing. Blob deletion is best-effort.
//! - A text or file-path entry identical (content and type) to the head is not added.
//!   Image entries are never suppressed here; the monitor deduplicates them by fingerprint.
//! - Ids increase monotonically and are never reused, except that [`History::clear`]
//!   restarts them at 1. After loading, the next id is the highest loaded id plus one.
//!   When ids run out at `u64::MAX`, the list is renumbered from 1 in its current order.
//!
//! ## Persistence
//!
//! Every mutating call rewrites the whole list through the backend (write-through, no
//! batching). Load and save failures are logged and swallowed: a failed load leaves the
//! store empty, a failed save keeps the in-memory state and the previous persisted state
//! until the next successful save. Image entries whose blob is missing at load time are
//! dropped.

use crate::error::Result;
use crate::model::{ContentType, Entry};
use crate::store::HistoryBackend;
use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

pub const DEFAULT_MAX_ENTRIES: usize = 100;

pub struct History<B: HistoryBackend> {
    backend: B,
    entries: Vec<Entry>,
    max_entries: usize,
    next_id: u64,
}

impl<B: HistoryBackend> History<B> {
    /// Opens the store, loading whatever the backend has persisted.
    /// A `max_entries` of 0 is treated as 1.
    pub fn open(backend: B, max_entries: usize) -> Self {
        let mut history = Self {
            backend,
            entries: Vec::new(),
            max_entries: max_entries.max(1),
            next_id: 1,
        };
        history.load();
        history
    }

    fn load(&mut self) {
        let loaded = match self.backend.load_entries() {
            Ok(loaded) => loaded,
            Err(e) => {
                warn!("Could not load history: {}", e);
                return;
            }
        };

        let total = loaded.len();
        let backend = &self.backend;
        self.entries = loaded
            .into_iter()
            .filter(|entry| match entry.owned_blob() {
                Some(blob) => backend.blob_exists(blob),
                None => true,
            })
            .collect();

        let dropped = total - self.entries.len();
        if dropped > 0 {
            debug!("Dropped {} image entries with missing blobs", dropped);
        }

        let highest = self.entries.iter().map(|e| e.id).max().unwrap_or(0);
        let renumbered = match highest.checked_add(1) {
            Some(next) => {
                self.next_id = next;
                false
            }
            None => {
                warn!("History ids are exhausted, renumbering {} entries", self.entries.len());
                self.renumber();
                true
            }
        };

        // A lowered limit applies to what was already persisted
        if self.trim() > 0 || renumbered {
            self.persist();
        }

        info!("Loaded {} history entries", self.entries.len());
    }

    /// Adds a text or file-path entry at the head.
    ///
    /// Returns false (and changes nothing) when `content` is empty or identical,
    /// content and type, to the current head.
    pub fn add_text(&mut self, content: &str, kind: ContentType) -> bool {
        if content.is_empty() {
            return false;
        }
        if let Some(head) = self.entries.first() {
            if head.has_payload(content, kind) {
                return false;
            }
        }

        let entry = Entry::new_text(self.allocate_id(), content.to_string(), kind);
        self.entries.insert(0, entry);
        self.trim();
        self.persist();
        true
    }

    /// Adds an image entry owning `blob`. Never deduplicated at this layer.
    pub fn add_image(&mut self, blob: PathBuf) -> Entry {
        let entry = Entry::new_image(self.allocate_id(), blob);
        self.entries.insert(0, entry.clone());
        self.trim();
        self.persist();
        entry
    }

    /// Writes PNG bytes to a new blob named after the capture time.
    pub fn store_image_blob(&self, png: &[u8], captured_at: DateTime<Local>) -> Result<PathBuf> {
        let file_name = format!("clip_{}.png", captured_at.format("%Y%m%d_%H%M%S_%3f"));
        self.backend.write_blob(&file_name, png)
    }

    /// Reads the blob owned by an image entry. Ok(None) for other entries or missing blobs.
    pub fn read_image_blob(&self, entry: &Entry) -> Result<Option<Vec<u8>>> {
        match entry.owned_blob() {
            Some(blob) => self.backend.read_blob(blob),
            None => Ok(None),
        }
    }

    pub fn get(&self, id: u64) -> Option<&Entry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// The most recently inserted entry.
    pub fn head(&self) -> Option<&Entry> {
        self.entries.first()
    }

    /// Removes the entry with `id`, deleting its blob if it owns one.
    pub fn delete(&mut self, id: u64) -> Option<Entry> {
        let pos = self.entries.iter().position(|e| e.id == id)?;
        let entry = self.entries.remove(pos);
        if let Some(blob) = entry.owned_blob() {
            self.release_blob(blob);
        }
        self.persist();
        Some(entry)
    }

    /// Removes every entry and owned blob, and restarts ids at 1.
    pub fn clear(&mut self) {
        for entry in std::mem::take(&mut self.entries) {
            if let Some(blob) = entry.owned_blob() {
                self.release_blob(blob);
            }
        }
        self.next_id = 1;
        self.persist();
    }

    /// A point-in-time copy of the entries, most recent first.
    pub fn list(&self) -> Vec<Entry> {
        self.entries.clone()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    fn allocate_id(&mut self) -> u64 {
        if self.next_id == u64::MAX {
            warn!("History ids are exhausted, renumbering {} entries", self.entries.len());
            self.renumber();
        }
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Reassigns ids 1..=len, oldest lowest, keeping the order.
    fn renumber(&mut self) {
        let count = self.entries.len() as u64;
        for (id, entry) in (1..=count).rev().zip(self.entries.iter_mut()) {
            entry.id = id;
        }
        self.next_id = count + 1;
    }

    /// Evicts from the tail until the limit holds. Returns the number evicted.
    fn trim(&mut self) -> usize {
        let mut evicted = 0;
        while self.entries.len() > self.max_entries {
            let Some(oldest) = self.entries.pop() else {
                break;
            };
            if let Some(blob) = oldest.owned_blob() {
                self.release_blob(blob);
            }
            debug!("Evicted entry {}", oldest.id);
            evicted += 1;
        }
        evicted
    }

    fn release_blob(&self, blob: &Path) {
        if let Err(e) = self.backend.delete_blob(blob) {
            debug!("Could not delete blob {}: {}", blob.display(), e);
        }
    }

    fn persist(&self) {
        if let Err(e) = self.backend.save_entries(&self.entries) {
            warn!("Could not save history: {}", e);
        }
    }
}
