//! Fakes for the clipboard and hotkey capabilities.

use crate::clipboard::{ClipboardSink, ClipboardSnapshot, ClipboardSource, ImageData};
use crate::error::{ClipError, Result};
use crate::history::History;
use crate::store::mem_backend::MemBackend;
use std::collections::VecDeque;
use std::path::PathBuf;

/// A single-color RGBA image.
pub fn solid_image(width: usize, height: usize, rgba: [u8; 4]) -> ImageData {
    let bytes = rgba
        .iter()
        .copied()
        .cycle()
        .take(width * height * 4)
        .collect();
    ImageData::new(width, height, bytes)
}

pub fn mem_history(max_entries: usize) -> History<MemBackend> {
    History::open(MemBackend::new(), max_entries)
}

/// A clipboard whose content is set by the test.
///
/// Queued results are returned one per call; once the queue is empty every call
/// returns the current content, like a real clipboard nobody touches.
pub struct FakeClipboard {
    queued: VecDeque<Result<ClipboardSnapshot>>,
    current: ClipboardSnapshot,
}

impl Default for FakeClipboard {
    fn default() -> Self {
        Self {
            queued: VecDeque::new(),
            current: ClipboardSnapshot::Empty,
        }
    }
}

impl FakeClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(snapshot: ClipboardSnapshot) -> Self {
        let mut clipboard = Self::new();
        clipboard.set(snapshot);
        clipboard
    }

    pub fn set(&mut self, snapshot: ClipboardSnapshot) {
        self.queued.clear();
        self.current = snapshot;
    }

    pub fn set_text(&mut self, text: &str) {
        self.set(ClipboardSnapshot::Text(text.to_string()));
    }

    /// Makes the next read fail as if another process held the clipboard.
    pub fn fail_next(&mut self) {
        self.queued
            .push_back(Err(ClipError::ClipboardUnavailable("locked".to_string())));
    }
}

impl ClipboardSource for FakeClipboard {
    fn snapshot(&mut self) -> Result<ClipboardSnapshot> {
        match self.queued.pop_front() {
            Some(result) => result,
            None => Ok(self.current.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Written {
    Text(String),
    Image(ImageData),
    Files(Vec<PathBuf>),
}

/// Records what was written back to the clipboard.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub written: Vec<Written>,
    pub fail_text: bool,
    pub fail_image: bool,
    pub fail_file_list: bool,
}

fn refused(what: &str) -> ClipError {
    ClipError::ClipboardUnavailable(format!("simulated {} failure", what))
}

impl ClipboardSink for RecordingSink {
    fn set_text(&mut self, text: &str) -> Result<()> {
        if self.fail_text {
            return Err(refused("text"));
        }
        self.written.push(Written::Text(text.to_string()));
        Ok(())
    }

    fn set_image(&mut self, image: &ImageData) -> Result<()> {
        if self.fail_image {
            return Err(refused("image"));
        }
        self.written.push(Written::Image(image.clone()));
        Ok(())
    }

    fn set_file_list(&mut self, paths: &[PathBuf]) -> Result<()> {
        if self.fail_file_list {
            return Err(refused("file list"));
        }
        self.written.push(Written::Files(paths.to_vec()));
        Ok(())
    }
}
