//! # Clipboard Capabilities
//!
//! The monitor and the copy-back path never talk to the OS directly. They go through:
//!
//! - [`ClipboardSource`]: one classified [`ClipboardSnapshot`] per call. Classification
//!   precedence is image, then text, then file list.
//! - [`ClipboardSink`]: writes a payload back.
//!
//! [`SystemClipboard`] implements both for the real clipboard. Tests use the scripted fakes
//! in `test_utils`.

use crate::error::{ClipError, Result};
use crate::history::History;
use crate::model::{ContentType, Entry};
use crate::store::HistoryBackend;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, ImageFormat};
use std::path::PathBuf;
use tracing::debug;

mod system;

pub use system::SystemClipboard;

#[cfg(windows)]
pub const LINE_SEPARATOR: &str = "\r\n";
#[cfg(not(windows))]
pub const LINE_SEPARATOR: &str = "\n";

/// Raw RGBA8 pixels, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData {
    pub width: usize,
    pub height: usize,
    pub bytes: Vec<u8>,
}

impl ImageData {
    pub fn new(width: usize, height: usize, bytes: Vec<u8>) -> Self {
        Self {
            width,
            height,
            bytes,
        }
    }

    pub fn encode_png(&self) -> Result<Vec<u8>> {
        let expected = self
            .width
            .checked_mul(self.height)
            .and_then(|pixels| pixels.checked_mul(4));
        if self.width == 0 || self.height == 0 || expected != Some(self.bytes.len()) {
            return Err(ClipError::InvalidImage(format!(
                "{}x{} image with {} bytes",
                self.width,
                self.height,
                self.bytes.len()
            )));
        }

        let width = u32::try_from(self.width)
            .map_err(|_| ClipError::InvalidImage(format!("width {} too large", self.width)))?;
        let height = u32::try_from(self.height)
            .map_err(|_| ClipError::InvalidImage(format!("height {} too large", self.height)))?;

        let mut png = Vec::new();
        PngEncoder::new(&mut png).write_image(
            &self.bytes,
            width,
            height,
            ExtendedColorType::Rgba8,
        )?;
        Ok(png)
    }

    pub fn decode_png(png: &[u8]) -> Result<Self> {
        let rgba = image::load_from_memory_with_format(png, ImageFormat::Png)?.to_rgba8();
        Ok(Self {
            width: rgba.width() as usize,
            height: rgba.height() as usize,
            bytes: rgba.into_raw(),
        })
    }
}

/// What the clipboard held at one sampling instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClipboardSnapshot {
    Image(ImageData),
    Text(String),
    FilePaths(Vec<PathBuf>),
    Empty,
}

pub trait ClipboardSource {
    fn snapshot(&mut self) -> Result<ClipboardSnapshot>;
}

pub trait ClipboardSink {
    fn set_text(&mut self, text: &str) -> Result<()>;

    fn set_image(&mut self, image: &ImageData) -> Result<()>;

    fn set_file_list(&mut self, paths: &[PathBuf]) -> Result<()>;
}

pub fn join_file_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.to_string_lossy())
        .collect::<Vec<_>>()
        .join(LINE_SEPARATOR)
}

pub fn split_file_paths(content: &str) -> Vec<PathBuf> {
    content
        .lines()
        .filter(|line| !line.is_empty())
        .map(PathBuf::from)
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyOutcome {
    /// The entry's own payload (text, image or file list) was written.
    Original,
    /// Writing the payload failed; the entry's text was written instead.
    FallbackText,
    /// Nothing was written.
    Nothing,
}

/// Writes an entry back to the clipboard.
///
/// Failures fall back to plain text when the entry has any; otherwise nothing happens.
/// An image entry whose blob is gone writes nothing.
pub fn copy_entry<B, S>(history: &History<B>, entry: &Entry, sink: &mut S) -> CopyOutcome
where
    B: HistoryBackend,
    S: ClipboardSink,
{
    match write_payload(history, entry, sink) {
        Ok(true) => CopyOutcome::Original,
        Ok(false) => CopyOutcome::Nothing,
        Err(e) => {
            debug!("Copy of entry {} failed: {}", entry.id, e);
            if entry.content.is_empty() {
                return CopyOutcome::Nothing;
            }
            match sink.set_text(&entry.content) {
                Ok(()) => CopyOutcome::FallbackText,
                Err(e) => {
                    debug!("Text fallback for entry {} failed: {}", entry.id, e);
                    CopyOutcome::Nothing
                }
            }
        }
    }
}

fn write_payload<B, S>(history: &History<B>, entry: &Entry, sink: &mut S) -> Result<bool>
where
    B: HistoryBackend,
    S: ClipboardSink,
{
    match entry.kind {
        ContentType::Image => {
            let Some(png) = history.read_image_blob(entry)? else {
                return Ok(false);
            };
            let image = ImageData::decode_png(&png)?;
            sink.set_image(&image)?;
        }
        ContentType::FilePaths => {
            sink.set_file_list(&split_file_paths(&entry.content))?;
        }
        ContentType::Text | ContentType::Unknown => {
            sink.set_text(&entry.content)?;
        }
    }
    Ok(true)
}
