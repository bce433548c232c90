use super::{ClipboardSink, ClipboardSnapshot, ClipboardSource, ImageData};
use crate::error::{ClipError, Result};
use arboard::Clipboard;
use std::borrow::Cow;
use std::path::PathBuf;

/// The OS clipboard, through `arboard`.
pub struct SystemClipboard {
    inner: Clipboard,
    hold: bool,
}

impl SystemClipboard {
    pub fn new() -> Result<Self> {
        Ok(Self {
            inner: Clipboard::new()?,
            hold: false,
        })
    }

    /// A clipboard for short-lived processes. On Linux, X11 and Wayland drop the
    /// selection when its owner exits, so writes block until another application
    /// takes the clipboard over.
    pub fn holding() -> Result<Self> {
        Ok(Self {
            inner: Clipboard::new()?,
            hold: true,
        })
    }

    pub fn holds_selection(&self) -> bool {
        holds_selection(self.hold)
    }
}

fn holds_selection(hold: bool) -> bool {
    hold && cfg!(target_os = "linux")
}

/// Maps "this format is not on the clipboard" to None.
fn available<T>(result: std::result::Result<T, arboard::Error>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(arboard::Error::ContentNotAvailable) => Ok(None),
        Err(e) => Err(ClipError::Clipboard(e)),
    }
}

impl ClipboardSource for SystemClipboard {
    fn snapshot(&mut self) -> Result<ClipboardSnapshot> {
        if let Some(image) = available(self.inner.get_image())? {
            return Ok(ClipboardSnapshot::Image(ImageData::new(
                image.width,
                image.height,
                image.bytes.into_owned(),
            )));
        }

        if let Some(text) = available(self.inner.get_text())? {
            return Ok(ClipboardSnapshot::Text(text));
        }

        if let Some(paths) = available(self.inner.get().file_list())? {
            return Ok(ClipboardSnapshot::FilePaths(paths));
        }

        Ok(ClipboardSnapshot::Empty)
    }
}

impl ClipboardSink for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<()> {
        #[cfg(target_os = "linux")]
        {
            use arboard::SetExtLinux;
            if self.hold {
                self.inner.set().wait().text(text)?;
                return Ok(());
            }
        }
        self.inner.set_text(text)?;
        Ok(())
    }

    fn set_image(&mut self, image: &ImageData) -> Result<()> {
        let data = arboard::ImageData {
            width: image.width,
            height: image.height,
            bytes: Cow::Borrowed(&image.bytes),
        };
        #[cfg(target_os = "linux")]
        {
            use arboard::SetExtLinux;
            if self.hold {
                self.inner.set().wait().image(data)?;
                return Ok(());
            }
        }
        self.inner.set_image(data)?;
        Ok(())
    }

    // arboard cannot place a file-drop list yet; callers fall back to text
    fn set_file_list(&mut self, _paths: &[PathBuf]) -> Result<()> {
        Err(ClipError::Unsupported(
            "writing file lists to the system clipboard".to_string(),
        ))
    }
}
