//! # Clipboard Monitor
//!
//! Bridges a [`ClipboardSource`] to a [`History`] by sampling at a fixed interval. The OS
//! offers no reliable cross-application change notification, so each [`Monitor::tick`]
//! reads the clipboard, fingerprints it and compares against the last fingerprint this
//! monitor saw.
//!
//! The last fingerprint belongs to the monitor instance and is never persisted. Content
//! identical to the previous sample is ignored; content that comes back after something
//! else was copied is captured again.
//!
//! Read failures (a locked clipboard, a vanished format) are swallowed. The next tick simply
//! tries again.

use crate::clipboard::{join_file_paths, ClipboardSnapshot, ClipboardSource, ImageData};
use crate::fingerprint::{self, Fingerprint};
use crate::history::History;
use crate::model::{ContentType, Entry};
use crate::store::HistoryBackend;
use chrono::{DateTime, Local};
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::Duration;
use tracing::{debug, trace};

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Emitted when a tick observed new clipboard content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
    /// The entry now at the head of the history.
    pub entry: Entry,
    /// False when the store suppressed the content as a duplicate of the head.
    pub added: bool,
}

pub struct Monitor<C: ClipboardSource> {
    source: C,
    last_fingerprint: Option<Fingerprint>,
    subscriber: Option<Sender<ChangeEvent>>,
}

impl<C: ClipboardSource> Monitor<C> {
    pub fn new(source: C) -> Self {
        Self {
            source,
            last_fingerprint: None,
            subscriber: None,
        }
    }

    /// Opens the change channel. There is a single consumer: subscribing again
    /// disconnects the previous receiver.
    pub fn subscribe(&mut self) -> Receiver<ChangeEvent> {
        let (sender, receiver) = mpsc::channel();
        self.subscriber = Some(sender);
        receiver
    }

    pub fn last_fingerprint(&self) -> Option<&Fingerprint> {
        self.last_fingerprint.as_ref()
    }

    pub fn source_mut(&mut self) -> &mut C {
        &mut self.source
    }

    /// Samples the clipboard once, forwarding new content to `history`.
    pub fn tick<B: HistoryBackend>(&mut self, history: &mut History<B>) -> Option<ChangeEvent> {
        let snapshot = match self.source.snapshot() {
            Ok(snapshot) => snapshot,
            Err(e) => {
                debug!("Clipboard read failed: {}", e);
                return None;
            }
        };

        let event = match snapshot {
            ClipboardSnapshot::Image(image) => self.observe_image(&image, history, Local::now()),
            ClipboardSnapshot::Text(text) => {
                let print = fingerprint::of_text(&text);
                self.observe_text(&text, ContentType::Text, print, history)
            }
            ClipboardSnapshot::FilePaths(paths) => {
                let joined = join_file_paths(&paths);
                let print = fingerprint::of_file_paths(&joined);
                self.observe_text(&joined, ContentType::FilePaths, print, history)
            }
            ClipboardSnapshot::Empty => None,
        }?;

        self.publish(&event);
        Some(event)
    }

    fn observe_image<B: HistoryBackend>(
        &mut self,
        image: &ImageData,
        history: &mut History<B>,
        captured_at: DateTime<Local>,
    ) -> Option<ChangeEvent> {
        let (print, png) = match image.encode_png() {
            Ok(png) => (fingerprint::of_encoded_image(&png), Some(png)),
            Err(e) => {
                debug!("Could not encode clipboard image: {}", e);
                (
                    fingerprint::of_image_dimensions(image.width, image.height),
                    None,
                )
            }
        };

        if !self.remember(print) {
            return None;
        }

        // Nothing to keep without encoded bytes
        let png = png?;
        let blob = match history.store_image_blob(&png, captured_at) {
            Ok(blob) => blob,
            Err(e) => {
                debug!("Could not save clipboard image: {}", e);
                return None;
            }
        };

        let entry = history.add_image(blob);
        Some(ChangeEvent { entry, added: true })
    }

    fn observe_text<B: HistoryBackend>(
        &mut self,
        content: &str,
        kind: ContentType,
        print: Fingerprint,
        history: &mut History<B>,
    ) -> Option<ChangeEvent> {
        if content.is_empty() || !self.remember(print) {
            return None;
        }

        let added = history.add_text(content, kind);
        let entry = history.head()?.clone();
        Some(ChangeEvent { entry, added })
    }

    /// Records `print` as the latest fingerprint. False if it was already the latest.
    fn remember(&mut self, print: Fingerprint) -> bool {
        if self.last_fingerprint.as_ref() == Some(&print) {
            return false;
        }
        trace!("Clipboard fingerprint changed: {:?}", print);
        self.last_fingerprint = Some(print);
        true
    }

    fn publish(&mut self, event: &ChangeEvent) {
        let disconnected = self
            .subscriber
            .as_ref()
            .is_some_and(|sender| sender.send(event.clone()).is_err());
        if disconnected {
            debug!("Change subscriber went away");
            self.subscriber = None;
        }
    }
}
