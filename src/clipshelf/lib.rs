//! # Clipshelf Architecture
//!
//! Clipshelf keeps a scrollable history of clipboard content (text, file-path lists and
//! images). It is a **library with a thin shell on top**: the history store, the clipboard
//! monitor and the hotkey listener know nothing about terminals or windows, so the same core
//! can sit behind the bundled CLI, a slide-in panel, or a test harness.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Shell (cli/, wired by main.rs)                             │
//! │  - Parses arguments, renders entries, owns stdout/stderr    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs) + Commands (commands/*.rs)              │
//! │  - Shell-facing operations returning structured results     │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Core (history.rs, monitor.rs, hotkey.rs, session.rs)       │
//! │  - Bounded history, polling monitor, key chord matching     │
//! │  - Single-threaded: everything runs on the owning thread    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - HistoryBackend trait                                     │
//! │  - FsBackend (production), MemBackend (testing)             │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Capabilities at the OS seams
//!
//! Everything that touches the operating system goes through a small trait:
//!
//! - [`clipboard::ClipboardSource`]: reads one classified snapshot of the clipboard.
//! - [`clipboard::ClipboardSink`]: writes text, images or file lists back.
//! - [`hotkey::HotkeySource`]: yields raw key presses captured elsewhere (e.g. by an OS hook
//!   running on its own thread and handing presses over a channel).
//!
//! [`clipboard::SystemClipboard`] implements the first two on top of `arboard`. Tests feed
//! scripted snapshots through the fakes in `test_utils`.
//!
//! ## Module Overview
//!
//! - [`model`]: `Entry` and `ContentType`
//! - [`history`]: the bounded, write-through history store
//! - [`monitor`]: polling clipboard monitor and change notifications
//! - [`fingerprint`]: cheap change detection
//! - [`hotkey`]: hotkey matching and toggle events
//! - [`session`]: the single-thread loop tying monitor and hotkeys together
//! - [`store`]: storage abstraction and implementations
//! - [`config`]: persisted settings and key naming
//! - [`api`] / [`commands`]: operations for shells
//! - [`error`]: error types

pub mod api;
pub mod clipboard;
pub mod commands;
pub mod config;
pub mod error;
pub mod fingerprint;
pub mod history;
pub mod hotkey;
pub mod model;
pub mod monitor;
pub mod session;
pub mod store;

#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;
