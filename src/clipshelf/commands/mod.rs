//! # Command Layer
//!
//! Shell-facing operations over a [`History`](crate::history::History). Each command lives
//! in its own submodule as a plain function returning a structured [`CmdResult`].
//!
//! Commands do no terminal I/O, no argument parsing and no prompting. They return data and
//! messages; the shell decides how to render them.
//!
//! ## Testing Strategy
//!
//! Command tests run against [`MemBackend`](crate::store::mem_backend::MemBackend) and the
//! clipboard fakes, so they never touch the filesystem or the real clipboard.
//!
//! ## Command Modules
//!
//! - [`list`]: list and search entries
//! - [`show`]: one entry in full
//! - [`copy`]: write an entry back to the clipboard
//! - [`delete`]: remove entries
//! - [`clear`]: remove everything
//! - [`config`]: read and change settings
//! - [`paths`]: where data lives

use crate::config::Settings;
use crate::model::Entry;
use serde::Serialize;
use std::path::PathBuf;

pub mod clear;
pub mod config;
pub mod copy;
pub mod delete;
pub mod list;
pub mod paths;
pub mod show;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    /// Entries to display, in history order.
    pub listed_entries: Vec<Entry>,
    /// Entries removed or written by the command.
    pub affected_entries: Vec<Entry>,
    pub paths: Vec<(String, PathBuf)>,
    pub settings: Option<Settings>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_listed_entries(mut self, entries: Vec<Entry>) -> Self {
        self.listed_entries = entries;
        self
    }

    pub fn with_paths(mut self, paths: Vec<(String, PathBuf)>) -> Self {
        self.paths = paths;
        self
    }

    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = Some(settings);
        self
    }
}
