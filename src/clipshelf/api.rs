//! # API Facade
//!
//! A thin facade over the command layer and the single entry point for shells. It owns the
//! [`History`] and the [`AppPaths`], dispatches to `commands/*.rs` and returns structured
//! [`CmdResult`](commands::CmdResult) values. No business logic and no printing live here.
//!
//! `ClipApi<B: HistoryBackend>` is generic over the storage backend:
//! - Production: `ClipApi<FsBackend>`
//! - Testing: `ClipApi<MemBackend>`

use crate::clipboard::ClipboardSink;
use crate::commands;
use crate::error::Result;
use crate::history::History;
use crate::store::{AppPaths, HistoryBackend};

pub struct ClipApi<B: HistoryBackend> {
    history: History<B>,
    paths: AppPaths,
}

impl<B: HistoryBackend> ClipApi<B> {
    pub fn new(history: History<B>, paths: AppPaths) -> Self {
        Self { history, paths }
    }

    pub fn list_entries(&self, filter: &commands::list::EntryFilter) -> Result<commands::CmdResult> {
        commands::list::run(&self.history, filter)
    }

    pub fn show_entry(&self, id: u64) -> Result<commands::CmdResult> {
        commands::show::run(&self.history, id)
    }

    pub fn copy_entry<S: ClipboardSink>(
        &self,
        id: u64,
        sink: &mut S,
    ) -> Result<commands::CmdResult> {
        commands::copy::run(&self.history, id, sink)
    }

    pub fn delete_entries(&mut self, ids: &[u64]) -> Result<commands::CmdResult> {
        commands::delete::run(&mut self.history, ids)
    }

    pub fn clear(&mut self) -> Result<commands::CmdResult> {
        commands::clear::run(&mut self.history)
    }

    pub fn config(&self, action: commands::config::ConfigAction) -> Result<commands::CmdResult> {
        commands::config::run(&self.paths.data_dir, action)
    }

    pub fn paths(&self) -> commands::CmdResult {
        commands::paths::run(&self.paths)
    }

    pub fn history(&self) -> &History<B> {
        &self.history
    }

    /// Hands the history over, e.g. to a [`Session`](crate::session::Session).
    pub fn into_history(self) -> History<B> {
        self.history
    }
}
