//! # Storage Layer
//!
//! The [`HistoryBackend`] trait is the opaque persist/load interface of the history store.
//! It handles the "how" of storage (filesystem vs memory), while
//! [`History`](crate::history::History) handles the "what": ordering, capacity, dedup and
//! blob lifetime.
//!
//! ## Implementations
//!
//! - [`fs_backend::FsBackend`]: production storage under the per-user data directory.
//! - [`mem_backend::MemBackend`]: in-memory storage for testing, with error simulation.
//!
//! ## Storage Layout
//!
//! ```text
//! <data>/
//! ├── history.json     # Ordered entry array, most recent first
//! ├── settings.json    # Hotkey and polling settings
//! └── images/
//!     └── clip_YYYYMMDD_HHMMSS_fff.png   # One blob per image entry
//! ```
//!
//! `history.json` is always rewritten as a whole. Writes go to a temporary file that is
//! renamed over the previous one, so a failed save leaves the last good file in place.

use directories::ProjectDirs;
use std::path::PathBuf;

pub mod backend;
pub mod fs_backend;
pub mod mem_backend;

pub use backend::HistoryBackend;

pub const HISTORY_FILENAME: &str = "history.json";
pub const SETTINGS_FILENAME: &str = "settings.json";
pub const IMAGES_DIRNAME: &str = "images";

/// Environment variable that relocates the data directory.
pub const HOME_ENV: &str = "CLIPSHELF_HOME";

/// Filesystem locations used by the application.
#[derive(Debug, Clone)]
pub struct AppPaths {
    pub data_dir: PathBuf,
}

impl AppPaths {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    /// Resolves the data directory: `CLIPSHELF_HOME` if set, otherwise the
    /// platform's per-user local data directory.
    pub fn discover() -> Option<Self> {
        if let Some(home) = std::env::var_os(HOME_ENV) {
            if !home.is_empty() {
                return Some(Self::new(PathBuf::from(home)));
            }
        }
        ProjectDirs::from("com", "clipshelf", "clipshelf")
            .map(|dirs| Self::new(dirs.data_local_dir().to_path_buf()))
    }

    pub fn history_file(&self) -> PathBuf {
        self.data_dir.join(HISTORY_FILENAME)
    }

    pub fn settings_file(&self) -> PathBuf {
        self.data_dir.join(SETTINGS_FILENAME)
    }

    pub fn images_dir(&self) -> PathBuf {
        self.data_dir.join(IMAGES_DIRNAME)
    }
}

/// Blob file name for a collision attempt: `clip.png`, then `clip-1.png`, `clip-2.png`, ...
pub(crate) fn blob_candidate_name(file_name: &str, attempt: usize) -> String {
    if attempt == 0 {
        return file_name.to_string();
    }
    match file_name.rsplit_once('.') {
        Some((stem, ext)) => format!("{}-{}.{}", stem, attempt, ext),
        None => format!("{}-{}", file_name, attempt),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn candidate_names_keep_extension() {
        assert_eq!(blob_candidate_name("clip.png", 0), "clip.png");
        assert_eq!(blob_candidate_name("clip.png", 2), "clip-2.png");
        assert_eq!(blob_candidate_name("clip", 1), "clip-1");
    }

    #[test]
    fn paths_hang_off_data_dir() {
        let paths = AppPaths::new(PathBuf::from("/data/clipshelf"));
        assert_eq!(
            paths.history_file(),
            PathBuf::from("/data/clipshelf/history.json")
        );
        assert_eq!(
            paths.settings_file(),
            PathBuf::from("/data/clipshelf/settings.json")
        );
        assert_eq!(paths.images_dir(), PathBuf::from("/data/clipshelf/images"));
    }
}
