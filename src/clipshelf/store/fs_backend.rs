use super::backend::HistoryBackend;
use super::{blob_candidate_name, HISTORY_FILENAME, IMAGES_DIRNAME};
use crate::error::{ClipError, Result};
use crate::model::Entry;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use uuid::Uuid;

pub struct FsBackend {
    root: PathBuf,
}

impl FsBackend {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn history_file(&self) -> PathBuf {
        self.root.join(HISTORY_FILENAME)
    }

    pub fn images_dir(&self) -> PathBuf {
        self.root.join(IMAGES_DIRNAME)
    }

    fn ensure_dir(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path).map_err(ClipError::Io)?;
        }
        Ok(())
    }

}

impl HistoryBackend for FsBackend {
    fn load_entries(&self) -> Result<Vec<Entry>> {
        let data_file = self.history_file();
        if !data_file.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(data_file).map_err(ClipError::Io)?;
        let entries: Vec<Entry> =
            serde_json::from_str(&content).map_err(ClipError::Serialization)?;
        Ok(entries)
    }

    fn save_entries(&self, entries: &[Entry]) -> Result<()> {
        self.ensure_dir(&self.root)?;

        let data_file = self.history_file();
        let content = serde_json::to_string_pretty(entries).map_err(ClipError::Serialization)?;

        // Atomic write: a failed save keeps the previous file intact
        let tmp_file = self.root.join(format!(".history-{}.tmp", Uuid::new_v4()));
        if let Err(e) = fs::write(&tmp_file, content) {
            let _ = fs::remove_file(&tmp_file);
            return Err(ClipError::Io(e));
        }
        fs::rename(&tmp_file, &data_file).map_err(|e| {
            let _ = fs::remove_file(&tmp_file);
            ClipError::Io(e)
        })?;

        Ok(())
    }

    fn write_blob(&self, file_name: &str, bytes: &[u8]) -> Result<PathBuf> {
        let images = self.images_dir();
        self.ensure_dir(&images)?;

        let mut attempt = 0;
        loop {
            let path = images.join(blob_candidate_name(file_name, attempt));
            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(mut file) => {
                    if let Err(e) = file.write_all(bytes) {
                        drop(file);
                        let _ = fs::remove_file(&path);
                        return Err(ClipError::Io(e));
                    }
                    return Ok(path);
                }
                Err(e) if e.kind() == ErrorKind::AlreadyExists => attempt += 1,
                Err(e) => return Err(ClipError::Io(e)),
            }
        }
    }

    fn read_blob(&self, path: &Path) -> Result<Option<Vec<u8>>> {
        match fs::read(path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(ClipError::Io(e)),
        }
    }

    fn delete_blob(&self, path: &Path) -> Result<()> {
        match fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ClipError::Io(e)),
        }
    }

    fn blob_exists(&self, path: &Path) -> bool {
        path.is_file()
    }
}
