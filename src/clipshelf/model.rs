use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const IMAGE_PREVIEW: &str = "[Screenshot/Image]";
pub const EMPTY_PREVIEW: &str = "[Empty]";

/// What a captured clipboard snapshot held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContentType {
    Text,
    FilePaths,
    Image,
    Unknown,
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ContentType::Text => "text",
            ContentType::FilePaths => "files",
            ContentType::Image => "image",
            ContentType::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

/// One captured clipboard snapshot.
///
/// Serialized as `{id, content, imageRef, timestamp, type}` inside `history.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub id: u64,
    /// Text payload. Empty for image entries; file lists are joined with line breaks.
    #[serde(default)]
    pub content: String,
    /// Absolute path of the PNG blob owned by an image entry.
    #[serde(default)]
    pub image_ref: Option<PathBuf>,
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "type")]
    pub kind: ContentType,
}

impl Entry {
    pub fn new_text(id: u64, content: String, kind: ContentType) -> Self {
        Self {
            id,
            content,
            image_ref: None,
            timestamp: Utc::now(),
            kind,
        }
    }

    pub fn new_image(id: u64, blob: PathBuf) -> Self {
        Self {
            id,
            content: String::new(),
            image_ref: Some(blob),
            timestamp: Utc::now(),
            kind: ContentType::Image,
        }
    }

    /// The blob this entry owns, if it is an image entry with a reference.
    pub fn owned_blob(&self) -> Option<&Path> {
        match self.kind {
            ContentType::Image => self.image_ref.as_deref(),
            _ => None,
        }
    }

    /// True when `content` and `kind` are identical to this entry's payload.
    pub fn has_payload(&self, content: &str, kind: ContentType) -> bool {
        self.kind == kind && self.content == content
    }

    /// Single-line preview, truncated to `max_chars` characters with a trailing `...`.
    pub fn preview(&self, max_chars: usize) -> String {
        if self.kind == ContentType::Image {
            return IMAGE_PREVIEW.to_string();
        }
        if self.content.is_empty() {
            return EMPTY_PREVIEW.to_string();
        }

        let single_line = self
            .content
            .replace("\r\n", " ")
            .replace(['\n', '\r'], " ");

        if single_line.chars().count() <= max_chars {
            return single_line;
        }

        let mut truncated: String = single_line
            .chars()
            .take(max_chars.saturating_sub(3))
            .collect();
        truncated.push_str("...");
        truncated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_collapses_line_breaks() {
        let entry = Entry::new_text(1, "one\r\ntwo\nthree\rfour".into(), ContentType::Text);
        assert_eq!(entry.preview(60), "one two three four");
    }

    #[test]
    fn preview_truncates_with_ellipsis() {
        let entry = Entry::new_text(1, "abcdefghijkl".into(), ContentType::Text);
        assert_eq!(entry.preview(8), "abcde...");
        assert_eq!(entry.preview(8).chars().count(), 8);
    }

    #[test]
    fn preview_counts_characters_not_bytes() {
        let entry = Entry::new_text(1, "héllo wörld".into(), ContentType::Text);
        assert_eq!(entry.preview(11), "héllo wörld");
    }

    #[test]
    fn preview_for_image_and_empty() {
        let image = Entry::new_image(1, PathBuf::from("/tmp/clip.png"));
        assert_eq!(image.preview(60), IMAGE_PREVIEW);

        let empty = Entry::new_text(2, String::new(), ContentType::Unknown);
        assert_eq!(empty.preview(60), EMPTY_PREVIEW);
    }

    #[test]
    fn only_image_entries_own_blobs() {
        let mut text = Entry::new_text(1, "x".into(), ContentType::Text);
        text.image_ref = Some(PathBuf::from("/tmp/stray.png"));
        assert!(text.owned_blob().is_none());

        let image = Entry::new_image(2, PathBuf::from("/tmp/clip.png"));
        assert_eq!(image.owned_blob(), Some(Path::new("/tmp/clip.png")));
    }

    #[test]
    fn serializes_with_record_field_names() {
        let entry = Entry::new_image(7, PathBuf::from("/data/images/clip.png"));
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["type"], "Image");
        assert_eq!(json["imageRef"], "/data/images/clip.png");
        assert_eq!(json["content"], "");
        assert!(json.get("timestamp").is_some());
    }
}
