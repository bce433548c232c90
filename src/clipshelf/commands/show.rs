use crate::commands::CmdResult;
use crate::error::{ClipError, Result};
use crate::history::History;
use crate::store::HistoryBackend;

pub fn run<B: HistoryBackend>(history: &History<B>, id: u64) -> Result<CmdResult> {
    let entry = history.get(id).ok_or(ClipError::EntryNotFound(id))?.clone();

    let mut result = CmdResult::default();
    if let Some(blob) = entry.owned_blob() {
        result.paths.push(("image".to_string(), blob.to_path_buf()));
    }
    Ok(result.with_listed_entries(vec![entry]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ContentType;
    use crate::test_utils::mem_history;
    use std::path::PathBuf;

    #[test]
    fn shows_one_entry() {
        let mut history = mem_history(10);
        history.add_text("first", ContentType::Text);
        history.add_text("second", ContentType::Text);

        let result = run(&history, 1).unwrap();
        assert_eq!(result.listed_entries.len(), 1);
        assert_eq!(result.listed_entries[0].content, "first");
        assert!(result.paths.is_empty());
    }

    #[test]
    fn image_entry_reports_its_blob() {
        let mut history = mem_history(10);
        let entry = history.add_image(PathBuf::from("/mem/images/clip.png"));

        let result = run(&history, entry.id).unwrap();
        assert_eq!(
            result.paths,
            vec![("image".to_string(), PathBuf::from("/mem/images/clip.png"))]
        );
    }

    #[test]
    fn unknown_id_is_an_error() {
        let history = mem_history(10);
        assert!(matches!(run(&history, 7), Err(ClipError::EntryNotFound(7))));
    }
}
