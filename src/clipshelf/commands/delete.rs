use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::history::History;
use crate::store::HistoryBackend;

const PREVIEW_CHARS: usize = 40;

pub fn run<B: HistoryBackend>(history: &mut History<B>, ids: &[u64]) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    for &id in ids {
        match history.delete(id) {
            Some(entry) => {
                result.add_message(CmdMessage::success(format!(
                    "Entry deleted ({}): {}",
                    id,
                    entry.preview(PREVIEW_CHARS)
                )));
                result.affected_entries.push(entry);
            }
            None => {
                result.add_message(CmdMessage::warning(format!("Entry not found: {}", id)));
            }
        }
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::model::ContentType;
    use crate::test_utils::mem_history;

    #[test]
    fn deletes_listed_ids() {
        let mut history = mem_history(10);
        for text in ["a", "b", "c"] {
            history.add_text(text, ContentType::Text);
        }

        let result = run(&mut history, &[1, 3]).unwrap();
        assert_eq!(result.affected_entries.len(), 2);
        assert_eq!(history.len(), 1);
        assert_eq!(history.head().unwrap().content, "b");
        assert!(result.messages[0].content.contains("Entry deleted (1): a"));
    }

    #[test]
    fn missing_ids_warn_without_failing() {
        let mut history = mem_history(10);
        history.add_text("a", ContentType::Text);

        let result = run(&mut history, &[42, 1]).unwrap();
        assert_eq!(result.messages[0].level, MessageLevel::Warning);
        assert_eq!(result.messages[1].level, MessageLevel::Success);
        assert!(history.is_empty());
    }

    #[test]
    fn deleting_image_releases_blob() {
        let mut history = mem_history(10);
        let blob = history.backend().write_blob("clip.png", b"png").unwrap();
        let entry = history.add_image(blob);

        run(&mut history, &[entry.id]).unwrap();
        assert!(history.backend().blob_paths().is_empty());
    }
}
