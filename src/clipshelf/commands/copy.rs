use crate::clipboard::{copy_entry, ClipboardSink, CopyOutcome};
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{ClipError, Result};
use crate::history::History;
use crate::store::HistoryBackend;

pub fn run<B, S>(history: &History<B>, id: u64, sink: &mut S) -> Result<CmdResult>
where
    B: HistoryBackend,
    S: ClipboardSink,
{
    let entry = history.get(id).ok_or(ClipError::EntryNotFound(id))?.clone();

    let mut result = CmdResult::default();
    let message = match copy_entry(history, &entry, sink) {
        CopyOutcome::Original => {
            CmdMessage::success(format!("Copied entry {} to the clipboard", id))
        }
        CopyOutcome::FallbackText => {
            CmdMessage::warning(format!("Copied entry {} as plain text", id))
        }
        CopyOutcome::Nothing => CmdMessage::error(format!("Nothing copied for entry {}", id)),
    };
    result.add_message(message);
    result.affected_entries.push(entry);
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::model::ContentType;
    use crate::test_utils::{mem_history, RecordingSink, Written};

    #[test]
    fn copies_text() {
        let mut history = mem_history(10);
        history.add_text("hello", ContentType::Text);

        let mut sink = RecordingSink::default();
        let result = run(&history, 1, &mut sink).unwrap();
        assert_eq!(result.messages[0].level, MessageLevel::Success);
        assert_eq!(sink.written, vec![Written::Text("hello".into())]);
    }

    #[test]
    fn fallback_is_a_warning() {
        let mut history = mem_history(10);
        history.add_text("/a\n/b", ContentType::FilePaths);

        let mut sink = RecordingSink {
            fail_file_list: true,
            ..Default::default()
        };
        let result = run(&history, 1, &mut sink).unwrap();
        assert_eq!(result.messages[0].level, MessageLevel::Warning);
    }

    #[test]
    fn unknown_id_is_an_error() {
        let history = mem_history(10);
        let mut sink = RecordingSink::default();
        assert!(matches!(
            run(&history, 3, &mut sink),
            Err(ClipError::EntryNotFound(3))
        ));
        assert!(sink.written.is_empty());
    }
}
