use crate::commands::CmdResult;
use crate::error::Result;
use crate::history::History;
use crate::model::{ContentType, Entry};
use crate::store::HistoryBackend;

pub const DEFAULT_LIMIT: usize = 50;

/// What image entries answer to in a search.
const IMAGE_KEYWORDS: &str = "image screenshot";

#[derive(Debug, Clone, Default)]
pub struct EntryFilter {
    pub search: Option<String>,
    /// Defaults to [`DEFAULT_LIMIT`].
    pub limit: Option<usize>,
}

/// Case-insensitive substring match. An empty term matches everything.
pub fn matches(entry: &Entry, term: &str) -> bool {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return true;
    }
    if entry.content.to_lowercase().contains(&term) {
        return true;
    }
    entry.kind == ContentType::Image && IMAGE_KEYWORDS.contains(&term)
}

pub fn run<B: HistoryBackend>(history: &History<B>, filter: &EntryFilter) -> Result<CmdResult> {
    let term = filter.search.as_deref().unwrap_or("");
    let limit = filter.limit.unwrap_or(DEFAULT_LIMIT);

    let entries = history
        .list()
        .into_iter()
        .filter(|entry| matches(entry, term))
        .take(limit)
        .collect();

    Ok(CmdResult::default().with_listed_entries(entries))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::mem_history;
    use std::path::PathBuf;

    fn listed(result: &CmdResult) -> Vec<&str> {
        result
            .listed_entries
            .iter()
            .map(|e| e.content.as_str())
            .collect()
    }

    #[test]
    fn lists_everything_most_recent_first() {
        let mut history = mem_history(10);
        for text in ["one", "two", "three"] {
            history.add_text(text, ContentType::Text);
        }

        let result = run(&history, &EntryFilter::default()).unwrap();
        assert_eq!(listed(&result), vec!["three", "two", "one"]);
    }

    #[test]
    fn search_ignores_case_and_keeps_order() {
        let mut history = mem_history(10);
        for text in ["Hello World", "goodbye", "HELLO again"] {
            history.add_text(text, ContentType::Text);
        }

        let filter = EntryFilter {
            search: Some("hello".into()),
            ..Default::default()
        };
        let result = run(&history, &filter).unwrap();
        assert_eq!(listed(&result), vec!["HELLO again", "Hello World"]);
    }

    #[test]
    fn images_match_image_keywords() {
        let mut history = mem_history(10);
        history.add_text("text", ContentType::Text);
        history.add_image(PathBuf::from("/mem/images/a.png"));

        for term in ["screen", "IMAGE", "age scr"] {
            let filter = EntryFilter {
                search: Some(term.into()),
                ..Default::default()
            };
            let result = run(&history, &filter).unwrap();
            assert_eq!(result.listed_entries.len(), 1, "term {:?}", term);
            assert_eq!(result.listed_entries[0].kind, ContentType::Image);
        }
    }

    #[test]
    fn blank_search_matches_all() {
        let mut history = mem_history(10);
        history.add_text("a", ContentType::Text);
        history.add_text("b", ContentType::FilePaths);

        let filter = EntryFilter {
            search: Some("   ".into()),
            ..Default::default()
        };
        assert_eq!(run(&history, &filter).unwrap().listed_entries.len(), 2);
    }

    #[test]
    fn results_are_capped() {
        let mut history = mem_history(100);
        for i in 0..80 {
            history.add_text(&format!("entry {}", i), ContentType::Text);
        }

        let result = run(&history, &EntryFilter::default()).unwrap();
        assert_eq!(result.listed_entries.len(), DEFAULT_LIMIT);
        assert_eq!(result.listed_entries[0].content, "entry 79");

        let filter = EntryFilter {
            limit: Some(3),
            ..Default::default()
        };
        assert_eq!(run(&history, &filter).unwrap().listed_entries.len(), 3);
    }
}
