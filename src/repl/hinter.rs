//! Hinter for reedline - inline hints from history, then from the grammar

use std::sync::Arc;

use nu_ansi_term::{Color, Style};
use reedline::{Hinter, History};

use super::completion::CompletionEngine;

/// Inline hinter
///
/// Shows the rest of the most recent history entry that starts with the
/// line. Without one, and when exactly one completion fits the word being
/// typed, shows the rest of that word.
pub struct FsHinter {
    /// Style for hints
    style: Style,
    /// Current hint text
    current_hint: String,
    /// Grammar-aware completion for keyword hints
    engine: Arc<CompletionEngine>,
}

impl FsHinter {
    /// Create a new hinter with the default style
    pub fn new(engine: Arc<CompletionEngine>) -> Self {
        Self {
            style: Style::new().italic().fg(Color::DarkGray),
            current_hint: String::new(),
            engine,
        }
    }

    fn history_hint(line: &str, history: &dyn History) -> Option<String> {
        let item = history
            .search(reedline::SearchQuery::last_with_prefix(line.to_string(), None))
            .ok()
            .and_then(|results| results.into_iter().next())?;

        let history_line = item.command_line.as_str();
        if history_line.len() > line.len() && history_line.starts_with(line) {
            Some(history_line[line.len()..].to_string())
        } else {
            None
        }
    }

    fn completion_hint(&self, line: &str) -> Option<String> {
        let (start, suggestions) = self.engine.complete(line, line.len());
        let [only] = suggestions.as_slice() else {
            return None;
        };

        // Only extend text typed in the suggestion's own casing
        let typed = &line[start..];
        if typed.is_empty() || only.text.len() <= typed.len() || !only.text.starts_with(typed) {
            return None;
        }
        Some(only.text[typed.len()..].to_string())
    }
}

impl Hinter for FsHinter {
    fn handle(
        &mut self,
        line: &str,
        pos: usize,
        history: &dyn History,
        use_ansi_coloring: bool,
        _cwd: &str,
    ) -> String {
        self.current_hint.clear();

        // Only hint at the end of a non-empty line
        if pos != line.len() || line.trim().is_empty() {
            return String::new();
        }

        let hint = Self::history_hint(line, history).or_else(|| self.completion_hint(line));
        let Some(hint) = hint else {
            return String::new();
        };

        self.current_hint = hint.clone();
        if use_ansi_coloring {
            self.style.paint(hint).to_string()
        } else {
            hint
        }
    }

    fn complete_hint(&self) -> String {
        self.current_hint.clone()
    }

    fn next_hint_token(&self) -> String {
        self.current_hint
            .split_inclusive(char::is_whitespace)
            .next()
            .unwrap_or_default()
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repl::completion::CollectionCache;
    use crate::store::JsonStore;
    use reedline::{FileBackedHistory, HistoryItem};

    fn create_hinter() -> FsHinter {
        let cache = CollectionCache::with_entries(
            Arc::new(JsonStore::empty()),
            [("", vec!["users".to_string()])],
        );
        FsHinter::new(Arc::new(CompletionEngine::new(Arc::new(cache))))
    }

    fn history_with(lines: &[&str]) -> FileBackedHistory {
        let mut history = FileBackedHistory::new(100).unwrap();
        for line in lines {
            history.save(HistoryItem::from_command_line(*line)).unwrap();
        }
        history
    }

    #[test]
    fn test_empty_line_no_hint() {
        let mut hinter = create_hinter();
        let history = history_with(&[]);
        assert_eq!(hinter.handle("", 0, &history, false, "/tmp"), "");
    }

    #[test]
    fn test_cursor_not_at_end_no_hint() {
        let mut hinter = create_hinter();
        let history = history_with(&[]);
        assert_eq!(hinter.handle("QUERY users", 2, &history, false, "/tmp"), "");
    }

    #[test]
    fn test_history_hint_wins() {
        let mut hinter = create_hinter();
        let history = history_with(&["QUERY users LIMIT 3"]);

        assert_eq!(hinter.handle("QUERY us", 8, &history, false, "/tmp"), "ers LIMIT 3");
        assert_eq!(hinter.complete_hint(), "ers LIMIT 3");
        assert_eq!(hinter.next_hint_token(), "ers ");
    }

    #[test]
    fn test_single_completion_hint() {
        let mut hinter = create_hinter();
        let history = history_with(&[]);

        assert_eq!(hinter.handle("QUERY us", 8, &history, false, "/tmp"), "ers");
        assert_eq!(hinter.handle("QUERY users SEL", 15, &history, false, "/tmp"), "ECT");
    }

    #[test]
    fn test_differently_cased_word_no_hint() {
        let mut hinter = create_hinter();
        let history = history_with(&[]);

        assert_eq!(hinter.handle("QUERY users sel", 15, &history, false, "/tmp"), "");
        assert_eq!(hinter.handle("QUERY users Sel", 15, &history, false, "/tmp"), "");
        assert_eq!(hinter.complete_hint(), "");
    }

    #[test]
    fn test_ambiguous_completion_no_hint() {
        let mut hinter = create_hinter();
        let history = history_with(&[]);
        assert_eq!(hinter.handle("QUERY users ", 12, &history, false, "/tmp"), "");
        assert_eq!(hinter.complete_hint(), "");
    }
}
