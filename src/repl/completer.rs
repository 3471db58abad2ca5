//! Completer for reedline - provides completion suggestions

use std::sync::Arc;

use reedline::{Completer, Span, Suggestion as MenuSuggestion};

use super::completion::CompletionEngine;

/// Reedline adapter over the completion engine
pub struct FsCompleter {
    /// Completion engine for grammar-aware suggestions
    completion_engine: Arc<CompletionEngine>,
}

impl FsCompleter {
    /// Create a new completer
    ///
    /// # Arguments
    /// * `completion_engine` - Engine shared with the hinter
    pub fn new(completion_engine: Arc<CompletionEngine>) -> Self {
        Self { completion_engine }
    }
}

impl Completer for FsCompleter {
    fn complete(&mut self, line: &str, pos: usize) -> Vec<MenuSuggestion> {
        let (start, suggestions) = self.completion_engine.complete(line, pos);

        // Nothing typed yet and the cursor touches the previous token
        let needs_space = start == pos
            && line[..pos]
                .chars()
                .next_back()
                .is_some_and(|c| !c.is_whitespace());

        suggestions
            .into_iter()
            .map(|s| MenuSuggestion {
                value: if needs_space {
                    format!(" {}", s.text)
                } else {
                    s.text
                },
                description: Some(s.description),
                style: None,
                extra: None,
                span: Span::new(start, pos),
                append_whitespace: true,
                match_indices: None,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repl::completion::CollectionCache;
    use crate::store::JsonStore;

    fn create_test_completer() -> FsCompleter {
        let cache = CollectionCache::with_entries(
            Arc::new(JsonStore::empty()),
            [("", vec!["users".to_string(), "groups".to_string()])],
        );
        FsCompleter::new(Arc::new(CompletionEngine::new(Arc::new(cache))))
    }

    #[test]
    fn test_complete_collection() {
        let mut completer = create_test_completer();
        let suggestions = completer.complete("QUERY us", 8);

        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].value, "users");
        assert_eq!(suggestions[0].description.as_deref(), Some("users"));
        assert_eq!(suggestions[0].span, Span::new(6, 8));
    }

    #[test]
    fn test_keywords_after_space() {
        let mut completer = create_test_completer();
        let suggestions = completer.complete("QUERY users ", 12);

        let values: Vec<&str> = suggestions.iter().map(|s| s.value.as_str()).collect();
        assert_eq!(values, vec!["SELECT", "WHERE", "ORDER BY", "LIMIT"]);
        assert!(suggestions.iter().all(|s| s.span == Span::new(12, 12)));
    }

    #[test]
    fn test_keywords_right_after_value_get_a_space() {
        let mut completer = create_test_completer();
        let suggestions = completer.complete("QUERY users WHERE a == 1", 24);

        assert_eq!(suggestions[0].value, " AND");
        assert_eq!(suggestions[0].span, Span::new(24, 24));
    }

    #[test]
    fn test_by_follows_order() {
        let mut completer = create_test_completer();

        let suggestions = completer.complete("QUERY users ORDER", 17);
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].value, " BY");

        let suggestions = completer.complete("QUERY users ORDER ", 18);
        assert_eq!(suggestions[0].value, "BY");
        assert_eq!(suggestions[0].span, Span::new(18, 18));
    }

    #[test]
    fn test_no_suggestions_mid_filter() {
        let mut completer = create_test_completer();
        assert!(completer.complete("QUERY users WHERE a ==", 22).is_empty());
    }
}
