//! Completion engine - orchestrates the completion flow
//!
//! This module ties together the completion components: tokenizing the text
//! before the cursor, replaying the grammar to find the completion context,
//! and turning that context into suggestions.

use std::sync::Arc;

use super::context::CompletionContext;
use super::fsm::GrammarReplay;
use super::provider::{CandidateProvider, filter_by_prefix, starts_with_ignore_case};
use super::token_stream::TokenStream;
use crate::parser::grammar::{self, Keyword, ROOT_OPERATIONS};

/// A candidate next token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    /// Replacement text
    pub text: String,
    /// Human-readable description shown in the menu
    pub description: String,
}

impl Suggestion {
    fn new(text: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            description: description.into(),
        }
    }
}

impl From<Keyword> for Suggestion {
    fn from(keyword: Keyword) -> Self {
        Self::new(keyword.text, keyword.description)
    }
}

/// Main completion engine
pub struct CompletionEngine {
    /// Candidate provider for collection names
    provider: Arc<dyn CandidateProvider>,
}

impl CompletionEngine {
    /// Create a new completion engine
    ///
    /// # Arguments
    /// * `provider` - Candidate provider for fetching collection names
    pub fn new(provider: Arc<dyn CandidateProvider>) -> Self {
        Self { provider }
    }

    /// Suggestions for the end of `text`
    pub fn suggest(&self, text: &str) -> Vec<Suggestion> {
        let stream = TokenStream::new(text, text.len());
        self.suggestions(&GrammarReplay::run(&stream))
    }

    /// Complete the input at the given cursor position
    ///
    /// # Arguments
    /// * `line` - The input line
    /// * `pos` - Cursor position (byte index)
    ///
    /// # Returns
    /// * `(usize, Vec<Suggestion>)` - Start of the text to replace and the suggestions
    pub fn complete(&self, line: &str, pos: usize) -> (usize, Vec<Suggestion>) {
        let stream = TokenStream::new(line, pos);
        let context = GrammarReplay::run(&stream);
        let mut suggestions = self.suggestions(&context);

        // Keep a typed leading slash on collection paths
        if let CompletionContext::Collection { prefix } = &context
            && prefix.starts_with('/')
        {
            for suggestion in &mut suggestions {
                suggestion.text.insert(0, '/');
            }
        }

        (stream.completion_start(), suggestions)
    }

    fn suggestions(&self, context: &CompletionContext) -> Vec<Suggestion> {
        match context {
            CompletionContext::Operation { prefix } => ROOT_OPERATIONS
                .iter()
                .map(|op| op.keyword())
                .filter(|k| starts_with_ignore_case(k.text, prefix))
                .map(Suggestion::from)
                .collect(),
            CompletionContext::Keyword { keywords, prefix } => keywords
                .iter()
                .filter(|k| starts_with_ignore_case(k.text, prefix))
                .map(|k| Suggestion::from(*k))
                .collect(),
            CompletionContext::Collection { prefix } => self.collection_suggestions(prefix),
            CompletionContext::None => Vec::new(),
        }
    }

    /// Child collections for a partial path
    fn collection_suggestions(&self, partial: &str) -> Vec<Suggestion> {
        let path = grammar::normalize_path(partial);
        let segments: Vec<&str> = path.split('/').collect();

        // Even count: the cursor is on a document id
        if segments.len() % 2 == 0 {
            return Vec::new();
        }

        let (last, parents) = match segments.split_last() {
            Some(split) => split,
            None => return Vec::new(),
        };
        let base = parents.join("/");
        let names = self.provider.collections(&base);

        filter_by_prefix(&names, last)
            .into_iter()
            .map(|name| {
                let text = if base.is_empty() {
                    name.clone()
                } else {
                    format!("{base}/{name}")
                };
                Suggestion::new(text, name)
            })
            .collect()
    }
}
