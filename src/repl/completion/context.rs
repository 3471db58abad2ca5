//! Completion context definitions
//!
//! This module defines the completion context types that represent what kind of
//! completion should be provided based on the current input state.

use crate::parser::grammar::Keyword;

/// Represents the type of completion needed based on the current context
#[derive(Debug, Clone, PartialEq)]
pub enum CompletionContext {
    /// Complete a root operation keyword (GET, QUERY, COUNT)
    Operation {
        /// Prefix to filter operations
        prefix: String,
    },

    /// Complete a collection path from the collection-name cache
    Collection {
        /// Path as typed so far, leading `/` included
        prefix: String,
    },

    /// Complete one of a fixed set of keywords
    Keyword {
        /// Candidates in the order they are offered
        keywords: Vec<Keyword>,
        /// Prefix to filter keywords
        prefix: String,
    },

    /// No completion available
    None,
}

impl CompletionContext {
    /// Create an operation completion context
    pub fn operation(prefix: impl Into<String>) -> Self {
        Self::Operation {
            prefix: prefix.into(),
        }
    }

    /// Create a collection completion context
    pub fn collection(prefix: impl Into<String>) -> Self {
        Self::Collection {
            prefix: prefix.into(),
        }
    }

    /// Create a keyword completion context; no keywords means no completion
    pub fn keyword(keywords: Vec<Keyword>, prefix: impl Into<String>) -> Self {
        if keywords.is_empty() {
            return Self::None;
        }
        Self::Keyword {
            keywords,
            prefix: prefix.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::grammar::{AND, ASC};

    #[test]
    fn test_collection_context() {
        let ctx = CompletionContext::collection("/us");
        if let CompletionContext::Collection { prefix } = ctx {
            assert_eq!(prefix, "/us");
        } else {
            panic!("Expected Collection context");
        }
    }

    #[test]
    fn test_keyword_context() {
        let ctx = CompletionContext::keyword(vec![AND, ASC], "A");

        if let CompletionContext::Keyword { keywords, prefix } = ctx {
            assert_eq!(keywords, vec![AND, ASC]);
            assert_eq!(prefix, "A");
        } else {
            panic!("Expected Keyword context");
        }
    }

    #[test]
    fn test_empty_keyword_set_is_none() {
        assert_eq!(
            CompletionContext::keyword(Vec::new(), "x"),
            CompletionContext::None
        );
    }

    #[test]
    fn test_constructors_keep_prefix() {
        assert_eq!(
            CompletionContext::operation("QU"),
            CompletionContext::Operation { prefix: "QU".to_string() }
        );
        assert_ne!(CompletionContext::collection(""), CompletionContext::None);
    }
}
