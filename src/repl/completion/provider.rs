//! Candidate provider for completion suggestions
//!
//! This module provides the trait and implementation for fetching collection
//! names under a base document path.

use super::cache::CollectionCache;

/// Trait for providing completion candidates
pub trait CandidateProvider: Send + Sync {
    /// Get the collection names under `base_path`, as currently known
    fn collections(&self, base_path: &str) -> Vec<String>;
}

impl CandidateProvider for CollectionCache {
    fn collections(&self, base_path: &str) -> Vec<String> {
        self.get(base_path)
    }
}

/// Filter a list of strings by prefix and sort intelligently
///
/// Matching is ASCII case-insensitive.
pub fn filter_by_prefix(items: &[String], prefix: &str) -> Vec<String> {
    let mut filtered: Vec<String> = items
        .iter()
        .filter(|item| starts_with_ignore_case(item, prefix))
        .cloned()
        .collect();

    // 1. Exact matches first
    // 2. Shorter names before longer
    // 3. Alphabetically for same length
    filtered.sort_by(|a, b| {
        if !prefix.is_empty() {
            let a_exact = a.eq_ignore_ascii_case(prefix);
            let b_exact = b.eq_ignore_ascii_case(prefix);
            if a_exact != b_exact {
                return b_exact.cmp(&a_exact);
            }
        }

        a.len().cmp(&b.len()).then_with(|| a.cmp(b))
    });

    filtered
}

/// ASCII case-insensitive `starts_with`
pub fn starts_with_ignore_case(text: &str, prefix: &str) -> bool {
    text.len() >= prefix.len()
        && text.is_char_boundary(prefix.len())
        && text[..prefix.len()].eq_ignore_ascii_case(prefix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repl::completion::cache::tests::CountingLister;
    use std::sync::Arc;

    fn items(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_filter_empty_prefix() {
        let filtered = filter_by_prefix(&items(&["alpha", "beta"]), "");
        assert_eq!(filtered.len(), 2);
    }

    #[test]
    fn test_filter_matching_prefix() {
        let filtered = filter_by_prefix(&items(&["alpha", "beta", "gamma"]), "a");
        assert_eq!(filtered, vec!["alpha"]);
    }

    #[test]
    fn test_filter_ignores_case() {
        let filtered = filter_by_prefix(&items(&["Users", "groups"]), "us");
        assert_eq!(filtered, vec!["Users"]);
    }

    #[test]
    fn test_filter_no_match() {
        let filtered = filter_by_prefix(&items(&["alpha", "beta"]), "z");
        assert!(filtered.is_empty());
    }

    #[test]
    fn test_exact_match_first() {
        let filtered = filter_by_prefix(&items(&["users_archive", "users", "users_backup"]), "users");
        assert_eq!(filtered, vec!["users", "users_backup", "users_archive"]);
    }

    #[test]
    fn test_complex_sorting_scenario() {
        let filtered = filter_by_prefix(
            &items(&["collection_long_name", "coll", "collection", "collections", "col"]),
            "col",
        );
        assert_eq!(
            filtered,
            vec!["col", "coll", "collection", "collections", "collection_long_name"]
        );
    }

    #[test]
    fn test_prefix_inside_multibyte_char() {
        assert!(!starts_with_ignore_case("é", "e"));
        assert!(starts_with_ignore_case("éa", "é"));
    }

    #[test]
    fn test_cache_is_a_provider() {
        let cache = CollectionCache::with_entries(
            Arc::new(CountingLister::new(&[])),
            [("", items(&["user"]))],
        );
        let provider: &dyn CandidateProvider = &cache;
        assert_eq!(provider.collections(""), vec!["user"]);
    }
}
