//! Custom prompt implementation for fscli

use std::borrow::Cow;

use reedline::{Prompt, PromptEditMode, PromptHistorySearch, PromptHistorySearchStatus};

/// Prompt showing the project the session works against
pub struct FsPrompt {
    /// Project id
    project_id: String,
}

impl FsPrompt {
    /// Create a new prompt
    ///
    /// # Arguments
    /// * `project_id` - Project shown before the `>`
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
        }
    }
}

impl Prompt for FsPrompt {
    fn render_prompt_left(&self) -> Cow<'_, str> {
        format!("{}> ", self.project_id).into()
    }

    fn render_prompt_right(&self) -> Cow<'_, str> {
        "".into()
    }

    /// Indicator is part of the left prompt
    fn render_prompt_indicator(&self, _prompt_mode: PromptEditMode) -> Cow<'_, str> {
        "".into()
    }

    fn render_prompt_multiline_indicator(&self) -> Cow<'_, str> {
        "... ".into()
    }

    fn render_prompt_history_search_indicator(
        &self,
        history_search: PromptHistorySearch,
    ) -> Cow<'_, str> {
        let prefix = match history_search.status {
            PromptHistorySearchStatus::Passing => "",
            PromptHistorySearchStatus::Failing => "failing ",
        };

        format!("({}reverse-search: {}) ", prefix, history_search.term).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_shows_project() {
        let prompt = FsPrompt::new("my-project");
        assert_eq!(prompt.render_prompt_left(), "my-project> ");
    }

    #[test]
    fn test_right_prompt_and_indicator_empty() {
        let prompt = FsPrompt::new("p");
        assert_eq!(prompt.render_prompt_right(), "");
        assert_eq!(prompt.render_prompt_indicator(PromptEditMode::Default), "");
    }

    #[test]
    fn test_multiline_indicator() {
        let prompt = FsPrompt::new("p");
        assert_eq!(prompt.render_prompt_multiline_indicator(), "... ");
    }
}
