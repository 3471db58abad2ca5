//! REPL (Read-Eval-Print Loop) engine for fscli
//!
//! This module provides an interactive shell interface with features:
//! - Line editing with reedline and file-backed history
//! - Grammar-aware completion backed by a collection-name cache
//! - Token-driven syntax highlighting
//! - Multi-line input while brackets or quotes are open

mod completer;
pub mod completion;
mod engine;
mod highlighter;
mod hinter;
mod prompt;
mod shared_state;
mod validator;

pub use completer::FsCompleter;
pub use completion::{CollectionCache, CompletionEngine, Suggestion};
pub use engine::ReplEngine;
pub use highlighter::SyntaxHighlighter;
pub use hinter::FsHinter;
pub use prompt::FsPrompt;
pub use shared_state::SharedState;
pub use validator::FsValidator;

/// Whether a line asks to leave the shell
pub fn is_exit_command(line: &str) -> bool {
    matches!(line.trim().to_lowercase().as_str(), "exit" | "quit")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_commands() {
        assert!(is_exit_command("exit"));
        assert!(is_exit_command("  QUIT "));
        assert!(!is_exit_command("exit now"));
        assert!(!is_exit_command("QUERY exit"));
    }
}
