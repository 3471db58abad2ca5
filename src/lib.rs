//! fscli Library
//!
//! Core of an interactive shell for a hierarchical document store: a small
//! SQL-like query language, its parser, and a grammar-aware completer.
//! It can be used on its own to parse queries or drive completion in other
//! tools.
//!
//! # Modules
//!
//! - `cli`: Command-line interface and argument parsing
//! - `config`: Configuration management
//! - `error`: Error types and handling
//! - `executor`: Operation dispatch
//! - `formatter`: Output formatting and display
//! - `pager`: Output through an external pager
//! - `parser`: Tokenizer, parser and operation model
//! - `repl`: Interactive REPL engine and completion
//! - `store`: Collection listing backends
//!
//! # Example
//!
//! ```
//! use fscli::parser::Operation;
//!
//! let op = fscli::parse("COUNT users WHERE age >= 20").unwrap();
//! assert_eq!(op.name(), "count");
//! assert!(matches!(op, Operation::Count(_)));
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod executor;
pub mod formatter;
pub mod pager;
pub mod parser;
pub mod repl;
pub mod store;

// Re-export commonly used types
pub use config::Config;
pub use error::{FscliError, Result};
pub use executor::{ExecutionResult, Executor};
pub use formatter::Formatter;
pub use parser::{Operation, Parser, parse};
pub use repl::{CompletionEngine, ReplEngine};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get library version string
///
/// # Returns
/// * `&str` - Version string
pub fn version() -> &'static str {
    VERSION
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
