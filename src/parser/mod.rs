//! Query language front end
//!
//! The parser is split into focused modules:
//! - `lexer`: tokenizer producing typed tokens with spans
//! - `operation`: the Operation/Filter data model handed to the executor
//! - `grammar`: root keywords, clause order and the operator table, shared
//!   with the completer
//! - `query`: the two-token-lookahead recursive-descent parser
//!
//! # Examples
//!
//! ```
//! use fscli::parser::{Operation, Parser};
//!
//! let parser = Parser::new();
//! let op = parser.parse("QUERY users WHERE age >= 20 LIMIT 10").unwrap();
//! assert!(matches!(op, Operation::Query(_)));
//!
//! assert!(parser.parse("GET users").is_err());
//! ```

pub mod grammar;
pub mod lexer;
pub mod operation;
mod query;

pub use lexer::{Lexer, Token, TokenKind, tokenize};
pub use operation::*;
pub use query::QueryParser;

use tracing::debug;

use crate::error::Result;

/// Entry point for turning one input line into an [`Operation`]
#[derive(Debug, Default, Clone, Copy)]
pub struct Parser {}

impl Parser {
    /// Create a new parser instance
    pub fn new() -> Self {
        Self {}
    }

    /// Parse an input line into an Operation
    ///
    /// # Arguments
    /// * `input` - The line as typed
    ///
    /// # Returns
    /// * `Result<Operation>` - Parsed operation, or the error that made the line invalid
    pub fn parse(&self, input: &str) -> Result<Operation> {
        parse(input)
    }
}

/// Parse an input line into an Operation
pub fn parse(input: &str) -> Result<Operation> {
    let mut parser = QueryParser::new(input);
    let operation = parser.parse().inspect_err(|e| debug!(error = %e, "parse failed"))?;
    Ok(operation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{FscliError, ParseError};

    #[test]
    fn test_parse_wraps_parse_errors() {
        let err = Parser::new().parse("GET users").unwrap_err();
        assert!(matches!(err, FscliError::Parse(ParseError::InvalidPath { .. })));
    }

    #[test]
    fn test_parse_is_repeatable() {
        let line = "QUERY users WHERE tags IN ['a', 'b'] ORDER BY age DESC LIMIT 3";
        assert_eq!(parse(line).unwrap(), parse(line).unwrap());
    }
}
