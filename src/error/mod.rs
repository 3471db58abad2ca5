//! Error handling for fscli.
//!
//! All fallible operations in the crate return [`Result`], whose error type
//! [`FscliError`] wraps a more specific error kind:
//! - [`ParseError`] for lexical, structural and value errors in one input line
//! - [`ConfigError`] for configuration loading and validation
//! - [`StoreError`] for the collection-name source
//!
//! # Example
//!
//! ```rust
//! use fscli::error::{FscliError, ParseError};
//!
//! let err: FscliError = ParseError::InvalidOperation("SELECT".to_string()).into();
//! assert_eq!(err.to_string(), "invalid operation: SELECT");
//! ```

pub mod kinds;

pub use kinds::{ConfigError, FscliError, ParseError, Result, StoreError};
