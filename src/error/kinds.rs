use std::{fmt, io};

/// Crate-wide `Result` type using [`FscliError`] as the error.
///
/// This alias is re-exported by the parent `error` module and is intended
/// to be used throughout the crate for fallible operations.
pub type Result<T> = std::result::Result<T, FscliError>;

/// Top-level error type for fscli.
///
/// This type wraps more specific error kinds and provides a single
/// error type that can be used throughout the crate.
#[derive(Debug)]
pub enum FscliError {
    /// Input line could not be parsed.
    Parse(ParseError),

    /// Configuration errors.
    Config(ConfigError),

    /// Collection source errors.
    Store(StoreError),

    /// I/O errors.
    Io(io::Error),

    /// Generic error with a free-form message.
    Generic(String),
}

/// Parsing errors. Each one is fatal to the line it came from.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    /// Nothing but whitespace was entered.
    EmptyInput,

    /// Structural mismatch between the expected and the actual token.
    UnexpectedToken { expected: String, found: String },

    /// The first token does not start any operation.
    InvalidOperation(String),

    /// Token in operator position is not a filter operator.
    InvalidOperator(String),

    /// Literal that cannot be converted (integer, array element, filter value...).
    InvalidLiteral { kind: String, literal: String },

    /// Timestamp string matching none of the accepted layouts.
    InvalidTimestamp(String),

    /// Path with the wrong shape for its position.
    InvalidPath { kind: String, path: String },

    /// Metacommand argument outside the accepted set.
    InvalidArgument {
        command: String,
        expected: String,
        found: String,
    },

    /// Filter value whose type the operator does not accept.
    OperatorMismatch { operator: String, value: String },

    /// Clause keyword after a clause that must follow it.
    ClauseOrder { clause: String, before: String },

    /// Clause given twice.
    DuplicateClause(String),
}

/// Configuration-specific errors.
#[derive(Debug)]
pub enum ConfigError {
    /// Invalid config format.
    InvalidFormat(String),

    /// Invalid field value.
    InvalidValue { field: String, value: String },
}

/// Errors raised by a collection source.
#[derive(Debug)]
pub enum StoreError {
    /// Data file could not be read.
    LoadFailed(String),

    /// Data file is not a valid document tree.
    InvalidData(String),

    /// The requested base path does not exist.
    NotFound(String),
}

/* ========================= Display & Error impls ========================= */

impl fmt::Display for FscliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FscliError::Parse(e) => write!(f, "{e}"),
            FscliError::Config(e) => write!(f, "Configuration error: {e}"),
            FscliError::Store(e) => write!(f, "Store error: {e}"),
            FscliError::Io(e) => write!(f, "I/O error: {e}"),
            FscliError::Generic(msg) => write!(f, "{msg}"),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::EmptyInput => write!(f, "empty input"),
            ParseError::UnexpectedToken { expected, found } => {
                write!(f, "expected {expected}, got {found}")
            }
            ParseError::InvalidOperation(lit) => write!(f, "invalid operation: {lit}"),
            ParseError::InvalidOperator(lit) => write!(f, "invalid filter operator: {lit}"),
            ParseError::InvalidLiteral { kind, literal } => write!(f, "invalid {kind}: {literal}"),
            ParseError::InvalidTimestamp(lit) => write!(f, "invalid timestamp: {lit}"),
            ParseError::InvalidPath { kind, path } => write!(f, "invalid {kind}: {path}"),
            ParseError::InvalidArgument {
                command,
                expected,
                found,
            } => write!(f, "{command}: expected {expected}, got {found}"),
            ParseError::OperatorMismatch { operator, value } => {
                write!(f, "operator {operator} does not accept a {value} value")
            }
            ParseError::ClauseOrder { clause, before } => {
                write!(f, "{clause} must come before {before}")
            }
            ParseError::DuplicateClause(clause) => write!(f, "duplicate {clause} clause"),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidFormat(msg) => write!(f, "Invalid config format: {msg}"),
            ConfigError::InvalidValue { field, value } => {
                write!(f, "Invalid value '{value}' for field '{field}'")
            }
        }
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::LoadFailed(msg) => write!(f, "Failed to load data: {msg}"),
            StoreError::InvalidData(msg) => write!(f, "Invalid data: {msg}"),
            StoreError::NotFound(path) => write!(f, "Document not found: {path}"),
        }
    }
}

impl std::error::Error for FscliError {}
impl std::error::Error for ParseError {}
impl std::error::Error for ConfigError {}
impl std::error::Error for StoreError {}

/* ========================= Conversions to FscliError ========================= */

impl From<io::Error> for FscliError {
    fn from(err: io::Error) -> Self {
        FscliError::Io(err)
    }
}

impl From<ParseError> for FscliError {
    fn from(err: ParseError) -> Self {
        FscliError::Parse(err)
    }
}

impl From<ConfigError> for FscliError {
    fn from(err: ConfigError) -> Self {
        FscliError::Config(err)
    }
}

impl From<StoreError> for FscliError {
    fn from(err: StoreError) -> Self {
        FscliError::Store(err)
    }
}

impl From<String> for FscliError {
    fn from(msg: String) -> Self {
        FscliError::Generic(msg)
    }
}

impl From<&str> for FscliError {
    fn from(msg: &str) -> Self {
        FscliError::Generic(msg.to_owned())
    }
}
