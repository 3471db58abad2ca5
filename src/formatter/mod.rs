//! Output formatting for execution results
//!
//! - Plans are rendered as JSON (compact or pretty, optionally colored)
//! - Lists print one name per line
//! - Messages print as-is

mod json;

pub use json::JsonFormatter;

use crate::config::OutputFormat;
use crate::error::Result;
use crate::executor::{ExecutionResult, ResultData};

/// Main formatter for execution results
pub struct Formatter {
    /// JSON renderer for plans
    json: JsonFormatter,
}

impl Formatter {
    /// Create a new formatter
    ///
    /// # Arguments
    /// * `format_type` - Output format type
    /// * `use_colors` - Enable colored output
    pub fn new(format_type: OutputFormat, use_colors: bool) -> Self {
        Self {
            json: JsonFormatter::new(format_type.is_pretty(), use_colors),
        }
    }

    /// Format an execution result
    ///
    /// # Returns
    /// * `Result<String>` - Text to print, without a trailing newline
    pub fn format(&self, result: &ExecutionResult) -> Result<String> {
        match &result.data {
            ResultData::Plan(operation) => self.json.format(operation),
            ResultData::List(items) => Ok(items.join("\n")),
            ResultData::Message(msg) => Ok(msg.clone()),
        }
    }
}
