//! JSON formatting for operation plans
//!
//! Compact output stays plain so it can be piped; pretty output is colored
//! when colors are on.

use colored_json::prelude::*;
use serde::Serialize;

use crate::error::{FscliError, Result};

/// JSON formatter with pretty printing support
pub struct JsonFormatter {
    /// Enable pretty printing
    pretty: bool,

    /// Enable colored output
    use_colors: bool,
}

impl JsonFormatter {
    /// Create a new JSON formatter
    ///
    /// # Arguments
    /// * `pretty` - Enable pretty printing
    /// * `use_colors` - Enable colored output
    pub fn new(pretty: bool, use_colors: bool) -> Self {
        Self { pretty, use_colors }
    }

    /// Serialize a value as JSON
    ///
    /// # Arguments
    /// * `value` - Value to serialize
    ///
    /// # Returns
    /// * `Result<String>` - JSON text or error
    pub fn format<T: Serialize>(&self, value: &T) -> Result<String> {
        let json_str = if self.pretty {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        }
        .map_err(|e| FscliError::Generic(format!("Failed to serialize output: {e}")))?;

        if self.use_colors && self.pretty {
            Ok(json_str.to_colored_json_auto().unwrap_or(json_str))
        } else {
            Ok(json_str)
        }
    }
}
