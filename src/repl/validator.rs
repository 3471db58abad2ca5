//! Validator for reedline - keeps the line open while it is unbalanced

use reedline::{ValidationResult, Validator};

/// Line validator for the query language
///
/// A line is incomplete while a quote, `[` or `(` is left open, so Enter
/// continues the input on the next line instead of submitting it.
#[derive(Debug, Default)]
pub struct FsValidator;

impl FsValidator {
    /// Create a new validator
    pub fn new() -> Self {
        Self
    }

    /// Check that quotes, brackets and parentheses are closed
    fn is_balanced(&self, input: &str) -> bool {
        let mut depth: i32 = 0;
        let mut quote: Option<char> = None;

        for ch in input.chars() {
            // Strings have no escapes: only the opening quote char closes them
            if let Some(open) = quote {
                if ch == open {
                    quote = None;
                }
                continue;
            }

            match ch {
                '"' | '\'' => quote = Some(ch),
                '[' | '(' => depth += 1,
                ']' | ')' => depth -= 1,
                _ => {}
            }
        }

        // A stray closer is a parse error, not a reason to wait for more input
        quote.is_none() && depth <= 0
    }
}

impl Validator for FsValidator {
    fn validate(&self, line: &str) -> ValidationResult {
        let trimmed = line.trim();

        if trimmed.is_empty() || self.is_balanced(trimmed) {
            ValidationResult::Complete
        } else {
            ValidationResult::Incomplete
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_complete(line: &str) -> bool {
        matches!(FsValidator::new().validate(line), ValidationResult::Complete)
    }

    #[test]
    fn test_empty_input() {
        assert!(is_complete(""));
        assert!(is_complete("   "));
    }

    #[test]
    fn test_simple_lines() {
        assert!(is_complete("QUERY users"));
        assert!(is_complete("\\pager on"));
        assert!(is_complete("QUERY users WHERE tags IN ['a', 'b']"));
        assert!(is_complete("QUERY u WHERE t > TIMESTAMP('2024-01-01')"));
    }

    #[test]
    fn test_open_brackets() {
        assert!(!is_complete("QUERY users WHERE tags IN ['a',"));
        assert!(!is_complete("QUERY u WHERE t > TIMESTAMP("));
    }

    #[test]
    fn test_open_string() {
        assert!(!is_complete("QUERY users WHERE name == 'Do"));
        assert!(!is_complete(r#"QUERY users WHERE name == "it's"#));
        assert!(is_complete(r#"QUERY users WHERE name == "it's""#));
    }

    #[test]
    fn test_brackets_inside_strings_are_ignored() {
        assert!(is_complete("QUERY users WHERE name == '[('"));
    }

    #[test]
    fn test_stray_closer_submits() {
        assert!(is_complete("QUERY users ]"));
    }
}
