//! WHERE clause: filters and their literal values

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};

use crate::error::ParseError;
use crate::parser::grammar;
use crate::parser::lexer::TokenKind;
use crate::parser::operation::{Filter, FilterValue, ScalarValue};

use super::{PResult, QueryParser, describe};

/// Layout tried after RFC 3339, for local date-times without an offset
const LOCAL_DATETIME_LAYOUT: &str = "%Y-%m-%dT%H:%M:%S";
const DATE_LAYOUT: &str = "%Y-%m-%d";

impl QueryParser {
    /// `WHERE filter (AND filter)*`
    pub(super) fn parse_where(&mut self) -> PResult<Vec<Filter>> {
        let mut filters = Vec::new();
        loop {
            filters.push(self.parse_filter()?);
            if !self.skip_peek(TokenKind::And) {
                break;
            }
        }
        Ok(filters)
    }

    /// `field operator value`
    fn parse_filter(&mut self) -> PResult<Filter> {
        self.expect_peek(TokenKind::Ident)?;
        let field = self.cur().literal.clone();

        self.next_token();
        let op_token = self.cur().clone();
        let operator = match grammar::operator_for(op_token.kind) {
            Some(operator) => operator,
            None if op_token.is_eof() => {
                let err = ParseError::UnexpectedToken {
                    expected: "operator".to_string(),
                    found: describe(&op_token),
                };
                return Err(self.fail(err));
            }
            None => return Err(self.fail(ParseError::InvalidOperator(op_token.literal))),
        };

        self.next_token();
        let value = self.parse_value()?;

        if operator.takes_array() != value.is_array() {
            let err = ParseError::OperatorMismatch {
                operator: operator.as_str().to_string(),
                value: value.kind_name().to_string(),
            };
            return Err(self.fail(err));
        }

        Ok(Filter {
            field,
            operator,
            value,
        })
    }

    /// Value under `cur`: number, string, `[..]` or `TIMESTAMP("..")`
    fn parse_value(&mut self) -> PResult<FilterValue> {
        let token = self.cur().clone();

        match token.kind {
            TokenKind::Int | TokenKind::Float | TokenKind::String => {
                let scalar = self.parse_scalar("filter value")?;
                Ok(match scalar {
                    ScalarValue::Int(v) => FilterValue::Int(v),
                    ScalarValue::Float(v) => FilterValue::Float(v),
                    ScalarValue::String(v) => FilterValue::String(v),
                })
            }
            TokenKind::LBracket => self.parse_array().map(FilterValue::Array),
            TokenKind::Ident if token.literal.eq_ignore_ascii_case(grammar::TIMESTAMP_FUNCTION) => {
                self.parse_timestamp().map(FilterValue::Timestamp)
            }
            TokenKind::Eof => {
                let err = ParseError::UnexpectedToken {
                    expected: "value".to_string(),
                    found: describe(&token),
                };
                Err(self.fail(err))
            }
            _ => Err(self.fail(ParseError::InvalidLiteral {
                kind: "filter value".to_string(),
                literal: token.literal,
            })),
        }
    }

    /// Int, float or string under `cur`
    fn parse_scalar(&mut self, what: &str) -> PResult<ScalarValue> {
        let token = self.cur().clone();
        let invalid = |kind: &str| ParseError::InvalidLiteral {
            kind: kind.to_string(),
            literal: token.literal.clone(),
        };

        let scalar = match token.kind {
            TokenKind::Int => token.literal.parse().map(ScalarValue::Int).ok(),
            TokenKind::Float => token.literal.parse().map(ScalarValue::Float).ok(),
            TokenKind::String => Some(ScalarValue::String(token.literal.clone())),
            _ => None,
        };

        match (scalar, token.kind) {
            (Some(scalar), _) => Ok(scalar),
            (None, TokenKind::Int) => Err(self.fail(invalid("integer"))),
            (None, TokenKind::Float) => Err(self.fail(invalid("float"))),
            (None, _) => Err(self.fail(invalid(what))),
        }
    }

    /// `[v (, v)*]`; an empty pair of brackets is a zero-length array
    fn parse_array(&mut self) -> PResult<Vec<ScalarValue>> {
        let mut values = Vec::new();
        if self.skip_peek(TokenKind::RBracket) {
            return Ok(values);
        }

        loop {
            self.next_token();
            values.push(self.parse_scalar("array element")?);
            if !self.skip_peek(TokenKind::Comma) {
                break;
            }
        }
        self.expect_peek(TokenKind::RBracket)?;
        Ok(values)
    }

    /// `TIMESTAMP("...")` with `cur` on the TIMESTAMP identifier
    fn parse_timestamp(&mut self) -> PResult<DateTime<FixedOffset>> {
        self.expect_peek(TokenKind::LParen)?;
        self.expect_peek(TokenKind::String)?;
        let raw = self.cur().literal.clone();
        self.expect_peek(TokenKind::RParen)?;

        match parse_timestamp_literal(&raw) {
            Some(ts) => Ok(ts),
            None => Err(self.fail(ParseError::InvalidTimestamp(raw))),
        }
    }
}

/// Parse a timestamp, trying each accepted layout in turn
///
/// Layouts without an offset are taken as UTC.
///
/// # Arguments
/// * `raw` - Text between the quotes of `TIMESTAMP("...")`
///
/// # Returns
/// * `Option<DateTime<FixedOffset>>` - First successful parse
pub fn parse_timestamp_literal(raw: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, LOCAL_DATETIME_LAYOUT)
                .ok()
                .map(|dt| dt.and_utc().fixed_offset())
        })
        .or_else(|| {
            NaiveDate::parse_from_str(raw, DATE_LAYOUT)
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .map(|dt| dt.and_utc().fixed_offset())
        })
}
