//! Backslash metacommands: `\d [basePath]` and `\pager on|off`

use crate::error::ParseError;
use crate::parser::grammar;
use crate::parser::lexer::TokenKind;
use crate::parser::operation::{ListCollectionsCommand, Operation, PagerCommand};

use super::{PResult, QueryParser};

impl QueryParser {
    pub(super) fn parse_list_collections(&mut self) -> PResult<Operation> {
        let mut base_document_path = String::new();

        if self.skip_peek(TokenKind::Ident) {
            let raw = self.cur().literal.clone();
            let path = grammar::normalize_path(&raw);

            // A base document path alternates collection/document
            if !path.is_empty() && path.split('/').count() % 2 != 0 {
                return Err(self.fail(ParseError::InvalidPath {
                    kind: "base document path".to_string(),
                    path: raw,
                }));
            }
            base_document_path = path.to_string();
        }

        self.expect_end()?;
        Ok(Operation::ListCollections(ListCollectionsCommand {
            base_document_path,
        }))
    }

    pub(super) fn parse_pager(&mut self) -> PResult<Operation> {
        let command = self.cur().literal.clone();
        self.next_token();
        let arg = self.cur().clone();

        let enabled = match arg.kind {
            TokenKind::Ident if arg.literal.eq_ignore_ascii_case("on") => true,
            TokenKind::Ident if arg.literal.eq_ignore_ascii_case("off") => false,
            _ => {
                let found = if arg.is_eof() {
                    TokenKind::Eof.name().to_string()
                } else {
                    arg.literal
                };
                return Err(self.fail(ParseError::InvalidArgument {
                    command,
                    expected: "on or off".to_string(),
                    found,
                }));
            }
        };

        self.expect_end()?;
        Ok(Operation::Pager(PagerCommand { enabled }))
    }
}
