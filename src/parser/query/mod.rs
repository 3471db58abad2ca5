//! Recursive-descent parser for one input line
//!
//! The parser keeps two tokens of lookahead (`cur` and `peek`). Sub-parsers
//! are entered with `cur` on the keyword that opened them and leave `cur` on
//! the last token they consumed. Clause order comes from the grammar table.
//!
//! Every failure is recorded in `errors` and aborts the parse; there is no
//! recovery and no partial operation.

mod filter;
mod metacommand;


use crate::error::ParseError;

use super::grammar::{self, Clause, OperationKind};
use super::lexer::{Token, TokenKind, tokenize};
use super::operation::{
    CountOperation, Direction, GetOperation, Operation, OrderSpec, QueryOperation,
};

type PResult<T> = std::result::Result<T, ParseError>;

/// Parser state for a single line
pub struct QueryParser {
    tokens: Vec<Token>,
    pos: usize,
    errors: Vec<String>,
}

impl QueryParser {
    /// Create a parser over the given input
    pub fn new(input: &str) -> Self {
        Self {
            tokens: tokenize(input),
            pos: 0,
            errors: Vec::new(),
        }
    }

    /// Messages of every error hit so far, oldest first
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Parse the line into an operation
    ///
    /// # Returns
    /// * `Result<Operation, ParseError>` - The operation, or the error that aborted parsing
    pub fn parse(&mut self) -> PResult<Operation> {
        let token = self.cur().clone();

        match token.kind {
            TokenKind::Eof => Err(self.fail(ParseError::EmptyInput)),
            TokenKind::MetaListCollections => self.parse_list_collections(),
            TokenKind::MetaPager => self.parse_pager(),
            kind => match OperationKind::from_token(kind) {
                Some(OperationKind::Query) => self.parse_query().map(Operation::Query),
                Some(OperationKind::Get) => self.parse_get().map(Operation::Get),
                Some(OperationKind::Count) => self.parse_count().map(Operation::Count),
                None => Err(self.fail(ParseError::InvalidOperation(token.literal))),
            },
        }
    }

    fn parse_query(&mut self) -> PResult<QueryOperation> {
        let mut query = QueryOperation {
            collection_path: self.parse_collection_path()?,
            ..Default::default()
        };

        let clauses = OperationKind::Query.clauses();
        let mut from = 0;
        while let Some(index) = self.next_clause(clauses, from)? {
            match clauses[index] {
                Clause::Select => query.selected_fields = self.parse_select()?,
                Clause::Where => query.filters = self.parse_where()?,
                Clause::OrderBy => query.order_by = self.parse_order_by()?,
                Clause::Limit => query.limit = self.parse_limit()?,
            }
            from = index + 1;
        }

        Ok(query)
    }

    fn parse_count(&mut self) -> PResult<CountOperation> {
        let mut count = CountOperation {
            collection_path: self.parse_collection_path()?,
            filters: Vec::new(),
        };

        let clauses = OperationKind::Count.clauses();
        let mut from = 0;
        while let Some(index) = self.next_clause(clauses, from)? {
            if clauses[index] == Clause::Where {
                count.filters = self.parse_where()?;
            }
            from = index + 1;
        }

        Ok(count)
    }

    /// `GET <collection>/<id>`: the path splits on its last `/`
    fn parse_get(&mut self) -> PResult<GetOperation> {
        self.expect_peek(TokenKind::Ident)?;
        let raw = self.cur().literal.clone();
        let path = grammar::normalize_path(&raw);

        let invalid = || ParseError::InvalidPath {
            kind: "document path".to_string(),
            path: raw.clone(),
        };

        let Some((collection, id)) = path.rsplit_once('/') else {
            return Err(self.fail(invalid()));
        };
        if collection.is_empty() || id.is_empty() || collection.split('/').count() % 2 == 0 {
            return Err(self.fail(invalid()));
        }

        let get = GetOperation {
            collection_path: collection.to_string(),
            document_id: id.to_string(),
        };
        self.expect_end()?;
        Ok(get)
    }

    /// Path following QUERY/COUNT, with one leading `/` stripped
    fn parse_collection_path(&mut self) -> PResult<String> {
        self.expect_peek(TokenKind::Ident)?;
        let raw = &self.cur().literal;
        let path = grammar::normalize_path(raw);
        if path.is_empty() {
            let err = ParseError::InvalidPath {
                kind: "collection path".to_string(),
                path: raw.clone(),
            };
            return Err(self.fail(err));
        }
        Ok(path.to_string())
    }

    /// Advance onto the next clause keyword, if any
    ///
    /// Clauses before `from` are already used. A clause keyword that is out
    /// of order or repeated is an error, as is any other trailing token.
    ///
    /// # Returns
    /// * `Ok(Some(index))` - Index into `clauses` of the clause now under `cur`
    /// * `Ok(None)` - End of input
    fn next_clause(&mut self, clauses: &[Clause], from: usize) -> PResult<Option<usize>> {
        let kind = self.peek().kind;
        if kind == TokenKind::Eof {
            return Ok(None);
        }

        match grammar::clause_index(clauses, kind) {
            Some(index) if index >= from => {
                self.next_token();
                Ok(Some(index))
            }
            Some(index) if index + 1 == from => {
                let err = ParseError::DuplicateClause(clauses[index].keyword().text.to_string());
                Err(self.fail(err))
            }
            Some(index) => {
                let err = ParseError::ClauseOrder {
                    clause: clauses[index].keyword().text.to_string(),
                    before: clauses[from - 1].keyword().text.to_string(),
                };
                Err(self.fail(err))
            }
            None => {
                self.expect_end()?;
                Ok(None)
            }
        }
    }

    /// `SELECT field (, field)*`
    fn parse_select(&mut self) -> PResult<Vec<String>> {
        let mut fields = Vec::new();
        loop {
            self.expect_peek(TokenKind::Ident)?;
            fields.push(self.cur().literal.clone());
            if !self.skip_peek(TokenKind::Comma) {
                break;
            }
        }
        Ok(fields)
    }

    /// `ORDER BY field [ASC|DESC] (, field [ASC|DESC])*`
    fn parse_order_by(&mut self) -> PResult<Vec<OrderSpec>> {
        self.expect_peek(TokenKind::By)?;

        let mut specs = Vec::new();
        loop {
            self.expect_peek(TokenKind::Ident)?;
            let field = self.cur().literal.clone();

            let direction = if self.skip_peek(TokenKind::Desc) {
                Direction::Descending
            } else {
                self.skip_peek(TokenKind::Asc);
                Direction::Ascending
            };

            specs.push(OrderSpec { field, direction });
            if !self.skip_peek(TokenKind::Comma) {
                break;
            }
        }
        Ok(specs)
    }

    /// `LIMIT <int>`
    fn parse_limit(&mut self) -> PResult<u64> {
        self.expect_peek(TokenKind::Int)?;
        let literal = self.cur().literal.clone();
        literal.parse::<u64>().map_err(|_| {
            self.fail(ParseError::InvalidLiteral {
                kind: "limit".to_string(),
                literal,
            })
        })
    }

    /* ========================= Token cursor ========================= */

    fn cur(&self) -> &Token {
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn peek(&self) -> &Token {
        &self.tokens[(self.pos + 1).min(self.tokens.len() - 1)]
    }

    fn next_token(&mut self) {
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
    }

    fn peek_is(&self, kind: TokenKind) -> bool {
        self.peek().kind == kind
    }

    /// Consume `peek` if it has the given kind
    fn skip_peek(&mut self, kind: TokenKind) -> bool {
        if self.peek_is(kind) {
            self.next_token();
            true
        } else {
            false
        }
    }

    /// Consume `peek` if it has the given kind, otherwise record a mismatch
    fn expect_peek(&mut self, kind: TokenKind) -> PResult<()> {
        if self.skip_peek(kind) {
            return Ok(());
        }
        let err = ParseError::UnexpectedToken {
            expected: kind.name().to_string(),
            found: describe(self.peek()),
        };
        Err(self.fail(err))
    }

    /// Require that nothing follows `cur`
    fn expect_end(&mut self) -> PResult<()> {
        if self.peek_is(TokenKind::Eof) {
            return Ok(());
        }
        let err = ParseError::UnexpectedToken {
            expected: "end of input".to_string(),
            found: describe(self.peek()),
        };
        Err(self.fail(err))
    }

    /// Record an error and hand it back for returning
    fn fail(&mut self, err: ParseError) -> ParseError {
        self.errors.push(err.to_string());
        err
    }
}

/// Token as shown in error messages: kind, plus the literal for value tokens
fn describe(token: &Token) -> String {
    match token.kind {
        TokenKind::Ident
        | TokenKind::String
        | TokenKind::Int
        | TokenKind::Float
        | TokenKind::Illegal => format!("{} \"{}\"", token.kind, token.literal),
        kind => kind.name().to_string(),
    }
}
