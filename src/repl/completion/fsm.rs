//! Grammar replay for completion context determination
//!
//! Walks the tokens before the cursor through the same grammar table the
//! parser uses. Where the parser would fail because input ran out, the walk
//! stops and reports what may come next. Anything the grammar does not
//! expect ends the walk with no completion; it never reports an error.

use super::context::CompletionContext;
use super::token_stream::TokenStream;
use crate::parser::TokenKind;
use crate::parser::grammar::{self, AND, ASC, BY, Clause, DESC, Keyword, OperationKind};

/// Replay state: `pos` is the index of the last consumed token
pub struct GrammarReplay<'a> {
    stream: &'a TokenStream,
    pos: usize,
}

impl<'a> GrammarReplay<'a> {
    /// Determine the completion context for a token stream
    pub fn run(stream: &'a TokenStream) -> CompletionContext {
        let mut replay = Self { stream, pos: 0 };
        replay.root()
    }

    fn root(&mut self) -> CompletionContext {
        let first = self.stream.get(0);

        if self.stream.is_open_ident(0) {
            return CompletionContext::operation(first.literal.clone());
        }

        match OperationKind::from_token(first.kind) {
            Some(op) => self.operation(op),
            None => CompletionContext::None,
        }
    }

    /// After a root keyword: the path, then the operation's clauses
    fn operation(&mut self, op: OperationKind) -> CompletionContext {
        if self.peek_kind() != TokenKind::Ident {
            return CompletionContext::None;
        }
        if self.stream.is_open_ident(self.pos + 1) {
            return CompletionContext::collection(self.peek_literal());
        }

        self.advance();
        self.keyword_position(op.clauses(), 0, &[])
    }

    /// A point where `extra` or any clause from `clauses[from..]` may follow
    fn keyword_position(
        &mut self,
        clauses: &[Clause],
        from: usize,
        extra: &[Keyword],
    ) -> CompletionContext {
        let mut keywords = extra.to_vec();
        keywords.extend(clauses[from..].iter().map(|c| c.keyword()));

        match self.peek_kind() {
            TokenKind::Eof => CompletionContext::keyword(keywords, ""),
            TokenKind::Ident if self.stream.is_open_ident(self.pos + 1) => {
                CompletionContext::keyword(keywords, self.peek_literal())
            }
            kind => match grammar::clause_index(clauses, kind) {
                Some(index) if index >= from => {
                    self.advance();
                    self.clause_body(clauses, index)
                }
                _ => CompletionContext::None,
            },
        }
    }

    /// Walk one clause with `cur` on its keyword
    fn clause_body(&mut self, clauses: &[Clause], index: usize) -> CompletionContext {
        match clauses[index] {
            Clause::Select => self.select(clauses, index),
            Clause::Where => self.filters(clauses, index),
            Clause::OrderBy => self.order_by(clauses, index),
            Clause::Limit => {
                if !self.skip(TokenKind::Int) {
                    return CompletionContext::None;
                }
                self.keyword_position(clauses, index + 1, &[])
            }
        }
    }

    /// `field (, field)*`
    fn select(&mut self, clauses: &[Clause], index: usize) -> CompletionContext {
        loop {
            if !self.skip(TokenKind::Ident) {
                return CompletionContext::None;
            }
            if !self.skip(TokenKind::Comma) {
                return self.keyword_position(clauses, index + 1, &[]);
            }
        }
    }

    /// `filter (AND filter)*`
    fn filters(&mut self, clauses: &[Clause], index: usize) -> CompletionContext {
        loop {
            if !self.skip(TokenKind::Ident) {
                return CompletionContext::None;
            }
            if grammar::operator_for(self.peek_kind()).is_none() {
                return CompletionContext::None;
            }
            self.advance();
            if !self.value() {
                return CompletionContext::None;
            }
            if !self.skip(TokenKind::And) {
                return self.keyword_position(clauses, index + 1, &[AND]);
            }
        }
    }

    /// `BY field [ASC|DESC] (, field [ASC|DESC])*`
    fn order_by(&mut self, clauses: &[Clause], index: usize) -> CompletionContext {
        if !self.skip(TokenKind::By) {
            return match self.peek_kind() {
                TokenKind::Eof => CompletionContext::keyword(vec![BY], ""),
                TokenKind::Ident if self.stream.is_open_ident(self.pos + 1) => {
                    CompletionContext::keyword(vec![BY], self.peek_literal())
                }
                _ => CompletionContext::None,
            };
        }
        loop {
            if !self.skip(TokenKind::Ident) {
                return CompletionContext::None;
            }
            let directed = self.skip(TokenKind::Asc) || self.skip(TokenKind::Desc);
            if self.skip(TokenKind::Comma) {
                continue;
            }
            let extra: &[Keyword] = if directed { &[] } else { &[ASC, DESC] };
            return self.keyword_position(clauses, index + 1, extra);
        }
    }

    /// Consume one complete filter value; false if it is missing or unfinished
    fn value(&mut self) -> bool {
        match self.peek_kind() {
            TokenKind::Int | TokenKind::Float => {
                self.advance();
                true
            }
            TokenKind::String => {
                self.advance();
                !self.stream.is_unterminated_string(self.stream.get(self.pos))
            }
            TokenKind::LBracket => {
                self.advance();
                self.array()
            }
            TokenKind::Ident
                if self
                    .peek_literal()
                    .eq_ignore_ascii_case(grammar::TIMESTAMP_FUNCTION) =>
            {
                self.advance();
                self.skip(TokenKind::LParen)
                    && self.skip(TokenKind::String)
                    && !self.stream.is_unterminated_string(self.stream.get(self.pos))
                    && self.skip(TokenKind::RParen)
            }
            _ => false,
        }
    }

    /// Elements up to and including `]`
    fn array(&mut self) -> bool {
        if self.skip(TokenKind::RBracket) {
            return true;
        }
        loop {
            match self.peek_kind() {
                TokenKind::Int | TokenKind::Float | TokenKind::String => self.advance(),
                _ => return false,
            }
            if self.stream.is_unterminated_string(self.stream.get(self.pos)) {
                return false;
            }
            if self.skip(TokenKind::RBracket) {
                return true;
            }
            if !self.skip(TokenKind::Comma) {
                return false;
            }
        }
    }

    fn peek_kind(&self) -> TokenKind {
        self.stream.get(self.pos + 1).kind
    }

    fn peek_literal(&self) -> String {
        self.stream.get(self.pos + 1).literal.clone()
    }

    fn advance(&mut self) {
        self.pos += 1;
    }

    /// Consume `peek` if it has the given kind
    fn skip(&mut self, kind: TokenKind) -> bool {
        if self.peek_kind() == kind {
            self.advance();
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(input: &str) -> CompletionContext {
        let stream = TokenStream::new(input, input.len());
        GrammarReplay::run(&stream)
    }

    fn no_completion(input: &str) -> bool {
        run(input) == CompletionContext::None
    }

    fn keyword_texts(input: &str) -> Vec<&'static str> {
        match run(input) {
            CompletionContext::Keyword { keywords, .. } => keywords.iter().map(|k| k.text).collect(),
            other => panic!("expected keyword context for {input:?}, got {other:?}"),
        }
    }

    #[test]
    fn test_root_position() {
        assert_eq!(run(""), CompletionContext::None);
        assert_eq!(run("QU"), CompletionContext::operation("QU"));
        assert_eq!(run("QU "), CompletionContext::None);
        assert_eq!(run("QUERY"), CompletionContext::None);
        assert_eq!(run("\\d"), CompletionContext::None);
    }

    #[test]
    fn test_path_position() {
        assert_eq!(run("QUERY us"), CompletionContext::collection("us"));
        assert_eq!(run("GET /users/1/po"), CompletionContext::collection("/users/1/po"));
        assert_eq!(run("COUNT g"), CompletionContext::collection("g"));
        assert_eq!(run("QUERY "), CompletionContext::None);
    }

    #[test]
    fn test_after_path() {
        assert_eq!(keyword_texts("QUERY users "), vec!["SELECT", "WHERE", "ORDER BY", "LIMIT"]);
        assert_eq!(keyword_texts("COUNT users "), vec!["WHERE"]);
        assert_eq!(run("GET users/1 "), CompletionContext::None);
    }

    #[test]
    fn test_partial_clause_keyword_keeps_prefix() {
        match run("QUERY users S") {
            CompletionContext::Keyword { prefix, .. } => assert_eq!(prefix, "S"),
            other => panic!("expected keyword context, got {other:?}"),
        }
        assert!(no_completion("QUERY users S "));
    }

    #[test]
    fn test_after_select_fields() {
        assert_eq!(keyword_texts("QUERY users SELECT name"), vec!["WHERE", "ORDER BY", "LIMIT"]);
        assert_eq!(keyword_texts("QUERY users SELECT a, b "), vec!["WHERE", "ORDER BY", "LIMIT"]);
        assert!(no_completion("QUERY users SELECT"));
        assert!(no_completion("QUERY users SELECT a,"));
    }

    #[test]
    fn test_after_filter_value() {
        assert_eq!(keyword_texts("QUERY u WHERE a == 1"), vec!["AND", "ORDER BY", "LIMIT"]);
        assert_eq!(
            keyword_texts("QUERY u WHERE a IN [1, 'x'] AND b >= TIMESTAMP('2024-01-01')"),
            vec!["AND", "ORDER BY", "LIMIT"]
        );
        assert_eq!(keyword_texts("COUNT u WHERE a == 'x'"), vec!["AND"]);
    }

    #[test]
    fn test_mid_filter_has_no_completion() {
        assert!(no_completion("QUERY u WHERE"));
        assert!(no_completion("QUERY u WHERE a"));
        assert!(no_completion("QUERY u WHERE a =="));
        assert!(no_completion("QUERY u WHERE a == 'Do"));
        assert!(no_completion("QUERY u WHERE a IN [1,"));
        assert!(no_completion("QUERY u WHERE a = 1"));
        assert!(no_completion("QUERY u WHERE a == 1 AND"));
    }

    #[test]
    fn test_after_order_by_field() {
        assert_eq!(keyword_texts("QUERY u ORDER BY age"), vec!["ASC", "DESC", "LIMIT"]);
        assert_eq!(keyword_texts("QUERY u ORDER BY age DESC"), vec!["LIMIT"]);
        assert_eq!(keyword_texts("QUERY u ORDER BY a ASC, b "), vec!["ASC", "DESC", "LIMIT"]);
        assert!(no_completion("QUERY u ORDER BY"));
        assert!(no_completion("QUERY u ORDER BY age,"));
    }

    #[test]
    fn test_order_without_by_offers_by() {
        assert_eq!(run("QUERY u ORDER"), CompletionContext::keyword(vec![BY], ""));
        assert_eq!(run("QUERY u ORDER "), CompletionContext::keyword(vec![BY], ""));
        assert_eq!(run("QUERY u ORDER B"), CompletionContext::keyword(vec![BY], "B"));
        assert!(no_completion("QUERY u ORDER age "));
    }

    #[test]
    fn test_after_limit() {
        assert!(no_completion("QUERY u LIMIT"));
        assert!(no_completion("QUERY u LIMIT 10"));
    }

    #[test]
    fn test_out_of_order_clause_has_no_completion() {
        assert!(no_completion("QUERY u LIMIT 1 WHERE"));
        assert!(no_completion("QUERY u LIMIT 1 S"));
    }
}
