//! Tokenizer for the fscli query language
//!
//! The lexer never fails. Anything it cannot classify becomes an `Illegal`
//! token and the parser reports it. Keywords are matched case-insensitively
//! while the literal keeps the text exactly as typed, which the completer
//! relies on for prefix filtering.

use std::fmt;
use std::ops::Range;

/// Token kind enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Special tokens
    Eof,
    Illegal,

    // Identifiers and literals
    Ident,
    String,
    Int,
    Float,

    // Keywords (case-insensitive)
    Query,
    Get,
    Count,
    Select,
    Where,
    And,
    Order,
    By,
    Asc,
    Desc,
    Limit,

    // Comparison operators
    Eq,
    NotEq,
    Gt,
    Gte,
    Lt,
    Lte,

    // Membership operators
    In,
    ArrayContains,
    ArrayContainsAny,

    // Punctuation
    LBracket,
    RBracket,
    Comma,
    LParen,
    RParen,

    // Metacommands
    MetaListCollections,
    MetaPager,
}

impl TokenKind {
    /// Human readable name used in "expected X, got Y" messages
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::Eof => "EOF",
            TokenKind::Illegal => "ILLEGAL",
            TokenKind::Ident => "IDENT",
            TokenKind::String => "STRING",
            TokenKind::Int => "INT",
            TokenKind::Float => "FLOAT",
            TokenKind::Query => "QUERY",
            TokenKind::Get => "GET",
            TokenKind::Count => "COUNT",
            TokenKind::Select => "SELECT",
            TokenKind::Where => "WHERE",
            TokenKind::And => "AND",
            TokenKind::Order => "ORDER",
            TokenKind::By => "BY",
            TokenKind::Asc => "ASC",
            TokenKind::Desc => "DESC",
            TokenKind::Limit => "LIMIT",
            TokenKind::Eq => "==",
            TokenKind::NotEq => "!=",
            TokenKind::Gt => ">",
            TokenKind::Gte => ">=",
            TokenKind::Lt => "<",
            TokenKind::Lte => "<=",
            TokenKind::In => "IN",
            TokenKind::ArrayContains => "ARRAY_CONTAINS",
            TokenKind::ArrayContainsAny => "ARRAY_CONTAINS_ANY",
            TokenKind::LBracket => "[",
            TokenKind::RBracket => "]",
            TokenKind::Comma => ",",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::MetaListCollections => "\\d",
            TokenKind::MetaPager => "\\pager",
        }
    }

    /// Whether this kind is a grammar keyword (used by the highlighter)
    pub fn is_keyword(&self) -> bool {
        matches!(
            self,
            TokenKind::Query
                | TokenKind::Get
                | TokenKind::Count
                | TokenKind::Select
                | TokenKind::Where
                | TokenKind::And
                | TokenKind::Order
                | TokenKind::By
                | TokenKind::Asc
                | TokenKind::Desc
                | TokenKind::Limit
                | TokenKind::In
                | TokenKind::ArrayContains
                | TokenKind::ArrayContainsAny
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Token with its original text and byte span in the input
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub literal: String,
    pub span: Range<usize>,
}

impl Token {
    /// Create a new token
    pub fn new(kind: TokenKind, literal: impl Into<String>, span: Range<usize>) -> Self {
        Self {
            kind,
            literal: literal.into(),
            span,
        }
    }

    /// Whether this is the end-of-input token
    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }
}

/// Look up a word in the keyword table (case-insensitive)
///
/// # Arguments
/// * `word` - Identifier text as typed
///
/// # Returns
/// * `TokenKind` - Keyword kind, or `Ident` when the word is not reserved
pub fn lookup_ident(word: &str) -> TokenKind {
    match word.to_ascii_uppercase().as_str() {
        "QUERY" => TokenKind::Query,
        "GET" => TokenKind::Get,
        "COUNT" => TokenKind::Count,
        "SELECT" => TokenKind::Select,
        "WHERE" => TokenKind::Where,
        "AND" => TokenKind::And,
        "ORDER" => TokenKind::Order,
        "BY" => TokenKind::By,
        "ASC" => TokenKind::Asc,
        "DESC" => TokenKind::Desc,
        "LIMIT" => TokenKind::Limit,
        "IN" => TokenKind::In,
        "ARRAY_CONTAINS" => TokenKind::ArrayContains,
        "ARRAY_CONTAINS_ANY" => TokenKind::ArrayContainsAny,
        _ => TokenKind::Ident,
    }
}

/// Look up a backslash metacommand (case-sensitive)
fn lookup_metacommand(word: &str) -> TokenKind {
    match word {
        "\\d" => TokenKind::MetaListCollections,
        "\\pager" => TokenKind::MetaPager,
        _ => TokenKind::Illegal,
    }
}

fn is_ident_start(ch: char) -> bool {
    ch.is_ascii_alphabetic() || matches!(ch, '_' | '/' | '-' | '.')
}

fn is_ident_char(ch: char) -> bool {
    is_ident_start(ch) || ch.is_ascii_digit()
}

/// Tokenize the whole input, including the trailing `Eof` token
pub fn tokenize(input: &str) -> Vec<Token> {
    Lexer::new(input).collect()
}

/// Lazy tokenizer over one input string
///
/// Yields every token followed by exactly one `Eof` token, then `None`.
pub struct Lexer {
    input: Vec<char>,
    /// Byte offset of every char, plus the total length at the end
    offsets: Vec<usize>,
    pos: usize,
    emitted: bool,
    done: bool,
}

impl Lexer {
    /// Create a new lexer from input string
    pub fn new(input: &str) -> Self {
        let mut offsets: Vec<usize> = input.char_indices().map(|(i, _)| i).collect();
        offsets.push(input.len());

        Self {
            input: input.chars().collect(),
            offsets,
            pos: 0,
            emitted: false,
            done: false,
        }
    }

    /// Produce the next token; returns `Eof` once input is exhausted
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        let start = self.pos;
        let at_start = !self.emitted;
        self.emitted = true;

        if self.is_at_end() {
            return self.make(TokenKind::Eof, start);
        }

        let ch = self.current_char();

        match ch {
            '\\' if at_start => self.scan_metacommand(start),

            '[' => self.single(TokenKind::LBracket, start),
            ']' => self.single(TokenKind::RBracket, start),
            ',' => self.single(TokenKind::Comma, start),
            '(' => self.single(TokenKind::LParen, start),
            ')' => self.single(TokenKind::RParen, start),

            '=' | '!' => {
                self.advance();
                if self.current_char() == '=' {
                    self.advance();
                    let kind = if ch == '=' {
                        TokenKind::Eq
                    } else {
                        TokenKind::NotEq
                    };
                    self.make(kind, start)
                } else {
                    // A lone `=` or `!` is never an operator
                    self.make(TokenKind::Illegal, start)
                }
            }
            '>' | '<' => {
                self.advance();
                let or_equal = self.current_char() == '=';
                if or_equal {
                    self.advance();
                }
                let kind = match (ch, or_equal) {
                    ('>', false) => TokenKind::Gt,
                    ('>', true) => TokenKind::Gte,
                    ('<', false) => TokenKind::Lt,
                    _ => TokenKind::Lte,
                };
                self.make(kind, start)
            }

            '"' | '\'' => self.scan_string(ch, start),

            '0'..='9' => self.scan_number(start),
            '-' if self.peek_char().is_ascii_digit() => {
                self.advance();
                self.scan_number(start)
            }

            c if is_ident_start(c) => self.scan_identifier(start),

            _ => self.single(TokenKind::Illegal, start),
        }
    }

    /// Scan a string literal; an unterminated string keeps what was read
    fn scan_string(&mut self, quote: char, start: usize) -> Token {
        self.advance();
        let body_start = self.pos;

        while !self.is_at_end() && self.current_char() != quote {
            self.advance();
        }
        let value: String = self.input[body_start..self.pos].iter().collect();

        if self.current_char() == quote {
            self.advance();
        }

        Token::new(TokenKind::String, value, self.span(start))
    }

    /// Scan an integer or a float (`digits.digits*`)
    fn scan_number(&mut self, start: usize) -> Token {
        while !self.is_at_end() && self.current_char().is_ascii_digit() {
            self.advance();
        }

        if self.current_char() != '.' {
            return self.make(TokenKind::Int, start);
        }

        self.advance();
        while !self.is_at_end() && self.current_char().is_ascii_digit() {
            self.advance();
        }
        self.make(TokenKind::Float, start)
    }

    /// Scan an identifier and classify it through the keyword table
    fn scan_identifier(&mut self, start: usize) -> Token {
        while !self.is_at_end() && is_ident_char(self.current_char()) {
            self.advance();
        }
        let literal = self.text(start);
        Token::new(lookup_ident(&literal), literal, self.span(start))
    }

    /// Scan `\word` at the very start of input
    fn scan_metacommand(&mut self, start: usize) -> Token {
        self.advance();
        while !self.is_at_end() && is_ident_char(self.current_char()) {
            self.advance();
        }
        let literal = self.text(start);
        Token::new(lookup_metacommand(&literal), literal, self.span(start))
    }

    fn single(&mut self, kind: TokenKind, start: usize) -> Token {
        self.advance();
        self.make(kind, start)
    }

    fn make(&self, kind: TokenKind, start: usize) -> Token {
        Token::new(kind, self.text(start), self.span(start))
    }

    fn text(&self, start: usize) -> String {
        self.input[start..self.pos].iter().collect()
    }

    fn span(&self, start: usize) -> Range<usize> {
        self.offsets[start]..self.offsets[self.pos]
    }

    /// Skip whitespace characters
    fn skip_whitespace(&mut self) {
        while !self.is_at_end() && matches!(self.current_char(), ' ' | '\t' | '\n' | '\r') {
            self.advance();
        }
    }

    /// Get current character
    fn current_char(&self) -> char {
        if self.is_at_end() {
            '\0'
        } else {
            self.input[self.pos]
        }
    }

    /// Peek at next character
    fn peek_char(&self) -> char {
        if self.pos + 1 >= self.input.len() {
            '\0'
        } else {
            self.input[self.pos + 1]
        }
    }

    /// Advance position
    fn advance(&mut self) {
        if !self.is_at_end() {
            self.pos += 1;
        }
    }

    /// Check if at end of input
    fn is_at_end(&self) -> bool {
        self.pos >= self.input.len()
    }
}

impl Iterator for Lexer {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.done {
            return None;
        }
        let token = self.next_token();
        if token.is_eof() {
            self.done = true;
        }
        Some(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        tokenize(input).into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_tokenize_simple_query() {
        let tokens = tokenize("QUERY users WHERE age == 20");
        assert_eq!(tokens.len(), 7);

        assert_eq!(tokens[0].kind, TokenKind::Query);
        assert_eq!(tokens[1].kind, TokenKind::Ident);
        assert_eq!(tokens[1].literal, "users");
        assert_eq!(tokens[2].kind, TokenKind::Where);
        assert_eq!(tokens[3].kind, TokenKind::Ident);
        assert_eq!(tokens[4].kind, TokenKind::Eq);
        assert_eq!(tokens[5].kind, TokenKind::Int);
        assert_eq!(tokens[5].literal, "20");
        assert!(tokens[6].is_eof());
    }

    #[test]
    fn test_tokenize_case_insensitive() {
        for input in ["query", "QUERY", "QuEry"] {
            let tokens = tokenize(input);
            assert_eq!(tokens[0].kind, TokenKind::Query);
            assert_eq!(tokens[0].literal, input);
        }
        assert_eq!(kinds("array_contains_any"), vec![TokenKind::ArrayContainsAny, TokenKind::Eof]);
    }

    #[test]
    fn test_tokenize_is_repeatable() {
        let input = "QUERY users/1/posts SELECT title WHERE tags IN ['a', \"b\"] LIMIT 5";
        assert_eq!(tokenize(input), tokenize(input));
    }

    #[test]
    fn test_tokenize_paths_as_identifiers() {
        let tokens = tokenize("GET /users/abc-1_x.y");
        assert_eq!(tokens[1].kind, TokenKind::Ident);
        assert_eq!(tokens[1].literal, "/users/abc-1_x.y");
    }

    #[test]
    fn test_tokenize_numbers() {
        let tokens = tokenize("20 19.99 7. -3 -0.5");
        assert_eq!(tokens[0].kind, TokenKind::Int);
        assert_eq!(tokens[1].kind, TokenKind::Float);
        assert_eq!(tokens[1].literal, "19.99");
        assert_eq!(tokens[2].kind, TokenKind::Float);
        assert_eq!(tokens[2].literal, "7.");
        assert_eq!(tokens[3].kind, TokenKind::Int);
        assert_eq!(tokens[3].literal, "-3");
        assert_eq!(tokens[4].kind, TokenKind::Float);
        assert_eq!(tokens[4].literal, "-0.5");
    }

    #[test]
    fn test_tokenize_strings() {
        let tokens = tokenize(r#""John Doe" 'x'"#);
        assert_eq!(tokens[0].kind, TokenKind::String);
        assert_eq!(tokens[0].literal, "John Doe");
        assert_eq!(tokens[1].literal, "x");
    }

    #[test]
    fn test_tokenize_unterminated_string() {
        let tokens = tokenize("name == \"Jo");
        assert_eq!(tokens[2].kind, TokenKind::String);
        assert_eq!(tokens[2].literal, "Jo");
        assert!(tokens[3].is_eof());
    }

    #[test]
    fn test_tokenize_operators() {
        assert_eq!(
            kinds("== != > >= < <="),
            vec![
                TokenKind::Eq,
                TokenKind::NotEq,
                TokenKind::Gt,
                TokenKind::Gte,
                TokenKind::Lt,
                TokenKind::Lte,
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn test_lone_equals_and_bang_are_illegal() {
        let tokens = tokenize("a = 1");
        assert_eq!(tokens[1].kind, TokenKind::Illegal);
        assert_eq!(tokens[1].literal, "=");

        let tokens = tokenize("a !x");
        assert_eq!(tokens[1].kind, TokenKind::Illegal);
        assert_eq!(tokens[1].literal, "!");
        assert_eq!(tokens[2].kind, TokenKind::Ident);
    }

    #[test]
    fn test_tokenize_metacommands() {
        assert_eq!(kinds("\\d"), vec![TokenKind::MetaListCollections, TokenKind::Eof]);
        assert_eq!(
            kinds("  \\pager on"),
            vec![TokenKind::MetaPager, TokenKind::Ident, TokenKind::Eof]
        );
        assert_eq!(kinds("\\nope")[0], TokenKind::Illegal);
        // Only recognized at the start of input
        assert_eq!(kinds("QUERY \\d")[1], TokenKind::Illegal);
    }

    #[test]
    fn test_tokenize_punctuation() {
        assert_eq!(
            kinds("TIMESTAMP(\"2024-01-01\") [1, 2]"),
            vec![
                TokenKind::Ident,
                TokenKind::LParen,
                TokenKind::String,
                TokenKind::RParen,
                TokenKind::LBracket,
                TokenKind::Int,
                TokenKind::Comma,
                TokenKind::Int,
                TokenKind::RBracket,
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn test_tokenize_unknown_chars() {
        let tokens = tokenize("QUERY @ users");
        assert_eq!(tokens[1].kind, TokenKind::Illegal);
        assert_eq!(tokens[1].literal, "@");
    }

    #[test]
    fn test_spans_are_byte_offsets() {
        let tokens = tokenize("GET 'ü' x");
        assert_eq!(tokens[1].span, 4..8);
        assert_eq!(tokens[2].span, 9..10);
        assert_eq!(tokens[3].span, 10..10);
    }

    #[test]
    fn test_lexer_ends_after_eof() {
        let mut lexer = Lexer::new("");
        assert!(lexer.next().is_some_and(|t| t.is_eof()));
        assert!(lexer.next().is_none());
    }
}
