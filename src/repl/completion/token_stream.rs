//! Token stream with cursor awareness for completion
//!
//! Only the text before the cursor is tokenized. The last token is "open"
//! when the cursor sits right after it with no whitespace in between; an
//! open identifier is the partial word the user is still typing.

use crate::parser::{Token, TokenKind, tokenize};

/// Token stream with cursor position tracking
pub struct TokenStream {
    /// Tokens before the cursor (including EOF)
    tokens: Vec<Token>,
    /// Text before the cursor
    text: String,
    /// Cursor position (byte index in the original input)
    cursor: usize,
    /// Whether whitespace separates the last token from the cursor
    trailing_space: bool,
}

impl TokenStream {
    /// Create a token stream for the text before `cursor`
    ///
    /// # Arguments
    /// * `line` - The input line
    /// * `cursor` - Cursor position (byte index), clamped to a char boundary
    pub fn new(line: &str, cursor: usize) -> Self {
        let mut cursor = cursor.min(line.len());
        while !line.is_char_boundary(cursor) {
            cursor -= 1;
        }

        let text = &line[..cursor];
        let trailing_space = text.ends_with(|c: char| c.is_whitespace());

        Self {
            tokens: tokenize(text),
            text: text.to_string(),
            cursor,
            trailing_space,
        }
    }

    /// Token at `index`, or the trailing EOF when out of range
    pub fn get(&self, index: usize) -> &Token {
        let last = self.tokens.len() - 1;
        &self.tokens[index.min(last)]
    }

    /// Whether the token at `index` is an identifier still being typed
    pub fn is_open_ident(&self, index: usize) -> bool {
        let token = self.get(index);
        token.kind == TokenKind::Ident
            && !self.trailing_space
            && index + 2 == self.tokens.len()
    }

    /// Whether a string token runs to the end of input without its closing quote
    pub fn is_unterminated_string(&self, token: &Token) -> bool {
        if token.kind != TokenKind::String {
            return false;
        }
        let raw = &self.text[token.span.clone()];
        let mut chars = raw.chars();
        match (chars.next(), chars.next_back()) {
            (Some(open), Some(close)) => open != close,
            _ => true,
        }
    }

    /// Byte offset where a completion replaces text
    pub fn completion_start(&self) -> usize {
        let last = self.tokens.len().saturating_sub(2);
        if self.tokens.len() >= 2 && self.is_open_ident(last) {
            self.tokens[last].span.start
        } else {
            self.cursor
        }
    }
}
