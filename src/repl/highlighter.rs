//! Syntax highlighter for the query language
//!
//! Styles come straight from the lexer's token kinds, so the colors always
//! agree with how the parser will read the line.

use nu_ansi_term::{Color, Style};
use reedline::{Highlighter, StyledText};

use crate::parser::grammar::TIMESTAMP_FUNCTION;
use crate::parser::{Token, TokenKind, tokenize};

/// Token-driven syntax highlighter
pub struct SyntaxHighlighter {
    enabled: bool,
}

impl SyntaxHighlighter {
    /// Create a new syntax highlighter
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    fn style_for(token: &Token) -> Style {
        match token.kind {
            kind if kind.is_keyword() => Color::Blue.bold(),
            TokenKind::MetaListCollections | TokenKind::MetaPager => Color::Magenta.bold(),
            TokenKind::String => Color::Yellow.normal(),
            TokenKind::Int | TokenKind::Float => Color::Cyan.normal(),
            TokenKind::Ident if token.literal.eq_ignore_ascii_case(TIMESTAMP_FUNCTION) => {
                Color::Green.normal()
            }
            TokenKind::Ident => Style::default(),
            TokenKind::LBracket
            | TokenKind::RBracket
            | TokenKind::LParen
            | TokenKind::RParen
            | TokenKind::Comma => Color::DarkGray.normal(),
            TokenKind::Illegal => Color::Red.underline(),
            _ => Color::LightBlue.normal(),
        }
    }
}

impl Default for SyntaxHighlighter {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Highlighter for SyntaxHighlighter {
    fn highlight(&self, line: &str, _cursor: usize) -> StyledText {
        let mut styled = StyledText::new();

        if !self.enabled {
            styled.push((Style::default(), line.to_string()));
            return styled;
        }

        let mut last = 0;
        for token in tokenize(line).iter().filter(|t| !t.is_eof()) {
            if token.span.start > last {
                styled.push((Style::default(), line[last..token.span.start].to_string()));
            }
            styled.push((Self::style_for(token), line[token.span.clone()].to_string()));
            last = token.span.end;
        }
        if last < line.len() {
            styled.push((Style::default(), line[last..].to_string()));
        }

        styled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segments(line: &str) -> Vec<(Style, String)> {
        SyntaxHighlighter::new(true).highlight(line, 0).buffer
    }

    #[test]
    fn test_text_is_preserved() {
        let line = "QUERY users  WHERE name == 'Ann' AND age >= 20 LIMIT 5";
        let highlighted = SyntaxHighlighter::new(true).highlight(line, 0);
        assert_eq!(highlighted.raw_string(), line);
    }

    #[test]
    fn test_keyword_and_string_styles() {
        let parts = segments("QUERY u WHERE name == 'Ann'");

        assert_eq!(parts[0], (Color::Blue.bold(), "QUERY".to_string()));
        assert_eq!(parts[2], (Style::default(), "u".to_string()));
        assert_eq!(parts.last().unwrap(), &(Color::Yellow.normal(), "'Ann'".to_string()));
    }

    #[test]
    fn test_metacommand_and_illegal() {
        let parts = segments("\\pager on");
        assert_eq!(parts[0], (Color::Magenta.bold(), "\\pager".to_string()));

        let parts = segments("QUERY u WHERE a = 1");
        assert!(parts.contains(&(Color::Red.underline(), "=".to_string())));
    }

    #[test]
    fn test_unterminated_string_runs_to_end() {
        let parts = segments("QUERY u WHERE a == 'Do");
        assert_eq!(parts.last().unwrap(), &(Color::Yellow.normal(), "'Do".to_string()));
    }

    #[test]
    fn test_disabled_highlighting() {
        let highlighted = SyntaxHighlighter::new(false).highlight("QUERY users", 0);
        assert_eq!(highlighted.buffer, vec![(Style::default(), "QUERY users".to_string())]);
    }
}
