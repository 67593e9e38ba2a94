//! Lexical tokens.

use std::fmt;

use serde::Serialize;

/// Classification of a lexical token.
///
/// `Newline`, `Indent` and `Dedent` are part of the vocabulary but not
/// produced by the current tokenizer; they are reserved for
/// indentation-aware lexing of the python-family profiles.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    Keyword,
    Identifier,
    Number,
    Str,
    Operator,
    Delimiter,
    Newline,
    Indent,
    Dedent,
    Eof,
    Error,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Keyword => "keyword",
            TokenKind::Identifier => "identifier",
            TokenKind::Number => "number",
            TokenKind::Str => "string",
            TokenKind::Operator => "operator",
            TokenKind::Delimiter => "delimiter",
            TokenKind::Newline => "newline",
            TokenKind::Indent => "indent",
            TokenKind::Dedent => "dedent",
            TokenKind::Eof => "end of input",
            TokenKind::Error => "error",
        };
        f.write_str(name)
    }
}

/// A token with its text and 1-based source position.
///
/// String tokens carry the literal's content without the surrounding
/// quotes. The end-of-input token carries empty text.
#[derive(Clone, Eq, PartialEq, Hash, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub line: u32,
    pub column: u32,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, line: u32, column: u32) -> Self {
        Token {
            kind,
            text: text.into(),
            line,
            column,
        }
    }

    /// End-of-input marker at the given position.
    pub fn eof(line: u32, column: u32) -> Self {
        Token::new(TokenKind::Eof, "", line, column)
    }

    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:?}({:?}) @ {}:{}",
            self.kind, self.text, self.line, self.column
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn token_debug_shows_position() {
        let token = Token::new(TokenKind::Keyword, "def", 2, 5);
        assert_eq!(format!("{token:?}"), "Keyword(\"def\") @ 2:5");
    }

    #[test]
    fn eof_token_is_empty() {
        let token = Token::eof(3, 1);
        assert!(token.is_eof());
        assert_eq!(token.text, "");
    }
}
