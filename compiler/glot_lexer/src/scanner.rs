//! Character-level scanner.
//!
//! Dispatch order per position, after whitespace and comments: digit,
//! quote, identifier start, operators (two-character before
//! one-character), delimiters, error. Line/column tracking is 1-based
//! and counts characters, not bytes.

use glot_diagnostic::{Diagnostic, DiagnosticCategory};
use glot_ir::{Token, TokenKind};
use glot_profile::{CommentStyle, LanguageProfile};

/// Result of tokenizing one snippet.
#[derive(Clone, Debug)]
pub struct LexOutput {
    pub tokens: Vec<Token>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Tokenize `source` under `profile`.
pub fn tokenize(source: &str, profile: &LanguageProfile) -> LexOutput {
    Scanner::new(source, profile).run()
}

/// Minimum normalized similarity for a keyword typo warning.
const TYPO_SIMILARITY: f64 = 0.8;

const TWO_CHAR_OPERATORS: [&str; 12] = [
    "==", "!=", "<=", ">=", "&&", "||", "++", "--", "+=", "-=", "*=", "/=",
];
const ONE_CHAR_OPERATORS: &[char] = &[
    '+', '-', '*', '/', '%', '=', '<', '>', '!', '&', '|', '^', '~',
];
const DELIMITERS: &[char] = &['(', ')', '{', '}', '[', ']', ';', ',', '.', ':'];

struct Scanner<'p> {
    chars: Vec<char>,
    pos: usize,
    line: u32,
    column: u32,
    profile: &'p LanguageProfile,
    tokens: Vec<Token>,
    diagnostics: Vec<Diagnostic>,
}

impl<'p> Scanner<'p> {
    fn new(source: &str, profile: &'p LanguageProfile) -> Self {
        Scanner {
            chars: source.chars().collect(),
            pos: 0,
            line: 1,
            column: 1,
            profile,
            tokens: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    fn run(mut self) -> LexOutput {
        while self.pos < self.chars.len() {
            self.skip_whitespace();
            if self.pos >= self.chars.len() {
                break;
            }
            if self.skip_comment() {
                continue;
            }
            if !self.match_token() {
                self.unexpected_character();
            }
        }

        self.tokens.push(Token::eof(self.line, self.column));

        LexOutput {
            tokens: self.tokens,
            diagnostics: self.diagnostics,
        }
    }

    fn current(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_next(&self) -> Option<char> {
        self.chars.get(self.pos + 1).copied()
    }

    fn advance(&mut self) {
        if let Some(ch) = self.current() {
            if ch == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
            self.pos += 1;
        }
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.current(), Some(' ' | '\t' | '\r' | '\n')) {
            self.advance();
        }
    }

    /// Skip a line comment if one starts here. Comment syntax depends on
    /// the profile; the trailing newline is left for whitespace handling.
    fn skip_comment(&mut self) -> bool {
        let starts_comment = match self.profile.comment {
            Some(CommentStyle::Hash) => self.current() == Some('#'),
            Some(CommentStyle::Slash) => {
                self.current() == Some('/') && self.peek_next() == Some('/')
            }
            None => false,
        };
        if !starts_comment {
            return false;
        }
        while self.current().is_some_and(|ch| ch != '\n') {
            self.advance();
        }
        true
    }

    fn match_token(&mut self) -> bool {
        let Some(ch) = self.current() else {
            return false;
        };

        if ch.is_ascii_digit() {
            self.read_number();
            return true;
        }
        if ch == '"' || ch == '\'' {
            self.read_string(ch);
            return true;
        }
        if ch.is_alphabetic() || ch == '_' {
            self.read_identifier();
            return true;
        }
        self.match_operator()
    }

    fn read_number(&mut self) {
        let start_column = self.column;
        let mut text = String::new();
        while let Some(ch) = self.current() {
            if ch.is_ascii_digit() || ch == '.' {
                text.push(ch);
                self.advance();
            } else {
                break;
            }
        }
        self.tokens
            .push(Token::new(TokenKind::Number, text, self.line, start_column));
    }

    fn read_string(&mut self, quote: char) {
        let start_column = self.column;
        self.advance(); // opening quote

        let mut text = String::new();
        while let Some(ch) = self.current() {
            if ch == quote {
                self.advance(); // closing quote
                self.tokens
                    .push(Token::new(TokenKind::Str, text, self.line, start_column));
                return;
            }
            if ch == '\\' {
                // The escape character is carried verbatim.
                text.push(ch);
                self.advance();
                if let Some(escaped) = self.current() {
                    text.push(escaped);
                    self.advance();
                }
                continue;
            }
            text.push(ch);
            self.advance();
        }

        // End of input before the closing quote: diagnostic, no token.
        self.diagnostics.push(
            Diagnostic::error(
                DiagnosticCategory::UnterminatedString,
                self.line,
                start_column,
                "Unterminated string literal",
            )
            .with_suggestion(format!("Add closing {quote} at the end of the string")),
        );
    }

    fn read_identifier(&mut self) {
        let start_column = self.column;
        let mut text = String::new();
        while let Some(ch) = self.current() {
            if ch.is_alphanumeric() || ch == '_' {
                text.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        let kind = if self.profile.is_keyword(&text) {
            TokenKind::Keyword
        } else {
            if !self.profile.is_builtin(&text) {
                self.check_keyword_typo(&text, start_column);
            }
            TokenKind::Identifier
        };

        self.tokens
            .push(Token::new(kind, text, self.line, start_column));
    }

    /// Warn about a close keyword misspelling. Advisory only: the token
    /// stays an identifier.
    fn check_keyword_typo(&mut self, text: &str, column: u32) {
        let mut best: Option<(&str, f64)> = None;
        for keyword in self.profile.keywords {
            let similarity = strsim::normalized_levenshtein(text, keyword);
            if similarity >= TYPO_SIMILARITY
                && best.map_or(true, |(_, best_similarity)| similarity > best_similarity)
            {
                best = Some((keyword, similarity));
            }
        }

        if let Some((keyword, _)) = best {
            self.diagnostics.push(
                Diagnostic::warning(
                    DiagnosticCategory::Typo,
                    self.line,
                    column,
                    format!("Possible typo: '{text}'"),
                )
                .with_suggestion(format!("Did you mean '{keyword}'?")),
            );
        }
    }

    fn match_operator(&mut self) -> bool {
        let start_column = self.column;

        // Two-character operators take priority.
        if let (Some(first), Some(second)) = (self.current(), self.peek_next()) {
            let pair: String = [first, second].iter().collect();
            if TWO_CHAR_OPERATORS.contains(&pair.as_str()) {
                self.advance();
                self.advance();
                self.tokens
                    .push(Token::new(TokenKind::Operator, pair, self.line, start_column));
                return true;
            }
        }

        let Some(ch) = self.current() else {
            return false;
        };
        if ONE_CHAR_OPERATORS.contains(&ch) {
            self.advance();
            self.tokens.push(Token::new(
                TokenKind::Operator,
                ch.to_string(),
                self.line,
                start_column,
            ));
            return true;
        }
        if DELIMITERS.contains(&ch) {
            self.advance();
            self.tokens.push(Token::new(
                TokenKind::Delimiter,
                ch.to_string(),
                self.line,
                start_column,
            ));
            return true;
        }
        false
    }

    /// Emit an `Error` token and diagnostic for the current character,
    /// then move past it.
    fn unexpected_character(&mut self) {
        let Some(ch) = self.current() else {
            return;
        };
        self.diagnostics.push(
            Diagnostic::error(
                DiagnosticCategory::UnexpectedCharacter,
                self.line,
                self.column,
                format!("Unexpected character: '{ch}'"),
            )
            .with_suggestion(character_suggestion(ch)),
        );
        self.tokens.push(Token::new(
            TokenKind::Error,
            ch.to_string(),
            self.line,
            self.column,
        ));
        self.advance();
    }
}

/// Fixed per-character remediation table for unexpected characters.
fn character_suggestion(ch: char) -> &'static str {
    match ch {
        '@' => "Did you mean to use a decorator? Use @ at the start of a line",
        '$' => "Use variables without $. Try removing $",
        '%' => "Use % for modulo operation or string formatting",
        '`' => "Use single ' or double \" quotes for strings",
        _ => "Check for typos or invalid syntax",
    }
}
