//! Lexer for the simplelang programming language
//!
//! The lexer converts source code into a stream of tokens, handling:
//! - Keywords, identifiers, and operators (multi-character operators such as
//!   `**`, `&&` and `<=` are resolved to a single token)
//! - Decimal numeric literals and double-quoted strings
//! - Significant newlines (all other whitespace is skipped)
//! - Source location tracking (byte offsets plus row/column)

mod span;
mod token;

pub use span::{Location, Span};
pub use token::TokenKind;

use logos::Logos;
use thiserror::Error;

use span::Cursor;

/// A token with its kind, span, and source text
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// The kind of token
    pub kind: TokenKind,
    /// The span in the source code
    pub span: Span,
    /// The source text of the token
    pub lexeme: String,
}

impl Token {
    /// Create a new token
    #[must_use]
    pub fn new(kind: TokenKind, span: Span, lexeme: impl Into<String>) -> Self {
        Self {
            kind,
            span,
            lexeme: lexeme.into(),
        }
    }

    /// The value of a string token, without its delimiting quotes
    ///
    /// For any other token kind this is the lexeme itself.
    #[must_use]
    pub fn string_value(&self) -> &str {
        if self.kind != TokenKind::Str {
            return &self.lexeme;
        }
        let inner = self.lexeme.strip_prefix('"').unwrap_or(&self.lexeme);
        inner.strip_suffix('"').unwrap_or(inner)
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:<12} {:<8} {:?}",
            format!("{:?}", self.kind),
            self.span.to_string(),
            self.lexeme
        )
    }
}

/// Lexer error types
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LexError {
    #[error("octal notation is not supported: {0}")]
    OctalLiteral(String),
}

/// A lexer error with location information
#[derive(Debug, Clone, PartialEq)]
pub struct SpannedError {
    pub error: LexError,
    pub span: Span,
}

impl SpannedError {
    #[must_use]
    pub fn new(error: LexError, span: Span) -> Self {
        Self { error, span }
    }
}

impl std::fmt::Display for SpannedError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at {}", self.error, self.span)
    }
}

impl std::error::Error for SpannedError {}

/// The simplelang lexer
pub struct Lexer<'source> {
    source: &'source str,
    /// Current byte offset and row/column
    cursor: Cursor,
}

impl<'source> Lexer<'source> {
    /// Create a new lexer for the given source code
    #[must_use]
    pub fn new(source: &'source str) -> Self {
        Self {
            source,
            cursor: Cursor::default(),
        }
    }

    /// Tokenize the entire source
    ///
    /// Stops at the first lexical error; there is no partial token stream.
    pub fn tokenize(source: &str) -> Result<Vec<Token>, SpannedError> {
        let tokens = Lexer::new(source).collect::<Result<Vec<_>, _>>()?;
        tracing::debug!(tokens = tokens.len(), bytes = source.len(), "tokenized source");
        Ok(tokens)
    }

    /// Get the next token, or `None` at end of input
    pub fn next_token(&mut self) -> Result<Option<Token>, SpannedError> {
        self.skip_whitespace();

        let remaining = &self.source[self.cursor.offset..];
        let Some(first) = remaining.chars().next() else {
            return Ok(None);
        };

        let start = self.cursor;
        let mut logos_lexer = TokenKind::lexer(remaining);
        let kind = match logos_lexer.next() {
            Some(Ok(kind)) => {
                self.cursor.bump_str(logos_lexer.slice());
                kind
            }
            // Anything logos rejects is surfaced as a single-character token
            Some(Err(())) | None => {
                self.cursor.bump(first);
                TokenKind::Unexpected
            }
        };

        let span = self.cursor.span_from(start);
        let lexeme = &self.source[span.as_range()];

        if kind == TokenKind::Number && is_octal(lexeme) {
            return Err(SpannedError::new(
                LexError::OctalLiteral(lexeme.to_string()),
                span,
            ));
        }

        Ok(Some(Token::new(kind, span, lexeme)))
    }

    /// Skip whitespace, except line feeds which are tokens
    fn skip_whitespace(&mut self) {
        while let Some(c) = self.source[self.cursor.offset..].chars().next() {
            if c == '\n' || !c.is_whitespace() {
                break;
            }
            self.cursor.bump(c);
        }
    }
}

impl Iterator for Lexer<'_> {
    type Item = Result<Token, SpannedError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token().transpose()
    }
}

/// A leading `0` followed by another digit before any `.`
fn is_octal(lexeme: &str) -> bool {
    let mut bytes = lexeme.bytes();
    bytes.next() == Some(b'0') && bytes.next().is_some_and(|b| b.is_ascii_digit())
}
