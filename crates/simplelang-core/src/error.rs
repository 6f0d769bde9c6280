//! Unified error type for the transpilation pipeline

use thiserror::Error;

use crate::codegen::EmitError;
use crate::lexer::{Span, SpannedError};
use crate::parser::ParseError;

/// Any error produced while turning simplelang source into Go
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("lex error: {0}")]
    Lex(#[from] SpannedError),

    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("codegen error: {0}")]
    Emit(#[from] EmitError),
}

/// The pipeline stage an error came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Lex,
    Parse,
    Emit,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::Lex => write!(f, "lexer"),
            Stage::Parse => write!(f, "parser"),
            Stage::Emit => write!(f, "code generator"),
        }
    }
}

impl Error {
    /// Source location of the error
    #[must_use]
    pub fn span(&self) -> Span {
        match self {
            Error::Lex(e) => e.span,
            Error::Parse(e) => e.span,
            Error::Emit(e) => e.span,
        }
    }

    /// The stage that rejected the input
    #[must_use]
    pub fn stage(&self) -> Stage {
        match self {
            Error::Lex(_) => Stage::Lex,
            Error::Parse(_) => Stage::Parse,
            Error::Emit(_) => Stage::Emit,
        }
    }

    /// What went wrong, without the location or hint
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Error::Lex(e) => e.error.to_string(),
            Error::Parse(e) => e.kind.to_string(),
            Error::Emit(e) => e.kind.to_string(),
        }
    }

    /// Hint attached to the error, if any
    #[must_use]
    pub fn hint(&self) -> Option<&str> {
        match self {
            Error::Lex(_) => None,
            Error::Parse(e) => e.hint.as_deref(),
            Error::Emit(e) => e.hint.as_deref(),
        }
    }
}

/// Result alias for pipeline operations
pub type Result<T> = std::result::Result<T, Error>;
