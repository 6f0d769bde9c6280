//! Generator error types

use crate::lexer::Span;
use thiserror::Error;

/// A code generation error with location information
#[derive(Debug, Clone, PartialEq)]
pub struct EmitError {
    /// The kind of error
    pub kind: EmitErrorKind,
    /// Source location of the offending node
    pub span: Span,
    /// Optional hint for fixing the error
    pub hint: Option<String>,
}

impl EmitError {
    /// Create a new emit error
    #[must_use]
    pub fn new(kind: EmitErrorKind, span: Span) -> Self {
        Self {
            kind,
            span,
            hint: None,
        }
    }

    /// Add a hint to this error
    #[must_use]
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl std::fmt::Display for EmitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at {}", self.kind, self.span)?;
        if let Some(hint) = &self.hint {
            write!(f, " (hint: {hint})")?;
        }
        Ok(())
    }
}

impl std::error::Error for EmitError {}

/// The kind of code generation error
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EmitErrorKind {
    #[error("package name has not been supplied")]
    MissingPackage,

    #[error("import alias '{alias}' already refers to \"{existing}\", cannot import \"{requested}\"")]
    ImportAliasConflict {
        alias: String,
        existing: String,
        requested: String,
    },

    #[error("function '{0}' can only be declared at the top level")]
    NestedFunction(String),

    #[error("package statement is only allowed at the top level")]
    MisplacedPackage,

    #[error("unsupported expression: {0}")]
    UnsupportedExpression(&'static str),

    #[error("'{name}' expects {expected} arguments, found {found}")]
    ArityMismatch {
        name: String,
        expected: usize,
        found: usize,
    },

    #[error("top-level statements cannot be combined with an explicit 'main' function")]
    EntryPointConflict,

    #[error("'if' assigned to '{0}' has no 'else' branch")]
    MissingElse(String),
}
