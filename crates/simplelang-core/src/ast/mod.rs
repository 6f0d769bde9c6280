//! Abstract Syntax Tree (AST) for the simplelang programming language
//!
//! This module defines the data structures that represent parsed simplelang source code.
//! All AST nodes include source location information via [`Span`] for error reporting.
//!
//! Statements and expressions are closed sum types ([`StmtKind`], [`ExprKind`],
//! [`Literal`]); every consumer matches them exhaustively.

mod expr;
mod pretty;
mod stmt;

pub use expr::*;
pub use stmt::*;

// Re-export Span from lexer for convenience
pub use crate::lexer::Span;

/// An identifier with its source location
///
/// Qualified names such as `fmt.Println` are stored flattened into one dotted
/// string; the span covers the whole path.
#[derive(Debug, Clone, PartialEq)]
pub struct Ident {
    /// The identifier name
    pub name: String,
    /// Source location
    pub span: Span,
}

impl Ident {
    /// Create a new identifier
    #[must_use]
    pub fn new(name: impl Into<String>, span: Span) -> Self {
        Self {
            name: name.into(),
            span,
        }
    }
}

/// A type name as written in a declaration, e.g. `int`, `*os.File`
#[derive(Debug, Clone, PartialEq)]
pub struct TypeName {
    /// The type text, including a leading `*` for pointer types
    pub name: String,
    /// Source location
    pub span: Span,
}

impl TypeName {
    #[must_use]
    pub fn new(name: impl Into<String>, span: Span) -> Self {
        Self {
            name: name.into(),
            span,
        }
    }
}

/// A block of statements, optionally with a trailing expression
///
/// The tail expression is the last statement of the source block when that
/// statement is an expression; it is never also present in `stmts`.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    /// The statements in the block
    pub stmts: Vec<Stmt>,
    /// Optional trailing expression (the block's value)
    pub expr: Option<Box<Expr>>,
    /// Source location of the entire block (including braces)
    pub span: Span,
}

impl Block {
    /// Create a new block
    #[must_use]
    pub fn new(stmts: Vec<Stmt>, expr: Option<Expr>, span: Span) -> Self {
        Self {
            stmts,
            expr: expr.map(Box::new),
            span,
        }
    }

    /// Split a statement list into a block, moving a trailing expression
    /// statement into the tail slot
    #[must_use]
    pub fn from_body(mut stmts: Vec<Stmt>, span: Span) -> Self {
        let tail = match stmts.last() {
            Some(Stmt {
                kind: StmtKind::Expr(_),
                ..
            }) => stmts.pop().and_then(|stmt| match stmt.kind {
                StmtKind::Expr(expr) => Some(expr),
                _ => None,
            }),
            _ => None,
        };
        Self::new(stmts, tail, span)
    }
}

/// A parsed compilation unit: the flat top-level statement list
#[derive(Debug, Clone, PartialEq)]
pub struct Module {
    /// Top-level statements in source order
    pub stmts: Vec<Stmt>,
    /// Source location of the whole unit
    pub span: Span,
}

impl Module {
    /// Create a new module
    #[must_use]
    pub fn new(stmts: Vec<Stmt>, span: Span) -> Self {
        Self { stmts, span }
    }

    /// The name given by the last `package` statement, if any
    #[must_use]
    pub fn package_name(&self) -> Option<&str> {
        self.stmts.iter().rev().find_map(|stmt| match &stmt.kind {
            StmtKind::Package(name) => Some(name.name.as_str()),
            _ => None,
        })
    }

    /// Iterate over the top-level function declarations
    pub fn functions(&self) -> impl Iterator<Item = &Function> {
        self.stmts.iter().filter_map(|stmt| match &stmt.kind {
            StmtKind::Function(func) => Some(func),
            _ => None,
        })
    }
}
