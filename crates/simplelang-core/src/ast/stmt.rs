//! Statement AST nodes for the simplelang programming language

use crate::lexer::Span;

use super::{Expr, Ident, TypeName};

/// A statement with source location
#[derive(Debug, Clone, PartialEq)]
pub struct Stmt {
    /// The kind of statement
    pub kind: StmtKind,
    /// Source location
    pub span: Span,
}

impl Stmt {
    /// Create a new statement
    #[must_use]
    pub fn new(kind: StmtKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Create an expression statement
    #[must_use]
    pub fn expr(expr: Expr) -> Self {
        let span = expr.span;
        Self::new(StmtKind::Expr(expr), span)
    }
}

/// The kind of statement (without source location)
#[derive(Debug, Clone, PartialEq)]
pub enum StmtKind {
    /// `package name`
    Package(Ident),

    /// `import "path"`, `import alias "path"` or a grouped `import ( ... )`
    Import(Vec<ImportSpec>),

    /// `let`/`const` declaration: `let x: int = 1`
    ///
    /// At least one of `ty` and `value` is always present.
    ValueDecl {
        kind: DeclKind,
        name: Ident,
        ty: Option<TypeName>,
        value: Option<Expr>,
    },

    /// Function declaration
    Function(Function),

    /// Assignment: `x = expr`
    Assign { target: Ident, value: Expr },

    /// Return statement: `return expr` or a bare `return`
    Return(Option<Expr>),

    /// Unconditional loop: `loop { ... }`
    Loop(Vec<Stmt>),

    /// Break statement
    Break,

    /// Expression statement (calls, if expressions, blocks, ...)
    Expr(Expr),
}

/// Declaration keyword
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclKind {
    /// `const`
    Const,
    /// `let`
    Let,
}

impl DeclKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            DeclKind::Const => "const",
            DeclKind::Let => "let",
        }
    }
}

/// One entry of an import statement
#[derive(Debug, Clone, PartialEq)]
pub struct ImportSpec {
    /// Optional local name for the package
    pub alias: Option<Ident>,
    /// Import path, without quotes
    pub path: String,
    pub span: Span,
}

/// A function parameter: `name Type`
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: Ident,
    pub ty: TypeName,
}

/// A function declaration
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    /// Function name
    pub name: Ident,
    /// Parameters in declaration order
    pub params: Vec<Param>,
    /// Zero or one return type
    pub return_types: Vec<TypeName>,
    /// Body statements
    pub body: Vec<Stmt>,
    /// Source location of the whole declaration
    pub span: Span,
}
