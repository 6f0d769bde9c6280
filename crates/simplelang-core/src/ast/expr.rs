//! Expression AST nodes for the simplelang programming language

use crate::lexer::{Span, TokenKind};

use super::{Block, Ident};

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinOp {
    // Arithmetic
    /// Addition (+)
    Add,
    /// Subtraction (-)
    Sub,
    /// Multiplication (*)
    Mul,
    /// Division (/)
    Div,
    /// Exponentiation (**)
    Pow,
    /// Modulo (%)
    Mod,

    // Bitwise
    /// Bitwise AND (&)
    BitAnd,
    /// Bitwise OR (|)
    BitOr,

    // Logical
    /// Logical AND (&&)
    And,
    /// Logical OR (||)
    Or,

    // Comparison
    /// Equal (==)
    Eq,
    /// Not equal (!=)
    Ne,
    /// Less than (<)
    Lt,
    /// Less than or equal (<=)
    Le,
    /// Greater than (>)
    Gt,
    /// Greater than or equal (>=)
    Ge,
}

impl BinOp {
    /// Map an operator token to its binary operator, if it is one
    #[must_use]
    pub const fn from_token(kind: TokenKind) -> Option<Self> {
        Some(match kind {
            TokenKind::Plus => BinOp::Add,
            TokenKind::Minus => BinOp::Sub,
            TokenKind::Star => BinOp::Mul,
            TokenKind::Slash => BinOp::Div,
            TokenKind::StarStar => BinOp::Pow,
            TokenKind::Percent => BinOp::Mod,
            TokenKind::Amp => BinOp::BitAnd,
            TokenKind::Pipe => BinOp::BitOr,
            TokenKind::AmpAmp => BinOp::And,
            TokenKind::PipePipe => BinOp::Or,
            TokenKind::EqEq => BinOp::Eq,
            TokenKind::NotEq => BinOp::Ne,
            TokenKind::Lt => BinOp::Lt,
            TokenKind::LtEq => BinOp::Le,
            TokenKind::Gt => BinOp::Gt,
            TokenKind::GtEq => BinOp::Ge,
            _ => return None,
        })
    }

    /// Returns the precedence of the operator (higher = binds tighter)
    ///
    /// Only a fixed subset of operators can be ranked; the parser rejects any
    /// comparison involving an operator outside it.
    #[must_use]
    pub const fn precedence(self) -> Option<i8> {
        match self {
            BinOp::And => Some(-1),
            BinOp::Gt => Some(0),
            BinOp::Add | BinOp::Sub => Some(1),
            BinOp::Mul | BinOp::Div | BinOp::Mod => Some(2),
            BinOp::Pow => Some(3),
            _ => None,
        }
    }

    /// Returns `Some(true)` if `self` binds strictly tighter than `other`
    ///
    /// `None` when either operator has no precedence.
    #[must_use]
    pub fn binds_tighter_than(self, other: BinOp) -> Option<bool> {
        Some(self.precedence()? > other.precedence()?)
    }

    /// Returns the symbol representation of the operator
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Pow => "**",
            BinOp::Mod => "%",
            BinOp::BitAnd => "&",
            BinOp::BitOr => "|",
            BinOp::And => "&&",
            BinOp::Or => "||",
            BinOp::Eq => "==",
            BinOp::Ne => "!=",
            BinOp::Lt => "<",
            BinOp::Le => "<=",
            BinOp::Gt => ">",
            BinOp::Ge => ">=",
        }
    }
}

/// Unary (prefix) operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    /// Negation (-)
    Neg,
    /// Logical NOT (!)
    Not,
    /// Address-of (&)
    Ref,
    /// Pointer dereference (*)
    Deref,
    /// Unary plus (+)
    Pos,
}

impl UnaryOp {
    /// Map an operator token to its prefix operator, if it is one
    #[must_use]
    pub const fn from_token(kind: TokenKind) -> Option<Self> {
        Some(match kind {
            TokenKind::Minus => UnaryOp::Neg,
            TokenKind::Bang => UnaryOp::Not,
            TokenKind::Amp => UnaryOp::Ref,
            TokenKind::Star => UnaryOp::Deref,
            TokenKind::Plus => UnaryOp::Pos,
            _ => return None,
        })
    }

    /// Returns the symbol representation of the operator
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            UnaryOp::Neg => "-",
            UnaryOp::Not => "!",
            UnaryOp::Ref => "&",
            UnaryOp::Deref => "*",
            UnaryOp::Pos => "+",
        }
    }
}

/// Literal values
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// Integer literal (decimal only)
    Int(i64),
    /// Floating-point literal (e.g., 3.14, 7.)
    Float(f64),
    /// String literal (no escapes)
    String(String),
    /// Interpolated string literal ($"hello {name}")
    Interpolated(InterpolatedString),
}

/// An interpolated string split into literal text and holes
///
/// `parts` always has exactly one more element than `exprs`; the string reads
/// `parts[0] exprs[0] parts[1] ... exprs[n-1] parts[n]`.
#[derive(Debug, Clone, PartialEq)]
pub struct InterpolatedString {
    /// The string value as written, without quotes
    pub raw: String,
    /// Literal text between holes
    pub parts: Vec<String>,
    /// One identifier expression per `{...}` hole
    pub exprs: Vec<Expr>,
}

/// An expression with source location
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    /// The kind of expression
    pub kind: ExprKind,
    /// Source location
    pub span: Span,
}

impl Expr {
    /// Create a new expression
    #[must_use]
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Create a literal expression
    #[must_use]
    pub fn literal(lit: Literal, span: Span) -> Self {
        Self::new(ExprKind::Literal(lit), span)
    }

    /// Create an identifier expression
    #[must_use]
    pub fn ident(name: impl Into<String>, span: Span) -> Self {
        Self::new(ExprKind::Ident(Ident::new(name, span)), span)
    }

    /// Create a binary expression spanning both operands
    #[must_use]
    pub fn binary(left: Expr, op: BinOp, right: Expr) -> Self {
        let span = left.span.merge(right.span);
        Self::new(
            ExprKind::Binary {
                left: Box::new(left),
                op,
                right: Box::new(right),
            },
            span,
        )
    }

    /// Returns true for block and if expressions, which lower to statements
    #[must_use]
    pub const fn is_block_like(&self) -> bool {
        matches!(self.kind, ExprKind::Block(_) | ExprKind::If(_))
    }
}

/// The kind of expression (without source location)
#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    /// Literal value (42, 3.14, "hello", $"hi {name}")
    Literal(Literal),

    /// Identifier reference, possibly dotted (`a.b.c`)
    Ident(Ident),

    /// Prefix operation (-x, !ok, &v, *p)
    Unary { op: UnaryOp, operand: Box<Expr> },

    /// Binary operation (a + b, x > y, etc.)
    Binary {
        left: Box<Expr>,
        op: BinOp,
        right: Box<Expr>,
    },

    /// Parenthesized expression
    Paren(Box<Expr>),

    /// Function call by (possibly dotted) name
    Call { callee: Ident, args: Vec<Expr> },

    /// Block expression `{ stmts; tail }`
    Block(Block),

    /// If expression
    If(IfExpr),
}

/// An `if` expression with an optional else branch
#[derive(Debug, Clone, PartialEq)]
pub struct IfExpr {
    pub cond: Box<Expr>,
    pub then_branch: Block,
    pub else_branch: Option<ElseBranch>,
}

/// Else branch of an if expression
#[derive(Debug, Clone, PartialEq)]
pub enum ElseBranch {
    /// else { block }
    Block(Block),
    /// else if ...
    ElseIf(Box<Expr>),
}
