//! Token types for the simplelang lexer

use logos::Logos;

/// The kind of token produced by the lexer
///
/// Whitespace other than the line feed is skipped by the lexer driver before
/// logos sees the input, so every variant here is significant.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // ========== Keywords ==========
    #[token("package")]
    Package,
    #[token("import")]
    Import,
    #[token("fn")]
    Fn,
    #[token("const")]
    Const,
    #[token("let")]
    Let,
    #[token("return")]
    Return,
    #[token("if")]
    If,
    #[token("else")]
    Else,
    #[token("loop")]
    Loop,
    #[token("break")]
    Break,

    // ========== Literals ==========
    /// Decimal number with at most one `.`; the raw text is the lexeme
    #[regex(r"[0-9]+(\.[0-9]*)?")]
    Number,

    /// Double-quoted string without escapes; an unterminated string runs to
    /// the end of input
    #[regex(r#""[^"]*"?"#)]
    Str,

    // ========== Identifiers ==========
    #[regex(r"[\p{L}_][\p{L}\p{N}_]*")]
    Ident,

    // ========== Operators ==========
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("**")]
    StarStar,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("&")]
    Amp,
    #[token("|")]
    Pipe,
    #[token("&&")]
    AmpAmp,
    #[token("||")]
    PipePipe,
    #[token("!")]
    Bang,
    #[token("!=")]
    NotEq,
    #[token("==")]
    EqEq,
    #[token("<")]
    Lt,
    #[token("<=")]
    LtEq,
    #[token(">")]
    Gt,
    #[token(">=")]
    GtEq,

    // ========== Punctuation ==========
    /// Assignment `=` (as opposed to the `==` operator)
    #[token("=")]
    Eq,
    #[token(":")]
    Colon,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
    /// Marks the following string literal as interpolated
    #[token("$")]
    Dollar,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,

    // ========== Special ==========
    #[token("\n")]
    Newline,

    /// A character outside the language's vocabulary (not matched by logos)
    Unexpected,
}

impl TokenKind {
    /// Returns true if this token is a keyword
    #[must_use]
    pub const fn is_keyword(&self) -> bool {
        matches!(
            self,
            Self::Package
                | Self::Import
                | Self::Fn
                | Self::Const
                | Self::Let
                | Self::Return
                | Self::If
                | Self::Else
                | Self::Loop
                | Self::Break
        )
    }

    /// Returns true if this token is a literal
    #[must_use]
    pub const fn is_literal(&self) -> bool {
        matches!(self, Self::Number | Self::Str)
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Package => write!(f, "package"),
            Self::Import => write!(f, "import"),
            Self::Fn => write!(f, "fn"),
            Self::Const => write!(f, "const"),
            Self::Let => write!(f, "let"),
            Self::Return => write!(f, "return"),
            Self::If => write!(f, "if"),
            Self::Else => write!(f, "else"),
            Self::Loop => write!(f, "loop"),
            Self::Break => write!(f, "break"),
            Self::Number => write!(f, "number"),
            Self::Str => write!(f, "string"),
            Self::Ident => write!(f, "identifier"),
            Self::Plus => write!(f, "+"),
            Self::Minus => write!(f, "-"),
            Self::Star => write!(f, "*"),
            Self::StarStar => write!(f, "**"),
            Self::Slash => write!(f, "/"),
            Self::Percent => write!(f, "%"),
            Self::Amp => write!(f, "&"),
            Self::Pipe => write!(f, "|"),
            Self::AmpAmp => write!(f, "&&"),
            Self::PipePipe => write!(f, "||"),
            Self::Bang => write!(f, "!"),
            Self::NotEq => write!(f, "!="),
            Self::EqEq => write!(f, "=="),
            Self::Lt => write!(f, "<"),
            Self::LtEq => write!(f, "<="),
            Self::Gt => write!(f, ">"),
            Self::GtEq => write!(f, ">="),
            Self::Eq => write!(f, "="),
            Self::Colon => write!(f, ":"),
            Self::Comma => write!(f, ","),
            Self::Dot => write!(f, "."),
            Self::Dollar => write!(f, "$"),
            Self::LParen => write!(f, "("),
            Self::RParen => write!(f, ")"),
            Self::LBrace => write!(f, "{{"),
            Self::RBrace => write!(f, "}}"),
            Self::Newline => write!(f, "newline"),
            Self::Unexpected => write!(f, "unexpected character"),
        }
    }
}
