//! Parser for the simplelang programming language
//!
//! This module implements a recursive-descent parser that converts a token
//! stream into an Abstract Syntax Tree (AST). Newlines are significant: they
//! terminate statements, and are skipped only between statements, inside call
//! argument lists and after a binary operator.
//!
//! Binary expressions are not parsed by precedence climbing. The parser reads
//! one operand, then the *entire* rest of the expression as the right-hand
//! side, and performs a single rotation when the current operator binds
//! strictly tighter than the operator at the root of that right-hand side.
//! Operators of equal precedence therefore group from the right.
//!
//! # Example
//!
//! ```
//! use simplelang_core::lexer::Lexer;
//! use simplelang_core::parser::Parser;
//!
//! let tokens = Lexer::tokenize("package main\nlet x = 1 + 2 * 3\n").unwrap();
//! let module = Parser::build(tokens).unwrap();
//! assert_eq!(module.stmts.len(), 2);
//! ```

mod error;

pub use error::{ExpectedToken, ParseError, ParseErrorKind};

use crate::ast::{
    BinOp, Block, DeclKind, ElseBranch, Expr, ExprKind, Function, Ident, IfExpr, ImportSpec,
    InterpolatedString, Literal, Module, Param, Stmt, StmtKind, TypeName, UnaryOp,
};
use crate::lexer::{Span, Token, TokenKind};

/// Result type for parsing operations
pub type ParseResult<T> = Result<T, ParseError>;

/// The simplelang parser
///
/// Owns the token sequence and a single forward-only cursor into it.
pub struct Parser {
    /// All tokens from the source
    tokens: Vec<Token>,
    /// Current position in the token stream
    position: usize,
    /// Zero-width span just past the last token
    eof_span: Span,
}

impl Parser {
    /// Create a new parser over a token sequence
    #[must_use]
    pub fn new(tokens: Vec<Token>) -> Self {
        let eof_span = tokens.last().map_or_else(Span::dummy, |last| {
            Span::new(
                last.span.end,
                last.span.end,
                last.span.end_loc,
                last.span.end_loc,
            )
        });
        Self {
            tokens,
            position: 0,
            eof_span,
        }
    }

    /// Parse a complete token sequence into a module
    pub fn build(tokens: Vec<Token>) -> ParseResult<Module> {
        let mut parser = Parser::new(tokens);
        let module = parser.module()?;
        tracing::debug!(statements = module.stmts.len(), "parsed module");
        Ok(module)
    }

    // ==================== Token Management ====================

    /// Get the current token, if any remain
    fn current(&self) -> Option<&Token> {
        self.tokens.get(self.position)
    }

    /// Get the current token kind
    fn current_kind(&self) -> Option<TokenKind> {
        self.current().map(|t| t.kind)
    }

    /// Span of the current token, or the end-of-input span
    fn current_span(&self) -> Span {
        self.current().map_or(self.eof_span, |t| t.span)
    }

    /// Span of the most recently consumed token
    fn previous_span(&self) -> Span {
        self.position
            .checked_sub(1)
            .and_then(|i| self.tokens.get(i))
            .map_or(self.eof_span, |t| t.span)
    }

    /// Span from `start` through the most recently consumed token
    fn span_from(&self, start: Span) -> Span {
        start.merge(self.previous_span())
    }

    /// Check if we're at end of input
    fn is_eof(&self) -> bool {
        self.position >= self.tokens.len()
    }

    /// Advance to the next token, returning the consumed one
    fn advance(&mut self) -> Option<Token> {
        let token = self.current().cloned();
        if token.is_some() {
            self.position += 1;
        }
        token
    }

    /// Check if the current token matches a kind
    fn check(&self, kind: TokenKind) -> bool {
        self.current_kind() == Some(kind)
    }

    /// Consume a token if it matches, returning it
    fn eat(&mut self, kind: TokenKind) -> Option<Token> {
        if self.check(kind) {
            self.advance()
        } else {
            None
        }
    }

    /// Skip any run of newline tokens
    fn skip_newlines(&mut self) {
        while self.eat(TokenKind::Newline).is_some() {}
    }

    /// Error for the current token not being what was expected
    fn unexpected(&self, expected: ExpectedToken) -> ParseError {
        match self.current() {
            Some(token) => ParseError::new(
                ParseErrorKind::UnexpectedToken {
                    found: token.kind,
                    expected,
                },
                token.span,
            ),
            None => ParseError::new(ParseErrorKind::UnexpectedEof { expected }, self.eof_span),
        }
    }

    /// Expect and consume a specific token, or error
    fn expect(&mut self, kind: TokenKind) -> ParseResult<Token> {
        match self.eat(kind) {
            Some(token) => Ok(token),
            None => Err(self.unexpected(ExpectedToken::Token(kind))),
        }
    }

    /// Expect a token that must follow some construct
    fn expect_after(
        &mut self,
        kind: TokenKind,
        expected: &'static str,
        context: &'static str,
    ) -> ParseResult<Token> {
        match self.eat(kind) {
            Some(token) => Ok(token),
            None => Err(ParseError::new(
                ParseErrorKind::ExpectedAfter { expected, context },
                self.current_span(),
            )),
        }
    }

    /// Expect an identifier token
    fn expect_ident(&mut self) -> ParseResult<Ident> {
        match self.eat(TokenKind::Ident) {
            Some(token) => Ok(Ident::new(token.lexeme, token.span)),
            None => {
                let err = ParseError::new(ParseErrorKind::ExpectedIdentifier, self.current_span());
                match self.current() {
                    Some(token) if token.kind.is_keyword() => Err(err.with_hint(format!(
                        "'{}' is a keyword and cannot be used as a name",
                        token.lexeme
                    ))),
                    _ => Err(err),
                }
            }
        }
    }

    /// Parse `a.b.c` into one flattened identifier
    fn qualified_ident(&mut self) -> ParseResult<Ident> {
        let mut ident = self.expect_ident()?;
        while self.eat(TokenKind::Dot).is_some() {
            let segment = self.expect_ident()?;
            ident.name.push('.');
            ident.name.push_str(&segment.name);
            ident.span = ident.span.merge(segment.span);
        }
        Ok(ident)
    }

    // ==================== Module Parsing ====================

    /// Parse a complete module
    fn module(&mut self) -> ParseResult<Module> {
        let start = self.current_span();
        let stmts = self.body()?;

        // A top-level `}` ends the body early; only trailing newlines may follow
        let stray = self.previous_span();
        self.skip_newlines();
        if !self.is_eof() {
            return Err(ParseError::new(
                ParseErrorKind::UnexpectedToken {
                    found: TokenKind::RBrace,
                    expected: ExpectedToken::Description("end of input".to_string()),
                },
                stray,
            )
            .with_hint("this '}' has no matching '{'"));
        }

        Ok(Module::new(stmts, self.span_from(start)))
    }

    /// Parse statements until end of input or a closing `}` (consumed)
    fn body(&mut self) -> ParseResult<Vec<Stmt>> {
        let mut stmts = Vec::new();
        while let Some(kind) = self.current_kind() {
            match kind {
                TokenKind::Newline => {
                    self.advance();
                }
                TokenKind::RBrace => {
                    self.advance();
                    break;
                }
                _ => stmts.push(self.statement()?),
            }
        }
        Ok(stmts)
    }

    // ==================== Statement Parsing ====================

    /// Parse a single statement
    fn statement(&mut self) -> ParseResult<Stmt> {
        let Some(kind) = self.current_kind() else {
            return Err(self.unexpected(ExpectedToken::Description("statement".to_string())));
        };

        match kind {
            TokenKind::Ident => self.identifier_statement(),
            TokenKind::Package => self.package_statement(),
            TokenKind::Import => self.import_statement(),
            TokenKind::Const => self.value_declaration(DeclKind::Const),
            TokenKind::Let => self.value_declaration(DeclKind::Let),
            TokenKind::Fn => self.function_declaration(),
            TokenKind::Return => self.return_statement(),
            TokenKind::Loop => self.loop_statement(),
            TokenKind::Break => {
                let token = self.advance();
                let span = token.map_or(self.eof_span, |t| t.span);
                Ok(Stmt::new(StmtKind::Break, span))
            }
            TokenKind::If | TokenKind::Dollar | TokenKind::LParen | TokenKind::LBrace => {
                Ok(Stmt::expr(self.expression()?))
            }
            kind if kind.is_literal() || UnaryOp::from_token(kind).is_some() => {
                Ok(Stmt::expr(self.expression()?))
            }
            _ => Err(self.unexpected(ExpectedToken::Description("statement".to_string()))),
        }
    }

    /// Parse a statement that starts with a (possibly dotted) identifier
    ///
    /// `x = expr` is an assignment, `f(...)` a call; a bare identifier must be
    /// followed by a newline, `}`, end of input or a binary operator.
    fn identifier_statement(&mut self) -> ParseResult<Stmt> {
        let name = self.qualified_ident()?;

        if self.eat(TokenKind::Eq).is_some() {
            let value = self.expression()?;
            let span = name.span.merge(value.span);
            return Ok(Stmt::new(StmtKind::Assign { target: name, value }, span));
        }

        let primary = match self.current_kind() {
            Some(TokenKind::LParen) => self.call(name)?,
            None | Some(TokenKind::Newline | TokenKind::RBrace) => {
                Expr::new(ExprKind::Ident(name.clone()), name.span)
            }
            Some(kind) if BinOp::from_token(kind).is_some() => {
                Expr::new(ExprKind::Ident(name.clone()), name.span)
            }
            Some(_) => {
                return Err(self.unexpected(ExpectedToken::OneOf(vec![
                    TokenKind::Eq,
                    TokenKind::LParen,
                    TokenKind::Newline,
                ])))
            }
        };

        Ok(Stmt::expr(self.binary_tail(primary)?))
    }

    /// Parse `package name`, which must end its line
    fn package_statement(&mut self) -> ParseResult<Stmt> {
        let start = self.current_span();
        self.advance();
        let name = self
            .expect_ident()
            .map_err(|e| e.with_hint("expected a package name after 'package'"))?;
        let span = self.span_from(start);

        if !self.is_eof() {
            self.expect_after(TokenKind::Newline, "newline", "package name")?;
        }

        Ok(Stmt::new(StmtKind::Package(name), span))
    }

    /// Parse `import "path"`, `import alias "path"` or `import ( ... )`
    fn import_statement(&mut self) -> ParseResult<Stmt> {
        let start = self.current_span();
        self.advance();

        let mut specs = Vec::new();
        if self.eat(TokenKind::LParen).is_some() {
            loop {
                self.skip_newlines();
                if self.eat(TokenKind::RParen).is_some() {
                    break;
                }
                specs.push(self.import_spec()?);
                if !self.check(TokenKind::RParen) {
                    self.expect_after(TokenKind::Newline, "newline", "import path")?;
                }
            }
        } else {
            specs.push(self.import_spec()?);
        }

        Ok(Stmt::new(StmtKind::Import(specs), self.span_from(start)))
    }

    fn import_spec(&mut self) -> ParseResult<ImportSpec> {
        let start = self.current_span();
        let alias = if self.check(TokenKind::Ident) {
            Some(self.expect_ident()?)
        } else {
            None
        };
        let path = self
            .expect(TokenKind::Str)
            .map_err(|e| e.with_hint("import paths are double-quoted strings"))?;

        Ok(ImportSpec {
            alias,
            path: path.string_value().to_string(),
            span: self.span_from(start),
        })
    }

    /// Parse `let`/`const name [: Type] [= expr]`
    fn value_declaration(&mut self, kind: DeclKind) -> ParseResult<Stmt> {
        let start = self.current_span();
        self.advance();
        let name = self.expect_ident()?;

        let ty = if self.eat(TokenKind::Colon).is_some() {
            Some(self.type_name()?)
        } else {
            None
        };

        let value = if self.eat(TokenKind::Eq).is_some() {
            Some(self.expression()?)
        } else {
            None
        };

        if ty.is_none() && value.is_none() {
            return Err(ParseError::new(
                ParseErrorKind::MissingTypeOrInitializer(name.name.clone()),
                name.span,
            )
            .with_hint(format!("write `{kind} {name}: <type>` or `{kind} {name} = <value>`")));
        }

        Ok(Stmt::new(
            StmtKind::ValueDecl {
                kind,
                name,
                ty,
                value,
            },
            self.span_from(start),
        ))
    }

    /// Parse a type: an optional `*` followed by a qualified identifier
    fn type_name(&mut self) -> ParseResult<TypeName> {
        let start = self.current_span();
        let pointer = self.eat(TokenKind::Star).is_some();
        let ident = self.qualified_ident()?;
        let name = if pointer {
            format!("*{}", ident.name)
        } else {
            ident.name
        };
        Ok(TypeName::new(name, self.span_from(start)))
    }

    /// Parse `fn name(params) [ReturnType] { body }`
    fn function_declaration(&mut self) -> ParseResult<Stmt> {
        let start = self.current_span();
        self.advance();

        let name = self.expect_ident()?;
        self.expect_after(TokenKind::LParen, "(", "function name")?;
        let params = self.parameters()?;
        let return_types = self.return_types()?;
        self.expect_after(TokenKind::LBrace, "{", "function signature")?;
        let body = self.body()?;

        let span = self.span_from(start);
        Ok(Stmt::new(
            StmtKind::Function(Function {
                name,
                params,
                return_types,
                body,
                span,
            }),
            span,
        ))
    }

    /// Parse parameters after the opening `(`, through the closing `)`
    fn parameters(&mut self) -> ParseResult<Vec<Param>> {
        let mut params = Vec::new();
        loop {
            self.skip_newlines();
            if self.eat(TokenKind::RParen).is_some() {
                break;
            }

            let name = self.expect_ident()?;
            let ty = self.type_name()?;
            params.push(Param { name, ty });

            self.skip_newlines();
            if self.eat(TokenKind::Comma).is_none() {
                self.expect_after(TokenKind::RParen, ",", "function parameter")?;
                break;
            }
        }
        Ok(params)
    }

    /// Parse an optional single return type
    ///
    /// A parenthesized list of return types is consumed and dropped.
    fn return_types(&mut self) -> ParseResult<Vec<TypeName>> {
        match self.current_kind() {
            Some(TokenKind::LBrace) => Ok(Vec::new()),
            Some(TokenKind::LParen) => {
                let start = self.current_span();
                let mut depth = 0usize;
                loop {
                    match self.advance().map(|t| t.kind) {
                        Some(TokenKind::LParen) => depth += 1,
                        Some(TokenKind::RParen) => {
                            depth -= 1;
                            if depth == 0 {
                                break;
                            }
                        }
                        Some(_) => {}
                        None => {
                            return Err(self.unexpected(ExpectedToken::Token(TokenKind::RParen)))
                        }
                    }
                }
                tracing::warn!(
                    at = %start,
                    "multiple return types are not supported; the return type list is dropped"
                );
                Ok(Vec::new())
            }
            _ => Ok(vec![self.type_name()?]),
        }
    }

    /// Parse `return [expr]`
    fn return_statement(&mut self) -> ParseResult<Stmt> {
        let start = self.current_span();
        self.advance();

        let value = match self.current_kind() {
            None | Some(TokenKind::Newline | TokenKind::RBrace) => None,
            Some(_) => Some(self.expression()?),
        };

        Ok(Stmt::new(StmtKind::Return(value), self.span_from(start)))
    }

    /// Parse `loop { body }`
    fn loop_statement(&mut self) -> ParseResult<Stmt> {
        let start = self.current_span();
        self.advance();
        self.expect_after(TokenKind::LBrace, "{", "loop")?;
        let body = self.body()?;
        Ok(Stmt::new(StmtKind::Loop(body), self.span_from(start)))
    }

    // ==================== Expression Parsing ====================

    /// Parse a full expression: one operand plus any binary tail
    pub fn expression(&mut self) -> ParseResult<Expr> {
        let left = self.operand()?;
        self.binary_tail(left)
    }

    /// If a binary operator follows `left`, parse the rest of the expression
    /// as its right-hand side and combine the two
    fn binary_tail(&mut self, left: Expr) -> ParseResult<Expr> {
        let Some(op) = self.current_kind().and_then(BinOp::from_token) else {
            return Ok(left);
        };
        let op_span = self.current_span();
        self.advance();
        self.skip_newlines();

        let right = self.expression()?;
        combine(left, op, op_span, right)
    }

    /// Parse a single operand: a literal, identifier or call, parenthesized
    /// expression, block, if expression, interpolated string, or a prefix
    /// operator applied to another operand
    fn operand(&mut self) -> ParseResult<Expr> {
        let Some(token) = self.current().cloned() else {
            return Err(self.unexpected(ExpectedToken::Description("expression".to_string())));
        };

        match token.kind {
            TokenKind::Ident => {
                let name = self.qualified_ident()?;
                if self.check(TokenKind::LParen) {
                    self.call(name)
                } else {
                    let span = name.span;
                    Ok(Expr::new(ExprKind::Ident(name), span))
                }
            }
            TokenKind::Number => {
                self.advance();
                Ok(Expr::literal(number(&token)?, token.span))
            }
            TokenKind::Str => {
                self.advance();
                Ok(Expr::literal(
                    Literal::String(token.string_value().to_string()),
                    token.span,
                ))
            }
            TokenKind::Dollar => self.interpolated_string(),
            TokenKind::LParen => {
                self.advance();
                let inner = self.expression()?;
                self.expect_after(TokenKind::RParen, ")", "expression")
                    .map_err(|e| e.with_hint("unmatched '('"))?;
                Ok(Expr::new(
                    ExprKind::Paren(Box::new(inner)),
                    self.span_from(token.span),
                ))
            }
            TokenKind::LBrace => {
                let block = self.block()?;
                let span = block.span;
                Ok(Expr::new(ExprKind::Block(block), span))
            }
            TokenKind::If => self.if_expression(),
            kind => match UnaryOp::from_token(kind) {
                Some(op) => {
                    self.advance();
                    let operand = self.operand()?;
                    let span = token.span.merge(operand.span);
                    Ok(Expr::new(
                        ExprKind::Unary {
                            op,
                            operand: Box::new(operand),
                        },
                        span,
                    ))
                }
                None => Err(self.unexpected(ExpectedToken::Description("expression".to_string()))),
            },
        }
    }

    /// Parse call arguments after a callee name
    fn call(&mut self, callee: Ident) -> ParseResult<Expr> {
        self.expect(TokenKind::LParen)?;

        let mut args = Vec::new();
        loop {
            self.skip_newlines();
            if self.eat(TokenKind::RParen).is_some() {
                break;
            }
            args.push(self.expression()?);
            self.skip_newlines();
            if self.eat(TokenKind::Comma).is_none() {
                self.expect_after(TokenKind::RParen, ")", "call arguments")
                    .map_err(|e| e.with_hint("unmatched '('"))?;
                break;
            }
        }

        let span = self.span_from(callee.span);
        Ok(Expr::new(ExprKind::Call { callee, args }, span))
    }

    /// Parse `{ body }`, splitting off a trailing expression as the block value
    fn block(&mut self) -> ParseResult<Block> {
        let start = self.current_span();
        self.expect(TokenKind::LBrace)?;
        let stmts = self.body()?;
        Ok(Block::from_body(stmts, self.span_from(start)))
    }

    /// Parse `if cond { ... } [else if ... | else { ... }]`
    fn if_expression(&mut self) -> ParseResult<Expr> {
        let start = self.current_span();
        self.expect(TokenKind::If)?;

        let cond = self.expression()?;
        if !self.check(TokenKind::LBrace) {
            return Err(ParseError::new(
                ParseErrorKind::ExpectedAfter {
                    expected: "{",
                    context: "if condition",
                },
                self.current_span(),
            ));
        }
        let then_branch = self.block()?;

        let else_branch = if self.eat(TokenKind::Else).is_some() {
            match self.current_kind() {
                Some(TokenKind::If) => Some(ElseBranch::ElseIf(Box::new(self.if_expression()?))),
                Some(TokenKind::LBrace) => Some(ElseBranch::Block(self.block()?)),
                _ => {
                    return Err(
                        self.unexpected(ExpectedToken::OneOf(vec![TokenKind::If, TokenKind::LBrace]))
                    )
                }
            }
        } else {
            None
        };

        Ok(Expr::new(
            ExprKind::If(IfExpr {
                cond: Box::new(cond),
                then_branch,
                else_branch,
            }),
            self.span_from(start),
        ))
    }

    /// Parse `$"...{name}..."`
    ///
    /// Holes are not parsed as expressions: the raw text up to `}` becomes an
    /// identifier.
    fn interpolated_string(&mut self) -> ParseResult<Expr> {
        let start = self.current_span();
        self.expect(TokenKind::Dollar)?;
        let token = self
            .expect(TokenKind::Str)
            .map_err(|e| e.with_hint("'$' must be followed by a string literal"))?;

        let raw = token.string_value().to_string();
        let mut parts = Vec::new();
        let mut exprs = Vec::new();
        let mut current = String::new();

        let mut chars = raw.chars();
        while let Some(c) = chars.next() {
            if c != '{' {
                current.push(c);
                continue;
            }
            parts.push(std::mem::take(&mut current));
            let mut hole = String::new();
            loop {
                match chars.next() {
                    Some('}') => break,
                    Some(c) => hole.push(c),
                    None => {
                        return Err(ParseError::new(
                            ParseErrorKind::UnterminatedInterpolation,
                            token.span,
                        )
                        .with_hint("close the hole with '}'"))
                    }
                }
            }
            exprs.push(Expr::ident(hole, token.span));
        }
        parts.push(current);

        Ok(Expr::literal(
            Literal::Interpolated(InterpolatedString { raw, parts, exprs }),
            self.span_from(start),
        ))
    }
}

// ==================== Helper Functions ====================

/// Attach `left op` to an already-parsed right-hand side
///
/// When `right` is itself binary and `op` binds strictly tighter than its
/// root operator, `left op right.left` becomes the new left operand. This is a
/// single rotation; deeper levels of `right` are left as parsed.
fn combine(left: Expr, op: BinOp, op_span: Span, right: Expr) -> ParseResult<Expr> {
    match right {
        Expr {
            kind:
                ExprKind::Binary {
                    left: inner_left,
                    op: inner_op,
                    right: inner_right,
                },
            span,
        } => {
            let Some(tighter) = op.binds_tighter_than(inner_op) else {
                return Err(ParseError::new(
                    ParseErrorKind::PrecedenceNotImplemented {
                        left: op,
                        right: inner_op,
                    },
                    op_span,
                )
                .with_hint("wrap one side in parentheses"));
            };

            if tighter {
                let rotated = Expr::binary(left, op, *inner_left);
                Ok(Expr::binary(rotated, inner_op, *inner_right))
            } else {
                let right = Expr::new(
                    ExprKind::Binary {
                        left: inner_left,
                        op: inner_op,
                        right: inner_right,
                    },
                    span,
                );
                Ok(Expr::binary(left, op, right))
            }
        }
        right => Ok(Expr::binary(left, op, right)),
    }
}

/// Parse a numeric literal: an `i64` if it fits, otherwise a finite `f64`
fn number(token: &Token) -> ParseResult<Literal> {
    let text = token.lexeme.as_str();
    if !text.contains('.') {
        if let Ok(n) = text.parse::<i64>() {
            return Ok(Literal::Int(n));
        }
    }
    match text.parse::<f64>() {
        Ok(n) if n.is_finite() => Ok(Literal::Float(n)),
        _ => Err(ParseError::new(
            ParseErrorKind::InvalidNumber(text.to_string()),
            token.span,
        )),
    }
}
