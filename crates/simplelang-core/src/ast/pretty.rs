//! Pretty printing for AST nodes
//!
//! Implements Display trait for AST nodes to produce simplelang-like output.
//! Binary expressions are always parenthesized so the tree shape is visible.

use std::fmt::{self, Display, Formatter};

use super::{
    BinOp, Block, DeclKind, ElseBranch, Expr, ExprKind, Function, Ident, IfExpr, ImportSpec,
    InterpolatedString, Literal, Module, Param, Stmt, StmtKind, TypeName, UnaryOp,
};

// ============================================================================
// Helpers
// ============================================================================

fn write_comma_separated<T: Display>(f: &mut Formatter<'_>, items: &[T]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

/// Write `item` one level deeper, one line at a time
fn write_indented<T: Display>(f: &mut Formatter<'_>, item: &T) -> fmt::Result {
    for line in item.to_string().lines() {
        writeln!(f, "    {line}")?;
    }
    Ok(())
}

fn write_body(f: &mut Formatter<'_>, stmts: &[Stmt]) -> fmt::Result {
    if stmts.is_empty() {
        return write!(f, "{{ }}");
    }
    writeln!(f, "{{")?;
    for stmt in stmts {
        write_indented(f, stmt)?;
    }
    write!(f, "}}")
}

// ============================================================================
// Basic types
// ============================================================================

impl Display for Ident {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl Display for TypeName {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl Display for BinOp {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Display for UnaryOp {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Display for DeclKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Display for Literal {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Int(n) => write!(f, "{n}"),
            Literal::Float(n) => write!(f, "{n:?}"),
            Literal::String(s) => write!(f, "\"{s}\""),
            Literal::Interpolated(interp) => write!(f, "{interp}"),
        }
    }
}

impl Display for InterpolatedString {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "$\"")?;
        for (i, part) in self.parts.iter().enumerate() {
            write!(f, "{part}")?;
            if let Some(expr) = self.exprs.get(i) {
                write!(f, "{{{expr}}}")?;
            }
        }
        write!(f, "\"")
    }
}

// ============================================================================
// Expressions
// ============================================================================

impl Display for Expr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)
    }
}

impl Display for ExprKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ExprKind::Literal(lit) => write!(f, "{lit}"),
            ExprKind::Ident(name) => write!(f, "{name}"),
            ExprKind::Unary { op, operand } => write!(f, "{op}{operand}"),
            ExprKind::Binary { left, op, right } => write!(f, "({left} {op} {right})"),
            ExprKind::Paren(inner) => write!(f, "({inner})"),
            ExprKind::Call { callee, args } => {
                write!(f, "{callee}(")?;
                write_comma_separated(f, args)?;
                write!(f, ")")
            }
            ExprKind::Block(block) => write!(f, "{block}"),
            ExprKind::If(if_expr) => write!(f, "{if_expr}"),
        }
    }
}

impl Display for IfExpr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "if {} {}", self.cond, self.then_branch)?;
        if let Some(else_) = &self.else_branch {
            write!(f, " else {else_}")?;
        }
        Ok(())
    }
}

impl Display for ElseBranch {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ElseBranch::Block(block) => write!(f, "{block}"),
            ElseBranch::ElseIf(expr) => write!(f, "{expr}"),
        }
    }
}

// ============================================================================
// Statements
// ============================================================================

impl Display for Stmt {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)
    }
}

impl Display for StmtKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            StmtKind::Package(name) => write!(f, "package {name}"),
            StmtKind::Import(specs) => match specs.as_slice() {
                [single] => write!(f, "import {single}"),
                _ => {
                    writeln!(f, "import (")?;
                    for spec in specs {
                        write_indented(f, spec)?;
                    }
                    write!(f, ")")
                }
            },
            StmtKind::ValueDecl {
                kind,
                name,
                ty,
                value,
            } => {
                write!(f, "{kind} {name}")?;
                if let Some(ty) = ty {
                    write!(f, ": {ty}")?;
                }
                if let Some(value) = value {
                    write!(f, " = {value}")?;
                }
                Ok(())
            }
            StmtKind::Function(func) => write!(f, "{func}"),
            StmtKind::Assign { target, value } => write!(f, "{target} = {value}"),
            StmtKind::Return(expr) => {
                write!(f, "return")?;
                if let Some(expr) = expr {
                    write!(f, " {expr}")?;
                }
                Ok(())
            }
            StmtKind::Loop(body) => {
                write!(f, "loop ")?;
                write_body(f, body)
            }
            StmtKind::Break => write!(f, "break"),
            StmtKind::Expr(expr) => write!(f, "{expr}"),
        }
    }
}

impl Display for ImportSpec {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if let Some(alias) = &self.alias {
            write!(f, "{alias} ")?;
        }
        write!(f, "\"{}\"", self.path)
    }
}

impl Display for Block {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.stmts.is_empty() && self.expr.is_none() {
            return write!(f, "{{ }}");
        }

        writeln!(f, "{{")?;
        for stmt in &self.stmts {
            write_indented(f, stmt)?;
        }
        if let Some(expr) = &self.expr {
            write_indented(f, expr)?;
        }
        write!(f, "}}")
    }
}

// ============================================================================
// Items
// ============================================================================

impl Display for Param {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.ty)
    }
}

impl Display for Function {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "fn {}(", self.name)?;
        write_comma_separated(f, &self.params)?;
        write!(f, ")")?;
        for ret in &self.return_types {
            write!(f, " {ret}")?;
        }
        write!(f, " ")?;
        write_body(f, &self.body)
    }
}

impl Display for Module {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (i, stmt) in self.stmts.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{stmt}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Span;

    fn dummy_span() -> Span {
        Span::dummy()
    }

    fn int(n: i64) -> Expr {
        Expr::literal(Literal::Int(n), dummy_span())
    }

    #[test]
    fn display_literals() {
        assert_eq!(format!("{}", Literal::Int(42)), "42");
        assert_eq!(format!("{}", Literal::Float(3.14)), "3.14");
        assert_eq!(format!("{}", Literal::Float(1.0)), "1.0");
        assert_eq!(format!("{}", Literal::String("hello".into())), "\"hello\"");
    }

    #[test]
    fn display_interpolated_string() {
        let interp = InterpolatedString {
            raw: "hi {name}!".into(),
            parts: vec!["hi ".into(), "!".into()],
            exprs: vec![Expr::ident("name", dummy_span())],
        };
        assert_eq!(format!("{}", Literal::Interpolated(interp)), "$\"hi {name}!\"");
    }

    #[test]
    fn display_binary_is_parenthesized() {
        let expr = Expr::binary(int(1), BinOp::Add, Expr::binary(int(2), BinOp::Mul, int(3)));
        assert_eq!(format!("{expr}"), "(1 + (2 * 3))");
    }

    #[test]
    fn display_unary_and_call() {
        let neg = Expr::new(
            ExprKind::Unary {
                op: UnaryOp::Neg,
                operand: Box::new(int(5)),
            },
            dummy_span(),
        );
        let call = Expr::new(
            ExprKind::Call {
                callee: Ident::new("fmt.Println", dummy_span()),
                args: vec![neg, int(2)],
            },
            dummy_span(),
        );
        assert_eq!(format!("{call}"), "fmt.Println(-5, 2)");
    }

    #[test]
    fn display_nested_blocks_are_indented() {
        let inner = Block::new(vec![], Some(int(1)), dummy_span());
        let outer = Block::new(
            vec![Stmt::new(StmtKind::Break, dummy_span())],
            Some(Expr::new(ExprKind::Block(inner), dummy_span())),
            dummy_span(),
        );
        assert_eq!(format!("{outer}"), "{\n    break\n    {\n        1\n    }\n}");
    }

    #[test]
    fn display_declarations() {
        let decl = StmtKind::ValueDecl {
            kind: DeclKind::Let,
            name: Ident::new("x", dummy_span()),
            ty: Some(TypeName::new("int", dummy_span())),
            value: Some(int(3)),
        };
        assert_eq!(format!("{decl}"), "let x: int = 3");

        let ret = StmtKind::Return(None);
        assert_eq!(format!("{ret}"), "return");
    }

    #[test]
    fn display_function() {
        let func = Function {
            name: Ident::new("inc", dummy_span()),
            params: vec![Param {
                name: Ident::new("p", dummy_span()),
                ty: TypeName::new("*int", dummy_span()),
            }],
            return_types: vec![TypeName::new("int", dummy_span())],
            body: vec![Stmt::new(StmtKind::Return(Some(int(1))), dummy_span())],
            span: dummy_span(),
        };
        assert_eq!(format!("{func}"), "fn inc(p *int) int {\n    return 1\n}");
    }

    #[test]
    fn display_grouped_import() {
        let import = StmtKind::Import(vec![
            ImportSpec {
                alias: None,
                path: "fmt".into(),
                span: dummy_span(),
            },
            ImportSpec {
                alias: Some(Ident::new("m", dummy_span())),
                path: "math".into(),
                span: dummy_span(),
            },
        ]);
        assert_eq!(format!("{import}"), "import (\n    \"fmt\"\n    m \"math\"\n)");
    }
}
