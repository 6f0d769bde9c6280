//! Go code generator for simplelang
//!
//! The generator walks a parsed [`Module`] once and writes Go source text.
//! Go has no block-valued or if-valued expressions, so a `let`/`const` or an
//! assignment whose value is a block or `if` is lowered into statements: the
//! name being assigned is pushed as the *assignment target*, and the tail
//! expression of every block and branch reached from there is written as
//! `target = tail`.
//!
//! Built-in calls pull in Go imports as they are emitted: `print` and
//! `printf` use `fmt`, `**` uses `math.Pow` and interpolated strings use
//! `fmt.Sprintf`.

mod config;
mod error;
mod imports;

pub use config::{EmitConfig, IndentStyle};
pub use error::{EmitError, EmitErrorKind};
pub use imports::{Import, ImportTable};

use crate::ast::{
    BinOp, Block, DeclKind, ElseBranch, Expr, ExprKind, Function, Ident, IfExpr, ImportSpec,
    InterpolatedString, Literal, Module, Stmt, StmtKind,
};
use crate::lexer::Span;

/// Result type for code generation
pub type EmitResult<T> = Result<T, EmitError>;

/// Stack of assignment targets for block and if lowering
///
/// `None` entries mark statement-position blocks, whose tails are written
/// without a target even when an outer declaration is being lowered.
#[derive(Debug, Default)]
struct AssignTargets {
    stack: Vec<Option<String>>,
}

impl AssignTargets {
    fn push(&mut self, target: Option<String>) {
        self.stack.push(target);
    }

    fn pop(&mut self) {
        self.stack.pop();
    }

    fn current(&self) -> Option<&str> {
        self.stack.last().and_then(|t| t.as_deref())
    }
}

/// The Go code generator
///
/// A generator is consumed by [`Generator::emit`]; its import table and
/// target stack live for exactly one pass.
pub struct Generator {
    /// Output buffer for the body (functions)
    output: String,
    /// Current indentation level
    indent_level: usize,
    /// Indentation text for one level
    indent_unit: String,
    /// Configuration
    config: EmitConfig,
    /// Whether we're at the start of a line
    at_line_start: bool,
    /// Imports required so far
    imports: ImportTable,
    /// Enclosing assignment targets
    targets: AssignTargets,
}

impl Default for Generator {
    fn default() -> Self {
        Self::new()
    }
}

impl Generator {
    /// Create a new generator with default config
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(EmitConfig::default())
    }

    /// Create a new generator with custom config
    #[must_use]
    pub fn with_config(config: EmitConfig) -> Self {
        Self {
            output: String::new(),
            indent_level: 0,
            indent_unit: config.indent.unit(),
            config,
            at_line_start: true,
            imports: ImportTable::new(),
            targets: AssignTargets::default(),
        }
    }

    /// Generate Go source for a module
    ///
    /// Functions are written in source order, followed by a `func main()`
    /// holding every other top-level statement. Explicit imports are
    /// registered before any import the generated code needs.
    pub fn emit(mut self, module: &Module) -> EmitResult<String> {
        let mut package: Option<&Ident> = None;
        let mut functions = Vec::new();
        let mut loose = Vec::new();

        for stmt in &module.stmts {
            match &stmt.kind {
                StmtKind::Package(name) => {
                    if let Some(previous) = package {
                        tracing::warn!(
                            previous = %previous.name,
                            name = %name.name,
                            "package redeclared; the last declaration wins"
                        );
                    }
                    package = Some(name);
                }
                StmtKind::Import(specs) => self.register_imports(specs)?,
                StmtKind::Function(func) => functions.push(func),
                _ => loose.push(stmt),
            }
        }

        if !loose.is_empty() {
            if let Some(main) = functions.iter().find(|f| f.name.name == "main") {
                return Err(
                    EmitError::new(EmitErrorKind::EntryPointConflict, main.name.span).with_hint(
                        "move the top-level statements into 'main' or rename the function",
                    ),
                );
            }
        }

        for (i, func) in functions.iter().enumerate() {
            if i > 0 {
                self.writeln();
            }
            self.emit_function(func)?;
        }

        if !loose.is_empty() {
            if !functions.is_empty() {
                self.writeln();
            }
            self.write("func main() {");
            self.writeln();
            self.indent();
            for stmt in &loose {
                self.emit_stmt(stmt)?;
            }
            self.dedent();
            self.write("}");
            self.writeln();
        }

        let Some(package) = package else {
            return Err(EmitError::new(EmitErrorKind::MissingPackage, module.span)
                .with_hint("start the file with `package main`"));
        };

        tracing::debug!(
            functions = functions.len(),
            entry_statements = loose.len(),
            imports = self.imports.len(),
            "generated Go body"
        );

        Ok(self.assemble(&package.name))
    }

    /// Join the package clause, import block and body
    fn assemble(self, package: &str) -> String {
        let mut out = format!("package {package}\n");
        if !self.imports.is_empty() {
            out.push('\n');
            out.push_str(&self.imports.render(&self.indent_unit));
        }
        if !self.output.is_empty() {
            out.push('\n');
            out.push_str(&self.output);
        }
        if !self.config.trailing_newline {
            let trimmed = out.trim_end_matches('\n').len();
            out.truncate(trimmed);
        }
        out
    }

    // ==================== Output Helpers ====================

    fn write(&mut self, s: &str) {
        if self.at_line_start && !s.is_empty() {
            for _ in 0..self.indent_level {
                self.output.push_str(&self.indent_unit);
            }
            self.at_line_start = false;
        }
        self.output.push_str(s);
    }

    fn writeln(&mut self) {
        self.output.push('\n');
        self.at_line_start = true;
    }

    fn indent(&mut self) {
        self.indent_level += 1;
    }

    fn dedent(&mut self) {
        self.indent_level = self.indent_level.saturating_sub(1);
    }

    /// Run `f` with `target` as the innermost assignment target
    fn with_target<T>(
        &mut self,
        target: Option<String>,
        f: impl FnOnce(&mut Self) -> EmitResult<T>,
    ) -> EmitResult<T> {
        self.targets.push(target);
        let result = f(self);
        self.targets.pop();
        result
    }

    fn require_import(&mut self, path: &str, span: Span) -> EmitResult<()> {
        self.imports
            .register(None, path)
            .map(|_| ())
            .map_err(|kind| EmitError::new(kind, span))
    }

    fn register_imports(&mut self, specs: &[ImportSpec]) -> EmitResult<()> {
        for spec in specs {
            let alias = spec.alias.as_ref().map(|a| a.name.as_str());
            self.imports
                .register(alias, &spec.path)
                .map_err(|kind| EmitError::new(kind, spec.span))?;
        }
        Ok(())
    }

    // ==================== Declarations ====================

    fn emit_function(&mut self, func: &Function) -> EmitResult<()> {
        let params: Vec<String> = func
            .params
            .iter()
            .map(|p| format!("{} {}", p.name.name, p.ty.name))
            .collect();

        self.write("func ");
        self.write(&func.name.name);
        self.write("(");
        self.write(&params.join(", "));
        self.write(")");
        if let Some(ret) = func.return_types.first() {
            self.write(" ");
            self.write(&ret.name);
        }
        self.write(" {");
        self.writeln();

        self.indent();
        for stmt in &func.body {
            self.emit_stmt(stmt)?;
        }
        self.dedent();

        self.write("}");
        self.writeln();
        Ok(())
    }

    // ==================== Statements ====================

    fn emit_stmt(&mut self, stmt: &Stmt) -> EmitResult<()> {
        match &stmt.kind {
            StmtKind::ValueDecl {
                kind,
                name,
                ty,
                value,
            } => {
                self.write(match kind {
                    DeclKind::Const => "const ",
                    DeclKind::Let => "var ",
                });
                self.write(&name.name);
                if let Some(ty) = ty {
                    self.write(" ");
                    self.write(&ty.name);
                }
                match value {
                    Some(value) if value.is_block_like() => {
                        self.writeln();
                        self.with_target(Some(name.name.clone()), |g| g.emit_lowered(value))
                    }
                    Some(value) => {
                        let value = self.expr(value)?;
                        self.write(" = ");
                        self.write(&value);
                        self.writeln();
                        Ok(())
                    }
                    None => {
                        self.writeln();
                        Ok(())
                    }
                }
            }
            StmtKind::Assign { target, value } => {
                if value.is_block_like() {
                    return self.with_target(Some(target.name.clone()), |g| g.emit_lowered(value));
                }
                let value = self.expr(value)?;
                self.write(&target.name);
                self.write(" = ");
                self.write(&value);
                self.writeln();
                Ok(())
            }
            StmtKind::Return(value) => {
                let value = value.as_ref().map(|v| self.expr(v)).transpose()?;
                self.write("return");
                if let Some(value) = value {
                    self.write(" ");
                    self.write(&value);
                }
                self.writeln();
                Ok(())
            }
            StmtKind::Loop(body) => {
                self.write("for {");
                self.writeln();
                self.indent();
                for stmt in body {
                    self.emit_stmt(stmt)?;
                }
                self.dedent();
                self.write("}");
                self.writeln();
                Ok(())
            }
            StmtKind::Break => {
                self.write("break");
                self.writeln();
                Ok(())
            }
            StmtKind::Expr(expr) => self.emit_expr_stmt(expr),
            StmtKind::Import(specs) => self.register_imports(specs),
            StmtKind::Function(func) => Err(EmitError::new(
                EmitErrorKind::NestedFunction(func.name.name.clone()),
                func.name.span,
            )),
            StmtKind::Package(_) => {
                Err(EmitError::new(EmitErrorKind::MisplacedPackage, stmt.span))
            }
        }
    }

    /// Write an expression in statement position
    ///
    /// Blocks and ifs here do not inherit an enclosing assignment target.
    fn emit_expr_stmt(&mut self, expr: &Expr) -> EmitResult<()> {
        match &expr.kind {
            ExprKind::Block(_) | ExprKind::If(_) => {
                self.with_target(None, |g| g.emit_lowered(expr))
            }
            ExprKind::Ident(_) => Err(EmitError::new(
                EmitErrorKind::UnsupportedExpression("bare identifier statement"),
                expr.span,
            )
            .with_hint("assign the value or pass it to a call")),
            _ => {
                let text = self.expr(expr)?;
                self.write(&text);
                self.writeln();
                Ok(())
            }
        }
    }

    // ==================== Lowering ====================

    /// Write a block or if expression as Go statements
    fn emit_lowered(&mut self, expr: &Expr) -> EmitResult<()> {
        match &expr.kind {
            ExprKind::Block(block) => {
                self.write("{");
                self.writeln();
                self.emit_block_contents(block)?;
                self.write("}");
                self.writeln();
                Ok(())
            }
            ExprKind::If(if_expr) => {
                self.emit_if(if_expr, expr.span)?;
                self.writeln();
                Ok(())
            }
            _ => self.emit_tail(expr),
        }
    }

    /// Write a block's statements and tail one level deeper
    fn emit_block_contents(&mut self, block: &Block) -> EmitResult<()> {
        self.indent();
        for stmt in &block.stmts {
            self.emit_stmt(stmt)?;
        }
        if let Some(tail) = &block.expr {
            self.emit_tail(tail)?;
        }
        self.dedent();
        Ok(())
    }

    /// Write `if cond { ... } else ...` without the final newline
    ///
    /// An `if` lowered into an assignment target must end in `else`.
    fn emit_if(&mut self, if_expr: &IfExpr, span: Span) -> EmitResult<()> {
        if if_expr.else_branch.is_none() {
            if let Some(target) = self.targets.current() {
                return Err(EmitError::new(EmitErrorKind::MissingElse(target.to_string()), span)
                    .with_hint("add an 'else' branch so every path assigns a value"));
            }
        }

        let cond = self.expr(&if_expr.cond)?;
        self.write("if ");
        self.write(&cond);
        self.write(" {");
        self.writeln();
        self.emit_block_contents(&if_expr.then_branch)?;
        self.write("}");

        match &if_expr.else_branch {
            None => Ok(()),
            Some(ElseBranch::Block(block)) => {
                self.write(" else {");
                self.writeln();
                self.emit_block_contents(block)?;
                self.write("}");
                Ok(())
            }
            Some(ElseBranch::ElseIf(expr)) => {
                self.write(" else ");
                match &expr.kind {
                    ExprKind::If(nested) => self.emit_if(nested, expr.span),
                    _ => Err(EmitError::new(
                        EmitErrorKind::UnsupportedExpression("else branch that is not an if"),
                        expr.span,
                    )),
                }
            }
        }
    }

    /// Write the value-producing tail of a block or branch
    fn emit_tail(&mut self, expr: &Expr) -> EmitResult<()> {
        if expr.is_block_like() {
            return self.emit_lowered(expr);
        }
        match self.targets.current().map(str::to_string) {
            Some(target) => {
                let value = self.expr(expr)?;
                self.write(&target);
                self.write(" = ");
                self.write(&value);
                self.writeln();
                Ok(())
            }
            None => self.emit_expr_stmt(expr),
        }
    }

    // ==================== Expressions ====================

    /// Render an expression in operand position
    fn expr(&mut self, expr: &Expr) -> EmitResult<String> {
        match &expr.kind {
            ExprKind::Ident(ident) => Ok(ident.name.clone()),
            ExprKind::Literal(lit) => self.literal(lit, expr.span),
            ExprKind::Unary { op, operand } => {
                let operand = self.expr(operand)?;
                Ok(format!("{}{operand}", op.as_str()))
            }
            ExprKind::Binary {
                left,
                op: BinOp::Pow,
                right,
            } => {
                self.require_import("math", expr.span)?;
                let left = self.expr(left)?;
                let right = self.expr(right)?;
                Ok(format!("math.Pow({left}, {right})"))
            }
            ExprKind::Binary { left, op, right } => {
                let left = self.expr(left)?;
                let right = self.expr(right)?;
                Ok(format!("{left} {} {right}", op.as_str()))
            }
            ExprKind::Paren(inner) => Ok(format!("({})", self.expr(inner)?)),
            ExprKind::Call { callee, args } => self.call(callee, args, expr.span),
            ExprKind::Block(_) => Err(EmitError::new(
                EmitErrorKind::UnsupportedExpression("block expression in operand position"),
                expr.span,
            )
            .with_hint("bind the block to a variable with `let` first")),
            ExprKind::If(_) => Err(EmitError::new(
                EmitErrorKind::UnsupportedExpression("if expression in operand position"),
                expr.span,
            )
            .with_hint("bind the if expression to a variable with `let` first")),
        }
    }

    fn literal(&mut self, lit: &Literal, span: Span) -> EmitResult<String> {
        match lit {
            Literal::Int(n) => Ok(n.to_string()),
            Literal::Float(n) => Ok(float_literal(*n)),
            Literal::String(s) => Ok(format!("\"{s}\"")),
            Literal::Interpolated(interp) => self.interpolated(interp, span),
        }
    }

    /// `fmt.Sprintf` with one `%v` per hole
    fn interpolated(&mut self, interp: &InterpolatedString, span: Span) -> EmitResult<String> {
        self.require_import("fmt", span)?;
        let parts: Vec<String> = interp.parts.iter().map(|p| p.replace('%', "%%")).collect();
        let mut out = format!("fmt.Sprintf(\"{}\"", parts.join("%v"));
        for expr in &interp.exprs {
            out.push_str(", ");
            out.push_str(&self.expr(expr)?);
        }
        out.push(')');
        Ok(out)
    }

    fn call(&mut self, callee: &Ident, args: &[Expr], span: Span) -> EmitResult<String> {
        let name = match callee.name.as_str() {
            "print" => {
                self.require_import("fmt", span)?;
                "fmt.Println"
            }
            "printf" => {
                self.require_import("fmt", span)?;
                "fmt.Printf"
            }
            "add" => {
                let [left, right] = args else {
                    return Err(EmitError::new(
                        EmitErrorKind::ArityMismatch {
                            name: callee.name.clone(),
                            expected: 2,
                            found: args.len(),
                        },
                        span,
                    ));
                };
                let left = self.expr(left)?;
                let right = self.expr(right)?;
                return Ok(format!("{left} + {right}"));
            }
            other => other,
        };

        let args = args
            .iter()
            .map(|arg| self.expr(arg))
            .collect::<EmitResult<Vec<_>>>()?;
        Ok(format!("{name}({})", args.join(", ")))
    }
}

// ==================== Helper Functions ====================

/// Plain decimal text for a float, never in exponent form
///
/// Whole values keep a `.0` so Go still types them as floats.
fn float_literal(n: f64) -> String {
    let text = n.to_string();
    if text.contains('.') {
        text
    } else {
        format!("{text}.0")
    }
}
