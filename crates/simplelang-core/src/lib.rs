//! simplelang Core - a simplelang to Go transpiler
//!
//! This crate provides the three pipeline stages:
//! - Lexer: Tokenization of source code
//! - Parser: AST construction from the token stream
//! - Codegen: Lowering the AST to Go source text
//!
//! Each stage runs to completion before the next starts and the first error
//! aborts the run.
//!
//! ```
//! let go = simplelang_core::transpile("package main\nprint(1 + 2)\n").unwrap();
//! assert!(go.contains("fmt.Println(1 + 2)"));
//! ```

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Lexer module - tokenization of simplelang source code
pub mod lexer;

/// Abstract Syntax Tree - parsed representation of simplelang source code
pub mod ast;

/// Parser module - converts tokens into AST
pub mod parser;

/// Code generation - converts AST into Go source
pub mod codegen;

/// Pipeline-wide error type
pub mod error;

/// Convenience re-export of lexer
pub use lexer::Lexer;

/// Convenience re-export of parser
pub use parser::Parser;

/// Convenience re-export of generator
pub use codegen::{EmitConfig, Generator};

pub use error::{Error, Result, Stage};

use lexer::{SpannedError, Token};

/// Tokenize source text
pub fn tokenize(source: &str) -> std::result::Result<Vec<Token>, SpannedError> {
    Lexer::tokenize(source)
}

/// Tokenize and parse source text into a module
pub fn parse(source: &str) -> Result<ast::Module> {
    let tokens = Lexer::tokenize(source)?;
    Ok(Parser::build(tokens)?)
}

/// Transpile simplelang source to Go with the default output settings
pub fn transpile(source: &str) -> Result<String> {
    transpile_with_config(source, &EmitConfig::default())
}

/// Transpile simplelang source to Go
pub fn transpile_with_config(source: &str, config: &EmitConfig) -> Result<String> {
    let module = parse(source)?;
    let output = Generator::with_config(config.clone()).emit(&module)?;
    tracing::debug!(
        input_bytes = source.len(),
        output_bytes = output.len(),
        "transpiled module"
    );
    Ok(output)
}
