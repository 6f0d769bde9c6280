//! End-to-end tests for the simplelang to Go pipeline

use simplelang_core::ast::{BinOp, ExprKind, StmtKind};
use simplelang_core::codegen::{EmitConfig, EmitErrorKind, IndentStyle};
use simplelang_core::lexer::LexError;
use simplelang_core::parser::ParseErrorKind;
use simplelang_core::{parse, transpile, transpile_with_config, Error, Stage};

fn spaces() -> EmitConfig {
    EmitConfig {
        indent: IndentStyle::Spaces(4),
        trailing_newline: true,
    }
}

/// The value expression of the only `let` in `source`
fn let_value(source: &str) -> ExprKind {
    let module = parse(source).unwrap();
    module
        .stmts
        .into_iter()
        .find_map(|stmt| match stmt.kind {
            StmtKind::ValueDecl {
                value: Some(value), ..
            } => Some(value.kind),
            _ => None,
        })
        .expect("source should contain a let with a value")
}

#[test]
fn test_full_program() {
    let source = r#"package main

import m "math"

fn abs(num float64) float64 {
    return m.Abs(num)
}

fn show(p *int) {
    print(*p)
}

let x = 5
let y: float64 = 7
y = 4.2
const prefix = "John says"
print($"{prefix}: x is {x}, y is {y}")
let squared = 10 ** 2 + 1 * 0
let label: string = if x > 3 && true { "big" } else { "small" }
let count = 3
let i = 0
loop {
    i = i + 1
    let ordinal: string = if i == 1 { "st" } else if i == 2 { "nd" } else { "th" }
    printf("%d%s\n", i, ordinal)
    if i == count {
        break
    }
}
show(&x)
print(abs(-5))
"#;

    let expected = r#"package main

import (
    m "math"
    "fmt"
    "math"
)

func abs(num float64) float64 {
    return m.Abs(num)
}

func show(p *int) {
    fmt.Println(*p)
}

func main() {
    var x = 5
    var y float64 = 7
    y = 4.2
    const prefix = "John says"
    fmt.Println(fmt.Sprintf("%v: x is %v, y is %v", prefix, x, y))
    var squared = math.Pow(10, 2) + 1 * 0
    var label string
    if x > 3 && true {
        label = "big"
    } else {
        label = "small"
    }
    var count = 3
    var i = 0
    for {
        i = i + 1
        var ordinal string
        if i == 1 {
            ordinal = "st"
        } else if i == 2 {
            ordinal = "nd"
        } else {
            ordinal = "th"
        }
        fmt.Printf("%d%s\n", i, ordinal)
        if i == count {
            break
        }
    }
    show(&x)
    fmt.Println(abs(-5))
}
"#;

    assert_eq!(transpile_with_config(source, &spaces()).unwrap(), expected);
}

#[test]
fn test_default_output_uses_tabs() {
    let out = transpile("package main\nlet x = 1\n").unwrap();
    assert_eq!(out, "package main\n\nfunc main() {\n\tvar x = 1\n}\n");
}

#[test]
fn test_multiplication_binds_tighter_than_addition() {
    let ExprKind::Binary { left, op, right } = let_value("let v = 1 + 2 * 3") else {
        panic!("expected binary expression");
    };
    assert_eq!(op, BinOp::Add);
    assert_eq!(left.to_string(), "1");
    assert!(matches!(right.kind, ExprKind::Binary { op: BinOp::Mul, .. }));
}

#[test]
fn test_equal_precedence_is_right_associative() {
    let ExprKind::Binary { left, op, right } = let_value("let v = 1 - 2 - 3") else {
        panic!("expected binary expression");
    };
    assert_eq!(op, BinOp::Sub);
    assert_eq!(left.to_string(), "1");
    assert_eq!(right.to_string(), "(2 - 3)");
}

#[test]
fn test_power_registers_math_once() {
    let out = transpile("package main\nlet a = 2 ** 10\nlet b = a ** 2 ** 3\n").unwrap();
    assert!(out.contains("var a = math.Pow(2, 10)"));
    assert!(out.contains("var b = math.Pow(a, math.Pow(2, 3))"));
    assert_eq!(out.matches("\"math\"").count(), 1);
}

#[test]
fn test_two_prints_register_fmt_once() {
    let out = transpile("package main\nprint(1)\nprint(2)\n").unwrap();
    assert_eq!(out.matches("\"fmt\"").count(), 1);
    assert!(out.contains("\tfmt.Println(1)\n\tfmt.Println(2)\n"));
}

#[test]
fn test_block_value_is_assigned_not_left_bare() {
    let out = transpile("package main\nlet x = { 1 + 1 }\n").unwrap();
    assert!(out.contains("\tvar x\n\t{\n\t\tx = 1 + 1\n\t}\n"));
    assert!(!out.contains("\t\t1 + 1\n"));
}

#[test]
fn test_declaration_without_type_or_initializer_fails() {
    let err = transpile("package main\nlet x\n").unwrap_err();
    let Error::Parse(err) = err else {
        panic!("expected a parse error, got {err:?}");
    };
    assert_eq!(
        err.kind,
        ParseErrorKind::MissingTypeOrInitializer("x".to_string())
    );
}

#[test]
fn test_octal_literal_fails() {
    let err = transpile("package main\nlet x = 007\n").unwrap_err();
    assert_eq!(err.stage(), Stage::Lex);
    let Error::Lex(err) = err else {
        panic!("expected a lex error");
    };
    assert_eq!(err.error, LexError::OctalLiteral("007".to_string()));
    assert_eq!(err.span.start_loc.row, 1);
    assert_eq!(err.span.start_loc.column, 8);
}

#[test]
fn test_unmatched_parenthesis_fails() {
    let err = transpile("package main\nlet x = (1 + 2\n").unwrap_err();
    assert_eq!(err.stage(), Stage::Parse);
    assert_eq!(err.hint(), Some("unmatched '('"));
}

#[test]
fn test_unranked_operators_fail() {
    let err = transpile("package main\nlet ok = a == b + c\n").unwrap_err();
    let Error::Parse(err) = err else {
        panic!("expected a parse error");
    };
    assert!(matches!(
        err.kind,
        ParseErrorKind::PrecedenceNotImplemented { .. }
    ));
}

#[test]
fn test_import_alias_conflict_fails() {
    let err = transpile("package main\nimport r \"math/rand\"\nimport r \"crypto/rand\"\n")
        .unwrap_err();
    let Error::Emit(err) = err else {
        panic!("expected an emit error");
    };
    assert!(matches!(
        err.kind,
        EmitErrorKind::ImportAliasConflict { .. }
    ));
}

#[test]
fn test_if_value_requires_else() {
    let err = transpile("package main\nlet x: int = if c { 1 }\n").unwrap_err();
    let Error::Emit(err) = err else {
        panic!("expected an emit error");
    };
    assert_eq!(err.kind, EmitErrorKind::MissingElse("x".to_string()));

    // Without a value to produce, a lone `if` is an ordinary statement
    let out = transpile("package main\nif c {\n    print(1)\n}\n").unwrap();
    assert!(out.contains("\tif c {\n\t\tfmt.Println(1)\n\t}\n"));
}

#[test]
fn test_missing_package_fails() {
    let err = transpile("print(1)\n").unwrap_err();
    assert_eq!(err.stage(), Stage::Emit);
    assert!(err.to_string().contains("package name has not been supplied"));
}

#[test]
fn test_first_error_wins() {
    // Both a parse error and a missing package; parsing fails first
    let err = transpile("let x\n").unwrap_err();
    assert_eq!(err.stage(), Stage::Parse);
}

#[test]
fn test_parsing_is_deterministic() {
    let source = "package main\nfn f(a int) int {\n    return a * 2\n}\nlet v = if f(1) > 1 { 1 } else { 2 }\n";
    assert_eq!(parse(source).unwrap(), parse(source).unwrap());
    assert_eq!(transpile(source).unwrap(), transpile(source).unwrap());
}

#[test]
fn test_grouped_imports_come_first() {
    let out = transpile("package main\nprint(1)\nimport (\n    \"os\"\n    s \"strings\"\n)\n").unwrap();
    assert!(out.starts_with("package main\n\nimport (\n\t\"os\"\n\ts \"strings\"\n\t\"fmt\"\n)\n"));
}

#[test]
fn test_carriage_returns_are_ignored() {
    let out = transpile("package main\r\nprint(1)\r\n").unwrap();
    assert!(out.contains("\tfmt.Println(1)\n"));
}
