use proptest::prelude::*;
use simplelang_core::lexer::{Lexer, TokenKind};
use simplelang_core::{parse, transpile};

const KEYWORDS: &[&str] = &[
    "package", "import", "fn", "const", "let", "return", "if", "else", "loop", "break",
];

fn identifier() -> impl Strategy<Value = String> {
    "[a-z_][a-z0-9_]{0,6}".prop_filter("keywords are not identifiers", |s| {
        !KEYWORDS.contains(&s.as_str())
    })
}

/// Arithmetic over operators that all have a precedence rank
fn arithmetic() -> impl Strategy<Value = String> {
    let leaf = prop_oneof![(0u32..1000).prop_map(|n| n.to_string()), identifier()];
    leaf.prop_recursive(4, 32, 2, |inner| {
        prop_oneof![
            (
                inner.clone(),
                prop::sample::select(vec!["+", "-", "*", "/", "%", "**"]),
                inner.clone()
            )
                .prop_map(|(l, op, r)| format!("{l} {op} {r}")),
            inner.prop_map(|e| format!("({e})")),
        ]
    })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    #[test]
    fn tokens_cover_the_input(s in ".*") {
        // Octal literals are the only lexical error
        let Ok(tokens) = Lexer::tokenize(&s) else {
            return Ok(());
        };

        let mut prev_end = 0usize;
        let mut prev_loc = None;
        for token in &tokens {
            let range = token.span.as_range();
            prop_assert!(range.start >= prev_end, "overlapping token {token:?} in {s:?}");
            prop_assert!(range.end <= s.len(), "token out of bounds {token:?} in {s:?}");
            prop_assert_eq!(&s[range.clone()], token.lexeme.as_str());

            let gap = &s[prev_end..range.start];
            prop_assert!(
                gap.chars().all(|c| c.is_whitespace() && c != '\n'),
                "skipped non-whitespace {gap:?} in {s:?}"
            );

            if let Some(prev) = prev_loc {
                prop_assert!(token.span.start_loc >= prev, "location moved backwards in {s:?}");
            }
            prop_assert!(token.span.end_loc >= token.span.start_loc);

            prev_loc = Some(token.span.end_loc);
            prev_end = range.end;
        }

        let tail = &s[prev_end..];
        prop_assert!(tail.chars().all(|c| c.is_whitespace() && c != '\n'));
    }

    #[test]
    fn newline_tokens_match_line_feeds(s in "[a-z0-9 \n+*(){}\"]{0,64}") {
        if let Ok(tokens) = Lexer::tokenize(&s) {
            let in_strings: usize = tokens
                .iter()
                .filter(|t| t.kind == TokenKind::Str)
                .map(|t| t.lexeme.matches('\n').count())
                .sum();
            let newlines = tokens.iter().filter(|t| t.kind == TokenKind::Newline).count();
            prop_assert_eq!(newlines + in_strings, s.matches('\n').count());
        }
    }

    #[test]
    fn ranked_arithmetic_always_transpiles(expr in arithmetic()) {
        let source = format!("package main\nlet v = {expr}\n");
        let out = transpile(&source);
        prop_assert!(out.is_ok(), "{source:?} failed: {out:?}");
        prop_assert!(out.unwrap_or_default().contains("var v = "));
    }

    #[test]
    fn parsing_is_deterministic(expr in arithmetic(), name in identifier()) {
        let source = format!("package main\nlet {name} = {{ {expr} }}\nprint({name})\n");
        prop_assert_eq!(parse(&source), parse(&source));
    }
}
