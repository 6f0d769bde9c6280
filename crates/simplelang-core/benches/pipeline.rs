//! Benchmark suite for the simplelang pipeline
//!
//! Measures each stage on generated programs of increasing size:
//! - tokenize: source text to tokens
//! - parse: tokens to AST
//! - transpile: source text to Go

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use simplelang_core::{transpile, Lexer, Parser};

/// Generate a program with the given number of function/loop sections
fn generate_program(sections: usize) -> String {
    let mut source = String::from("package main\n\nimport m \"math\"\n\n");

    for i in 0..sections {
        source.push_str(&format!(
            "fn scale{i}(x float64) float64 {{\n    return m.Abs(x) * {i} + 1\n}}\n\n"
        ));
    }

    for i in 0..sections {
        source.push_str(&format!(
            "let v{i} = {i} ** 2 + 3 * {i}\n\
             let label{i}: string = if v{i} > 10 && true {{ \"big\" }} else {{ \"small\" }}\n\
             let n{i} = 0\n\
             loop {{\n    n{i} = n{i} + 1\n    if n{i} == 3 {{\n        break\n    }}\n}}\n\
             print($\"{{label{i}}} after {{n{i}}} rounds\")\n"
        ));
    }

    source
}

/// Benchmark tokenization
fn bench_tokenize(c: &mut Criterion) {
    let mut group = c.benchmark_group("tokenize");

    for size in [10, 100, 1_000].iter() {
        let source = generate_program(*size);

        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &source, |b, source| {
            b.iter(|| black_box(Lexer::tokenize(source).unwrap()));
        });
    }

    group.finish();
}

/// Benchmark parsing of an already tokenized program
fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    for size in [10, 100, 1_000].iter() {
        let tokens = Lexer::tokenize(&generate_program(*size)).unwrap();

        group.throughput(Throughput::Elements(tokens.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &tokens, |b, tokens| {
            b.iter(|| black_box(Parser::build(tokens.clone()).unwrap()));
        });
    }

    group.finish();
}

/// Benchmark the whole pipeline
fn bench_transpile(c: &mut Criterion) {
    let mut group = c.benchmark_group("transpile");

    for size in [10, 100, 1_000].iter() {
        let source = generate_program(*size);

        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &source, |b, source| {
            b.iter(|| black_box(transpile(source).unwrap()));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_tokenize, bench_parse, bench_transpile);
criterion_main!(benches);
