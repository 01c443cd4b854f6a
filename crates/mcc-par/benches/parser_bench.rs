//! Parser benchmarks.
//!
//! Run with: `cargo bench --package mcc-par`

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use mcc_lex::Lexer;
use mcc_par::Parser;
use mcc_util::Handler;

fn parse_source(source: &str) -> usize {
    let handler = Handler::new();
    let tokens = Lexer::tokenize(source, &handler);
    Parser::parse(tokens, &handler).len()
}

fn bench_parser_declarations(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser");

    let source = "int x; int main() { int y = x + 1; return y; }";
    group.throughput(Throughput::Bytes(source.len() as u64));

    group.bench_function("simple_decl", |b| b.iter(|| parse_source(black_box("int x = 42;"))));
    group.bench_function("function_with_body", |b| b.iter(|| parse_source(black_box(source))));

    group.finish();
}

fn bench_parser_expressions(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser_expressions");

    let source = "int main() { return 1 + 2 * 3 - 4 / 2 + (5 - 6) * 7; }";
    group.throughput(Throughput::Bytes(source.len() as u64));

    group.bench_function("arithmetic_chain", |b| b.iter(|| parse_source(black_box(source))));
    group.bench_function("logical_chain", |b| {
        b.iter(|| parse_source(black_box("int main() { return a && b || c && !d; }")))
    });

    group.finish();
}

fn bench_parser_control_flow(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser_control_flow");

    let source = r#"
        int fibonacci(int n) {
            if (n <= 1) {
                return n;
            }
            return fibonacci(n - 1) + fibonacci(n - 2);
        }

        int main() {
            int i;
            for (i = 0; i < 10; i = i + 1) {
                print(fibonacci(i));
            }
            return 0;
        }
    "#;

    group.throughput(Throughput::Bytes(source.len() as u64));
    group.bench_function("fibonacci_program", |b| b.iter(|| parse_source(black_box(source))));

    group.finish();
}

fn bench_parser_recovery(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser_recovery");

    let source = "int x = 1 int y = 2 int z = 3;";
    group.bench_function("missing_semicolons", |b| b.iter(|| parse_source(black_box(source))));

    group.finish();
}

criterion_group!(
    benches,
    bench_parser_declarations,
    bench_parser_expressions,
    bench_parser_control_flow,
    bench_parser_recovery
);
criterion_main!(benches);
