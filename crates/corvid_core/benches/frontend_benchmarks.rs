use corvid_core::lexer::Lexer;
use corvid_core::parser::parse;
use criterion::{Criterion, criterion_group, criterion_main};

// ---------------------------------------------------------------------------
// Lexing throughput
// ---------------------------------------------------------------------------

fn bench_lex_numbers(c: &mut Criterion) {
    let source = "0 1234 .5 1.6e-10 0xDEADBEEF 666666666666.0e66 ".repeat(64);
    c.bench_function("lex_numeric_literals", |b| {
        b.iter(|| Lexer::tokenize_all(&source));
    });
}

fn bench_lex_funcalls(c: &mut Criterion) {
    let source = "console.log(\"hello\", 1, 0x2, true, null);\n".repeat(64);
    c.bench_function("lex_member_funcalls", |b| {
        b.iter(|| Lexer::tokenize_all(&source));
    });
}

// ---------------------------------------------------------------------------
// Parsing throughput
// ---------------------------------------------------------------------------

fn bench_parse_literals(c: &mut Criterion) {
    let source = "1; 2.5; 0xff; \"str\"; true; null; undefined;".repeat(32);
    c.bench_function("parse_literals", |b| {
        b.iter(|| parse("bench.js", &source).unwrap());
    });
}

fn bench_parse_member_chains(c: &mut Criterion) {
    let source = "a.b.c.d.e.f.g.h.i.j.k.l.m.n.o.p";
    c.bench_function("parse_member_chain", |b| {
        b.iter(|| parse("bench.js", source).unwrap());
    });
}

fn bench_parse_var_decls(c: &mut Criterion) {
    let source = "var a = 1, b = 2, c = \"three\", d = 0x4, e, f = null;".repeat(32);
    c.bench_function("parse_var_decls", |b| {
        b.iter(|| parse("bench.js", &source).unwrap());
    });
}

criterion_group!(
    benches,
    bench_lex_numbers,
    bench_lex_funcalls,
    bench_parse_literals,
    bench_parse_member_chains,
    bench_parse_var_decls,
);
criterion_main!(benches);
