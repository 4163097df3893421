//! Benchmarks for control-side text parsing.

use std::hint::black_box;

use criterion::Criterion;
use leveltrack::io::{command::parse_commands, Tokens};

pub fn bench_tokens(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse/tokens");
    let text = "  12 foo 34 -56 +78 9000000 bar 0 ".repeat(16);

    group.bench_function("next_integer", |b| {
        b.iter(|| {
            let mut tokens = Tokens::from(black_box(text.as_str()));
            let mut sum = 0i32;
            while !tokens.is_exhausted() {
                sum = sum.wrapping_add(tokens.next_integer());
            }
            sum
        })
    });

    group.finish();
}

pub fn bench_commands(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse/commands");
    let text = "a 1000; r 100000; t 50; l 4096; z";

    group.bench_function("parse_commands", |b| {
        b.iter(|| parse_commands(black_box(text)).filter(Result::is_ok).count())
    });

    group.finish();
}
