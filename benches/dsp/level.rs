//! Benchmarks for the attack/release level tracker.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use leveltrack::{dsp::fixed::smoothing_rate, LevelState, MAX_LEVEL, MICRO_SEC_PER_SAMPLE};

use crate::BLOCK_SIZES;

/// Deterministic test signal: a decaying burst repeated every 256 samples.
fn burst(size: usize) -> Vec<i32> {
    (0..size)
        .map(|n| {
            let phase = (n % 256) as i32;
            let amplitude = MAX_LEVEL / (phase + 1);
            if n % 2 == 0 {
                amplitude
            } else {
                -amplitude
            }
        })
        .collect()
}

pub fn bench_level(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/level");

    for &size in BLOCK_SIZES {
        let input = burst(size);
        let mut out = vec![0i32; size];

        // Mixed attack/release decisions
        let mut state = LevelState::new(1_000, 100_000, MAX_LEVEL / 2);
        group.bench_with_input(BenchmarkId::new("burst", size), &size, |b, _| {
            b.iter(|| {
                state.render(black_box(&input), black_box(&mut out));
            })
        });

        // Silence: release branch every sample
        let silence = vec![0i32; size];
        let mut state = LevelState::new(1_000, 100_000, MAX_LEVEL / 2);
        group.bench_with_input(BenchmarkId::new("silence", size), &size, |b, _| {
            b.iter(|| {
                state.render(black_box(&silence), black_box(&mut out));
            })
        });
    }

    group.finish();
}

pub fn bench_rates(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/rates");

    for &tau in &[10u32, 1_000, 100_000, 10_000_000] {
        group.bench_with_input(BenchmarkId::new("smoothing_rate", tau), &tau, |b, &tau| {
            b.iter(|| smoothing_rate(black_box(MICRO_SEC_PER_SAMPLE), black_box(tau)))
        });
    }

    group.bench_function("init", |b| {
        let mut state = LevelState::default();
        b.iter(|| {
            state.init(black_box(1_000), black_box(100_000), black_box(MAX_LEVEL / 2));
        })
    });

    group.finish();
}
