//! Benchmarks for the lowpass shaping filter.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use velvet_dsp::dsp::biquad::{Lowpass, LowpassCoefficients, RESONANCE_A};

use crate::BLOCK_SIZES;

pub fn bench_biquad(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/biquad");

    for &size in BLOCK_SIZES {
        let input: Vec<f64> = (0..size).map(|i| (i as f64 * 0.05).sin()).collect();
        let coefficients = LowpassCoefficients::derive(10_000.0 / 48_000.0, RESONANCE_A);
        let mut filter = Lowpass::new();

        group.bench_with_input(BenchmarkId::new("process", size), &size, |b, _| {
            b.iter(|| {
                let mut sum = 0.0_f64;
                for &sample in &input {
                    sum += filter.process(&coefficients, black_box(sample));
                }
                sum
            })
        });
    }

    group.finish();
}
