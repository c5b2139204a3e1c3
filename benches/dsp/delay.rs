//! Benchmarks for the modulated delay line.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use velvet_dsp::dsp::delay::ModDelayLine;

use crate::BLOCK_SIZES;

pub fn bench_delay(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/delay");

    for &size in BLOCK_SIZES {
        let input: Vec<f64> = (0..size).map(|i| (i as f64 * 0.02).sin()).collect();
        let mut line = ModDelayLine::new(79, 0.003251, 0.0);
        let length = 1927;

        group.bench_with_input(BenchmarkId::new("modulated_read", size), &size, |b, _| {
            b.iter(|| {
                let mut sum = 0.0_f64;
                for &sample in &input {
                    line.write(black_box(sample));
                    line.advance(length);
                    line.advance_phase(0.06);
                    sum += line.read_modulated(length, 2.7, 0.78);
                }
                sum
            })
        });
    }

    group.finish();
}
