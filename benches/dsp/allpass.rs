//! Benchmarks for the diffusion allpass.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use velvet_dsp::dsp::allpass::DiffusionAllpass;

use crate::BLOCK_SIZES;

pub fn bench_allpass(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/allpass");

    for &size in BLOCK_SIZES {
        let input: Vec<f64> = (0..size).map(|i| (i as f64 * 0.03).sin()).collect();
        let mut allpass = DiffusionAllpass::new(43);

        group.bench_with_input(BenchmarkId::new("process", size), &size, |b, _| {
            b.iter(|| {
                let mut sum = 0.0_f64;
                for &sample in &input {
                    sum += allpass.process(black_box(sample), 1049);
                }
                sum
            })
        });
    }

    group.finish();
}
