//! Benchmarks for the full reverb engine.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use velvet_dsp::{MatrixReverb, ReverbParams};

use crate::BLOCK_SIZES;

pub fn bench_reverb(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/reverb");

    for &size in BLOCK_SIZES {
        // Impulse-like attack with a quiet tail, so the network has content
        let input: Vec<f32> = (0..size)
            .map(|i| {
                if i < 10 {
                    1.0 - (i as f32 / 10.0)
                } else {
                    (i as f32 * 0.05).sin() * 0.1
                }
            })
            .collect();
        let mut output = vec![0.0_f32; size];

        // Small room, short decay
        let mut reverb = MatrixReverb::with_seed(1);
        reverb.set_params(ReverbParams {
            size: 0.2,
            damping: 0.6,
            mix: 1.0,
            ..ReverbParams::default()
        });
        group.bench_with_input(BenchmarkId::new("small_room", size), &size, |b, _| {
            b.iter(|| {
                reverb.process(black_box(&input), &mut output);
                output[0]
            })
        });

        // Large room, long decay
        let mut reverb = MatrixReverb::with_seed(1);
        reverb.set_params(ReverbParams {
            size: 0.9,
            damping: 0.1,
            mix: 1.0,
            ..ReverbParams::default()
        });
        group.bench_with_input(BenchmarkId::new("large_room", size), &size, |b, _| {
            b.iter(|| {
                reverb.process(black_box(&input), &mut output);
                output[0]
            })
        });

        // Heavy modulation
        let mut reverb = MatrixReverb::with_seed(1);
        reverb.set_params(ReverbParams {
            speed: 0.8,
            vibrato_depth: 0.7,
            mix: 1.0,
            ..ReverbParams::default()
        });
        group.bench_with_input(BenchmarkId::new("modulated", size), &size, |b, _| {
            b.iter(|| {
                reverb.process(black_box(&input), &mut output);
                output[0]
            })
        });
    }

    group.finish();
}
