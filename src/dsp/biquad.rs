//! Two-pole lowpass in transposed direct form.
//!
//! Coefficients live apart from filter state so one derivation can drive
//! both channels of a stereo pair. They are cheap enough to recompute at
//! every block start, which is how the reverb engine uses them.

use std::f64::consts::PI;

/// Resonance of the input shaping stage (golden ratio).
pub const RESONANCE_A: f64 = 1.618033988749894848204586;
/// Resonance of the first output shaping stage (inverse golden ratio).
pub const RESONANCE_B: f64 = 0.618033988749894848204586;
/// Resonance of the final output shaping stage.
pub const RESONANCE_C: f64 = 0.5;

/// Lowpass coefficient set derived via the tangent-based bilinear transform.
#[derive(Debug, Clone, Copy, Default)]
pub struct LowpassCoefficients {
    pub b0: f64,
    pub b1: f64,
    pub b2: f64,
    pub a1: f64,
    pub a2: f64,
}

impl LowpassCoefficients {
    /// Derive coefficients for a cutoff given as a fraction of the sample
    /// rate. `cutoff` must be positive and below 0.5 for a stable filter;
    /// the engine's parameter mapping keeps it there.
    pub fn derive(cutoff: f64, resonance: f64) -> Self {
        let k = (PI * cutoff).tan();
        let norm = 1.0 / (1.0 + k / resonance + k * k);
        let b0 = k * k * norm;
        Self {
            b0,
            b1: 2.0 * b0,
            b2: b0,
            a1: 2.0 * (k * k - 1.0) * norm,
            a2: (1.0 - k / resonance + k * k) * norm,
        }
    }
}

/// Per-channel filter state: two recursive registers.
#[derive(Debug, Clone, Default)]
pub struct Lowpass {
    s1: f64,
    s2: f64,
}

impl Lowpass {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume one sample, return the filtered sample.
    #[inline]
    pub fn process(&mut self, c: &LowpassCoefficients, sample: f64) -> f64 {
        let out = sample * c.b0 + self.s1;
        self.s1 = sample * c.b1 - out * c.a1 + self.s2;
        self.s2 = sample * c.b2 - out * c.a2;
        out
    }

    pub fn reset(&mut self) {
        self.s1 = 0.0;
        self.s2 = 0.0;
    }
}
