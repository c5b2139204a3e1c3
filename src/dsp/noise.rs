//! Floating-point hygiene: denormal protection and output dither.
//!
//! Both concerns share one 32-bit xorshift generator per channel. The
//! denormal guard substitutes a minuscule noise floor for true subnormal
//! inputs, which stall the FPU on some hardware. The dither scales its
//! noise to the exponent of the sample it is added to, so quantization
//! error stays proportionally small at every signal magnitude.

use rand::Rng;

/// Smallest input magnitude processed as-is; anything below is floored.
const DENORMAL_THRESHOLD: f64 = 1.18e-23;
/// Scale applied to the raw generator state when substituting the floor.
const FLOOR_SCALE: f64 = 1.18e-17;
/// Base scale of the exponent-weighted dither noise.
const DITHER_SCALE: f64 = 5.5e-36;

/// 32-bit xorshift generator driving the denormal floor and output dither.
///
/// One instance per audio channel. Seeded at construction; never reseeded,
/// so a seeded engine replays bit-identically.
#[derive(Debug, Clone)]
pub struct NoiseSource {
    state: u32,
}

impl NoiseSource {
    /// Draw a seed from `rng`. States below 16386 produce an audibly
    /// correlated warmup, so they are rejected.
    pub fn from_rng(rng: &mut impl Rng) -> Self {
        let mut state: u32 = 1;
        while state < 16386 {
            state = rng.random();
        }
        Self { state }
    }

    /// Advance the generator (xorshift32) and return the new state.
    #[inline]
    pub fn next(&mut self) -> u32 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 17;
        self.state ^= self.state << 5;
        self.state
    }

    /// Replace a would-be subnormal input with a noise floor derived from
    /// the current state. Does not advance the generator.
    #[inline]
    pub fn guard_denormal(&self, sample: f64) -> f64 {
        if sample.abs() < DENORMAL_THRESHOLD {
            self.state as f64 * FLOOR_SCALE
        } else {
            sample
        }
    }

    /// Add dither noise scaled to the sample's own floating-point exponent.
    /// Advances the generator once.
    #[inline]
    pub fn dither(&mut self, sample: f64) -> f64 {
        let exponent = exponent_f32(sample as f32);
        let noise = self.next() as f64 - 0x7fff_ffff_u32 as f64;
        sample + noise * DITHER_SCALE * 2.0_f64.powi(exponent + 62)
    }
}

/// Binary exponent of `x` in frexp convention: `x = m * 2^e`, 0.5 <= |m| < 1.
/// Zero maps to 0.
#[inline]
fn exponent_f32(x: f32) -> i32 {
    if x == 0.0 {
        0
    } else {
        x.abs().log2().floor() as i32 + 1
    }
}
