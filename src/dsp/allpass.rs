//! First-order allpass diffuser.
//!
//! Smears a signal in time without altering its magnitude spectrum. The
//! reverb runs four of these in series ahead of the delay network so a
//! transient arrives as a cluster of reflections instead of one echo.

use crate::dsp::{BUFFER_HEADROOM, MAX_SIZE_FACTOR};

/// Allpass coefficient. Fixed for all diffusion stages.
const DIFFUSION: f64 = 0.5;

/// Allpass over a circular buffer whose effective length is supplied per
/// sample, so the same state follows the room-size parameter without
/// reallocating.
#[derive(Debug, Clone)]
pub struct DiffusionAllpass {
    buffer: Vec<f64>,
    cursor: usize,
}

impl DiffusionAllpass {
    /// Allocate for a base (unscaled) delay length. Capacity covers the
    /// maximum size scaling; exceeding it is impossible for lengths the
    /// parameter mapping can produce.
    pub fn new(base_delay: usize) -> Self {
        Self {
            buffer: vec![0.0; base_delay * MAX_SIZE_FACTOR + BUFFER_HEADROOM],
            cursor: 1,
        }
    }

    /// Process one sample at the current scaled `length`.
    ///
    /// Reads one position ahead of the cursor, subtracts half of it from
    /// the input to form the stored value, then halves that and adds the
    /// advanced read position back in.
    #[inline]
    pub fn process(&mut self, input: f64, length: usize) -> f64 {
        let mut ahead = self.cursor + 1;
        if ahead > length {
            ahead = 0;
        }
        let mut out = input - self.buffer[ahead] * DIFFUSION;
        self.buffer[self.cursor] = out;
        out *= DIFFUSION;

        self.cursor += 1;
        if self.cursor > length {
            self.cursor = 0;
        }
        out + self.buffer[self.cursor]
    }

    pub fn reset(&mut self) {
        self.buffer.fill(0.0);
        self.cursor = 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_impulse_spreads_over_time() {
        let mut allpass = DiffusionAllpass::new(31);
        let length = 310;

        let first = allpass.process(1.0, length);
        let mut later_energy = 0.0;
        for _ in 0..(length * 4) {
            let out = allpass.process(0.0, length);
            later_energy += out * out;
        }
        assert!(first.abs() < 1.0, "direct path should be attenuated");
        assert!(later_energy > 0.1, "delayed reflections expected, got {}", later_energy);
    }

    #[test]
    fn test_energy_roughly_preserved() {
        let mut allpass = DiffusionAllpass::new(43);
        let length = 430;

        let mut energy_in = 0.0;
        let mut energy_out = 0.0;
        for n in 0..4000 {
            let x = if n < 10 { 1.0 } else { 0.0 };
            let y = allpass.process(x, length);
            energy_in += x * x;
            energy_out += y * y;
        }
        assert!(
            energy_out > energy_in * 0.8,
            "allpass should pass energy: in={} out={}",
            energy_in,
            energy_out
        );
    }

    #[test]
    fn test_length_change_stays_in_bounds() {
        let mut allpass = DiffusionAllpass::new(37);
        // Shrink and grow the effective length mid-stream; indexing must
        // hold without touching the buffer allocation.
        for (i, &length) in [3700, 370, 1850, 370, 3700].iter().cycle().take(5000).enumerate() {
            let out = allpass.process((i as f64 * 0.1).sin(), length);
            assert!(out.is_finite());
        }
    }

    #[test]
    fn test_reset_silences_tail() {
        let mut allpass = DiffusionAllpass::new(31);
        for _ in 0..100 {
            allpass.process(1.0, 310);
        }
        allpass.reset();
        let out = allpass.process(0.0, 310);
        assert_eq!(out, 0.0);
    }
}
