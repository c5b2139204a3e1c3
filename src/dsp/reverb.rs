//! Modulated feedback-delay-network reverb.
//!
//! Signal path, per sample and per channel: denormal guard, predelay,
//! input lowpass, sine soft compression, four-stage allpass diffusion,
//! eight modulated delay lines folded back through two Householder groups,
//! output lowpass, hard clip, arcsine expansion, final lowpass, dry/wet
//! mix, exponent-scaled dither, equal-power mono sum.
//!
//! Everything here is allocation-free after construction and runs with
//! fixed loop bounds, so `process` is safe to call on the audio-rendering
//! thread. Parameter fields may be written between calls from another
//! thread; derived coefficients are recomputed from whatever values are
//! visible at block start, and the mapping keeps every derived length
//! inside its buffer capacity for the full [0,1] control range.

use std::f64::consts::{FRAC_1_SQRT_2, TAU};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::dsp::allpass::DiffusionAllpass;
use crate::dsp::biquad::{Lowpass, LowpassCoefficients, RESONANCE_A, RESONANCE_B, RESONANCE_C};
use crate::dsp::delay::{ModDelayLine, PredelayLine};
use crate::dsp::noise::NoiseSource;

/// Base (unscaled) lengths of the eight feedback delay lines. Mutually
/// prime so the modal peaks of the lines never pile up.
const LINE_BASES: [usize; 8] = [79, 73, 71, 67, 61, 59, 53, 47];

/// Per-line modulation phase-rate weights. Each line advances its phase by
/// `weight * rate` per sample; the spread keeps the eight wobbles
/// uncorrelated.
const LINE_PHASE_RATES: [f64; 8] = [
    0.003251, 0.002999, 0.002917, 0.002749, 0.002503, 0.002423, 0.002146, 0.002088,
];

/// Base lengths of the four diffusion allpasses.
const DIFFUSER_BASES: [usize; 4] = [43, 41, 37, 31];

/// Base length of the predelay.
const PREDELAY_BASE: usize = 29;

/// Which diffusion-stage tap feeds each delay line. Mirrored assignment:
/// the outer lines of each Householder group take the most-diffused tap,
/// the inner lines the least, decorrelating the eight network feeds.
const TAP_FOR_LINE: [usize; 8] = [3, 2, 1, 0, 0, 1, 2, 3];

/// The seven normalized controls. All conceptually 0.0..=1.0. The engine
/// does not validate; out-of-range values are the caller's problem (the
/// node layer clamps).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReverbParams {
    /// Input lowpass tone.
    pub filter: f32,
    /// Mid-network decay shaping (higher = darker, shorter).
    pub damping: f32,
    /// Shared modulation rate.
    pub speed: f32,
    /// Modulation excursion.
    pub vibrato_depth: f32,
    /// Room scale; expands every delay length.
    pub size: f32,
    /// Predelay/crossfeed character.
    pub flavor: f32,
    /// Wet proportion; 0 = dry, 1 = fully wet.
    pub mix: f32,
}

impl Default for ReverbParams {
    fn default() -> Self {
        Self {
            filter: 1.0,
            damping: 0.2,
            speed: 0.0,
            vibrato_depth: 0.0,
            size: 0.4,
            flavor: 0.8,
            mix: 0.0,
        }
    }
}

/// Everything derived from the controls, recomputed once per `process`
/// call. Pure function of (params, sample rate).
#[derive(Debug, Clone)]
pub struct Coefficients {
    pub biquad_a: LowpassCoefficients,
    pub biquad_b: LowpassCoefficients,
    pub biquad_c: LowpassCoefficients,
    pub mod_rate: f64,
    pub mod_depth: f64,
    pub size: f64,
    pub blend: f64,
    pub crossfeed: f64,
    pub regen: f64,
    pub wet: f64,
    pub line_lengths: [usize; 8],
    pub diffuser_lengths: [usize; 4],
    pub predelay_length: usize,
}

impl Coefficients {
    pub fn derive(params: &ReverbParams, sample_rate: f64) -> Self {
        let cutoff = (params.filter as f64 * 9000.0 + 1000.0) / sample_rate;

        let mod_rate = 0.06 + params.speed as f64;
        let mod_depth = (0.027 + (params.vibrato_depth as f64).powi(3)) * 100.0;
        let size = (params.size as f64).powi(2) * 90.0 + 10.0;
        let decay_shape =
            1.0 - (1.0 - (0.82 - (params.damping as f64 * 0.5 + size * 0.002))).powi(4);
        let blend = 0.955 - size * 0.007;
        let crossfeed = ((params.flavor as f64 - 0.5) * 2.0).powi(3) * 0.5;
        let regen = decay_shape * (0.5 - crossfeed.abs() * 0.031);

        Self {
            biquad_a: LowpassCoefficients::derive(cutoff, RESONANCE_A),
            biquad_b: LowpassCoefficients::derive(cutoff, RESONANCE_B),
            biquad_c: LowpassCoefficients::derive(cutoff, RESONANCE_C),
            mod_rate,
            mod_depth,
            size,
            blend,
            crossfeed,
            regen,
            wet: params.mix as f64,
            line_lengths: LINE_BASES.map(|base| (base as f64 * size) as usize),
            diffuser_lengths: DIFFUSER_BASES.map(|base| (base as f64 * size) as usize),
            predelay_length: (PREDELAY_BASE as f64 * size
                - 56.0 * size * crossfeed.abs()) as usize,
        }
    }
}

/// All per-channel state: thirteen delay buffers, three filters, eight
/// feedback accumulators, and the channel's noise source.
#[derive(Debug, Clone)]
struct ChannelState {
    predelay: PredelayLine,
    diffusers: [DiffusionAllpass; 4],
    lines: [ModDelayLine; 8],
    lowpass_a: Lowpass,
    lowpass_b: Lowpass,
    lowpass_c: Lowpass,
    feedback: [f64; 8],
    noise: NoiseSource,
}

impl ChannelState {
    fn new(rng: &mut impl Rng) -> Self {
        Self {
            predelay: PredelayLine::new(PREDELAY_BASE),
            diffusers: std::array::from_fn(|i| DiffusionAllpass::new(DIFFUSER_BASES[i])),
            lines: std::array::from_fn(|i| {
                ModDelayLine::new(
                    LINE_BASES[i],
                    LINE_PHASE_RATES[i],
                    rng.random_range(0.0..TAU),
                )
            }),
            lowpass_a: Lowpass::new(),
            lowpass_b: Lowpass::new(),
            lowpass_c: Lowpass::new(),
            feedback: [0.0; 8],
            noise: NoiseSource::from_rng(rng),
        }
    }

    /// Process one input sample through the whole chain, returning the
    /// dithered, dry/wet-mixed channel output.
    fn tick(&mut self, raw: f64, c: &Coefficients) -> f64 {
        let mut sample = self.noise.guard_denormal(raw);
        let dry = sample;

        sample = self.predelay.process(sample, c.predelay_length);
        sample = self.lowpass_a.process(&c.biquad_a, sample);

        // Wet scaling happens ahead of the compressor so the network never
        // sees more level than the mix will keep.
        sample *= c.wet;
        sample = sample.sin();

        // Diffusion cascade; each stage's tap feeds a pair of lines.
        let mut taps = [0.0; 4];
        for (tap, (diffuser, &length)) in taps
            .iter_mut()
            .zip(self.diffusers.iter_mut().zip(&c.diffuser_lengths))
        {
            sample = diffuser.process(sample, length);
            *tap = sample;
        }

        for i in 0..8 {
            self.lines[i].write(taps[TAP_FOR_LINE[i]] + self.feedback[i]);
            self.lines[i].advance(c.line_lengths[i]);
            self.lines[i].advance_phase(c.mod_rate);
        }

        let mut reads = [0.0; 8];
        for i in 0..8 {
            reads[i] = self.lines[i].read_modulated(c.line_lengths[i], c.mod_depth, c.blend);
        }

        // Crossfeed between the two group leaders. Sequential on purpose:
        // the second blend sees the first one's result.
        let spill = 1.0 - c.crossfeed.abs();
        reads[0] = reads[0] * spill + reads[4] * c.crossfeed;
        reads[4] = reads[4] * spill + reads[0] * c.crossfeed;

        // Householder reflection per group of four, scaled by the
        // regeneration gain. Energy-preserving up to that scalar.
        for group in [0, 4] {
            let values = [
                reads[group],
                reads[group + 1],
                reads[group + 2],
                reads[group + 3],
            ];
            let sum: f64 = values.iter().sum();
            for (k, &value) in values.iter().enumerate() {
                self.feedback[group + k] = (value - (sum - value)) * c.regen;
            }
        }

        sample = reads.iter().sum::<f64>() / 8.0;

        sample = self.lowpass_b.process(&c.biquad_b, sample);
        // Clip ahead of the arcsine: outside [-1, 1] it would go NaN and
        // the feedback path would latch on it.
        sample = sample.clamp(-1.0, 1.0);
        sample = sample.asin();
        sample = self.lowpass_c.process(&c.biquad_c, sample);

        if c.wet != 1.0 {
            sample += dry * (1.0 - c.wet);
        }
        self.noise.dither(sample)
    }

    fn reset(&mut self) {
        self.predelay.reset();
        for diffuser in &mut self.diffusers {
            diffuser.reset();
        }
        for line in &mut self.lines {
            line.reset();
        }
        self.lowpass_a.reset();
        self.lowpass_b.reset();
        self.lowpass_c.reset();
        self.feedback = [0.0; 8];
    }
}

/// Stereo-core reverb processing a mono stream: both internal channels read
/// the same input and the outputs are summed at equal power. One instance
/// per voice; construction allocates, everything after does not.
pub struct MatrixReverb {
    params: ReverbParams,
    sample_rate: f64,
    left: ChannelState,
    right: ChannelState,
}

impl MatrixReverb {
    /// Create an engine with randomized modulation phases and dither
    /// seeds. Two engines built this way diverge even on identical input;
    /// that is intentional (parallel voices through identical reverbs comb
    /// against each other).
    pub fn new() -> Self {
        Self::with_seed(rand::rng().random())
    }

    /// Create a deterministic engine: same seed, same parameter sequence,
    /// same input, bit-identical output.
    pub fn with_seed(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        Self {
            params: ReverbParams::default(),
            sample_rate: 48_000.0,
            left: ChannelState::new(&mut rng),
            right: ChannelState::new(&mut rng),
        }
    }

    /// Bind the sample rate. Call before the first `process`; takes effect
    /// at the next coefficient derivation.
    pub fn set_sample_rate(&mut self, sample_rate: f64) {
        self.sample_rate = sample_rate;
    }

    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    pub fn params(&self) -> &ReverbParams {
        &self.params
    }

    /// Mutable access to the controls. Changes take effect at the next
    /// `process` call's coefficient recomputation, never mid-call.
    pub fn params_mut(&mut self) -> &mut ReverbParams {
        &mut self.params
    }

    pub fn set_params(&mut self, params: ReverbParams) {
        self.params = params;
    }

    /// Process `input` into `output`, mono to mono, over
    /// `min(input.len(), output.len())` frames. Any positive frame count
    /// works; state carries across calls.
    pub fn process(&mut self, input: &[f32], output: &mut [f32]) {
        let coefficients = Coefficients::derive(&self.params, self.sample_rate);
        for (dry, out) in input.iter().zip(output.iter_mut()) {
            *out = self.render_frame(*dry as f64, &coefficients);
        }
    }

    /// In-place variant: each sample is read as the dry input and
    /// overwritten with the processed result.
    pub fn process_in_place(&mut self, io: &mut [f32]) {
        let coefficients = Coefficients::derive(&self.params, self.sample_rate);
        for sample in io.iter_mut() {
            *sample = self.render_frame(*sample as f64, &coefficients);
        }
    }

    #[inline]
    fn render_frame(&mut self, dry: f64, coefficients: &Coefficients) -> f32 {
        let left = self.left.tick(dry, coefficients);
        let right = self.right.tick(dry, coefficients);
        (FRAC_1_SQRT_2 * (left + right)) as f32
    }

    /// Clear all audio history (buffers, filters, feedback) without
    /// reallocating or reseeding.
    pub fn reset(&mut self) {
        self.left.reset();
        self.right.reset();
    }

    /// Worst-case decay-tail length in samples for the current parameters:
    /// the longest scaled delay plus the time the feedback loop takes to
    /// fall below -60 dB.
    pub fn tail_samples(&self) -> usize {
        let coefficients = Coefficients::derive(&self.params, self.sample_rate);
        let longest = coefficients.line_lengths[0] as f64;
        const SILENCE: f64 = 0.001;
        if coefficients.regen <= 0.0 {
            return longest as usize;
        }
        (longest + longest * SILENCE.log10() / coefficients.regen.log10()) as usize
    }
}

impl Default for MatrixReverb {
    fn default() -> Self {
        Self::new()
    }
}
