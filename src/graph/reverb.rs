use crate::dsp::reverb::MatrixReverb;
use crate::graph::node::{EffectNode, Modulatable, RenderCtx};

/*
Reverb Node
===========

Simulates the acoustic reflections of a physical space with a modulated
feedback delay network: eight delay lines folded back through two
energy-preserving Householder groups, fed through a four-stage allpass
diffuser. Compared to a comb-filter reverb the tail is denser and the
slow modulation of the line lengths keeps it from ringing metallically.

Parameters (all 0.0 - 1.0)
--------------------------

Filter:        Input lowpass tone. 1.0 = open, lower values darken the
               signal entering the network.
Damping:       Decay shaping. Higher values absorb feedback energy faster,
               shortening and darkening the tail.
Speed:         Rate of the delay-line modulation.
VibratoDepth:  Excursion of the modulation. 0.0 = barely perceptible
               drift, 1.0 = obvious chorus-like motion.
Size:          Room scale. Expands every delay length; quadratic response,
               so the top half of the range grows quickly.
Flavor:        Predelay/crossfeed character. 0.5 is neutral; toward the
               extremes the two delay groups bleed into each other and the
               predelay shortens, giving a more artificial space.
Mix:           Dry/wet blend. 0.0 = dry, 1.0 = fully wet.

Example usage:

  // Subtle room behind a dry source
  let verb = ReverbNode::room(0.2);

  // Huge modulated wash
  let mut verb = ReverbNode::cavern(0.6);
  verb.set(ReverbParam::VibratoDepth, 0.3);
*/

/// The closed set of reverb controls. Parameter dispatch is an enum match,
/// not an index table, so an unknown control cannot exist.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReverbParam {
    /// Input lowpass tone
    Filter,
    /// Decay shaping (higher = darker, shorter)
    Damping,
    /// Modulation rate
    Speed,
    /// Modulation excursion
    VibratoDepth,
    /// Room scale
    Size,
    /// Predelay/crossfeed character
    Flavor,
    /// Dry/wet mix
    Mix,
}

impl ReverbParam {
    /// Every control, in the order presets and state chunks store them.
    pub const ALL: [ReverbParam; 7] = [
        ReverbParam::Filter,
        ReverbParam::Damping,
        ReverbParam::Speed,
        ReverbParam::VibratoDepth,
        ReverbParam::Size,
        ReverbParam::Flavor,
        ReverbParam::Mix,
    ];
}

/// Matrix reverb effect.
pub struct ReverbNode {
    engine: MatrixReverb,
    initialized: bool,
}

impl ReverbNode {
    /// Create a reverb with engine defaults and the given wet mix.
    pub fn new(mix: f32) -> Self {
        let mut engine = MatrixReverb::new();
        engine.params_mut().mix = mix.clamp(0.0, 1.0);
        Self {
            engine,
            initialized: false,
        }
    }

    /// Deterministic construction for tests and offline renders. Engines
    /// sharing a seed produce bit-identical output.
    pub fn with_seed(seed: u64, mix: f32) -> Self {
        let mut engine = MatrixReverb::with_seed(seed);
        engine.params_mut().mix = mix.clamp(0.0, 1.0);
        Self {
            engine,
            initialized: false,
        }
    }

    /// Small room: tight, bright, short predelay.
    pub fn room(mix: f32) -> Self {
        let mut node = Self::new(mix);
        node.set(ReverbParam::Size, 0.25);
        node.set(ReverbParam::Damping, 0.4);
        node
    }

    /// Concert hall: balanced size and decay.
    pub fn hall(mix: f32) -> Self {
        let mut node = Self::new(mix);
        node.set(ReverbParam::Size, 0.55);
        node.set(ReverbParam::Damping, 0.25);
        node
    }

    /// Cavern: maximal size, slow dark decay, a little modulation.
    pub fn cavern(mix: f32) -> Self {
        let mut node = Self::new(mix);
        node.set(ReverbParam::Size, 0.9);
        node.set(ReverbParam::Damping, 0.15);
        node.set(ReverbParam::VibratoDepth, 0.1);
        node
    }

    /// Set one control, clamped to [0, 1]. Takes effect at the next block.
    pub fn set(&mut self, param: ReverbParam, value: f32) {
        let value = value.clamp(0.0, 1.0);
        let params = self.engine.params_mut();
        match param {
            ReverbParam::Filter => params.filter = value,
            ReverbParam::Damping => params.damping = value,
            ReverbParam::Speed => params.speed = value,
            ReverbParam::VibratoDepth => params.vibrato_depth = value,
            ReverbParam::Size => params.size = value,
            ReverbParam::Flavor => params.flavor = value,
            ReverbParam::Mix => params.mix = value,
        }
    }

    /// Current value of one control.
    pub fn value(&self, param: ReverbParam) -> f32 {
        let params = self.engine.params();
        match param {
            ReverbParam::Filter => params.filter,
            ReverbParam::Damping => params.damping,
            ReverbParam::Speed => params.speed,
            ReverbParam::VibratoDepth => params.vibrato_depth,
            ReverbParam::Size => params.size,
            ReverbParam::Flavor => params.flavor,
            ReverbParam::Mix => params.mix,
        }
    }

    /// Access the underlying engine.
    pub fn engine(&self) -> &MatrixReverb {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut MatrixReverb {
        &mut self.engine
    }
}

impl EffectNode for ReverbNode {
    fn render_block(&mut self, io: &mut [f32], ctx: &RenderCtx) {
        // Bind the host sample rate on first render and re-bind if the
        // host renegotiates it.
        let rate = ctx.sample_rate as f64;
        if !self.initialized || self.engine.sample_rate() != rate {
            self.engine.set_sample_rate(rate);
            self.initialized = true;
        }
        self.engine.process_in_place(io);
    }

    fn reset(&mut self) {
        self.engine.reset();
    }

    fn tail_samples(&self, _ctx: &RenderCtx) -> Option<usize> {
        Some(self.engine.tail_samples())
    }
}

impl Modulatable for ReverbNode {
    type Param = ReverbParam;

    fn get_param(&self, param: Self::Param) -> f32 {
        self.value(param)
    }

    fn apply_modulation(&mut self, param: Self::Param, base: f32, modulation: f32) {
        self.set(param, base + modulation);
    }
}
