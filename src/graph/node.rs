/// Context passed to effect nodes during rendering.
///
/// Carries the one piece of host information every effect needs: the audio
/// sample rate. Nodes cache derived state and watch for rate changes
/// between blocks.
pub struct RenderCtx {
    pub sample_rate: f32,
}

impl RenderCtx {
    pub fn new(sample_rate: f32) -> Self {
        Self { sample_rate }
    }
}

/// Trait for nodes that support parameter modulation.
pub trait Modulatable: Send {
    type Param: Copy + Send;

    fn get_param(&self, param: Self::Param) -> f32;

    fn apply_modulation(&mut self, param: Self::Param, base: f32, modulation: f32);
}

/// Core trait for audio effect nodes.
///
/// Effects render in place over a mono block: each sample is read as the
/// dry input and overwritten with the processed result.
pub trait EffectNode: Send {
    fn render_block(&mut self, io: &mut [f32], ctx: &RenderCtx);

    /// Clear audio history (delay buffers, filter state).
    ///
    /// Default implementation does nothing (stateless effects).
    fn reset(&mut self) {
        // Default: do nothing
    }

    /// Upper bound on how long the effect keeps ringing after its input
    /// goes silent, in samples. `None` means unknown.
    ///
    /// Used by offline rendering to know how far past the material to run.
    fn tail_samples(&self, _ctx: &RenderCtx) -> Option<usize> {
        None
    }
}

/// Allow boxed effect nodes to be used as effect nodes (for dynamic dispatch)
impl EffectNode for Box<dyn EffectNode> {
    fn render_block(&mut self, io: &mut [f32], ctx: &RenderCtx) {
        (**self).render_block(io, ctx)
    }

    fn reset(&mut self) {
        (**self).reset()
    }

    fn tail_samples(&self, ctx: &RenderCtx) -> Option<usize> {
        (**self).tail_samples(ctx)
    }
}
