pub mod control; // Lock-free parameter delivery to the audio thread
pub mod dsp;
pub mod graph; // Effect nodes over the DSP engine
pub mod io;
pub mod patch; // Presets, descriptors, raw state chunks

pub use dsp::reverb::{MatrixReverb, ReverbParams};
pub use graph::node::{EffectNode, RenderCtx};
pub use graph::reverb::{ReverbNode, ReverbParam};
