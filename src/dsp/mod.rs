//! Low-level DSP primitives used by the reverb engine.
//!
//! These components are allocation-free and realtime-safe once constructed,
//! so the engine can run them sample-by-sample on the audio-rendering
//! thread. They stay focused on the signal-processing math; the graph layer
//! adds parameter handling and block orchestration on top.

/// Fixed-coefficient allpass diffuser.
pub mod allpass;
/// Two-pole lowpass shaping filter.
pub mod biquad;
/// Predelay and modulated feedback delay lines.
pub mod delay;
/// Denormal protection and exponent-scaled dither.
pub mod noise;
/// The modulated feedback-delay-network reverb engine.
pub mod reverb;

/// Largest room-size multiplier the parameter mapping can produce.
pub(crate) const MAX_SIZE_FACTOR: usize = 100;
/// Headroom beyond the maximum scaled delay length, covering the worst-case
/// modulation excursion (just over 205 samples).
pub(crate) const BUFFER_HEADROOM: usize = 210;
