//! Effect-node layer over the low-level DSP engine.
//!
//! Nodes wrap the primitives with what hosts need: block-based rendering,
//! a closed parameter set with clamping, modulation hooks, and tail-length
//! reporting for offline renders.

/// Core traits shared by all effect nodes.
pub mod node;
/// The matrix reverb node and its parameter set.
pub mod reverb;
