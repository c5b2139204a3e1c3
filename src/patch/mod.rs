//! Presets and host-facing parameter descriptions.
//!
//! Three representations of the same seven controls: a named patch for
//! humans (serde-serializable when the `serde` feature is on), a static
//! descriptor table for config registries and documentation generators,
//! and a raw little-endian f32 chunk for hosts that persist opaque state
//! bytes (four bytes per parameter).

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::graph::reverb::{ReverbNode, ReverbParam};

/// Bytes in a raw state chunk: seven f32 values.
pub const RAW_CHUNK_LEN: usize = 28;

/// Host-facing description of one control.
#[derive(Debug, Clone, Copy)]
pub struct ParamSpec {
    pub param: ReverbParam,
    /// Config-registry key.
    pub key: &'static str,
    /// Default as documented to the registry. All ranges are [0, 1].
    pub default: f32,
    pub doc: &'static str,
}

/// Descriptor table in chunk order. The mix default differs from the
/// engine's construction default on purpose: a configured instance starts
/// with an audible amount of reverb, a bare engine starts dry.
pub const PARAM_SPECS: [ParamSpec; 7] = [
    ParamSpec {
        param: ReverbParam::Filter,
        key: "reverb.filter",
        default: 1.0,
        doc: "Input lowpass tone; range [0..1]",
    },
    ParamSpec {
        param: ReverbParam::Damping,
        key: "reverb.damping",
        default: 0.2,
        doc: "Decay damping; range [0..1]",
    },
    ParamSpec {
        param: ReverbParam::Speed,
        key: "reverb.speed",
        default: 0.0,
        doc: "Modulation rate; range [0..1]",
    },
    ParamSpec {
        param: ReverbParam::VibratoDepth,
        key: "reverb.vibrato",
        default: 0.0,
        doc: "Modulation depth; range [0..1]",
    },
    ParamSpec {
        param: ReverbParam::Size,
        key: "reverb.size",
        default: 0.4,
        doc: "Room size; range [0..1]",
    },
    ParamSpec {
        param: ReverbParam::Flavor,
        key: "reverb.flavor",
        default: 0.8,
        doc: "Predelay/crossfeed character; range [0..1]",
    },
    ParamSpec {
        param: ReverbParam::Mix,
        key: "reverb.mix",
        default: 0.1,
        doc: "Reverb Mix (modifies dry/wet); range [0..1]",
    },
];

/// Look up the descriptor for one control.
pub fn spec(param: ReverbParam) -> &'static ParamSpec {
    PARAM_SPECS
        .iter()
        .find(|s| s.param == param)
        .expect("every control has a descriptor")
}

/// Resolve a config-registry key to its control.
pub fn param_for_key(key: &str) -> Option<ReverbParam> {
    PARAM_SPECS.iter().find(|s| s.key == key).map(|s| s.param)
}

/// A complete, named parameter snapshot.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct ReverbPatch {
    pub name: String,
    pub description: Option<String>,
    pub values: [f32; 7],
}

impl Default for ReverbPatch {
    fn default() -> Self {
        Self {
            name: "Default".to_string(),
            description: None,
            values: {
                let mut values = [0.0; 7];
                for (value, spec) in values.iter_mut().zip(&PARAM_SPECS) {
                    *value = spec.default;
                }
                values
            },
        }
    }
}

impl ReverbPatch {
    /// Snapshot a node's current controls.
    pub fn capture(name: impl Into<String>, node: &ReverbNode) -> Self {
        let mut values = [0.0; 7];
        for (value, param) in values.iter_mut().zip(ReverbParam::ALL) {
            *value = node.value(param);
        }
        Self {
            name: name.into(),
            description: None,
            values,
        }
    }

    /// Push every control into the node.
    pub fn apply_to(&self, node: &mut ReverbNode) {
        for (&value, param) in self.values.iter().zip(ReverbParam::ALL) {
            node.set(param, value);
        }
    }

    /// Encode as the raw state chunk hosts persist: seven little-endian
    /// f32 values in `ReverbParam::ALL` order.
    pub fn to_raw_chunk(&self) -> [u8; RAW_CHUNK_LEN] {
        let mut chunk = [0u8; RAW_CHUNK_LEN];
        for (slot, value) in chunk.chunks_exact_mut(4).zip(&self.values) {
            slot.copy_from_slice(&value.to_le_bytes());
        }
        chunk
    }

    /// Decode a raw state chunk. Returns `None` if the chunk is the wrong
    /// length; values are taken as-is (the node clamps on apply).
    pub fn from_raw_chunk(chunk: &[u8]) -> Option<Self> {
        if chunk.len() != RAW_CHUNK_LEN {
            return None;
        }
        let mut values = [0.0; 7];
        for (value, bytes) in values.iter_mut().zip(chunk.chunks_exact(4)) {
            *value = f32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
        }
        Some(Self {
            name: "Restored".to_string(),
            description: None,
            values,
        })
    }
}
