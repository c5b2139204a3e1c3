//! Cross-thread parameter delivery.
//!
//! Host and UI threads never touch the engine directly; they push
//! `ControlMessage`s into a bounded single-producer/single-consumer ring
//! and the audio thread drains it at block start. Draining is wait-free
//! and bounded by the ring capacity, so it is safe inside the render
//! deadline. A message pushed mid-block is observed one block late, which
//! is the same latency a direct field write would have had.

#[cfg(feature = "rtrb")]
use rtrb::Consumer;

use crate::graph::node::EffectNode;
use crate::graph::reverb::{ReverbNode, ReverbParam};

#[derive(Debug, Copy, Clone)]
pub enum ControlMessage {
    /// Set one control to a normalized value in [0, 1].
    SetParam { param: ReverbParam, value: f32 },
    /// Clear all delay buffers and filter state.
    Reset,
}

pub trait MessageReceiver {
    fn pop(&mut self) -> Option<ControlMessage>;
}

#[cfg(feature = "rtrb")]
impl MessageReceiver for Consumer<ControlMessage> {
    fn pop(&mut self) -> Option<ControlMessage> {
        Consumer::pop(self).ok()
    }
}

/// Drain every pending message into the node. Call once per block, before
/// rendering.
pub fn drain(receiver: &mut impl MessageReceiver, node: &mut ReverbNode) {
    while let Some(message) = receiver.pop() {
        apply(message, node);
    }
}

/// Apply a single message to the node.
pub fn apply(message: ControlMessage, node: &mut ReverbNode) {
    match message {
        ControlMessage::SetParam { param, value } => node.set(param, value),
        ControlMessage::Reset => node.reset(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct VecReceiver(Vec<ControlMessage>);

    impl MessageReceiver for VecReceiver {
        fn pop(&mut self) -> Option<ControlMessage> {
            if self.0.is_empty() {
                None
            } else {
                Some(self.0.remove(0))
            }
        }
    }

    #[test]
    fn test_drain_applies_in_order() {
        let mut node = ReverbNode::with_seed(2, 0.0);
        let mut receiver = VecReceiver(vec![
            ControlMessage::SetParam {
                param: ReverbParam::Mix,
                value: 0.3,
            },
            ControlMessage::SetParam {
                param: ReverbParam::Mix,
                value: 0.8,
            },
        ]);
        drain(&mut receiver, &mut node);
        assert_eq!(node.value(ReverbParam::Mix), 0.8);
    }

    #[cfg(feature = "rtrb")]
    #[test]
    fn test_rtrb_ring_delivers_messages() {
        let (mut producer, mut consumer) = rtrb::RingBuffer::new(8);
        let mut node = ReverbNode::with_seed(2, 0.0);

        producer
            .push(ControlMessage::SetParam {
                param: ReverbParam::Size,
                value: 0.9,
            })
            .unwrap();
        producer.push(ControlMessage::Reset).unwrap();

        drain(&mut consumer, &mut node);
        assert_eq!(node.value(ReverbParam::Size), 0.9);
        assert!(MessageReceiver::pop(&mut consumer).is_none());
    }
}
