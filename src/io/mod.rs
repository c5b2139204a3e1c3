// Purpose - external interfaces: MIDI controller mapping

use crate::control::ControlMessage;
use crate::graph::reverb::ReverbParam;

/// General-purpose controller 1, the conventional reverb send depth.
pub const REVERB_SEND_CC: u8 = 91;

#[derive(Debug, Clone, Copy)]
pub enum MidiEvent {
    ControlChange { channel: u8, controller: u8, value: u8 },
}

/// Translate a MIDI event on `channel_filter` into a control message.
///
/// The reverb send controller maps its 7-bit value onto the wet mix as
/// `value / 127`; everything else is ignored.
pub fn midi_to_control(midi: MidiEvent, channel_filter: u8) -> Option<ControlMessage> {
    match midi {
        MidiEvent::ControlChange {
            channel,
            controller,
            value,
        } if channel == channel_filter && controller == REVERB_SEND_CC => {
            Some(ControlMessage::SetParam {
                param: ReverbParam::Mix,
                value: value as f32 / 127.0,
            })
        }
        _ => None,
    }
}
