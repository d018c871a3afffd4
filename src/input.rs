//! Input router: maps raw key, encoder and MIDI events to commands.
//!
//! The router holds no state. Changing the key layout never touches the
//! sequencing logic.

use crate::command::{Command, KeyEvent, MidiMessage, RawEvent};
use crate::config::{NUM_KEYS, NUM_PADS};
use crate::types::{Edge, PadId};

/// Role of a physical key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KeyRole {
    Play,
    Record,
    Mute,
    Tap,
    Pad(PadId),
    /// Key with no function.
    Unassigned,
}

/// Static key-number to role table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyLayout {
    roles: [KeyRole; NUM_KEYS],
}

impl KeyLayout {
    /// Keys to the right of the encoder, board rotated so the top row
    /// (keys 2, 5, 8, 11) runs along the encoder:
    ///
    /// ```text
    ///  encoder | play | rec  | mute | tap
    ///          |  4   |  5   |  6   |  7
    ///          |  0   |  1   |  2   |  3
    /// ```
    pub const MACROPAD: KeyLayout = KeyLayout {
        roles: [
            KeyRole::Pad(PadId(0)),
            KeyRole::Pad(PadId(4)),
            KeyRole::Play,
            KeyRole::Pad(PadId(1)),
            KeyRole::Pad(PadId(5)),
            KeyRole::Record,
            KeyRole::Pad(PadId(2)),
            KeyRole::Pad(PadId(6)),
            KeyRole::Mute,
            KeyRole::Pad(PadId(3)),
            KeyRole::Pad(PadId(7)),
            KeyRole::Tap,
        ],
    };

    pub const fn new(roles: [KeyRole; NUM_KEYS]) -> Self {
        Self { roles }
    }

    /// Role of `key`; keys beyond the table are unassigned.
    pub fn role(&self, key: u8) -> KeyRole {
        self.roles
            .get(key as usize)
            .copied()
            .unwrap_or(KeyRole::Unassigned)
    }

    /// Key (and LED) index carrying `role`.
    pub fn key_for(&self, role: KeyRole) -> Option<usize> {
        self.roles.iter().position(|r| *r == role)
    }

    pub fn key_for_pad(&self, pad: PadId) -> Option<usize> {
        self.key_for(KeyRole::Pad(pad))
    }

    /// Routes any raw event.
    pub fn route(&self, event: RawEvent) -> Option<Command> {
        match event {
            RawEvent::Key(key) => self.route_key(key),
            RawEvent::EncoderPush(edge) => Some(Command::EncoderPush(edge)),
            RawEvent::EncoderTurn(0) => None,
            RawEvent::EncoderTurn(delta) => Some(Command::EncoderTurn(delta)),
            RawEvent::Midi(msg) => Some(route_midi(msg)),
        }
    }

    pub fn route_key(&self, event: KeyEvent) -> Option<Command> {
        let edge = event.edge;
        match self.role(event.key) {
            KeyRole::Play => Some(Command::Play(edge)),
            KeyRole::Record => Some(Command::Record(edge)),
            KeyRole::Mute => Some(Command::Mute(edge)),
            KeyRole::Tap => Some(Command::Tap(edge)),
            KeyRole::Pad(pad) => Some(Command::Pad(pad, edge)),
            KeyRole::Unassigned => None,
        }
    }
}

impl Default for KeyLayout {
    fn default() -> Self {
        Self::MACROPAD
    }
}

/// Maps a MIDI note to a pad by `note % NUM_PADS`. Notes an octave (or any
/// multiple of `NUM_PADS`) apart land on the same pad.
pub fn note_to_pad(note: u8) -> PadId {
    PadId(note as usize % NUM_PADS)
}

/// Note-on with velocity 0 is a note-off.
pub fn route_midi(msg: MidiMessage) -> Command {
    match msg {
        MidiMessage::NoteOn { note, velocity } if velocity > 0 => {
            Command::Note(note_to_pad(note), Edge::Pressed)
        }
        MidiMessage::NoteOn { note, .. } | MidiMessage::NoteOff { note } => {
            Command::Note(note_to_pad(note), Edge::Released)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn macropad_layout_has_every_pad_once() {
        let layout = KeyLayout::MACROPAD;
        for pad in PadId::all() {
            let key = layout.key_for_pad(pad).unwrap();
            assert_eq!(layout.role(key as u8), KeyRole::Pad(pad));
        }
    }

    #[test]
    fn zero_encoder_turn_is_dropped() {
        assert_eq!(KeyLayout::MACROPAD.route(RawEvent::EncoderTurn(0)), None);
    }
}
