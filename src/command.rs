//! Raw input events and the semantic commands they are routed to.

use crate::types::{Edge, PadId};

/// A key changed state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyEvent {
    /// Physical key number, `0..NUM_KEYS`.
    pub key: u8,
    pub edge: Edge,
}

impl KeyEvent {
    pub fn pressed(key: u8) -> Self {
        Self {
            key,
            edge: Edge::Pressed,
        }
    }

    pub fn released(key: u8) -> Self {
        Self {
            key,
            edge: Edge::Released,
        }
    }
}

/// Decoded MIDI channel message. Everything but note on/off is dropped by
/// the transport decoder before it reaches the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MidiMessage {
    NoteOn { note: u8, velocity: u8 },
    NoteOff { note: u8 },
}

/// Raw events from the control surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RawEvent {
    Key(KeyEvent),
    EncoderPush(Edge),
    EncoderTurn(i32),
    Midi(MidiMessage),
}

/// Semantic commands consumed by the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Play/stop key.
    Play(Edge),
    /// Record key.
    Record(Edge),
    /// Mute key.
    Mute(Edge),
    /// Tap key.
    Tap(Edge),
    /// Drum pad key.
    Pad(PadId, Edge),
    /// Pad triggered over MIDI.
    Note(PadId, Edge),
    /// Encoder button.
    EncoderPush(Edge),
    /// Encoder turned by a number of detents.
    EncoderTurn(i32),
}
