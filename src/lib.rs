#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`Pattern`**: A named grid of one `Track` per pad, all sharing one step count
//! - **`PatternStore`**: The pattern and kit sets plus the current selections
//! - **`StepSequencer`**: Drift-compensated step clock, emits `StepEvent`s
//! - **`KeyLayout`**: Static key table routing raw events to `Command`s
//! - **`Recorder`**: Nearest-step quantization of live hits
//! - **`Transport`**: Play/stop/record/mute state machine driving a `VoicePlayer`
//! - **`Feedback`**: Renders transport state onto a `LedStrip` and a `DisplaySink`
//! - **`DrumMachine`**: The cooperative poll loop tying it all together
//! - **`TimeSource`**: Trait to implement for your timing system
//!
//! Every component is advanced by handing it the current instant, so the
//! whole machine can be driven from a mock clock in tests.

#[macro_use]
mod fmt;

// Re-export Srgb from palette for user convenience
pub use palette::Srgb;

pub mod colors;
pub mod command;
pub mod config;
pub mod feedback;
pub mod input;
pub mod kit;
pub mod machine;
pub mod pattern;
pub mod recorder;
pub mod sequencer;
pub mod store;
pub mod time;
pub mod transport;
pub mod types;

#[cfg(feature = "json")]
pub mod json;

pub use colors::Rgb8;
pub use command::{Command, KeyEvent, MidiMessage, RawEvent};
pub use config::{Config, MAX_BPM, MIN_BPM, NUM_KEYS, NUM_LEDS, NUM_PADS};
pub use feedback::{DisplayField, DisplaySink, Feedback, LedStrip};
pub use input::{KeyLayout, KeyRole};
pub use kit::{Kit, KitListing, KitSet};
pub use machine::{ControlSurface, DrumMachine};
pub use pattern::{Pattern, PatternSet, Track};
pub use recorder::{Recorder, quantize_step};
pub use sequencer::{StepSequencer, step_duration_ms};
pub use store::{NoStorage, PatternStorage, PatternStore};
pub use time::{TimeDuration, TimeInstant, TimeSource};
pub use transport::{Info, Transport, TransportState, TransportView, VoicePlayer};
pub use types::{
    ConfigError, Edge, EncoderMode, PadId, PadSet, PatternError, ResourceError, StepEvent,
};

#[cfg(feature = "json")]
pub use json::JsonFileStorage;
