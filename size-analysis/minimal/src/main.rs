#![no_std]
#![no_main]

use cortex_m_rt::entry;
use drum_sequencer::{
    Config, ControlSurface, DisplayField, DisplaySink, DrumMachine, Edge, Feedback, KeyEvent,
    KeyLayout, KitListing, KitSet, LedStrip, MidiMessage, NoStorage, PadId, PatternStore,
    TimeDuration, TimeInstant, TimeSource, Transport, VoicePlayer,
};
use palette::Srgb;
use panic_halt as _;

// ============================================================================
// Minimal Time Types
// ============================================================================

/// Minimal 32-bit millisecond duration
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Duration32(u32);

impl TimeDuration for Duration32 {
    const ZERO: Self = Duration32(0);

    fn as_millis(&self) -> u64 {
        self.0 as u64
    }

    fn from_millis(millis: u64) -> Self {
        Duration32(millis as u32)
    }
}

/// Minimal 32-bit millisecond instant
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Instant32(u32);

impl TimeInstant for Instant32 {
    type Duration = Duration32;

    fn duration_since(&self, earlier: Self) -> Self::Duration {
        Duration32(self.0.wrapping_sub(earlier.0))
    }

    fn checked_sub(self, duration: Self::Duration) -> Option<Self> {
        self.0.checked_sub(duration.0).map(Instant32)
    }
}

pub struct MinimalTimeSource;

impl TimeSource<Instant32> for MinimalTimeSource {
    fn now(&self) -> Instant32 {
        Instant32(core::hint::black_box(0))
    }
}

// ============================================================================
// Zero-size Collaborators
// ============================================================================

/// Zero-size implementations for measuring library overhead
pub struct MinimalVoices;

impl VoicePlayer for MinimalVoices {
    fn play(&mut self, pad: PadId, sample: &str) {
        core::hint::black_box((pad, sample));
    }

    fn stop(&mut self, pad: PadId) {
        core::hint::black_box(pad);
    }
}

pub struct MinimalLeds;

impl LedStrip for MinimalLeds {
    fn set(&mut self, index: usize, color: Srgb<u8>) {
        core::hint::black_box((index, color));
    }

    fn show(&mut self) {
        core::hint::black_box(());
    }
}

pub struct MinimalDisplay;

impl DisplaySink for MinimalDisplay {
    fn set_field(&mut self, field: DisplayField, text: &str) {
        core::hint::black_box((field, text));
    }
}

pub struct MinimalControls;

impl ControlSurface for MinimalControls {
    fn poll_midi(&mut self) -> Option<MidiMessage> {
        core::hint::black_box(None)
    }

    fn poll_key(&mut self) -> Option<KeyEvent> {
        core::hint::black_box(Some(KeyEvent {
            key: 2,
            edge: Edge::Pressed,
        }))
    }

    fn poll_encoder_push(&mut self) -> Option<Edge> {
        core::hint::black_box(None)
    }

    fn encoder_position(&mut self) -> i32 {
        core::hint::black_box(0)
    }
}

const SAMPLES: [&str; 8] = [
    "kick.wav",
    "clap.wav",
    "snare.wav",
    "cymbal.wav",
    "hatc.wav",
    "hato.wav",
    "fx1.wav",
    "fx2.wav",
];

#[entry]
fn main() -> ! {
    let time = MinimalTimeSource;
    let config = Config::default();
    let now = time.now();

    let kits = KitSet::discover([KitListing {
        name: "kit",
        samples: &SAMPLES,
    }]);
    let store = PatternStore::load(&mut NoStorage, kits);
    let transport = Transport::new(config, store, MinimalVoices, NoStorage, now);
    let feedback = Feedback::new(&config, KeyLayout::MACROPAD, MinimalLeds, MinimalDisplay, now);

    let mut machine = DrumMachine::new(&time, MinimalControls, transport, feedback);

    // Never returns - this is a size analysis binary, not meant to run
    machine.run()
}
