//! Shared test infrastructure for drum-sequencer integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use drum_sequencer::{
    Config, ConfigError, ControlSurface, DisplayField, DisplaySink, DrumMachine, Edge, Feedback,
    KeyEvent, KeyLayout, Kit, KitListing, KitSet, LedStrip, MidiMessage, NUM_LEDS, PadId,
    PatternSet, PatternStorage, PatternStore, Rgb8, TimeDuration, TimeInstant, TimeSource,
    Transport, VoicePlayer,
};

// ============================================================================
// Mock Time Types
// ============================================================================

/// Mock duration type for testing (wraps milliseconds)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TestDuration(pub u64);

impl TimeDuration for TestDuration {
    const ZERO: Self = TestDuration(0);

    fn as_millis(&self) -> u64 {
        self.0
    }

    fn from_millis(millis: u64) -> Self {
        TestDuration(millis)
    }
}

/// Mock instant type for testing
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TestInstant(pub u64);

impl TimeInstant for TestInstant {
    type Duration = TestDuration;

    fn duration_since(&self, earlier: Self) -> Self::Duration {
        TestDuration(self.0 - earlier.0)
    }

    fn checked_sub(self, duration: Self::Duration) -> Option<Self> {
        self.0.checked_sub(duration.0).map(TestInstant)
    }
}

// ============================================================================
// Mock Time Source
// ============================================================================

/// Mock time source with controllable time advancement
pub struct MockTimeSource {
    current_time: core::cell::Cell<TestInstant>,
}

impl MockTimeSource {
    /// Starts at 1 s.
    pub fn new() -> Self {
        Self {
            current_time: core::cell::Cell::new(TestInstant(1000)),
        }
    }

    /// Advance time by the given number of milliseconds
    pub fn advance(&self, millis: u64) {
        let current = self.current_time.get();
        self.current_time.set(TestInstant(current.0 + millis));
    }

    pub fn set_time(&self, time: TestInstant) {
        self.current_time.set(time);
    }
}

impl TimeSource<TestInstant> for MockTimeSource {
    fn now(&self) -> TestInstant {
        self.current_time.get()
    }
}

// ============================================================================
// Mock Voices
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoiceCall {
    Play(PadId, String),
    Stop(PadId),
    LoadKit(String),
}

/// Voice player that records every call
#[derive(Debug, Default)]
pub struct MockVoices {
    pub calls: Vec<VoiceCall>,
}

impl MockVoices {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pads played, in order
    pub fn played(&self) -> Vec<PadId> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                VoiceCall::Play(pad, _) => Some(*pad),
                _ => None,
            })
            .collect()
    }

    pub fn stops(&self) -> usize {
        self.calls
            .iter()
            .filter(|call| matches!(call, VoiceCall::Stop(_)))
            .count()
    }

    pub fn loaded_kits(&self) -> Vec<String> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                VoiceCall::LoadKit(name) => Some(name.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }
}

impl VoicePlayer for MockVoices {
    fn play(&mut self, pad: PadId, sample: &str) {
        self.calls.push(VoiceCall::Play(pad, sample.into()));
    }

    fn stop(&mut self, pad: PadId) {
        self.calls.push(VoiceCall::Stop(pad));
    }

    fn load_kit(&mut self, kit: &Kit) {
        self.calls.push(VoiceCall::LoadKit(kit.name().into()));
    }
}

// ============================================================================
// Mock Storage
// ============================================================================

/// In-memory pattern storage with a shared save log
#[derive(Debug, Default, Clone)]
pub struct MockStorage {
    pub stored: Option<PatternSet>,
    pub load_error: Option<ConfigError>,
    pub fail_saves: bool,
    pub saves: Rc<RefCell<Vec<PatternSet>>>,
}

impl MockStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_patterns(patterns: PatternSet) -> Self {
        Self {
            stored: Some(patterns),
            ..Self::default()
        }
    }

    pub fn failing(error: ConfigError) -> Self {
        Self {
            load_error: Some(error),
            ..Self::default()
        }
    }

    pub fn save_count(&self) -> usize {
        self.saves.borrow().len()
    }
}

impl PatternStorage for MockStorage {
    fn load(&mut self) -> Result<PatternSet, ConfigError> {
        if let Some(err) = self.load_error {
            return Err(err);
        }
        self.stored.clone().ok_or(ConfigError::Missing)
    }

    fn save(&mut self, patterns: &PatternSet) -> Result<(), ConfigError> {
        if self.fail_saves {
            return Err(ConfigError::WriteFailed);
        }
        self.saves.borrow_mut().push(patterns.clone());
        self.stored = Some(patterns.clone());
        Ok(())
    }
}

// ============================================================================
// Mock LEDs and Display
// ============================================================================

/// LED strip keeping the staged and the last shown frame
pub struct MockLeds {
    pub staged: [Rgb8; NUM_LEDS],
    pub shown: [Rgb8; NUM_LEDS],
    pub show_count: usize,
}

impl MockLeds {
    pub fn new() -> Self {
        Self {
            staged: [Rgb8::new(0, 0, 0); NUM_LEDS],
            shown: [Rgb8::new(0, 0, 0); NUM_LEDS],
            show_count: 0,
        }
    }
}

impl LedStrip for MockLeds {
    fn set(&mut self, index: usize, color: Rgb8) {
        self.staged[index] = color;
    }

    fn show(&mut self) {
        self.shown = self.staged;
        self.show_count += 1;
    }
}

/// Display recording every field update
#[derive(Debug, Default)]
pub struct MockDisplay {
    pub updates: Vec<(DisplayField, String)>,
}

impl MockDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Latest text of `field`
    pub fn field(&self, field: DisplayField) -> Option<&str> {
        self.updates
            .iter()
            .rev()
            .find(|(f, _)| *f == field)
            .map(|(_, text)| text.as_str())
    }

    pub fn count(&self, field: DisplayField) -> usize {
        self.updates.iter().filter(|(f, _)| *f == field).count()
    }
}

impl DisplaySink for MockDisplay {
    fn set_field(&mut self, field: DisplayField, text: &str) {
        self.updates.push((field, text.into()));
    }
}

// ============================================================================
// Mock Controls
// ============================================================================

/// Scripted control surface
#[derive(Debug, Default)]
pub struct MockControls {
    pub midi: VecDeque<MidiMessage>,
    pub keys: VecDeque<KeyEvent>,
    pub pushes: VecDeque<Edge>,
    pub encoder: i32,
}

impl MockControls {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ControlSurface for MockControls {
    fn poll_midi(&mut self) -> Option<MidiMessage> {
        self.midi.pop_front()
    }

    fn poll_key(&mut self) -> Option<KeyEvent> {
        self.keys.pop_front()
    }

    fn poll_encoder_push(&mut self) -> Option<Edge> {
        self.pushes.pop_front()
    }

    fn encoder_position(&mut self) -> i32 {
        self.encoder
    }
}

// ============================================================================
// Test Helper Functions
// ============================================================================

pub const SAMPLES: [&str; 8] = [
    "kick.wav",
    "clap.wav",
    "snare.wav",
    "cymbal.wav",
    "hatc.wav",
    "hato.wav",
    "fx1.wav",
    "fx2.wav",
];

/// Two complete kits, listed out of name order
pub fn test_kits() -> KitSet {
    KitSet::discover([
        KitListing {
            name: "909",
            samples: &SAMPLES,
        },
        KitListing {
            name: "808",
            samples: &SAMPLES,
        },
    ])
}

pub type TestTransport = Transport<TestInstant, MockVoices, MockStorage>;

/// Stopped transport over the demo patterns and the test kits
pub fn test_transport(now: TestInstant) -> TestTransport {
    let store = PatternStore::new(PatternSet::demo(), test_kits());
    Transport::new(
        Config::default(),
        store,
        MockVoices::new(),
        MockStorage::new(),
        now,
    )
}

/// Transport over an empty 16-step pattern
pub fn blank_transport(now: TestInstant) -> TestTransport {
    let mut patterns = PatternSet::new();
    patterns
        .push(drum_sequencer::Pattern::new("blank", 16).unwrap())
        .unwrap();
    let store = PatternStore::new(patterns, test_kits());
    Transport::new(
        Config::default(),
        store,
        MockVoices::new(),
        MockStorage::new(),
        now,
    )
}

pub type TestMachine<'t> = DrumMachine<
    't,
    TestInstant,
    MockTimeSource,
    MockControls,
    MockVoices,
    MockStorage,
    MockLeds,
    MockDisplay,
>;

pub fn test_machine(time: &MockTimeSource, transport: TestTransport) -> TestMachine<'_> {
    let config = Config::default();
    let feedback = Feedback::new(
        &config,
        KeyLayout::MACROPAD,
        MockLeds::new(),
        MockDisplay::new(),
        time.now(),
    );
    DrumMachine::new(time, MockControls::new(), transport, feedback)
}

pub const PLAY_KEY: u8 = 2;
pub const RECORD_KEY: u8 = 5;
pub const MUTE_KEY: u8 = 8;
pub const TAP_KEY: u8 = 11;
