//! Capacities and runtime tunables.

/// Number of drum pads (and tracks per pattern).
pub const NUM_PADS: usize = 8;

/// Number of physical keys on the surface.
pub const NUM_KEYS: usize = 12;

/// One addressable LED sits under each key.
pub const NUM_LEDS: usize = NUM_KEYS;

/// Longest pattern, in steps. Tracks are stored as a `u64` bit set.
pub const MAX_STEPS: usize = 64;

/// Pattern set capacity.
pub const MAX_PATTERNS: usize = 16;

/// Kit set capacity.
pub const MAX_KITS: usize = 8;

/// Maximum length of pattern and kit names.
pub const NAME_LEN: usize = 16;

/// Maximum length of a sample reference (file path).
pub const SAMPLE_REF_LEN: usize = 48;

pub const MIN_BPM: u16 = 1;
pub const MAX_BPM: u16 = 300;

/// Runtime tunables for the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    /// Tempo at startup.
    pub bpm: u16,

    /// Steps per beat: 4 = 16th notes, 8 = 32nd notes.
    pub steps_per_beat: u16,

    /// Encoder push held at least this long enters edit-hold.
    pub hold_threshold_ms: u64,

    /// Interval between LED refreshes.
    pub led_interval_ms: u64,

    /// Per-channel brightness removed on every LED refresh.
    pub led_decay: u8,

    /// Brightness below which LEDs do not decay.
    pub led_floor: u8,

    /// Minimum time between two pattern saves.
    pub save_interval_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bpm: 120,
            steps_per_beat: 4,
            hold_threshold_ms: 500,
            led_interval_ms: 10,
            led_decay: 5,
            led_floor: 0,
            save_interval_ms: 1000,
        }
    }
}
