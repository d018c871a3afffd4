//! Core value types and error enums shared across the machine.

use crate::config::NUM_PADS;

/// Index of a drum pad, `0..NUM_PADS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PadId(pub usize);

impl From<usize> for PadId {
    fn from(id: usize) -> Self {
        PadId(id)
    }
}

impl From<PadId> for usize {
    fn from(id: PadId) -> Self {
        id.0
    }
}

impl PadId {
    /// Iterates every pad in order.
    pub fn all() -> impl Iterator<Item = PadId> {
        (0..NUM_PADS).map(PadId)
    }
}

/// A fixed-size set of pads backed by a bit mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PadSet(u16);

impl PadSet {
    pub const EMPTY: PadSet = PadSet(0);

    #[inline]
    pub fn contains(&self, pad: PadId) -> bool {
        pad.0 < NUM_PADS && self.0 & (1 << pad.0) != 0
    }

    #[inline]
    pub fn insert(&mut self, pad: PadId) {
        if pad.0 < NUM_PADS {
            self.0 |= 1 << pad.0;
        }
    }

    #[inline]
    pub fn remove(&mut self, pad: PadId) {
        if pad.0 < NUM_PADS {
            self.0 &= !(1 << pad.0);
        }
    }

    /// Sets membership of `pad` to `member`.
    #[inline]
    pub fn set(&mut self, pad: PadId, member: bool) {
        if member {
            self.insert(pad);
        } else {
            self.remove(pad);
        }
    }

    /// Flips membership and returns the new state.
    pub fn toggle(&mut self, pad: PadId) -> bool {
        let member = !self.contains(pad);
        self.set(pad, member);
        member
    }

    pub fn clear(&mut self) {
        self.0 = 0;
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Iterates member pads in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = PadId> + '_ {
        PadId::all().filter(move |pad| self.contains(*pad))
    }
}

/// Press or release edge of a key or button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Edge {
    Pressed,
    Released,
}

impl Edge {
    #[inline]
    pub fn is_pressed(self) -> bool {
        self == Edge::Pressed
    }
}

/// What turning the encoder adjusts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EncoderMode {
    #[default]
    Pattern,
    Kit,
    Bpm,
}

impl EncoderMode {
    /// The next mode in the cycle.
    pub fn next(self) -> Self {
        match self {
            EncoderMode::Pattern => EncoderMode::Kit,
            EncoderMode::Kit => EncoderMode::Bpm,
            EncoderMode::Bpm => EncoderMode::Pattern,
        }
    }

    /// Short label for the display.
    pub fn label(self) -> &'static str {
        match self {
            EncoderMode::Pattern => "patt",
            EncoderMode::Kit => "kit",
            EncoderMode::Bpm => "bpm",
        }
    }
}

/// Reported by the step clock when a step's time has arrived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StepEvent {
    /// Index of the step that fired.
    pub position: usize,
}

/// Problems with persisted pattern data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Nothing has been saved yet.
    Missing,

    /// Stored data could not be parsed.
    Corrupt,

    /// Stored pattern set holds no patterns.
    Empty,

    /// Writing the pattern set failed.
    WriteFailed,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::Missing => write!(f, "no saved pattern set"),
            ConfigError::Corrupt => write!(f, "saved pattern set is corrupt"),
            ConfigError::Empty => write!(f, "saved pattern set has no patterns"),
            ConfigError::WriteFailed => write!(f, "pattern set could not be written"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

/// Problems with sample resources found during kit discovery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ResourceError {
    /// Kit offers fewer samples than there are pads.
    InsufficientSamples { found: usize, required: usize },

    /// Kit name or a sample reference does not fit its buffer.
    NameTooLong,

    /// Kit set is full.
    CapacityExceeded,
}

impl core::fmt::Display for ResourceError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ResourceError::InsufficientSamples { found, required } => {
                write!(f, "kit has {} samples, {} required", found, required)
            }
            ResourceError::NameTooLong => write!(f, "kit name or sample path too long"),
            ResourceError::CapacityExceeded => write!(f, "kit set capacity exceeded"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ResourceError {}

/// Pattern construction errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PatternError {
    /// Step count is zero, above `MAX_STEPS`, or differs between tracks.
    InvalidStepCount,

    /// A grid cell is neither a hit nor a rest.
    InvalidCell,

    /// Number of tracks differs from `NUM_PADS`.
    TrackCount,

    /// Name does not fit `NAME_LEN`.
    NameTooLong,

    /// Pattern set is full.
    CapacityExceeded,
}

impl core::fmt::Display for PatternError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            PatternError::InvalidStepCount => write!(f, "invalid or mismatched step count"),
            PatternError::InvalidCell => write!(f, "grid cell must be 'x' or '.'"),
            PatternError::TrackCount => write!(f, "pattern must have one track per pad"),
            PatternError::NameTooLong => write!(f, "pattern name too long"),
            PatternError::CapacityExceeded => write!(f, "pattern set capacity exceeded"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for PatternError {}
