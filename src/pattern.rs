//! Step patterns: one boolean track per pad over a shared step count.

use crate::config::{MAX_PATTERNS, MAX_STEPS, NAME_LEN, NUM_PADS};
use crate::types::{PadId, PadSet, PatternError};
use heapless::{String, Vec};

/// Grid character for a hit.
pub const HIT: char = 'x';

/// Grid character for a rest.
pub const REST: char = '.';

/// One pad's hits across the steps of a pattern, stored as a bit set.
///
/// A track does not know its own length; the owning [`Pattern`] does, which
/// keeps every track of a pattern the same length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Track(u64);

impl Track {
    pub const EMPTY: Track = Track(0);

    pub const fn from_bits(bits: u64) -> Self {
        Track(bits)
    }

    pub const fn bits(&self) -> u64 {
        self.0
    }

    #[inline]
    pub fn hit(&self, step: usize) -> bool {
        step < MAX_STEPS && self.0 & (1u64 << step) != 0
    }

    #[inline]
    pub fn set(&mut self, step: usize, hit: bool) {
        if step >= MAX_STEPS {
            return;
        }
        if hit {
            self.0 |= 1u64 << step;
        } else {
            self.0 &= !(1u64 << step);
        }
    }

    pub fn clear(&mut self) {
        self.0 = 0;
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn hit_count(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Parses a grid row such as `"x...x..."`, returning the track and its
    /// step count.
    pub fn parse(row: &str) -> Result<(Track, usize), PatternError> {
        let mut track = Track::EMPTY;
        let mut steps = 0;
        for c in row.chars() {
            if steps == MAX_STEPS {
                return Err(PatternError::InvalidStepCount);
            }
            match c {
                'x' | 'X' => track.set(steps, true),
                '.' => {}
                _ => return Err(PatternError::InvalidCell),
            }
            steps += 1;
        }
        Ok((track, steps))
    }
}

/// A named grid of `NUM_PADS` tracks sharing one step count.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "PatternRecord", into = "PatternRecord")
)]
pub struct Pattern {
    name: String<NAME_LEN>,
    num_steps: usize,
    tracks: [Track; NUM_PADS],
}

impl Pattern {
    /// Creates an empty pattern.
    ///
    /// # Errors
    /// * `InvalidStepCount` - `num_steps` is zero or above `MAX_STEPS`
    /// * `NameTooLong` - name does not fit `NAME_LEN`
    pub fn new(name: &str, num_steps: usize) -> Result<Self, PatternError> {
        if num_steps == 0 || num_steps > MAX_STEPS {
            return Err(PatternError::InvalidStepCount);
        }
        let name = String::try_from(name).map_err(|_| PatternError::NameTooLong)?;
        Ok(Self {
            name,
            num_steps,
            tracks: [Track::EMPTY; NUM_PADS],
        })
    }

    /// Builds a pattern from one grid row per pad (`x` hit, `.` rest).
    ///
    /// # Errors
    /// * `TrackCount` - not exactly `NUM_PADS` rows
    /// * `InvalidStepCount` - rows differ in length, are empty or too long
    /// * `InvalidCell` - a row holds something other than `x` or `.`
    pub fn from_grid<S: AsRef<str>>(name: &str, rows: &[S]) -> Result<Self, PatternError> {
        if rows.len() != NUM_PADS {
            return Err(PatternError::TrackCount);
        }

        let mut tracks = [Track::EMPTY; NUM_PADS];
        let mut num_steps = None;
        for (track, row) in tracks.iter_mut().zip(rows) {
            let (parsed, steps) = Track::parse(row.as_ref())?;
            match num_steps {
                None => num_steps = Some(steps),
                Some(n) if n != steps => return Err(PatternError::InvalidStepCount),
                Some(_) => {}
            }
            *track = parsed;
        }

        let mut pattern = Self::new(name, num_steps.unwrap_or(0))?;
        pattern.tracks = tracks;
        Ok(pattern)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn num_steps(&self) -> usize {
        self.num_steps
    }

    /// Returns a pad's track, or an empty track for an unknown pad.
    pub fn track(&self, pad: PadId) -> Track {
        self.tracks.get(pad.0).copied().unwrap_or(Track::EMPTY)
    }

    /// Whether `pad` hits on `step`. Steps wrap modulo the pattern length.
    pub fn hit(&self, pad: PadId, step: usize) -> bool {
        self.track(pad).hit(step % self.num_steps)
    }

    /// Sets or clears a hit. Steps wrap modulo the pattern length.
    pub fn set_hit(&mut self, pad: PadId, step: usize, hit: bool) {
        let step = step % self.num_steps;
        if let Some(track) = self.tracks.get_mut(pad.0) {
            track.set(step, hit);
        }
    }

    /// Clears every step of one pad's track.
    pub fn erase_track(&mut self, pad: PadId) {
        if let Some(track) = self.tracks.get_mut(pad.0) {
            track.clear();
        }
    }

    /// Pads that hit on `step`.
    pub fn hits_at(&self, step: usize) -> PadSet {
        let mut hits = PadSet::EMPTY;
        for pad in PadId::all() {
            hits.set(pad, self.hit(pad, step));
        }
        hits
    }

    /// Renders one pad's track as a grid row.
    pub fn row(&self, pad: PadId) -> String<MAX_STEPS> {
        let track = self.track(pad);
        let mut row = String::new();
        for step in 0..self.num_steps {
            // capacity is MAX_STEPS and num_steps never exceeds it
            let _ = row.push(if track.hit(step) { HIT } else { REST });
        }
        row
    }

    /// A copy of this pattern whose name is marked with a trailing `+`.
    pub fn duplicate(&self) -> Pattern {
        let mut copy = self.clone();
        if copy.name.push('+').is_err() {
            copy.name.pop();
            let _ = copy.name.push('+');
        }
        copy
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct PatternRecord {
    name: String<NAME_LEN>,
    tracks: Vec<String<MAX_STEPS>, NUM_PADS>,
}

#[cfg(feature = "serde")]
impl From<Pattern> for PatternRecord {
    fn from(pattern: Pattern) -> Self {
        let mut tracks = Vec::new();
        for pad in PadId::all() {
            let _ = tracks.push(pattern.row(pad));
        }
        PatternRecord {
            name: pattern.name,
            tracks,
        }
    }
}

#[cfg(feature = "serde")]
impl TryFrom<PatternRecord> for Pattern {
    type Error = PatternError;

    fn try_from(record: PatternRecord) -> Result<Self, Self::Error> {
        Pattern::from_grid(record.name.as_str(), record.tracks.as_slice())
    }
}

/// Ordered collection of patterns.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct PatternSet {
    patterns: Vec<Pattern, MAX_PATTERNS>,
}

impl PatternSet {
    pub fn new() -> Self {
        Self {
            patterns: Vec::new(),
        }
    }

    /// Built-in patterns used when nothing has been saved.
    pub fn demo() -> Self {
        let mut set = Self::new();
        for (name, rows) in DEMO_PATTERNS {
            if let Ok(pattern) = Pattern::from_grid(name, &rows) {
                let _ = set.push(pattern);
            }
        }
        set
    }

    /// Appends a pattern and returns its index.
    pub fn push(&mut self, pattern: Pattern) -> Result<usize, PatternError> {
        self.patterns
            .push(pattern)
            .map_err(|_| PatternError::CapacityExceeded)?;
        Ok(self.patterns.len() - 1)
    }

    /// Inserts a pattern at `index`, shifting later patterns back.
    pub fn insert(&mut self, index: usize, pattern: Pattern) -> Result<(), PatternError> {
        let index = index.min(self.patterns.len());
        self.patterns
            .insert(index, pattern)
            .map_err(|_| PatternError::CapacityExceeded)
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.patterns.is_full()
    }

    pub fn get(&self, index: usize) -> Option<&Pattern> {
        self.patterns.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Pattern> {
        self.patterns.get_mut(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Pattern> {
        self.patterns.iter()
    }
}

impl core::ops::Index<usize> for PatternSet {
    type Output = Pattern;

    fn index(&self, index: usize) -> &Pattern {
        &self.patterns[index]
    }
}

impl core::ops::IndexMut<usize> for PatternSet {
    fn index_mut(&mut self, index: usize) -> &mut Pattern {
        &mut self.patterns[index]
    }
}

// pads: kick, clap, snare, cymbal, closed hat, open hat, fx, fx
const DEMO_PATTERNS: [(&str, [&str; NUM_PADS]); 4] = [
    (
        "patt0",
        [
            "x.......x.......x.......x.......",
            "................................",
            "........x...............x.......",
            "................................",
            "..x...x...x...x...x...x...x...x.",
            "................................",
            "................................",
            "................................",
        ],
    ),
    (
        "patt1",
        [
            "x.........x.....x.........x.....",
            "........x...............x.......",
            "................................",
            "x...............................",
            "x.x.x.x.x.x.x.x.x.x.x.x.x.x.x.x.",
            "..............x...............x.",
            "................................",
            "................................",
        ],
    ),
    (
        "patt2",
        [
            "x.x.....x.x.....x.x.....x.x.....",
            "................................",
            "....x.......x.......x.......x...",
            "................................",
            "x...x...x...x...x...x...x...x...",
            "......x.......x.......x.......x.",
            "...............x...............x",
            "................................",
        ],
    ),
    (
        "patt3",
        [
            "x.....x...x.....x.....x...x.....",
            "....x.......x.......x.......x...",
            "................................",
            "................................",
            "x.x.x.x.x.x.x.x.x.x.x.x.x.x.x.x.",
            "................................",
            "................................",
            ".......x.......x.......x.......x",
        ],
    ),
];
