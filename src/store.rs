//! Pattern store: owns the pattern and kit sets and the current selections.

use crate::kit::{Kit, KitSet};
use crate::pattern::{Pattern, PatternSet};
use crate::types::{ConfigError, PatternError};

/// Persistence collaborator for the pattern set.
pub trait PatternStorage {
    /// Reads the saved pattern set.
    fn load(&mut self) -> Result<PatternSet, ConfigError>;

    /// Writes the whole pattern set.
    fn save(&mut self, patterns: &PatternSet) -> Result<(), ConfigError>;
}

/// Storage that never holds anything. Loading always falls back to the
/// demo patterns and saving is accepted and discarded.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoStorage;

impl PatternStorage for NoStorage {
    fn load(&mut self) -> Result<PatternSet, ConfigError> {
        Err(ConfigError::Missing)
    }

    fn save(&mut self, _patterns: &PatternSet) -> Result<(), ConfigError> {
        Ok(())
    }
}

/// Moves `index` by `delta` within `0..len`, wrapping at both ends.
///
/// Returns 0 for an empty range.
pub fn wrap_index(index: usize, delta: i32, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    let len = len as i64;
    (index as i64 + delta as i64).rem_euclid(len) as usize
}

/// Pattern and kit sets plus the selected entry of each.
#[derive(Debug, Clone)]
pub struct PatternStore {
    patterns: PatternSet,
    kits: KitSet,
    pattern_index: usize,
    kit_index: usize,
}

impl PatternStore {
    /// Creates a store. An empty pattern set is replaced by the demo set.
    pub fn new(patterns: PatternSet, kits: KitSet) -> Self {
        let patterns = if patterns.is_empty() {
            warn!("empty pattern set, using demo patterns");
            PatternSet::demo()
        } else {
            patterns
        };
        Self {
            patterns,
            kits,
            pattern_index: 0,
            kit_index: 0,
        }
    }

    /// Loads patterns from `storage`, falling back to the demo patterns when
    /// the stored set is missing, corrupt or empty.
    pub fn load<S: PatternStorage>(storage: &mut S, kits: KitSet) -> Self {
        let patterns = match storage.load() {
            Ok(patterns) if !patterns.is_empty() => {
                info!("loaded {} patterns", patterns.len());
                patterns
            }
            Ok(_) => {
                warn!("pattern load failed: {}", ConfigError::Empty);
                PatternSet::demo()
            }
            Err(err) => {
                warn!("pattern load failed: {}", err);
                PatternSet::demo()
            }
        };
        Self::new(patterns, kits)
    }

    pub fn patterns(&self) -> &PatternSet {
        &self.patterns
    }

    pub fn kits(&self) -> &KitSet {
        &self.kits
    }

    pub fn pattern_index(&self) -> usize {
        self.pattern_index
    }

    pub fn kit_index(&self) -> usize {
        self.kit_index
    }

    pub fn current_pattern(&self) -> &Pattern {
        // the set is never empty and the index is kept in range
        &self.patterns[self.pattern_index]
    }

    pub fn current_pattern_mut(&mut self) -> &mut Pattern {
        &mut self.patterns[self.pattern_index]
    }

    pub fn current_kit(&self) -> Option<&Kit> {
        self.kits.get(self.kit_index)
    }

    /// Moves the pattern selection by `delta`, wrapping. Returns the new index.
    pub fn select_pattern(&mut self, delta: i32) -> usize {
        self.pattern_index = wrap_index(self.pattern_index, delta, self.patterns.len());
        self.pattern_index
    }

    /// Moves the kit selection by `delta`, wrapping. Returns the new index.
    pub fn select_kit(&mut self, delta: i32) -> usize {
        self.kit_index = wrap_index(self.kit_index, delta, self.kits.len());
        self.kit_index
    }

    /// Inserts a copy of the current pattern right after it and selects the
    /// copy. Returns the copy's index.
    pub fn duplicate_current(&mut self) -> Result<usize, PatternError> {
        let copy = self.current_pattern().duplicate();
        let index = self.pattern_index + 1;
        self.patterns.insert(index, copy)?;
        self.pattern_index = index;
        Ok(index)
    }
}
