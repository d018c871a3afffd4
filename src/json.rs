//! Pattern persistence as a JSON file on a host filesystem.
//!
//! The file holds a list of patterns, each with its name and one grid row
//! per pad:
//!
//! ```json
//! [{ "name": "patt0", "tracks": ["x.......x.......", "........x......."] }]
//! ```

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::pattern::PatternSet;
use crate::store::PatternStorage;
use crate::types::ConfigError;

/// [`PatternStorage`] backed by a single JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PatternStorage for JsonFileStorage {
    fn load(&mut self) -> Result<PatternSet, ConfigError> {
        let text = fs::read_to_string(&self.path).map_err(|err| match err.kind() {
            ErrorKind::NotFound => ConfigError::Missing,
            _ => ConfigError::Corrupt,
        })?;
        let patterns: PatternSet =
            serde_json::from_str(&text).map_err(|_| ConfigError::Corrupt)?;
        if patterns.is_empty() {
            return Err(ConfigError::Empty);
        }
        Ok(patterns)
    }

    fn save(&mut self, patterns: &PatternSet) -> Result<(), ConfigError> {
        let text = serde_json::to_string_pretty(patterns).map_err(|_| ConfigError::WriteFailed)?;
        fs::write(&self.path, text).map_err(|_| ConfigError::WriteFailed)
    }
}
