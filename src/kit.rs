//! Drum kits: one sample reference per pad, discovered from sample storage.

use crate::config::{MAX_KITS, NAME_LEN, NUM_PADS, SAMPLE_REF_LEN};
use crate::types::{PadId, ResourceError};
use heapless::{String, Vec};

/// Reference to a sample file, as understood by the voice player.
pub type SampleRef = String<SAMPLE_REF_LEN>;

/// A named set of `NUM_PADS` samples.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Kit {
    name: String<NAME_LEN>,
    samples: Vec<SampleRef, NUM_PADS>,
}

impl Kit {
    /// Builds a kit from the first `NUM_PADS` of `samples`.
    ///
    /// # Errors
    /// * `InsufficientSamples` - fewer than `NUM_PADS` samples offered
    /// * `NameTooLong` - the name or a sample reference does not fit
    pub fn new<S: AsRef<str>>(name: &str, samples: &[S]) -> Result<Self, ResourceError> {
        if samples.len() < NUM_PADS {
            return Err(ResourceError::InsufficientSamples {
                found: samples.len(),
                required: NUM_PADS,
            });
        }

        let name = String::try_from(name).map_err(|_| ResourceError::NameTooLong)?;
        let mut refs = Vec::new();
        for sample in samples.iter().take(NUM_PADS) {
            let sample =
                SampleRef::try_from(sample.as_ref()).map_err(|_| ResourceError::NameTooLong)?;
            let _ = refs.push(sample);
        }

        Ok(Self {
            name,
            samples: refs,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Sample assigned to `pad`.
    pub fn sample(&self, pad: PadId) -> Option<&str> {
        self.samples.get(pad.0).map(|s| s.as_str())
    }

    pub fn samples(&self) -> impl Iterator<Item = &str> {
        self.samples.iter().map(|s| s.as_str())
    }
}

/// A kit directory as reported by sample storage.
#[derive(Debug, Clone, Copy)]
pub struct KitListing<'a> {
    pub name: &'a str,
    pub samples: &'a [&'a str],
}

/// Kits ordered by name.
#[derive(Debug, Clone, Default)]
pub struct KitSet {
    kits: Vec<Kit, MAX_KITS>,
}

impl KitSet {
    pub fn new() -> Self {
        Self { kits: Vec::new() }
    }

    /// Builds a kit set from storage listings.
    ///
    /// Listings that cannot form a kit are skipped and logged; discovery
    /// itself never fails.
    pub fn discover<'a, L>(listings: L) -> Self
    where
        L: IntoIterator<Item = KitListing<'a>>,
    {
        let mut set = Self::new();
        for listing in listings {
            match Kit::new(listing.name, listing.samples).and_then(|kit| set.insert(kit)) {
                Ok(_) => debug!("kit {=str} added", listing.name),
                Err(err) => warn!("kit {=str} skipped: {}", listing.name, err),
            }
        }
        info!("discovered {} kits", set.len());
        set
    }

    /// Inserts a kit in name order, replacing a kit of the same name.
    /// Returns the kit's index.
    pub fn insert(&mut self, kit: Kit) -> Result<usize, ResourceError> {
        match self.kits.binary_search_by(|k| k.name().cmp(kit.name())) {
            Ok(index) => {
                self.kits[index] = kit;
                Ok(index)
            }
            Err(index) => {
                self.kits
                    .insert(index, kit)
                    .map_err(|_| ResourceError::CapacityExceeded)?;
                Ok(index)
            }
        }
    }

    pub fn len(&self) -> usize {
        self.kits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kits.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Kit> {
        self.kits.get(index)
    }

    /// Index of the kit called `name`.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.kits.binary_search_by(|k| k.name().cmp(name)).ok()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Kit> {
        self.kits.iter()
    }
}
