//! Instrument catalog - instrument type name to role and octave offset.
//!
//! The built-in catalog is a lazily initialised static. A configured catalog
//! is derived from it with [`Catalog::with_overrides`] and is never mutated
//! afterwards.

mod types;

pub use types::*;

use once_cell::sync::Lazy;
use tracing::debug;

static BUILTIN: Lazy<Catalog> = Lazy::new(|| {
    Catalog::from_entries(vec![
        CatalogEntry::new("Violin", Role::Melody, 1),
        CatalogEntry::new("Viola", Role::HarmonyII, 0),
        CatalogEntry::new("Cello", Role::CounterMelody, -1),
        CatalogEntry::new("Double Bass", Role::Bass, -2),
        CatalogEntry::new("Piccolo", Role::Melody, 2),
        CatalogEntry::new("Flute", Role::Melody, 1),
        CatalogEntry::new("Bb Clarinet", Role::HarmonyI, 1),
        CatalogEntry::new("Oboe", Role::HarmonyII, 1),
        CatalogEntry::new("Bassoon", Role::CounterMelody, -1),
        CatalogEntry::new("Drum Kit", Role::DrumKit, 0),
        CatalogEntry::new("Timpani", Role::Timpani, 0),
        CatalogEntry::new("Triangle", Role::Triangle, 0),
        CatalogEntry::new("Piano", Role::MelodyChordsAndBass, 0),
        CatalogEntry::new("Guitar", Role::Chords, 0),
        CatalogEntry::new("Shaker", Role::Groove, 0),
    ])
});

/// Ordered instrument lookup table.
///
/// Entry order is significant: instances are expanded in catalog order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    /// Build a catalog from entries. A later entry with an existing name
    /// replaces the earlier definition in place.
    pub fn from_entries(entries: impl IntoIterator<Item = CatalogEntry>) -> Self {
        let mut catalog = Self {
            entries: Vec::new(),
        };
        for entry in entries {
            catalog.upsert(entry);
        }
        catalog
    }

    /// The built-in instrument table.
    pub fn builtin() -> &'static Catalog {
        &BUILTIN
    }

    /// Copy of this catalog with configured instruments merged in.
    pub fn with_overrides(&self, overrides: &[CatalogEntry]) -> Catalog {
        let mut catalog = self.clone();
        for entry in overrides {
            debug!(
                "Catalog override: {} -> {} (octave {})",
                entry.name, entry.role, entry.octave_offset
            );
            catalog.upsert(entry.clone());
        }
        catalog
    }

    pub fn get(&self, name: &str) -> Option<InstrumentDefinition> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .map(CatalogEntry::definition)
    }

    /// Position of an instrument in catalog order.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.name == name)
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn upsert(&mut self, entry: CatalogEntry) {
        match self.entries.iter_mut().find(|e| e.name == entry.name) {
            Some(existing) => *existing = entry,
            None => self.entries.push(entry),
        }
    }
}
