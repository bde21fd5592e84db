use serde::{Deserialize, Serialize};
use std::fmt;

/// Musical role of an instrument type.
///
/// The first six variants are the orderable roles, in priority order. The
/// rest are fixed roles: their instances are assigned the role name itself
/// and never take part in numeric ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Melody,
    #[serde(rename = "Harmony I")]
    HarmonyI,
    #[serde(rename = "Harmony II")]
    HarmonyII,
    #[serde(rename = "Counter Melody")]
    CounterMelody,
    #[serde(rename = "Counter Melody Harmony")]
    CounterMelodyHarmony,
    Bass,
    Groove,
    Chords,
    #[serde(rename = "Drum Kit")]
    DrumKit,
    #[serde(rename = "Melody & Bass")]
    MelodyAndBass,
    #[serde(rename = "Melody & Chords")]
    MelodyAndChords,
    #[serde(rename = "Chords & Bass")]
    ChordsAndBass,
    #[serde(rename = "Melody & Chords & Bass")]
    MelodyChordsAndBass,
    Timpani,
    Triangle,
}

impl Role {
    /// Orderable roles in priority order (index 0 sorts first).
    pub const ORDERABLE: [Role; 6] = [
        Role::Melody,
        Role::HarmonyI,
        Role::HarmonyII,
        Role::CounterMelody,
        Role::CounterMelodyHarmony,
        Role::Bass,
    ];

    pub const FIXED: [Role; 9] = [
        Role::Groove,
        Role::Chords,
        Role::DrumKit,
        Role::MelodyAndBass,
        Role::MelodyAndChords,
        Role::ChordsAndBass,
        Role::MelodyChordsAndBass,
        Role::Timpani,
        Role::Triangle,
    ];

    /// Priority index of an orderable role, `None` for fixed roles.
    pub fn priority(self) -> Option<u8> {
        Self::ORDERABLE
            .iter()
            .position(|r| *r == self)
            .map(|i| i as u8)
    }

    pub fn is_orderable(self) -> bool {
        self.priority().is_some()
    }

    /// Display name, identical to the serialized form.
    pub fn name(self) -> &'static str {
        match self {
            Role::Melody => "Melody",
            Role::HarmonyI => "Harmony I",
            Role::HarmonyII => "Harmony II",
            Role::CounterMelody => "Counter Melody",
            Role::CounterMelodyHarmony => "Counter Melody Harmony",
            Role::Bass => "Bass",
            Role::Groove => "Groove",
            Role::Chords => "Chords",
            Role::DrumKit => "Drum Kit",
            Role::MelodyAndBass => "Melody & Bass",
            Role::MelodyAndChords => "Melody & Chords",
            Role::ChordsAndBass => "Chords & Bass",
            Role::MelodyChordsAndBass => "Melody & Chords & Bass",
            Role::Timpani => "Timpani",
            Role::Triangle => "Triangle",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Catalog metadata for one instrument type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstrumentDefinition {
    pub role: Role,
    /// Register relative to the role's reference voice; higher is higher-pitched.
    #[serde(rename = "octave")]
    pub octave_offset: i32,
}

impl InstrumentDefinition {
    pub const fn new(role: Role, octave_offset: i32) -> Self {
        Self {
            role,
            octave_offset,
        }
    }
}

/// Named catalog entry, also the shape of `[[instruments]]` config tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub name: String,
    pub role: Role,
    #[serde(rename = "octave", default)]
    pub octave_offset: i32,
}

impl CatalogEntry {
    pub fn new(name: impl Into<String>, role: Role, octave_offset: i32) -> Self {
        Self {
            name: name.into(),
            role,
            octave_offset,
        }
    }

    pub fn definition(&self) -> InstrumentDefinition {
        InstrumentDefinition::new(self.role, self.octave_offset)
    }
}
