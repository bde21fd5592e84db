use serde::{Serialize, Serializer};
use std::fmt;
use tracing::warn;

use crate::catalog::{InstrumentDefinition, Role};

/// Exact fixed-point key value in ten-thousandths.
///
/// Tie-break perturbations are decimal fractions, so keys are kept as
/// integers to make "round to one decimal place" exact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct KeyValue(i64);

impl KeyValue {
    /// Units per whole key step.
    pub const SCALE: i64 = 10_000;

    pub const fn from_whole(value: i64) -> Self {
        Self(value * Self::SCALE)
    }

    pub const fn from_units(units: i64) -> Self {
        Self(units)
    }

    pub fn as_f64(self) -> f64 {
        self.0 as f64 / Self::SCALE as f64
    }

    pub(crate) const fn offset(self, units: i64) -> Self {
        Self(self.0 + units)
    }
}

impl fmt::Display for KeyValue {
    /// Shortest decimal form with at least one fractional digit: `8.0`, `0.1`, `-0.9`, `2.05`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let scale = Self::SCALE as u64;
        let fraction = format!("{:04}", abs % scale);
        let fraction = fraction.trim_end_matches('0');
        let fraction = if fraction.is_empty() { "0" } else { fraction };
        write!(f, "{}{}.{}", sign, abs / scale, fraction)
    }
}

/// Ordering key of an instance.
///
/// `NotOrderable` sorts after every ordered key and is never compared
/// arithmetically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SortKey {
    Ordered(KeyValue),
    NotOrderable,
}

impl SortKey {
    pub fn value(self) -> Option<KeyValue> {
        match self {
            SortKey::Ordered(v) => Some(v),
            SortKey::NotOrderable => None,
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortKey::Ordered(v) => fmt::Display::fmt(v, f),
            SortKey::NotOrderable => f.write_str("n/a"),
        }
    }
}

impl Serialize for SortKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            SortKey::Ordered(v) => serializer.serialize_f64(v.as_f64()),
            SortKey::NotOrderable => serializer.serialize_str("n/a"),
        }
    }
}

/// One of the six standardized ensemble parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CanonicalPart {
    Melody,
    Harmony,
    HarmonyII,
    CounterMelody,
    CounterMelodyHarmony,
    Bass,
}

impl CanonicalPart {
    /// Canonical label sequence. Interior instances rotate through
    /// positions 1..=4; the endpoints belong to the lowest and highest keys.
    pub const SEQUENCE: [CanonicalPart; 6] = [
        CanonicalPart::Melody,
        CanonicalPart::Harmony,
        CanonicalPart::CounterMelody,
        CanonicalPart::HarmonyII,
        CanonicalPart::CounterMelodyHarmony,
        CanonicalPart::Bass,
    ];

    pub fn label(self) -> &'static str {
        match self {
            CanonicalPart::Melody => "1 Melody",
            CanonicalPart::Harmony => "2 Harmony",
            CanonicalPart::HarmonyII => "3 Harmony II",
            CanonicalPart::CounterMelody => "4 Counter Melody",
            CanonicalPart::CounterMelodyHarmony => "5 Counter Melody Harmony",
            CanonicalPart::Bass => "6 Bass",
        }
    }
}

/// Final part of an instance: a canonical label, or a fixed role's own name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssignedPart {
    Canonical(CanonicalPart),
    Fixed(Role),
}

impl AssignedPart {
    pub fn label(self) -> &'static str {
        match self {
            AssignedPart::Canonical(part) => part.label(),
            AssignedPart::Fixed(role) => role.name(),
        }
    }
}

impl fmt::Display for AssignedPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for AssignedPart {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// A single unit of a selected instrument type, e.g. "Violin 2".
#[derive(Debug, Clone, PartialEq)]
pub struct InstrumentInstance {
    label: String,
    definition: InstrumentDefinition,
    sort_key: Option<SortKey>,
    assigned_part: Option<AssignedPart>,
}

impl InstrumentInstance {
    pub fn new(instrument: &str, number: u32, definition: InstrumentDefinition) -> Self {
        Self {
            label: format!("{} {}", instrument, number),
            definition,
            sort_key: None,
            assigned_part: None,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn role(&self) -> Role {
        self.definition.role
    }

    pub fn definition(&self) -> InstrumentDefinition {
        self.definition
    }

    /// `None` until the sort-key resolver has run.
    pub fn sort_key(&self) -> Option<SortKey> {
        self.sort_key
    }

    pub fn assigned_part(&self) -> Option<AssignedPart> {
        self.assigned_part
    }

    pub(crate) fn set_sort_key(&mut self, key: SortKey) {
        self.sort_key = Some(key);
    }

    /// Stamp the final part. Returns `false` and leaves the instance
    /// untouched if a part was already assigned.
    pub(crate) fn assign(&mut self, part: AssignedPart) -> bool {
        if let Some(existing) = self.assigned_part {
            warn!(
                "Refusing to reassign {} from {} to {}",
                self.label, existing, part
            );
            return false;
        }
        self.assigned_part = Some(part);
        true
    }
}

/// Output record handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PartAssignment {
    pub label: String,
    pub sort_key: SortKey,
    pub assigned_part: AssignedPart,
}
