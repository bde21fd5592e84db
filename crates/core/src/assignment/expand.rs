//! Selection validation and instance expansion.
//!
//! Raw counts arrive from whatever collects user input (form fields, CLI
//! arguments, JSON documents) through [`CountSource`]. They are validated
//! into a [`Selection`] before anything is expanded.

use std::collections::{BTreeMap, HashMap, HashSet};

use serde_json::Value;
use tracing::debug;

use crate::catalog::Catalog;
use crate::config::{LimitsConfig, MAX_INSTANCES_LIMIT};

use super::error::AssignmentError;
use super::types::InstrumentInstance;

/// An unvalidated count as supplied by the input collaborator.
#[derive(Debug, Clone, PartialEq)]
pub enum RawCount {
    Integer(i64),
    /// Text from a form field or command line. Blank text counts as zero.
    Text(String),
    Json(Value),
}

impl RawCount {
    /// Validate into a non-negative whole count.
    pub fn validate(&self, instrument: &str) -> Result<u32, AssignmentError> {
        match self {
            RawCount::Integer(n) => validate_integer(instrument, *n),
            RawCount::Text(text) => validate_text(instrument, text),
            RawCount::Json(value) => validate_json(instrument, value),
        }
    }
}

fn validate_integer(instrument: &str, n: i64) -> Result<u32, AssignmentError> {
    if n < 0 {
        return Err(AssignmentError::invalid_input(
            instrument,
            format!("count cannot be negative (got {})", n),
        ));
    }
    u32::try_from(n).map_err(|_| {
        AssignmentError::invalid_input(instrument, format!("count {} is too large", n))
    })
}

fn validate_float(instrument: &str, f: f64, shown: &str) -> Result<u32, AssignmentError> {
    if !f.is_finite() || f.fract() != 0.0 {
        return Err(AssignmentError::invalid_input(
            instrument,
            format!("count must be a whole number (got {})", shown),
        ));
    }
    if f < i64::MIN as f64 || f > i64::MAX as f64 {
        return Err(AssignmentError::invalid_input(
            instrument,
            format!("count {} is too large", shown),
        ));
    }
    validate_integer(instrument, f as i64)
}

fn validate_text(instrument: &str, text: &str) -> Result<u32, AssignmentError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(0);
    }
    if let Ok(n) = trimmed.parse::<i64>() {
        return validate_integer(instrument, n);
    }
    match trimmed.parse::<f64>() {
        Ok(f) => validate_float(instrument, f, trimmed),
        Err(_) => Err(AssignmentError::invalid_input(
            instrument,
            format!("count must be a whole number (got {:?})", trimmed),
        )),
    }
}

fn validate_json(instrument: &str, value: &Value) -> Result<u32, AssignmentError> {
    match value {
        Value::Null => Ok(0),
        Value::Number(number) => {
            if let Some(n) = number.as_i64() {
                validate_integer(instrument, n)
            } else if number.is_u64() {
                Err(AssignmentError::invalid_input(
                    instrument,
                    format!("count {} is too large", number),
                ))
            } else {
                let f = number.as_f64().unwrap_or(f64::NAN);
                validate_float(instrument, f, &number.to_string())
            }
        }
        Value::String(text) => validate_text(instrument, text),
        other => Err(AssignmentError::invalid_input(
            instrument,
            format!("expected a number, got {}", other),
        )),
    }
}

impl From<i64> for RawCount {
    fn from(n: i64) -> Self {
        RawCount::Integer(n)
    }
}

impl From<u32> for RawCount {
    fn from(n: u32) -> Self {
        RawCount::Integer(i64::from(n))
    }
}

impl From<&str> for RawCount {
    fn from(text: &str) -> Self {
        RawCount::Text(text.to_string())
    }
}

impl From<String> for RawCount {
    fn from(text: String) -> Self {
        RawCount::Text(text)
    }
}

impl From<Value> for RawCount {
    fn from(value: Value) -> Self {
        RawCount::Json(value)
    }
}

impl From<&Value> for RawCount {
    fn from(value: &Value) -> Self {
        RawCount::Json(value.clone())
    }
}

/// Narrow input-collection interface.
///
/// Implementors hand over `(instrument, raw count)` pairs without any
/// validation; order is irrelevant because expansion follows catalog order.
pub trait CountSource {
    fn raw_counts(&self) -> Vec<(String, RawCount)>;
}

impl<K, V> CountSource for [(K, V)]
where
    K: AsRef<str>,
    V: Clone + Into<RawCount>,
{
    fn raw_counts(&self) -> Vec<(String, RawCount)> {
        self.iter()
            .map(|(k, v)| (k.as_ref().to_string(), v.clone().into()))
            .collect()
    }
}

impl<K, V> CountSource for Vec<(K, V)>
where
    K: AsRef<str>,
    V: Clone + Into<RawCount>,
{
    fn raw_counts(&self) -> Vec<(String, RawCount)> {
        self.as_slice().raw_counts()
    }
}

impl<K, V> CountSource for BTreeMap<K, V>
where
    K: AsRef<str>,
    V: Clone + Into<RawCount>,
{
    fn raw_counts(&self) -> Vec<(String, RawCount)> {
        self.iter()
            .map(|(k, v)| (k.as_ref().to_string(), v.clone().into()))
            .collect()
    }
}

impl<K, V, S> CountSource for HashMap<K, V, S>
where
    K: AsRef<str>,
    V: Clone + Into<RawCount>,
{
    fn raw_counts(&self) -> Vec<(String, RawCount)> {
        self.iter()
            .map(|(k, v)| (k.as_ref().to_string(), v.clone().into()))
            .collect()
    }
}

impl CountSource for serde_json::Map<String, Value> {
    fn raw_counts(&self) -> Vec<(String, RawCount)> {
        self.iter()
            .map(|(k, v)| (k.clone(), RawCount::from(v)))
            .collect()
    }
}

/// Validated instrument counts in catalog order. Zero counts are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    counts: Vec<(String, u32)>,
}

impl Selection {
    /// Validate every raw count against the catalog.
    ///
    /// Fails on the first unknown instrument, duplicate entry, or malformed
    /// count; nothing is expanded in that case.
    pub fn from_source<S>(catalog: &Catalog, source: &S) -> Result<Self, AssignmentError>
    where
        S: CountSource + ?Sized,
    {
        let mut seen = HashSet::new();
        let mut counts = Vec::new();

        for (name, raw) in source.raw_counts() {
            let position = catalog
                .position(&name)
                .ok_or_else(|| AssignmentError::UnknownInstrument(name.clone()))?;
            if !seen.insert(name.clone()) {
                return Err(AssignmentError::invalid_input(
                    name,
                    "instrument supplied more than once",
                ));
            }
            let count = raw.validate(&name)?;
            if count > 0 {
                counts.push((position, name, count));
            }
        }

        counts.sort_by_key(|(position, _, _)| *position);
        Ok(Self {
            counts: counts
                .into_iter()
                .map(|(_, name, count)| (name, count))
                .collect(),
        })
    }

    pub fn counts(&self) -> &[(String, u32)] {
        &self.counts
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().map(|(_, c)| u64::from(*c)).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

/// Expand a selection into one instance per unit, labeled `"<Type> <n>"`.
///
/// The configured limit is clamped to [`MAX_INSTANCES_LIMIT`], the largest
/// selection whose tied keys can still be kept distinct.
pub fn expand(
    catalog: &Catalog,
    selection: &Selection,
    limits: &LimitsConfig,
) -> Result<Vec<InstrumentInstance>, AssignmentError> {
    let total = selection.total();
    if total == 0 {
        return Err(AssignmentError::EmptySelection);
    }
    let limit = limits.max_instances.min(MAX_INSTANCES_LIMIT);
    if total > u64::from(limit) {
        return Err(AssignmentError::TooManyInstances {
            requested: total,
            limit,
        });
    }

    let mut instances = Vec::with_capacity(total as usize);
    for (name, count) in selection.counts() {
        let definition = catalog
            .get(name)
            .ok_or_else(|| AssignmentError::UnknownInstrument(name.clone()))?;
        instances.extend((1..=*count).map(|n| InstrumentInstance::new(name, n, definition)));
    }

    debug!(
        "Expanded {} instrument types into {} instances",
        selection.counts().len(),
        instances.len()
    );
    Ok(instances)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn limits() -> LimitsConfig {
        LimitsConfig::default()
    }

    #[test]
    fn test_validate_integer() {
        assert_eq!(RawCount::Integer(3).validate("Violin"), Ok(3));
        assert_eq!(RawCount::Integer(0).validate("Violin"), Ok(0));
        assert!(matches!(
            RawCount::Integer(-1).validate("Violin"),
            Err(AssignmentError::InvalidInput { .. })
        ));
        assert!(RawCount::Integer(i64::from(u32::MAX) + 1)
            .validate("Violin")
            .is_err());
    }

    #[test]
    fn test_validate_text() {
        assert_eq!(RawCount::from(" 2 ").validate("Viola"), Ok(2));
        assert_eq!(RawCount::from("").validate("Viola"), Ok(0));
        assert_eq!(RawCount::from("   ").validate("Viola"), Ok(0));
        assert_eq!(RawCount::from("3.0").validate("Viola"), Ok(3));
        assert!(RawCount::from("2.5").validate("Viola").is_err());
        assert!(RawCount::from("-4").validate("Viola").is_err());
        assert!(RawCount::from("two").validate("Viola").is_err());
        assert!(RawCount::from("NaN").validate("Viola").is_err());
    }

    #[test]
    fn test_validate_json() {
        assert_eq!(RawCount::from(json!(4)).validate("Cello"), Ok(4));
        assert_eq!(RawCount::from(json!(2.0)).validate("Cello"), Ok(2));
        assert_eq!(RawCount::from(json!("5")).validate("Cello"), Ok(5));
        assert_eq!(RawCount::from(json!(null)).validate("Cello"), Ok(0));
        assert!(RawCount::from(json!(1.5)).validate("Cello").is_err());
        assert!(RawCount::from(json!(-2)).validate("Cello").is_err());
        assert!(RawCount::from(json!(true)).validate("Cello").is_err());
        assert!(RawCount::from(json!([1])).validate("Cello").is_err());
        assert!(RawCount::from(json!(u64::MAX)).validate("Cello").is_err());
    }

    #[test]
    fn test_invalid_input_names_instrument() {
        let err = RawCount::from("1.5").validate("Oboe").unwrap_err();
        match err {
            AssignmentError::InvalidInput { instrument, reason } => {
                assert_eq!(instrument, "Oboe");
                assert!(reason.contains("whole number"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_selection_follows_catalog_order() {
        let source = vec![("Double Bass", 1i64), ("Viola", 0), ("Violin", 2)];
        let selection = Selection::from_source(Catalog::builtin(), &source).unwrap();

        assert_eq!(
            selection.counts(),
            &[("Violin".to_string(), 2), ("Double Bass".to_string(), 1)]
        );
        assert_eq!(selection.total(), 3);
    }

    #[test]
    fn test_selection_unknown_instrument() {
        let source = vec![("Kazoo", 1i64)];
        let result = Selection::from_source(Catalog::builtin(), &source);
        assert_eq!(
            result,
            Err(AssignmentError::UnknownInstrument("Kazoo".to_string()))
        );
    }

    #[test]
    fn test_selection_duplicate_instrument() {
        let source = vec![("Flute", "1"), ("Flute", "2")];
        let result = Selection::from_source(Catalog::builtin(), &source);
        assert!(matches!(result, Err(AssignmentError::InvalidInput { .. })));
    }

    #[test]
    fn test_selection_rejects_before_expansion() {
        let source = vec![("Violin", "2"), ("Cello", "-1")];
        let result = Selection::from_source(Catalog::builtin(), &source);
        assert!(matches!(result, Err(AssignmentError::InvalidInput { .. })));
    }

    #[test]
    fn test_selection_from_json_object() {
        let value = json!({ "Flute": 1, "Violin": "2", "Oboe": null });
        let map = value.as_object().unwrap();
        let selection = Selection::from_source(Catalog::builtin(), map).unwrap();
        assert_eq!(
            selection.counts(),
            &[("Violin".to_string(), 2), ("Flute".to_string(), 1)]
        );
    }

    #[test]
    fn test_expand_labels_per_type() {
        let catalog = Catalog::builtin();
        let source = vec![("Violin", 2i64), ("Double Bass", 1)];
        let selection = Selection::from_source(catalog, &source).unwrap();
        let instances = expand(catalog, &selection, &limits()).unwrap();

        let labels: Vec<_> = instances.iter().map(|i| i.label()).collect();
        assert_eq!(labels, vec!["Violin 1", "Violin 2", "Double Bass 1"]);
    }

    #[test]
    fn test_expand_empty_selection() {
        let catalog = Catalog::builtin();
        let source = vec![("Violin", 0i64), ("Cello", 0)];
        let selection = Selection::from_source(catalog, &source).unwrap();
        assert!(selection.is_empty());
        assert_eq!(
            expand(catalog, &selection, &limits()),
            Err(AssignmentError::EmptySelection)
        );
    }

    #[test]
    fn test_expand_respects_limit() {
        let catalog = Catalog::builtin();
        let source = vec![("Violin", 6i64), ("Viola", 5)];
        let selection = Selection::from_source(catalog, &source).unwrap();
        let result = expand(catalog, &selection, &LimitsConfig { max_instances: 10 });
        assert_eq!(
            result,
            Err(AssignmentError::TooManyInstances {
                requested: 11,
                limit: 10
            })
        );
    }

    #[test]
    fn test_expand_clamps_unvalidated_limit() {
        let catalog = Catalog::builtin();
        let source = vec![("Violin", 10_000i64), ("Bb Clarinet", 1)];
        let selection = Selection::from_source(catalog, &source).unwrap();
        let result = expand(
            catalog,
            &selection,
            &LimitsConfig {
                max_instances: 20_000,
            },
        );
        assert_eq!(
            result,
            Err(AssignmentError::TooManyInstances {
                requested: 10_001,
                limit: MAX_INSTANCES_LIMIT
            })
        );
    }
}
