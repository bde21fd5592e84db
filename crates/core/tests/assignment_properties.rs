//! Engine-level properties of part assignment.
//!
//! These tests drive the public API with many selections and check:
//! - Every instance gets exactly one part of the right kind
//! - Melody/Bass endpoints are unique
//! - Ordered keys are pairwise distinct after tie-breaking
//! - Repeated and reordered runs produce identical output

use std::collections::{BTreeMap, HashMap, HashSet};

use serde_json::json;

use ensemble_core::{
    assign_parts, AssignedPart, AssignmentEngine, AssignmentError, CanonicalPart, Catalog,
    LimitsConfig, PartAssignment, Role, SortKey,
};

/// Deterministic spread of selections over the built-in catalog.
fn selections() -> Vec<Vec<(String, i64)>> {
    let names: Vec<String> = Catalog::builtin()
        .entries()
        .iter()
        .map(|e| e.name.clone())
        .collect();

    let mut out = Vec::new();
    for seed in 1..40u64 {
        let mut state = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        let selection = names
            .iter()
            .map(|name| {
                state = state
                    .wrapping_mul(6364136223846793005)
                    .wrapping_add(1442695040888963407);
                (name.clone(), ((state >> 33) % 4) as i64)
            })
            .collect::<Vec<_>>();
        if selection.iter().any(|(_, c)| *c > 0) {
            out.push(selection);
        }
    }
    out
}

fn run(selection: &[(String, i64)]) -> Vec<PartAssignment> {
    AssignmentEngine::default()
        .assign(selection)
        .expect("selection is valid")
}

fn role_of(label: &str) -> Role {
    let catalog = Catalog::builtin();
    let (name, _) = label.rsplit_once(' ').unwrap();
    catalog.get(name).unwrap().role
}

#[test]
fn test_every_instance_assigned_once() {
    for selection in selections() {
        let expected: i64 = selection.iter().map(|(_, c)| c).sum();
        let records = run(&selection);
        assert_eq!(records.len() as i64, expected);

        let labels: HashSet<_> = records.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels.len(), records.len(), "labels must be unique");

        for record in &records {
            let role = role_of(&record.label);
            match record.assigned_part {
                AssignedPart::Canonical(_) => assert!(role.is_orderable()),
                AssignedPart::Fixed(fixed) => {
                    assert_eq!(fixed, role);
                    assert_eq!(record.assigned_part.label(), role.name());
                    assert_eq!(record.sort_key, SortKey::NotOrderable);
                }
            }
        }
    }
}

#[test]
fn test_melody_and_bass_bound_to_extremes() {
    for selection in selections() {
        let records = run(&selection);
        let ordered: Vec<_> = records
            .iter()
            .filter(|r| r.sort_key != SortKey::NotOrderable)
            .collect();
        if ordered.is_empty() {
            continue;
        }

        let melody: Vec<_> = ordered
            .iter()
            .filter(|r| r.assigned_part == AssignedPart::Canonical(CanonicalPart::Melody))
            .collect();
        let bass: Vec<_> = ordered
            .iter()
            .filter(|r| r.assigned_part == AssignedPart::Canonical(CanonicalPart::Bass))
            .collect();

        assert_eq!(melody.len(), 1);
        assert_eq!(melody[0].label, ordered[0].label);

        if ordered.len() >= 2 {
            assert_eq!(bass.len(), 1);
            assert_eq!(bass[0].label, ordered[ordered.len() - 1].label);
        } else {
            assert!(bass.is_empty());
        }
    }
}

#[test]
fn test_ordered_keys_distinct_and_before_fixed() {
    for selection in selections() {
        let records = run(&selection);
        let keys: Vec<_> = records.iter().map(|r| r.sort_key).collect();
        assert!(keys.windows(2).all(|w| w[0] <= w[1]));

        let ordered: Vec<_> = keys.iter().filter_map(|k| k.value()).collect();
        assert!(ordered.windows(2).all(|w| w[0] < w[1]));
    }
}

#[test]
fn test_idempotent_and_order_independent() {
    for selection in selections() {
        let first = run(&selection);
        let second = run(&selection);
        assert_eq!(first, second);

        let mut reversed = selection.clone();
        reversed.reverse();
        assert_eq!(run(&reversed), first);

        let as_map: HashMap<String, i64> = selection.iter().cloned().collect();
        let from_map = AssignmentEngine::default().assign(&as_map).unwrap();
        assert_eq!(from_map, first);
    }
}

#[test]
fn test_flute_and_violins_tie_break() {
    let records = assign_parts(
        Catalog::builtin(),
        &vec![("Violin", 2i64), ("Flute", 1)],
        &LimitsConfig::default(),
    )
    .unwrap();

    let keys: Vec<_> = records
        .iter()
        .map(|r| (r.label.as_str(), r.sort_key.to_string()))
        .collect();
    assert_eq!(
        keys,
        vec![
            ("Flute 1", "0.1".to_string()),
            ("Violin 1", "0.2".to_string()),
            ("Violin 2", "0.3".to_string()),
        ]
    );
}

#[test]
fn test_form_submission_json() {
    let form = json!({
        "Violin": "2",
        "Viola": "",
        "Double Bass": "1",
        "Drum Kit": "1"
    });
    let records = AssignmentEngine::default()
        .assign(form.as_object().unwrap())
        .unwrap();

    let json = serde_json::to_value(&records).unwrap();
    assert_eq!(
        json,
        json!([
            { "label": "Violin 1", "sort_key": 0.1, "assigned_part": "1 Melody" },
            { "label": "Violin 2", "sort_key": 0.2, "assigned_part": "2 Harmony" },
            { "label": "Double Bass 1", "sort_key": 8.0, "assigned_part": "6 Bass" },
            { "label": "Drum Kit 1", "sort_key": "n/a", "assigned_part": "Drum Kit" }
        ])
    );
}

#[test]
fn test_full_string_section() {
    let selection: BTreeMap<&str, i64> = [
        ("Violin", 2),
        ("Viola", 1),
        ("Cello", 1),
        ("Double Bass", 1),
    ]
    .into_iter()
    .collect();
    let records = AssignmentEngine::default().assign(&selection).unwrap();

    let rows: Vec<_> = records
        .iter()
        .map(|r| (r.label.as_str(), r.assigned_part.label()))
        .collect();
    assert_eq!(
        rows,
        vec![
            ("Violin 1", "1 Melody"),
            ("Violin 2", "2 Harmony"),
            ("Viola 1", "4 Counter Melody"),
            ("Cello 1", "3 Harmony II"),
            ("Double Bass 1", "6 Bass"),
        ]
    );
}

#[test]
fn test_errors_surface_before_assignment() {
    let engine = AssignmentEngine::default();

    assert_eq!(
        engine.assign(&vec![("Violin", 0i64), ("Drum Kit", 0)]),
        Err(AssignmentError::EmptySelection)
    );
    assert!(matches!(
        engine.assign(&vec![("Violin", "1.5")]),
        Err(AssignmentError::InvalidInput { .. })
    ));
    assert!(matches!(
        engine.assign(&vec![("Violin", -2i64)]),
        Err(AssignmentError::InvalidInput { .. })
    ));
    assert_eq!(
        engine.assign(&vec![("Theremin", 1i64)]),
        Err(AssignmentError::UnknownInstrument("Theremin".to_string()))
    );
}
