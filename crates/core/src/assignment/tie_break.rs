//! Deterministic tie-breaking of equal sort keys.
//!
//! Instances are sorted by key, then label (case-insensitive, with the raw
//! label as the final tie-break). Every run of equal keys with
//! more than one member is spread over the interval above its key:
//! `key + rank/10` for runs under ten, finer steps for longer runs, so a
//! run never reaches the next whole key.

use std::cmp::Ordering;

use tracing::debug;

use super::types::{InstrumentInstance, KeyValue, SortKey};

/// Perturbation step, in key units, for a run of `len` members.
fn step_units(len: usize) -> i64 {
    let mut step = KeyValue::SCALE / 10;
    let mut capacity = 10;
    while len >= capacity && step > 1 {
        step /= 10;
        capacity *= 10;
    }
    step
}

/// Case is a secondary difference: "viola da gamba 1" sorts before "Violin 1".
fn label_cmp(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
        .then_with(|| a.cmp(b))
}

fn ordered_cmp(a: &InstrumentInstance, b: &InstrumentInstance) -> Ordering {
    a.sort_key()
        .cmp(&b.sort_key())
        .then_with(|| label_cmp(a.label(), b.label()))
}

/// Sort orderable instances ascending and make their keys pairwise distinct.
///
/// Expects resolved keys. `NotOrderable` instances are never perturbed.
pub fn break_ties(instances: &mut [InstrumentInstance]) {
    instances.sort_by(ordered_cmp);

    let mut runs = 0;
    let mut start = 0;
    while start < instances.len() {
        let Some(SortKey::Ordered(base)) = instances[start].sort_key() else {
            start += 1;
            continue;
        };
        let len = instances[start..]
            .iter()
            .take_while(|i| i.sort_key() == Some(SortKey::Ordered(base)))
            .count();

        if len > 1 {
            runs += 1;
            let step = step_units(len);
            for (rank, instance) in instances[start..start + len].iter_mut().enumerate() {
                let offset = step * (rank as i64 + 1);
                instance.set_sort_key(SortKey::Ordered(base.offset(offset)));
            }
        }
        start += len;
    }

    debug!(
        "Tie-break: {} instances, {} tied runs perturbed",
        instances.len(),
        runs
    );
}
