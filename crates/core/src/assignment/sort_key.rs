//! Base sort keys from role priority and octave offset.

use tracing::debug;

use crate::catalog::InstrumentDefinition;

use super::types::{InstrumentInstance, KeyValue, SortKey};

/// `(priority + 1) - octave_offset` for orderable roles.
///
/// Higher-register instruments of a role get a lower key and sort first.
pub fn base_sort_key(definition: InstrumentDefinition) -> SortKey {
    match definition.role.priority() {
        Some(priority) => SortKey::Ordered(KeyValue::from_whole(
            i64::from(priority) + 1 - i64::from(definition.octave_offset),
        )),
        None => SortKey::NotOrderable,
    }
}

/// Set the base key of every instance.
pub fn resolve_sort_keys(instances: &mut [InstrumentInstance]) {
    for instance in instances.iter_mut() {
        instance.set_sort_key(base_sort_key(instance.definition()));
    }

    let orderable = instances
        .iter()
        .filter(|i| i.sort_key() != Some(SortKey::NotOrderable))
        .count();
    debug!(
        "Resolved sort keys: {} orderable, {} fixed",
        orderable,
        instances.len() - orderable
    );
}
