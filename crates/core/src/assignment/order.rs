//! Final display ordering.

use super::types::{InstrumentInstance, PartAssignment, SortKey};

/// Merge assigned orderable and fixed-role instances into output records.
///
/// Ordered keys come first, ascending; `n/a` entries follow in expansion
/// order. The sort is stable.
pub fn order_results(
    orderable: Vec<InstrumentInstance>,
    fixed: Vec<InstrumentInstance>,
) -> Vec<PartAssignment> {
    let mut records: Vec<PartAssignment> = orderable
        .into_iter()
        .chain(fixed)
        .map(|instance| PartAssignment {
            sort_key: instance.sort_key().unwrap_or(SortKey::NotOrderable),
            assigned_part: instance
                .assigned_part()
                .expect("every instance is assigned before ordering"),
            label: instance.label().to_string(),
        })
        .collect();

    records.sort_by_key(|r| r.sort_key);
    records
}
