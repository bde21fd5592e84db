//! Part assignment: fixed roles first, then priority-then-cycle for the
//! ordered instances.

use tracing::debug;

use super::types::{AssignedPart, CanonicalPart, InstrumentInstance};

/// Labels handed to interior instances, in order. The first four interior
/// instances take them once; later ones keep rotating through the same
/// positions, so "1 Melody" and "6 Bass" are only ever given to the endpoints.
const INTERIOR: [CanonicalPart; 4] = [
    CanonicalPart::SEQUENCE[1],
    CanonicalPart::SEQUENCE[2],
    CanonicalPart::SEQUENCE[3],
    CanonicalPart::SEQUENCE[4],
];

/// Fixed-role instances take their own role name, regardless of what else
/// is selected.
pub fn assign_fixed_parts(instances: &mut [InstrumentInstance]) -> usize {
    let mut assigned = 0;
    for instance in instances.iter_mut() {
        let role = instance.role();
        if !role.is_orderable() && instance.assign(AssignedPart::Fixed(role)) {
            assigned += 1;
        }
    }
    debug!("Pre-assigned {} fixed-role instances", assigned);
    assigned
}

/// Interior part for the `index`-th instance between the two endpoints.
pub fn interior_part(index: usize) -> CanonicalPart {
    INTERIOR[index % INTERIOR.len()]
}

fn assign_canonical(instance: &mut InstrumentInstance, part: CanonicalPart) {
    let fresh = instance.assign(AssignedPart::Canonical(part));
    debug_assert!(fresh, "{} already had a part", instance.label());
}

/// Stamp canonical parts onto a tie-broken, ascending sequence.
///
/// Lowest key is "1 Melody", highest is "6 Bass", everything between goes
/// through [`interior_part`]. A single instance only gets "1 Melody".
pub fn assign_canonical_parts(ordered: &mut [InstrumentInstance]) {
    let n = ordered.len();
    let Some((first, rest)) = ordered.split_first_mut() else {
        return;
    };
    assign_canonical(first, CanonicalPart::Melody);

    if let Some((last, interior)) = rest.split_last_mut() {
        assign_canonical(last, CanonicalPart::Bass);
        for (index, instance) in interior.iter_mut().enumerate() {
            assign_canonical(instance, interior_part(index));
        }
    }

    debug!("Assigned canonical parts to {} instances", n);
}
