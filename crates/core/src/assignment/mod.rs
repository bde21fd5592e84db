//! Part assignment engine.
//!
//! # Pipeline
//!
//! ```text
//! raw counts ──► Selection ──► expand ──► resolve_sort_keys
//!                                              │
//!                  fixed roles ◄── assign_fixed_parts
//!                       │                      │ orderable
//!                       │                 break_ties
//!                       │                      │
//!                       │           assign_canonical_parts
//!                       └──────► order_results ◄┘
//! ```
//!
//! The engine is a pure function of the selection and the catalog: no
//! state survives between calls.

mod assigner;
mod error;
mod expand;
mod order;
mod sort_key;
mod tie_break;
mod types;

pub use assigner::{assign_canonical_parts, assign_fixed_parts, interior_part};
pub use error::AssignmentError;
pub use expand::{expand, CountSource, RawCount, Selection};
pub use order::order_results;
pub use sort_key::{base_sort_key, resolve_sort_keys};
pub use tie_break::break_ties;
pub use types::*;

use tracing::info;

use crate::catalog::Catalog;
use crate::config::{Config, LimitsConfig};

/// Run the whole pipeline for one selection.
pub fn assign_parts<S>(
    catalog: &Catalog,
    source: &S,
    limits: &LimitsConfig,
) -> Result<Vec<PartAssignment>, AssignmentError>
where
    S: CountSource + ?Sized,
{
    let selection = Selection::from_source(catalog, source)?;
    let mut instances = expand(catalog, &selection, limits)?;

    resolve_sort_keys(&mut instances);
    assign_fixed_parts(&mut instances);

    let (mut orderable, fixed): (Vec<_>, Vec<_>) = instances
        .into_iter()
        .partition(|instance| instance.role().is_orderable());

    break_ties(&mut orderable);
    assign_canonical_parts(&mut orderable);

    info!(
        "Assigned parts to {} instances ({} orderable, {} fixed)",
        orderable.len() + fixed.len(),
        orderable.len(),
        fixed.len()
    );

    Ok(order_results(orderable, fixed))
}

/// Catalog and limits bundled from configuration.
#[derive(Debug, Clone)]
pub struct AssignmentEngine {
    catalog: Catalog,
    limits: LimitsConfig,
}

impl AssignmentEngine {
    pub fn new(catalog: Catalog, limits: LimitsConfig) -> Self {
        Self { catalog, limits }
    }

    /// Built-in catalog with configured instruments merged in.
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            Catalog::builtin().with_overrides(&config.instruments),
            config.limits.clone(),
        )
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn limits(&self) -> &LimitsConfig {
        &self.limits
    }

    pub fn assign<S>(&self, source: &S) -> Result<Vec<PartAssignment>, AssignmentError>
    where
        S: CountSource + ?Sized,
    {
        assign_parts(&self.catalog, source, &self.limits)
    }
}

impl Default for AssignmentEngine {
    fn default() -> Self {
        Self::new(Catalog::builtin().clone(), LimitsConfig::default())
    }
}
