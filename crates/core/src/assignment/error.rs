//! Error types for the assignment engine.

use thiserror::Error;

/// Errors raised while validating and expanding a selection.
///
/// Every stage after expansion is total, so these are the only ways the
/// engine can fail.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssignmentError {
    /// A count is negative, not a whole number, or supplied twice.
    #[error("Invalid count for {instrument}: {reason}")]
    InvalidInput { instrument: String, reason: String },

    /// The instrument type is not in the catalog.
    #[error("Unknown instrument: {0}")]
    UnknownInstrument(String),

    /// Every count is zero.
    #[error("Please select at least one instrument.")]
    EmptySelection,

    /// The selection expands to more instances than the configured limit.
    #[error("Selection of {requested} instruments exceeds the limit of {limit}")]
    TooManyInstances { requested: u64, limit: u32 },
}

impl AssignmentError {
    /// Creates an invalid input error.
    pub fn invalid_input(instrument: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            instrument: instrument.into(),
            reason: reason.into(),
        }
    }
}
