use std::collections::HashSet;

use super::{types::Config, ConfigError};

/// Largest selection the fixed-point tie-breaker can keep strictly ordered.
pub const MAX_INSTANCES_LIMIT: u32 = 9_999;

/// Octave offsets accepted for configured instruments.
pub const OCTAVE_RANGE: std::ops::RangeInclusive<i32> = -8..=8;

/// Validate configuration
/// Currently validates:
/// - limits.max_instances is within 1..=9999
/// - configured instruments have non-empty, unique names
/// - configured octave offsets are within -8..=8
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    let max = config.limits.max_instances;
    if max == 0 || max > MAX_INSTANCES_LIMIT {
        return Err(ConfigError::ValidationError(format!(
            "limits.max_instances must be between 1 and {} (got {})",
            MAX_INSTANCES_LIMIT, max
        )));
    }

    let mut names = HashSet::new();
    for entry in &config.instruments {
        let name = entry.name.trim();
        if name.is_empty() {
            return Err(ConfigError::ValidationError(
                "instruments.name cannot be empty".to_string(),
            ));
        }
        if name != entry.name {
            return Err(ConfigError::ValidationError(format!(
                "instrument name {:?} has leading or trailing whitespace",
                entry.name
            )));
        }
        if !names.insert(name) {
            return Err(ConfigError::ValidationError(format!(
                "instrument {:?} is configured more than once",
                name
            )));
        }
        if !OCTAVE_RANGE.contains(&entry.octave_offset) {
            return Err(ConfigError::ValidationError(format!(
                "instrument {:?} octave {} is outside {}..={}",
                name,
                entry.octave_offset,
                OCTAVE_RANGE.start(),
                OCTAVE_RANGE.end()
            )));
        }
    }

    Ok(())
}
