pub mod assignment;
pub mod catalog;
pub mod config;

pub use assignment::{
    assign_parts, AssignedPart, AssignmentEngine, AssignmentError, CanonicalPart, CountSource,
    InstrumentInstance, KeyValue, PartAssignment, RawCount, Selection, SortKey,
};
pub use catalog::{Catalog, CatalogEntry, InstrumentDefinition, Role};
pub use config::{
    load_config, load_config_from_str, load_default_config, validate_config, Config,
    ConfigError, LimitsConfig, OutputConfig, OutputFormat,
};
