use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::catalog::CatalogEntry;

/// Root configuration
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub limits: LimitsConfig,
    /// Default counts per instrument; command-line pairs override them.
    #[serde(default)]
    pub selection: BTreeMap<String, i64>,
    /// Extra or replacement catalog entries
    #[serde(default)]
    pub instruments: Vec<CatalogEntry>,
}

/// Output configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
    /// Include the "Sort Number" column in table output
    #[serde(default = "default_show_sort_number")]
    pub show_sort_number: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            show_sort_number: default_show_sort_number(),
        }
    }
}

fn default_show_sort_number() -> bool {
    true
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// Engine limits
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LimitsConfig {
    /// Maximum number of instances one selection may expand to (1..=9999)
    #[serde(default = "default_max_instances")]
    pub max_instances: u32,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_instances: default_max_instances(),
        }
    }
}

fn default_max_instances() -> u32 {
    1000
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Role;

    #[test]
    fn test_deserialize_empty_config_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.output.format, OutputFormat::Table);
        assert!(config.output.show_sort_number);
        assert_eq!(config.limits.max_instances, 1000);
        assert!(config.selection.is_empty());
        assert!(config.instruments.is_empty());
    }

    #[test]
    fn test_deserialize_output_section() {
        let toml = r#"
[output]
format = "json"
show_sort_number = false
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.output.format, OutputFormat::Json);
        assert!(!config.output.show_sort_number);
    }

    #[test]
    fn test_deserialize_unknown_format_fails() {
        let toml = r#"
[output]
format = "html"
"#;
        let result: Result<Config, _> = toml::from_str(toml);
        assert!(result.is_err());
    }

    #[test]
    fn test_deserialize_selection_and_instruments() {
        let toml = r#"
[selection]
Violin = 2
"Double Bass" = 1

[[instruments]]
name = "Alto Sax"
role = "Harmony I"
octave = 0

[[instruments]]
name = "Cowbell"
role = "Groove"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.selection.get("Violin"), Some(&2));
        assert_eq!(config.selection.get("Double Bass"), Some(&1));
        assert_eq!(config.instruments.len(), 2);
        assert_eq!(config.instruments[0].role, Role::HarmonyI);
        assert_eq!(config.instruments[1].role, Role::Groove);
        assert_eq!(config.instruments[1].octave_offset, 0);
    }
}
