//! Count collection from config defaults, a JSON input file and
//! `NAME=COUNT` arguments.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde_json::Value;

use ensemble_core::{CountSource, RawCount};

/// Raw counts layered as: config `[selection]` < `--input` file < arguments.
#[derive(Debug, Default)]
pub struct CommandLineCounts {
    counts: BTreeMap<String, RawCount>,
}

impl CommandLineCounts {
    pub fn new(defaults: &BTreeMap<String, i64>) -> Self {
        Self {
            counts: defaults
                .iter()
                .map(|(name, count)| (name.clone(), RawCount::Integer(*count)))
                .collect(),
        }
    }

    /// Overlay counts from a JSON object such as `{"Violin": 2, "Cello": "1"}`.
    pub fn merge_json(&mut self, value: &Value) -> Result<()> {
        let Some(object) = value.as_object() else {
            bail!("input must be a JSON object of instrument counts");
        };
        for (name, raw) in object {
            self.counts.insert(name.clone(), RawCount::from(raw));
        }
        Ok(())
    }

    pub fn merge_json_file(&mut self, path: &Path) -> Result<()> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read input from {:?}", path))?;
        let value: Value = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse JSON input from {:?}", path))?;
        self.merge_json(&value)
    }

    /// Overlay `NAME=COUNT` pairs. A name may appear only once among the pairs.
    pub fn merge_pairs(&mut self, pairs: &[String]) -> Result<()> {
        let mut given = BTreeMap::new();
        for pair in pairs {
            let Some((name, count)) = pair.split_once('=') else {
                bail!("expected NAME=COUNT, got {:?}", pair);
            };
            let name = name.trim();
            if name.is_empty() {
                bail!("missing instrument name in {:?}", pair);
            }
            if given.insert(name.to_string(), count.to_string()).is_some() {
                bail!("{} given more than once", name);
            }
        }
        for (name, count) in given {
            self.counts.insert(name, RawCount::Text(count));
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

impl CountSource for CommandLineCounts {
    fn raw_counts(&self) -> Vec<(String, RawCount)> {
        self.counts.raw_counts()
    }
}
