//! Decoder configuration, optionally persisted as JSON.

use std::collections::BTreeSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Knobs for a single decode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodeOptions {
    /// Upper bound on zone records before the header is considered corrupt.
    #[serde(default = "default_max_zones")]
    pub max_zones: usize,
    /// Variable counts accepted in the header (empty = any count ≥ 3).
    #[serde(default = "default_variable_counts")]
    pub accepted_variable_counts: Vec<usize>,
    /// Zero-based zones that are decoded but not committed.
    #[serde(default)]
    pub zones_to_exclude: BTreeSet<usize>,
}

fn default_max_zones() -> usize {
    1000
}
fn default_variable_counts() -> Vec<usize> {
    vec![13, 22]
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            max_zones: default_max_zones(),
            accepted_variable_counts: default_variable_counts(),
            zones_to_exclude: BTreeSet::new(),
        }
    }
}

impl DecodeOptions {
    pub fn with_excluded_zones(mut self, zones: impl IntoIterator<Item = usize>) -> Self {
        self.zones_to_exclude.extend(zones);
        self
    }

    pub fn is_excluded(&self, zone: usize) -> bool {
        self.zones_to_exclude.contains(&zone)
    }

    pub fn accepts_variable_count(&self, nvars: usize) -> bool {
        self.accepted_variable_counts.is_empty() || self.accepted_variable_counts.contains(&nvars)
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let data = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&data)?)
    }

    /// Load from disk, or return defaults if the file doesn't exist.
    pub fn load_or_default(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}
