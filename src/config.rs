//! Tree configuration.
//!
//! The only tuning knob of the index is the node capacity. The minimum fill is
//! derived from it and reported for diagnostics.
use crate::error::{GeoSearchError, Result};
use serde::de::Error;

/// Configuration for an [`RTree`](crate::RTree).
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TreeConfig {
    /// Maximum number of entries a node may hold before it splits
    #[serde(default = "TreeConfig::default_max_entries")]
    pub max_entries: usize,
}

impl TreeConfig {
    /// Smallest capacity that still lets a split produce two non-empty halves.
    pub const MIN_CAPACITY: usize = 2;

    const fn default_max_entries() -> usize {
        5
    }

    pub fn new(max_entries: usize) -> Self {
        Self { max_entries }
    }

    pub fn with_max_entries(mut self, max_entries: usize) -> Self {
        self.max_entries = max_entries;
        self
    }

    /// Minimum entries per node: `max(2, max_entries / 2)`.
    pub fn min_entries(&self) -> usize {
        Self::MIN_CAPACITY.max(self.max_entries / 2)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_entries < Self::MIN_CAPACITY {
            return Err(GeoSearchError::InvalidConfig(format!(
                "max_entries must be at least {}, got: {}",
                Self::MIN_CAPACITY,
                self.max_entries
            )));
        }

        if self.max_entries > 4096 {
            log::warn!(
                "max_entries of {} is very large; every insert scans whole nodes linearly",
                self.max_entries
            );
        }

        Ok(())
    }

    pub fn from_json(json: &str) -> std::result::Result<Self, serde_json::Error> {
        let config: TreeConfig = serde_json::from_str(json)?;
        if let Err(e) = config.validate() {
            return Err(serde_json::Error::custom(e));
        }
        Ok(config)
    }

    pub fn to_json(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    #[cfg(feature = "toml")]
    pub fn from_toml(toml_str: &str) -> std::result::Result<Self, toml::de::Error> {
        let config: TreeConfig = toml::from_str(toml_str)?;
        if let Err(e) = config.validate() {
            return Err(toml::de::Error::custom(e));
        }
        Ok(config)
    }

    #[cfg(feature = "toml")]
    pub fn to_toml(&self) -> std::result::Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            max_entries: Self::default_max_entries(),
        }
    }
}
