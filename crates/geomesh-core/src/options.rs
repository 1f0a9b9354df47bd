//! Configuration options for geometry building.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Options controlling validation and the synchronization policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// What happens when the description is modified after synchronization.
    pub resync_policy: ResyncPolicy,

    /// Relative geometric tolerance (scaled by the size of the checked boundary).
    pub tolerance: f64,

    /// Number of segments used to sample circle arcs during boundary checks.
    pub arc_segments: u32,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            resync_policy: ResyncPolicy::Strict,
            tolerance: 1e-6,
            arc_segments: 16,
        }
    }
}

impl Options {
    /// Parses options from a JSON string. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads options from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Serializes the options as pretty-printed JSON.
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Policy for changes made after [`synchronize`](crate::GeometryBuilder::synchronize).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ResyncPolicy {
    /// The description is frozen; further mutation fails.
    #[default]
    Strict,
    /// Mutation is allowed with a warning and the next synchronization
    /// produces a new snapshot.
    Warn,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = Options::default();
        assert_eq!(options.resync_policy, ResyncPolicy::Strict);
        assert!(options.tolerance > 0.0);
    }

    #[test]
    fn test_partial_json() {
        let options = Options::from_json_str(r#"{ "resync_policy": "warn" }"#).unwrap();
        assert_eq!(options.resync_policy, ResyncPolicy::Warn);
        assert_eq!(options.arc_segments, Options::default().arc_segments);
    }

    #[test]
    fn test_json_round_trip() {
        let options = Options {
            tolerance: 1e-3,
            ..Options::default()
        };
        let json = options.to_json_string().unwrap();
        assert_eq!(Options::from_json_str(&json).unwrap(), options);
    }

    #[test]
    fn test_missing_file() {
        assert!(Options::from_json_file("/nonexistent/geomesh.json").is_err());
    }
}
