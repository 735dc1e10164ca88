use std::path::Path;

use serde::Deserialize;

use crate::core::common::errors::{MemDbError, Result};

/// Tuning knobs for a database instance.
///
/// Loadable from a TOML file; every field has a default so embedding with
/// `Config::default()` needs no file at all.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Capacity pre-allocated per column when a table is created. Tables
    /// grow past this freely; 0 means no pre-allocation.
    #[serde(default = "default_initial_row_capacity")]
    pub initial_row_capacity: usize,
}

fn default_initial_row_capacity() -> usize {
    0
}

impl Default for Config {
    fn default() -> Self {
        Self { initial_row_capacity: default_initial_row_capacity() }
    }
}

impl Config {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns `MemDbError::Config` when the file cannot be read or parsed.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            MemDbError::Config(format!(
                "failed to read '{}': {}",
                path.as_ref().display(),
                e
            ))
        })?;
        toml::from_str(&contents)
            .map_err(|e| MemDbError::Config(format!("failed to parse config: {}", e)))
    }
}
