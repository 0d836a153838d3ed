//! Typed configuration for the heatmap service.
//!
//! Deployments usually pick the spatial resolution per map or per game
//! mode from a config file rather than hard-coding it. This module defines
//! the strongly-typed struct mirroring that YAML and a loader that reads
//! and validates it. Every field is optional in the file; omitted fields
//! take the defaults below.
//!
//! ```yaml
//! # heatmap.yaml
//! cell_width: 2.5
//! cell_height: 2.5
//! ```

use std::path::Path;

use serde::Deserialize;

use heatmap_types::SpatialResolution;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Heatmap configuration.
///
/// Both dimensions default to `1.0` (unit cells). Values that are not
/// strictly positive are accepted here and clamped by the resolution
/// constructor, matching the engine's silent-fallback contract.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct HeatmapConfig {
    /// World-space width of one grid cell.
    #[serde(default = "default_cell_size")]
    pub cell_width: f64,
    /// World-space height of one grid cell.
    #[serde(default = "default_cell_size")]
    pub cell_height: f64,
}

impl Default for HeatmapConfig {
    fn default() -> Self {
        Self {
            cell_width: default_cell_size(),
            cell_height: default_cell_size(),
        }
    }
}

impl HeatmapConfig {
    /// The spatial resolution this configuration describes.
    pub fn resolution(&self) -> SpatialResolution {
        SpatialResolution::new(self.cell_width, self.cell_height)
    }

    /// Parse a configuration from YAML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the text is not valid YAML for
    /// this structure.
    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_yml::from_str(text)?)
    }

    /// Load a configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if its content does not parse.
    pub fn from_yaml_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
    }
}

/// Default world-space size of one grid cell, per axis.
const fn default_cell_size() -> f64 {
    1.0
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
