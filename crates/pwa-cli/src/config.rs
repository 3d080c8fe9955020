//! # Configuration
//!
//! Optional YAML file passed with `--config`. Every field has a default,
//! so an empty file and no file at all behave the same.
//!
//! ```yaml
//! gate: recommended
//! format: json
//! fix_missing: [required, recommended]
//! ```

use std::path::Path;

use clap::ValueEnum;
use pwa_core::{Category, PwaError};
use serde::{Deserialize, Serialize};

/// How reports are printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Settings for a `pwa-studio` run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudioConfig {
    /// Lowest category whose failures fail the run.
    #[serde(default = "default_gate")]
    pub gate: Category,

    #[serde(default)]
    pub format: OutputFormat,

    /// Categories whose missing members `fix` fills with catalog defaults.
    #[serde(default = "default_fix_missing")]
    pub fix_missing: Vec<Category>,
}

fn default_gate() -> Category {
    Category::Required
}

fn default_fix_missing() -> Vec<Category> {
    vec![Category::Required]
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            gate: default_gate(),
            format: OutputFormat::default(),
            fix_missing: default_fix_missing(),
        }
    }
}

impl StudioConfig {
    /// Load from `path`, or return defaults when no path is given.
    ///
    /// # Errors
    ///
    /// Returns [`PwaError::Config`] if the file cannot be read or is not
    /// valid configuration YAML.
    pub fn load(path: Option<&Path>) -> Result<Self, PwaError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = std::fs::read_to_string(path)
            .map_err(|e| PwaError::Config(format!("cannot read {}: {e}", path.display())))?;
        let config = Self::parse(&text)
            .map_err(|e| PwaError::Config(format!("{}: {e}", path.display())))?;
        tracing::debug!(path = %path.display(), gate = %config.gate, "configuration loaded");
        Ok(config)
    }

    /// Parse configuration YAML. Empty text yields the defaults.
    pub fn parse(text: &str) -> Result<Self, serde_yaml::Error> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(text)
    }
}
