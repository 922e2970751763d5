//! Application settings configuration
//!
//! Defines parser, merge and output behaviour loaded from TOML.

use crate::certdata::{MergeOptions, ParseOptions};
use crate::utils::ConfigError;
use serde::Deserialize;
use std::path::Path;

/// Parser settings
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ParserSettings {
    /// Treat malformed lines as fatal
    #[serde(default)]
    pub strict: bool,
}

/// Merge settings
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MergeSettings {
    /// Fail on duplicate certificate labels instead of keeping the last one
    #[serde(default)]
    pub reject_duplicate_labels: bool,
}

/// Output settings
#[derive(Debug, Clone, Deserialize)]
pub struct OutputSettings {
    #[serde(default = "default_pretty")]
    pub pretty: bool,
}

fn default_pretty() -> bool {
    true
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self { pretty: true }
    }
}

/// Application settings
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub parser: ParserSettings,
    #[serde(default)]
    pub merge: MergeSettings,
    #[serde(default)]
    pub output: OutputSettings,
}

impl Settings {
    /// Load settings from the default config file
    pub fn load_default() -> Result<Self, ConfigError> {
        let config_path = Path::new("config/default.toml");
        if config_path.exists() {
            Self::load_from_file(config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load settings from a specific file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        Self::from_toml(&content)
    }

    /// Parse settings from TOML text
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::ParseError {
            message: e.to_string(),
        })
    }

    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            strict: self.parser.strict,
        }
    }

    pub fn merge_options(&self) -> MergeOptions {
        MergeOptions {
            reject_duplicate_labels: self.merge.reject_duplicate_labels,
        }
    }
}
