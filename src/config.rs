//! Processing Options Module
//! Delimiter and field selection, with defaults and TOML loading.

use crate::data::DEFAULT_DELIMITER;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Field summarized when none is configured.
pub const DEFAULT_FIELD: &str = "value";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Field name must not be empty")]
    EmptyField,
}

/// Options for a single processing run.
///
/// ```toml
/// delimiter = ";"
/// field = "price"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessOptions {
    pub delimiter: String,
    pub field: String,
}

impl Default for ProcessOptions {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER.to_string(),
            field: DEFAULT_FIELD.to_string(),
        }
    }
}

impl ProcessOptions {
    /// Default delimiter, summarizing `field`.
    pub fn for_field(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            ..Self::default()
        }
    }

    pub fn with_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.delimiter = delimiter.into();
        self
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// The delimiter itself is checked by the loader.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_field(&self.field)
    }
}

pub(crate) fn validate_field(field: &str) -> Result<(), ConfigError> {
    if field.is_empty() {
        return Err(ConfigError::EmptyField);
    }
    Ok(())
}
