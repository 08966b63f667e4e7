//! Delimited Text Loader Module
//! Reads a whole file and splits it into header-keyed records.

use super::model::{Dataset, FieldValue};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Delimiter used when none is configured.
pub const DEFAULT_DELIMITER: &str = ",";

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Delimiter must not be empty")]
    EmptyDelimiter,
    #[error("Duplicate header '{0}'")]
    DuplicateHeader(String),
}

/// Splits delimited text into a [`Dataset`].
///
/// No quoting is understood: a delimiter inside a value always splits it.
#[derive(Debug, Clone)]
pub struct DataLoader {
    delimiter: String,
}

impl Default for DataLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl DataLoader {
    pub fn new() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER.to_string(),
        }
    }

    /// Create a loader splitting on `delimiter`.
    pub fn with_delimiter(delimiter: impl Into<String>) -> Result<Self, LoaderError> {
        let delimiter = delimiter.into();
        if delimiter.is_empty() {
            return Err(LoaderError::EmptyDelimiter);
        }
        Ok(Self { delimiter })
    }

    pub fn delimiter(&self) -> &str {
        &self.delimiter
    }

    /// Read the full file and parse it.
    ///
    /// Invalid UTF-8 sequences are replaced with U+FFFD rather than failing
    /// the whole file.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<Dataset, LoaderError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| LoaderError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let dataset = self.parse_text(&String::from_utf8_lossy(&bytes))?;
        debug!(
            path = %path.display(),
            rows = dataset.len(),
            columns = dataset.headers().len(),
            "Loaded delimited file"
        );
        Ok(dataset)
    }

    /// Parse in-memory text. The first line holds the headers.
    ///
    /// A leading byte-order mark is ignored.
    pub fn parse_text(&self, text: &str) -> Result<Dataset, LoaderError> {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        let mut lines = text.trim().split('\n');

        let headers: Vec<String> = lines
            .next()
            .unwrap_or_default()
            .split(self.delimiter.as_str())
            .map(|h| h.trim().to_string())
            .collect();

        if let Some(dup) = first_duplicate(&headers) {
            return Err(LoaderError::DuplicateHeader(dup));
        }

        let rows = lines.map(|line| {
            line.split(self.delimiter.as_str())
                .map(|v| FieldValue::Present(v.trim().to_string()))
                .collect::<Vec<_>>()
        });

        Ok(Dataset::from_rows(headers, rows))
    }
}

fn first_duplicate(headers: &[String]) -> Option<String> {
    let mut seen = HashSet::with_capacity(headers.len());
    headers
        .iter()
        .find(|h| !seen.insert(h.as_str()))
        .cloned()
}
