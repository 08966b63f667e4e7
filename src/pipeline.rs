//! Processing Pipeline
//! Load, clean and summarize a delimited file in one call.

use crate::config::{validate_field, ConfigError, ProcessOptions};
use crate::data::{DataLoader, DataProcessor, Dataset, LoaderError};
use crate::stats::{FieldSummary, StatsCalculator};
use serde::Serialize;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Load(#[from] LoaderError),
}

/// Cleaned data plus the summary of the requested field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessOutcome {
    pub data: Dataset,
    pub summary: FieldSummary,
}

/// Cleaned data plus one summary per requested field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MultiFieldOutcome {
    pub data: Dataset,
    pub summaries: Vec<FieldSummary>,
}

/// Load `path`, drop incomplete rows and summarize `options.field`.
///
/// The statistics are also reported through `tracing` at info level.
#[tracing::instrument(skip_all, fields(path = %path.as_ref().display(), field = %options.field))]
pub fn process_csv(
    path: impl AsRef<Path>,
    options: &ProcessOptions,
) -> Result<ProcessOutcome, PipelineError> {
    options.validate()?;
    let data = load_clean(path.as_ref(), &options.delimiter)?;

    let summary = StatsCalculator::describe(&data, &options.field);
    log_summary(&summary);

    Ok(ProcessOutcome { data, summary })
}

/// Like [`process_csv`], for several fields at once.
#[tracing::instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn process_csv_fields(
    path: impl AsRef<Path>,
    delimiter: &str,
    fields: &[String],
) -> Result<MultiFieldOutcome, PipelineError> {
    for field in fields {
        validate_field(field)?;
    }
    let data = load_clean(path.as_ref(), delimiter)?;

    let summaries = StatsCalculator::describe_fields(&data, fields);
    summaries.iter().for_each(log_summary);

    Ok(MultiFieldOutcome { data, summaries })
}

fn load_clean(path: &Path, delimiter: &str) -> Result<Dataset, LoaderError> {
    let raw = DataLoader::with_delimiter(delimiter)?.load(path)?;
    let data = DataProcessor::clean(&raw);

    info!(rows = raw.len(), kept = data.len(), "Data loaded");
    for record in &data {
        debug!(record = %record.to_line(delimiter), "Data");
    }
    Ok(data)
}

fn log_summary(summary: &FieldSummary) {
    let field = summary.field.as_str();
    if summary.is_empty() {
        warn!(field, "No numeric values found");
    }

    info!(field, count = summary.count, "Mean of {field}: {}", summary.mean);
    info!(field, "Median of {field}: {}", summary.median);
    info!(field, "Mode of {field}: {:?}", summary.mode);
    info!(field, "Standard Deviation of {field}: {}", summary.std_dev);
    info!(
        field,
        "Quartiles of {field}: q1={} q2={} q3={}",
        summary.quartiles.q1,
        summary.quartiles.q2,
        summary.quartiles.q3
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn csv_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_process_csv_default_field() {
        let file = csv_file("id,value\n1,4\n2,\n3,8\n4,6\n");
        let outcome = process_csv(file.path(), &ProcessOptions::default()).unwrap();

        assert_eq!(outcome.data.len(), 3);
        assert_eq!(outcome.summary.count, 3);
        assert_eq!(outcome.summary.mean, 6.0);
        assert_eq!(outcome.summary.median, 6.0);
    }

    #[test]
    fn test_process_csv_custom_delimiter() {
        let file = csv_file("id|score\n1|2\n2|4\n");
        let options = ProcessOptions::for_field("score").with_delimiter("|");
        let outcome = process_csv(file.path(), &options).unwrap();

        assert_eq!(outcome.summary.mean, 3.0);
    }

    #[test]
    fn test_process_csv_rejects_empty_field() {
        let file = csv_file("value\n1\n");
        let err = process_csv(file.path(), &ProcessOptions::for_field("")).unwrap_err();
        assert!(matches!(err, PipelineError::Config(ConfigError::EmptyField)));
    }

    #[test]
    fn test_process_csv_missing_file() {
        let err = process_csv("/no/such/data.csv", &ProcessOptions::default()).unwrap_err();
        assert!(matches!(err, PipelineError::Load(LoaderError::Io { .. })));
    }

    #[test]
    fn test_process_csv_invalid_utf8_label() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"label,value\ncaf\xe9,1\nbar,3\n").unwrap();

        let outcome = process_csv(file.path(), &ProcessOptions::default()).unwrap();
        assert_eq!(outcome.data.len(), 2);
        assert_eq!(outcome.summary.mean, 2.0);
    }

    #[test]
    fn test_process_csv_byte_order_mark() {
        let file = csv_file("\u{feff}value,id\n1,a\n3,b\n");
        let outcome = process_csv(file.path(), &ProcessOptions::default()).unwrap();
        assert_eq!(outcome.summary.count, 2);
        assert_eq!(outcome.summary.mean, 2.0);
    }

    #[test]
    fn test_process_csv_fields() {
        let file = csv_file("a,b\n1,10\n3,30\n");
        let fields = vec!["a".to_string(), "b".to_string()];
        let outcome = process_csv_fields(file.path(), ",", &fields).unwrap();

        assert_eq!(outcome.summaries.len(), 2);
        assert_eq!(outcome.summaries[0].mean, 2.0);
        assert_eq!(outcome.summaries[1].mean, 20.0);
    }

    #[test]
    fn test_process_csv_fields_empty_delimiter() {
        let file = csv_file("a\n1\n");
        let err = process_csv_fields(file.path(), "", &["a".to_string()]).unwrap_err();
        assert!(matches!(err, PipelineError::Load(LoaderError::EmptyDelimiter)));
    }
}
