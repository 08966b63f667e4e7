//! tabstat - descriptive statistics for delimited text files
//!
//! Loads a file whose first line names the columns, drops rows with blank
//! values and summarizes a numeric field: mean, median, mode, sample standard
//! deviation and quartiles.

pub mod config;
pub mod data;
pub mod pipeline;
pub mod report;
pub mod stats;

pub use config::ProcessOptions;
pub use pipeline::{process_csv, process_csv_fields, PipelineError, ProcessOutcome};
