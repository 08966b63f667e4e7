//! Data module - Delimited text loading and cleaning

mod loader;
mod model;
mod processor;

pub use loader::{DataLoader, LoaderError, DEFAULT_DELIMITER};
pub use model::{Dataset, FieldValue, Record};
pub use processor::{DataProcessor, ParsedNumber};
