//! Data Model Module
//! Records, datasets and the typed values they hold.

use serde::ser::{SerializeMap, SerializeStruct};
use serde::{Serialize, Serializer};
use std::fmt;
use std::sync::Arc;

/// A single cell of a loaded row.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldValue {
    /// Trimmed raw text from the file. May be empty.
    Present(String),
    /// The row ended before reaching this column.
    Missing,
}

impl FieldValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Present(s) => Some(s),
            FieldValue::Missing => None,
        }
    }

    /// True for `Missing` and for empty text.
    pub fn is_blank(&self) -> bool {
        self.as_str().is_none_or(str::is_empty)
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Present(s) => write!(f, "{s}"),
            FieldValue::Missing => write!(f, "<missing>"),
        }
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FieldValue::Present(s) => serializer.serialize_str(s),
            FieldValue::Missing => serializer.serialize_none(),
        }
    }
}

/// One row, keyed by the header list of the dataset it came from.
///
/// Values are positional: `values[i]` belongs to `headers[i]`, and both always
/// have the same length.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    headers: Arc<[String]>,
    values: Vec<FieldValue>,
}

impl Record {
    /// Value of the named field, or `None` when the dataset has no such column.
    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.headers
            .iter()
            .position(|h| h == field)
            .and_then(|idx| self.values.get(idx))
    }

    /// Field name / value pairs in header order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.headers
            .iter()
            .map(String::as_str)
            .zip(self.values.iter())
    }

    pub fn values(&self) -> &[FieldValue] {
        &self.values
    }

    /// True when every field holds non-empty text.
    pub fn is_complete(&self) -> bool {
        self.values.iter().all(|v| !v.is_blank())
    }

    /// Re-serialize the record as one delimited line in header order.
    ///
    /// Trailing `Missing` values are dropped so the line parses back to the
    /// same values.
    pub fn to_line(&self, delimiter: &str) -> String {
        let len = self
            .values
            .iter()
            .rposition(|v| matches!(v, FieldValue::Present(_)))
            .map_or(0, |last| last + 1);

        self.values[..len]
            .iter()
            .map(|v| v.as_str().unwrap_or(""))
            .collect::<Vec<_>>()
            .join(delimiter)
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (name, value) in self.fields() {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// An ordered collection of records sharing one header list.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    headers: Arc<[String]>,
    records: Vec<Record>,
}

impl Dataset {
    /// Build a dataset from raw rows.
    ///
    /// Short rows are padded with `FieldValue::Missing`; values past the last
    /// header are dropped.
    pub fn from_rows<I>(headers: Vec<String>, rows: I) -> Self
    where
        I: IntoIterator<Item = Vec<FieldValue>>,
    {
        let headers: Arc<[String]> = headers.into();
        let width = headers.len();

        let records = rows
            .into_iter()
            .map(|mut values| {
                values.resize(width, FieldValue::Missing);
                Record {
                    headers: Arc::clone(&headers),
                    values,
                }
            })
            .collect();

        Self { headers, records }
    }

    /// A dataset with the same headers holding only `records`.
    pub(crate) fn with_records(&self, records: Vec<Record>) -> Self {
        Self {
            headers: Arc::clone(&self.headers),
            records,
        }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    /// Number of records (the header line is not counted).
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl Serialize for Dataset {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Dataset", 2)?;
        state.serialize_field("headers", &*self.headers)?;
        state.serialize_field("records", &self.records)?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn present(s: &str) -> FieldValue {
        FieldValue::Present(s.to_string())
    }

    fn sample() -> Dataset {
        Dataset::from_rows(
            vec!["name".to_string(), "value".to_string(), "unit".to_string()],
            vec![
                vec![present("a"), present("1"), present("kg")],
                vec![present("b"), present("2")],
                vec![present("c"), present("3"), present("kg"), present("extra")],
            ],
        )
    }

    #[test]
    fn test_from_rows_pads_short_rows() {
        let ds = sample();
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.records()[1].get("unit"), Some(&FieldValue::Missing));
    }

    #[test]
    fn test_from_rows_drops_extra_values() {
        let ds = sample();
        assert_eq!(ds.records()[2].values().len(), 3);
    }

    #[test]
    fn test_get_unknown_field() {
        let ds = sample();
        assert_eq!(ds.records()[0].get("weight"), None);
    }

    #[test]
    fn test_is_complete() {
        let ds = sample();
        assert!(ds.records()[0].is_complete());
        assert!(!ds.records()[1].is_complete());
    }

    #[test]
    fn test_to_line_skips_trailing_missing() {
        let ds = sample();
        assert_eq!(ds.records()[0].to_line(","), "a,1,kg");
        assert_eq!(ds.records()[1].to_line(";"), "b;2");
    }

    #[test]
    fn test_serialize_record_as_object() {
        let ds = sample();
        let json = serde_json::to_value(&ds.records()[1]).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"name": "b", "value": "2", "unit": null})
        );
    }

    #[test]
    fn test_serialize_dataset() {
        let ds = sample();
        let json = serde_json::to_value(&ds).unwrap();
        assert_eq!(json["headers"], serde_json::json!(["name", "value", "unit"]));
        assert_eq!(json["records"].as_array().map(Vec::len), Some(3));
    }
}
