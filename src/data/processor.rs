//! Data Processor Module
//! Handles data cleaning and numeric extraction.

use super::model::{Dataset, FieldValue};
use tracing::debug;

/// Result of reading a raw value as a number.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParsedNumber {
    Number(f64),
    NotANumber,
}

impl ParsedNumber {
    pub fn value(self) -> Option<f64> {
        match self {
            ParsedNumber::Number(v) => Some(v),
            ParsedNumber::NotANumber => None,
        }
    }
}

/// Handles data cleaning and transformation operations.
pub struct DataProcessor;

impl DataProcessor {
    /// Keep only records whose every field holds non-empty text.
    pub fn clean(dataset: &Dataset) -> Dataset {
        let records: Vec<_> = dataset
            .iter()
            .filter(|record| record.is_complete())
            .cloned()
            .collect();

        debug!(
            kept = records.len(),
            dropped = dataset.len() - records.len(),
            "Cleaned dataset"
        );
        dataset.with_records(records)
    }

    /// Parse the leading number of `raw`, ignoring any trailing text.
    ///
    /// Accepts `[+-]?digits[.digits][e[+-]digits]`, a bare fraction such as
    /// `.5`, and `[+-]Infinity`. `"12px"` reads as 12; `"px12"` and `"NaN"`
    /// are not numbers.
    pub fn parse_number(raw: &str) -> ParsedNumber {
        let s = raw.trim_start();
        let bytes = s.as_bytes();

        let mut end = 0;
        if matches!(bytes.first(), Some(b'+' | b'-')) {
            end = 1;
        }

        if s[end..].starts_with("Infinity") {
            return if bytes.first() == Some(&b'-') {
                ParsedNumber::Number(f64::NEG_INFINITY)
            } else {
                ParsedNumber::Number(f64::INFINITY)
            };
        }

        let int_digits = count_digits(&bytes[end..]);
        end += int_digits;

        let mut frac_digits = 0;
        if bytes.get(end) == Some(&b'.') {
            frac_digits = count_digits(&bytes[end + 1..]);
            if int_digits > 0 || frac_digits > 0 {
                end += 1 + frac_digits;
            }
        }

        if int_digits == 0 && frac_digits == 0 {
            return ParsedNumber::NotANumber;
        }

        if matches!(bytes.get(end), Some(b'e' | b'E')) {
            let mut exp_end = end + 1;
            if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
                exp_end += 1;
            }
            let exp_digits = count_digits(&bytes[exp_end..]);
            if exp_digits > 0 {
                end = exp_end + exp_digits;
            }
        }

        s[..end]
            .parse::<f64>()
            .map_or(ParsedNumber::NotANumber, ParsedNumber::Number)
    }

    /// Numeric values of `field` across the dataset, in record order.
    ///
    /// Records where the field is absent, missing or not a number are skipped.
    pub fn numeric_series(dataset: &Dataset, field: &str) -> Vec<f64> {
        dataset
            .iter()
            .filter_map(|record| record.get(field))
            .filter_map(FieldValue::as_str)
            .filter_map(|raw| Self::parse_number(raw).value())
            .collect()
    }
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::DataLoader;

    fn num(raw: &str) -> Option<f64> {
        DataProcessor::parse_number(raw).value()
    }

    #[test]
    fn test_parse_plain_numbers() {
        assert_eq!(num("42"), Some(42.0));
        assert_eq!(num("-3.25"), Some(-3.25));
        assert_eq!(num("+7"), Some(7.0));
        assert_eq!(num(".5"), Some(0.5));
        assert_eq!(num("5."), Some(5.0));
        assert_eq!(num("1e3"), Some(1000.0));
        assert_eq!(num("2.5E-1"), Some(0.25));
    }

    #[test]
    fn test_parse_leading_prefix() {
        assert_eq!(num("12px"), Some(12.0));
        assert_eq!(num("  3.5 kg"), Some(3.5));
        assert_eq!(num("1e"), Some(1.0));
        assert_eq!(num("1e+"), Some(1.0));
        assert_eq!(num("4.2.1"), Some(4.2));
        assert_eq!(num("0x10"), Some(0.0));
    }

    #[test]
    fn test_parse_infinity() {
        assert_eq!(num("Infinity"), Some(f64::INFINITY));
        assert_eq!(num("-Infinity"), Some(f64::NEG_INFINITY));
        assert_eq!(num("+Infinityx"), Some(f64::INFINITY));
    }

    #[test]
    fn test_parse_rejects_non_numbers() {
        for raw in ["", "abc", "NaN", ".", "-", "+.", "e5", "inf", "px12"] {
            assert_eq!(
                DataProcessor::parse_number(raw),
                ParsedNumber::NotANumber,
                "{raw:?} should not parse"
            );
        }
    }

    #[test]
    fn test_clean_drops_incomplete_records() {
        let ds = DataLoader::new()
            .parse_text("a,b\n1,2\n,3\n4\n5,6")
            .unwrap();
        let cleaned = DataProcessor::clean(&ds);

        assert_eq!(ds.len(), 4);
        assert_eq!(cleaned.len(), 2);
        assert_eq!(cleaned.headers(), ds.headers());
        let lines: Vec<_> = cleaned.iter().map(|r| r.to_line(",")).collect();
        assert_eq!(lines, ["1,2", "5,6"]);
    }

    #[test]
    fn test_numeric_series_skips_non_numeric() {
        let ds = DataLoader::new()
            .parse_text("name,value\na,1\nb,oops\nc,2.5\nd")
            .unwrap();
        assert_eq!(DataProcessor::numeric_series(&ds, "value"), vec![1.0, 2.5]);
    }

    #[test]
    fn test_numeric_series_unknown_field_is_empty() {
        let ds = DataLoader::new().parse_text("value\n1\n2").unwrap();
        assert!(DataProcessor::numeric_series(&ds, "other").is_empty());
    }
}
