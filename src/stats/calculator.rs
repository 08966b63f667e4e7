//! Statistics Calculator Module
//! Descriptive statistics over the numeric series of one field.
//!
//! Degenerate input is not an error: an empty series gives NaN for mean,
//! median and quartiles and an empty mode; fewer than two values give a NaN
//! standard deviation.

use crate::data::{DataProcessor, Dataset};
use ordered_float::OrderedFloat;
use rayon::prelude::*;
use serde::Serialize;
use std::collections::BTreeMap;

/// First, second and third quartile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Quartiles {
    pub q1: f64,
    pub q2: f64,
    pub q3: f64,
}

impl Default for Quartiles {
    fn default() -> Self {
        Self {
            q1: f64::NAN,
            q2: f64::NAN,
            q3: f64::NAN,
        }
    }
}

/// Statistics for a single field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldSummary {
    pub field: String,
    /// Number of values that parsed as numbers.
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    pub mode: Vec<f64>,
    pub std_dev: f64,
    pub quartiles: Quartiles,
}

impl FieldSummary {
    /// True when no value of the field parsed as a number.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// Handles statistical calculations.
pub struct StatsCalculator;

impl StatsCalculator {
    /// Arithmetic mean. NaN for an empty series.
    pub fn mean(values: &[f64]) -> f64 {
        values.iter().sum::<f64>() / values.len() as f64
    }

    /// Median of a raw series. NaN for an empty series.
    pub fn median_of_series(values: &[f64]) -> f64 {
        Self::median_sorted(&Self::sorted(values))
    }

    /// Median of the numeric values of `field`.
    pub fn median_of_field(dataset: &Dataset, field: &str) -> f64 {
        Self::median_of_series(&DataProcessor::numeric_series(dataset, field))
    }

    /// Every value tied for the highest frequency, ascending.
    pub fn mode(values: &[f64]) -> Vec<f64> {
        let mut frequency: BTreeMap<OrderedFloat<f64>, usize> = BTreeMap::new();
        for &v in values {
            // -0.0 and 0.0 count as one value
            *frequency.entry(OrderedFloat(v + 0.0)).or_default() += 1;
        }

        let Some(&max_freq) = frequency.values().max() else {
            return Vec::new();
        };

        frequency
            .into_iter()
            .filter(|&(_, count)| count == max_freq)
            .map(|(value, _)| value.into_inner())
            .collect()
    }

    /// Sample standard deviation (divides by n - 1). NaN below two values.
    pub fn standard_deviation(values: &[f64]) -> f64 {
        let n = values.len();
        if n < 2 {
            return f64::NAN;
        }

        let mean = Self::mean(values);
        let variance = values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
        variance.sqrt()
    }

    /// Quartiles by the exclusive-median method.
    ///
    /// For odd lengths the middle element belongs to neither half.
    pub fn quartiles(values: &[f64]) -> Quartiles {
        let sorted = Self::sorted(values);
        let n = sorted.len();
        let mid = n / 2;

        let lower = &sorted[..mid];
        let upper = if n % 2 == 0 {
            &sorted[mid..]
        } else {
            &sorted[mid + 1..]
        };

        Quartiles {
            q1: Self::median_sorted(lower),
            q2: Self::median_sorted(&sorted),
            q3: Self::median_sorted(upper),
        }
    }

    /// Compute every statistic for an already extracted series.
    pub fn describe_series(field: &str, values: &[f64]) -> FieldSummary {
        FieldSummary {
            field: field.to_string(),
            count: values.len(),
            mean: Self::mean(values),
            median: Self::median_of_series(values),
            mode: Self::mode(values),
            std_dev: Self::standard_deviation(values),
            quartiles: Self::quartiles(values),
        }
    }

    /// Compute every statistic for one field of the dataset.
    pub fn describe(dataset: &Dataset, field: &str) -> FieldSummary {
        let values = DataProcessor::numeric_series(dataset, field);
        Self::describe_series(field, &values)
    }

    /// Summaries for several fields, computed in parallel, in request order.
    pub fn describe_fields(dataset: &Dataset, fields: &[String]) -> Vec<FieldSummary> {
        fields
            .par_iter()
            .map(|field| Self::describe(dataset, field))
            .collect()
    }

    fn sorted(values: &[f64]) -> Vec<f64> {
        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));
        sorted
    }

    fn median_sorted(sorted: &[f64]) -> f64 {
        let n = sorted.len();
        if n == 0 {
            return f64::NAN;
        }
        if n % 2 == 0 {
            (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
        } else {
            sorted[n / 2]
        }
    }
}
