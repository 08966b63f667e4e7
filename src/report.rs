//! Output formatting for field summaries.
//!
//! Plain text for terminals, JSON for scripts. Non-finite statistics render
//! as `NaN` / `inf` in text and as `null` in JSON.

use crate::data::Dataset;
use crate::stats::FieldSummary;
use serde::Serialize;

#[derive(Serialize)]
struct JsonReport<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<&'a Dataset>,
    summaries: &'a [FieldSummary],
}

/// Multi-line, human readable summary of one field.
pub fn render_summary(summary: &FieldSummary) -> String {
    let q = &summary.quartiles;
    let mode = summary
        .mode
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "Field: {} ({} numeric values)\n  \
         Mean:               {}\n  \
         Median:             {}\n  \
         Mode:               [{}]\n  \
         Standard Deviation: {}\n  \
         Quartiles:          Q1 = {}, Q2 = {}, Q3 = {}\n",
        summary.field,
        summary.count,
        summary.mean,
        summary.median,
        mode,
        summary.std_dev,
        q.q1,
        q.q2,
        q.q3
    )
}

/// The dataset as delimited text: header line, then one line per record.
pub fn render_records(dataset: &Dataset, delimiter: &str) -> String {
    let mut out = dataset.headers().join(delimiter);
    out.push('\n');
    for record in dataset {
        out.push_str(&record.to_line(delimiter));
        out.push('\n');
    }
    out
}

/// Pretty JSON with the summaries and, optionally, the cleaned records.
pub fn render_json(
    summaries: &[FieldSummary],
    data: Option<&Dataset>,
) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&JsonReport { data, summaries })
}
