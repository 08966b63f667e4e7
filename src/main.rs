//! tabstat - command line front end
//!
//! Summarizes one or more numeric fields of a delimited text file.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tabstat::config::ProcessOptions;
use tabstat::report::{render_json, render_records, render_summary};
use tabstat::{process_csv, process_csv_fields};
use tracing::debug;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

#[derive(Parser)]
#[command(name = "tabstat")]
#[command(about = "Descriptive statistics for a field of a delimited text file", long_about = None)]
struct Cli {
    /// Delimited text file; the first line holds the field names
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Field to summarize (repeat for several fields)
    #[arg(short = 'f', long = "field", value_name = "FIELD")]
    fields: Vec<String>,

    /// Field delimiter
    #[arg(short, long)]
    delimiter: Option<String>,

    /// TOML file providing `delimiter` and `field`
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Also print the cleaned records
    #[arg(long, default_value_t = false)]
    show_data: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> Result<()> {
    let stderr_layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")));

    tracing_subscriber::registry().with(stderr_layer).init();

    let cli = Cli::parse();

    let mut options = match &cli.config {
        Some(path) => ProcessOptions::from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => ProcessOptions::default(),
    };
    if let Some(delimiter) = cli.delimiter.clone() {
        options.delimiter = delimiter;
    }
    debug!(?options, fields = ?cli.fields, "Resolved options");

    let (data, summaries) = if cli.fields.len() > 1 {
        let outcome = process_csv_fields(&cli.file, &options.delimiter, &cli.fields)
            .with_context(|| format!("processing {}", cli.file.display()))?;
        (outcome.data, outcome.summaries)
    } else {
        if let Some(field) = cli.fields.first() {
            options.field = field.clone();
        }
        let outcome = process_csv(&cli.file, &options)
            .with_context(|| format!("processing {}", cli.file.display()))?;
        (outcome.data, vec![outcome.summary])
    };

    match cli.format {
        OutputFormat::Text => {
            if cli.show_data {
                println!("{}", render_records(&data, &options.delimiter));
            }
            for summary in &summaries {
                println!("{}", render_summary(summary));
            }
        }
        OutputFormat::Json => {
            let data = cli.show_data.then_some(&data);
            println!("{}", render_json(&summaries, data)?);
        }
    }

    Ok(())
}
