//! Command-line argument definitions using clap

use clap::Parser;
use std::path::PathBuf;

/// Autostat - pick and run the right statistical test for every compatible
/// pair of columns in a CSV, producing one consolidated report
#[derive(Parser, Debug)]
#[command(name = "autostat")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Input CSV file (UTF-8, with Latin-1 fallback)
    #[arg(short, long)]
    pub input: PathBuf,

    /// JSON file mapping column names to variable-type labels
    /// (continuous / binary / nominal / ordinal; Polish labels accepted).
    /// Required unless --preview is used.
    #[arg(short, long)]
    pub types: Option<PathBuf>,

    /// Significance level for the report's significance marker
    #[arg(long, default_value = "0.05")]
    pub alpha: f64,

    /// Write the full report as JSON to this path
    #[arg(long)]
    pub json: Option<PathBuf>,

    /// Print column names and the first N rows as JSON and exit
    /// (the payload the type-annotation UI consumes)
    #[arg(long, value_name = "N")]
    pub preview: Option<usize>,

    /// Fail on unrecognized type labels instead of silently ignoring them
    #[arg(long)]
    pub strict_labels: bool,

    /// JSON file with a custom label vocabulary, for localized type labels
    #[arg(long)]
    pub vocabulary: Option<PathBuf>,
}
