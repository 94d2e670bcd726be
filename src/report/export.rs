//! JSON export of the consolidated report.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;

use crate::pipeline::PairResult;

/// Metadata about the analysis run.
#[derive(Serialize)]
pub struct ReportMetadata {
    /// Timestamp of the analysis (ISO 8601 format)
    pub timestamp: String,
    /// Autostat version
    pub autostat_version: String,
    /// Input file path
    pub input_file: String,
    /// Significance level used for the significance marker
    pub alpha: f64,
}

/// Summary counts across all evaluated pairs.
#[derive(Serialize)]
pub struct ReportSummary {
    pub total_pairs: usize,
    pub executed: usize,
    pub significant: usize,
    pub skipped_assumption_violation: usize,
    pub errored: usize,
}

/// Complete report export with metadata and per-pair results.
#[derive(Serialize)]
pub struct ReportExport {
    pub metadata: ReportMetadata,
    pub summary: ReportSummary,
    pub results: Vec<PairResult>,
    pub disclaimer: &'static str,
}

/// Assemble the export structure from the (already sorted) result sequence.
pub fn build_export(results: &[PairResult], input_file: &str, alpha: f64) -> ReportExport {
    let executed = results.iter().filter(|r| r.outcome.is_executed()).count();
    let significant = results
        .iter()
        .filter(|r| r.outcome.p_value().is_some_and(|p| p < alpha))
        .count();
    let skipped = results
        .iter()
        .filter(|r| r.outcome.status_label() == "skipped_assumption_violation")
        .count();
    let errored = results
        .iter()
        .filter(|r| r.outcome.status_label() == "error")
        .count();

    ReportExport {
        metadata: ReportMetadata {
            timestamp: Utc::now().to_rfc3339(),
            autostat_version: env!("CARGO_PKG_VERSION").to_string(),
            input_file: input_file.to_string(),
            alpha,
        },
        summary: ReportSummary {
            total_pairs: results.len(),
            executed,
            significant,
            skipped_assumption_violation: skipped,
            errored,
        },
        results: results.to_vec(),
        disclaimer: super::table::DISCLAIMER,
    }
}

/// Write the export as pretty-printed JSON.
pub fn write_json(path: &Path, export: &ReportExport) -> Result<()> {
    let json = serde_json::to_string_pretty(export).context("Failed to serialize report")?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write report: {}", path.display()))?;
    Ok(())
}
