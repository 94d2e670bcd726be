//! Tests for report ordering, rendering, and JSON export

use autostat::pipeline::{
    resolve_types, run_all_pairs, TypeVocabulary, UnknownLabelPolicy,
};
use autostat::report::{build_export, render, sort_results, write_json, DISCLAIMER};
use polars::prelude::*;
use tempfile::TempDir;

#[path = "common/mod.rs"]
mod common;

fn mixed_results() -> Vec<autostat::pipeline::PairResult> {
    // Yields executed pairs (regression, t-test), one skipped pair (sparse
    // chi-square via the skewed group), and one failed pair (constant column)
    let mut df = common::skewed_group_df();
    let n = df.height();
    let constant: Vec<f64> = vec![1.0; n];
    let noise: Vec<f64> = (0..n).map(|i| (i as f64 * 7.3) % 13.0).collect();
    df.with_column(Column::new("constant".into(), constant))
        .unwrap();
    df.with_column(Column::new("noise".into(), noise)).unwrap();

    let resolved = resolve_types(
        &df,
        &common::type_map(&[
            ("score", "continuous"),
            ("noise", "continuous"),
            ("constant", "continuous"),
            ("group", "binary"),
        ]),
        &TypeVocabulary::default(),
        UnknownLabelPolicy::Ignore,
    )
    .unwrap();
    run_all_pairs(&resolved.df, &resolved.partition)
}

#[test]
fn executed_results_lead_and_failures_trail() {
    let mut results = mixed_results();
    sort_results(&mut results);

    let statuses: Vec<&str> = results.iter().map(|r| r.outcome.status_label()).collect();
    let first_non_executed = statuses
        .iter()
        .position(|s| *s != "executed")
        .unwrap_or(statuses.len());
    assert!(
        statuses[first_non_executed..]
            .iter()
            .all(|s| *s != "executed"),
        "executed results must come first: {statuses:?}"
    );

    // Within the executed block, p-values ascend
    let ps: Vec<f64> = results
        .iter()
        .filter_map(|r| r.outcome.p_value())
        .collect();
    assert!(ps.windows(2).all(|w| w[0] <= w[1]), "p-values not sorted: {ps:?}");
}

#[test]
fn rendered_report_contains_all_statuses_and_disclaimer() {
    let mut results = mixed_results();
    sort_results(&mut results);
    let rendered = render(&results, 0.05);

    assert!(rendered.contains("executed"));
    assert!(rendered.contains("error"));
    assert!(rendered.contains(DISCLAIMER));
}

#[test]
fn empty_report_renders_the_notice() {
    // A single nominal column cannot form any pair
    let df = df! { "only" => ["a", "b", "a"] }.unwrap();
    let resolved = resolve_types(
        &df,
        &common::type_map(&[("only", "nominal")]),
        &TypeVocabulary::default(),
        UnknownLabelPolicy::Ignore,
    )
    .unwrap();
    let results = run_all_pairs(&resolved.df, &resolved.partition);
    assert!(results.is_empty());

    let rendered = render(&results, 0.05);
    assert!(rendered.contains("No applicable variable pairs"));
    assert!(rendered.contains(DISCLAIMER));
}

#[test]
fn export_summary_is_consistent_with_results() {
    let mut results = mixed_results();
    sort_results(&mut results);
    let export = build_export(&results, "input.csv", 0.05);

    assert_eq!(export.summary.total_pairs, results.len());
    assert_eq!(
        export.summary.executed
            + export.summary.skipped_assumption_violation
            + export.summary.errored,
        results.len()
    );
    assert!(export.summary.significant <= export.summary.executed);
    assert_eq!(export.metadata.input_file, "input.csv");
}

#[test]
fn export_round_trips_through_a_json_file() {
    let results = mixed_results();
    let export = build_export(&results, "input.csv", 0.05);

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("report.json");
    write_json(&path, &export).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(
        parsed["summary"]["total_pairs"].as_u64().unwrap() as usize,
        results.len()
    );
    assert!(parsed["results"].as_array().unwrap().len() == results.len());
    assert!(parsed["disclaimer"].as_str().unwrap().contains("multiple comparisons"));
}
