//! Consolidated report rendering.

use std::cmp::Ordering;

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Color, Table};
use console::style;

use crate::pipeline::{PairResult, TestOutcome};

/// Fixed footer: the engine runs every applicable pair, so the usual caveat
/// applies.
pub const DISCLAIMER: &str =
    "Note: no correction for multiple comparisons is applied; interpret p-values accordingly.";

/// Shown instead of a table when no pair qualified for any scenario.
pub const EMPTY_NOTICE: &str =
    "No applicable variable pairs were found for the declared types.";

/// Sort results for presentation: executed pairs first by ascending p-value,
/// skipped and errored pairs last in dispatch order (the sort is stable).
pub fn sort_results(results: &mut [PairResult]) {
    results.sort_by(|a, b| {
        let key = |r: &PairResult| {
            (
                !r.outcome.is_executed(),
                r.outcome.p_value().unwrap_or(f64::INFINITY),
            )
        };
        key(a).partial_cmp(&key(b)).unwrap_or(Ordering::Equal)
    });
}

/// Render the full report as a table plus the disclaimer footer.
///
/// `alpha` controls the significance marker only; it plays no part in which
/// tests ran.
pub fn render(results: &[PairResult], alpha: f64) -> String {
    if results.is_empty() {
        return format!("{}\n\n{}", style(EMPTY_NOTICE).yellow(), DISCLAIMER);
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec![
        Cell::new("Variable pair").add_attribute(Attribute::Bold),
        Cell::new("Analysis").add_attribute(Attribute::Bold),
        Cell::new("Test").add_attribute(Attribute::Bold),
        Cell::new("Status").add_attribute(Attribute::Bold),
        Cell::new("p-value").add_attribute(Attribute::Bold),
        Cell::new("Effect size").add_attribute(Attribute::Bold),
        Cell::new("Note").add_attribute(Attribute::Bold),
    ]);

    for result in results {
        table.add_row(result_row(result, alpha));
    }

    format!("{table}\n\n{DISCLAIMER}")
}

fn result_row(result: &PairResult, alpha: f64) -> Vec<Cell> {
    let pair = format!("{} vs {}", result.left, result.right);
    match &result.outcome {
        TestOutcome::Executed {
            test,
            p_value,
            effect_size,
            note,
        } => {
            let significant = *p_value < alpha;
            let p_cell = if significant {
                Cell::new(format!("{p_value:.4} *"))
                    .fg(Color::Green)
                    .add_attribute(Attribute::Bold)
            } else {
                Cell::new(format!("{p_value:.4}"))
            };
            vec![
                Cell::new(pair),
                Cell::new(result.scenario.label()),
                Cell::new(test),
                Cell::new("executed"),
                p_cell,
                Cell::new(format!("{} = {:.3}", effect_size.label, effect_size.value)),
                Cell::new(note),
            ]
        }
        TestOutcome::Skipped { test, reason } => vec![
            Cell::new(pair),
            Cell::new(result.scenario.label()),
            Cell::new(test),
            Cell::new("skipped (assumption)").fg(Color::Yellow),
            Cell::new("-"),
            Cell::new("-"),
            Cell::new(reason),
        ],
        TestOutcome::Failed { message } => vec![
            Cell::new(pair),
            Cell::new(result.scenario.label()),
            Cell::new("none"),
            Cell::new("error").fg(Color::Red),
            Cell::new("-"),
            Cell::new("-"),
            Cell::new(message),
        ],
    }
}
