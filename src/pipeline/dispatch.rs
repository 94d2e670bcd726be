//! Pairwise test dispatcher.
//!
//! A small registry maps each analysis scenario to a pair-enumeration rule
//! and a handler. The dispatch loop itself never changes when a scenario is
//! added; a fifth scenario (say ordinal vs ordinal) is a new registry entry
//! plus its handler.

use std::fmt;

use indicatif::{ProgressBar, ProgressStyle};
use polars::prelude::*;
use serde::Serialize;

use super::scenarios;
use super::types::RolePartition;

/// Analysis category of a variable pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Scenario {
    ContinuousVsBinary,
    ContinuousVsContinuous,
    CategoricalVsCategorical,
    ContinuousVsOrdinal,
}

impl Scenario {
    pub fn label(&self) -> &'static str {
        match self {
            Scenario::ContinuousVsBinary => "continuous vs binary",
            Scenario::ContinuousVsContinuous => "continuous vs continuous",
            Scenario::CategoricalVsCategorical => "categorical vs categorical",
            Scenario::ContinuousVsOrdinal => "continuous vs ordinal",
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Standardized magnitude-of-association statistic reported with a test.
#[derive(Debug, Clone, Serialize)]
pub struct EffectSize {
    pub label: String,
    pub value: f64,
}

impl EffectSize {
    pub fn new(label: &str, value: f64) -> Self {
        EffectSize {
            label: label.to_string(),
            value,
        }
    }
}

/// Outcome of one evaluated pair.
///
/// The invariant "p-value and effect size are present iff the test executed"
/// is carried by the variant shape, not by optional fields.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TestOutcome {
    Executed {
        test: String,
        p_value: f64,
        effect_size: EffectSize,
        note: String,
    },
    #[serde(rename = "skipped_assumption_violation")]
    Skipped { test: String, reason: String },
    #[serde(rename = "error")]
    Failed { message: String },
}

impl TestOutcome {
    pub fn is_executed(&self) -> bool {
        matches!(self, TestOutcome::Executed { .. })
    }

    pub fn p_value(&self) -> Option<f64> {
        match self {
            TestOutcome::Executed { p_value, .. } => Some(*p_value),
            _ => None,
        }
    }

    pub fn status_label(&self) -> &'static str {
        match self {
            TestOutcome::Executed { .. } => "executed",
            TestOutcome::Skipped { .. } => "skipped_assumption_violation",
            TestOutcome::Failed { .. } => "error",
        }
    }
}

/// One record of the consolidated report.
#[derive(Debug, Clone, Serialize)]
pub struct PairResult {
    pub left: String,
    pub right: String,
    pub scenario: Scenario,
    #[serde(flatten)]
    pub outcome: TestOutcome,
}

type SetSelector = fn(&RolePartition) -> &[String];

fn continuous_set(p: &RolePartition) -> &[String] {
    &p.continuous
}
fn binary_set(p: &RolePartition) -> &[String] {
    &p.binary
}
fn categorical_set(p: &RolePartition) -> &[String] {
    &p.categorical
}
fn ordinal_set(p: &RolePartition) -> &[String] {
    &p.ordinal
}

/// How a scenario enumerates its column pairs.
enum Pairing {
    /// Ordered pairs: every column of the first set against every column of
    /// the second.
    Cartesian(SetSelector, SetSelector),
    /// Unordered 2-combinations of a single set; each pair appears once.
    Combinations(SetSelector),
}

impl Pairing {
    fn pairs(&self, partition: &RolePartition) -> Vec<(String, String)> {
        match self {
            Pairing::Cartesian(left, right) => {
                let (a, b) = (left(partition), right(partition));
                a.iter()
                    .flat_map(|x| b.iter().map(move |y| (x.clone(), y.clone())))
                    .collect()
            }
            Pairing::Combinations(set) => {
                let names = set(partition);
                let n = names.len();
                (0..n)
                    .flat_map(|i| {
                        ((i + 1)..n).map(move |j| (names[i].clone(), names[j].clone()))
                    })
                    .collect()
            }
        }
    }
}

/// A handler evaluates one pair. `Ok(None)` means the pair produces no
/// record at all (for example no complete observations for a rank
/// correlation); `Err` is recorded as a `Failed` outcome for that pair only.
type Handler = fn(&DataFrame, &str, &str) -> anyhow::Result<Option<TestOutcome>>;

struct ScenarioSpec {
    scenario: Scenario,
    pairing: Pairing,
    handler: Handler,
}

/// Registered scenarios, in report order.
fn registry() -> Vec<ScenarioSpec> {
    vec![
        ScenarioSpec {
            scenario: Scenario::ContinuousVsBinary,
            pairing: Pairing::Cartesian(continuous_set, binary_set),
            handler: scenarios::continuous_vs_binary,
        },
        ScenarioSpec {
            scenario: Scenario::ContinuousVsContinuous,
            pairing: Pairing::Combinations(continuous_set),
            handler: scenarios::continuous_vs_continuous,
        },
        ScenarioSpec {
            scenario: Scenario::CategoricalVsCategorical,
            pairing: Pairing::Combinations(categorical_set),
            handler: scenarios::categorical_vs_categorical,
        },
        ScenarioSpec {
            scenario: Scenario::ContinuousVsOrdinal,
            pairing: Pairing::Cartesian(continuous_set, ordinal_set),
            handler: scenarios::continuous_vs_ordinal,
        },
    ]
}

/// Number of pairs the dispatcher will evaluate for a partition.
pub fn count_pairs(partition: &RolePartition) -> usize {
    registry()
        .iter()
        .map(|spec| spec.pairing.pairs(partition).len())
        .sum()
}

/// Evaluate every registered scenario over its pairs, in order.
///
/// Per-pair failures are isolated: a handler error becomes a `Failed` record
/// for that pair and never aborts the remaining pairs. The sequence is
/// deterministic for identical inputs - role sets follow dataset column
/// order and pairs are evaluated sequentially.
pub fn run_all_pairs(df: &DataFrame, partition: &RolePartition) -> Vec<PairResult> {
    let total = count_pairs(partition);
    let pb = ProgressBar::new(total as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("   Evaluating pairs [{bar:40.cyan/blue}] {pos}/{len} ({percent}%)")
            .unwrap()
            .progress_chars("=>-"),
    );

    let mut results = Vec::with_capacity(total);
    for spec in registry() {
        for (left, right) in spec.pairing.pairs(partition) {
            let outcome = match (spec.handler)(df, &left, &right) {
                Ok(Some(outcome)) => outcome,
                Ok(None) => {
                    pb.inc(1);
                    continue;
                }
                Err(err) => TestOutcome::Failed {
                    message: format!("{err:#}"),
                },
            };
            results.push(PairResult {
                left,
                right,
                scenario: spec.scenario,
                outcome,
            });
            pb.inc(1);
        }
    }
    pb.finish_and_clear();
    results
}
