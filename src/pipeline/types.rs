//! Variable type resolution - label vocabulary, role partition, and numeric
//! coercion of columns declared continuous or ordinal.

use std::collections::HashMap;

use anyhow::Result;
use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// Statistical role of a column, as declared by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VariableRole {
    Continuous,
    Binary,
    Nominal,
    Ordinal,
}

impl std::fmt::Display for VariableRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VariableRole::Continuous => write!(f, "continuous"),
            VariableRole::Binary => write!(f, "binary"),
            VariableRole::Nominal => write!(f, "nominal"),
            VariableRole::Ordinal => write!(f, "ordinal"),
        }
    }
}

/// User-facing label vocabulary, mapping type labels to roles.
///
/// Matching is case-insensitive and trims whitespace. The default vocabulary
/// carries English and Polish labels (the deployments this replaces annotated
/// types in Polish); deployments can swap in their own via JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeVocabulary {
    pub continuous: Vec<String>,
    pub binary: Vec<String>,
    pub nominal: Vec<String>,
    pub ordinal: Vec<String>,
}

impl Default for TypeVocabulary {
    fn default() -> Self {
        let labels = |v: &[&str]| v.iter().map(|s| s.to_string()).collect();
        TypeVocabulary {
            continuous: labels(&["continuous", "ciągła", "ciagla"]),
            binary: labels(&["binary", "binarna"]),
            nominal: labels(&["nominal", "nominalna"]),
            ordinal: labels(&["ordinal", "porządkowa", "porzadkowa"]),
        }
    }
}

impl TypeVocabulary {
    /// Resolve a raw label to a role, or `None` if the label is unknown.
    pub fn resolve(&self, label: &str) -> Option<VariableRole> {
        let needle = label.trim().to_lowercase();
        let matches = |set: &[String]| set.iter().any(|l| l.to_lowercase() == needle);
        if matches(&self.continuous) {
            Some(VariableRole::Continuous)
        } else if matches(&self.binary) {
            Some(VariableRole::Binary)
        } else if matches(&self.nominal) {
            Some(VariableRole::Nominal)
        } else if matches(&self.ordinal) {
            Some(VariableRole::Ordinal)
        } else {
            None
        }
    }
}

/// What to do with a column whose declared label is not in the vocabulary.
///
/// The observed deployments were inconsistent here, so the choice is an
/// explicit configuration rather than a lookup side effect. `Ignore` excludes
/// the column from every role set; `Reject` fails type resolution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnknownLabelPolicy {
    #[default]
    Ignore,
    Reject,
}

/// Four disjoint role sets, in dataset column order.
#[derive(Debug, Clone, Default)]
pub struct RolePartition {
    pub continuous: Vec<String>,
    pub binary: Vec<String>,
    pub nominal: Vec<String>,
    pub ordinal: Vec<String>,
    /// Nominal and binary columns together, still in dataset column order.
    /// This is the set chi-square independence testing draws pairs from.
    pub categorical: Vec<String>,
}

impl RolePartition {
    fn push(&mut self, name: &str, role: VariableRole) {
        let name = name.to_string();
        match role {
            VariableRole::Continuous => self.continuous.push(name),
            VariableRole::Binary => {
                self.binary.push(name.clone());
                self.categorical.push(name);
            }
            VariableRole::Nominal => {
                self.nominal.push(name.clone());
                self.categorical.push(name);
            }
            VariableRole::Ordinal => self.ordinal.push(name),
        }
    }
}

/// Result of type resolution: the coerced dataset, the role partition, and
/// the columns that were excluded under the `Ignore` policy.
#[derive(Debug)]
pub struct ResolvedTypes {
    pub df: DataFrame,
    pub partition: RolePartition,
    /// (column, label) pairs whose labels were not recognized.
    pub ignored: Vec<(String, String)>,
}

/// Normalize the raw type map against the dataset.
///
/// Map entries naming absent columns are dropped without error. Columns
/// declared continuous or ordinal are coerced to Float64; values that fail
/// numeric parsing become null.
pub fn resolve_types(
    df: &DataFrame,
    raw_map: &HashMap<String, String>,
    vocabulary: &TypeVocabulary,
    policy: UnknownLabelPolicy,
) -> Result<ResolvedTypes> {
    let mut out = df.clone();
    let mut partition = RolePartition::default();
    let mut ignored = Vec::new();

    // Iterate in dataset column order so the partition (and every pair
    // enumeration derived from it) is deterministic.
    let column_names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|n| n.to_string())
        .collect();

    for name in &column_names {
        let Some(label) = raw_map.get(name) else {
            continue;
        };
        let Some(role) = vocabulary.resolve(label) else {
            match policy {
                UnknownLabelPolicy::Ignore => {
                    ignored.push((name.clone(), label.clone()));
                    continue;
                }
                UnknownLabelPolicy::Reject => anyhow::bail!(
                    "unrecognized type label '{label}' for column '{name}'"
                ),
            }
        };

        if matches!(role, VariableRole::Continuous | VariableRole::Ordinal) {
            let coerced = coerce_numeric(out.column(name)?)?;
            out.with_column(coerced)?;
        }
        partition.push(name, role);
    }

    Ok(ResolvedTypes {
        df: out,
        partition,
        ignored,
    })
}

/// Cast a column to Float64, parsing text values and turning anything
/// unparseable into null.
fn coerce_numeric(col: &Column) -> Result<Column> {
    if col.dtype().is_primitive_numeric() {
        return Ok(col.cast(&DataType::Float64)?);
    }
    let casted = col.cast(&DataType::String)?;
    let ca = casted.str()?;
    let values: Vec<Option<f64>> = ca.iter().map(|opt| opt.and_then(parse_numeric)).collect();
    Ok(Column::new(col.name().clone(), values))
}

/// Parse a numeric value, accepting both dot and comma decimal separators.
/// Non-finite literals ("nan", "inf") become missing; the tests downstream
/// are only defined over finite observations.
fn parse_numeric(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed
        .parse()
        .ok()
        .or_else(|| trimmed.replace(',', ".").parse().ok())
        .filter(|v: &f64| v.is_finite())
}
