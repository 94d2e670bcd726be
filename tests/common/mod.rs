//! Shared test fixtures and dataset generators

use std::collections::HashMap;

use polars::prelude::*;
use statrs::distribution::{ContinuousCDF, Normal};

/// Build a type map from (column, label) pairs.
pub fn type_map(entries: &[(&str, &str)]) -> HashMap<String, String> {
    entries
        .iter()
        .map(|(col, label)| (col.to_string(), label.to_string()))
        .collect()
}

/// Deterministic normal-shaped sample: n values at evenly spaced normal
/// quantiles, scaled to the given mean and standard deviation. Passes a
/// normality test by construction.
pub fn normal_sample(n: usize, mean: f64, sd: f64) -> Vec<f64> {
    let dist = Normal::new(0.0, 1.0).unwrap();
    (1..=n)
        .map(|i| mean + sd * dist.inverse_cdf((i as f64 - 0.375) / (n as f64 + 0.25)))
        .collect()
}

/// Deterministic right-skewed sample with a long tail; fails a normality
/// test for n >= 20.
pub fn skewed_sample(n: usize) -> Vec<f64> {
    (1..=n)
        .map(|i| {
            let u = i as f64 / (n as f64 + 1.0);
            (u / (1.0 - u)).powf(1.5)
        })
        .collect()
}

/// Two groups of 30 normal observations (sd 2.0) stacked into a
/// (group, score) frame.
pub fn group_comparison_df(mean_a: f64, mean_b: f64) -> DataFrame {
    let mut group: Vec<&str> = Vec::new();
    let mut score: Vec<f64> = Vec::new();
    for v in normal_sample(30, mean_a, 2.0) {
        group.push("A");
        score.push(v);
    }
    for v in normal_sample(30, mean_b, 2.0) {
        group.push("B");
        score.push(v);
    }
    df! { "group" => group, "score" => score }.unwrap()
}

/// A frame whose second group is heavily skewed, so the normality gate
/// of the mean-comparison scenario trips.
pub fn skewed_group_df() -> DataFrame {
    let mut group: Vec<&str> = Vec::new();
    let mut score: Vec<f64> = Vec::new();
    for v in normal_sample(30, 10.0, 2.0) {
        group.push("A");
        score.push(v);
    }
    for v in skewed_sample(30) {
        group.push("B");
        score.push(v);
    }
    df! { "group" => group, "score" => score }.unwrap()
}

/// A 2x2 categorical frame with an expected cell count of 2 (row totals
/// 4/16, column totals 10/10).
pub fn sparse_contingency_df() -> DataFrame {
    let mut left: Vec<&str> = Vec::new();
    let mut right: Vec<&str> = Vec::new();
    let mut push = |l: &'static str, r: &'static str, n: usize| {
        for _ in 0..n {
            left.push(l);
            right.push(r);
        }
    };
    push("a", "x", 2);
    push("a", "y", 2);
    push("b", "x", 8);
    push("b", "y", 8);
    df! { "left" => left, "right" => right }.unwrap()
}
