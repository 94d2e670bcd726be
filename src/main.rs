//! Autostat CLI - load a CSV and a type map, run every applicable pairwise
//! statistical test, and print the consolidated report.

use std::time::Instant;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use console::style;

use autostat::cli::Cli;
use autostat::pipeline::{
    count_pairs, load_csv, load_type_map, preview, resolve_types, run_all_pairs, TypeVocabulary,
    UnknownLabelPolicy,
};
use autostat::report::{build_export, render, sort_results, write_json};
use autostat::utils::{
    create_spinner, finish_with_success, print_banner, print_config, print_info,
    print_step_header, print_warning,
};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let started = Instant::now();

    print_banner(env!("CARGO_PKG_VERSION"));

    let spinner = create_spinner("Loading dataset...");
    let df = load_csv(&cli.input)?;
    finish_with_success(
        &spinner,
        &format!("Loaded {} rows x {} columns", df.height(), df.width()),
    );

    // Preview mode: emit the payload the type-annotation UI consumes and stop.
    if let Some(n) = cli.preview {
        let snapshot = preview(&df, n);
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        return Ok(());
    }

    let types_path = cli
        .types
        .as_deref()
        .ok_or_else(|| anyhow!("--types is required unless --preview is used"))?;
    print_config(&cli.input, types_path, cli.alpha);

    print_step_header(1, 3, "Type resolution");
    let raw_map = load_type_map(types_path)?;
    let vocabulary = match &cli.vocabulary {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read vocabulary: {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("Invalid vocabulary JSON: {}", path.display()))?
        }
        None => TypeVocabulary::default(),
    };
    let policy = if cli.strict_labels {
        UnknownLabelPolicy::Reject
    } else {
        UnknownLabelPolicy::Ignore
    };
    let resolved = resolve_types(&df, &raw_map, &vocabulary, policy)?;
    for (column, label) in &resolved.ignored {
        print_warning(&format!(
            "column '{column}' excluded: unrecognized type label '{label}'"
        ));
    }
    print_info(&format!(
        "{} continuous, {} binary, {} nominal, {} ordinal",
        resolved.partition.continuous.len(),
        resolved.partition.binary.len(),
        resolved.partition.nominal.len(),
        resolved.partition.ordinal.len()
    ));

    print_step_header(2, 3, "Pairwise tests");
    print_info(&format!(
        "{} candidate pairs",
        count_pairs(&resolved.partition)
    ));
    let mut results = run_all_pairs(&resolved.df, &resolved.partition);
    sort_results(&mut results);

    print_step_header(3, 3, "Report");
    println!();
    println!("{}", render(&results, cli.alpha));

    if let Some(path) = &cli.json {
        let export = build_export(&results, &cli.input.display().to_string(), cli.alpha);
        write_json(path, &export)?;
        println!();
        println!(
            "  {} {}",
            style("Report written to").dim(),
            style(path.display()).green()
        );
    }

    println!();
    println!(
        "  {}",
        style(format!("Done in {:.2?}", started.elapsed())).dim()
    );
    Ok(())
}
