//! Terminal styling utilities for the CLI surface

use std::path::Path;

use console::style;

/// Print the application banner
pub fn print_banner(version: &str) {
    println!();
    println!(
        "  {} {}",
        style("autostat").cyan().bold(),
        style(format!("v{version}")).dim()
    );
    println!(
        "  {}",
        style("automatic pairwise statistical test selection").dim()
    );
    println!("  {}", style("─".repeat(50)).dim());
}

/// Print a numbered step header
pub fn print_step_header(step: usize, total: usize, title: &str) {
    println!();
    println!(
        "  {} {}",
        style(format!("[{step}/{total}]")).cyan().bold(),
        style(title).white().bold()
    );
}

/// Print the configuration card
pub fn print_config(input: &Path, types: &Path, alpha: f64) {
    println!();
    println!("  {}", style("Configuration").white().bold());
    println!("    input: {}", style(input.display()).green());
    println!("    types: {}", style(types.display()).green());
    println!("    alpha: {}", style(alpha).green());
}

/// Print a dimmed informational line
pub fn print_info(message: &str) {
    println!("    {}", style(message).dim());
}

/// Print a yellow warning line
pub fn print_warning(message: &str) {
    println!("    {} {}", style("[warn]").yellow().bold(), message);
}
