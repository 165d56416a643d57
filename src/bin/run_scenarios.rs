//! Run projections for a batch of scenarios from CSV
//!
//! Usage: run_scenarios [INPUT] [OUTPUT] [--tax-rules PATH]
//! Writes one summary row per scenario.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use savings_projection::params::{load_scenarios, loader::DEFAULT_SCENARIOS_PATH};
use savings_projection::{ScenarioRunner, TaxRuleTable};

#[derive(Parser)]
#[command(name = "run_scenarios", about = "Project every scenario in a CSV batch")]
struct Cli {
    /// Scenario CSV
    #[arg(default_value = DEFAULT_SCENARIOS_PATH)]
    input: PathBuf,

    /// Summary CSV to write
    #[arg(default_value = "scenario_summary.csv")]
    output: PathBuf,

    /// Tax rule CSV; the built-in Swedish table is used when omitted
    #[arg(long)]
    tax_rules: Option<PathBuf>,
}

/// One output row per scenario
#[derive(Debug, Serialize)]
struct SummaryRow<'a> {
    name: &'a str,
    account_type: &'static str,
    years: u32,
    total_value: f64,
    total_contributions: f64,
    total_interest: f64,
    total_tax_paid: f64,
    total_fees_paid: f64,
    real_value: Option<f64>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let start = Instant::now();
    println!("Loading scenarios from {}...", cli.input.display());
    let scenarios = load_scenarios(&cli.input)
        .with_context(|| format!("failed to load scenarios from {}", cli.input.display()))?;
    println!("Loaded {} scenarios in {:?}", scenarios.len(), start.elapsed());

    let runner = match &cli.tax_rules {
        Some(path) => ScenarioRunner::with_rules(
            TaxRuleTable::from_csv_path(path)
                .with_context(|| format!("failed to load tax rules from {}", path.display()))?,
        ),
        None => ScenarioRunner::new(),
    };

    println!("Running projections...");
    let proj_start = Instant::now();
    let batch: Vec<_> = scenarios.iter().map(|s| s.params.clone()).collect();
    let results = runner.run_batch(&batch);
    println!("Projections complete in {:?}", proj_start.elapsed());

    let mut writer = csv::Writer::from_path(&cli.output)
        .with_context(|| format!("failed to create {}", cli.output.display()))?;
    for (scenario, result) in scenarios.iter().zip(&results) {
        writer.serialize(SummaryRow {
            name: &scenario.name,
            account_type: scenario.params.account_type.code(),
            years: scenario.params.years,
            total_value: result.total_value,
            total_contributions: result.total_contributions,
            total_interest: result.total_interest,
            total_tax_paid: result.total_tax_paid,
            total_fees_paid: result.total_fees_paid,
            real_value: result.real_value_after_inflation,
        })?;
    }
    writer.flush()?;
    println!("Output written to {}", cli.output.display());

    println!("\nBatch Summary:");
    for (scenario, result) in scenarios.iter().zip(&results) {
        println!(
            "  {:<24} value={:>14.0} tax={:>12.0} fees={:>12.0}",
            scenario.name, result.total_value, result.total_tax_paid, result.total_fees_paid
        );
    }

    println!("\nTotal time: {:?}", start.elapsed());
    Ok(())
}
