//! Savings Projection CLI
//!
//! Command-line interface for projections, simulations and planning

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;

use savings_projection::params::MAX_HORIZON_YEARS;
use savings_projection::monte_carlo::{simulate, simulate_seeded, MonteCarloParams, ThreadUniform};
use savings_projection::planning::{fire, withdrawal, FireParams, GoalPlan, WithdrawalParams};
use savings_projection::scenario::ScenarioRunner;
use savings_projection::{AccountType, ContributionFrequency, ProjectionParams, TaxRuleTable};

#[derive(Parser)]
#[command(name = "savings_projection")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Tax rule CSV; the built-in Swedish table is used when omitted
    #[arg(long, global = true)]
    tax_rules: Option<PathBuf>,

    /// Print JSON instead of a table
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug, Clone)]
struct PlanArgs {
    /// Starting portfolio value
    #[arg(long, default_value_t = 10_000.0)]
    initial: f64,

    /// Monthly contribution
    #[arg(long, default_value_t = 1_000.0)]
    monthly: f64,

    /// Annual return in percent
    #[arg(long, default_value_t = 7.0)]
    rate: f64,

    /// Projection horizon in years
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u32).range(0..=MAX_HORIZON_YEARS as i64))]
    years: u32,
}

#[derive(Subcommand)]
enum Commands {
    /// Year-by-year projection with fees and tax
    Project {
        #[command(flatten)]
        plan: PlanArgs,

        /// Account type (isk, kf, af)
        #[arg(long, default_value = "isk")]
        account: String,

        /// Contribution frequency (monthly, quarterly, annually)
        #[arg(long, default_value = "monthly")]
        frequency: String,

        /// Annual management fee in percent
        #[arg(long, default_value_t = 0.0)]
        fee: f64,

        /// Annual inflation in percent
        #[arg(long, default_value_t = 0.0)]
        inflation: f64,

        /// First calendar year of the projection
        #[arg(long, default_value_t = savings_projection::params::DEFAULT_START_YEAR)]
        start_year: i32,
    },

    /// Monte Carlo simulation of uncertain returns
    Simulate {
        #[arg(long, default_value_t = 100_000.0)]
        initial: f64,

        #[arg(long, default_value_t = 5_000.0)]
        monthly: f64,

        /// Expected annual return in percent
        #[arg(long, default_value_t = 7.0)]
        mean: f64,

        /// Annual volatility in percent
        #[arg(long, default_value_t = 15.0)]
        volatility: f64,

        #[arg(long, default_value_t = 20, value_parser = clap::value_parser!(u32).range(0..=MAX_HORIZON_YEARS as i64))]
        years: u32,

        #[arg(long, default_value_t = 1_000)]
        simulations: u32,

        /// Seed for a reproducible run
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Compare the three account types on the same plan
    Compare {
        #[command(flatten)]
        plan: PlanArgs,

        #[arg(long, default_value_t = 0.0)]
        fee: f64,
    },

    /// Contributions needed to reach a target
    Goal {
        #[command(flatten)]
        plan: PlanArgs,

        /// Target amount
        #[arg(long)]
        target: f64,
    },

    /// Sustainability of monthly withdrawals
    Withdraw {
        #[arg(long, default_value_t = 2_000_000.0)]
        capital: f64,

        #[arg(long, default_value_t = 20_000.0)]
        monthly: f64,

        #[arg(long, default_value_t = 5.0)]
        rate: f64,

        #[arg(long, default_value_t = 25, value_parser = clap::value_parser!(u32).range(0..=MAX_HORIZON_YEARS as i64))]
        years: u32,
    },

    /// Financial independence figures
    Fire {
        #[arg(long, default_value_t = 30_000.0)]
        expenses: f64,

        #[arg(long, default_value_t = 500_000.0)]
        savings: f64,

        #[arg(long, default_value_t = 10_000.0)]
        monthly: f64,

        #[arg(long, default_value_t = 7.0)]
        rate: f64,

        /// Sustainable withdrawal rate in percent
        #[arg(long, default_value_t = 4.0)]
        withdrawal_rate: f64,

        #[arg(long, default_value_t = 11, value_parser = clap::value_parser!(u32).range(0..=MAX_HORIZON_YEARS as i64))]
        years_to_retirement: u32,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let rules = match &cli.tax_rules {
        Some(path) => TaxRuleTable::from_csv_path(path)
            .with_context(|| format!("failed to load tax rules from {}", path.display()))?,
        None => TaxRuleTable::swedish_default(),
    };
    let runner = ScenarioRunner::with_rules(rules);

    match cli.command {
        Commands::Project {
            plan,
            account,
            frequency,
            fee,
            inflation,
            start_year,
        } => {
            let params = ProjectionParams {
                initial_amount: plan.initial,
                monthly_contribution: plan.monthly,
                annual_interest_rate: plan.rate,
                years: plan.years,
                account_type: account.parse::<AccountType>()?,
                contribution_frequency: frequency.parse::<ContributionFrequency>()?,
                management_fee_percent: fee,
                inflation_rate: inflation,
                start_year,
            };
            let result = runner.run(&params);
            if cli.json {
                return print_json(&result);
            }

            println!("Projection ({}, {} years)", params.account_type.description().name, params.years);
            println!(
                "{:>4} {:>6} {:>14} {:>14} {:>14} {:>10} {:>10}",
                "Year", "Cal", "Value", "Contributed", "Interest", "Tax", "Fees"
            );
            println!("{}", "-".repeat(78));
            for snap in &result.yearly_breakdown {
                println!(
                    "{:>4} {:>6} {:>14.2} {:>14.2} {:>14.2} {:>10.2} {:>10.2}",
                    snap.year,
                    snap.calendar_year,
                    snap.value,
                    snap.contributions,
                    snap.interest,
                    snap.tax_paid,
                    snap.fees_paid
                );
            }

            let summary = result.summary();
            println!("\nSummary:");
            println!("  Final value: {:.2}", result.total_value);
            println!("  Contributions: {:.2}", result.total_contributions);
            println!("  Interest: {:.2}", result.total_interest);
            println!("  Tax paid: {:.2} ({:.1}%)", result.total_tax_paid, summary.tax_share_percent);
            println!("  Fees paid: {:.2} ({:.1}%)", result.total_fees_paid, summary.fee_share_percent);
            if let Some(real) = result.real_value_after_inflation {
                println!("  Real value: {:.2}", real);
            }
        }

        Commands::Simulate {
            initial,
            monthly,
            mean,
            volatility,
            years,
            simulations,
            seed,
        } => {
            let params = MonteCarloParams {
                initial_amount: initial,
                monthly_contribution: monthly,
                mean_return: mean,
                volatility,
                years,
                simulations,
                ..Default::default()
            };
            let result = match seed {
                Some(seed) => simulate_seeded(&params, seed),
                None => simulate(&params, &mut ThreadUniform::new()),
            };
            if cli.json {
                return print_json(&result);
            }

            println!("Monte Carlo ({} simulations, {} years)", simulations, years);
            println!(
                "{:>4} {:>14} {:>14} {:>14} {:>14} {:>14}",
                "Year", "P10", "P25", "P50", "P75", "P90"
            );
            println!("{}", "-".repeat(79));
            for band in &result.percentiles {
                println!(
                    "{:>4} {:>14.0} {:>14.0} {:>14.0} {:>14.0} {:>14.0}",
                    band.year, band.p10, band.p25, band.p50, band.p75, band.p90
                );
            }
            println!("\nFinal value:");
            println!("  Worst case (5%): {:.0}", result.final_values.worst_case);
            println!("  Median: {:.0}", result.final_values.median);
            println!("  Best case (95%): {:.0}", result.final_values.best_case);
            println!("\nGoal probabilities:");
            for goal in &result.goal_probabilities {
                println!("  {:>12.0}: {:.1}%", goal.goal, goal.probability * 100.0);
            }
        }

        Commands::Compare { plan, fee } => {
            let params = ProjectionParams {
                initial_amount: plan.initial,
                monthly_contribution: plan.monthly,
                annual_interest_rate: plan.rate,
                years: plan.years,
                management_fee_percent: fee,
                ..Default::default()
            };
            let comparison = runner.compare_account_types(&params);
            if cli.json {
                return print_json(&comparison);
            }

            println!("{:>4} {:>14} {:>12} {:>12}", "Type", "Final value", "Tax", "Fees");
            println!("{}", "-".repeat(45));
            for entry in &comparison.entries {
                println!(
                    "{:>4} {:>14.2} {:>12.2} {:>12.2}",
                    entry.account_type.code(),
                    entry.result.total_value,
                    entry.result.total_tax_paid,
                    entry.result.total_fees_paid
                );
            }
            if let Some(best) = comparison.best() {
                println!("\nBest: {} (+{:.2} over worst)", best.account_type, comparison.spread());
            }
        }

        Commands::Goal { plan, target } => {
            let goal = GoalPlan::evaluate(target, plan.years, plan.initial, plan.monthly, plan.rate);
            if cli.json {
                return print_json(&goal);
            }

            println!("Goal: {:.0} in {} years", goal.target_amount, goal.target_years);
            println!("  Projected value: {:.2} ({:.1}%)", goal.projected_value, goal.progress_percent);
            println!("  Shortfall: {:.2}", goal.shortfall);
            println!("  Required monthly: {:.2}", goal.required_monthly);
            println!("  Required initial: {:.2}", goal.required_initial);
            println!("\nMilestones:");
            for m in &goal.milestones {
                let years = m
                    .years_to_reach
                    .map_or_else(|| "-".to_string(), |y| format!("year {}", y.ceil()));
                println!(
                    "  {:>3.0}% {:>14.0} {:>10} {}",
                    m.fraction * 100.0,
                    m.amount,
                    years,
                    if m.reached { "reached" } else { "" }
                );
            }
        }

        Commands::Withdraw {
            capital,
            monthly,
            rate,
            years,
        } => {
            let summary = withdrawal::evaluate(&WithdrawalParams {
                initial_capital: capital,
                monthly_withdrawal: monthly,
                annual_return: rate,
                years,
            });
            if cli.json {
                return print_json(&summary);
            }

            println!("{:>4} {:>14} {:>14}", "Year", "Balance", "Withdrawn");
            println!("{}", "-".repeat(34));
            for point in &summary.path {
                println!("{:>4} {:>14.2} {:>14.2}", point.year, point.balance, point.withdrawn);
            }
            println!("\nSustainable: {}", if summary.sustainable { "yes" } else { "no" });
            println!("  Withdrawal rate: {:.2}%", summary.withdrawal_rate_percent);
            println!("  4% rule maximum: {:.2}/month", summary.recommended_max_monthly);
            if let Some(year) = summary.depletion_year {
                println!("  Depleted in year {}", year);
            }
        }

        Commands::Fire {
            expenses,
            savings,
            monthly,
            rate,
            withdrawal_rate,
            years_to_retirement,
        } => {
            let summary = fire::evaluate(&FireParams {
                monthly_expenses: expenses,
                current_savings: savings,
                monthly_savings: monthly,
                expected_return: rate,
                withdrawal_rate,
                years_until_retirement: years_to_retirement,
            });
            if cli.json {
                return print_json(&summary);
            }

            println!("FI number: {:.0}", summary.fi_number);
            println!("  Progress: {:.1}%", summary.progress_percent);
            println!("  Remaining: {:.0}", summary.remaining);
            if summary.years_to_fi.is_finite() {
                println!("  Years to FI: {:.1}", summary.years_to_fi);
            } else {
                println!("  Years to FI: never at current savings");
            }
            println!("  Savings rate: {:.1}%", summary.savings_rate_percent);
            println!(
                "  Coast FI: {:.0} ({})",
                summary.coast_fi_number,
                if summary.is_coast_fi { "reached" } else { "not reached" }
            );
        }
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
