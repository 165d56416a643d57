//! Savings goal planning
//!
//! Closed-form annuity figures with monthly compounding and end-of-month
//! contributions. A zero rate falls back to the linear forms.

use serde::{Deserialize, Serialize};

use crate::params::horizon_months;

/// Fractions of the target reported as milestones
pub const MILESTONE_FRACTIONS: [f64; 4] = [0.25, 0.5, 0.75, 1.0];

fn monthly_rate(annual_rate_percent: f64) -> f64 {
    annual_rate_percent / 100.0 / 12.0
}

/// Month count as a `powi` exponent, clamped to `i32::MAX`
fn month_count(years: u32) -> i32 {
    i32::try_from(horizon_months(years)).unwrap_or(i32::MAX)
}

/// Value of `initial` plus `monthly` deposits after `years`
pub fn future_value(initial: f64, monthly: f64, annual_rate_percent: f64, years: u32) -> f64 {
    let r = monthly_rate(annual_rate_percent);
    let n = month_count(years);
    if r == 0.0 {
        return initial + monthly * n as f64;
    }
    let growth = (1.0 + r).powi(n);
    initial * growth + monthly * (growth - 1.0) / r
}

/// Monthly deposit needed to reach `target` from `initial`, never negative
pub fn required_monthly_contribution(target: f64, initial: f64, annual_rate_percent: f64, years: u32) -> f64 {
    let r = monthly_rate(annual_rate_percent);
    let n = month_count(years);
    if n == 0 {
        return 0.0;
    }
    if r == 0.0 {
        return ((target - initial) / n as f64).max(0.0);
    }
    let growth = (1.0 + r).powi(n);
    ((target - initial * growth) / ((growth - 1.0) / r)).max(0.0)
}

/// Lump sum needed today to reach `target` alongside `monthly` deposits, never negative
pub fn required_initial_amount(target: f64, monthly: f64, annual_rate_percent: f64, years: u32) -> f64 {
    let r = monthly_rate(annual_rate_percent);
    let n = month_count(years);
    if r == 0.0 {
        return (target - monthly * n as f64).max(0.0);
    }
    let growth = (1.0 + r).powi(n);
    ((target - monthly * (growth - 1.0) / r) / growth).max(0.0)
}

/// Years of `monthly` deposits needed to accumulate `amount`
///
/// Only the deposits are counted. `None` when no deposits are made or the
/// amount is out of reach.
pub fn years_to_accumulate(amount: f64, monthly: f64, annual_rate_percent: f64) -> Option<f64> {
    if monthly <= 0.0 {
        return None;
    }
    let r = monthly_rate(annual_rate_percent);
    if r == 0.0 {
        return Some(amount / monthly / 12.0);
    }
    let arg = amount * r / monthly + 1.0;
    if arg <= 0.0 || r <= -1.0 {
        return None;
    }
    let months = arg.ln() / (1.0 + r).ln();
    months.is_finite().then_some(months / 12.0)
}

/// One step towards the target
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    pub fraction: f64,
    pub amount: f64,
    pub years_to_reach: Option<f64>,
    /// Reached within the horizon by the current plan
    pub reached: bool,
}

/// Evaluation of a savings plan against a target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalPlan {
    pub target_amount: f64,
    pub target_years: u32,
    pub required_monthly: f64,
    pub required_initial: f64,
    pub projected_value: f64,
    /// Projected value as a share of the target, capped at 100
    pub progress_percent: f64,
    pub shortfall: f64,
    pub milestones: Vec<Milestone>,
}

impl GoalPlan {
    /// Evaluate the current plan against `target` over `years`
    pub fn evaluate(
        target: f64,
        years: u32,
        initial: f64,
        monthly: f64,
        annual_rate_percent: f64,
    ) -> Self {
        let projected_value = future_value(initial, monthly, annual_rate_percent, years);
        let progress_percent = if target > 0.0 {
            (projected_value / target * 100.0).min(100.0)
        } else {
            100.0
        };

        let milestones = MILESTONE_FRACTIONS
            .iter()
            .map(|&fraction| {
                let amount = target * fraction;
                let years_to_reach = years_to_accumulate(amount, monthly, annual_rate_percent);
                let within_horizon = years_to_reach.is_some_and(|y| y <= years as f64);
                Milestone {
                    fraction,
                    amount,
                    years_to_reach,
                    reached: projected_value >= amount && within_horizon,
                }
            })
            .collect();

        Self {
            target_amount: target,
            target_years: years,
            required_monthly: required_monthly_contribution(target, initial, annual_rate_percent, years),
            required_initial: required_initial_amount(target, monthly, annual_rate_percent, years),
            projected_value,
            progress_percent,
            shortfall: (target - projected_value).max(0.0),
            milestones,
        }
    }

    /// Whether the projected value meets the target
    pub fn on_track(&self) -> bool {
        self.shortfall == 0.0
    }
}
