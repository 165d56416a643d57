//! Plain compound-interest calculator without tax, fees or inflation
//!
//! Deposits land at the end of each month, after that month's growth.

use serde::{Deserialize, Serialize};

/// One year of the plain calculator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimpleYear {
    pub year: u32,
    pub value: f64,
    pub contributions: f64,
    pub interest: f64,
}

/// Result of the plain calculator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimpleResult {
    pub total_value: f64,
    pub total_contributions: f64,
    pub total_interest: f64,
    pub yearly_breakdown: Vec<SimpleYear>,
}

/// Monthly compounding with an end-of-month deposit
pub fn calculate_compound_interest(
    initial_amount: f64,
    monthly_contribution: f64,
    annual_interest_rate: f64,
    years: u32,
) -> SimpleResult {
    let monthly_rate = annual_interest_rate / 100.0 / 12.0;
    let mut value = initial_amount;
    let mut contributions = initial_amount;
    let mut yearly_breakdown = Vec::with_capacity(years as usize);

    for year in 1..=years {
        for _month in 1..=12 {
            value = value * (1.0 + monthly_rate) + monthly_contribution;
            contributions += monthly_contribution;
        }

        yearly_breakdown.push(SimpleYear {
            year,
            value,
            contributions,
            interest: value - contributions,
        });
    }

    SimpleResult {
        total_value: value,
        total_contributions: contributions,
        total_interest: value - contributions,
        yearly_breakdown,
    }
}
