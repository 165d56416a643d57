//! Projection output structures

use serde::{Deserialize, Serialize};

/// Figures for one projected year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearSnapshot {
    /// Projection year (1-indexed)
    pub year: u32,

    /// Calendar year whose tax rules applied
    pub calendar_year: i32,

    /// End-of-year value after fees and tax
    pub value: f64,

    /// Cumulative contributions including the initial amount
    pub contributions: f64,

    /// value + cumulative fees + cumulative tax - contributions
    pub interest: f64,

    /// Tax deducted this year
    pub tax_paid: f64,

    /// Fees deducted this year
    pub fees_paid: f64,

    /// Value after tax and fees
    pub net_value: f64,

    /// Net value in start-year money, present only with positive inflation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inflation_adjusted_value: Option<f64>,
}

/// Complete projection result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionResult {
    pub total_value: f64,
    pub total_contributions: f64,
    pub total_interest: f64,
    pub total_tax_paid: f64,
    pub total_fees_paid: f64,
    pub net_value: f64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub real_value_after_inflation: Option<f64>,

    /// One entry per projected year, ascending
    pub yearly_breakdown: Vec<YearSnapshot>,
}

impl ProjectionResult {
    /// Final year's snapshot, if any year was projected
    pub fn final_year(&self) -> Option<&YearSnapshot> {
        self.yearly_breakdown.last()
    }

    /// Get summary ratios
    pub fn summary(&self) -> ProjectionSummary {
        ProjectionSummary {
            years: self.yearly_breakdown.len() as u32,
            total_value: self.total_value,
            fee_share_percent: share_percent(self.total_fees_paid, self.total_value),
            tax_share_percent: share_percent(self.total_tax_paid, self.total_value),
            interest_to_contributions_percent: share_percent(self.total_interest, self.total_contributions),
        }
    }
}

fn share_percent(part: f64, whole: f64) -> f64 {
    if whole == 0.0 {
        0.0
    } else {
        part / whole * 100.0
    }
}

/// Headline ratios for a projection
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionSummary {
    pub years: u32,
    pub total_value: f64,
    /// Total fees as a percentage of the final value
    pub fee_share_percent: f64,
    /// Total tax as a percentage of the final value
    pub tax_share_percent: f64,
    /// Interest earned relative to money put in
    pub interest_to_contributions_percent: f64,
}
