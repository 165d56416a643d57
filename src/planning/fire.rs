//! Financial independence figures

use serde::{Deserialize, Serialize};

/// Inputs to the financial independence calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FireParams {
    pub monthly_expenses: f64,
    pub current_savings: f64,
    pub monthly_savings: f64,
    /// Annual return in percent
    pub expected_return: f64,
    /// Sustainable withdrawal rate in percent
    pub withdrawal_rate: f64,
    /// Years until the planned retirement date, used for Coast FI
    pub years_until_retirement: u32,
}

impl Default for FireParams {
    fn default() -> Self {
        Self {
            monthly_expenses: 30_000.0,
            current_savings: 500_000.0,
            monthly_savings: 10_000.0,
            expected_return: 7.0,
            withdrawal_rate: 4.0,
            years_until_retirement: 11,
        }
    }
}

/// Financial independence summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FireSummary {
    pub fi_number: f64,
    /// `f64::INFINITY` when nothing is saved
    pub years_to_fi: f64,
    pub remaining: f64,
    pub progress_percent: f64,
    pub savings_rate_percent: f64,
    pub coast_fi_number: f64,
    pub is_coast_fi: bool,
}

/// Capital whose withdrawal at `withdrawal_rate_percent` covers the expenses
pub fn fi_number(monthly_expenses: f64, withdrawal_rate_percent: f64) -> f64 {
    if withdrawal_rate_percent <= 0.0 {
        return f64::INFINITY;
    }
    monthly_expenses * 12.0 / (withdrawal_rate_percent / 100.0)
}

/// Years of saving until the gap to `fi` is closed by the monthly savings
pub fn years_to_fi(fi: f64, current_savings: f64, monthly_savings: f64, annual_return_percent: f64) -> f64 {
    let gap = fi - current_savings;
    if gap <= 0.0 {
        return 0.0;
    }
    if monthly_savings <= 0.0 {
        return f64::INFINITY;
    }
    let r = annual_return_percent / 100.0 / 12.0;
    if r == 0.0 {
        return gap / monthly_savings / 12.0;
    }
    let months = (gap * r / monthly_savings + 1.0).ln() / (1.0 + r).ln();
    months / 12.0
}

/// Share of income saved, in percent
pub fn savings_rate(monthly_savings: f64, monthly_expenses: f64) -> f64 {
    let income = monthly_expenses + monthly_savings;
    if income <= 0.0 {
        return 0.0;
    }
    monthly_savings / income * 100.0
}

/// Savings that grow into `fi` by retirement without further deposits
pub fn coast_fi_number(fi: f64, annual_return_percent: f64, years_until_retirement: u32) -> f64 {
    fi / (1.0 + annual_return_percent / 100.0).powi(years_until_retirement as i32)
}

/// Evaluate all financial independence figures
pub fn evaluate(params: &FireParams) -> FireSummary {
    let fi = fi_number(params.monthly_expenses, params.withdrawal_rate);
    let coast = coast_fi_number(fi, params.expected_return, params.years_until_retirement);
    let progress_percent = if fi > 0.0 {
        (params.current_savings / fi * 100.0).min(100.0)
    } else {
        100.0
    };

    FireSummary {
        fi_number: fi,
        years_to_fi: years_to_fi(fi, params.current_savings, params.monthly_savings, params.expected_return),
        remaining: (fi - params.current_savings).max(0.0),
        progress_percent,
        savings_rate_percent: savings_rate(params.monthly_savings, params.monthly_expenses),
        coast_fi_number: coast,
        is_coast_fi: params.current_savings >= coast,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_fi_number_four_percent() {
        assert_relative_eq!(fi_number(30_000.0, 4.0), 9_000_000.0, max_relative = 1e-12);
        assert!(fi_number(30_000.0, 0.0).is_infinite());
    }

    #[test]
    fn test_years_to_fi_cases() {
        assert_eq!(years_to_fi(1_000_000.0, 1_500_000.0, 0.0, 7.0), 0.0);
        assert!(years_to_fi(1_000_000.0, 0.0, 0.0, 7.0).is_infinite());
        assert_relative_eq!(years_to_fi(1_200_000.0, 0.0, 10_000.0, 0.0), 10.0, max_relative = 1e-12);

        let years = years_to_fi(9_000_000.0, 500_000.0, 10_000.0, 7.0);
        let r: f64 = 0.07 / 12.0;
        let months = (years * 12.0).round() as i32;
        let accumulated = 10_000.0 * ((1.0 + r).powi(months) - 1.0) / r;
        assert_relative_eq!(accumulated, 8_500_000.0, max_relative = 0.01);
    }

    #[test]
    fn test_savings_rate() {
        assert_relative_eq!(savings_rate(10_000.0, 30_000.0), 25.0);
        assert_eq!(savings_rate(0.0, 0.0), 0.0);
    }

    #[test]
    fn test_coast_fi() {
        let summary = evaluate(&FireParams::default());
        assert_relative_eq!(summary.coast_fi_number, 9_000_000.0 / 1.07_f64.powi(11), max_relative = 1e-12);
        assert!(!summary.is_coast_fi);
        assert_relative_eq!(summary.remaining, 8_500_000.0, max_relative = 1e-12);

        let rich = evaluate(&FireParams {
            current_savings: 5_000_000.0,
            ..Default::default()
        });
        assert!(rich.is_coast_fi);
    }
}
