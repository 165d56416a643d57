//! Management fee model

use serde::Serialize;

/// Annual management fee on a portfolio value
///
/// `fee_percent` is in percent (0.5 = 0.5%).
pub fn annual_fee(portfolio_value: f64, fee_percent: f64) -> f64 {
    if fee_percent == 0.0 || portfolio_value == 0.0 {
        return 0.0;
    }
    portfolio_value * fee_percent / 100.0
}

/// One twelfth of the annual fee
pub fn monthly_fee(portfolio_value: f64, annual_fee_percent: f64) -> f64 {
    annual_fee(portfolio_value, annual_fee_percent) / 12.0
}

/// Sum of annual fees over `(value, fee_percent)` records
pub fn total_fees(records: &[(f64, f64)]) -> f64 {
    records
        .iter()
        .map(|&(value, fee_percent)| annual_fee(value, fee_percent))
        .sum()
}

/// Final values with and without fees, compounded annually
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FeeImpact {
    pub without_fees: f64,
    pub with_fees: f64,
    pub total_fee_impact: f64,
}

/// Rough effect of a fee on the final value
///
/// Uses annual compounding at `rate` and `rate - fee` with a yearly
/// contribution at the end of each year.
pub fn fee_impact(
    initial_amount: f64,
    yearly_contribution: f64,
    interest_rate_percent: f64,
    fee_percent: f64,
    years: u32,
) -> FeeImpact {
    let without_fees = annual_future_value(initial_amount, yearly_contribution, interest_rate_percent / 100.0, years);
    let with_fees = annual_future_value(
        initial_amount,
        yearly_contribution,
        (interest_rate_percent - fee_percent) / 100.0,
        years,
    );

    FeeImpact {
        without_fees,
        with_fees,
        total_fee_impact: without_fees - with_fees,
    }
}

fn annual_future_value(initial: f64, contribution: f64, rate: f64, years: u32) -> f64 {
    let n = years as f64;
    if rate == 0.0 {
        return initial + contribution * n;
    }
    let growth = (1.0 + rate).powf(n);
    initial * growth + contribution * (growth - 1.0) / rate
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_annual_fee() {
        assert_relative_eq!(annual_fee(100_000.0, 0.5), 500.0);
        assert_eq!(annual_fee(100_000.0, 0.0), 0.0);
        assert_eq!(annual_fee(0.0, 1.0), 0.0);
    }

    #[test]
    fn test_negative_input_propagates() {
        assert_relative_eq!(annual_fee(-10_000.0, 1.0), -100.0);
    }

    #[test]
    fn test_monthly_and_total_fees() {
        assert_relative_eq!(monthly_fee(120_000.0, 1.0), 100.0);
        let total = total_fees(&[(100_000.0, 0.5), (200_000.0, 0.5), (50_000.0, 0.0)]);
        assert_relative_eq!(total, 1_500.0);
    }

    #[test]
    fn test_fee_impact() {
        let impact = fee_impact(100_000.0, 12_000.0, 7.0, 1.0, 20);
        assert!(impact.with_fees < impact.without_fees);
        assert_relative_eq!(impact.total_fee_impact, impact.without_fees - impact.with_fees);

        let growth = 1.07_f64.powi(20);
        assert_relative_eq!(
            impact.without_fees,
            100_000.0 * growth + 12_000.0 * (growth - 1.0) / 0.07,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_fee_impact_when_fee_equals_return() {
        let impact = fee_impact(10_000.0, 1_000.0, 2.0, 2.0, 5);
        assert_relative_eq!(impact.with_fees, 15_000.0);
        assert!(impact.total_fee_impact > 0.0);
    }
}
