//! Drawdown of a capital base by fixed monthly withdrawals

use serde::{Deserialize, Serialize};

use crate::params::horizon_months;

/// Share of capital the 4 % rule allows to be withdrawn per year
pub const SAFE_WITHDRAWAL_RATE: f64 = 0.04;

/// Inputs to a withdrawal plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WithdrawalParams {
    pub initial_capital: f64,
    pub monthly_withdrawal: f64,
    /// Annual return in percent
    pub annual_return: f64,
    pub years: u32,
}

impl Default for WithdrawalParams {
    fn default() -> Self {
        Self {
            initial_capital: 2_000_000.0,
            monthly_withdrawal: 20_000.0,
            annual_return: 5.0,
            years: 25,
        }
    }
}

/// Balance at a year boundary
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WithdrawalPoint {
    pub year: u32,
    /// Never negative
    pub balance: f64,
    /// Withdrawals scheduled up to this point
    pub withdrawn: f64,
}

/// Outcome of a withdrawal plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WithdrawalSummary {
    pub path: Vec<WithdrawalPoint>,
    pub final_balance: f64,
    pub total_withdrawn: f64,
    pub sustainable: bool,
    /// Annual withdrawals as a percentage of starting capital
    pub withdrawal_rate_percent: f64,
    /// Largest monthly withdrawal under the 4 % rule
    pub recommended_max_monthly: f64,
    /// First recorded year with an exhausted balance
    pub depletion_year: Option<u32>,
}

/// Year-boundary balances from month 0 to `years * 12`
///
/// Growth and withdrawal stop once the balance reaches zero.
pub fn withdrawal_path(params: &WithdrawalParams) -> Vec<WithdrawalPoint> {
    let r = params.annual_return / 100.0 / 12.0;
    let months = horizon_months(params.years);
    let mut balance = params.initial_capital;
    let mut path = Vec::with_capacity(params.years as usize + 1);

    for month in 0..=months {
        if month % 12 == 0 {
            path.push(WithdrawalPoint {
                year: month / 12,
                balance: balance.max(0.0),
                withdrawn: month as f64 * params.monthly_withdrawal,
            });
        }
        if balance > 0.0 {
            balance = balance * (1.0 + r) - params.monthly_withdrawal;
        }
    }

    path
}

/// Evaluate a withdrawal plan
pub fn evaluate(params: &WithdrawalParams) -> WithdrawalSummary {
    let path = withdrawal_path(params);
    let final_balance = path.last().map_or(0.0, |p| p.balance);
    let annual_withdrawal = params.monthly_withdrawal * 12.0;

    let withdrawal_rate_percent = if params.initial_capital > 0.0 {
        annual_withdrawal / params.initial_capital * 100.0
    } else if annual_withdrawal == 0.0 {
        0.0
    } else {
        f64::INFINITY
    };

    let depletion_year = path.iter().find(|p| p.balance <= 0.0).map(|p| p.year);

    WithdrawalSummary {
        final_balance,
        total_withdrawn: annual_withdrawal * params.years as f64,
        sustainable: final_balance > 0.0,
        withdrawal_rate_percent,
        recommended_max_monthly: params.initial_capital * SAFE_WITHDRAWAL_RATE / 12.0,
        depletion_year,
        path,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_path_records_each_year() {
        let params = WithdrawalParams::default();
        let path = withdrawal_path(&params);
        assert_eq!(path.len(), 26);
        assert_eq!(path[0].balance, params.initial_capital);
        assert_eq!(path[0].withdrawn, 0.0);
        assert_relative_eq!(path[1].withdrawn, 240_000.0);
    }

    #[test]
    fn test_sustainable_plan() {
        let params = WithdrawalParams {
            initial_capital: 3_000_000.0,
            monthly_withdrawal: 10_000.0,
            annual_return: 5.0,
            years: 30,
        };
        let summary = evaluate(&params);
        assert!(summary.sustainable);
        assert!(summary.depletion_year.is_none());
        assert_relative_eq!(summary.withdrawal_rate_percent, 4.0, max_relative = 1e-12);
        assert_relative_eq!(summary.recommended_max_monthly, 10_000.0, max_relative = 1e-12);
        assert_relative_eq!(summary.total_withdrawn, 3_600_000.0);
    }

    #[test]
    fn test_depletion_without_growth() {
        let params = WithdrawalParams {
            initial_capital: 120_000.0,
            monthly_withdrawal: 5_000.0,
            annual_return: 0.0,
            years: 5,
        };
        let summary = evaluate(&params);
        assert!(!summary.sustainable);
        assert_eq!(summary.depletion_year, Some(2));
        assert_eq!(summary.final_balance, 0.0);
        assert!(summary.path.iter().all(|p| p.balance >= 0.0));
    }

    #[test]
    fn test_zero_capital_rate() {
        let none = evaluate(&WithdrawalParams {
            initial_capital: 0.0,
            monthly_withdrawal: 0.0,
            ..Default::default()
        });
        assert_eq!(none.withdrawal_rate_percent, 0.0);
        assert_eq!(none.depletion_year, Some(0));

        let some = evaluate(&WithdrawalParams {
            initial_capital: 0.0,
            ..Default::default()
        });
        assert!(some.withdrawal_rate_percent.is_infinite());
    }
}
