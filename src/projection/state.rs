//! Running totals carried from month to month during a projection

use crate::params::ProjectionParams;

/// State of the portfolio at a point in time during projection
#[derive(Debug, Clone)]
pub struct ProjectionState {
    /// Current projection year (1-indexed, 0 before the first year)
    pub year_index: u32,

    /// Portfolio value
    pub value: f64,

    /// Cumulative contributions including the initial amount
    pub total_contributions: f64,

    /// Cumulative tax deducted
    pub total_tax_paid: f64,

    /// Cumulative management fees deducted
    pub total_fees_paid: f64,

    /// Value at the start of the current year
    pub start_of_year_value: f64,

    /// Cumulative contributions at the start of the current year
    pub start_of_year_contributions: f64,
}

impl ProjectionState {
    /// Initialize state at projection start
    pub fn from_params(params: &ProjectionParams) -> Self {
        Self {
            year_index: 0,
            value: params.initial_amount,
            total_contributions: params.initial_amount,
            total_tax_paid: 0.0,
            total_fees_paid: 0.0,
            start_of_year_value: params.initial_amount,
            start_of_year_contributions: params.initial_amount,
        }
    }

    /// Advance to the next year and record its opening figures
    pub fn begin_year(&mut self) {
        self.year_index += 1;
        self.start_of_year_value = self.value;
        self.start_of_year_contributions = self.total_contributions;
    }

    /// Deposit a contribution
    pub fn contribute(&mut self, amount: f64) {
        self.value += amount;
        self.total_contributions += amount;
    }

    /// Apply one month of growth
    pub fn compound(&mut self, monthly_rate: f64) {
        self.value *= 1.0 + monthly_rate;
    }

    /// Deduct a management fee
    pub fn deduct_fee(&mut self, fee: f64) {
        self.value -= fee;
        self.total_fees_paid += fee;
    }

    /// Deduct tax
    pub fn deduct_tax(&mut self, tax: f64) {
        self.value -= tax;
        self.total_tax_paid += tax;
    }

    /// Contributions deposited since the start of the year
    pub fn contributions_this_year(&self) -> f64 {
        self.total_contributions - self.start_of_year_contributions
    }

    /// Growth this year net of contributions
    pub fn yearly_gain(&self) -> f64 {
        self.value - self.start_of_year_value - self.contributions_this_year()
    }

    /// Interest earned to date, reconciled from the running totals
    pub fn interest(&self) -> f64 {
        self.value + self.total_fees_paid + self.total_tax_paid - self.total_contributions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_yearly_gain_excludes_contributions() {
        let params = ProjectionParams {
            initial_amount: 1_000.0,
            ..Default::default()
        };
        let mut state = ProjectionState::from_params(&params);
        state.begin_year();
        state.contribute(500.0);
        state.compound(0.01);
        state.deduct_fee(5.0);

        // 1500 * 1.01 - 5 = 1510
        assert_relative_eq!(state.value, 1_510.0, max_relative = 1e-12);
        assert_relative_eq!(state.yearly_gain(), 10.0, max_relative = 1e-9);
        assert_relative_eq!(state.interest(), 15.0, max_relative = 1e-9);
    }
}
