//! Core projection engine for year-by-year portfolio projections
//!
//! Each year runs twelve monthly steps (deposit, then one month of growth),
//! then deducts the annual management fee and the year's tax.

use log::debug;

use super::results::{ProjectionResult, YearSnapshot};
use super::state::ProjectionState;
use crate::fees::annual_fee;
use crate::inflation::real_value;
use crate::params::ProjectionParams;
use crate::tax::{yearly_tax, TaxRuleTable};

/// Main projection engine
#[derive(Debug, Clone)]
pub struct ProjectionEngine {
    rules: TaxRuleTable,
}

impl ProjectionEngine {
    /// Create a new projection engine reading tax rates from `rules`
    pub fn new(rules: TaxRuleTable) -> Self {
        Self { rules }
    }

    /// Engine using the built-in Swedish tax table
    pub fn with_default_rules() -> Self {
        Self::new(TaxRuleTable::swedish_default())
    }

    /// Tax table in use
    pub fn rules(&self) -> &TaxRuleTable {
        &self.rules
    }

    /// Run a projection
    ///
    /// Pure: the same parameters always give a bit-identical result. A zero
    /// horizon gives an empty breakdown with totals equal to the initial amount.
    pub fn project(&self, params: &ProjectionParams) -> ProjectionResult {
        project(params, &self.rules)
    }
}

impl Default for ProjectionEngine {
    fn default() -> Self {
        Self::with_default_rules()
    }
}

/// Run a projection against a borrowed tax table
pub fn project(params: &ProjectionParams, rules: &TaxRuleTable) -> ProjectionResult {
    let mut state = ProjectionState::from_params(params);
    let mut yearly_breakdown = Vec::with_capacity(params.years as usize);

    for _year in 1..=params.years {
        state.begin_year();
        let snapshot = project_year(rules, params, &mut state);
        yearly_breakdown.push(snapshot);
    }

    let total_value = state.value;
    let real_value_after_inflation = if params.inflation_rate > 0.0 {
        Some(real_value(total_value, params.years, params.inflation_rate))
    } else {
        None
    };

    ProjectionResult {
        total_value,
        total_contributions: state.total_contributions,
        total_interest: state.interest(),
        total_tax_paid: state.total_tax_paid,
        total_fees_paid: state.total_fees_paid,
        net_value: total_value,
        real_value_after_inflation,
        yearly_breakdown,
    }
}

/// Run twelve months, then fees and tax, for the year in `state`
fn project_year(rules: &TaxRuleTable, params: &ProjectionParams, state: &mut ProjectionState) -> YearSnapshot {
    let frequency = params.contribution_frequency;
    let contribution = frequency.amount_per_event(params.monthly_contribution);
    let monthly_rate = params.monthly_rate();
    let calendar_year = params.calendar_year(state.year_index);

    for month in 1..=12 {
        if frequency.contributes_in_month(month) {
            state.contribute(contribution);
        }
        state.compound(monthly_rate);
    }

    // Fees come off after the year's growth
    let fees_paid = annual_fee(state.value, params.management_fee_percent);
    state.deduct_fee(fees_paid);

    // Tax is assessed on the value after fees
    let tax_paid = yearly_tax(
        rules,
        params.account_type,
        state.value,
        state.yearly_gain(),
        calendar_year,
    );
    state.deduct_tax(tax_paid);

    let net_value = state.value;
    let inflation_adjusted_value = if params.inflation_rate > 0.0 {
        Some(real_value(net_value, state.year_index, params.inflation_rate))
    } else {
        None
    };

    debug!(
        "Year {} ({}): value={:.2} fees={:.2} tax={:.2}",
        state.year_index, calendar_year, state.value, fees_paid, tax_paid
    );

    YearSnapshot {
        year: state.year_index,
        calendar_year,
        value: state.value,
        contributions: state.total_contributions,
        interest: state.interest(),
        tax_paid,
        fees_paid,
        net_value,
        inflation_adjusted_value,
    }
}
