//! Yearly tax per account type
//!
//! Standard investment accounts and insurance wrappers pay a flat rate on the
//! capital base above a tax-free threshold, independent of the actual return.
//! Brokerage accounts pay the fund standard-income tax on the whole value plus
//! capital gains tax on the year's gain, as if gains were realized every year.

use serde::{Deserialize, Serialize};

use super::{TaxRuleSet, TaxRuleTable};
use crate::params::AccountType;

/// Tax owed on one account type for one calendar year
pub fn yearly_tax(
    rules: &TaxRuleTable,
    account_type: AccountType,
    portfolio_value: f64,
    yearly_gain: f64,
    calendar_year: i32,
) -> f64 {
    tax_calculation(rules, account_type, portfolio_value, yearly_gain, calendar_year).tax_owed
}

/// Breakdown of the yearly tax: the taxable base and the tax owed
pub fn tax_calculation(
    rules: &TaxRuleTable,
    account_type: AccountType,
    portfolio_value: f64,
    yearly_gain: f64,
    calendar_year: i32,
) -> TaxCalculation {
    let (taxable_amount, tax_owed) = match rules.lookup(calendar_year, account_type) {
        Some(set) => match account_type {
            AccountType::StandardInvestmentAccount => standard_account_tax(set, portfolio_value),
            AccountType::InsuranceWrapper => insurance_tax(set, portfolio_value),
            AccountType::RegularBrokerageAccount => brokerage_tax(set, portfolio_value, yearly_gain),
        },
        None => (0.0, 0.0),
    };

    TaxCalculation {
        calendar_year,
        account_type,
        portfolio_value,
        taxable_amount,
        tax_owed,
    }
}

/// Standardized-yield tax on the base above the threshold
fn standard_account_tax(set: &TaxRuleSet, portfolio_value: f64) -> (f64, f64) {
    let taxable = (portfolio_value - set.threshold).max(0.0);
    (taxable, taxable * set.effective_rate)
}

/// Return tax on the base above the threshold
fn insurance_tax(set: &TaxRuleSet, portfolio_value: f64) -> (f64, f64) {
    let taxable = (portfolio_value - set.threshold).max(0.0);
    let rate = set.return_tax.unwrap_or(set.effective_rate);
    (taxable, taxable * rate)
}

/// Fund tax on the full value plus gains tax on a positive yearly gain
fn brokerage_tax(set: &TaxRuleSet, portfolio_value: f64, yearly_gain: f64) -> (f64, f64) {
    let fund_tax = portfolio_value * set.fund_effective_tax.unwrap_or(0.0);
    let gains_tax = if yearly_gain > 0.0 {
        yearly_gain * set.capital_gains_tax.unwrap_or(0.0)
    } else {
        0.0
    };
    (portfolio_value, fund_tax + gains_tax)
}

/// Result of a single tax computation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxCalculation {
    pub calendar_year: i32,
    pub account_type: AccountType,
    pub portfolio_value: f64,
    pub taxable_amount: f64,
    pub tax_owed: f64,
}

/// One year's figures for summing tax across a horizon
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TaxableYear {
    pub calendar_year: i32,
    pub portfolio_value: f64,
    pub yearly_gain: f64,
}

/// Sum of yearly tax over several years
pub fn total_tax(rules: &TaxRuleTable, account_type: AccountType, years: &[TaxableYear]) -> f64 {
    years
        .iter()
        .map(|y| yearly_tax(rules, account_type, y.portfolio_value, y.yearly_gain, y.calendar_year))
        .sum()
}
