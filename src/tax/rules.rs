//! Versioned tax rule table keyed by calendar year and account type
//!
//! The table is configuration data: the engine only ever reads rates through
//! [`TaxRuleTable::lookup`]. Years outside the configured range clamp to the
//! nearest configured year that has rules for the requested account type.

use std::collections::{BTreeMap, HashMap};

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::params::AccountType;

/// Rate parameters for one account type in one calendar year
///
/// Rates are fractions (0.00888 = 0.888%), `threshold` is an amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct TaxRuleSet {
    /// Tax-free capital base
    pub threshold: f64,

    /// Government bond rate in percent used to derive the standard yield
    #[serde(default)]
    pub government_bond_rate: Option<f64>,

    /// Standard yield in percent
    #[serde(default)]
    pub standard_rate: Option<f64>,

    /// Capital income tax rate
    pub tax_rate: f64,

    /// Effective annual rate on the taxable base
    pub effective_rate: f64,

    /// Tax on yearly gains (brokerage accounts)
    #[serde(default)]
    pub capital_gains_tax: Option<f64>,

    /// Standard income on fund holdings
    #[serde(default)]
    pub fund_standard_income: Option<f64>,

    /// Effective annual fund tax on the whole portfolio value
    #[serde(default)]
    pub fund_effective_tax: Option<f64>,

    /// Return tax (insurance wrappers)
    #[serde(default)]
    pub return_tax: Option<f64>,
}

impl TaxRuleSet {
    fn validate(&self, year: i32) -> Result<()> {
        let rates = [
            Some(self.tax_rate),
            Some(self.effective_rate),
            self.capital_gains_tax,
            self.fund_standard_income,
            self.fund_effective_tax,
            self.return_tax,
        ];
        if rates.iter().flatten().any(|r| !r.is_finite() || *r < 0.0) {
            return Err(Error::InvalidTaxRule {
                year,
                reason: "rates must be finite and non-negative".to_string(),
            });
        }
        if !self.threshold.is_finite() || self.threshold < 0.0 {
            return Err(Error::InvalidTaxRule {
                year,
                reason: format!("threshold {} must be finite and non-negative", self.threshold),
            });
        }
        Ok(())
    }
}

/// Rules per calendar year, each year holding rules per account type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct TaxRuleTable {
    years: BTreeMap<i32, HashMap<AccountType, TaxRuleSet>>,
}

impl TaxRuleTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Swedish rules for 2025-2027
    ///
    /// 2025 uses the 150 000 kr tax-free base, 2026 onwards 300 000 kr.
    /// Later years fall back to the 2027 rules.
    pub fn swedish_default() -> Self {
        let mut table = Self::new();

        let brokerage = TaxRuleSet {
            threshold: 0.0,
            tax_rate: 0.30,
            effective_rate: 0.0012,
            capital_gains_tax: Some(0.30),
            fund_standard_income: Some(0.004),
            fund_effective_tax: Some(0.0012),
            ..Default::default()
        };

        // 2025
        table.insert(2025, AccountType::StandardInvestmentAccount, TaxRuleSet {
            threshold: 150_000.0,
            government_bond_rate: Some(1.96),
            standard_rate: Some(2.96),
            tax_rate: 0.30,
            effective_rate: 0.00888,
            ..Default::default()
        });
        table.insert(2025, AccountType::InsuranceWrapper, TaxRuleSet {
            threshold: 150_000.0,
            tax_rate: 0.30,
            effective_rate: 0.00888,
            return_tax: Some(0.00888),
            ..Default::default()
        });
        table.insert(2025, AccountType::RegularBrokerageAccount, brokerage.clone());

        // 2026
        table.insert(2026, AccountType::StandardInvestmentAccount, TaxRuleSet {
            threshold: 300_000.0,
            government_bond_rate: Some(2.16),
            standard_rate: Some(3.16),
            tax_rate: 0.30,
            effective_rate: 0.00948,
            ..Default::default()
        });
        table.insert(2026, AccountType::InsuranceWrapper, TaxRuleSet {
            threshold: 300_000.0,
            tax_rate: 0.30,
            effective_rate: 0.01065,
            return_tax: Some(0.01065),
            ..Default::default()
        });
        table.insert(2026, AccountType::RegularBrokerageAccount, brokerage.clone());

        // 2027 (estimated, used for every later year)
        table.insert(2027, AccountType::StandardInvestmentAccount, TaxRuleSet {
            threshold: 300_000.0,
            standard_rate: Some(3.25),
            tax_rate: 0.30,
            effective_rate: 0.00975,
            ..Default::default()
        });
        table.insert(2027, AccountType::InsuranceWrapper, TaxRuleSet {
            threshold: 300_000.0,
            tax_rate: 0.30,
            effective_rate: 0.01065,
            return_tax: Some(0.01065),
            ..Default::default()
        });
        table.insert(2027, AccountType::RegularBrokerageAccount, brokerage);

        table
    }

    /// Add or replace the rules for one year and account type
    pub fn insert(&mut self, year: i32, account_type: AccountType, rules: TaxRuleSet) {
        self.years.entry(year).or_default().insert(account_type, rules);
    }

    /// Add rules after checking rates and threshold are sane
    pub fn try_insert(&mut self, year: i32, account_type: AccountType, rules: TaxRuleSet) -> Result<()> {
        rules.validate(year)?;
        self.insert(year, account_type, rules);
        Ok(())
    }

    /// Earliest configured year
    pub fn first_year(&self) -> Option<i32> {
        self.years.keys().next().copied()
    }

    /// Latest configured year
    pub fn last_year(&self) -> Option<i32> {
        self.years.keys().next_back().copied()
    }

    /// Number of configured years
    pub fn len(&self) -> usize {
        self.years.len()
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }

    /// Rules that apply to `account_type` in `calendar_year`
    ///
    /// Exact match first. Otherwise the latest configured year at or below
    /// `calendar_year` that has rules for the account type, and below the
    /// table's range the earliest year that has them. Returns `None` only
    /// when no year configures the account type at all.
    pub fn lookup(&self, calendar_year: i32, account_type: AccountType) -> Option<&TaxRuleSet> {
        if let Some(rules) = self.years.get(&calendar_year).and_then(|y| y.get(&account_type)) {
            return Some(rules);
        }

        let at_or_below = self
            .years
            .range(..=calendar_year)
            .rev()
            .find_map(|(_, by_type)| by_type.get(&account_type));

        let found = at_or_below.or_else(|| {
            self.years
                .range(calendar_year..)
                .find_map(|(_, by_type)| by_type.get(&account_type))
        });

        match found {
            Some(_) => debug!("No {} rules for {}, using nearest configured year", account_type, calendar_year),
            None => warn!("No tax rules configured for {} in any year", account_type),
        }
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_lookup() {
        let table = TaxRuleTable::swedish_default();

        let isk_2025 = table.lookup(2025, AccountType::StandardInvestmentAccount).unwrap();
        assert_eq!(isk_2025.threshold, 150_000.0);
        assert_eq!(isk_2025.effective_rate, 0.00888);

        let kf_2026 = table.lookup(2026, AccountType::InsuranceWrapper).unwrap();
        assert_eq!(kf_2026.return_tax, Some(0.01065));
    }

    #[test]
    fn test_future_years_use_latest_rules() {
        let table = TaxRuleTable::swedish_default();
        let latest = table.lookup(2027, AccountType::StandardInvestmentAccount).unwrap();
        let future = table.lookup(2045, AccountType::StandardInvestmentAccount).unwrap();
        assert_eq!(latest, future);
        assert_eq!(future.effective_rate, 0.00975);
    }

    #[test]
    fn test_past_years_use_earliest_rules() {
        let table = TaxRuleTable::swedish_default();
        let earliest = table.lookup(2025, AccountType::StandardInvestmentAccount).unwrap();
        let past = table.lookup(2010, AccountType::StandardInvestmentAccount).unwrap();
        assert_eq!(earliest, past);
    }

    #[test]
    fn test_gap_years_fall_back_downward() {
        let mut table = TaxRuleTable::new();
        table.insert(2025, AccountType::RegularBrokerageAccount, TaxRuleSet {
            effective_rate: 0.001,
            ..Default::default()
        });
        table.insert(2030, AccountType::RegularBrokerageAccount, TaxRuleSet {
            effective_rate: 0.002,
            ..Default::default()
        });
        // 2030 has no insurance rules, so 2031 falls back to 2025's
        table.insert(2025, AccountType::InsuranceWrapper, TaxRuleSet {
            effective_rate: 0.005,
            ..Default::default()
        });

        assert_eq!(table.lookup(2028, AccountType::RegularBrokerageAccount).unwrap().effective_rate, 0.001);
        assert_eq!(table.lookup(2031, AccountType::RegularBrokerageAccount).unwrap().effective_rate, 0.002);
        assert_eq!(table.lookup(2031, AccountType::InsuranceWrapper).unwrap().effective_rate, 0.005);
    }

    #[test]
    fn test_missing_account_type() {
        let mut table = TaxRuleTable::new();
        table.insert(2025, AccountType::StandardInvestmentAccount, TaxRuleSet::default());
        assert!(table.lookup(2025, AccountType::RegularBrokerageAccount).is_none());
    }

    #[test]
    fn test_try_insert_rejects_negative_rates() {
        let mut table = TaxRuleTable::new();
        let bad = TaxRuleSet {
            effective_rate: -0.01,
            ..Default::default()
        };
        assert!(table.try_insert(2025, AccountType::StandardInvestmentAccount, bad).is_err());
        assert!(table.is_empty());
    }

    #[test]
    fn test_year_range() {
        let table = TaxRuleTable::swedish_default();
        assert_eq!(table.first_year(), Some(2025));
        assert_eq!(table.last_year(), Some(2027));
        assert_eq!(table.len(), 3);
    }
}
