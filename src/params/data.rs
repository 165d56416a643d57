//! Projection parameter structures

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Calendar year the calculator defaults to
pub const DEFAULT_START_YEAR: i32 = 2026;

/// Longest horizon accepted on the command line
pub const MAX_HORIZON_YEARS: u32 = 100;

/// Number of monthly steps in `years`, saturating instead of overflowing
pub fn horizon_months(years: u32) -> u32 {
    years.saturating_mul(12)
}

/// Tax treatment category of a portfolio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AccountType {
    /// Flat-rate wrapper taxed on the capital base above a threshold (ISK)
    #[serde(alias = "ISK", alias = "isk")]
    StandardInvestmentAccount,
    /// Insurance wrapper paying an annual return tax (Kapitalförsäkring)
    #[serde(alias = "KF", alias = "kf", alias = "Kapitalförsäkring")]
    InsuranceWrapper,
    /// Ordinary brokerage account taxed on gains (AF)
    #[serde(alias = "AF", alias = "af")]
    RegularBrokerageAccount,
}

impl AccountType {
    /// All variants in display order
    pub const ALL: [AccountType; 3] = [
        AccountType::StandardInvestmentAccount,
        AccountType::InsuranceWrapper,
        AccountType::RegularBrokerageAccount,
    ];

    /// Short code used in CSV tables
    pub fn code(&self) -> &'static str {
        match self {
            AccountType::StandardInvestmentAccount => "ISK",
            AccountType::InsuranceWrapper => "KF",
            AccountType::RegularBrokerageAccount => "AF",
        }
    }

    /// Display name and one-line summary of how the account is taxed
    pub fn description(&self) -> AccountDescription {
        match self {
            AccountType::StandardInvestmentAccount => AccountDescription {
                name: "Investment savings account (ISK)",
                summary: "Standardized-yield tax on the capital base. No tax on gains or dividends.",
                tax_info: "Tax-free up to 150 000 kr in 2025 and 300 000 kr from 2026.",
            },
            AccountType::InsuranceWrapper => AccountDescription {
                name: "Capital insurance (KF)",
                summary: "Annual return tax on the portfolio value.",
                tax_info: "Tax-free up to 150 000 kr in 2025 and 300 000 kr from 2026.",
            },
            AccountType::RegularBrokerageAccount => AccountDescription {
                name: "Share and fund account (AF)",
                summary: "30% capital gains tax on realized gains. Standard income tax on fund holdings.",
                tax_info: "30% tax on realized gains. Fund tax 0.12% per year.",
            },
        }
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for AccountType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "isk" | "standardinvestmentaccount" | "standard" => Ok(AccountType::StandardInvestmentAccount),
            "kf" | "kapitalförsäkring" | "insurancewrapper" | "insurance" => Ok(AccountType::InsuranceWrapper),
            "af" | "regularbrokerageaccount" | "brokerage" => Ok(AccountType::RegularBrokerageAccount),
            _ => Err(Error::UnknownAccountType(s.to_string())),
        }
    }
}

/// Static description of an account type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AccountDescription {
    pub name: &'static str,
    pub summary: &'static str,
    pub tax_info: &'static str,
}

/// How often contributions are deposited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ContributionFrequency {
    #[default]
    Monthly,
    Quarterly,
    Annually,
}

impl ContributionFrequency {
    /// Number of deposits per year
    pub fn events_per_year(&self) -> u32 {
        match self {
            ContributionFrequency::Monthly => 12,
            ContributionFrequency::Quarterly => 4,
            ContributionFrequency::Annually => 1,
        }
    }

    /// Whether a deposit is made in the given month (1-12)
    pub fn contributes_in_month(&self, month: u32) -> bool {
        match self {
            ContributionFrequency::Monthly => true,
            ContributionFrequency::Quarterly => month % 3 == 1,
            ContributionFrequency::Annually => month == 1,
        }
    }

    /// Amount deposited per event, scaling the monthly amount up to the
    /// equivalent lump sum for less frequent schedules
    pub fn amount_per_event(&self, monthly_amount: f64) -> f64 {
        match self {
            ContributionFrequency::Monthly => monthly_amount,
            _ => monthly_amount * (12.0 / self.events_per_year() as f64),
        }
    }
}

impl FromStr for ContributionFrequency {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "monthly" | "m" => Ok(ContributionFrequency::Monthly),
            "quarterly" | "q" => Ok(ContributionFrequency::Quarterly),
            "annually" | "yearly" | "a" | "y" => Ok(ContributionFrequency::Annually),
            _ => Err(Error::UnknownFrequency(s.to_string())),
        }
    }
}

/// Input to a single projection run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionParams {
    /// Starting portfolio value
    pub initial_amount: f64,

    /// Amount saved per month (scaled up for quarterly/annual schedules)
    pub monthly_contribution: f64,

    /// Expected annual return in percent (7.0 = 7%)
    pub annual_interest_rate: f64,

    /// Projection horizon in whole years
    pub years: u32,

    /// Tax treatment of the account
    pub account_type: AccountType,

    /// Deposit schedule
    #[serde(default)]
    pub contribution_frequency: ContributionFrequency,

    /// Annual management fee in percent
    #[serde(default)]
    pub management_fee_percent: f64,

    /// Annual inflation in percent
    #[serde(default)]
    pub inflation_rate: f64,

    /// Calendar year of projection year 1
    #[serde(default = "default_start_year")]
    pub start_year: i32,
}

fn default_start_year() -> i32 {
    DEFAULT_START_YEAR
}

impl Default for ProjectionParams {
    fn default() -> Self {
        Self {
            initial_amount: 10_000.0,
            monthly_contribution: 1_000.0,
            annual_interest_rate: 7.0,
            years: 10,
            account_type: AccountType::StandardInvestmentAccount,
            contribution_frequency: ContributionFrequency::Monthly,
            management_fee_percent: 0.0,
            inflation_rate: 0.0,
            start_year: DEFAULT_START_YEAR,
        }
    }
}

impl ProjectionParams {
    /// Calendar year that applies to 1-indexed projection year `year_index`
    pub fn calendar_year(&self, year_index: u32) -> i32 {
        self.start_year + year_index as i32 - 1
    }

    /// Monthly growth rate as a fraction
    pub fn monthly_rate(&self) -> f64 {
        self.annual_interest_rate / 100.0 / 12.0
    }

    /// Copy of these parameters with a different account type
    pub fn with_account_type(&self, account_type: AccountType) -> Self {
        Self {
            account_type,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_horizon_months_saturates() {
        assert_eq!(horizon_months(0), 0);
        assert_eq!(horizon_months(30), 360);
        assert_eq!(horizon_months(u32::MAX / 10), u32::MAX);
        assert_eq!(horizon_months(u32::MAX), u32::MAX);
    }

    #[test]
    fn test_contribution_schedule() {
        let quarterly = ContributionFrequency::Quarterly;
        let fired: Vec<u32> = (1..=12).filter(|&m| quarterly.contributes_in_month(m)).collect();
        assert_eq!(fired, vec![1, 4, 7, 10]);

        let annually = ContributionFrequency::Annually;
        let fired: Vec<u32> = (1..=12).filter(|&m| annually.contributes_in_month(m)).collect();
        assert_eq!(fired, vec![1]);

        assert!((1..=12).all(|m| ContributionFrequency::Monthly.contributes_in_month(m)));
    }

    #[test]
    fn test_amount_per_event_scales_to_lump_sum() {
        assert_eq!(ContributionFrequency::Monthly.amount_per_event(1000.0), 1000.0);
        assert_eq!(ContributionFrequency::Quarterly.amount_per_event(1000.0), 3000.0);
        assert_eq!(ContributionFrequency::Annually.amount_per_event(1000.0), 12000.0);
    }

    #[test]
    fn test_account_type_parsing() {
        assert_eq!("ISK".parse::<AccountType>().unwrap(), AccountType::StandardInvestmentAccount);
        assert_eq!("kf".parse::<AccountType>().unwrap(), AccountType::InsuranceWrapper);
        assert_eq!(" af ".parse::<AccountType>().unwrap(), AccountType::RegularBrokerageAccount);
        assert!("pension".parse::<AccountType>().is_err());
    }

    #[test]
    fn test_calendar_year() {
        let params = ProjectionParams {
            start_year: 2025,
            ..Default::default()
        };
        assert_eq!(params.calendar_year(1), 2025);
        assert_eq!(params.calendar_year(3), 2027);
    }

    #[test]
    fn test_params_deserialize_with_defaults() {
        let json = r#"{
            "initialAmount": 5000,
            "monthlyContribution": 500,
            "annualInterestRate": 6,
            "years": 5,
            "accountType": "AF"
        }"#;
        let params: ProjectionParams = serde_json::from_str(json).unwrap();
        assert_eq!(params.account_type, AccountType::RegularBrokerageAccount);
        assert_eq!(params.contribution_frequency, ContributionFrequency::Monthly);
        assert_eq!(params.start_year, DEFAULT_START_YEAR);
    }
}
