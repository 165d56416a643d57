//! Preset risk profiles that overlay a base parameter set

use super::{AccountType, ProjectionParams};
use serde::Serialize;

/// A named starting point for return and fee assumptions
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PresetProfile {
    pub name: &'static str,
    pub description: &'static str,
    pub annual_interest_rate: f64,
    pub account_type: AccountType,
    pub management_fee_percent: f64,
    /// Display colour (hex)
    pub color: &'static str,
}

impl PresetProfile {
    /// Low risk with stable returns
    pub fn conservative() -> Self {
        Self {
            name: "Conservative",
            description: "Low risk with stable returns. Suited to short-term saving.",
            annual_interest_rate: 3.0,
            account_type: AccountType::StandardInvestmentAccount,
            management_fee_percent: 0.2,
            color: "#10B981",
        }
    }

    /// Balanced risk and return
    pub fn moderate() -> Self {
        Self {
            name: "Moderate",
            description: "Balanced risk and return. Suited to long-term saving.",
            annual_interest_rate: 7.0,
            account_type: AccountType::StandardInvestmentAccount,
            management_fee_percent: 0.5,
            color: "#3B82F6",
        }
    }

    /// High risk with higher expected return
    pub fn aggressive() -> Self {
        Self {
            name: "Aggressive",
            description: "High risk with potential for high returns. Suited to very long-term saving.",
            annual_interest_rate: 10.0,
            account_type: AccountType::StandardInvestmentAccount,
            management_fee_percent: 0.8,
            color: "#EF4444",
        }
    }

    /// All built-in presets
    pub fn all() -> Vec<Self> {
        vec![Self::conservative(), Self::moderate(), Self::aggressive()]
    }

    /// Overlay this profile's assumptions on a base parameter set
    pub fn apply(&self, base: &ProjectionParams) -> ProjectionParams {
        ProjectionParams {
            annual_interest_rate: self.annual_interest_rate,
            account_type: self.account_type,
            management_fee_percent: self.management_fee_percent,
            ..base.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_keeps_savings_plan() {
        let base = ProjectionParams {
            initial_amount: 50_000.0,
            monthly_contribution: 2_500.0,
            years: 25,
            account_type: AccountType::RegularBrokerageAccount,
            ..Default::default()
        };

        let applied = PresetProfile::aggressive().apply(&base);
        assert_eq!(applied.initial_amount, 50_000.0);
        assert_eq!(applied.monthly_contribution, 2_500.0);
        assert_eq!(applied.years, 25);
        assert_eq!(applied.annual_interest_rate, 10.0);
        assert_eq!(applied.management_fee_percent, 0.8);
        assert_eq!(applied.account_type, AccountType::StandardInvestmentAccount);
    }

    #[test]
    fn test_presets_ordered_by_risk() {
        let presets = PresetProfile::all();
        assert_eq!(presets.len(), 3);
        assert!(presets
            .windows(2)
            .all(|w| w[0].annual_interest_rate < w[1].annual_interest_rate));
    }
}
