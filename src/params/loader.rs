//! Load batches of projection parameters from CSV

use super::{AccountType, ContributionFrequency, ProjectionParams, DEFAULT_START_YEAR};
use crate::error::Result;
use csv::Reader;
use log::info;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Default scenario batch shipped with the crate
pub const DEFAULT_SCENARIOS_PATH: &str = "data/scenarios.csv";

/// Raw CSV row matching scenarios.csv columns
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    name: String,
    initial_amount: f64,
    monthly_contribution: f64,
    annual_interest_rate: f64,
    years: u32,
    account_type: String,
    #[serde(default)]
    contribution_frequency: Option<String>,
    #[serde(default)]
    management_fee_percent: Option<f64>,
    #[serde(default)]
    inflation_rate: Option<f64>,
    #[serde(default)]
    start_year: Option<i32>,
}

impl CsvRow {
    fn into_named(self) -> Result<NamedParams> {
        let account_type: AccountType = self.account_type.parse()?;
        let contribution_frequency = match self.contribution_frequency.as_deref() {
            Some(code) if !code.trim().is_empty() => code.parse::<ContributionFrequency>()?,
            _ => ContributionFrequency::Monthly,
        };

        Ok(NamedParams {
            name: self.name,
            params: ProjectionParams {
                initial_amount: self.initial_amount,
                monthly_contribution: self.monthly_contribution,
                annual_interest_rate: self.annual_interest_rate,
                years: self.years,
                account_type,
                contribution_frequency,
                management_fee_percent: self.management_fee_percent.unwrap_or(0.0),
                inflation_rate: self.inflation_rate.unwrap_or(0.0),
                start_year: self.start_year.unwrap_or(DEFAULT_START_YEAR),
            },
        })
    }
}

/// A parameter set with the label it was loaded under
#[derive(Debug, Clone, PartialEq)]
pub struct NamedParams {
    pub name: String,
    pub params: ProjectionParams,
}

/// Load parameter sets from any CSV reader
pub fn load_scenarios_from_reader<R: Read>(reader: R) -> Result<Vec<NamedParams>> {
    let mut reader = Reader::from_reader(reader);
    let mut scenarios = Vec::new();

    for row in reader.deserialize::<CsvRow>() {
        scenarios.push(row?.into_named()?);
    }

    Ok(scenarios)
}

/// Load parameter sets from a CSV file
pub fn load_scenarios(path: &Path) -> Result<Vec<NamedParams>> {
    let file = File::open(path)?;
    let scenarios = load_scenarios_from_reader(file)?;
    info!("Loaded {} scenarios from {}", scenarios.len(), path.display());
    Ok(scenarios)
}

/// Load the scenario batch from the default location
pub fn load_default_scenarios() -> Result<Vec<NamedParams>> {
    load_scenarios(Path::new(DEFAULT_SCENARIOS_PATH))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_load_from_reader_applies_defaults() {
        let data = "\
name,initial_amount,monthly_contribution,annual_interest_rate,years,account_type,contribution_frequency,management_fee_percent,inflation_rate,start_year
Base,10000,1000,7,10,ISK,,,,
Brokerage,50000,2000,6,20,AF,quarterly,0.5,2,2025
";
        let scenarios = load_scenarios_from_reader(data.as_bytes()).unwrap();
        assert_eq!(scenarios.len(), 2);

        let base = &scenarios[0].params;
        assert_eq!(scenarios[0].name, "Base");
        assert_eq!(base.account_type, AccountType::StandardInvestmentAccount);
        assert_eq!(base.contribution_frequency, ContributionFrequency::Monthly);
        assert_eq!(base.management_fee_percent, 0.0);
        assert_eq!(base.start_year, DEFAULT_START_YEAR);

        let brokerage = &scenarios[1].params;
        assert_eq!(brokerage.account_type, AccountType::RegularBrokerageAccount);
        assert_eq!(brokerage.contribution_frequency, ContributionFrequency::Quarterly);
        assert_eq!(brokerage.inflation_rate, 2.0);
        assert_eq!(brokerage.start_year, 2025);
    }

    #[test]
    fn test_unknown_account_type_is_rejected() {
        let data = "\
name,initial_amount,monthly_contribution,annual_interest_rate,years,account_type,contribution_frequency,management_fee_percent,inflation_rate,start_year
Bad,10000,1000,7,10,PENSION,,,,
";
        let err = load_scenarios_from_reader(data.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::UnknownAccountType(code) if code == "PENSION"));
    }

    #[test]
    fn test_load_shipped_scenarios() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join(DEFAULT_SCENARIOS_PATH);
        let scenarios = load_scenarios(&path).unwrap();
        assert!(!scenarios.is_empty());
        assert!(scenarios.iter().all(|s| s.params.years > 0));
    }
}
