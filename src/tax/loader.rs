//! CSV-based tax rule loader
//!
//! One row per (year, account type). Optional rate columns may be left empty.

use super::{TaxRuleSet, TaxRuleTable};
use crate::error::{Error, Result};
use crate::params::AccountType;
use log::info;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Default path to the shipped tax rule table
pub const DEFAULT_TAX_RULES_PATH: &str = "data/tax_rules.csv";

/// Raw CSV row matching tax_rules.csv columns
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    year: i32,
    account_type: String,
    threshold: f64,
    government_bond_rate: Option<f64>,
    standard_rate: Option<f64>,
    tax_rate: f64,
    effective_rate: f64,
    capital_gains_tax: Option<f64>,
    fund_standard_income: Option<f64>,
    fund_effective_tax: Option<f64>,
    return_tax: Option<f64>,
}

impl CsvRow {
    fn rules(&self) -> TaxRuleSet {
        TaxRuleSet {
            threshold: self.threshold,
            government_bond_rate: self.government_bond_rate,
            standard_rate: self.standard_rate,
            tax_rate: self.tax_rate,
            effective_rate: self.effective_rate,
            capital_gains_tax: self.capital_gains_tax,
            fund_standard_income: self.fund_standard_income,
            fund_effective_tax: self.fund_effective_tax,
            return_tax: self.return_tax,
        }
    }
}

/// Build a table from any CSV reader
pub fn load_tax_rules_from_reader<R: Read>(reader: R) -> Result<TaxRuleTable> {
    let mut reader = csv::Reader::from_reader(reader);
    let mut table = TaxRuleTable::new();

    for record in reader.deserialize::<CsvRow>() {
        let row = record?;
        let account_type: AccountType = row.account_type.parse()?;
        table.try_insert(row.year, account_type, row.rules())?;
    }

    if table.is_empty() {
        return Err(Error::EmptyTaxTable);
    }
    Ok(table)
}

/// Load a table from a CSV file
pub fn load_tax_rules(path: &Path) -> Result<TaxRuleTable> {
    let file = File::open(path)?;
    let table = load_tax_rules_from_reader(file)?;
    info!(
        "Loaded tax rules for {} years ({:?}..={:?}) from {}",
        table.len(),
        table.first_year(),
        table.last_year(),
        path.display()
    );
    Ok(table)
}

impl TaxRuleTable {
    /// Load the table from the default location (data/tax_rules.csv)
    pub fn from_csv() -> Result<Self> {
        Self::from_csv_path(Path::new(DEFAULT_TAX_RULES_PATH))
    }

    /// Load the table from a specific CSV file
    pub fn from_csv_path(path: &Path) -> Result<Self> {
        load_tax_rules(path)
    }
}
