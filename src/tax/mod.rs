//! Tax rules and per-account-type tax computation

mod rules;
mod model;
pub mod loader;

pub use rules::{TaxRuleSet, TaxRuleTable};
pub use model::{tax_calculation, total_tax, yearly_tax, TaxCalculation, TaxableYear};
pub use loader::{load_tax_rules, load_tax_rules_from_reader, DEFAULT_TAX_RULES_PATH};
