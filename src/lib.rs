//! Savings Projection - Swedish savings calculator engine
//!
//! This library provides:
//! - Year-by-year projections with monthly compounding, fees and tax
//! - Versioned Swedish tax rules for ISK, KF and AF accounts
//! - Monte Carlo simulation of uncertain returns
//! - Goal, withdrawal and financial independence planning
//! - Batch scenarios, account-type comparison and what-if analysis

pub mod error;
pub mod params;
pub mod tax;
pub mod fees;
pub mod inflation;
pub mod projection;
pub mod monte_carlo;
pub mod planning;
pub mod scenario;

// Re-export commonly used types
pub use error::{Error, Result};
pub use params::{AccountType, ContributionFrequency, ProjectionParams};
pub use tax::{TaxRuleSet, TaxRuleTable};
pub use projection::{project, ProjectionEngine, ProjectionResult, YearSnapshot};
pub use monte_carlo::{MonteCarloParams, MonteCarloResult};
pub use scenario::ScenarioRunner;
