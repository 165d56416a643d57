//! Scenario runner for batch projections
//!
//! Holds one tax table and runs many parameter sets against it: plain
//! batches, a side-by-side comparison of the three account types, and a
//! fixed set of what-if variations. Named scenarios can be kept in a
//! [`ScenarioRepository`].

use chrono::{DateTime, Utc};
use log::info;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::params::{AccountType, ProjectionParams};
use crate::projection::{ProjectionEngine, ProjectionResult};
use crate::tax::TaxRuleTable;

/// Colours handed out to saved scenarios in order
pub const SCENARIO_PALETTE: [&str; 8] = [
    "#3B82F6", "#10B981", "#F59E0B", "#EF4444", "#8B5CF6", "#EC4899", "#14B8A6", "#F97316",
];

/// Palette colour for the scenario at `index`
pub fn scenario_color(index: usize) -> &'static str {
    SCENARIO_PALETTE[index % SCENARIO_PALETTE.len()]
}

/// Runs projections against a pre-loaded tax table
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::from_csv_path(Path::new("data/tax_rules.csv"))?;
/// let comparison = runner.compare_account_types(&ProjectionParams::default());
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    engine: ProjectionEngine,
}

impl ScenarioRunner {
    /// Create runner with the built-in Swedish tax table
    pub fn new() -> Self {
        Self {
            engine: ProjectionEngine::with_default_rules(),
        }
    }

    /// Create runner by loading a tax table from CSV
    pub fn from_csv_path(path: &std::path::Path) -> crate::Result<Self> {
        Ok(Self::with_rules(TaxRuleTable::from_csv_path(path)?))
    }

    /// Create runner with a pre-built tax table
    pub fn with_rules(rules: TaxRuleTable) -> Self {
        Self {
            engine: ProjectionEngine::new(rules),
        }
    }

    /// Run a single projection
    pub fn run(&self, params: &ProjectionParams) -> ProjectionResult {
        self.engine.project(params)
    }

    /// Run many parameter sets in parallel, results in input order
    pub fn run_batch(&self, batch: &[ProjectionParams]) -> Vec<ProjectionResult> {
        info!("Running batch of {} projections", batch.len());
        batch.par_iter().map(|params| self.engine.project(params)).collect()
    }

    /// Project `base` once per account type
    pub fn compare_account_types(&self, base: &ProjectionParams) -> AccountComparison {
        let entries: Vec<AccountComparisonEntry> = AccountType::ALL
            .iter()
            .map(|&account_type| AccountComparisonEntry {
                account_type,
                result: self.engine.project(&base.with_account_type(account_type)),
            })
            .collect();
        AccountComparison { entries }
    }

    /// Project `base` and the standard what-if variations of it
    pub fn what_if(&self, base: &ProjectionParams) -> WhatIfAnalysis {
        let base_result = self.engine.project(base);
        let variations = WhatIfChange::ALL
            .iter()
            .map(|&change| {
                let result = self.engine.project(&change.apply(base));
                let difference = result.total_value - base_result.total_value;
                let percent_change = if base_result.total_value == 0.0 {
                    0.0
                } else {
                    difference / base_result.total_value * 100.0
                };
                WhatIfResult {
                    change,
                    label: change.label(),
                    result,
                    difference,
                    percent_change,
                }
            })
            .collect();
        WhatIfAnalysis {
            base: base_result,
            variations,
        }
    }

    /// Engine behind the runner
    pub fn engine(&self) -> &ProjectionEngine {
        &self.engine
    }
}

impl Default for ScenarioRunner {
    fn default() -> Self {
        Self::new()
    }
}

/// One account type's projection in a comparison
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountComparisonEntry {
    pub account_type: AccountType,
    pub result: ProjectionResult,
}

/// Same parameters projected under every account type
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccountComparison {
    pub entries: Vec<AccountComparisonEntry>,
}

impl AccountComparison {
    /// Entry with the highest final value
    pub fn best(&self) -> Option<&AccountComparisonEntry> {
        self.entries
            .iter()
            .max_by(|a, b| a.result.total_value.total_cmp(&b.result.total_value))
    }

    /// Entry with the lowest final value
    pub fn worst(&self) -> Option<&AccountComparisonEntry> {
        self.entries
            .iter()
            .min_by(|a, b| a.result.total_value.total_cmp(&b.result.total_value))
    }

    /// Final value gap between best and worst
    pub fn spread(&self) -> f64 {
        match (self.best(), self.worst()) {
            (Some(best), Some(worst)) => best.result.total_value - worst.result.total_value,
            _ => 0.0,
        }
    }

    /// Result for one account type
    pub fn get(&self, account_type: AccountType) -> Option<&ProjectionResult> {
        self.entries
            .iter()
            .find(|e| e.account_type == account_type)
            .map(|e| &e.result)
    }
}

/// A single-parameter variation of a base plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WhatIfChange {
    DoubleMonthlyContribution,
    HigherReturn,
    LongerHorizon,
    HalveFee,
    LargerInitialAmount,
}

impl WhatIfChange {
    pub const ALL: [WhatIfChange; 5] = [
        WhatIfChange::DoubleMonthlyContribution,
        WhatIfChange::HigherReturn,
        WhatIfChange::LongerHorizon,
        WhatIfChange::HalveFee,
        WhatIfChange::LargerInitialAmount,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            WhatIfChange::DoubleMonthlyContribution => "Double the monthly contribution",
            WhatIfChange::HigherReturn => "+1% higher return",
            WhatIfChange::LongerHorizon => "+5 years longer horizon",
            WhatIfChange::HalveFee => "Halve the fee",
            WhatIfChange::LargerInitialAmount => "+50% initial amount",
        }
    }

    /// `base` with this change applied
    pub fn apply(&self, base: &ProjectionParams) -> ProjectionParams {
        let mut params = base.clone();
        match self {
            WhatIfChange::DoubleMonthlyContribution => params.monthly_contribution *= 2.0,
            WhatIfChange::HigherReturn => params.annual_interest_rate += 1.0,
            WhatIfChange::LongerHorizon => params.years += 5,
            WhatIfChange::HalveFee => params.management_fee_percent /= 2.0,
            WhatIfChange::LargerInitialAmount => params.initial_amount *= 1.5,
        }
        params
    }
}

/// Outcome of one what-if variation
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WhatIfResult {
    pub change: WhatIfChange,
    pub label: &'static str,
    pub result: ProjectionResult,
    /// Final value minus the base final value
    pub difference: f64,
    pub percent_change: f64,
}

/// Base projection plus every what-if variation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WhatIfAnalysis {
    pub base: ProjectionResult,
    pub variations: Vec<WhatIfResult>,
}

impl WhatIfAnalysis {
    /// Variation with the largest gain over the base
    pub fn most_effective(&self) -> Option<&WhatIfResult> {
        self.variations
            .iter()
            .max_by(|a, b| a.difference.total_cmp(&b.difference))
    }
}

/// Identifier of a saved scenario
pub type ScenarioId = u64;

/// A named, saved parameter set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    pub id: ScenarioId,
    pub name: String,
    pub params: ProjectionParams,
    pub created_at: DateTime<Utc>,
    pub color: String,
}

/// Storage for named scenarios
pub trait ScenarioRepository {
    /// Store a new scenario and return its id
    fn save(&mut self, name: &str, params: ProjectionParams) -> ScenarioId;

    fn load(&self, id: ScenarioId) -> Option<&Scenario>;

    /// Returns false when no scenario has `id`
    fn rename(&mut self, id: ScenarioId, name: &str) -> bool;

    fn delete(&mut self, id: ScenarioId) -> Option<Scenario>;

    /// All scenarios in insertion order
    fn list(&self) -> &[Scenario];

    fn clear(&mut self);
}

/// Scenario repository held in memory
#[derive(Debug, Clone, Default)]
pub struct InMemoryScenarios {
    scenarios: Vec<Scenario>,
    next_id: ScenarioId,
}

impl InMemoryScenarios {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }
}

impl ScenarioRepository for InMemoryScenarios {
    fn save(&mut self, name: &str, params: ProjectionParams) -> ScenarioId {
        self.next_id += 1;
        let id = self.next_id;
        self.scenarios.push(Scenario {
            id,
            name: name.to_string(),
            params,
            created_at: Utc::now(),
            color: scenario_color(self.scenarios.len()).to_string(),
        });
        id
    }

    fn load(&self, id: ScenarioId) -> Option<&Scenario> {
        self.scenarios.iter().find(|s| s.id == id)
    }

    fn rename(&mut self, id: ScenarioId, name: &str) -> bool {
        match self.scenarios.iter_mut().find(|s| s.id == id) {
            Some(scenario) => {
                scenario.name = name.to_string();
                true
            }
            None => false,
        }
    }

    fn delete(&mut self, id: ScenarioId) -> Option<Scenario> {
        let pos = self.scenarios.iter().position(|s| s.id == id)?;
        Some(self.scenarios.remove(pos))
    }

    fn list(&self) -> &[Scenario] {
        &self.scenarios
    }

    fn clear(&mut self) {
        self.scenarios.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn base_params() -> ProjectionParams {
        ProjectionParams {
            initial_amount: 500_000.0,
            monthly_contribution: 3_000.0,
            annual_interest_rate: 7.0,
            years: 15,
            management_fee_percent: 0.4,
            ..Default::default()
        }
    }

    #[test]
    fn test_run_batch_matches_single_runs() {
        let runner = ScenarioRunner::new();
        let batch: Vec<_> = [3.0, 5.0, 7.0]
            .iter()
            .map(|&rate| ProjectionParams {
                annual_interest_rate: rate,
                ..base_params()
            })
            .collect();

        let results = runner.run_batch(&batch);
        assert_eq!(results.len(), 3);
        for (params, result) in batch.iter().zip(&results) {
            assert_eq!(&runner.run(params), result);
        }

        // Higher return should give a higher final value
        assert!(results[2].total_value > results[0].total_value);
    }

    #[test]
    fn test_compare_account_types() {
        let runner = ScenarioRunner::new();
        let comparison = runner.compare_account_types(&base_params());

        assert_eq!(comparison.entries.len(), 3);
        let best = comparison.best().unwrap();
        let worst = comparison.worst().unwrap();
        assert!(best.result.total_value >= worst.result.total_value);
        assert_relative_eq!(
            comparison.spread(),
            best.result.total_value - worst.result.total_value
        );
        assert!(comparison.get(AccountType::InsuranceWrapper).is_some());
    }

    #[test]
    fn test_what_if_variations() {
        let runner = ScenarioRunner::new();
        let analysis = runner.what_if(&base_params());

        assert_eq!(analysis.variations.len(), 5);
        for variation in &analysis.variations {
            assert!(variation.difference > 0.0, "{} should improve", variation.label);
            assert_relative_eq!(
                variation.percent_change,
                variation.difference / analysis.base.total_value * 100.0
            );
        }
        let longer = &analysis.variations[2];
        assert_eq!(longer.change, WhatIfChange::LongerHorizon);
        assert_eq!(longer.result.yearly_breakdown.len(), 20);
        assert!(analysis.most_effective().is_some());
    }

    #[test]
    fn test_what_if_apply() {
        let base = base_params();
        assert_eq!(WhatIfChange::DoubleMonthlyContribution.apply(&base).monthly_contribution, 6_000.0);
        assert_eq!(WhatIfChange::HigherReturn.apply(&base).annual_interest_rate, 8.0);
        assert_eq!(WhatIfChange::HalveFee.apply(&base).management_fee_percent, 0.2);
        assert_eq!(WhatIfChange::LargerInitialAmount.apply(&base).initial_amount, 750_000.0);
    }

    #[test]
    fn test_repository_lifecycle() {
        let mut repo = InMemoryScenarios::new();
        let a = repo.save("Base", base_params());
        let b = repo.save("Aggressive", base_params());
        assert_ne!(a, b);
        assert_eq!(repo.len(), 2);
        assert_eq!(repo.load(a).unwrap().color, SCENARIO_PALETTE[0]);
        assert_eq!(repo.load(b).unwrap().color, SCENARIO_PALETTE[1]);

        assert!(repo.rename(a, "Renamed"));
        assert_eq!(repo.load(a).unwrap().name, "Renamed");
        assert!(!repo.rename(999, "Missing"));

        assert!(repo.delete(a).is_some());
        assert!(repo.load(a).is_none());
        assert_eq!(repo.list().len(), 1);

        repo.clear();
        assert!(repo.is_empty());
    }

    #[test]
    fn test_palette_cycles() {
        assert_eq!(scenario_color(0), scenario_color(8));
        assert_ne!(scenario_color(0), scenario_color(1));
    }
}
