//! Memoization of projection results
//!
//! Results are keyed by a value hash of the parameters, so an identical
//! parameter set returns the stored result without re-running the engine.
//! Replacing the tax table drops every stored result.

use std::collections::HashMap;

use log::debug;

use super::engine::ProjectionEngine;
use super::results::ProjectionResult;
use crate::params::{AccountType, ContributionFrequency, ProjectionParams};
use crate::tax::TaxRuleTable;

/// Hashable identity of a parameter set (floats compared by bit pattern)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParamsKey {
    initial_amount: u64,
    monthly_contribution: u64,
    annual_interest_rate: u64,
    years: u32,
    account_type: AccountType,
    contribution_frequency: ContributionFrequency,
    management_fee_percent: u64,
    inflation_rate: u64,
    start_year: i32,
}

impl From<&ProjectionParams> for ParamsKey {
    fn from(params: &ProjectionParams) -> Self {
        Self {
            initial_amount: params.initial_amount.to_bits(),
            monthly_contribution: params.monthly_contribution.to_bits(),
            annual_interest_rate: params.annual_interest_rate.to_bits(),
            years: params.years,
            account_type: params.account_type,
            contribution_frequency: params.contribution_frequency,
            management_fee_percent: params.management_fee_percent.to_bits(),
            inflation_rate: params.inflation_rate.to_bits(),
            start_year: params.start_year,
        }
    }
}

/// Engine with a result cache in front of it
#[derive(Debug)]
pub struct ProjectionCache {
    engine: ProjectionEngine,
    entries: HashMap<ParamsKey, ProjectionResult>,

    /// Statistics
    pub cache_hits: u64,
    pub cache_misses: u64,
}

impl ProjectionCache {
    /// Create an empty cache around an engine
    pub fn new(engine: ProjectionEngine) -> Self {
        Self {
            engine,
            entries: HashMap::new(),
            cache_hits: 0,
            cache_misses: 0,
        }
    }

    /// Stored result for `params`, projecting on first request
    pub fn get_or_project(&mut self, params: &ProjectionParams) -> &ProjectionResult {
        let key = ParamsKey::from(params);
        if self.entries.contains_key(&key) {
            self.cache_hits += 1;
            debug!("Projection cache hit ({} entries)", self.entries.len());
        } else {
            self.cache_misses += 1;
            debug!("Projection cache miss ({} entries)", self.entries.len());
        }

        let engine = &self.engine;
        self.entries.entry(key).or_insert_with(|| engine.project(params))
    }

    /// Stored result without projecting
    pub fn get(&self, params: &ProjectionParams) -> Option<&ProjectionResult> {
        self.entries.get(&ParamsKey::from(params))
    }

    /// Swap the tax table; every stored result is dropped
    pub fn set_rules(&mut self, rules: TaxRuleTable) {
        self.engine = ProjectionEngine::new(rules);
        self.clear();
    }

    /// Drop the stored result for one parameter set
    pub fn invalidate(&mut self, params: &ProjectionParams) -> Option<ProjectionResult> {
        self.entries.remove(&ParamsKey::from(params))
    }

    /// Clear all cached data
    pub fn clear(&mut self) {
        self.entries.clear();
        self.cache_hits = 0;
        self.cache_misses = 0;
    }

    /// Engine behind the cache
    pub fn engine(&self) -> &ProjectionEngine {
        &self.engine
    }

    /// Get number of cached entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if cache is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get cache hit rate
    pub fn hit_rate(&self) -> f64 {
        let total = self.cache_hits + self.cache_misses;
        if total == 0 {
            0.0
        } else {
            self.cache_hits as f64 / total as f64
        }
    }
}

impl Default for ProjectionCache {
    fn default() -> Self {
        Self::new(ProjectionEngine::default())
    }
}
