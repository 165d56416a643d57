//! Monte Carlo simulation of monthly-compounding savings paths
//!
//! Each path draws one normal return per month, records the balance at
//! month 0 and at every year boundary (floored at zero when recorded), and
//! the paths are then aggregated into percentile bands, terminal-value
//! statistics and goal probabilities. Tax and fees are not modelled.

use log::info;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::rng::{standard_normal, SeededUniform, UniformSource};
use crate::params::horizon_months;

/// Goal thresholds checked when none are given
pub const DEFAULT_GOALS: [f64; 4] = [500_000.0, 1_000_000.0, 2_000_000.0, 5_000_000.0];

/// Inputs to a simulation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonteCarloParams {
    pub initial_amount: f64,
    pub monthly_contribution: f64,
    /// Expected annual return in percent
    pub mean_return: f64,
    /// Annual volatility in percent
    pub volatility: f64,
    pub years: u32,
    pub simulations: u32,
    /// Terminal values whose probability of being reached is reported
    #[serde(default = "default_goals")]
    pub goals: Vec<f64>,
}

fn default_goals() -> Vec<f64> {
    DEFAULT_GOALS.to_vec()
}

impl Default for MonteCarloParams {
    fn default() -> Self {
        Self {
            initial_amount: 100_000.0,
            monthly_contribution: 5_000.0,
            mean_return: 7.0,
            volatility: 15.0,
            years: 20,
            simulations: 1_000,
            goals: default_goals(),
        }
    }
}

/// Percentiles across all paths at one year
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PercentileBand {
    pub year: u32,
    pub p10: f64,
    pub p25: f64,
    pub p50: f64,
    pub p75: f64,
    pub p90: f64,
}

/// Spread of terminal balances
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinalValueStats {
    /// 5th percentile
    pub worst_case: f64,
    /// 50th percentile
    pub median: f64,
    /// 95th percentile
    pub best_case: f64,
}

/// Share of paths ending at or above a goal
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GoalProbability {
    pub goal: f64,
    /// Fraction of paths in [0, 1]
    pub probability: f64,
}

/// Aggregated simulation output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonteCarloResult {
    /// Recorded balances per path, `years + 1` entries each
    pub paths: Vec<Vec<f64>>,
    /// One band per recorded year, 0..=years
    pub percentiles: Vec<PercentileBand>,
    pub final_values: FinalValueStats,
    pub goal_probabilities: Vec<GoalProbability>,
}

/// Simulate one path, drawing from `source`
pub fn simulate_path<S: UniformSource + ?Sized>(params: &MonteCarloParams, source: &mut S) -> Vec<f64> {
    let monthly_mean = params.mean_return / 100.0 / 12.0;
    let monthly_vol = params.volatility / 100.0 / 12.0_f64.sqrt();
    let months = horizon_months(params.years);

    let mut path = Vec::with_capacity(params.years as usize + 1);
    path.push(params.initial_amount);
    let mut balance = params.initial_amount;

    for month in 1..=months {
        let z = standard_normal(source);
        let monthly_return = monthly_mean + monthly_vol * z;
        balance = balance * (1.0 + monthly_return) + params.monthly_contribution;

        if month % 12 == 0 {
            path.push(balance.max(0.0));
        }
    }

    path
}

/// Run the simulation with an injected uniform source
///
/// Paths are drawn sequentially from `source`, so a seeded source gives a
/// reproducible result.
pub fn simulate<S: UniformSource + ?Sized>(params: &MonteCarloParams, source: &mut S) -> MonteCarloResult {
    let paths: Vec<Vec<f64>> = (0..params.simulations)
        .map(|_| simulate_path(params, source))
        .collect();
    aggregate(params, paths)
}

/// Run the simulation in parallel with one seeded generator per path
///
/// A master generator seeded from `seed` hands out one seed per path before
/// the parallel fan-out, so the result does not depend on the number of
/// threads and different run seeds share no paths.
pub fn simulate_seeded(params: &MonteCarloParams, seed: u64) -> MonteCarloResult {
    let mut master = StdRng::seed_from_u64(seed);
    let path_seeds: Vec<u64> = (0..params.simulations).map(|_| master.next_u64()).collect();

    let paths: Vec<Vec<f64>> = path_seeds
        .into_par_iter()
        .map(|path_seed| {
            let mut source = SeededUniform::from_seed(path_seed);
            simulate_path(params, &mut source)
        })
        .collect();
    aggregate(params, paths)
}

/// Turn raw paths into percentile bands, terminal stats and goal probabilities
pub fn aggregate(params: &MonteCarloParams, paths: Vec<Vec<f64>>) -> MonteCarloResult {
    let percentiles = (0..=params.years)
        .map(|year| {
            let mut values: Vec<f64> = paths
                .iter()
                .filter_map(|path| path.get(year as usize).copied())
                .collect();
            sort_values(&mut values);
            PercentileBand {
                year,
                p10: percentile(&values, 0.10),
                p25: percentile(&values, 0.25),
                p50: percentile(&values, 0.50),
                p75: percentile(&values, 0.75),
                p90: percentile(&values, 0.90),
            }
        })
        .collect();

    let mut final_values: Vec<f64> = paths.iter().filter_map(|p| p.last().copied()).collect();
    sort_values(&mut final_values);

    let final_stats = FinalValueStats {
        worst_case: percentile(&final_values, 0.05),
        median: percentile(&final_values, 0.50),
        best_case: percentile(&final_values, 0.95),
    };

    let goal_probabilities = params
        .goals
        .iter()
        .map(|&goal| GoalProbability {
            goal,
            probability: share_at_or_above(&final_values, goal),
        })
        .collect();

    info!(
        "Monte Carlo: {} paths over {} years, median terminal {:.0}",
        paths.len(),
        params.years,
        final_stats.median
    );

    MonteCarloResult {
        paths,
        percentiles,
        final_values: final_stats,
        goal_probabilities,
    }
}

fn sort_values(values: &mut [f64]) {
    values.sort_by(|a, b| a.total_cmp(b));
}

/// Value at index `floor(len * p)` of sorted values, no interpolation
///
/// Empty input gives 0.
pub fn percentile(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    let idx = ((sorted.len() as f64 * p).floor() as usize).min(sorted.len() - 1);
    sorted[idx]
}

fn share_at_or_above(values: &[f64], goal: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().filter(|&&v| v >= goal).count() as f64 / values.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// Replays a fixed list of uniforms in a loop
    struct FixedSequence {
        values: Vec<f64>,
        next: usize,
    }

    impl UniformSource for FixedSequence {
        fn next_uniform(&mut self) -> f64 {
            let v = self.values[self.next % self.values.len()];
            self.next += 1;
            v
        }
    }

    fn small_params() -> MonteCarloParams {
        MonteCarloParams {
            simulations: 400,
            years: 10,
            ..Default::default()
        }
    }

    #[test]
    fn test_path_shape() {
        let params = small_params();
        let mut source = SeededUniform::from_seed(1);
        let path = simulate_path(&params, &mut source);
        assert_eq!(path.len(), 11);
        assert_eq!(path[0], params.initial_amount);
        assert!(path.iter().all(|v| *v >= 0.0));
    }

    #[test]
    fn test_zero_volatility_is_deterministic_compounding() {
        let params = MonteCarloParams {
            initial_amount: 10_000.0,
            monthly_contribution: 500.0,
            mean_return: 6.0,
            volatility: 0.0,
            years: 3,
            simulations: 5,
            goals: vec![],
        };
        let mut source = SeededUniform::from_seed(99);
        let result = simulate(&params, &mut source);

        let r = 0.06 / 12.0;
        let mut expected = 10_000.0;
        for _ in 0..36 {
            expected = expected * (1.0 + r) + 500.0;
        }
        for path in &result.paths {
            assert_relative_eq!(*path.last().unwrap(), expected, max_relative = 1e-12);
        }
        assert_relative_eq!(result.final_values.worst_case, result.final_values.best_case);
    }

    #[test]
    fn test_fixed_sequence_matches_hand_calculation() {
        // u2 = 0 makes z = sqrt(-2 ln u1); u1 = e^-0.5 gives z = 1
        let mut source = FixedSequence {
            values: vec![(-0.5_f64).exp(), 0.0],
            next: 0,
        };
        let params = MonteCarloParams {
            initial_amount: 1_000.0,
            monthly_contribution: 0.0,
            mean_return: 12.0,
            volatility: 12.0_f64.sqrt(),
            years: 1,
            simulations: 1,
            goals: vec![1_000.0],
        };
        let result = simulate(&params, &mut source);

        // monthly return = 1% + 1% * 1
        let expected = 1_000.0 * 1.02_f64.powi(12);
        assert_relative_eq!(result.paths[0][1], expected, max_relative = 1e-9);
        assert_eq!(result.goal_probabilities[0].probability, 1.0);
    }

    #[test]
    fn test_percentiles_are_ordered() {
        let params = small_params();
        let mut source = SeededUniform::from_seed(2024);
        let result = simulate(&params, &mut source);

        assert_eq!(result.percentiles.len(), 11);
        for band in &result.percentiles {
            assert!(band.p10 <= band.p25);
            assert!(band.p25 <= band.p50);
            assert!(band.p50 <= band.p75);
            assert!(band.p75 <= band.p90);
        }
        let stats = result.final_values;
        assert!(stats.worst_case <= stats.median && stats.median <= stats.best_case);
    }

    #[test]
    fn test_goal_probabilities_decrease_with_goal() {
        let params = MonteCarloParams {
            simulations: 500,
            ..Default::default()
        };
        let result = simulate_seeded(&params, 7);
        assert_eq!(result.goal_probabilities.len(), DEFAULT_GOALS.len());
        let probs: Vec<f64> = result.goal_probabilities.iter().map(|g| g.probability).collect();
        assert!(probs.windows(2).all(|w| w[0] >= w[1]));
        assert!(probs.iter().all(|p| (0.0..=1.0).contains(p)));
    }

    #[test]
    fn test_seeded_run_is_reproducible() {
        let params = small_params();
        let a = simulate_seeded(&params, 42);
        let b = simulate_seeded(&params, 42);
        assert_eq!(a, b);

        let mut s1 = SeededUniform::from_seed(5);
        let mut s2 = SeededUniform::from_seed(5);
        assert_eq!(simulate(&params, &mut s1), simulate(&params, &mut s2));
    }

    #[test]
    fn test_adjacent_seeds_share_no_paths() {
        let params = MonteCarloParams {
            simulations: 200,
            years: 5,
            ..Default::default()
        };
        let a = simulate_seeded(&params, 42);
        let b = simulate_seeded(&params, 43);

        let shared = a.paths.iter().filter(|path| b.paths.contains(path)).count();
        assert_eq!(shared, 0);
        assert_ne!(a.final_values.median, b.final_values.median);
    }

    #[test]
    fn test_percentile_index_convention() {
        let sorted: Vec<f64> = (0..10).map(|v| v as f64).collect();
        assert_eq!(percentile(&sorted, 0.10), 1.0);
        assert_eq!(percentile(&sorted, 0.50), 5.0);
        assert_eq!(percentile(&sorted, 0.95), 9.0);
        assert_eq!(percentile(&[], 0.5), 0.0);
    }

    #[test]
    fn test_no_simulations() {
        let params = MonteCarloParams {
            simulations: 0,
            ..Default::default()
        };
        let mut source = SeededUniform::from_seed(0);
        let result = simulate(&params, &mut source);
        assert!(result.paths.is_empty());
        assert_eq!(result.percentiles.len(), params.years as usize + 1);
        assert_eq!(result.final_values.median, 0.0);
        assert!(result.goal_probabilities.iter().all(|g| g.probability == 0.0));
    }
}
