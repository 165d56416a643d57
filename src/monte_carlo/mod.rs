//! Stochastic projection of savings paths

mod rng;
mod simulation;

pub use rng::{box_muller, standard_normal, SeededUniform, ThreadUniform, UniformSource};
pub use simulation::{
    aggregate, percentile, simulate, simulate_path, simulate_seeded, FinalValueStats,
    GoalProbability, MonteCarloParams, MonteCarloResult, PercentileBand, DEFAULT_GOALS,
};
