//! Goal, withdrawal and financial independence planning
//!
//! Deterministic closed-form helpers. No tax or fees are applied.

pub mod fire;
pub mod goals;
pub mod withdrawal;

pub use fire::{FireParams, FireSummary};
pub use goals::{
    future_value, required_initial_amount, required_monthly_contribution, GoalPlan, Milestone,
};
pub use withdrawal::{withdrawal_path, WithdrawalParams, WithdrawalPoint, WithdrawalSummary};
