//! Year-by-year portfolio projection

mod state;
mod engine;
mod results;
mod cache;
pub mod reference;

pub use state::ProjectionState;
pub use engine::{project, ProjectionEngine};
pub use results::{ProjectionResult, ProjectionSummary, YearSnapshot};
pub use cache::{ParamsKey, ProjectionCache};
pub use reference::{calculate_compound_interest, SimpleResult, SimpleYear};
