//! Projection inputs, preset profiles and CSV batch loading

mod data;
mod presets;
pub mod loader;

pub use data::{
    horizon_months, AccountDescription, AccountType, ContributionFrequency, ProjectionParams,
    DEFAULT_START_YEAR, MAX_HORIZON_YEARS,
};
pub use presets::PresetProfile;
pub use loader::{load_default_scenarios, load_scenarios, load_scenarios_from_reader, NamedParams};
