//! Client state kept between invocations as JSON files under
//! `.taskdeck/state/`: completion overrides and the last-selected filters.
//!
//! Missing or corrupt files read as defaults. Nothing here is fatal.

mod filters;
mod store;

pub use filters::FilterSelection;
pub use store::StateStore;

pub const COMPLETION_KEY: &str = "completion";
pub const FILTERS_KEY: &str = "filters";
