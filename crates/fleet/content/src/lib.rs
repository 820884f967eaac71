//! Data-driven fleet content and loaders.
//!
//! This crate reads the files a simulation run is configured with:
//! - Combat configuration (data-driven via TOML)
//! - Scenarios: owners, diplomacy, ships and missions (data-driven via RON)
//!
//! All loaders use fleet-core types directly with serde for RON/TOML
//! deserialization.

pub mod scenario;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use scenario::{MissionSpec, OwnerSpec, PauseSpec, Scenario, ShipSpec};

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, ScenarioLoader};
