//! Deterministic data types and decision rules for fleet combat arbitration.
//!
//! `fleet-core` defines the ship arena, the per-owner combat state table, the
//! threat classifier, the power balance estimator and the engagement decision
//! emitted by arbitration. Everything here is pure: the runtime crate supplies
//! world queries, missions, behavior execution and persistence.
pub mod balance;
pub mod config;
pub mod decision;
pub mod error;
pub mod group;
pub mod policy;
pub mod ship;
pub mod state;
pub mod threat;

pub use balance::{CombatPower, PowerBalance};
pub use config::CombatConfig;
pub use decision::{ActionKind, EngagementDecision, Trigger};
pub use error::{ErrorSeverity, FleetError};
pub use group::{GroupError, ShipGroup};
pub use policy::{FactionPolicy, IdleFallback};
pub use ship::{
    ArenaError, CombatRating, OwnerId, Position, Ship, ShipArena, ShipClass, ShipId, ShipResolver,
};
pub use state::{
    CombatRow, CombatStateTable, Faction, RestoreReport, ShipCombatState, StateError,
};
pub use threat::{Bucket, CategorySet, ThreatCategories, ThreatCategory, classify};
