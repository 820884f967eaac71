//! Combat arbitration runtime for AI fleet owners.
//!
//! Each AI owner gets a [`CombatManager`] that holds its combat state table
//! and, once per tick, lets the [`CombatArbitrator`] decide which of its ship
//! groups engage, idle or keep following their mission.
//!
//! Modules are organized by responsibility:
//! - [`api`] declares the collaborator contracts and error types
//! - [`arbiter`] hosts the three-pass decision core
//! - [`manager`] wires a table, an arbitrator and collaborators together
//! - [`repository`] persists combat state tables
//! - [`world`] provides reference collaborators over an in-process world
pub mod api;
pub mod arbiter;
pub mod config;
pub mod manager;
pub mod repository;
pub mod world;

pub use api::{
    BehaviorService, CombatServices, Mission, MissionId, MissionService, PauseRequest, Result,
    RuntimeError, ShipFilter, SpatialService,
};
pub use arbiter::{CombatArbitrator, GroupOutcome, TickSummary};
pub use config::RuntimeConfig;
pub use manager::CombatManager;
pub use repository::{
    CombatStateRepository, FileCombatRepository, InMemoryCombatRepo, RepositoryError,
};
pub use world::{
    DecisionLog, MissionBoard, MissionRecord, MissionStatus, Owner, PausePolicy, SharedWorld,
    World, WorldSpatial,
};
