//! Types the tick driver and collaborators interact with.
//!
//! - [`services`] declares the collaborator contracts (spatial queries,
//!   missions, behavior selection)
//! - [`errors`] wraps core and repository failures for callers
pub mod errors;
pub mod services;

pub use errors::{Result, RuntimeError};
pub use services::{
    BehaviorService, CombatServices, Mission, MissionId, MissionService, PauseRequest, ShipFilter,
    SpatialService,
};
