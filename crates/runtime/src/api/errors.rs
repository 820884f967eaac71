//! Unified error types surfaced by the runtime API.
//!
//! Arbitration itself never fails: missing hostiles, empty fleets and stale
//! ids are ordinary branches. Errors come from table misuse and persistence.
use fleet_core::{ArenaError, ErrorSeverity, FleetError, OwnerId, StateError};
use thiserror::Error;

pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    State(#[from] StateError),

    #[error(transparent)]
    Arena(#[from] ArenaError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("{0} is not a known owner")]
    UnknownOwner(OwnerId),
}

impl FleetError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::State(err) => err.severity(),
            Self::Arena(err) => err.severity(),
            Self::Repository(err) => err.severity(),
            Self::UnknownOwner(_) => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::State(err) => err.error_code(),
            Self::Arena(err) => err.error_code(),
            Self::Repository(err) => err.error_code(),
            Self::UnknownOwner(_) => "RUNTIME_UNKNOWN_OWNER",
        }
    }
}
