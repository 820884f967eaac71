//! Ship arena errors.

use crate::error::{ErrorSeverity, FleetError};
use crate::ship::ShipId;

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ArenaError {
    #[error("{0} is not in the arena")]
    UnknownShip(ShipId),

    #[error("{0} is already in the arena")]
    DuplicateShip(ShipId),

    #[error("ship id overflow (current: {current})")]
    IdOverflow { current: u32 },
}

impl FleetError for ArenaError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            ArenaError::UnknownShip(_) | ArenaError::DuplicateShip(_) => ErrorSeverity::Validation,
            ArenaError::IdOverflow { .. } => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            ArenaError::UnknownShip(_) => "ARENA_UNKNOWN_SHIP",
            ArenaError::DuplicateShip(_) => "ARENA_DUPLICATE_SHIP",
            ArenaError::IdOverflow { .. } => "ARENA_ID_OVERFLOW",
        }
    }
}
