//! Combat state table errors.

use crate::error::{ErrorSeverity, FleetError};
use crate::ship::ShipId;
use crate::state::{Faction, ShipCombatState};

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StateError {
    /// The ship was never registered with this owner, or has been removed.
    #[error("{0} is not registered in the combat state table")]
    NotFound(ShipId),

    #[error("state {state} is not valid for {faction} ships")]
    InvalidForFaction {
        state: ShipCombatState,
        faction: Faction,
    },

    #[error("unknown combat state ordinal {0}")]
    UnknownOrdinal(u8),
}

impl FleetError for StateError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            StateError::NotFound(_) | StateError::InvalidForFaction { .. } => {
                ErrorSeverity::Validation
            }
            // Only reachable from corrupted save data.
            StateError::UnknownOrdinal(_) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            StateError::NotFound(_) => "STATE_NOT_FOUND",
            StateError::InvalidForFaction { .. } => "STATE_INVALID_FOR_FACTION",
            StateError::UnknownOrdinal(_) => "STATE_UNKNOWN_ORDINAL",
        }
    }
}
