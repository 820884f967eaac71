//! Per-ship combat movement state and the per-owner state table.
//!
//! One fixed superset enumeration covers every faction, so persisted ordinals
//! mean the same thing no matter which owner wrote them. Each [`Faction`]
//! accepts a subset of the states.
mod error;
mod table;

pub use error::StateError;
pub use table::{CombatRow, CombatStateTable, RestoreReport};

/// Combat movement state of a single ship.
///
/// Ordinals are persisted. Never renumber existing variants; append new ones.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[repr(u8)]
pub enum ShipCombatState {
    #[default]
    Idle = 0,
    Attacking = 1,
    Moving = 2,
    Fleeing = 3,
    /// Raider only.
    ChasingTarget = 4,
    /// Raider only.
    ReturningHome = 5,
}

impl ShipCombatState {
    /// Stable integer index used by persistence.
    pub const fn ordinal(self) -> u8 {
        self as u8
    }

    /// Inverse of [`ordinal`](Self::ordinal).
    ///
    /// # Errors
    ///
    /// Returns [`StateError::UnknownOrdinal`] for indices no variant uses.
    pub const fn from_ordinal(ordinal: u8) -> Result<Self, StateError> {
        match ordinal {
            0 => Ok(Self::Idle),
            1 => Ok(Self::Attacking),
            2 => Ok(Self::Moving),
            3 => Ok(Self::Fleeing),
            4 => Ok(Self::ChasingTarget),
            5 => Ok(Self::ReturningHome),
            other => Err(StateError::UnknownOrdinal(other)),
        }
    }

    pub fn is_valid_for(self, faction: Faction) -> bool {
        match self {
            Self::Idle | Self::Attacking | Self::Moving | Self::Fleeing => true,
            Self::ChasingTarget | Self::ReturningHome => faction == Faction::Raider,
        }
    }

    pub fn is_idle(self) -> bool {
        matches!(self, Self::Idle)
    }
}

/// Owner faction, selecting which rule variant arbitrates its ships.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Faction {
    /// Regular AI trader/colonizer.
    #[default]
    Standard,
    /// Pirate AI.
    Raider,
}

impl Faction {
    /// States this faction's table accepts, in ordinal order.
    pub fn states(self) -> impl Iterator<Item = ShipCombatState> {
        use strum::IntoEnumIterator;
        ShipCombatState::iter().filter(move |state| state.is_valid_for(self))
    }
}
