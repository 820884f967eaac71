//! Faction rule variants for the arbitrator.
//!
//! The standard and raider rule sets share the tick algorithm and differ only
//! in the data below, picked once per owner at construction.

use crate::ship::ShipClass;
use crate::state::Faction;
use crate::threat::CategorySet;

/// What the casual pass does when a ship finds nothing to fight.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum IdleFallback {
    /// Request idle only if every ship of the group is already idle, so ships
    /// mid-maneuver are not spammed with idle requests.
    WhenGroupIdle,
    /// Re-request idle/seek every tick.
    Always,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FactionPolicy {
    pub faction: Faction,
    /// Threat categories this faction distinguishes.
    pub categories: CategorySet,
    pub idle_fallback: IdleFallback,
    /// Class of the owner's own unassigned ships handled by the casual pass.
    pub casual_class: ShipClass,
}

impl FactionPolicy {
    pub const STANDARD: Self = Self {
        faction: Faction::Standard,
        categories: CategorySet::all(),
        idle_fallback: IdleFallback::WhenGroupIdle,
        casual_class: ShipClass::Warship,
    };

    /// Raiders do not single out other raiders and always look for prey.
    pub const RAIDER: Self = Self {
        faction: Faction::Raider,
        categories: CategorySet::FIGHTING.union(CategorySet::WORKING),
        idle_fallback: IdleFallback::Always,
        casual_class: ShipClass::Raider,
    };

    pub const fn for_faction(faction: Faction) -> Self {
        match faction {
            Faction::Standard => Self::STANDARD,
            Faction::Raider => Self::RAIDER,
        }
    }
}

impl Default for FactionPolicy {
    fn default() -> Self {
        Self::STANDARD
    }
}
