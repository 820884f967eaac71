//! Ship identities, owners and the ship arena.
//!
//! Ships are owned by a [`ShipArena`] and referred to everywhere else by a
//! stable [`ShipId`]. Ids are never reused, so a removed ship can only ever be
//! observed as "missing", never as some other ship.
mod arena;
mod error;

use std::fmt;

pub use arena::{ShipArena, ShipResolver};
pub use error::ArenaError;

/// Stable identifier of a ship within one simulation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShipId(pub u32);

impl fmt::Display for ShipId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ship#{}", self.0)
    }
}

/// Identifier of a fleet owner (AI-controlled or human player).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OwnerId(pub u32);

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "owner#{}", self.0)
    }
}

/// Discrete map position expressed in tile coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Chebyshev distance (diagonal steps cost one tile).
    pub fn distance(self, other: Position) -> u32 {
        let dx = self.x.abs_diff(other.x);
        let dy = self.y.abs_diff(other.y);
        dx.max(dy)
    }

    /// One tile towards `target`, diagonals allowed.
    pub fn step_towards(self, target: Position) -> Position {
        Position::new(
            self.x + target.x.cmp(&self.x) as i32,
            self.y + target.y.cmp(&self.y) as i32,
        )
    }
}

/// Hull class of a ship, which decides how hostiles classify it.
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
pub enum ShipClass {
    /// Armed ship, fighting-capable.
    Warship,
    /// Raider (pirate) hull.
    Raider,
    /// Unarmed trade or work ship.
    #[default]
    Merchant,
}

impl ShipClass {
    pub fn is_fighting(self) -> bool {
        matches!(self, ShipClass::Warship)
    }

    pub fn is_working(self) -> bool {
        matches!(self, ShipClass::Merchant)
    }
}

/// Raw combat figures used by the power balance estimator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatRating {
    pub hull: u32,
    pub firepower: u32,
}

impl CombatRating {
    pub const ZERO: Self = Self {
        hull: 0,
        firepower: 0,
    };

    pub fn new(hull: u32, firepower: u32) -> Self {
        Self { hull, firepower }
    }
}

/// A ship as tracked by the arena.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ship {
    pub id: ShipId,
    pub owner: OwnerId,
    pub class: ShipClass,
    pub position: Position,
    pub rating: CombatRating,
}

impl Ship {
    pub fn new(id: ShipId, owner: OwnerId, class: ShipClass, position: Position) -> Self {
        Self {
            id,
            owner,
            class,
            position,
            rating: CombatRating::ZERO,
        }
    }

    pub fn with_rating(mut self, rating: CombatRating) -> Self {
        self.rating = rating;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_is_chebyshev() {
        assert_eq!(Position::new(0, 0).distance(Position::new(3, -7)), 7);
        assert_eq!(Position::new(2, 2).distance(Position::new(2, 2)), 0);
    }

    #[test]
    fn step_towards_handles_extreme_coordinates() {
        let far = Position::new(i32::MIN, i32::MAX);
        let target = Position::new(i32::MAX, i32::MIN);
        assert_eq!(
            far.step_towards(target),
            Position::new(i32::MIN + 1, i32::MAX - 1)
        );
        assert_eq!(target.step_towards(target), target);
    }

    #[test]
    fn step_towards_closes_one_tile() {
        let from = Position::new(0, 0);
        let to = Position::new(5, -2);
        let step = from.step_towards(to);

        assert_eq!(step, Position::new(1, -1));
        assert_eq!(step.distance(to), from.distance(to) - 1);
        assert_eq!(to.step_towards(to), to);
    }

    #[test]
    fn class_roles() {
        assert!(ShipClass::Warship.is_fighting());
        assert!(!ShipClass::Raider.is_fighting());
        assert!(ShipClass::Merchant.is_working());
        assert_eq!(ShipId(4).to_string(), "ship#4");
    }
}
