//! Ship groups: the unit that combat decisions are made for.

use crate::error::{ErrorSeverity, FleetError};
use crate::ship::ShipId;

/// Ordered, non-empty set of ships reasoned about as one actor.
///
/// A mission's fleet or a single unassigned ship. Construction rejects empty
/// input, so classification never sees an empty group.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "Vec<ShipId>", into = "Vec<ShipId>")
)]
pub struct ShipGroup {
    ships: Vec<ShipId>,
}

impl ShipGroup {
    /// Builds a group, dropping duplicates while keeping first-seen order.
    ///
    /// # Errors
    ///
    /// Returns [`GroupError::Empty`] when `ships` yields nothing.
    pub fn new(ships: impl IntoIterator<Item = ShipId>) -> Result<Self, GroupError> {
        let mut unique: Vec<ShipId> = Vec::new();
        for ship in ships {
            if !unique.contains(&ship) {
                unique.push(ship);
            }
        }
        if unique.is_empty() {
            return Err(GroupError::Empty);
        }
        Ok(Self { ships: unique })
    }

    /// One-ship group for a casual (unassigned) ship.
    pub fn singleton(ship: ShipId) -> Self {
        Self { ships: vec![ship] }
    }

    pub fn ships(&self) -> &[ShipId] {
        &self.ships
    }

    pub fn contains(&self, ship: ShipId) -> bool {
        self.ships.contains(&ship)
    }

    /// Number of ships, always at least one.
    pub fn len(&self) -> usize {
        self.ships.len()
    }

    /// The first ship of the group.
    pub fn lead(&self) -> ShipId {
        self.ships[0]
    }

    pub fn iter(&self) -> impl Iterator<Item = ShipId> + '_ {
        self.ships.iter().copied()
    }
}

impl<'a> IntoIterator for &'a ShipGroup {
    type Item = &'a ShipId;
    type IntoIter = std::slice::Iter<'a, ShipId>;

    fn into_iter(self) -> Self::IntoIter {
        self.ships.iter()
    }
}

impl TryFrom<Vec<ShipId>> for ShipGroup {
    type Error = GroupError;

    fn try_from(ships: Vec<ShipId>) -> Result<Self, Self::Error> {
        Self::new(ships)
    }
}

impl From<ShipGroup> for Vec<ShipId> {
    fn from(group: ShipGroup) -> Self {
        group.ships
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GroupError {
    #[error("ship group is empty")]
    Empty,
}

impl FleetError for GroupError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        "GROUP_EMPTY"
    }
}
