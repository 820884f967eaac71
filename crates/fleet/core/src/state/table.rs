use std::collections::BTreeMap;

use crate::ship::{OwnerId, ShipId, ShipResolver};
use crate::state::{Faction, ShipCombatState, StateError};

/// Persisted layout of one table entry: `(owner_id, ship_id, state_ordinal)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatRow {
    pub owner_id: u32,
    pub ship_id: u32,
    pub state_ordinal: u8,
}

/// Outcome of [`CombatStateTable::restore`].
///
/// Dropped rows are not errors: a save can legitimately reference ships that
/// were destroyed before it was loaded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RestoreReport {
    pub restored: usize,
    /// Rows whose ship no longer resolves to a live ship.
    pub stale: usize,
    /// Rows with an unknown ordinal or a state the faction does not accept.
    pub invalid: usize,
    /// Rows written by a different owner.
    pub foreign: usize,
}

impl RestoreReport {
    pub fn dropped(&self) -> usize {
        self.stale + self.invalid + self.foreign
    }
}

/// Mapping from ship to [`ShipCombatState`] for a single fleet owner.
///
/// The table stores ids only and never keeps a ship alive. It has no view of
/// the arena, so callers gate lookups on liveness and drop entries for ships
/// that left the arena with [`evict`](Self::evict).
///
/// Iteration order is ascending ship id, which keeps snapshots deterministic.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CombatStateTable {
    owner: OwnerId,
    faction: Faction,
    ships: BTreeMap<ShipId, ShipCombatState>,
}

impl CombatStateTable {
    pub fn new(owner: OwnerId, faction: Faction) -> Self {
        Self {
            owner,
            faction,
            ships: BTreeMap::new(),
        }
    }

    pub fn owner(&self) -> OwnerId {
        self.owner
    }

    pub fn faction(&self) -> Faction {
        self.faction
    }

    /// Registers a ship as [`ShipCombatState::Idle`].
    ///
    /// Returns `false` (and leaves the entry untouched) if already present.
    pub fn register(&mut self, ship: ShipId) -> bool {
        if self.ships.contains_key(&ship) {
            return false;
        }
        self.ships.insert(ship, ShipCombatState::Idle);
        true
    }

    /// Registers a ship with an explicit initial state.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::InvalidForFaction`] if the owner's faction does
    /// not accept `state`.
    pub fn register_with(
        &mut self,
        ship: ShipId,
        state: ShipCombatState,
    ) -> Result<bool, StateError> {
        self.check_valid(state)?;
        if self.ships.contains_key(&ship) {
            return Ok(false);
        }
        self.ships.insert(ship, state);
        Ok(true)
    }

    /// Removes a ship. Absent ships are ignored.
    pub fn unregister(&mut self, ship: ShipId) -> Option<ShipCombatState> {
        self.ships.remove(&ship)
    }

    /// # Errors
    ///
    /// Returns [`StateError::NotFound`] if the ship is not registered.
    pub fn get_state(&self, ship: ShipId) -> Result<ShipCombatState, StateError> {
        self.ships
            .get(&ship)
            .copied()
            .ok_or(StateError::NotFound(ship))
    }

    /// Overwrites the state of a registered ship, returning the previous one.
    ///
    /// # Errors
    ///
    /// - [`StateError::NotFound`] if the ship is not registered
    /// - [`StateError::InvalidForFaction`] if the faction rejects `state`
    pub fn set_state(
        &mut self,
        ship: ShipId,
        state: ShipCombatState,
    ) -> Result<ShipCombatState, StateError> {
        self.check_valid(state)?;
        let slot = self
            .ships
            .get_mut(&ship)
            .ok_or(StateError::NotFound(ship))?;
        Ok(core::mem::replace(slot, state))
    }

    pub fn contains(&self, ship: ShipId) -> bool {
        self.ships.contains_key(&ship)
    }

    pub fn len(&self) -> usize {
        self.ships.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ships.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ShipId, ShipCombatState)> + '_ {
        self.ships.iter().map(|(ship, state)| (*ship, *state))
    }

    /// All `(ship, state)` pairs, for display and persistence.
    pub fn snapshot(&self) -> Vec<(ShipId, ShipCombatState)> {
        self.iter().collect()
    }

    /// The snapshot in its persisted row layout.
    pub fn rows(&self) -> Vec<CombatRow> {
        self.iter()
            .map(|(ship, state)| CombatRow {
                owner_id: self.owner.0,
                ship_id: ship.0,
                state_ordinal: state.ordinal(),
            })
            .collect()
    }

    /// Loads persisted rows, resolving each ship id through `resolver`.
    ///
    /// Rows that do not resolve to a live ship, carry an unusable ordinal, or
    /// belong to another owner are dropped and counted in the report. Existing
    /// entries for restored ships are overwritten.
    pub fn restore<R>(
        &mut self,
        rows: impl IntoIterator<Item = CombatRow>,
        resolver: &R,
    ) -> RestoreReport
    where
        R: ShipResolver + ?Sized,
    {
        let mut report = RestoreReport::default();
        for row in rows {
            if row.owner_id != self.owner.0 {
                report.foreign += 1;
                continue;
            }
            let Some(ship) = resolver.resolve(row.ship_id) else {
                report.stale += 1;
                continue;
            };
            let state = match ShipCombatState::from_ordinal(row.state_ordinal) {
                Ok(state) if state.is_valid_for(self.faction) => state,
                _ => {
                    report.invalid += 1;
                    continue;
                }
            };
            self.ships.insert(ship, state);
            report.restored += 1;
        }
        report
    }

    /// Drops entries for ships that are no longer alive. Returns the number
    /// of evicted entries.
    pub fn evict(&mut self, is_live: impl Fn(ShipId) -> bool) -> usize {
        let before = self.ships.len();
        self.ships.retain(|ship, _| is_live(*ship));
        before - self.ships.len()
    }

    fn check_valid(&self, state: ShipCombatState) -> Result<(), StateError> {
        if state.is_valid_for(self.faction) {
            Ok(())
        } else {
            Err(StateError::InvalidForFaction {
                state,
                faction: self.faction,
            })
        }
    }
}
