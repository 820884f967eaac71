//! Reference collaborators backed by an in-process world model.
//!
//! The arbitrator only sees the traits in [`crate::api`]. These
//! implementations back them with a shared [`World`] so the tick driver and
//! tests can run complete scenarios.
mod behavior;
mod missions;
mod spatial;

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use fleet_core::{ArenaError, Faction, OwnerId, Ship, ShipArena, ShipId};

pub use behavior::DecisionLog;
pub use missions::{MissionBoard, MissionRecord, MissionStatus, PausePolicy};
pub use spatial::WorldSpatial;

use crate::api::{MissionId, Result, RuntimeError};

/// A fleet owner taking part in the simulation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Owner {
    pub id: OwnerId,
    pub name: String,
    pub faction: Faction,
}

/// Ships, owners, diplomacy and missions of one simulation.
#[derive(Debug, Default)]
pub struct World {
    pub ships: ShipArena,
    owners: BTreeMap<OwnerId, Owner>,
    /// Unordered hostile pairs, stored as `(min, max)`.
    hostilities: BTreeSet<(OwnerId, OwnerId)>,
    missions: BTreeMap<MissionId, MissionRecord>,
    next_mission: u32,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_owner(&mut self, id: OwnerId, name: impl Into<String>, faction: Faction) {
        self.owners.insert(
            id,
            Owner {
                id,
                name: name.into(),
                faction,
            },
        );
    }

    pub fn owner(&self, id: OwnerId) -> Option<&Owner> {
        self.owners.get(&id)
    }

    pub fn owners(&self) -> impl Iterator<Item = &Owner> {
        self.owners.values()
    }

    /// Declares two owners hostile to each other.
    ///
    /// # Errors
    ///
    /// Returns [`RuntimeError::UnknownOwner`] if either owner was not added.
    pub fn declare_hostile(&mut self, a: OwnerId, b: OwnerId) -> Result<()> {
        for owner in [a, b] {
            if !self.owners.contains_key(&owner) {
                return Err(RuntimeError::UnknownOwner(owner));
            }
        }
        if a != b {
            self.hostilities.insert((a.min(b), a.max(b)));
        }
        Ok(())
    }

    /// Raiders are hostile to every other owner; everyone else only to owners
    /// they declared hostility with.
    pub fn is_hostile(&self, a: OwnerId, b: OwnerId) -> bool {
        if a == b {
            return false;
        }
        let raider = |owner: OwnerId| {
            self.owners
                .get(&owner)
                .is_some_and(|owner| owner.faction == Faction::Raider)
        };
        raider(a) || raider(b) || self.hostilities.contains(&(a.min(b), a.max(b)))
    }

    pub fn add_ship(&mut self, ship: Ship) -> std::result::Result<(), ArenaError> {
        self.ships.insert(ship)
    }

    /// Removes a ship from the arena and from every mission fleet.
    pub fn destroy(&mut self, ship: ShipId) -> Option<Ship> {
        for mission in self.missions.values_mut() {
            mission.ships.retain(|member| *member != ship);
        }
        self.ships.remove(ship)
    }

    /// Creates a running mission for `owner` with the given fleet.
    pub fn create_mission(
        &mut self,
        owner: OwnerId,
        ships: Vec<ShipId>,
        combat_phase: bool,
        pause_policy: PausePolicy,
    ) -> MissionId {
        let id = MissionId(self.next_mission);
        self.next_mission += 1;
        self.missions.insert(
            id,
            MissionRecord {
                id,
                owner,
                ships,
                combat_phase,
                status: MissionStatus::Running,
                pause_policy,
            },
        );
        id
    }

    pub fn mission(&self, id: MissionId) -> Option<&MissionRecord> {
        self.missions.get(&id)
    }

    pub fn mission_mut(&mut self, id: MissionId) -> Option<&mut MissionRecord> {
        self.missions.get_mut(&id)
    }

    pub fn missions(&self) -> impl Iterator<Item = &MissionRecord> {
        self.missions.values()
    }

    /// Whether the ship belongs to the fleet of a mission that is not aborted.
    pub fn is_assigned(&self, ship: ShipId) -> bool {
        self.missions
            .values()
            .any(|mission| mission.is_live() && mission.ships.contains(&ship))
    }

    /// Wraps the world for sharing between collaborators.
    pub fn into_shared(self) -> SharedWorld {
        SharedWorld::new(self)
    }
}

/// Handle to a [`World`] shared by the collaborators of several owners.
///
/// Collaborators only read during a tick; the driver writes between ticks.
#[derive(Clone, Debug, Default)]
pub struct SharedWorld {
    inner: Arc<RwLock<World>>,
}

impl SharedWorld {
    pub fn new(world: World) -> Self {
        Self {
            inner: Arc::new(RwLock::new(world)),
        }
    }

    /// Read access. A poisoned lock still yields the data: arbitration must
    /// not fail on a panic elsewhere.
    pub fn read(&self) -> RwLockReadGuard<'_, World> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn write(&self) -> RwLockWriteGuard<'_, World> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn spatial(&self, owner: OwnerId, combat_range: u32) -> WorldSpatial {
        WorldSpatial::new(self.clone(), owner, combat_range)
    }

    pub fn mission_board(&self, owner: OwnerId) -> MissionBoard {
        MissionBoard::new(self.clone(), owner)
    }
}
