use std::collections::BTreeMap;

use crate::ship::{ArenaError, CombatRating, OwnerId, Position, Ship, ShipClass, ShipId};

/// Resolves persisted ship ids back to live ships.
///
/// Implemented by [`ShipArena`]; tests and tools may supply their own.
pub trait ShipResolver {
    /// Returns the live ship id for a raw persisted id, or `None` if that ship
    /// no longer exists.
    fn resolve(&self, raw: u32) -> Option<ShipId>;
}

/// Owning store of every ship in the simulation, keyed by [`ShipId`].
///
/// Other components (state tables, fleets, missions) hold only ids. Removing
/// a ship here makes every later lookup through the arena fail, which is how
/// destroyed ships fall out of the rest of the system.
#[derive(Clone, Debug, Default)]
pub struct ShipArena {
    ships: BTreeMap<ShipId, Ship>,
    next_id: u32,
}

impl ShipArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates a fresh id and inserts a new ship.
    pub fn spawn(
        &mut self,
        owner: OwnerId,
        class: ShipClass,
        position: Position,
        rating: CombatRating,
    ) -> Result<ShipId, ArenaError> {
        let id = ShipId(self.next_id);
        self.next_id = self
            .next_id
            .checked_add(1)
            .ok_or(ArenaError::IdOverflow {
                current: self.next_id,
            })?;
        self.ships
            .insert(id, Ship::new(id, owner, class, position).with_rating(rating));
        Ok(id)
    }

    /// Inserts a ship with a caller-chosen id (scenario and save loading).
    ///
    /// Later `spawn` calls never hand out an id at or below the highest one
    /// inserted here.
    pub fn insert(&mut self, ship: Ship) -> Result<(), ArenaError> {
        if self.ships.contains_key(&ship.id) {
            return Err(ArenaError::DuplicateShip(ship.id));
        }
        let following = ship
            .id
            .0
            .checked_add(1)
            .ok_or(ArenaError::IdOverflow { current: ship.id.0 })?;
        self.next_id = self.next_id.max(following);
        self.ships.insert(ship.id, ship);
        Ok(())
    }

    pub fn remove(&mut self, id: ShipId) -> Option<Ship> {
        self.ships.remove(&id)
    }

    pub fn get(&self, id: ShipId) -> Option<&Ship> {
        self.ships.get(&id)
    }

    pub fn get_mut(&mut self, id: ShipId) -> Option<&mut Ship> {
        self.ships.get_mut(&id)
    }

    /// Like [`get`](Self::get) but reports a missing ship as an error.
    pub fn ship(&self, id: ShipId) -> Result<&Ship, ArenaError> {
        self.ships.get(&id).ok_or(ArenaError::UnknownShip(id))
    }

    pub fn contains(&self, id: ShipId) -> bool {
        self.ships.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.ships.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ships.is_empty()
    }

    /// Iterates ships in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = &Ship> {
        self.ships.values()
    }

    pub fn owned_by(&self, owner: OwnerId) -> impl Iterator<Item = &Ship> {
        self.ships.values().filter(move |ship| ship.owner == owner)
    }

    /// Ships whose position lies within `radius` tiles of `center`.
    pub fn within(&self, center: Position, radius: u32) -> impl Iterator<Item = &Ship> {
        self.ships
            .values()
            .filter(move |ship| ship.position.distance(center) <= radius)
    }
}

impl ShipResolver for ShipArena {
    fn resolve(&self, raw: u32) -> Option<ShipId> {
        let id = ShipId(raw);
        self.contains(id).then_some(id)
    }
}
