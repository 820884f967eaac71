use std::collections::BTreeSet;

use fleet_core::{CombatRating, OwnerId, Ship, ShipGroup, ShipId};

use super::{SharedWorld, World};
use crate::api::{ShipFilter, SpatialService};

/// [`SpatialService`] answering from a shared [`World`] for one owner.
///
/// Proximity uses the Chebyshev distance between ship positions.
#[derive(Clone, Debug)]
pub struct WorldSpatial {
    world: SharedWorld,
    owner: OwnerId,
    combat_range: u32,
}

impl WorldSpatial {
    pub fn new(world: SharedWorld, owner: OwnerId, combat_range: u32) -> Self {
        Self {
            world,
            owner,
            combat_range,
        }
    }

    pub fn owner(&self) -> OwnerId {
        self.owner
    }

    pub fn combat_range(&self) -> u32 {
        self.combat_range
    }

    fn matches(&self, world: &World, ship: &Ship, rule: ShipFilter) -> bool {
        match rule {
            ShipFilter::Hostile => world.is_hostile(self.owner, ship.owner),
            ShipFilter::Raider => ship.class == fleet_core::ShipClass::Raider,
            ShipFilter::Fighting => ship.class.is_fighting(),
            ShipFilter::Working => ship.class.is_working(),
            ShipFilter::NotInFleet => !world.is_assigned(ship.id),
        }
    }

    fn matches_all(&self, world: &World, ship: &Ship, rules: &[ShipFilter]) -> bool {
        rules.iter().all(|rule| self.matches(world, ship, *rule))
    }
}

impl SpatialService for WorldSpatial {
    fn ships_near(&self, group: &ShipGroup) -> Vec<ShipId> {
        let world = self.world.read();
        let mut near = BTreeSet::new();
        for member in group.iter() {
            let Some(ship) = world.ships.get(member) else {
                continue;
            };
            near.extend(
                world
                    .ships
                    .within(ship.position, self.combat_range)
                    .map(|other| other.id)
                    .filter(|id| !group.contains(*id)),
            );
        }
        near.into_iter().collect()
    }

    fn filter(&self, ships: &[ShipId], rules: &[ShipFilter]) -> Vec<ShipId> {
        let world = self.world.read();
        ships
            .iter()
            .copied()
            .filter(|id| {
                world
                    .ships
                    .get(*id)
                    .is_some_and(|ship| self.matches_all(&world, ship, rules))
            })
            .collect()
    }

    fn owned_ships(&self, rules: &[ShipFilter]) -> Vec<ShipId> {
        let world = self.world.read();
        world
            .ships
            .owned_by(self.owner)
            .filter(|ship| self.matches_all(&world, ship, rules))
            .map(|ship| ship.id)
            .collect()
    }

    fn rating(&self, ship: ShipId) -> CombatRating {
        self.world
            .read()
            .ships
            .get(ship)
            .map_or(CombatRating::ZERO, |ship| ship.rating)
    }

    fn is_live(&self, ship: ShipId) -> bool {
        self.world.read().ships.contains(ship)
    }
}
