//! Shared world fixture for the runtime integration tests.
#![allow(dead_code)]

use combat_runtime::{
    CombatManager, DecisionLog, MissionBoard, MissionId, MissionRecord, PausePolicy, SharedWorld,
    World, WorldSpatial,
};
use fleet_core::{CombatRating, Faction, OwnerId, Position, ShipClass, ShipId};

pub const TRADER: OwnerId = OwnerId(1);
pub const RIVAL: OwnerId = OwnerId(2);
pub const PIRATE: OwnerId = OwnerId(3);
pub const FRIEND: OwnerId = OwnerId(4);

pub const RANGE: u32 = 10;
pub const RATING: CombatRating = CombatRating {
    hull: 10,
    firepower: 2,
};

pub type Manager = CombatManager<WorldSpatial, MissionBoard, DecisionLog>;

/// Trader and rival are at war, the pirates are hostile to everyone and the
/// friend is at peace with the trader.
pub struct Fixture {
    pub world: SharedWorld,
}

impl Fixture {
    pub fn new() -> Self {
        let mut world = World::new();
        world.add_owner(TRADER, "Trader", Faction::Standard);
        world.add_owner(RIVAL, "Rival", Faction::Standard);
        world.add_owner(PIRATE, "Pirates", Faction::Raider);
        world.add_owner(FRIEND, "Friend", Faction::Standard);
        world
            .declare_hostile(TRADER, RIVAL)
            .expect("both owners exist");
        Self {
            world: world.into_shared(),
        }
    }

    pub fn ship(&self, owner: OwnerId, class: ShipClass, x: i32, y: i32) -> ShipId {
        self.world
            .write()
            .ships
            .spawn(owner, class, Position::new(x, y), RATING)
            .expect("ids available")
    }

    pub fn mission(
        &self,
        owner: OwnerId,
        ships: &[ShipId],
        combat_phase: bool,
        policy: PausePolicy,
    ) -> MissionId {
        self.world
            .write()
            .create_mission(owner, ships.to_vec(), combat_phase, policy)
    }

    pub fn record(&self, mission: MissionId) -> MissionRecord {
        self.world
            .read()
            .mission(mission)
            .cloned()
            .expect("mission exists")
    }

    /// Manager for `owner` with every ship it currently owns registered idle.
    pub fn manager(&self, owner: OwnerId, faction: Faction) -> Manager {
        let mut manager = CombatManager::new(
            owner,
            faction,
            self.world.spatial(owner, RANGE),
            self.world.mission_board(owner),
            DecisionLog::for_owner(owner),
        );
        let owned: Vec<ShipId> = self
            .world
            .read()
            .ships
            .owned_by(owner)
            .map(|ship| ship.id)
            .collect();
        for ship in owned {
            manager.add_new_unit(ship);
        }
        manager
    }
}
