use fleet_core::{OwnerId, PowerBalance, ShipId};

use super::SharedWorld;
use crate::api::{Mission, MissionId, MissionService, PauseRequest, SpatialService};

/// Lifecycle of a mission as tracked by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MissionStatus {
    Running,
    /// Paused so the arbitrator can fight on the mission's behalf.
    Paused,
    Aborted,
}

/// How a mission answers pause requests.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PausePolicy {
    #[default]
    Always,
    Never,
    /// Grant only when the fleet outguns the enemies in the request.
    WhenStronger,
}

/// A mission and its fleet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MissionRecord {
    pub id: MissionId,
    pub owner: OwnerId,
    pub ships: Vec<ShipId>,
    pub combat_phase: bool,
    pub status: MissionStatus,
    pub pause_policy: PausePolicy,
}

impl MissionRecord {
    pub fn is_live(&self) -> bool {
        self.status != MissionStatus::Aborted
    }

    fn summary(&self) -> Mission {
        Mission {
            id: self.id,
            combat_phase: self.combat_phase,
        }
    }
}

/// [`MissionService`] over the missions of one owner in a shared world.
#[derive(Clone, Debug)]
pub struct MissionBoard {
    world: SharedWorld,
    owner: OwnerId,
}

impl MissionBoard {
    pub fn new(world: SharedWorld, owner: OwnerId) -> Self {
        Self { world, owner }
    }

    pub fn owner(&self) -> OwnerId {
        self.owner
    }

    fn update(&self, mission: MissionId, apply: impl FnOnce(&mut MissionRecord)) {
        let mut world = self.world.write();
        match world.mission_mut(mission) {
            Some(record) if record.owner == self.owner => apply(record),
            _ => tracing::warn!("{} is not a mission of {}", mission, self.owner),
        }
    }

    fn grants(&self, record: &MissionRecord, request: &PauseRequest<'_>) -> bool {
        match record.pause_policy {
            PausePolicy::Always => true,
            PausePolicy::Never => false,
            PausePolicy::WhenStronger => {
                let spatial = self.world.spatial(self.owner, 0);
                let balance = PowerBalance::estimate(
                    record.ships.iter().map(|ship| spatial.rating(*ship)),
                    request.enemies.iter().map(|ship| spatial.rating(*ship)),
                );
                balance.favors_ally()
            }
        }
    }
}

impl MissionService for MissionBoard {
    fn missions(&self, condition: &dyn Fn(&Mission) -> bool) -> Vec<Mission> {
        self.world
            .read()
            .missions()
            .filter(|record| record.owner == self.owner && record.is_live())
            .map(MissionRecord::summary)
            .filter(|mission| condition(mission))
            .collect()
    }

    fn fleet_ships(&self, mission: MissionId) -> Vec<ShipId> {
        self.world
            .read()
            .mission(mission)
            .filter(|record| record.owner == self.owner)
            .map(|record| record.ships.clone())
            .unwrap_or_default()
    }

    fn abort(&mut self, mission: MissionId) {
        tracing::info!("Aborting {} of {}", mission, self.owner);
        self.update(mission, |record| record.status = MissionStatus::Aborted);
    }

    fn continue_mission(&mut self, mission: MissionId) {
        self.update(mission, |record| {
            record.status = MissionStatus::Running;
            record.combat_phase = false;
        });
    }

    fn request_pause(&mut self, mission: MissionId, request: &PauseRequest<'_>) -> bool {
        let Some(record) = self.world.read().mission(mission).cloned() else {
            return false;
        };
        if record.owner != self.owner || !record.is_live() {
            return false;
        }
        let granted = self.grants(&record, request);
        tracing::debug!(
            "{} pause for {:?} ({} enemies): {}",
            mission,
            request.category,
            request.enemies.len(),
            if granted { "granted" } else { "denied" }
        );
        if granted {
            self.update(mission, |record| {
                record.status = MissionStatus::Paused;
                record.combat_phase = true;
            });
        }
        granted
    }
}

#[cfg(test)]
mod tests {
    use fleet_core::{CombatRating, Faction, Position, Ship, ShipClass, ThreatCategory};

    use super::*;
    use crate::world::World;

    const TRADER: OwnerId = OwnerId(1);
    const PIRATE: OwnerId = OwnerId(2);

    fn world() -> SharedWorld {
        let mut world = World::new();
        world.add_owner(TRADER, "Trader", Faction::Standard);
        world.add_owner(PIRATE, "Pirates", Faction::Raider);
        let ships = [
            (1, TRADER, ShipClass::Warship, CombatRating::new(10, 4)),
            (2, PIRATE, ShipClass::Raider, CombatRating::new(5, 2)),
            (3, PIRATE, ShipClass::Raider, CombatRating::new(50, 20)),
        ];
        for (id, owner, class, rating) in ships {
            world
                .add_ship(Ship::new(ShipId(id), owner, class, Position::ORIGIN).with_rating(rating))
                .unwrap();
        }
        world.into_shared()
    }

    #[test]
    fn granted_pause_enters_combat_phase() {
        let shared = world();
        let mission = shared
            .write()
            .create_mission(TRADER, vec![ShipId(1)], false, PausePolicy::Always);
        let mut board = shared.mission_board(TRADER);
        let enemies = [ShipId(2)];
        let request = PauseRequest {
            category: ThreatCategory::Raider,
            enemies: &enemies,
        };

        assert!(board.request_pause(mission, &request));
        let record = shared.read().mission(mission).cloned().unwrap();
        assert_eq!(record.status, MissionStatus::Paused);
        assert!(record.combat_phase);

        board.continue_mission(mission);
        let record = shared.read().mission(mission).cloned().unwrap();
        assert_eq!(record.status, MissionStatus::Running);
        assert!(!record.combat_phase);
    }

    #[test]
    fn when_stronger_compares_fleet_power() {
        let shared = world();
        let mission = shared
            .write()
            .create_mission(TRADER, vec![ShipId(1)], false, PausePolicy::WhenStronger);
        let mut board = shared.mission_board(TRADER);

        let strong = [ShipId(3)];
        let weak = [ShipId(2)];

        let request = PauseRequest {
            category: ThreatCategory::Raider,
            enemies: &strong,
        };
        assert!(!board.request_pause(mission, &request));

        let request = PauseRequest {
            category: ThreatCategory::Raider,
            enemies: &weak,
        };
        assert!(board.request_pause(mission, &request));
    }

    #[test]
    fn aborted_missions_disappear_from_queries() {
        let shared = world();
        let mission = shared
            .write()
            .create_mission(TRADER, vec![ShipId(1)], true, PausePolicy::Never);
        let mut board = shared.mission_board(TRADER);

        assert_eq!(board.missions(&|_: &Mission| true).len(), 1);
        board.abort(mission);
        assert!(board.missions(&|_: &Mission| true).is_empty());
    }

    #[test]
    fn foreign_missions_are_invisible() {
        let shared = world();
        let mission = shared
            .write()
            .create_mission(PIRATE, vec![ShipId(2)], true, PausePolicy::Always);
        let board = shared.mission_board(TRADER);

        assert!(board.missions(&|_: &Mission| true).is_empty());
        assert!(board.fleet_ships(mission).is_empty());
    }
}
