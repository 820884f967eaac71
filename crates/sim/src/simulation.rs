//! Scenario setup and the toy behavior executor.
//!
//! The executor stands in for the behavior layer: offensive groups close in
//! on their first enemy and shoot once adjacent, and every decision is
//! written back to the owner's combat state table.

use anyhow::{Context, Result};
use combat_runtime::{
    CombatManager, CombatStateRepository, DecisionLog, MissionBoard, PausePolicy, RuntimeConfig,
    SharedWorld, SpatialService, TickSummary, World, WorldSpatial,
};
use fleet_content::{PauseSpec, Scenario};
use fleet_core::{ActionKind, EngagementDecision, OwnerId, RestoreReport, Ship, ShipCombatState, ShipId};

pub type Manager = CombatManager<WorldSpatial, MissionBoard, DecisionLog>;

/// What one owner's manager did during a tick.
#[derive(Debug)]
pub struct TickReport {
    pub owner: OwnerId,
    pub summary: TickSummary,
    pub decisions: Vec<EngagementDecision>,
    pub sunk: Vec<ShipId>,
}

pub struct Simulation {
    world: SharedWorld,
    managers: Vec<Manager>,
}

impl Simulation {
    pub fn from_scenario(scenario: &Scenario, config: &RuntimeConfig) -> Result<Self> {
        let mut world = World::new();
        for owner in &scenario.owners {
            world.add_owner(owner.id, owner.name.clone(), owner.faction);
        }
        for (a, b) in &scenario.hostilities {
            world.declare_hostile(*a, *b)?;
        }
        for spec in &scenario.ships {
            let ship = Ship::new(spec.id, spec.owner, spec.class, spec.position).with_rating(spec.rating);
            world.add_ship(ship)?;
        }
        for mission in &scenario.missions {
            world.create_mission(
                mission.owner,
                mission.ships.clone(),
                mission.combat_phase,
                pause_policy(mission.pause),
            );
        }
        let world = world.into_shared();

        let mut managers = Vec::new();
        for owner in scenario.ai_owners() {
            let mut manager = CombatManager::new(
                owner.id,
                owner.faction,
                world.spatial(owner.id, config.combat.combat_range),
                world.mission_board(owner.id),
                DecisionLog::for_owner(owner.id),
            );
            for spec in scenario.ships.iter().filter(|spec| spec.owner == owner.id) {
                manager.add_new_unit(spec.id);
                if let Some(state) = spec.state {
                    manager
                        .set_ship_state(spec.id, state)
                        .with_context(|| format!("Invalid initial state for {}", spec.id))?;
                }
            }
            managers.push(manager);
        }

        tracing::info!(
            "Scenario '{}': {} ships, {} AI owners, combat range {}",
            scenario.name,
            scenario.ships.len(),
            managers.len(),
            config.combat.combat_range
        );
        Ok(Self { world, managers })
    }

    pub fn world(&self) -> &SharedWorld {
        &self.world
    }

    pub fn managers(&self) -> &[Manager] {
        &self.managers
    }

    /// Ticks every manager, then executes the decisions they emitted.
    pub fn tick(&mut self) -> Vec<TickReport> {
        let mut reports = Vec::with_capacity(self.managers.len());
        for manager in &mut self.managers {
            let summary = manager.tick();
            reports.push(TickReport {
                owner: manager.owner(),
                summary,
                decisions: manager.behavior_mut().drain(),
                sunk: Vec::new(),
            });
        }

        for (manager, report) in self.managers.iter_mut().zip(&mut reports) {
            for decision in &report.decisions {
                let sunk = execute(&self.world, decision);
                let state = match (decision.kind, sunk) {
                    (ActionKind::Offensive, None) => ShipCombatState::Attacking,
                    (ActionKind::Offensive, Some(_)) | (ActionKind::Idle, _) => ShipCombatState::Idle,
                };
                for ship in decision.group.iter() {
                    // Sunk earlier this tick by another owner.
                    if !manager.spatial().is_live(ship) {
                        continue;
                    }
                    if let Err(err) = manager.set_ship_state(ship, state) {
                        tracing::warn!("{}: {}", report.owner, err);
                    }
                }
                report.sunk.extend(sunk);
            }
        }
        reports
    }

    pub fn save(&self, repo: &dyn CombatStateRepository) -> Result<usize> {
        let mut rows = 0;
        for manager in &self.managers {
            rows += manager
                .save(repo)
                .with_context(|| format!("Failed to save combat table of {}", manager.owner()))?;
        }
        Ok(rows)
    }

    /// Restores every manager's table from `repo`.
    pub fn load(&mut self, repo: &dyn CombatStateRepository) -> Result<Vec<RestoreReport>> {
        let mut reports = Vec::with_capacity(self.managers.len());
        for manager in &mut self.managers {
            let world = self.world.read();
            let report = manager
                .load(repo, &world.ships)
                .with_context(|| format!("Failed to load combat table of {}", manager.owner()))?;
            reports.push(report);
        }
        Ok(reports)
    }
}

fn pause_policy(spec: PauseSpec) -> PausePolicy {
    match spec {
        PauseSpec::Always => PausePolicy::Always,
        PauseSpec::Never => PausePolicy::Never,
        PauseSpec::WhenStronger => PausePolicy::WhenStronger,
    }
}

/// Moves an offensive group towards its first enemy and fires when adjacent.
/// Returns the enemy if it sank.
fn execute(world: &SharedWorld, decision: &EngagementDecision) -> Option<ShipId> {
    let target = *decision.enemies().first()?;
    let mut world = world.write();
    // Another group may already have sunk it this tick.
    let target_position = world.ships.get(target)?.position;

    let mut damage: u32 = 0;
    for member in decision.group.iter() {
        let Some(ship) = world.ships.get_mut(member) else {
            continue;
        };
        if ship.position.distance(target_position) <= 1 {
            damage = damage.saturating_add(ship.rating.firepower);
        } else {
            ship.position = ship.position.step_towards(target_position);
        }
    }
    if damage == 0 {
        return None;
    }

    let hull = {
        let ship = world.ships.get_mut(target)?;
        ship.rating.hull = ship.rating.hull.saturating_sub(damage);
        ship.rating.hull
    };
    tracing::debug!("{} hit for {} ({} hull left)", target, damage, hull);
    if hull > 0 {
        return None;
    }

    world.destroy(target);
    tracing::info!("{} sunk by group of {}", target, decision.group.lead());
    Some(target)
}

#[cfg(test)]
mod tests {
    use fleet_content::{MissionSpec, OwnerSpec, ShipSpec};
    use fleet_core::{CombatConfig, CombatRating, Faction, Position, ShipClass};

    use super::*;

    const TRADER: OwnerId = OwnerId(1);
    const RIVAL: OwnerId = OwnerId(2);

    fn scenario() -> Scenario {
        Scenario {
            name: "duel".into(),
            owners: vec![
                OwnerSpec {
                    id: TRADER,
                    name: "Trader".into(),
                    faction: Faction::Standard,
                    ai: true,
                },
                OwnerSpec {
                    id: RIVAL,
                    name: "Rival".into(),
                    faction: Faction::Standard,
                    ai: false,
                },
            ],
            hostilities: vec![(TRADER, RIVAL)],
            ships: vec![
                ShipSpec {
                    id: ShipId(1),
                    owner: TRADER,
                    class: ShipClass::Warship,
                    position: Position::ORIGIN,
                    rating: CombatRating::new(10, 5),
                    state: None,
                },
                ShipSpec {
                    id: ShipId(2),
                    owner: RIVAL,
                    class: ShipClass::Merchant,
                    position: Position::new(3, 0),
                    rating: CombatRating::new(4, 0),
                    state: None,
                },
            ],
            missions: vec![MissionSpec {
                owner: TRADER,
                ships: vec![ShipId(1)],
                combat_phase: true,
                pause: PauseSpec::Always,
            }],
            ..Scenario::default()
        }
    }

    fn simulation() -> Simulation {
        let config = RuntimeConfig::new(CombatConfig::with_combat_range(8));
        Simulation::from_scenario(&scenario(), &config).unwrap()
    }

    #[test]
    fn offensive_group_closes_in_and_sinks_target() {
        let mut sim = simulation();

        let first = sim.tick();
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].decisions.len(), 1);
        assert_eq!(
            sim.managers()[0].ship_state(ShipId(1)).ok(),
            Some(ShipCombatState::Attacking)
        );
        assert_eq!(
            sim.world().read().ships.get(ShipId(1)).map(|ship| ship.position),
            Some(Position::new(1, 0))
        );

        sim.tick();
        let third = sim.tick();
        assert_eq!(third[0].sunk, vec![ShipId(2)]);
        assert!(!sim.world().read().ships.contains(ShipId(2)));
        assert_eq!(
            sim.managers()[0].ship_state(ShipId(1)).ok(),
            Some(ShipCombatState::Idle)
        );

        let fourth = sim.tick();
        assert!(fourth[0].decisions.is_empty());
        assert_eq!(fourth[0].summary.continued, 1);
    }

    #[test]
    fn initial_states_must_suit_the_faction() {
        let mut scenario = scenario();
        scenario.ships[0].state = Some(ShipCombatState::ChasingTarget);

        let result = Simulation::from_scenario(&scenario, &RuntimeConfig::default());
        assert!(result.is_err());
    }

    #[test]
    fn tables_survive_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let repo = combat_runtime::FileCombatRepository::new(dir.path()).unwrap();

        let mut sim = simulation();
        sim.tick();
        assert_eq!(sim.save(&repo).unwrap(), 1);

        let mut fresh = simulation();
        let reports = fresh.load(&repo).unwrap();
        assert_eq!(reports[0].restored, 1);
        assert_eq!(
            fresh.managers()[0].ship_state(ShipId(1)).ok(),
            Some(ShipCombatState::Attacking)
        );
    }

    #[test]
    fn bundled_scenario_runs() {
        let dir = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("data");
        let scenario = fleet_content::ScenarioLoader::load(&dir.join("strait.ron")).unwrap();
        let combat = fleet_content::ConfigLoader::load(&dir.join("combat.toml")).unwrap();

        let mut sim = Simulation::from_scenario(&scenario, &RuntimeConfig::new(combat)).unwrap();
        assert_eq!(sim.managers().len(), 3);

        let first = sim.tick();
        let decisions: usize = first.iter().map(|report| report.decisions.len()).sum();
        assert!(decisions > 0);
        for _ in 0..30 {
            sim.tick();
        }
    }
}
