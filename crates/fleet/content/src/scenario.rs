//! Scenario definitions.

use std::collections::BTreeSet;

use fleet_core::{
    CombatConfig, CombatRating, Faction, OwnerId, Position, ShipClass, ShipCombatState, ShipId,
};

/// A fleet owner taking part in a scenario.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct OwnerSpec {
    pub id: OwnerId,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub faction: Faction,
    /// Whether a combat manager drives this owner.
    #[cfg_attr(feature = "serde", serde(default = "default_ai"))]
    pub ai: bool,
}

#[cfg(feature = "serde")]
fn default_ai() -> bool {
    true
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct ShipSpec {
    pub id: ShipId,
    pub owner: OwnerId,
    pub class: ShipClass,
    pub position: Position,
    #[cfg_attr(feature = "serde", serde(default))]
    pub rating: CombatRating,
    /// Initial combat state; idle when omitted.
    #[cfg_attr(feature = "serde", serde(default))]
    pub state: Option<ShipCombatState>,
}

/// How a mission answers pause requests.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum PauseSpec {
    #[default]
    Always,
    Never,
    WhenStronger,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct MissionSpec {
    pub owner: OwnerId,
    pub ships: Vec<ShipId>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub combat_phase: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub pause: PauseSpec,
}

/// Everything needed to set up a simulation run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct Scenario {
    pub name: String,
    /// Used when the run is not given a configuration file.
    #[cfg_attr(feature = "serde", serde(default))]
    pub combat: Option<CombatConfig>,
    pub owners: Vec<OwnerSpec>,
    /// Owner pairs at war. Raider owners need no entry.
    #[cfg_attr(feature = "serde", serde(default))]
    pub hostilities: Vec<(OwnerId, OwnerId)>,
    pub ships: Vec<ShipSpec>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub missions: Vec<MissionSpec>,
}

impl Scenario {
    /// Owners driven by a combat manager.
    pub fn ai_owners(&self) -> impl Iterator<Item = &OwnerSpec> {
        self.owners.iter().filter(|owner| owner.ai)
    }

    /// Checks cross references. Returns a description of the first problem.
    pub fn validate(&self) -> Result<(), String> {
        let mut owners = BTreeSet::new();
        for owner in &self.owners {
            if !owners.insert(owner.id) {
                return Err(format!("{} is declared twice", owner.id));
            }
        }

        for (a, b) in &self.hostilities {
            for owner in [a, b] {
                if !owners.contains(owner) {
                    return Err(format!("hostility names unknown {}", owner));
                }
            }
        }

        let mut ships = BTreeSet::new();
        for ship in &self.ships {
            if !owners.contains(&ship.owner) {
                return Err(format!("{} belongs to unknown {}", ship.id, ship.owner));
            }
            if !ships.insert(ship.id) {
                return Err(format!("{} is declared twice", ship.id));
            }
        }

        let mut assigned = BTreeSet::new();
        for (index, mission) in self.missions.iter().enumerate() {
            if !owners.contains(&mission.owner) {
                return Err(format!("mission {} belongs to unknown {}", index, mission.owner));
            }
            for ship in &mission.ships {
                let Some(spec) = self.ships.iter().find(|spec| spec.id == *ship) else {
                    return Err(format!("mission {} names unknown {}", index, ship));
                };
                if spec.owner != mission.owner {
                    return Err(format!("mission {} borrows {} of {}", index, ship, spec.owner));
                }
                if !assigned.insert(*ship) {
                    return Err(format!("{} is assigned to more than one mission", ship));
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario() -> Scenario {
        Scenario {
            name: "test".into(),
            owners: vec![OwnerSpec {
                id: OwnerId(1),
                name: "Trader".into(),
                faction: Faction::Standard,
                ai: true,
            }],
            ships: vec![ShipSpec {
                id: ShipId(1),
                owner: OwnerId(1),
                class: ShipClass::Warship,
                position: Position::ORIGIN,
                rating: CombatRating::new(10, 2),
                state: None,
            }],
            ..Scenario::default()
        }
    }

    #[test]
    fn valid_scenario_passes() {
        let mut scenario = scenario();
        scenario.missions.push(MissionSpec {
            owner: OwnerId(1),
            ships: vec![ShipId(1)],
            combat_phase: false,
            pause: PauseSpec::Never,
        });
        assert_eq!(scenario.validate(), Ok(()));
    }

    #[test]
    fn unknown_references_are_rejected() {
        let mut scenario = scenario();
        scenario.hostilities.push((OwnerId(1), OwnerId(7)));
        assert!(scenario.validate().is_err());

        let mut scenario = self::scenario();
        scenario.missions.push(MissionSpec {
            owner: OwnerId(1),
            ships: vec![ShipId(9)],
            combat_phase: true,
            pause: PauseSpec::Always,
        });
        assert!(scenario.validate().is_err());
    }

    #[test]
    fn ships_serve_one_mission() {
        let mut scenario = scenario();
        for _ in 0..2 {
            scenario.missions.push(MissionSpec {
                owner: OwnerId(1),
                ships: vec![ShipId(1)],
                combat_phase: false,
                pause: PauseSpec::Always,
            });
        }
        assert!(scenario.validate().is_err());
    }
}
