//! Scenario loader.

use std::path::Path;

use crate::loaders::{LoadResult, read_file};
use crate::scenario::Scenario;

/// Loader for scenarios from RON files.
pub struct ScenarioLoader;

impl ScenarioLoader {
    /// Load and validate a scenario from a RON file.
    pub fn load(path: &Path) -> LoadResult<Scenario> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Invalid scenario {}: {}", path.display(), e))
    }

    pub fn parse(content: &str) -> LoadResult<Scenario> {
        let scenario: Scenario = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse scenario RON: {}", e))?;
        scenario.validate().map_err(anyhow::Error::msg)?;
        Ok(scenario)
    }
}

#[cfg(test)]
mod tests {
    use fleet_core::{Faction, OwnerId, ShipClass, ShipCombatState, ShipId};

    use super::*;
    use crate::scenario::PauseSpec;

    const SCENARIO: &str = r#"
#![enable(unwrap_newtypes)]
#![enable(implicit_some)]
(
    name: "Strait",
    combat: (combat_range: 8),
    owners: [
        (id: 1, name: "Trader"),
        (id: 2, name: "Pirates", faction: Raider, ai: false),
    ],
    ships: [
        (id: 1, owner: 1, class: Warship, position: (x: 0, y: 0), rating: (hull: 10, firepower: 2)),
        (id: 2, owner: 2, class: Raider, position: (x: 4, y: 1), state: ChasingTarget),
    ],
    missions: [
        (owner: 1, ships: [1], pause: WhenStronger),
    ],
)
"#;

    #[test]
    fn parses_scenario() {
        let scenario = ScenarioLoader::parse(SCENARIO).unwrap();

        assert_eq!(scenario.name, "Strait");
        assert_eq!(scenario.combat.as_ref().map(|c| c.combat_range), Some(8));
        assert_eq!(scenario.owners[0].faction, Faction::Standard);
        assert!(scenario.owners[0].ai);
        assert_eq!(scenario.ai_owners().count(), 1);
        assert_eq!(scenario.ships[1].class, ShipClass::Raider);
        assert_eq!(scenario.ships[1].state, Some(ShipCombatState::ChasingTarget));
        assert_eq!(scenario.missions[0].ships, vec![ShipId(1)]);
        assert_eq!(scenario.missions[0].owner, OwnerId(1));
        assert_eq!(scenario.missions[0].pause, PauseSpec::WhenStronger);
        assert!(!scenario.missions[0].combat_phase);
    }

    #[test]
    fn rejects_dangling_references() {
        let broken = SCENARIO.replace("owner: 2, class", "owner: 5, class");
        let err = ScenarioLoader::parse(&broken).unwrap_err();
        assert!(err.to_string().contains("owner#5"));
    }

    #[test]
    fn load_names_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.ron");
        std::fs::write(&path, SCENARIO.replace("ships: [1]", "ships: [7]")).unwrap();

        let err = ScenarioLoader::load(&path).unwrap_err();
        assert!(err.to_string().contains("broken.ron"));
    }
}
