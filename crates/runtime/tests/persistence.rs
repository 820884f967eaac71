mod common;

use std::fs;

use combat_runtime::{
    CombatStateRepository, FileCombatRepository, InMemoryCombatRepo, RepositoryError,
    RuntimeError,
};
use common::{Fixture, PIRATE, TRADER};
use fleet_core::{CombatRow, Faction, ShipClass, ShipCombatState, ShipGroup, ShipId};

#[test]
fn test_in_memory_round_trip_restores_states() {
    let fx = Fixture::new();
    let warship = fx.ship(TRADER, ShipClass::Warship, 0, 0);
    let scout = fx.ship(TRADER, ShipClass::Warship, 1, 0);
    let repo = InMemoryCombatRepo::new();

    let mut manager = fx.manager(TRADER, Faction::Standard);
    manager
        .set_ship_state(scout, ShipCombatState::Fleeing)
        .expect("registered");
    assert_eq!(manager.save(&repo).expect("save succeeds"), 2);

    let mut restored = fx.manager(TRADER, Faction::Standard);
    restored.remove_unit(warship);
    let report = restored
        .load(&repo, &fx.world.read().ships)
        .expect("load succeeds");

    assert_eq!(report.restored, 2);
    assert_eq!(report.dropped(), 0);
    assert_eq!(restored.ship_state(warship).ok(), Some(ShipCombatState::Idle));
    assert_eq!(restored.ship_state(scout).ok(), Some(ShipCombatState::Fleeing));
}

#[test]
fn test_file_round_trip_drops_destroyed_ships() {
    let dir = tempfile::tempdir().expect("temp dir");
    let repo = FileCombatRepository::new(dir.path()).expect("repository opens");
    let fx = Fixture::new();
    let raider = fx.ship(PIRATE, ShipClass::Raider, 0, 0);
    let sunk = fx.ship(PIRATE, ShipClass::Raider, 3, 3);

    let mut manager = fx.manager(PIRATE, Faction::Raider);
    manager
        .set_ship_state(raider, ShipCombatState::ReturningHome)
        .expect("raider state");
    manager.save(&repo).expect("save succeeds");

    assert!(dir.path().join("combat_3.bin").exists());
    assert!(!dir.path().join("combat_3.bin.tmp").exists());
    assert_eq!(repo.list_owners().expect("listing"), vec![PIRATE]);

    fx.world.write().destroy(sunk);
    let mut restored = fx.manager(PIRATE, Faction::Raider);
    let report = restored
        .load(&repo, &fx.world.read().ships)
        .expect("load succeeds");

    assert_eq!(report.restored, 1);
    assert_eq!(report.stale, 1);
    assert_eq!(
        restored.ship_state(raider).ok(),
        Some(ShipCombatState::ReturningHome)
    );
    assert!(!restored.table().contains(sunk));
}

#[test]
fn test_rows_invalid_for_faction_are_dropped() {
    let fx = Fixture::new();
    let warship = fx.ship(TRADER, ShipClass::Warship, 0, 0);
    let repo = InMemoryCombatRepo::new();
    let rows = [
        CombatRow {
            owner_id: TRADER.0,
            ship_id: warship.0,
            state_ordinal: ShipCombatState::ChasingTarget.ordinal(),
        },
        CombatRow {
            owner_id: TRADER.0,
            ship_id: warship.0,
            state_ordinal: 42,
        },
        CombatRow {
            owner_id: PIRATE.0,
            ship_id: warship.0,
            state_ordinal: 0,
        },
    ];
    repo.save(TRADER, &rows).expect("save succeeds");

    let mut manager = fx.manager(TRADER, Faction::Standard);
    let report = manager
        .load(&repo, &fx.world.read().ships)
        .expect("load succeeds");

    assert_eq!(report.invalid, 2);
    assert_eq!(report.foreign, 1);
    assert_eq!(report.restored, 0);
    assert_eq!(manager.table().len(), 1);
    assert_eq!(manager.ship_state(warship).ok(), Some(ShipCombatState::Idle));
}

#[test]
fn test_load_keeps_live_ships_missing_from_save() {
    let fx = Fixture::new();
    let flagship = fx.ship(TRADER, ShipClass::Warship, 0, 0);
    let escort = fx.ship(TRADER, ShipClass::Warship, 4, 4);
    let repo = InMemoryCombatRepo::new();

    let mut manager = fx.manager(TRADER, Faction::Standard);
    manager
        .set_ship_state(flagship, ShipCombatState::Moving)
        .expect("registered");
    manager.remove_unit(escort);
    assert_eq!(manager.save(&repo).expect("save succeeds"), 1);

    let mut resumed = fx.manager(TRADER, Faction::Standard);
    let report = resumed
        .load(&repo, &fx.world.read().ships)
        .expect("load succeeds");

    assert_eq!(report.restored, 1);
    assert_eq!(resumed.ship_state(flagship).ok(), Some(ShipCombatState::Moving));
    assert_eq!(resumed.ship_state(escort).ok(), Some(ShipCombatState::Idle));

    // Both are casual warships with nothing in sight; only the idle one is
    // sent an idle request.
    let summary = resumed.tick();
    assert_eq!(summary.decisions, 1);
    assert_eq!(resumed.behavior().decisions()[0].group.lead(), escort);
}

#[test]
fn test_save_skips_destroyed_ships() {
    let fx = Fixture::new();
    let warship = fx.ship(TRADER, ShipClass::Warship, 0, 0);
    let sunk = fx.ship(TRADER, ShipClass::Warship, 2, 2);
    let repo = InMemoryCombatRepo::new();

    let manager = fx.manager(TRADER, Faction::Standard);
    fx.world.write().destroy(sunk);

    assert_eq!(manager.save(&repo).expect("save succeeds"), 1);
    let rows = repo.load(TRADER).expect("load succeeds").expect("saved");
    assert_eq!(
        rows,
        vec![CombatRow {
            owner_id: TRADER.0,
            ship_id: warship.0,
            state_ordinal: ShipCombatState::Idle.ordinal(),
        }]
    );
}

#[test]
fn test_missing_save_keeps_current_table() {
    let fx = Fixture::new();
    let warship = fx.ship(TRADER, ShipClass::Warship, 0, 0);
    let repo = InMemoryCombatRepo::new();

    let mut manager = fx.manager(TRADER, Faction::Standard);
    manager
        .set_ship_state(warship, ShipCombatState::Moving)
        .expect("registered");
    let report = manager
        .load(&repo, &fx.world.read().ships)
        .expect("load succeeds");

    assert_eq!(report.restored, 0);
    assert_eq!(manager.ship_state(warship).ok(), Some(ShipCombatState::Moving));
}

#[test]
fn test_corrupted_file_is_reported() {
    let dir = tempfile::tempdir().expect("temp dir");
    let repo = FileCombatRepository::new(dir.path()).expect("repository opens");
    fs::write(dir.path().join("combat_1.bin"), [0xff, 0x01]).expect("write garbage");

    let fx = Fixture::new();
    let mut manager = fx.manager(TRADER, Faction::Standard);
    let err = manager
        .load(&repo, &fx.world.read().ships)
        .expect_err("garbage cannot decode");

    assert!(matches!(
        err,
        RuntimeError::Repository(RepositoryError::CorruptedData(_))
    ));
}

#[test]
fn test_delete_removes_saved_table() {
    let dir = tempfile::tempdir().expect("temp dir");
    let repo = FileCombatRepository::new(dir.path()).expect("repository opens");
    let fx = Fixture::new();
    fx.ship(TRADER, ShipClass::Warship, 0, 0);

    fx.manager(TRADER, Faction::Standard)
        .save(&repo)
        .expect("save succeeds");
    assert!(repo.exists(TRADER));

    repo.delete(TRADER).expect("delete succeeds");
    assert!(!repo.exists(TRADER));
    assert!(repo.list_owners().expect("listing").is_empty());
}

#[test]
fn test_decoding_an_empty_group_fails() {
    let empty = bincode::serialize(&Vec::<ShipId>::new()).expect("encode");
    assert!(bincode::deserialize::<ShipGroup>(&empty).is_err());

    let group = ShipGroup::new([ShipId(7), ShipId(2)]).expect("non-empty");
    let bytes = bincode::serialize(&group).expect("encode");
    let decoded: ShipGroup = bincode::deserialize(&bytes).expect("decode");
    assert_eq!(decoded.lead(), ShipId(7));
}
