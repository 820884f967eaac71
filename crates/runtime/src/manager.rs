//! Per-owner combat manager: the tick driver's entry point.

use fleet_core::{
    CombatRow, CombatStateTable, Faction, FactionPolicy, OwnerId, RestoreReport, ShipCombatState,
    ShipId, ShipResolver, StateError,
};

use crate::api::{BehaviorService, CombatServices, MissionService, Result, SpatialService};
use crate::arbiter::{CombatArbitrator, TickSummary};
use crate::repository::CombatStateRepository;

/// Owns one owner's combat state table, arbitrator and collaborators.
///
/// Table mutation happens only between ticks: [`CombatManager::tick`] evicts
/// dead ships first and then hands the arbitrator a shared borrow.
#[derive(Debug)]
pub struct CombatManager<S, M, B> {
    table: CombatStateTable,
    arbitrator: CombatArbitrator,
    spatial: S,
    missions: M,
    behavior: B,
}

impl<S, M, B> CombatManager<S, M, B>
where
    S: SpatialService,
    M: MissionService,
    B: BehaviorService,
{
    pub fn new(owner: OwnerId, faction: Faction, spatial: S, missions: M, behavior: B) -> Self {
        Self {
            table: CombatStateTable::new(owner, faction),
            arbitrator: CombatArbitrator::for_faction(owner, faction),
            spatial,
            missions,
            behavior,
        }
    }

    /// Replaces the faction's default policy.
    pub fn with_policy(mut self, policy: FactionPolicy) -> Self {
        self.arbitrator = CombatArbitrator::new(self.table.owner(), policy);
        self
    }

    /// Starts from an existing table; the faction policy follows the table.
    pub fn with_table(mut self, table: CombatStateTable) -> Self {
        self.arbitrator = CombatArbitrator::for_faction(table.owner(), table.faction());
        self.table = table;
        self
    }

    pub fn owner(&self) -> OwnerId {
        self.table.owner()
    }

    pub fn table(&self) -> &CombatStateTable {
        &self.table
    }

    pub fn arbitrator(&self) -> &CombatArbitrator {
        &self.arbitrator
    }

    pub fn spatial(&self) -> &S {
        &self.spatial
    }

    pub fn missions(&self) -> &M {
        &self.missions
    }

    pub fn behavior(&self) -> &B {
        &self.behavior
    }

    pub fn behavior_mut(&mut self) -> &mut B {
        &mut self.behavior
    }

    /// Registers a newly acquired ship as idle. Returns `false` if it was
    /// already tracked.
    pub fn add_new_unit(&mut self, ship: ShipId) -> bool {
        self.table.register(ship)
    }

    /// Forgets a ship. Unknown ships are ignored.
    pub fn remove_unit(&mut self, ship: ShipId) -> Option<ShipCombatState> {
        self.table.unregister(ship)
    }

    /// State of a live ship. A destroyed ship is not found even before the
    /// next tick evicts it.
    pub fn ship_state(&self, ship: ShipId) -> Result<ShipCombatState> {
        self.ensure_live(ship)?;
        Ok(self.table.get_state(ship)?)
    }

    /// Overwrites a live ship's state and returns the previous one.
    pub fn set_ship_state(&mut self, ship: ShipId, state: ShipCombatState) -> Result<ShipCombatState> {
        self.ensure_live(ship)?;
        Ok(self.table.set_state(ship, state)?)
    }

    fn ensure_live(&self, ship: ShipId) -> Result<()> {
        if self.spatial.is_live(ship) {
            Ok(())
        } else {
            Err(StateError::NotFound(ship).into())
        }
    }

    /// Runs one arbitration tick.
    pub fn tick(&mut self) -> TickSummary {
        let spatial = &self.spatial;
        let evicted = self.table.evict(|ship| spatial.is_live(ship));
        if evicted > 0 {
            tracing::debug!("{} evicted {} destroyed ships", self.table.owner(), evicted);
        }

        let mut services = CombatServices::new(&self.spatial, &mut self.missions, &mut self.behavior);
        self.arbitrator.tick(&self.table, &mut services)
    }

    /// Writes the rows of live ships to `repo`. Returns the number of rows.
    pub fn save(&self, repo: &dyn CombatStateRepository) -> Result<usize> {
        let rows: Vec<CombatRow> = self
            .table
            .rows()
            .into_iter()
            .filter(|row| self.spatial.is_live(ShipId(row.ship_id)))
            .collect();
        repo.save(self.table.owner(), &rows)?;
        tracing::info!("Saved {} combat states of {}", rows.len(), self.table.owner());
        Ok(rows.len())
    }

    /// Restores the rows stored in `repo` over the current table.
    ///
    /// Saved states overwrite the matching entries; registered ships missing
    /// from the save keep their current state. Rows naming ships that
    /// `resolver` no longer knows are dropped. Without a stored table the
    /// current one is left untouched.
    pub fn load<R>(&mut self, repo: &dyn CombatStateRepository, resolver: &R) -> Result<RestoreReport>
    where
        R: ShipResolver + ?Sized,
    {
        let owner = self.table.owner();
        let Some(rows) = repo.load(owner)? else {
            tracing::info!("No saved combat states for {}", owner);
            return Ok(RestoreReport::default());
        };

        let report = self.table.restore(rows, resolver);
        if report.dropped() > 0 {
            tracing::warn!(
                "{} dropped {} saved combat states ({} stale, {} invalid, {} foreign)",
                owner,
                report.dropped(),
                report.stale,
                report.invalid,
                report.foreign
            );
        }
        tracing::info!("Restored {} combat states of {}", report.restored, owner);
        Ok(report)
    }
}
