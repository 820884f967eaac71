//! Combat arbitration.
//!
//! Once per tick the arbitrator runs three passes in a fixed order:
//!
//! 1. **Explicit combat**: missions in their combat phase engage whatever the
//!    classifier ranks first, or are told to continue when nothing is around.
//!    A mission without ships is aborted.
//! 2. **Uncertain combat**: other missions with hostiles nearby ask the
//!    strategy layer for permission to pause. Granted requests engage on the
//!    same tick using the classification computed for the request.
//! 3. **Casual combat**: the owner's unassigned ships are handled as one-ship
//!    groups. With nothing in sight they fall back to idle according to the
//!    faction policy.
//!
//! Every group yields at most one [`EngagementDecision`] per tick. Later passes
//! observe mission changes made by earlier ones because each pass queries the
//! mission service afresh.
mod summary;

pub use summary::{GroupOutcome, TickSummary};

use fleet_core::{
    CombatStateTable, EngagementDecision, Faction, FactionPolicy, IdleFallback, OwnerId,
    PowerBalance, ShipGroup, ShipId, ThreatCategories, classify,
};

use crate::api::{CombatServices, Mission, MissionId, PauseRequest, ShipFilter, SpatialService};

/// Decision core for one fleet owner.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CombatArbitrator {
    owner: OwnerId,
    policy: FactionPolicy,
}

impl CombatArbitrator {
    pub fn new(owner: OwnerId, policy: FactionPolicy) -> Self {
        Self { owner, policy }
    }

    pub fn for_faction(owner: OwnerId, faction: Faction) -> Self {
        Self::new(owner, FactionPolicy::for_faction(faction))
    }

    pub fn owner(&self) -> OwnerId {
        self.owner
    }

    pub fn policy(&self) -> &FactionPolicy {
        &self.policy
    }

    /// Runs the three passes. `table` is read only, for the idle gate.
    pub fn tick(&self, table: &CombatStateTable, services: &mut CombatServices<'_>) -> TickSummary {
        let _span = tracing::debug_span!(
            "combat_tick",
            owner = %self.owner,
            faction = %self.policy.faction
        )
        .entered();
        let mut summary = TickSummary::default();

        let explicit = services
            .missions
            .missions(&|mission: &Mission| mission.combat_phase);
        for mission in explicit {
            let outcome = self.handle_mission_combat(mission.id, services);
            summary.record(outcome);
        }

        let uncertain = services
            .missions
            .missions(&|mission: &Mission| !mission.combat_phase);
        for mission in uncertain {
            let outcome = self.handle_uncertain_combat(mission.id, services);
            if outcome.is_decided() {
                summary.pauses_granted += 1;
            }
            summary.record(outcome);
        }

        for outcome in self.handle_casual_combat(table, services) {
            summary.record(outcome);
        }

        tracing::debug!(
            "{} tick done: {} decisions, {} aborted, {} continued",
            self.owner,
            summary.decisions,
            summary.aborted,
            summary.continued
        );
        summary
    }

    /// Resolves combat for a mission that asked for it.
    pub fn handle_mission_combat(
        &self,
        mission: MissionId,
        services: &mut CombatServices<'_>,
    ) -> GroupOutcome {
        let Ok(group) = ShipGroup::new(services.missions.fleet_ships(mission)) else {
            tracing::debug!("{} {} has no ships left, aborting", self.owner, mission);
            services.missions.abort(mission);
            return GroupOutcome::Aborted;
        };

        let threats = self.survey(&group, services.spatial);
        match self.engagement(&group, &threats, services.spatial) {
            Some(decision) => self.emit(decision, services),
            None => {
                tracing::debug!("{} {}: no one around, continuing", self.owner, mission);
                services.missions.continue_mission(mission);
                GroupOutcome::Continued
            }
        }
    }

    /// Asks for permission to interrupt a mission that did not plan to fight.
    pub fn handle_uncertain_combat(
        &self,
        mission: MissionId,
        services: &mut CombatServices<'_>,
    ) -> GroupOutcome {
        let Ok(group) = ShipGroup::new(services.missions.fleet_ships(mission)) else {
            return GroupOutcome::Unchanged;
        };

        let threats = self.survey(&group, services.spatial);
        let Some((category, enemies)) = threats.first() else {
            return GroupOutcome::Unchanged;
        };

        let request = PauseRequest { category, enemies };
        if !services.missions.request_pause(mission, &request) {
            tracing::debug!(
                "{} {}: pause denied ({} {} ships nearby)",
                self.owner,
                mission,
                enemies.len(),
                category
            );
            return GroupOutcome::PauseDenied;
        }

        // Engage on the classification the permission was granted for.
        match self.engagement(&group, &threats, services.spatial) {
            Some(decision) => self.emit(decision, services),
            None => GroupOutcome::Unchanged,
        }
    }

    /// Handles the owner's ships that are not assigned to any mission.
    pub fn handle_casual_combat(
        &self,
        table: &CombatStateTable,
        services: &mut CombatServices<'_>,
    ) -> Vec<GroupOutcome> {
        let rules = [
            ShipFilter::NotInFleet,
            ShipFilter::for_class(self.policy.casual_class),
        ];
        let mut ships = services.spatial.owned_ships(&rules);
        ships.sort_unstable();
        ships.dedup();

        let mut outcomes = Vec::with_capacity(ships.len());
        for ship in ships {
            // TODO: cluster nearby casual ships into shared groups by distance.
            let group = ShipGroup::singleton(ship);
            let threats = self.survey(&group, services.spatial);
            let outcome = match self.engagement(&group, &threats, services.spatial) {
                Some(decision) => self.emit(decision, services),
                None if self.should_idle(&group, table) => {
                    self.emit(EngagementDecision::idle(group), services)
                }
                None => GroupOutcome::Unchanged,
            };
            outcomes.push(outcome);
        }
        outcomes
    }

    /// Queries hostile ships around `group` and classifies them.
    pub fn survey(&self, group: &ShipGroup, spatial: &dyn SpatialService) -> ThreatCategories {
        let around = spatial.ships_near(group);
        let mut hostiles = spatial.filter(&around, &[ShipFilter::Hostile]);
        hostiles.sort_unstable();
        classify(group, &hostiles, self.policy.categories, |ships, category| {
            spatial.filter(ships, &[ShipFilter::for_category(category)])
        })
    }

    /// Offensive decision against the highest-priority category, if any.
    pub fn engagement(
        &self,
        group: &ShipGroup,
        threats: &ThreatCategories,
        spatial: &dyn SpatialService,
    ) -> Option<EngagementDecision> {
        let (category, enemies) = threats.first()?;
        let balance = category
            .needs_balance()
            .then(|| Self::power_balance(group, enemies, spatial));
        Some(EngagementDecision::offensive(
            category,
            group.clone(),
            enemies.to_vec(),
            balance,
        ))
    }

    pub fn power_balance(
        group: &ShipGroup,
        enemies: &[ShipId],
        spatial: &dyn SpatialService,
    ) -> PowerBalance {
        PowerBalance::estimate(
            group.iter().map(|ship| spatial.rating(ship)),
            enemies.iter().map(|ship| spatial.rating(*ship)),
        )
    }

    fn should_idle(&self, group: &ShipGroup, table: &CombatStateTable) -> bool {
        match self.policy.idle_fallback {
            IdleFallback::Always => true,
            IdleFallback::WhenGroupIdle => group.iter().all(|ship| match table.get_state(ship) {
                Ok(state) => state.is_idle(),
                Err(err) => {
                    tracing::warn!("{}: {}, not requesting idle", self.owner, err);
                    false
                }
            }),
        }
    }

    fn emit(&self, decision: EngagementDecision, services: &mut CombatServices<'_>) -> GroupOutcome {
        match &decision.power_balance {
            Some(balance) => tracing::debug!(
                "{} {} led by {}: {} enemies -> power_balance: {}",
                self.owner,
                decision.trigger,
                decision.group.lead(),
                decision.enemies().len(),
                balance
            ),
            None => tracing::debug!(
                "{} {} led by {}: {} enemies",
                self.owner,
                decision.trigger,
                decision.group.lead(),
                decision.enemies().len()
            ),
        }
        let outcome = GroupOutcome::Decided(decision.kind, decision.trigger);
        services.behavior.request_action(decision);
        outcome
    }
}
