//! Collaborator contracts consumed by the combat arbitrator.
//!
//! The arbitrator never owns the world. It reaches it only through these
//! traits, bundled per tick in [`CombatServices`] the same way read-only
//! oracles are bundled for the engine.

use std::fmt;

use fleet_core::{
    CombatRating, EngagementDecision, ShipClass, ShipGroup, ShipId, ThreatCategory,
};

/// Predicate constructors of the spatial/filtering service.
///
/// All predicates are evaluated relative to the owner the service is scoped to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShipFilter {
    /// Owned by someone hostile to the owner.
    Hostile,
    /// Raider hull.
    Raider,
    /// Armed, fighting-capable hull.
    Fighting,
    /// Unarmed working hull.
    Working,
    /// Not part of any mission fleet.
    NotInFleet,
}

impl ShipFilter {
    /// Predicate selecting the ships of a threat category.
    pub const fn for_category(category: ThreatCategory) -> Self {
        match category {
            ThreatCategory::Fighting => ShipFilter::Fighting,
            ThreatCategory::Raider => ShipFilter::Raider,
            ThreatCategory::Working => ShipFilter::Working,
        }
    }

    /// Predicate selecting ships of a hull class.
    pub const fn for_class(class: ShipClass) -> Self {
        match class {
            ShipClass::Warship => ShipFilter::Fighting,
            ShipClass::Raider => ShipFilter::Raider,
            ShipClass::Merchant => ShipFilter::Working,
        }
    }
}

/// Proximity queries and ship filtering, scoped to one owner.
///
/// Returned sets carry no ordering guarantee.
pub trait SpatialService {
    /// Ships within combat range of any member of `group`, excluding the
    /// group itself.
    fn ships_near(&self, group: &ShipGroup) -> Vec<ShipId>;

    /// Ships of `ships` matching every rule.
    fn filter(&self, ships: &[ShipId], rules: &[ShipFilter]) -> Vec<ShipId>;

    /// The owner's own ships matching every rule.
    fn owned_ships(&self, rules: &[ShipFilter]) -> Vec<ShipId>;

    /// Combat figures of a ship; [`CombatRating::ZERO`] if unknown.
    fn rating(&self, ship: ShipId) -> CombatRating;

    /// Whether the ship still exists.
    fn is_live(&self, ship: ShipId) -> bool;
}

/// Identifier of a mission owned by the strategy layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MissionId(pub u32);

impl fmt::Display for MissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "mission#{}", self.0)
    }
}

/// Mission summary handed to the arbitrator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Mission {
    pub id: MissionId,
    /// The mission explicitly wants its combat resolved now.
    pub combat_phase: bool,
}

/// Context passed along with a pause request.
#[derive(Clone, Copy, Debug)]
pub struct PauseRequest<'a> {
    /// Category that made the arbitrator ask.
    pub category: ThreatCategory,
    pub enemies: &'a [ShipId],
}

/// Mission lifecycle owned by the strategy layer.
pub trait MissionService {
    /// Live missions of the owner satisfying `condition`.
    fn missions(&self, condition: &dyn Fn(&Mission) -> bool) -> Vec<Mission>;

    /// Ships of the mission's fleet. May be empty.
    fn fleet_ships(&self, mission: MissionId) -> Vec<ShipId>;

    fn abort(&mut self, mission: MissionId);

    /// Nothing to fight: hand control back to the mission.
    fn continue_mission(&mut self, mission: MissionId);

    /// Asks whether the mission may be paused to engage. `true` grants it.
    fn request_pause(&mut self, mission: MissionId, request: &PauseRequest<'_>) -> bool;
}

/// Behavior-selection layer. Fire-and-forget: the outcome is never inspected.
pub trait BehaviorService {
    fn request_action(&mut self, decision: EngagementDecision);
}

/// Collaborators available to one arbitration tick.
pub struct CombatServices<'a> {
    pub spatial: &'a dyn SpatialService,
    pub missions: &'a mut dyn MissionService,
    pub behavior: &'a mut dyn BehaviorService,
}

impl<'a> CombatServices<'a> {
    pub fn new(
        spatial: &'a dyn SpatialService,
        missions: &'a mut dyn MissionService,
        behavior: &'a mut dyn BehaviorService,
    ) -> Self {
        Self {
            spatial,
            missions,
            behavior,
        }
    }
}
