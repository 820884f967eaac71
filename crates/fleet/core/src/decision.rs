//! Engagement decisions: the single output unit of arbitration.

use crate::balance::PowerBalance;
use crate::group::ShipGroup;
use crate::ship::ShipId;
use crate::threat::ThreatCategory;

/// Kind of behavior requested from the behavior-selection layer.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum ActionKind {
    Offensive,
    Idle,
}

/// Reason tag attached to a behavior request.
///
/// The snake_case string form is what behavior tables key on; keep it stable.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::AsRefStr,
    strum::EnumString,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Trigger {
    FightingShipsInSight,
    RaiderShipsInSight,
    WorkingShipsInSight,
    NoOneInSight,
}

/// One behavior request for one group, emitted at most once per group per tick.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EngagementDecision {
    pub kind: ActionKind,
    pub trigger: Trigger,
    pub group: ShipGroup,
    pub enemies: Option<Vec<ShipId>>,
    pub power_balance: Option<PowerBalance>,
}

impl EngagementDecision {
    /// Offensive request against the ships of `category`.
    pub fn offensive(
        category: ThreatCategory,
        group: ShipGroup,
        enemies: Vec<ShipId>,
        power_balance: Option<PowerBalance>,
    ) -> Self {
        Self {
            kind: ActionKind::Offensive,
            trigger: category.trigger(),
            group,
            enemies: Some(enemies),
            power_balance,
        }
    }

    /// Idle (or, for raiders, seek) request when nothing is in sight.
    pub fn idle(group: ShipGroup) -> Self {
        Self {
            kind: ActionKind::Idle,
            trigger: Trigger::NoOneInSight,
            group,
            enemies: None,
            power_balance: None,
        }
    }

    pub fn is_offensive(&self) -> bool {
        self.kind == ActionKind::Offensive
    }

    pub fn enemies(&self) -> &[ShipId] {
        self.enemies.as_deref().unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trigger_tags_are_stable() {
        assert_eq!(Trigger::FightingShipsInSight.as_ref(), "fighting_ships_in_sight");
        assert_eq!(Trigger::RaiderShipsInSight.as_ref(), "raider_ships_in_sight");
        assert_eq!(Trigger::WorkingShipsInSight.as_ref(), "working_ships_in_sight");
        assert_eq!(Trigger::NoOneInSight.as_ref(), "no_one_in_sight");
    }

    #[test]
    fn idle_carries_no_context() {
        let decision = EngagementDecision::idle(ShipGroup::singleton(ShipId(1)));
        assert_eq!(decision.kind, ActionKind::Idle);
        assert!(decision.enemies().is_empty());
        assert!(decision.power_balance.is_none());
    }
}
