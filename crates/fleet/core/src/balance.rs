//! Power balance estimation.
//!
//! The balance is advisory. Engagement triggers on the mere presence of a
//! hostile category; the behavior layer reads the balance to pick tactics.

use std::fmt;

use crate::ship::CombatRating;

/// Aggregated combat figures of one group.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatPower {
    pub hull: u64,
    pub firepower: u64,
}

impl CombatPower {
    pub fn sum(ratings: impl IntoIterator<Item = CombatRating>) -> Self {
        ratings
            .into_iter()
            .fold(Self::default(), |acc, rating| Self {
                hull: acc.hull + u64::from(rating.hull),
                firepower: acc.firepower + u64::from(rating.firepower),
            })
    }

    /// Total hull times total firepower: how long the group survives times
    /// how fast it kills.
    pub fn strength(&self) -> u128 {
        u128::from(self.hull) * u128::from(self.firepower)
    }
}

/// Relative strength of an allied group against an enemy group.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PowerBalance {
    pub ally: CombatPower,
    pub enemy: CombatPower,
}

impl PowerBalance {
    /// Ratio reported for evenly matched groups.
    pub const NEUTRAL: f64 = 1.0;

    pub fn estimate(
        ally: impl IntoIterator<Item = CombatRating>,
        enemy: impl IntoIterator<Item = CombatRating>,
    ) -> Self {
        Self {
            ally: CombatPower::sum(ally),
            enemy: CombatPower::sum(enemy),
        }
    }

    /// Ally strength divided by enemy strength.
    ///
    /// Two powerless groups are even (`1.0`); a powerless enemy alone yields
    /// `f64::INFINITY`.
    pub fn ratio(&self) -> f64 {
        let ally = self.ally.strength();
        let enemy = self.enemy.strength();
        match (ally, enemy) {
            (0, 0) => Self::NEUTRAL,
            (_, 0) => f64::INFINITY,
            (ally, enemy) if ally == enemy => Self::NEUTRAL,
            (ally, enemy) => ally as f64 / enemy as f64,
        }
    }

    pub fn is_neutral(&self) -> bool {
        self.ratio() == Self::NEUTRAL
    }

    pub fn favors_ally(&self) -> bool {
        self.ratio() > Self::NEUTRAL
    }
}

impl fmt::Display for PowerBalance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.ratio())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ratings(values: &[(u32, u32)]) -> Vec<CombatRating> {
        values
            .iter()
            .map(|(hull, firepower)| CombatRating::new(*hull, *firepower))
            .collect()
    }

    #[test]
    fn group_against_itself_is_neutral() {
        let group = ratings(&[(100, 7), (250, 3), (80, 11)]);
        let balance = PowerBalance::estimate(group.clone(), group);

        assert!(balance.is_neutral());
        assert_eq!(balance.ratio(), PowerBalance::NEUTRAL);
    }

    #[test]
    fn strength_is_hull_times_firepower() {
        // (100 + 100) * (10 + 10) = 4000 vs 100 * 10 = 1000
        let balance = PowerBalance::estimate(ratings(&[(100, 10), (100, 10)]), ratings(&[(100, 10)]));

        assert_eq!(balance.ally.strength(), 4000);
        assert_eq!(balance.ratio(), 4.0);
        assert!(balance.favors_ally());
        assert_eq!(balance.to_string(), "4.00");
    }

    #[test]
    fn unarmed_enemy_is_infinitely_favorable() {
        let balance = PowerBalance::estimate(ratings(&[(100, 10)]), ratings(&[(500, 0)]));
        assert_eq!(balance.ratio(), f64::INFINITY);
    }

    #[test]
    fn two_powerless_groups_are_even() {
        let balance = PowerBalance::estimate(ratings(&[(100, 0)]), ratings(&[(50, 0)]));
        assert!(balance.is_neutral());
    }
}
