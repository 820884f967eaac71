//! Threat classification.
//!
//! Partitions the hostile ships around a group into disjoint interest
//! categories. The predicates themselves belong to the caller (they need the
//! world); this module owns the ordering and disjointness rules.

use arrayvec::ArrayVec;
use bitflags::bitflags;

use crate::decision::Trigger;
use crate::group::ShipGroup;
use crate::ship::ShipId;

/// Interest category of a hostile ship.
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
pub enum ThreatCategory {
    /// Armed, combat-ready hostiles.
    Fighting,
    /// Hostile raider hulls.
    Raider,
    /// Unarmed hostiles ("working" ships).
    Working,
}

impl ThreatCategory {
    /// Every category, highest priority first.
    pub const PRIORITY: [ThreatCategory; 3] = [
        ThreatCategory::Fighting,
        ThreatCategory::Raider,
        ThreatCategory::Working,
    ];

    pub const fn flag(self) -> CategorySet {
        match self {
            ThreatCategory::Fighting => CategorySet::FIGHTING,
            ThreatCategory::Raider => CategorySet::RAIDER,
            ThreatCategory::Working => CategorySet::WORKING,
        }
    }

    /// Tag attached to the offensive request this category triggers.
    pub const fn trigger(self) -> Trigger {
        match self {
            ThreatCategory::Fighting => Trigger::FightingShipsInSight,
            ThreatCategory::Raider => Trigger::RaiderShipsInSight,
            ThreatCategory::Working => Trigger::WorkingShipsInSight,
        }
    }

    /// Whether engaging this category carries a power balance. Unarmed
    /// targets are always favorable.
    pub const fn needs_balance(self) -> bool {
        !matches!(self, ThreatCategory::Working)
    }
}

bitflags! {
    /// Set of categories a faction distinguishes.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct CategorySet: u8 {
        const FIGHTING = 0b001;
        const RAIDER = 0b010;
        const WORKING = 0b100;
    }
}

impl CategorySet {
    /// Member categories, highest priority first.
    pub fn in_priority(self) -> impl Iterator<Item = ThreatCategory> {
        ThreatCategory::PRIORITY
            .into_iter()
            .filter(move |category| self.contains(category.flag()))
    }
}

/// Hostiles of one category.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bucket {
    pub category: ThreatCategory,
    pub ships: Vec<ShipId>,
}

/// Result of one classification pass. Buckets are kept in priority order and
/// never share a ship.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ThreatCategories {
    buckets: ArrayVec<Bucket, 3>,
}

impl ThreatCategories {
    /// Ships in `category`; empty if the category was not classified.
    pub fn get(&self, category: ThreatCategory) -> &[ShipId] {
        self.buckets
            .iter()
            .find(|bucket| bucket.category == category)
            .map(|bucket| bucket.ships.as_slice())
            .unwrap_or(&[])
    }

    /// The highest-priority non-empty category. This is the only one the
    /// arbitrator ever reacts to.
    pub fn first(&self) -> Option<(ThreatCategory, &[ShipId])> {
        self.buckets
            .iter()
            .find(|bucket| !bucket.ships.is_empty())
            .map(|bucket| (bucket.category, bucket.ships.as_slice()))
    }

    pub fn is_empty(&self) -> bool {
        self.first().is_none()
    }

    /// Total classified ships across all categories.
    pub fn total(&self) -> usize {
        self.buckets.iter().map(|bucket| bucket.ships.len()).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Bucket> {
        self.buckets.iter()
    }
}

/// Classifies `candidates` (already filtered to ships hostile to the group's
/// owner) into the categories of `categories`.
///
/// `filter` is the collaborator's predicate filter: given the still
/// unclassified candidates and a category, it returns those matching the
/// category's predicate. Categories are applied in priority order and each
/// ship lands in the first one that claims it. Ships of `group` itself are
/// never classified.
pub fn classify<F>(
    group: &ShipGroup,
    candidates: &[ShipId],
    categories: CategorySet,
    mut filter: F,
) -> ThreatCategories
where
    F: FnMut(&[ShipId], ThreatCategory) -> Vec<ShipId>,
{
    let mut remaining: Vec<ShipId> = Vec::with_capacity(candidates.len());
    for ship in candidates {
        if !group.contains(*ship) && !remaining.contains(ship) {
            remaining.push(*ship);
        }
    }

    let mut result = ThreatCategories::default();
    for category in categories.in_priority() {
        let matched = filter(&remaining, category);
        let ships: Vec<ShipId> = remaining
            .iter()
            .copied()
            .filter(|ship| matched.contains(ship))
            .collect();
        remaining.retain(|ship| !ships.contains(ship));
        result.buckets.push(Bucket { category, ships });
    }
    result
}
