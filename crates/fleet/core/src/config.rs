/// Tunable parameters for combat arbitration.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CombatConfig {
    /// Radius (in tiles, Chebyshev distance) around a group within which other
    /// ships are considered candidates for classification.
    pub combat_range: u32,
}

impl CombatConfig {
    // ===== runtime-tunable defaults =====
    pub const DEFAULT_COMBAT_RANGE: u32 = 18;

    pub fn new() -> Self {
        Self {
            combat_range: Self::DEFAULT_COMBAT_RANGE,
        }
    }

    pub fn with_combat_range(combat_range: u32) -> Self {
        Self { combat_range }
    }
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self::new()
    }
}
