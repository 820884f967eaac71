use std::path::PathBuf;

use fleet_core::CombatConfig;

/// Settings shared by every combat manager of a run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub combat: CombatConfig,
    /// Where combat tables are saved; `None` keeps them in memory.
    pub save_dir: Option<PathBuf>,
}

impl RuntimeConfig {
    pub fn new(combat: CombatConfig) -> Self {
        Self {
            combat,
            save_dir: None,
        }
    }

    pub fn with_save_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.save_dir = Some(dir.into());
        self
    }
}
