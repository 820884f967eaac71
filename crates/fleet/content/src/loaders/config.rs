//! Combat configuration loader.

use std::path::Path;

use fleet_core::CombatConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for combat configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load a [`CombatConfig`] from a TOML file. Missing keys keep their
    /// defaults.
    pub fn load(path: &Path) -> LoadResult<CombatConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<CombatConfig> {
        let config: CombatConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        if config.combat_range == 0 {
            anyhow::bail!("combat_range must be at least one tile");
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_keeps_defaults() {
        let config = ConfigLoader::parse("").unwrap();
        assert_eq!(config, CombatConfig::default());
    }

    #[test]
    fn reads_combat_range() {
        let config = ConfigLoader::parse("combat_range = 12\n").unwrap();
        assert_eq!(config.combat_range, 12);
    }

    #[test]
    fn zero_range_is_rejected() {
        assert!(ConfigLoader::parse("combat_range = 0").is_err());
    }

    #[test]
    fn load_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = ConfigLoader::load(&dir.path().join("missing.toml")).unwrap_err();
        assert!(err.to_string().contains("missing.toml"));
    }
}
