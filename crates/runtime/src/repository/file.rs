use std::fs;
use std::path::{Path, PathBuf};

use fleet_core::{CombatRow, OwnerId};

use super::{CombatStateRepository, RepositoryError, Result};

/// File-based [`CombatStateRepository`].
///
/// Each owner's rows live in `combat_{owner}.bin`, bincode-encoded. Saves go
/// through a temporary file and a rename so a crash never leaves a torn file.
#[derive(Debug)]
pub struct FileCombatRepository {
    base_dir: PathBuf,
}

impl FileCombatRepository {
    /// Opens a repository rooted at `base_dir`, creating the directory.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn table_path(&self, owner: OwnerId) -> PathBuf {
        self.base_dir.join(format!("combat_{}.bin", owner.0))
    }
}

impl CombatStateRepository for FileCombatRepository {
    fn save(&self, owner: OwnerId, rows: &[CombatRow]) -> Result<()> {
        let path = self.table_path(owner);
        let temp_path = path.with_extension("bin.tmp");

        let bytes =
            bincode::serialize(rows).map_err(|e| RepositoryError::Serialization(e.to_string()))?;
        fs::write(&temp_path, bytes)?;
        fs::rename(&temp_path, &path)?;

        tracing::debug!("Saved {} combat rows of {} to {}", rows.len(), owner, path.display());
        Ok(())
    }

    fn load(&self, owner: OwnerId) -> Result<Option<Vec<CombatRow>>> {
        let path = self.table_path(owner);
        if !path.exists() {
            return Ok(None);
        }

        let bytes = fs::read(&path)?;
        let rows: Vec<CombatRow> = bincode::deserialize(&bytes)
            .map_err(|e| RepositoryError::CorruptedData(format!("{}: {}", path.display(), e)))?;

        if let Some(row) = rows.iter().find(|row| row.owner_id != owner.0) {
            tracing::warn!(
                "{} holds a row of owner#{}; it will be dropped on restore",
                path.display(),
                row.owner_id
            );
        }

        tracing::debug!("Loaded {} combat rows of {} from {}", rows.len(), owner, path.display());
        Ok(Some(rows))
    }

    fn exists(&self, owner: OwnerId) -> bool {
        self.table_path(owner).exists()
    }

    fn delete(&self, owner: OwnerId) -> Result<()> {
        let path = self.table_path(owner);
        if path.exists() {
            fs::remove_file(&path)?;
            tracing::debug!("Deleted combat rows of {}", owner);
        }
        Ok(())
    }

    fn list_owners(&self) -> Result<Vec<OwnerId>> {
        let mut owners = Vec::new();

        for entry in fs::read_dir(&self.base_dir)? {
            let path = entry?.path();

            if let Some(filename) = path.file_name().and_then(|s| s.to_str())
                && let Some(raw) = filename
                    .strip_prefix("combat_")
                    .and_then(|s| s.strip_suffix(".bin"))
                && let Ok(owner) = raw.parse::<u32>()
            {
                owners.push(OwnerId(owner));
            }
        }

        owners.sort_unstable();
        Ok(owners)
    }
}
