use std::collections::BTreeMap;
use std::sync::RwLock;

use fleet_core::{CombatRow, OwnerId};

use super::{CombatStateRepository, RepositoryError, Result};

/// In-memory [`CombatStateRepository`] for tests and local runs.
#[derive(Debug, Default)]
pub struct InMemoryCombatRepo {
    tables: RwLock<BTreeMap<OwnerId, Vec<CombatRow>>>,
}

impl InMemoryCombatRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CombatStateRepository for InMemoryCombatRepo {
    fn save(&self, owner: OwnerId, rows: &[CombatRow]) -> Result<()> {
        let mut tables = self
            .tables
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        tables.insert(owner, rows.to_vec());
        Ok(())
    }

    fn load(&self, owner: OwnerId) -> Result<Option<Vec<CombatRow>>> {
        let tables = self
            .tables
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(tables.get(&owner).cloned())
    }

    fn exists(&self, owner: OwnerId) -> bool {
        self.tables
            .read()
            .map(|tables| tables.contains_key(&owner))
            .unwrap_or(false)
    }

    fn delete(&self, owner: OwnerId) -> Result<()> {
        let mut tables = self
            .tables
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        tables.remove(&owner);
        Ok(())
    }

    fn list_owners(&self) -> Result<Vec<OwnerId>> {
        let tables = self
            .tables
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(tables.keys().copied().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(ship_id: u32, state_ordinal: u8) -> CombatRow {
        CombatRow {
            owner_id: 1,
            ship_id,
            state_ordinal,
        }
    }

    #[test]
    fn save_replaces_previous_rows() {
        let repo = InMemoryCombatRepo::new();
        repo.save(OwnerId(1), &[row(1, 0), row(2, 1)]).unwrap();
        repo.save(OwnerId(1), &[row(3, 3)]).unwrap();

        assert_eq!(repo.load(OwnerId(1)).unwrap(), Some(vec![row(3, 3)]));
        assert_eq!(repo.load(OwnerId(2)).unwrap(), None);
    }

    #[test]
    fn delete_and_list() {
        let repo = InMemoryCombatRepo::new();
        repo.save(OwnerId(4), &[]).unwrap();
        repo.save(OwnerId(2), &[row(1, 0)]).unwrap();
        assert_eq!(repo.list_owners().unwrap(), vec![OwnerId(2), OwnerId(4)]);

        repo.delete(OwnerId(4)).unwrap();
        assert!(!repo.exists(OwnerId(4)));
        assert_eq!(repo.list_owners().unwrap(), vec![OwnerId(2)]);
    }
}
