use fleet_core::{CombatRow, OwnerId};

use super::Result;

/// Storage of per-owner combat rows.
///
/// Implementations persist rows verbatim; validation happens on restore.
pub trait CombatStateRepository: Send + Sync {
    /// Replaces the rows stored for `owner`.
    fn save(&self, owner: OwnerId, rows: &[CombatRow]) -> Result<()>;

    /// Rows stored for `owner`, or `None` if nothing was saved.
    fn load(&self, owner: OwnerId) -> Result<Option<Vec<CombatRow>>>;

    fn exists(&self, owner: OwnerId) -> bool;

    fn delete(&self, owner: OwnerId) -> Result<()>;

    /// Owners with stored rows, ascending.
    fn list_owners(&self) -> Result<Vec<OwnerId>> {
        Ok(vec![])
    }
}
