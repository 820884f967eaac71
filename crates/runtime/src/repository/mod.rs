//! Persistence of combat state tables.
//!
//! A table is stored per owner as a flat list of [`CombatRow`]s, so a save
//! stays readable even after the ships it names are destroyed.
//!
//! [`CombatRow`]: fleet_core::CombatRow

mod error;
mod file;
mod memory;
mod traits;

pub use error::{RepositoryError, Result};
pub use file::FileCombatRepository;
pub use memory::InMemoryCombatRepo;
pub use traits::CombatStateRepository;
