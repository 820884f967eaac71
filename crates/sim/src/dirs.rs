//! Platform-specific directory utilities.

use std::path::PathBuf;

/// Directory where combat tables are saved when `--save-dir` is not given.
///
/// `FLEET_SAVE_DIR` (also read from `.env`) takes precedence over the
/// platform data directory.
pub fn save_dir() -> PathBuf {
    if let Some(dir) = std::env::var_os("FLEET_SAVE_DIR") {
        return PathBuf::from(dir);
    }
    directories::ProjectDirs::from("", "", "fleet-sim")
        .map(|dirs| dirs.data_dir().join("combat"))
        .unwrap_or_else(|| PathBuf::from("./save_data/combat"))
}
