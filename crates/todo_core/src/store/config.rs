//! Store location settings.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Conventional relative location of the backing file.
pub const DEFAULT_DB_PATH: &str = "./data/todo.json";
/// Suffix appended to the backing path to derive the default backup path.
pub const DEFAULT_BACKUP_SUFFIX: &str = ".bak";

/// Backing file and backup file locations for one store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub path: PathBuf,
    pub backup_path: PathBuf,
}

impl StoreConfig {
    /// Uses `path` as backing file and `<path>.bak` as backup file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let backup_path = with_suffix(&path, DEFAULT_BACKUP_SUFFIX);
        Self { path, backup_path }
    }

    /// Overrides the backup file location.
    pub fn with_backup(mut self, backup_path: impl Into<PathBuf>) -> Self {
        self.backup_path = backup_path.into();
        self
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new(DEFAULT_DB_PATH)
    }
}

/// Appends `suffix` to the full file name (`todo.json` -> `todo.json.bak`).
pub(crate) fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}
