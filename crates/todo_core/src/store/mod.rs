//! JSON flat-file record store.
//!
//! # Responsibility
//! - Load the backing JSON document into an in-memory item map.
//! - Rewrite the whole document after each mutation.
//! - Reset the backing file from a pre-provisioned backup file.
//!
//! # Invariants
//! - A store value only exists after a successful load; there is no
//!   "not yet loaded" state observable by callers.
//! - After a successful `persist`, map and file hold the same item set.
//! - Document writes go through a sibling temp file plus rename, so a load
//!   never observes a half-written document.
//! - No file locking: two processes sharing one backing file can overwrite
//!   each other's writes.

use serde_json::Error as JsonError;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io;
use std::path::PathBuf;

mod config;
mod json_file;

pub use config::{StoreConfig, DEFAULT_BACKUP_SUFFIX, DEFAULT_DB_PATH};
pub use json_file::JsonFileStore;

pub type StoreResult<T> = Result<T, StoreError>;

/// Underlying cause of a store failure.
#[derive(Debug)]
pub enum StoreCause {
    Io(io::Error),
    Json(JsonError),
}

impl Display for StoreCause {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "{err}"),
            Self::Json(err) => write!(f, "invalid JSON document: {err}"),
        }
    }
}

impl Error for StoreCause {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Json(err) => Some(err),
        }
    }
}

impl From<io::Error> for StoreCause {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<JsonError> for StoreCause {
    fn from(value: JsonError) -> Self {
        Self::Json(value)
    }
}

/// Record store failure, tagged by the operation that failed.
#[derive(Debug)]
pub enum StoreError {
    /// Backing file could not be created, read or parsed.
    Init { path: PathBuf, cause: StoreCause },
    /// Backing file could not be rewritten. The in-memory map is kept.
    Persist { path: PathBuf, cause: StoreCause },
    /// Backup file is missing, unreadable or corrupt, or could not be
    /// copied over the backing file.
    Restore { backup_path: PathBuf, cause: StoreCause },
}

impl StoreError {
    /// Returns the underlying cause regardless of operation.
    pub fn cause(&self) -> &StoreCause {
        match self {
            Self::Init { cause, .. } | Self::Persist { cause, .. } | Self::Restore { cause, .. } => {
                cause
            }
        }
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Init { path, cause } => {
                write!(f, "failed to load todo file `{}`: {cause}", path.display())
            }
            Self::Persist { path, cause } => {
                write!(f, "failed to write todo file `{}`: {cause}", path.display())
            }
            Self::Restore { backup_path, cause } => write!(
                f,
                "failed to restore from backup file `{}`: {cause}",
                backup_path.display()
            ),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(self.cause())
    }
}
