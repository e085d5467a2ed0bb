//! Whole-document JSON file store.
//!
//! # Responsibility
//! - Open (load or create) the backing file into an id-keyed map.
//! - Serialize the full map back to disk on request.
//! - Replace the backing file with the backup file and reload it.
//!
//! # Invariants
//! - The map is keyed by `Item::id`; a later duplicate in a loaded document
//!   replaces the earlier one.
//! - Documents are written as a JSON array sorted by id.
//! - A failed restore leaves both the backing file and the map untouched.

use super::config::{with_suffix, StoreConfig};
use super::{StoreCause, StoreError, StoreResult};
use crate::model::item::{Item, ItemId};
use log::{error, info, warn};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::Path;
use std::time::Instant;

const TEMP_SUFFIX: &str = ".tmp";

/// In-memory item map synchronized to one JSON backing file.
#[derive(Debug)]
pub struct JsonFileStore {
    config: StoreConfig,
    items: BTreeMap<ItemId, Item>,
}

impl JsonFileStore {
    /// Loads the backing file, creating it (and its parent directories) as
    /// an empty array when it does not exist yet.
    ///
    /// A zero-length or whitespace-only file loads as an empty store.
    ///
    /// # Errors
    /// - `StoreError::Init` when the path cannot be read or created, or when
    ///   existing content is not a JSON array of items.
    pub fn open(config: StoreConfig) -> StoreResult<Self> {
        let started_at = Instant::now();
        info!("event=store_open module=store status=start");

        match load_or_create(&config.path) {
            Ok(items) => {
                info!(
                    "event=store_open module=store status=ok items={} duration_ms={}",
                    items.len(),
                    started_at.elapsed().as_millis()
                );
                Ok(Self { config, items })
            }
            Err(cause) => {
                error!(
                    "event=store_open module=store status=error duration_ms={} error_code=store_init_failed error={}",
                    started_at.elapsed().as_millis(),
                    cause
                );
                Err(StoreError::Init {
                    path: config.path,
                    cause,
                })
            }
        }
    }

    /// Rewrites the backing file from the current map.
    ///
    /// # Errors
    /// - `StoreError::Persist` on serialization or I/O failure. The map is
    ///   not rolled back, so memory and disk may diverge afterwards.
    pub fn persist(&self) -> StoreResult<()> {
        let started_at = Instant::now();

        match write_document(&self.config.path, self.items.values()) {
            Ok(()) => {
                info!(
                    "event=store_persist module=store status=ok items={} duration_ms={}",
                    self.items.len(),
                    started_at.elapsed().as_millis()
                );
                Ok(())
            }
            Err(cause) => {
                error!(
                    "event=store_persist module=store status=error duration_ms={} error_code=store_persist_failed error={}",
                    started_at.elapsed().as_millis(),
                    cause
                );
                Err(StoreError::Persist {
                    path: self.config.path.clone(),
                    cause,
                })
            }
        }
    }

    /// Copies the backup file over the backing file and reloads it,
    /// discarding every in-memory change.
    ///
    /// The backup is parsed before anything is written, so a corrupt backup
    /// is reported without touching the backing file.
    ///
    /// # Errors
    /// - `StoreError::Restore` when the backup is missing, unreadable or not
    ///   a valid item array, or when it cannot be copied.
    /// - `StoreError::Init` when the replaced backing file cannot be reloaded.
    pub fn restore_from_backup(&mut self) -> StoreResult<()> {
        let started_at = Instant::now();
        info!("event=store_restore module=store status=start");

        if let Err(cause) = copy_backup(&self.config.backup_path, &self.config.path) {
            error!(
                "event=store_restore module=store status=error duration_ms={} error_code=store_restore_failed error={}",
                started_at.elapsed().as_millis(),
                cause
            );
            return Err(StoreError::Restore {
                backup_path: self.config.backup_path.clone(),
                cause,
            });
        }

        let items = load_or_create(&self.config.path).map_err(|cause| StoreError::Init {
            path: self.config.path.clone(),
            cause,
        })?;
        self.items = items;

        info!(
            "event=store_restore module=store status=ok items={} duration_ms={}",
            self.items.len(),
            started_at.elapsed().as_millis()
        );
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.config.path
    }

    pub fn backup_path(&self) -> &Path {
        &self.config.backup_path
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.items.get(&id)
    }

    /// Iterates items in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.items.values()
    }

    /// Inserts or replaces an item in memory only. Call `persist` to make it
    /// durable.
    pub fn insert(&mut self, item: Item) -> Option<Item> {
        self.items.insert(item.id, item)
    }

    /// Removes an item from memory only. Call `persist` to make it durable.
    pub fn remove(&mut self, id: ItemId) -> Option<Item> {
        self.items.remove(&id)
    }
}

fn load_or_create(path: &Path) -> Result<BTreeMap<ItemId, Item>, StoreCause> {
    match fs::read_to_string(path) {
        Ok(text) => decode_items(&text),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            create_empty(path)?;
            info!("event=store_create module=store status=ok");
            Ok(BTreeMap::new())
        }
        Err(err) => Err(err.into()),
    }
}

fn decode_items(text: &str) -> Result<BTreeMap<ItemId, Item>, StoreCause> {
    if text.trim().is_empty() {
        return Ok(BTreeMap::new());
    }

    let records: Vec<Item> = serde_json::from_str(text)?;
    let mut items = BTreeMap::new();
    for item in records {
        let id = item.id;
        if items.insert(id, item).is_some() {
            warn!("event=store_load module=store status=warn duplicate_id={id}");
        }
    }
    Ok(items)
}

fn create_empty(path: &Path) -> Result<(), StoreCause> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    write_document(path, std::iter::empty::<&Item>())
}

fn copy_backup(backup_path: &Path, path: &Path) -> Result<(), StoreCause> {
    let text = fs::read_to_string(backup_path)?;
    decode_items(&text)?;
    replace_file(path, text.as_bytes())?;
    Ok(())
}

fn write_document<'a>(
    path: &Path,
    items: impl Iterator<Item = &'a Item>,
) -> Result<(), StoreCause> {
    let records: Vec<&Item> = items.collect();
    let mut text = serde_json::to_string_pretty(&records)?;
    text.push('\n');
    replace_file(path, text.as_bytes())?;
    Ok(())
}

fn replace_file(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let tmp_path = with_suffix(path, TEMP_SUFFIX);
    fs::write(&tmp_path, bytes)?;
    if let Err(err) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(err);
    }
    Ok(())
}
