//! Todo CRUD service.
//!
//! # Responsibility
//! - Provide add/get/list/update/delete/status/restore entry points.
//! - Translate wire-format strings into validated `Item` records.
//!
//! # Invariants
//! - `add_item` never overwrites; duplicates are rejected.
//! - `update_item`, `delete_item` and `change_done_status` require an
//!   existing id.
//! - Every successful mutation is followed by exactly one persist call.
//! - Failed calls leave the repository content unchanged, except a
//!   `Store(Persist)` failure, which keeps the in-memory change.

use crate::model::item::{Item, ItemId, WireFormatError};
use crate::repo::item_repo::ItemRepository;
use crate::store::{JsonFileStore, StoreConfig, StoreError};
use log::debug;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Service error for todo use-cases.
#[derive(Debug)]
pub enum ServiceError {
    /// Referenced id is not in the store.
    NotFound(ItemId),
    /// Add collided with an existing id.
    DuplicateId(ItemId),
    /// Wire-format input could not be parsed into an item.
    MalformedInput(WireFormatError),
    /// Load, persist or restore failure.
    Store(StoreError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(_) => f.write_str("Id not found."),
            Self::DuplicateId(id) => write!(f, "Id {id} already exists."),
            Self::MalformedInput(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::MalformedInput(err) => Some(err),
            Self::Store(err) => Some(err),
            Self::NotFound(_) | Self::DuplicateId(_) => None,
        }
    }
}

impl From<StoreError> for ServiceError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl From<WireFormatError> for ServiceError {
    fn from(value: WireFormatError) -> Self {
        Self::MalformedInput(value)
    }
}

/// CRUD façade over an item repository.
pub struct TodoService<R: ItemRepository> {
    repo: R,
}

impl TodoService<JsonFileStore> {
    /// Opens the JSON file store described by `config`.
    pub fn open(config: StoreConfig) -> ServiceResult<Self> {
        Ok(Self::new(JsonFileStore::open(config)?))
    }
}

impl<R: ItemRepository> TodoService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn repo(&self) -> &R {
        &self.repo
    }

    /// Adds a new item and persists.
    ///
    /// # Errors
    /// - `DuplicateId` when the id already exists; the stored record is kept.
    /// - `Store` when persisting fails.
    pub fn add_item(&mut self, item: Item) -> ServiceResult<()> {
        if self.repo.contains_item(item.id) {
            return Err(ServiceError::DuplicateId(item.id));
        }
        let id = item.id;
        self.repo.put_item(item);
        self.repo.persist_items()?;
        debug!("event=item_add module=service status=ok id={id}");
        Ok(())
    }

    /// Returns a copy of the item stored under `id`.
    pub fn get_item(&self, id: ItemId) -> ServiceResult<Item> {
        self.repo
            .get_item(id)
            .cloned()
            .ok_or(ServiceError::NotFound(id))
    }

    /// Returns every item sorted by ascending id.
    pub fn get_all_items(&self) -> Vec<Item> {
        self.repo.list_items()
    }

    /// Replaces every field of an existing item and persists.
    pub fn update_item(&mut self, item: Item) -> ServiceResult<()> {
        if !self.repo.contains_item(item.id) {
            return Err(ServiceError::NotFound(item.id));
        }
        let id = item.id;
        self.repo.put_item(item);
        self.repo.persist_items()?;
        debug!("event=item_update module=service status=ok id={id}");
        Ok(())
    }

    /// Removes an existing item and persists.
    pub fn delete_item(&mut self, id: ItemId) -> ServiceResult<()> {
        if self.repo.remove_item(id).is_none() {
            return Err(ServiceError::NotFound(id));
        }
        self.repo.persist_items()?;
        debug!("event=item_delete module=service status=ok id={id}");
        Ok(())
    }

    /// Sets only the done flag of an existing item and persists.
    pub fn change_done_status(&mut self, id: ItemId, is_done: bool) -> ServiceResult<()> {
        let mut item = self.get_item(id)?;
        item.is_done = is_done;
        self.repo.put_item(item);
        self.repo.persist_items()?;
        debug!("event=item_status module=service status=ok id={id} is_done={is_done}");
        Ok(())
    }

    /// Resets storage to the backup content, dropping all changes.
    pub fn restore_from_backup(&mut self) -> ServiceResult<()> {
        self.repo.restore_items()?;
        Ok(())
    }
}

/// Parses one item from a JSON object string supplied by a caller.
pub fn parse_item(text: &str) -> ServiceResult<Item> {
    Ok(Item::from_wire(text)?)
}

/// Renders one item for terminal output.
pub fn format_item(item: &Item) -> String {
    item.display_line()
}
