//! Item repository contract and JSON file implementation.

use crate::model::item::{Item, ItemId};
use crate::store::{JsonFileStore, StoreResult};

/// Keyed item storage used by `TodoService`.
pub trait ItemRepository {
    fn get_item(&self, id: ItemId) -> Option<&Item>;
    /// Returns every item sorted by ascending id.
    fn list_items(&self) -> Vec<Item>;
    /// Inserts or overwrites by id, returning the replaced record.
    fn put_item(&mut self, item: Item) -> Option<Item>;
    fn remove_item(&mut self, id: ItemId) -> Option<Item>;
    /// Makes every in-memory change durable.
    fn persist_items(&self) -> StoreResult<()>;
    /// Replaces storage content with the backup and reloads it.
    fn restore_items(&mut self) -> StoreResult<()>;

    fn contains_item(&self, id: ItemId) -> bool {
        self.get_item(id).is_some()
    }
}

impl ItemRepository for JsonFileStore {
    fn get_item(&self, id: ItemId) -> Option<&Item> {
        self.get(id)
    }

    fn list_items(&self) -> Vec<Item> {
        self.iter().cloned().collect()
    }

    fn put_item(&mut self, item: Item) -> Option<Item> {
        self.insert(item)
    }

    fn remove_item(&mut self, id: ItemId) -> Option<Item> {
        self.remove(id)
    }

    fn persist_items(&self) -> StoreResult<()> {
        self.persist()
    }

    fn restore_items(&mut self) -> StoreResult<()> {
        self.restore_from_backup()
    }
}

impl<R: ItemRepository + ?Sized> ItemRepository for &mut R {
    fn get_item(&self, id: ItemId) -> Option<&Item> {
        (**self).get_item(id)
    }

    fn list_items(&self) -> Vec<Item> {
        (**self).list_items()
    }

    fn put_item(&mut self, item: Item) -> Option<Item> {
        (**self).put_item(item)
    }

    fn remove_item(&mut self, id: ItemId) -> Option<Item> {
        (**self).remove_item(id)
    }

    fn persist_items(&self) -> StoreResult<()> {
        (**self).persist_items()
    }

    fn restore_items(&mut self) -> StoreResult<()> {
        (**self).restore_items()
    }
}
