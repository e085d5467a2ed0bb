//! Core data-access layer for the todo CLI.
//! This crate owns every item invariant; callers only format and print.

pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod store;

pub use logging::{
    default_log_level, init_logging, logging_status, LogLevel, LogSettings, LoggingError,
};
pub use model::item::{Item, ItemId, WireFormatError};
pub use repo::item_repo::ItemRepository;
pub use service::todo_service::{format_item, parse_item, ServiceError, ServiceResult, TodoService};
pub use store::{
    JsonFileStore, StoreCause, StoreConfig, StoreError, StoreResult, DEFAULT_BACKUP_SUFFIX,
    DEFAULT_DB_PATH,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
