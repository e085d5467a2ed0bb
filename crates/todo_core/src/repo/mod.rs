//! Repository seam between the CRUD service and concrete storage.
//!
//! # Responsibility
//! - Define the keyed item storage contract the service depends on.
//! - Bind the JSON file store to that contract.
//!
//! # Invariants
//! - Repository mutations are in-memory only until `persist_items`.
//! - Repositories do not enforce existence or duplicate rules; the service
//!   layer does.

pub mod item_repo;
