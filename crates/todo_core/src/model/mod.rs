//! Todo domain model.
//!
//! # Responsibility
//! - Define the canonical item record persisted in the backing file.
//! - Own the wire-format parse step and the terminal display rendering.
//!
//! # Invariants
//! - Every item is identified by a caller-supplied `ItemId`.
//! - Serialized field names (`id`, `title`, `isDone`) never change.

pub mod item;
