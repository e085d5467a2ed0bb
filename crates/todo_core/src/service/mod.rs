//! Core use-case services.
//!
//! # Responsibility
//! - Enforce item identity and existence rules on top of a repository.
//! - Keep CLI callers decoupled from storage details.

pub mod todo_service;
