//! Domain model for categories and notes.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//! - Keep color and category-reference handling typed instead of stringly.
//!
//! # Invariants
//! - Every record is identified by a stable UUID.
//! - Deletion is a hard delete; there are no tombstones.

pub mod category;
pub mod note;
