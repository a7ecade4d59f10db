//! Domain model for children, chores and their completions.
//!
//! # Responsibility
//! - Define the records shared by repositories, services and the HTTP layer.
//! - Own the calendar rules that map a frequency onto its current period.
//!
//! # Invariants
//! - Chores are never hard-deleted by the core; `is_active` is the tombstone.
//! - Periods are derived from "today" on every read and never persisted.

pub mod child;
pub mod chore;
pub mod completion;
pub mod period;
pub mod timestamp;
