//! Read-only entity snapshots consumed by the metric engines.
//!
//! Everything here is fetched per invocation through the [`crate::sources`]
//! traits and never mutated by this crate.

pub mod account;
pub mod movement;
pub mod planned;

pub use account::Account;
pub use movement::{Movement, MovementStatus, MovementType, TRANSFER_CATEGORY};
pub use planned::{PlannedMovement, PlannedStatus, Recurrence};
