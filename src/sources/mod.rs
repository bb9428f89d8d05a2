//! Async read-API seams for the upstream persistence services.
//!
//! The engines never talk to a transport directly; they consume these
//! traits and treat every call as fallible. Timeouts and retries belong to
//! the implementation behind the trait.

pub mod memory;

use async_trait::async_trait;
use uuid::Uuid;

use crate::bank::{Account, Movement, PlannedMovement};
use crate::errors::CoreResult;

pub use memory::MemoryBank;

/// Read access to a user's accounts.
#[async_trait]
pub trait AccountsSource: Send + Sync {
    async fn accounts_for_user(&self, user_id: Uuid) -> CoreResult<Vec<Account>>;
}

/// Read access to the movements of a single account.
#[async_trait]
pub trait MovementsSource: Send + Sync {
    async fn movements_for_account(&self, account_id: Uuid) -> CoreResult<Vec<Movement>>;
}

/// Read access to the planned movements of a single account.
#[async_trait]
pub trait PlannedSource: Send + Sync {
    async fn planned_for_account(&self, account_id: Uuid) -> CoreResult<Vec<PlannedMovement>>;
}
