//! In-memory source backend.
//!
//! Serves fixture data for tests and local development without a running
//! backend. Can be flipped into a failing state to exercise the engines'
//! upstream-error paths.

use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use crate::bank::{Account, Movement, PlannedMovement};
use crate::errors::{CoreError, CoreResult};

use super::{AccountsSource, MovementsSource, PlannedSource};

/// In-memory implementation of all three source traits.
#[derive(Debug, Default)]
pub struct MemoryBank {
    accounts: Mutex<Vec<Account>>,
    movements: Mutex<Vec<Movement>>,
    planned: Mutex<Vec<PlannedMovement>>,
    failing: Mutex<bool>,
}

impl MemoryBank {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_account(&self, account: Account) -> Uuid {
        let id = account.id;
        self.accounts.lock().unwrap().push(account);
        id
    }

    pub fn add_movement(&self, movement: Movement) {
        self.movements.lock().unwrap().push(movement);
    }

    pub fn add_planned(&self, planned: PlannedMovement) {
        self.planned.lock().unwrap().push(planned);
    }

    /// When set, every read fails with an upstream error.
    pub fn set_failing(&self, failing: bool) {
        *self.failing.lock().unwrap() = failing;
    }

    fn check_available(&self) -> CoreResult<()> {
        if *self.failing.lock().unwrap() {
            return Err(CoreError::Upstream("memory bank unavailable".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl AccountsSource for MemoryBank {
    async fn accounts_for_user(&self, user_id: Uuid) -> CoreResult<Vec<Account>> {
        self.check_available()?;
        Ok(self
            .accounts
            .lock()
            .unwrap()
            .iter()
            .filter(|account| account.user_id == user_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl MovementsSource for MemoryBank {
    async fn movements_for_account(&self, account_id: Uuid) -> CoreResult<Vec<Movement>> {
        self.check_available()?;
        Ok(self
            .movements
            .lock()
            .unwrap()
            .iter()
            .filter(|movement| movement.account_id == account_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl PlannedSource for MemoryBank {
    async fn planned_for_account(&self, account_id: Uuid) -> CoreResult<Vec<PlannedMovement>> {
        self.check_available()?;
        Ok(self
            .planned
            .lock()
            .unwrap()
            .iter()
            .filter(|planned| planned.account_id == account_id)
            .cloned()
            .collect())
    }
}
