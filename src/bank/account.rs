use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A bank account snapshot. The balance is the upstream's current figure,
/// not a ledger to be replayed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Account {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub balance: f64,
}

impl Account {
    pub fn new(user_id: Uuid, name: impl Into<String>, balance: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            name: name.into(),
            balance,
        }
    }
}
