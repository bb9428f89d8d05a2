use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Category marker for internal transfers; transfers are excluded from all
/// income/expense statistics because they move money between the user's own
/// accounts rather than in or out of them.
pub const TRANSFER_CATEGORY: &str = "TRANSFER";

/// A settled or in-flight transaction snapshot.
///
/// Amounts are stored as an unsigned magnitude plus [`MovementType`]; signed
/// deltas exist only at aggregation boundaries via [`Movement::signed_amount`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Movement {
    pub id: Uuid,
    pub account_id: Uuid,
    pub description: String,
    pub amount: f64,
    #[serde(rename = "type")]
    pub movement_type: MovementType,
    pub status: MovementStatus,
    pub category: String,
    pub date: NaiveDate,
}

impl Movement {
    pub fn new(
        account_id: Uuid,
        description: impl Into<String>,
        amount: f64,
        movement_type: MovementType,
        category: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            account_id,
            description: description.into(),
            amount: amount.abs(),
            movement_type,
            status: MovementStatus::Confirmed,
            category: category.into(),
            date,
        }
    }

    /// The movement's effect on a balance: positive for income, negative
    /// for expense. The single place where the sign convention is derived.
    pub fn signed_amount(&self) -> f64 {
        match self.movement_type {
            MovementType::Income => self.amount.abs(),
            MovementType::Expense => -self.amount.abs(),
        }
    }

    pub fn is_confirmed(&self) -> bool {
        self.status == MovementStatus::Confirmed
    }

    /// Transfers never count toward income/expense statistics.
    pub fn counts_for_stats(&self) -> bool {
        self.is_confirmed() && self.category != TRANSFER_CATEGORY
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MovementType {
    Income,
    Expense,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MovementStatus {
    Pending,
    Confirmed,
    Cancelled,
    Failed,
}
