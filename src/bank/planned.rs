use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::movement::MovementType;

/// A scheduled, not-yet-settled transaction carrying a recurrence policy.
///
/// Only the single stored `next_execution` date participates in balance
/// projection; the recurrence rule itself is expanded upstream when the
/// movement actually executes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlannedMovement {
    pub id: Uuid,
    pub account_id: Uuid,
    pub description: String,
    pub amount: f64,
    #[serde(rename = "type")]
    pub movement_type: MovementType,
    pub category: String,
    pub recurrence: Recurrence,
    pub next_execution: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub status: PlannedStatus,
}

impl PlannedMovement {
    pub fn new(
        account_id: Uuid,
        description: impl Into<String>,
        amount: f64,
        movement_type: MovementType,
        category: impl Into<String>,
        recurrence: Recurrence,
        next_execution: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            account_id,
            description: description.into(),
            amount: amount.abs(),
            movement_type,
            category: category.into(),
            recurrence,
            next_execution,
            end_date: None,
            status: PlannedStatus::Pending,
        }
    }

    /// Positive for income, negative for expense; mirrors
    /// [`super::Movement::signed_amount`].
    pub fn signed_amount(&self) -> f64 {
        match self.movement_type {
            MovementType::Income => self.amount.abs(),
            MovementType::Expense => -self.amount.abs(),
        }
    }

    /// Cancelled and failed planned movements are dropped from every
    /// projection and listing.
    pub fn is_active(&self) -> bool {
        !matches!(
            self.status,
            PlannedStatus::Cancelled | PlannedStatus::Failed
        )
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlannedStatus {
    Pending,
    Confirmed,
    Cancelled,
    Failed,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Recurrence {
    Daily,
    Weekly,
    Monthly,
    Yearly,
    Custom,
}
