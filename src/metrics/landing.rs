use std::sync::Arc;

use chrono::{Datelike, Duration, NaiveDate};
use uuid::Uuid;

use crate::bank::{MovementType, PlannedMovement};
use crate::cache::{keys, DataCache};
use crate::errors::CoreResult;
use crate::sources::{AccountsSource, MovementsSource, PlannedSource};

/// Upcoming planned movements look ahead this many days.
const UPCOMING_WINDOW_DAYS: i64 = 30;
/// At most this many upcoming entries are kept for the landing card.
const UPCOMING_LIMIT: usize = 3;
/// Upcoming listings refresh twice an hour.
const UPCOMING_TTL_MINUTES: i64 = 30;

/// The landing page's headline metrics: total balance, current-month
/// income/expense sums, and the next few planned movements.
pub struct LandingEngine {
    accounts: Arc<dyn AccountsSource>,
    movements: Arc<dyn MovementsSource>,
    planned: Arc<dyn PlannedSource>,
    cache: Arc<DataCache>,
}

impl LandingEngine {
    pub fn new(
        accounts: Arc<dyn AccountsSource>,
        movements: Arc<dyn MovementsSource>,
        planned: Arc<dyn PlannedSource>,
        cache: Arc<DataCache>,
    ) -> Self {
        Self {
            accounts,
            movements,
            planned,
            cache,
        }
    }

    /// Sum of the user's account balances.
    pub async fn total_balance(&self, user_id: Uuid) -> CoreResult<f64> {
        let key = keys::total_balance(user_id);
        if let Some(cached) = self.cache.get::<f64>(&key) {
            return Ok(cached);
        }
        let accounts = self.accounts.accounts_for_user(user_id).await?;
        let total: f64 = accounts.iter().map(|account| account.balance).sum();
        self.cache.set(&key, &total);
        Ok(total)
    }

    /// Confirmed, non-transfer income for the calendar month of `today`.
    pub async fn month_income(&self, user_id: Uuid, today: NaiveDate) -> CoreResult<f64> {
        self.month_sum(user_id, today, MovementType::Income).await
    }

    /// Confirmed, non-transfer expenses for the calendar month of `today`.
    pub async fn month_expenses(&self, user_id: Uuid, today: NaiveDate) -> CoreResult<f64> {
        self.month_sum(user_id, today, MovementType::Expense).await
    }

    async fn month_sum(
        &self,
        user_id: Uuid,
        today: NaiveDate,
        movement_type: MovementType,
    ) -> CoreResult<f64> {
        let (year, month) = (today.year(), today.month());
        let key = match movement_type {
            MovementType::Income => keys::month_income(user_id, year, month),
            MovementType::Expense => keys::month_expenses(user_id, year, month),
        };
        if let Some(cached) = self.cache.get::<f64>(&key) {
            return Ok(cached);
        }

        let accounts = self.accounts.accounts_for_user(user_id).await?;
        let movements = super::all_movements(&accounts, self.movements.as_ref()).await?;
        let total: f64 = movements
            .iter()
            .filter(|m| {
                m.counts_for_stats()
                    && m.movement_type == movement_type
                    && m.date.year() == year
                    && m.date.month() == month
            })
            .map(|m| m.amount.abs())
            .sum();
        self.cache.set(&key, &total);
        Ok(total)
    }

    /// The next few active planned movements executing strictly inside
    /// `(today, today + 30 days)`, soonest first.
    pub async fn upcoming_planned(
        &self,
        user_id: Uuid,
        today: NaiveDate,
    ) -> CoreResult<Vec<PlannedMovement>> {
        let key = keys::upcoming_planned(user_id, today.year(), today.month());
        if let Some(cached) = self.cache.get::<Vec<PlannedMovement>>(&key) {
            return Ok(cached);
        }

        let accounts = self.accounts.accounts_for_user(user_id).await?;
        let planned = super::all_planned(&accounts, self.planned.as_ref()).await?;
        let horizon = today + Duration::days(UPCOMING_WINDOW_DAYS);

        let mut upcoming: Vec<PlannedMovement> = planned
            .into_iter()
            .filter(|p| {
                p.is_active() && p.next_execution > today && p.next_execution < horizon
            })
            .collect();
        upcoming.sort_by_key(|p| p.next_execution);
        upcoming.truncate(UPCOMING_LIMIT);

        self.cache
            .set_for(&key, &upcoming, Duration::minutes(UPCOMING_TTL_MINUTES));
        Ok(upcoming)
    }
}
