use std::sync::Arc;

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::bank::{Movement, PlannedMovement};
use crate::cache::{keys, DataCache};
use crate::errors::CoreResult;
use crate::sources::{AccountsSource, MovementsSource, PlannedSource};

/// Days reconstructed before the reference day and projected after it.
const TREND_WINDOW_DAYS: i64 = 14;

/// One calendar day's historical-or-projected balance sample.
///
/// Exactly one of `actual`/`projected` is set, except the reference day,
/// which carries both (equal to the current total balance).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BalanceTrendPoint {
    /// Short label for axis rendering, e.g. "Aug 29".
    pub date: String,
    /// Stable key, ISO `YYYY-MM-DD`.
    pub full_date: String,
    pub actual: Option<f64>,
    pub projected: Option<f64>,
    pub is_today: bool,
    pub is_future: bool,
}

/// Reconstructs the historical balance curve and projects the future one
/// from raw movements and the single stored next execution of each active
/// planned movement.
pub struct TrendEngine {
    accounts: Arc<dyn AccountsSource>,
    movements: Arc<dyn MovementsSource>,
    planned: Arc<dyn PlannedSource>,
    cache: Arc<DataCache>,
}

impl TrendEngine {
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

    /// The 29-point balance series around `today` (14 past days, today,
    /// 14 future days), cached under the user's balance-trend key.
    ///
    /// `today` is an explicit parameter so callers control the reference
    /// day; date comparisons ignore time-of-day throughout.
    pub async fn balance_trend(
        &self,
        user_id: Uuid,
        today: NaiveDate,
    ) -> CoreResult<Vec<BalanceTrendPoint>> {
        let key = keys::balance_trend(user_id);
        if let Some(cached) = self.cache.get::<Vec<BalanceTrendPoint>>(&key) {
            tracing::debug!(%user_id, "balance trend cache hit");
            return Ok(cached);
        }

        let accounts = self.accounts.accounts_for_user(user_id).await?;
        let movements = super::all_movements(&accounts, self.movements.as_ref()).await?;
        let planned = super::all_planned(&accounts, self.planned.as_ref()).await?;
        let current_balance: f64 = accounts.iter().map(|account| account.balance).sum();

        let points = build_trend(current_balance, &movements, &planned, today);
        self.cache.set(&key, &points);
        tracing::debug!(%user_id, points = points.len(), "balance trend computed");
        Ok(points)
    }
}

/// Pure construction of the 29-point series from already-fetched snapshots.
///
/// Past days reverse every confirmed movement dated after the day up to and
/// including `today`; future days forward-apply confirmed movements and the
/// single `next_execution` of each active planned movement. A movement
/// dated exactly `today` stays on the current-balance side of both walks.
pub fn build_trend(
    current_balance: f64,
    movements: &[Movement],
    planned: &[PlannedMovement],
    today: NaiveDate,
) -> Vec<BalanceTrendPoint> {
    let confirmed: Vec<&Movement> = movements.iter().filter(|m| m.is_confirmed()).collect();
    let active_planned: Vec<&PlannedMovement> =
        planned.iter().filter(|p| p.is_active()).collect();

    (-TREND_WINDOW_DAYS..=TREND_WINDOW_DAYS)
        .map(|offset| {
            let day = today + Duration::days(offset);
            let is_today = offset == 0;
            let is_future = offset > 0;

            let mut balance = current_balance;
            if offset < 0 {
                // Walk back from the present: undo each confirmed movement
                // dated in (day, today].
                for movement in confirmed
                    .iter()
                    .filter(|m| m.date > day && m.date <= today)
                {
                    balance -= movement.signed_amount();
                }
            } else if is_future {
                for movement in confirmed
                    .iter()
                    .filter(|m| m.date > today && m.date <= day)
                {
                    balance += movement.signed_amount();
                }
                // Each planned movement contributes once, at its stored
                // next execution; no multi-occurrence expansion here.
                for planned in active_planned
                    .iter()
                    .filter(|p| p.next_execution > today && p.next_execution <= day)
                {
                    balance += planned.signed_amount();
                }
            }

            BalanceTrendPoint {
                date: day.format("%b %-d").to_string(),
                full_date: day.format("%Y-%m-%d").to_string(),
                actual: (!is_future).then_some(balance),
                projected: (is_future || is_today).then_some(balance),
                is_today,
                is_future,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bank::{MovementStatus, MovementType, PlannedStatus, Recurrence};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn movement(
        amount: f64,
        movement_type: MovementType,
        day: NaiveDate,
    ) -> Movement {
        Movement::new(
            Uuid::new_v4(),
            "fixture",
            amount,
            movement_type,
            "OTHER",
            day,
        )
    }

    fn planned_movement(
        amount: f64,
        movement_type: MovementType,
        next_execution: NaiveDate,
    ) -> PlannedMovement {
        PlannedMovement::new(
            Uuid::new_v4(),
            "fixture",
            amount,
            movement_type,
            "OTHER",
            Recurrence::Monthly,
            next_execution,
        )
    }

    #[test]
    fn series_has_29_points_with_single_today() {
        let today = date(2026, 8, 29);
        let points = build_trend(1000.0, &[], &[], today);
        assert_eq!(points.len(), 29);
        let todays: Vec<&BalanceTrendPoint> =
            points.iter().filter(|p| p.is_today).collect();
        assert_eq!(todays.len(), 1);
        assert_eq!(todays[0].actual, Some(1000.0));
        assert_eq!(todays[0].projected, Some(1000.0));
        assert_eq!(todays[0].full_date, "2026-08-29");
    }

    #[test]
    fn points_are_chronological_and_exclusive_outside_today() {
        let today = date(2026, 8, 29);
        let points = build_trend(500.0, &[], &[], today);
        for window in points.windows(2) {
            assert!(window[0].full_date < window[1].full_date);
        }
        for point in &points {
            if point.is_today {
                continue;
            }
            assert_ne!(point.actual.is_some(), point.projected.is_some());
            assert_eq!(point.projected.is_some(), point.is_future);
        }
    }

    #[test]
    fn yesterday_expense_is_reversed_into_the_past() {
        let today = date(2026, 8, 29);
        let yesterday = today - Duration::days(1);
        let expense = movement(100.0, MovementType::Expense, yesterday);
        let points = build_trend(1000.0, &[expense], &[], today);

        let yesterday_point = points
            .iter()
            .find(|p| p.full_date == "2026-08-28")
            .unwrap();
        assert_eq!(yesterday_point.actual, Some(1100.0));
        let today_point = points.iter().find(|p| p.is_today).unwrap();
        assert_eq!(today_point.actual, Some(1000.0));
    }

    #[test]
    fn replaying_movements_forward_recovers_present_balance() {
        let today = date(2026, 8, 29);
        let movements = vec![
            movement(250.0, MovementType::Income, today - Duration::days(10)),
            movement(40.0, MovementType::Expense, today - Duration::days(7)),
            movement(120.0, MovementType::Expense, today - Duration::days(3)),
            movement(60.0, MovementType::Income, today - Duration::days(1)),
        ];
        let points = build_trend(1000.0, &movements, &[], today);

        let oldest = points.first().unwrap();
        let oldest_day = today - Duration::days(TREND_WINDOW_DAYS);
        let mut replayed = oldest.actual.unwrap();
        for movement in movements
            .iter()
            .filter(|m| m.date > oldest_day && m.date <= today)
        {
            replayed += movement.signed_amount();
        }
        assert!((replayed - 1000.0).abs() < 1e-9);
    }

    #[test]
    fn future_days_apply_confirmed_and_planned_once() {
        let today = date(2026, 8, 29);
        let in_three_days = today + Duration::days(3);
        let movements = vec![movement(50.0, MovementType::Expense, in_three_days)];
        let planned = vec![planned_movement(200.0, MovementType::Income, in_three_days)];

        let points = build_trend(1000.0, &movements, &planned, today);
        let before = points.iter().find(|p| p.full_date == "2026-08-31").unwrap();
        assert_eq!(before.projected, Some(1000.0));
        let after = points.iter().find(|p| p.full_date == "2026-09-01").unwrap();
        assert_eq!(after.projected, Some(1150.0));
        // Later days do not re-apply the planned movement.
        let last = points.last().unwrap();
        assert_eq!(last.projected, Some(1150.0));
    }

    #[test]
    fn pending_and_cancelled_entries_are_ignored() {
        let today = date(2026, 8, 29);
        let mut pending = movement(500.0, MovementType::Expense, today - Duration::days(2));
        pending.status = MovementStatus::Pending;
        let mut cancelled =
            planned_movement(300.0, MovementType::Expense, today + Duration::days(2));
        cancelled.status = PlannedStatus::Cancelled;

        let points = build_trend(1000.0, &[pending], &[cancelled], today);
        assert!(points
            .iter()
            .all(|p| p.actual.unwrap_or(1000.0) == 1000.0
                && p.projected.unwrap_or(1000.0) == 1000.0));
    }
}
