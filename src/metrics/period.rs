use std::sync::Arc;

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::bank::{Movement, MovementType};
use crate::cache::{keys, DataCache};
use crate::errors::CoreResult;
use crate::sources::{AccountsSource, MovementsSource};

/// Period stats are shorter-lived than the landing metrics: one hour.
const STATS_TTL_HOURS: i64 = 1;

/// Granularity of a period-over-period comparison.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TimeFilter {
    Day,
    Week,
    Month,
    Year,
}

impl TimeFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeFilter::Day => "day",
            TimeFilter::Week => "week",
            TimeFilter::Month => "month",
            TimeFilter::Year => "year",
        }
    }
}

/// Income/expense totals for the current interval plus percent changes
/// against the immediately preceding interval of equal length.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PeriodStats {
    pub total_income: f64,
    pub total_expenses: f64,
    pub net_balance: f64,
    pub income_change: f64,
    pub expense_change: f64,
}

/// Aggregates confirmed, non-transfer movements into period statistics.
pub struct PeriodEngine {
    accounts: Arc<dyn AccountsSource>,
    movements: Arc<dyn MovementsSource>,
    cache: Arc<DataCache>,
}

impl PeriodEngine {
    pub fn new(
        accounts: Arc<dyn AccountsSource>,
        movements: Arc<dyn MovementsSource>,
        cache: Arc<DataCache>,
    ) -> Self {
        Self {
            accounts,
            movements,
            cache,
        }
    }

    /// Stats for the interval containing `today` under `filter`, compared
    /// against the preceding interval. Cached under a month-granular key
    /// for every filter, week and year included.
    pub async fn period_stats(
        &self,
        user_id: Uuid,
        filter: TimeFilter,
        today: NaiveDate,
    ) -> CoreResult<PeriodStats> {
        let key = keys::period_stats(user_id, filter, today.year(), today.month());
        if let Some(cached) = self.cache.get::<PeriodStats>(&key) {
            tracing::debug!(%user_id, filter = filter.as_str(), "period stats cache hit");
            return Ok(cached);
        }

        let accounts = self.accounts.accounts_for_user(user_id).await?;
        let movements = super::all_movements(&accounts, self.movements.as_ref()).await?;

        let stats = aggregate(&movements, filter, today);
        self.cache
            .set_for(&key, &stats, Duration::hours(STATS_TTL_HOURS));
        Ok(stats)
    }
}

/// Pure aggregation over already-fetched movements.
pub fn aggregate(movements: &[Movement], filter: TimeFilter, today: NaiveDate) -> PeriodStats {
    let current = current_range(filter, today);
    let previous = previous_range(filter, today);

    let total_income = sum_in_range(movements, MovementType::Income, current);
    let total_expenses = sum_in_range(movements, MovementType::Expense, current);
    let previous_income = sum_in_range(movements, MovementType::Income, previous);
    let previous_expenses = sum_in_range(movements, MovementType::Expense, previous);

    PeriodStats {
        total_income,
        total_expenses,
        net_balance: total_income - total_expenses,
        income_change: percent_change(total_income, previous_income),
        expense_change: percent_change(total_expenses, previous_expenses),
    }
}

fn sum_in_range(
    movements: &[Movement],
    movement_type: MovementType,
    (start, end): (NaiveDate, NaiveDate),
) -> f64 {
    movements
        .iter()
        .filter(|m| {
            m.counts_for_stats()
                && m.movement_type == movement_type
                && m.date >= start
                && m.date <= end
        })
        .map(|m| m.amount.abs())
        .sum()
}

/// Percent change with the zero-previous case special-cased: 100 when new
/// activity appears from nothing, 0 when both periods are empty. Rounded to
/// one decimal.
fn percent_change(current: f64, previous: f64) -> f64 {
    let raw = if previous > 0.0 {
        (current - previous) / previous * 100.0
    } else if current > 0.0 {
        100.0
    } else {
        0.0
    };
    (raw * 10.0).round() / 10.0
}

/// Inclusive interval containing `today` for the given filter. Weeks start
/// on Monday.
pub fn current_range(filter: TimeFilter, today: NaiveDate) -> (NaiveDate, NaiveDate) {
    match filter {
        TimeFilter::Day => (today, today),
        TimeFilter::Week => {
            let start =
                today - Duration::days(today.weekday().num_days_from_monday() as i64);
            (start, start + Duration::days(6))
        }
        TimeFilter::Month => (first_of_month(today), last_of_month(today)),
        TimeFilter::Year => (
            NaiveDate::from_ymd_opt(today.year(), 1, 1).unwrap_or(today),
            NaiveDate::from_ymd_opt(today.year(), 12, 31).unwrap_or(today),
        ),
    }
}

/// The interval of equal length immediately before the current one.
pub fn previous_range(filter: TimeFilter, today: NaiveDate) -> (NaiveDate, NaiveDate) {
    match filter {
        TimeFilter::Day => {
            let yesterday = today - Duration::days(1);
            (yesterday, yesterday)
        }
        TimeFilter::Week => {
            let (start, end) = current_range(TimeFilter::Week, today);
            (start - Duration::days(7), end - Duration::days(7))
        }
        TimeFilter::Month => {
            let last_prev = first_of_month(today) - Duration::days(1);
            (first_of_month(last_prev), last_prev)
        }
        TimeFilter::Year => (
            NaiveDate::from_ymd_opt(today.year() - 1, 1, 1).unwrap_or(today),
            NaiveDate::from_ymd_opt(today.year() - 1, 12, 31).unwrap_or(today),
        ),
    }
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

fn last_of_month(date: NaiveDate) -> NaiveDate {
    let (next_year, next_month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .map(|first_next| first_next - Duration::days(1))
        .unwrap_or(date)
}
