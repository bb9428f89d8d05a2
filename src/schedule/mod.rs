//! Pure recurrence scheduling: a recurrence choice plus an anchor date
//! becomes a five-field cron expression and a default end date.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::bank::Recurrence;

/// Schedule derived from a recurrence choice. Minute and hour are fixed to
/// zero; the weekday field is Sunday-based (0 = Sunday).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecurrencePlan {
    pub cron: String,
    pub end_date: NaiveDate,
}

/// Builds the schedule and default end date for a recurrence anchored at
/// `anchor`.
///
/// Recomputing this on a recurrence change overwrites any previously chosen
/// end date; callers that want to preserve a manual override must intercept
/// before applying the plan.
pub fn plan(recurrence: Recurrence, anchor: NaiveDate) -> RecurrencePlan {
    RecurrencePlan {
        cron: cron_expression(recurrence, anchor),
        end_date: default_end_date(recurrence, anchor),
    }
}

/// Five-field cron anchored on the given date. `Custom` falls back to the
/// daily schedule until per-user rules exist upstream.
pub fn cron_expression(recurrence: Recurrence, anchor: NaiveDate) -> String {
    let day = anchor.day();
    let month = anchor.month();
    let weekday = anchor.weekday().num_days_from_sunday();

    match recurrence {
        Recurrence::Daily | Recurrence::Custom => "0 0 * * *".to_string(),
        Recurrence::Weekly => format!("0 0 * * {weekday}"),
        Recurrence::Monthly => format!("0 0 {day} * *"),
        Recurrence::Yearly => format!("0 0 {day} {month} *"),
    }
}

/// Default end date per recurrence: +1 month (daily, custom), +3 months
/// (weekly), +1 year (monthly), +5 years (yearly). Always strictly after
/// the anchor.
pub fn default_end_date(recurrence: Recurrence, anchor: NaiveDate) -> NaiveDate {
    match recurrence {
        Recurrence::Daily | Recurrence::Custom => shift_month(anchor, 1),
        Recurrence::Weekly => shift_month(anchor, 3),
        Recurrence::Monthly => shift_year(anchor, 1),
        Recurrence::Yearly => shift_year(anchor, 5),
    }
}

fn shift_month(date: NaiveDate, months: i32) -> NaiveDate {
    let mut year = date.year();
    let mut month = date.month() as i32 + months;
    while month > 12 {
        month -= 12;
        year += 1;
    }
    while month < 1 {
        month += 12;
        year -= 1;
    }
    let day = date.day().min(days_in_month(year, month as u32));
    NaiveDate::from_ymd_opt(year, month as u32, day).unwrap_or(date)
}

fn shift_year(date: NaiveDate, years: i32) -> NaiveDate {
    let year = date.year() + years;
    let day = date.day().min(days_in_month(year, date.month()));
    NaiveDate::from_ymd_opt(year, date.month(), day).unwrap_or(date)
}

fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .map(|first_next| (first_next - Duration::days(1)).day())
        .unwrap_or(28)
}
