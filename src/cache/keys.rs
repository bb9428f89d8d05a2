//! Cache key builders and invalidation patterns.
//!
//! The key namespace is `<domain>:<metric>:<userId>[:<extraDimensions>]`
//! and must stay stable: the invalidation contract in [`crate::refresh`]
//! matches on these exact strings.

use regex::Regex;
use uuid::Uuid;

use crate::metrics::period::TimeFilter;

pub fn total_balance(user_id: Uuid) -> String {
    format!("landing:total-balance:{user_id}")
}

pub fn month_income(user_id: Uuid, year: i32, month: u32) -> String {
    format!("landing:month-income:{user_id}:{year}-{month}")
}

pub fn month_expenses(user_id: Uuid, year: i32, month: u32) -> String {
    format!("landing:month-expenses:{user_id}:{year}-{month}")
}

pub fn balance_trend(user_id: Uuid) -> String {
    format!("landing:balance-trend:{user_id}")
}

pub fn landing_stats(user_id: Uuid) -> String {
    format!("landing:stats:{user_id}")
}

pub fn upcoming_planned(user_id: Uuid, year: i32, month: u32) -> String {
    format!("planned:upcoming:{user_id}:{year}-{month}")
}

/// Month-granular for every filter, including week and year. A known
/// limitation carried over from the consuming dashboard; callers rely on
/// the current shape.
pub fn period_stats(user_id: Uuid, filter: TimeFilter, year: i32, month: u32) -> String {
    format!("analytics:stats:{user_id}:{}:{year}-{month}", filter.as_str())
}

/// Every key whose value depends on account balances: total balance,
/// balance trend, and the landing aggregate. The month-bucketed
/// income/expense keys are invalidated individually, by the mutated
/// movement's type and date.
pub fn balance_related(user_id: Uuid) -> Regex {
    Regex::new(&format!(
        "^landing:(total-balance|balance-trend|stats):{user_id}"
    ))
    .expect("static pattern")
}

/// Everything cached for one user, across all namespaces. Used on logout.
pub fn all_for_user(user_id: Uuid) -> Regex {
    Regex::new(&format!(
        "^(landing|planned|analytics):[a-z-]+:{user_id}"
    ))
    .expect("static pattern")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn balance_related_matches_balance_keys_only() {
        let user = Uuid::new_v4();
        let pattern = balance_related(user);
        assert!(pattern.is_match(&total_balance(user)));
        assert!(pattern.is_match(&balance_trend(user)));
        assert!(pattern.is_match(&landing_stats(user)));
        assert!(!pattern.is_match(&month_income(user, 2026, 8)));
        assert!(!pattern.is_match(&upcoming_planned(user, 2026, 8)));
        assert!(!pattern.is_match(&total_balance(Uuid::new_v4())));
    }

    #[test]
    fn all_for_user_covers_every_namespace() {
        let user = Uuid::new_v4();
        let pattern = all_for_user(user);
        assert!(pattern.is_match(&total_balance(user)));
        assert!(pattern.is_match(&upcoming_planned(user, 2026, 8)));
        assert!(pattern.is_match(&period_stats(user, TimeFilter::Week, 2026, 8)));
        assert!(!pattern.is_match(&total_balance(Uuid::new_v4())));
    }
}
