//! Explicit refresh channel.
//!
//! Mutation sites dispatch a [`RefreshEvent`] here instead of poking a
//! globally shared callback. The hub applies the cache invalidation
//! contract for the event and then notifies every registered observer, so
//! presentation code can refetch whatever it is showing.

use std::sync::{Arc, Mutex};

use chrono::{Datelike, NaiveDate};
use uuid::Uuid;

use crate::bank::MovementType;
use crate::cache::{keys, DataCache};

/// A mutation somewhere upstream that cached metrics may depend on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshEvent {
    /// A movement was created, updated, or deleted.
    MovementChanged {
        user_id: Uuid,
        movement_type: MovementType,
        date: NaiveDate,
    },
    /// A planned movement was created, updated, or deleted.
    PlannedChanged { user_id: Uuid, date: NaiveDate },
    /// An account was created, updated, or deleted.
    AccountChanged { user_id: Uuid },
    /// The user's session ended; drop everything cached for them.
    UserLoggedOut { user_id: Uuid },
}

type Observer = Box<dyn Fn(&RefreshEvent) + Send + Sync>;

/// Invalidation + notification fan-out around one [`DataCache`] instance.
pub struct RefreshHub {
    cache: Arc<DataCache>,
    observers: Mutex<Vec<Observer>>,
}

impl RefreshHub {
    pub fn new(cache: Arc<DataCache>) -> Self {
        Self {
            cache,
            observers: Mutex::new(Vec::new()),
        }
    }

    /// Registers an observer invoked after each dispatch's invalidation.
    pub fn subscribe<F>(&self, observer: F)
    where
        F: Fn(&RefreshEvent) + Send + Sync + 'static,
    {
        self.observers.lock().unwrap().push(Box::new(observer));
    }

    /// Applies the invalidation contract for `event`, then notifies
    /// observers.
    pub fn dispatch(&self, event: RefreshEvent) {
        self.invalidate_for(&event);
        tracing::debug!(?event, "refresh event dispatched");
        for observer in self.observers.lock().unwrap().iter() {
            observer(&event);
        }
    }

    fn invalidate_for(&self, event: &RefreshEvent) {
        match *event {
            RefreshEvent::MovementChanged {
                user_id,
                movement_type,
                date,
            } => {
                let month_key = match movement_type {
                    MovementType::Income => {
                        keys::month_income(user_id, date.year(), date.month())
                    }
                    MovementType::Expense => {
                        keys::month_expenses(user_id, date.year(), date.month())
                    }
                };
                self.cache.invalidate(&[&month_key]);
                self.cache.invalidate_pattern(&keys::balance_related(user_id));
            }
            RefreshEvent::PlannedChanged { user_id, date } => {
                let upcoming = keys::upcoming_planned(user_id, date.year(), date.month());
                self.cache.invalidate(&[&upcoming]);
                self.cache.invalidate_pattern(&keys::balance_related(user_id));
            }
            RefreshEvent::AccountChanged { user_id } => {
                self.cache.invalidate_pattern(&keys::balance_related(user_id));
            }
            RefreshEvent::UserLoggedOut { user_id } => {
                self.cache.invalidate_pattern(&keys::all_for_user(user_id));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn seeded_cache(user: Uuid) -> Arc<DataCache> {
        let cache = Arc::new(DataCache::new());
        cache.set(&keys::total_balance(user), &100.0);
        cache.set(&keys::balance_trend(user), &vec![1.0, 2.0]);
        cache.set(&keys::month_income(user, 2026, 8), &50.0);
        cache.set(&keys::month_expenses(user, 2026, 8), &20.0);
        cache.set(&keys::upcoming_planned(user, 2026, 8), &vec![1u32]);
        cache
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn movement_change_drops_month_bucket_and_balance_keys() {
        let user = Uuid::new_v4();
        let cache = seeded_cache(user);
        let hub = RefreshHub::new(cache.clone());

        hub.dispatch(RefreshEvent::MovementChanged {
            user_id: user,
            movement_type: MovementType::Income,
            date: date(2026, 8, 29),
        });

        assert_eq!(cache.get::<f64>(&keys::total_balance(user)), None);
        assert_eq!(cache.get::<Vec<f64>>(&keys::balance_trend(user)), None);
        assert_eq!(cache.get::<f64>(&keys::month_income(user, 2026, 8)), None);
        // The other month bucket and the planned listing survive.
        assert_eq!(
            cache.get::<f64>(&keys::month_expenses(user, 2026, 8)),
            Some(20.0)
        );
        assert_eq!(
            cache.get::<Vec<u32>>(&keys::upcoming_planned(user, 2026, 8)),
            Some(vec![1])
        );
    }

    #[test]
    fn planned_change_drops_upcoming_and_balance_keys() {
        let user = Uuid::new_v4();
        let cache = seeded_cache(user);
        let hub = RefreshHub::new(cache.clone());

        hub.dispatch(RefreshEvent::PlannedChanged {
            user_id: user,
            date: date(2026, 8, 10),
        });

        assert_eq!(
            cache.get::<Vec<u32>>(&keys::upcoming_planned(user, 2026, 8)),
            None
        );
        assert_eq!(cache.get::<Vec<f64>>(&keys::balance_trend(user)), None);
        assert_eq!(cache.get::<f64>(&keys::month_income(user, 2026, 8)), Some(50.0));
    }

    #[test]
    fn logout_clears_the_users_namespace_only() {
        let user = Uuid::new_v4();
        let other = Uuid::new_v4();
        let cache = seeded_cache(user);
        cache.set(&keys::total_balance(other), &7.0);
        let hub = RefreshHub::new(cache.clone());

        hub.dispatch(RefreshEvent::UserLoggedOut { user_id: user });

        assert_eq!(cache.stats().keys, vec![keys::total_balance(other)]);
    }

    #[test]
    fn observers_run_after_invalidation() {
        let user = Uuid::new_v4();
        let cache = seeded_cache(user);
        let hub = RefreshHub::new(cache.clone());
        let calls = Arc::new(AtomicUsize::new(0));

        let seen = calls.clone();
        let probe = cache.clone();
        hub.subscribe(move |_event| {
            // By the time observers fire the keys are already gone.
            assert_eq!(probe.get::<f64>(&keys::total_balance(user)), None);
            seen.fetch_add(1, Ordering::SeqCst);
        });

        hub.dispatch(RefreshEvent::AccountChanged { user_id: user });
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
