//! Cached metric engines.
//!
//! Each engine checks the cache, falls back to the async sources on a miss,
//! computes, caches, and returns. Failed reads abort the invocation without
//! caching anything; independent metrics contend only for their own keys.
//! There is no in-flight deduplication: two near-simultaneous misses for
//! the same key each recompute, and the second write wins harmlessly.

pub mod landing;
pub mod period;
pub mod trend;

pub use landing::LandingEngine;
pub use period::{PeriodEngine, PeriodStats, TimeFilter};
pub use trend::{BalanceTrendPoint, TrendEngine};

use crate::bank::{Account, Movement, PlannedMovement};
use crate::errors::CoreResult;
use crate::sources::{MovementsSource, PlannedSource};

/// Gathers the movements of every account in `accounts`, failing fast on
/// the first upstream error so partial data never reaches a cache write.
pub(crate) async fn all_movements(
    accounts: &[Account],
    source: &dyn MovementsSource,
) -> CoreResult<Vec<Movement>> {
    let mut movements = Vec::new();
    for account in accounts {
        movements.extend(source.movements_for_account(account.id).await?);
    }
    Ok(movements)
}

pub(crate) async fn all_planned(
    accounts: &[Account],
    source: &dyn PlannedSource,
) -> CoreResult<Vec<PlannedMovement>> {
    let mut planned = Vec::new();
    for account in accounts {
        planned.extend(source.planned_for_account(account.id).await?);
    }
    Ok(planned)
}
