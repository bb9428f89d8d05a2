#![doc(test(attr(deny(warnings))))]

//! Beehive Core holds the projection and caching engines behind the
//! personal-finance dashboard: the TTL cache, the balance trend
//! reconstructor/projector, the period aggregator, the recurrence
//! scheduler, and the category suggestion scorer. Entity snapshots are
//! fetched through the async source traits in [`sources`]; nothing here
//! renders or persists anything of its own.

pub mod bank;
pub mod cache;
pub mod errors;
pub mod metrics;
pub mod refresh;
pub mod schedule;
pub mod sources;
pub mod suggest;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Beehive Core tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
    }
}
