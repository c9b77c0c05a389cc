//! tripkit-core
//!
//! Business logic for the travel planner: the normalized trip store with its
//! cascade rules, the expense-settlement engine, itinerary day ordering, and
//! the weather/day binder. Depends on tripkit-domain. No terminal I/O, no
//! direct storage, no network.

pub mod error;
pub mod expense_service;
pub mod itinerary;
pub mod ledger;
pub mod member_service;
pub mod packing_service;
pub mod storage;
pub mod store;
pub mod tag_service;
pub mod trip_service;
pub mod weather;

pub use error::{CoreError, CoreResult};
pub use expense_service::ExpenseService;
pub use itinerary::{ItineraryIndex, ItineraryService};
pub use ledger::{Balances, ExpenseLedger, MemberStats, SettlementDirection, SettlementEntry};
pub use member_service::MemberService;
pub use packing_service::PackingService;
pub use storage::{store_warnings, StoreBackupInfo, StoreStorage};
pub use store::{TripRecord, TripStore};
pub use tag_service::TagService;
pub use trip_service::{TripPatch, TripService};
pub use weather::{
    packing_tips, ConditionCategory, DayWeather, WeatherBinder, WeatherBinding, PROVIDER_MAX_DAYS,
};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes the global tracing subscriber with sensible defaults.
pub fn init() {
    INIT_TRACING.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter =
            EnvFilter::from_default_env().add_directive("tripkit_core=info".parse().unwrap());

        fmt().with_env_filter(filter).init();
        tracing::info!("tripkit core tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
    }
}
