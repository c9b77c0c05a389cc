//! Persistence seam. Saving is a pure function of store state: writing the
//! same state twice is a no-op from the consumer's perspective.

use std::path::{Path, PathBuf};

use crate::{CoreError, TripStore};

/// Describes a persisted backup artifact for the store.
#[derive(Debug, Clone)]
pub struct StoreBackupInfo {
    pub id: String,
    pub created_at: String,
    pub path: PathBuf,
}

/// Abstraction over persistence backends capable of storing the trip store
/// and its backups.
pub trait StoreStorage: Send + Sync {
    fn save_store(&self, store: &TripStore) -> Result<(), CoreError>;
    fn load_store(&self) -> Result<TripStore, CoreError>;
    fn save_store_to_path(&self, store: &TripStore, path: &Path) -> Result<(), CoreError>;
    fn load_store_from_path(&self, path: &Path) -> Result<TripStore, CoreError>;
    fn backup_store(&self, store: &TripStore, note: Option<&str>)
        -> Result<StoreBackupInfo, CoreError>;
    fn list_backups(&self) -> Result<Vec<StoreBackupInfo>, CoreError>;
    fn restore_backup(&self, backup: &StoreBackupInfo) -> Result<TripStore, CoreError>;
}

/// Detects dangling references and other anomalies within a store snapshot.
/// Warnings are advisory; the ledger and binder tolerate all of them.
pub fn store_warnings(store: &TripStore) -> Vec<String> {
    let mut warnings = Vec::new();
    for record in store.records() {
        let trip = &record.trip;
        for event in &record.itinerary {
            if event.day < 1 || event.day > trip.duration {
                warnings.push(format!(
                    "event {} on trip `{}` has day {} outside 1..={}",
                    event.id, trip.name, event.day, trip.duration
                ));
            }
        }
        for expense in &record.expenses {
            if !expense.amount.is_finite() || expense.amount < 0.0 {
                warnings.push(format!(
                    "expense {} on trip `{}` has invalid amount {}",
                    expense.id, trip.name, expense.amount
                ));
            }
            if !expense.payer.is_empty() && !trip.has_member(&expense.payer) {
                warnings.push(format!(
                    "expense {} on trip `{}` references unknown payer `{}`",
                    expense.id, trip.name, expense.payer
                ));
            }
            for involved in &expense.involved {
                if !trip.has_member(involved) {
                    warnings.push(format!(
                        "expense {} on trip `{}` involves unknown member `{}`",
                        expense.id, trip.name, involved
                    ));
                }
            }
        }
        if let Some(snapshot) = trip.weather_snapshot.as_ref() {
            if !snapshot.is_consistent() {
                warnings.push(format!(
                    "trip `{}` carries a ragged weather snapshot",
                    trip.name
                ));
            }
        }
    }
    warnings
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_store_has_no_warnings() {
        let store = TripStore::new();
        assert!(store_warnings(&store).is_empty());
    }

    #[test]
    fn invalid_amounts_are_flagged() {
        use chrono::{NaiveDate, NaiveTime};
        use tripkit_domain::Expense;

        let mut store = TripStore::new();
        let trip_id = store.active_trip_id();
        let record = store.require_mut(trip_id).unwrap();
        record.trip.members.push("A".to_string());
        record.expenses.push(Expense::new(
            "Refund gone wrong",
            -50.0,
            "A",
            vec!["A".to_string()],
            NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
        ));

        let warnings = store_warnings(&store);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("invalid amount"));
    }
}
