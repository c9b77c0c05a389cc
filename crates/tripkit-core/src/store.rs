//! Normalized multi-trip store. Each record owns a trip plus its dependent
//! collections; one record is active at a time.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use tripkit_domain::{Expense, ItineraryEvent, PackingItem, Trip};

use crate::{CoreError, CoreResult};

const DEFAULT_TRIP_NAME: &str = "New Trip";

/// A trip together with the collections it owns. Deleting the trip removes
/// the whole record atomically.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripRecord {
    pub trip: Trip,
    #[serde(default)]
    pub itinerary: Vec<ItineraryEvent>,
    #[serde(default)]
    pub packing: Vec<PackingItem>,
    #[serde(default)]
    pub expenses: Vec<Expense>,
}

impl TripRecord {
    pub fn new(trip: Trip) -> Self {
        Self {
            trip,
            itinerary: Vec::new(),
            packing: Vec::new(),
            expenses: Vec::new(),
        }
    }
}

/// Keyed trip collection in insertion order, plus the active trip id.
///
/// Invariant: the store always holds at least one record, and `active`
/// always names one of them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripStore {
    records: Vec<TripRecord>,
    active: Uuid,
}

impl TripStore {
    /// Builds a store seeded with one default trip, which becomes active.
    pub fn new() -> Self {
        let trip = Trip::new(DEFAULT_TRIP_NAME);
        let active = trip.id;
        Self {
            records: vec![TripRecord::new(trip)],
            active,
        }
    }

    /// Restores a store from persisted parts, re-establishing invariants:
    /// an empty record list gains a default trip, and an unknown active id
    /// falls back to the first record.
    pub fn from_parts(records: Vec<TripRecord>, active: Uuid) -> Self {
        let mut store = if records.is_empty() {
            Self::new()
        } else {
            Self {
                records,
                active,
            }
        };
        if store.record(store.active).is_none() {
            store.active = store.records[0].trip.id;
        }
        store
    }

    pub fn active_trip_id(&self) -> Uuid {
        self.active
    }

    pub fn active_record(&self) -> &TripRecord {
        self.record(self.active)
            .expect("active id always names a record")
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> impl Iterator<Item = &TripRecord> {
        self.records.iter()
    }

    pub fn record(&self, trip_id: Uuid) -> Option<&TripRecord> {
        self.records.iter().find(|record| record.trip.id == trip_id)
    }

    pub(crate) fn record_mut(&mut self, trip_id: Uuid) -> Option<&mut TripRecord> {
        self.records
            .iter_mut()
            .find(|record| record.trip.id == trip_id)
    }

    pub(crate) fn require(&self, trip_id: Uuid) -> CoreResult<&TripRecord> {
        self.record(trip_id)
            .ok_or_else(|| CoreError::NotFound(format!("trip {trip_id}")))
    }

    pub(crate) fn require_mut(&mut self, trip_id: Uuid) -> CoreResult<&mut TripRecord> {
        self.record_mut(trip_id)
            .ok_or_else(|| CoreError::NotFound(format!("trip {trip_id}")))
    }

    /// Allocates a fresh trip with empty collections and marks it active.
    /// Never fails.
    pub fn create_trip(&mut self, name: impl Into<String>) -> Uuid {
        let trip = Trip::new(name);
        let id = trip.id;
        self.records.push(TripRecord::new(trip));
        self.active = id;
        tracing::debug!(trip = %id, "trip created");
        id
    }

    /// Removes a trip and its collections. Rejected while it is the only
    /// remaining trip. Deleting the active trip activates the first
    /// remaining record in insertion order.
    pub fn delete_trip(&mut self, trip_id: Uuid) -> CoreResult<()> {
        self.require(trip_id)?;
        if self.records.len() == 1 {
            return Err(CoreError::InvariantViolation(
                "cannot delete the last remaining trip".into(),
            ));
        }
        self.records.retain(|record| record.trip.id != trip_id);
        if self.active == trip_id {
            self.active = self.records[0].trip.id;
        }
        tracing::debug!(trip = %trip_id, "trip deleted");
        Ok(())
    }

    pub fn set_active_trip(&mut self, trip_id: Uuid) -> CoreResult<()> {
        self.require(trip_id)?;
        self.active = trip_id;
        Ok(())
    }
}

impl Default for TripStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_store_holds_one_active_trip() {
        let store = TripStore::new();
        assert_eq!(store.len(), 1);
        assert_eq!(store.active_record().trip.name, DEFAULT_TRIP_NAME);
    }

    #[test]
    fn create_trip_activates_it() {
        let mut store = TripStore::new();
        let id = store.create_trip("Hokkaido");
        assert_eq!(store.active_trip_id(), id);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn deleting_last_trip_is_rejected() {
        let mut store = TripStore::new();
        let only = store.active_trip_id();
        assert!(matches!(
            store.delete_trip(only),
            Err(CoreError::InvariantViolation(_))
        ));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn deleting_active_trip_activates_first_remaining() {
        let mut store = TripStore::new();
        let first = store.active_trip_id();
        let second = store.create_trip("Osaka");
        assert_eq!(store.active_trip_id(), second);
        store.delete_trip(second).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.active_trip_id(), first);
    }

    #[test]
    fn from_parts_repairs_unknown_active_id() {
        let store = TripStore::new();
        let records: Vec<TripRecord> = store.records().cloned().collect();
        let repaired = TripStore::from_parts(records.clone(), Uuid::new_v4());
        assert_eq!(repaired.active_trip_id(), records[0].trip.id);
    }
}
