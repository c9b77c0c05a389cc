//! Itinerary ordering: day filtering, explicit within-day reorder, and the
//! date-to-day resolution used by date edits.

use chrono::{Duration, NaiveDate};
use uuid::Uuid;

use tripkit_domain::ItineraryEvent;

use crate::{CoreError, CoreResult, TripStore};

/// Pure ordering helpers over an event collection.
pub struct ItineraryIndex;

impl ItineraryIndex {
    /// Events assigned to `day`, in collection (insertion/reorder) order.
    pub fn events_for_day(events: &[ItineraryEvent], day: u32) -> Vec<&ItineraryEvent> {
        events.iter().filter(|event| event.day == day).collect()
    }

    /// Moves the element at `from_index` within the day's filtered view to
    /// `to_index`, then merges untouched other-day events back in their
    /// original relative order. Out-of-range indices are a silent no-op.
    pub fn reorder_within_day(
        events: &mut Vec<ItineraryEvent>,
        day: u32,
        from_index: usize,
        to_index: usize,
    ) {
        let day_count = events.iter().filter(|event| event.day == day).count();
        if from_index >= day_count || to_index >= day_count {
            return;
        }

        let mut day_events = Vec::with_capacity(day_count);
        let mut others = Vec::with_capacity(events.len() - day_count);
        for event in events.drain(..) {
            if event.day == day {
                day_events.push(event);
            } else {
                others.push(event);
            }
        }
        let moved = day_events.remove(from_index);
        day_events.insert(to_index, moved);

        others.extend(day_events);
        *events = others;
    }

    /// Maps a calendar date to a 1-based trip day. Day 1 is the start date;
    /// dates before the start resolve to zero or negative values, which the
    /// caller rejects.
    pub fn resolve_day_from_date(start_date: NaiveDate, candidate: NaiveDate) -> i64 {
        (candidate - start_date).num_days() + 1
    }

    /// Inverse of [`resolve_day_from_date`] for 1-based days.
    pub fn trip_date_for_day(start_date: NaiveDate, day: u32) -> NaiveDate {
        start_date + Duration::days(day.max(1) as i64 - 1)
    }
}

/// Store-facing itinerary CRUD.
pub struct ItineraryService;

impl ItineraryService {
    /// Inserts the event, or replaces it in place when the id already
    /// exists. The day must fall inside the trip's duration.
    pub fn upsert(store: &mut TripStore, trip_id: Uuid, event: ItineraryEvent) -> CoreResult<()> {
        let record = store.require(trip_id)?;
        if event.day < 1 || event.day > record.trip.duration {
            return Err(CoreError::Validation(format!(
                "event day {} is outside 1..={}",
                event.day, record.trip.duration
            )));
        }
        if event.title.trim().is_empty() {
            return Err(CoreError::Validation("event title may not be blank".into()));
        }

        let record = store.require_mut(trip_id)?;
        match record.itinerary.iter_mut().find(|existing| existing.id == event.id) {
            Some(existing) => *existing = event,
            None => record.itinerary.push(event),
        }
        record.trip.touch();
        Ok(())
    }

    pub fn delete(store: &mut TripStore, trip_id: Uuid, event_id: Uuid) -> CoreResult<()> {
        let record = store.require_mut(trip_id)?;
        let before = record.itinerary.len();
        record.itinerary.retain(|event| event.id != event_id);
        if record.itinerary.len() == before {
            return Err(CoreError::NotFound(format!("itinerary event {event_id}")));
        }
        record.trip.touch();
        Ok(())
    }

    /// Explicit manual reorder inside one day's view. Silent no-op on bad
    /// indices, by contract.
    pub fn reorder(
        store: &mut TripStore,
        trip_id: Uuid,
        day: u32,
        from_index: usize,
        to_index: usize,
    ) -> CoreResult<()> {
        let record = store.require_mut(trip_id)?;
        ItineraryIndex::reorder_within_day(&mut record.itinerary, day, from_index, to_index);
        record.trip.touch();
        Ok(())
    }

    /// Date edit: recomputes the event's day from the candidate date and
    /// rejects dates that fall outside the trip instead of clamping.
    pub fn move_to_date(
        store: &mut TripStore,
        trip_id: Uuid,
        event_id: Uuid,
        candidate: NaiveDate,
    ) -> CoreResult<u32> {
        let record = store.require(trip_id)?;
        let day = ItineraryIndex::resolve_day_from_date(record.trip.start_date, candidate);
        if day < 1 || day > record.trip.duration as i64 {
            return Err(CoreError::Validation(format!(
                "date {candidate} resolves to day {day}, outside 1..={}",
                record.trip.duration
            )));
        }
        let day = day as u32;

        let record = store.require_mut(trip_id)?;
        let event = record
            .itinerary
            .iter_mut()
            .find(|event| event.id == event_id)
            .ok_or_else(|| CoreError::NotFound(format!("itinerary event {event_id}")))?;
        event.day = day;
        record.trip.touch();
        Ok(day)
    }
}
