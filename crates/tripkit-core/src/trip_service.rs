//! Trip metadata edits and the weather snapshot capture transition.

use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use tripkit_domain::{Coordinates, ForecastSeries, WeatherMode};

use crate::{CoreError, CoreResult, TripStore};

/// Partial update applied to a trip's metadata. `None` fields are left
/// untouched.
#[derive(Debug, Clone, Default)]
pub struct TripPatch {
    pub name: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub duration: Option<u32>,
    pub location_query: Option<String>,
    pub cover_image: Option<Option<String>>,
    pub coordinates: Option<Option<Coordinates>>,
    pub timezone: Option<String>,
    pub weather_mode: Option<WeatherMode>,
}

pub struct TripService;

impl TripService {
    /// Applies a metadata patch. Validation happens before any field is
    /// written, so a rejected patch leaves the trip untouched.
    pub fn update(store: &mut TripStore, trip_id: Uuid, patch: TripPatch) -> CoreResult<()> {
        let record = store.require(trip_id)?;

        if let Some(name) = patch.name.as_deref() {
            if name.trim().is_empty() {
                return Err(CoreError::Validation("trip name may not be blank".into()));
            }
        }
        if let Some(duration) = patch.duration {
            if duration < 1 {
                return Err(CoreError::Validation(
                    "trip duration must be at least one day".into(),
                ));
            }
            let max_day = record.itinerary.iter().map(|event| event.day).max();
            if let Some(max_day) = max_day {
                if duration < max_day {
                    return Err(CoreError::Validation(format!(
                        "duration {duration} would orphan itinerary events on day {max_day}"
                    )));
                }
            }
        }

        let record = store.require_mut(trip_id)?;
        let trip = &mut record.trip;
        if let Some(name) = patch.name {
            trip.name = name;
        }
        if let Some(start_date) = patch.start_date {
            trip.start_date = start_date;
        }
        if let Some(duration) = patch.duration {
            trip.duration = duration;
        }
        if let Some(location_query) = patch.location_query {
            trip.location_query = location_query;
        }
        if let Some(cover_image) = patch.cover_image {
            trip.cover_image = cover_image;
        }
        if let Some(timezone) = patch.timezone {
            trip.timezone = timezone;
        }
        if let Some(coordinates) = patch.coordinates {
            let changed = match (trip.coordinates, coordinates) {
                (Some(old), Some(new)) => old != new,
                (None, None) => false,
                _ => true,
            };
            trip.coordinates = coordinates;
            if changed {
                // A snapshot fetched for other coordinates is stale.
                trip.weather_snapshot = None;
                trip.weather_updated_at = None;
            }
        }
        if let Some(mode) = patch.weather_mode {
            if trip.weather_mode != mode {
                trip.weather_mode = mode;
                if mode == WeatherMode::Live {
                    trip.weather_snapshot = None;
                    trip.weather_updated_at = None;
                }
            }
        }
        trip.touch();
        Ok(())
    }

    /// Capture-once transition: stores a frozen forecast on a fixed-mode
    /// trip that has none yet. A second capture is a no-op.
    pub fn capture_weather_snapshot(
        store: &mut TripStore,
        trip_id: Uuid,
        series: ForecastSeries,
        fetched_at: DateTime<Utc>,
    ) -> CoreResult<()> {
        let record = store.require(trip_id)?;
        if record.trip.weather_mode != WeatherMode::Fixed {
            return Err(CoreError::InvariantViolation(
                "snapshot capture requires fixed weather mode".into(),
            ));
        }
        if record.trip.weather_snapshot.is_some() {
            return Ok(());
        }
        if series.is_empty() || !series.is_consistent() {
            return Err(CoreError::Validation(
                "forecast series is empty or has ragged arrays".into(),
            ));
        }
        if series.dates[0] != record.trip.start_date {
            return Err(CoreError::Validation(
                "forecast series is not aligned to the trip start date".into(),
            ));
        }
        let record = store.require_mut(trip_id)?;
        record.trip.weather_snapshot = Some(series);
        record.trip.weather_updated_at = Some(fetched_at);
        record.trip.touch();
        tracing::debug!(trip = %trip_id, "weather snapshot captured");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn series_from(start: NaiveDate, days: u32) -> ForecastSeries {
        let dates: Vec<NaiveDate> = (0..days)
            .map(|offset| start + chrono::Duration::days(offset as i64))
            .collect();
        let len = dates.len();
        ForecastSeries {
            dates,
            daily_high: vec![20.0; len],
            daily_low: vec![10.0; len],
            feels_like_high: vec![19.0; len],
            weather_code: vec![0; len],
            precipitation_probability: Some(vec![10.0; len]),
        }
    }

    #[test]
    fn shrinking_duration_below_event_days_is_rejected() {
        let mut store = TripStore::new();
        let trip_id = store.active_trip_id();
        let event = tripkit_domain::ItineraryEvent::new(
            4,
            chrono::NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            "Fish market",
        );
        crate::ItineraryService::upsert(&mut store, trip_id, event).unwrap();

        let patch = TripPatch {
            duration: Some(2),
            ..TripPatch::default()
        };
        assert!(matches!(
            TripService::update(&mut store, trip_id, patch),
            Err(CoreError::Validation(_))
        ));
        assert_eq!(store.record(trip_id).unwrap().trip.duration, 5);
    }

    #[test]
    fn switching_to_live_discards_snapshot() {
        let mut store = TripStore::new();
        let trip_id = store.active_trip_id();
        let start = store.record(trip_id).unwrap().trip.start_date;
        TripService::update(
            &mut store,
            trip_id,
            TripPatch {
                weather_mode: Some(WeatherMode::Fixed),
                ..TripPatch::default()
            },
        )
        .unwrap();
        TripService::capture_weather_snapshot(&mut store, trip_id, series_from(start, 5), Utc::now())
            .unwrap();
        assert!(store.record(trip_id).unwrap().trip.weather_snapshot.is_some());

        TripService::update(
            &mut store,
            trip_id,
            TripPatch {
                weather_mode: Some(WeatherMode::Live),
                ..TripPatch::default()
            },
        )
        .unwrap();
        assert!(store.record(trip_id).unwrap().trip.weather_snapshot.is_none());
    }

    #[test]
    fn capture_is_once_only() {
        let mut store = TripStore::new();
        let trip_id = store.active_trip_id();
        let start = store.record(trip_id).unwrap().trip.start_date;
        TripService::update(
            &mut store,
            trip_id,
            TripPatch {
                weather_mode: Some(WeatherMode::Fixed),
                ..TripPatch::default()
            },
        )
        .unwrap();

        let first = series_from(start, 5);
        TripService::capture_weather_snapshot(&mut store, trip_id, first.clone(), Utc::now())
            .unwrap();
        let mut second = series_from(start, 5);
        second.daily_high = vec![30.0; 5];
        TripService::capture_weather_snapshot(&mut store, trip_id, second, Utc::now()).unwrap();

        let kept = store
            .record(trip_id)
            .unwrap()
            .trip
            .weather_snapshot
            .clone()
            .unwrap();
        assert_eq!(kept, first);
    }

    #[test]
    fn capture_in_live_mode_is_an_invariant_violation() {
        let mut store = TripStore::new();
        let trip_id = store.active_trip_id();
        let start = store.record(trip_id).unwrap().trip.start_date;
        assert!(matches!(
            TripService::capture_weather_snapshot(&mut store, trip_id, series_from(start, 5), Utc::now()),
            Err(CoreError::InvariantViolation(_))
        ));
    }

    #[test]
    fn changing_coordinates_invalidates_snapshot() {
        let mut store = TripStore::new();
        let trip_id = store.active_trip_id();
        let start = store.record(trip_id).unwrap().trip.start_date;
        TripService::update(
            &mut store,
            trip_id,
            TripPatch {
                coordinates: Some(Some(Coordinates::new(43.06, 141.35))),
                weather_mode: Some(WeatherMode::Fixed),
                ..TripPatch::default()
            },
        )
        .unwrap();
        TripService::capture_weather_snapshot(&mut store, trip_id, series_from(start, 5), Utc::now())
            .unwrap();

        TripService::update(
            &mut store,
            trip_id,
            TripPatch {
                coordinates: Some(Some(Coordinates::new(35.01, 135.76))),
                ..TripPatch::default()
            },
        )
        .unwrap();
        assert!(store.record(trip_id).unwrap().trip.weather_snapshot.is_none());
    }
}
