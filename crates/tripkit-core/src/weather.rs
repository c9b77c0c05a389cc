//! Weather/day binding: resolves one forecast entry for the selected
//! itinerary day, in live or frozen-snapshot mode, and derives
//! packing-relevant advisories.

use tripkit_domain::{ForecastSeries, Trip, WeatherMode};

/// The provider serves at most this many daily entries per fetch. A single
/// multi-day fetch covers the whole trip up to this cap; switching the
/// selected day only re-indexes the fetched series.
pub const PROVIDER_MAX_DAYS: u32 = 16;

const COLD_THRESHOLD: f64 = 10.0;
const VERY_COLD_THRESHOLD: f64 = 5.0;

/// Fixed classification of provider weather codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConditionCategory {
    Clear,
    PartlyCloudy,
    Overcast,
    Fog,
    Rain,
    Snow,
    Thunderstorm,
    Variable,
}

impl ConditionCategory {
    /// Maps a provider weather code through the fixed table.
    pub fn from_code(code: u16) -> Self {
        match code {
            0 => Self::Clear,
            1 | 2 => Self::PartlyCloudy,
            3 => Self::Overcast,
            45 | 48 => Self::Fog,
            51 | 53 | 55 | 61 | 63 | 65 => Self::Rain,
            71 | 73 | 75 | 77 | 85 | 86 => Self::Snow,
            95 | 96 | 99 => Self::Thunderstorm,
            _ => Self::Variable,
        }
    }
}

/// Forecast values bound to one itinerary day.
#[derive(Debug, Clone, PartialEq)]
pub struct DayWeather {
    pub high_temp: f64,
    pub low_temp: f64,
    pub feels_like_high: f64,
    pub precipitation_probability: Option<f64>,
    pub condition: ConditionCategory,
    /// Present only for live data; snapshots never carry a current reading.
    pub current_temp: Option<f64>,
}

/// Outcome of binding a day to weather data. Missing coordinates or a
/// missing series is an explicit unavailable state, never an error.
#[derive(Debug, Clone, PartialEq)]
pub enum WeatherBinding {
    Unavailable,
    Ready(DayWeather),
}

pub struct WeatherBinder;

impl WeatherBinder {
    /// Number of days a live fetch should request for the trip.
    pub fn forecast_day_count(duration: u32) -> u32 {
        duration.clamp(1, PROVIDER_MAX_DAYS)
    }

    /// True when a completed live fetch should be frozen into the trip:
    /// fixed mode configured but no snapshot captured yet.
    pub fn should_capture_snapshot(trip: &Trip) -> bool {
        trip.weather_mode == WeatherMode::Fixed && trip.weather_snapshot.is_none()
    }

    /// Binds `selected_day` (1-based) to a forecast entry.
    ///
    /// Fixed mode reads the stored snapshot and never consults `live`;
    /// days beyond the snapshot clamp to its last entry. Live mode indexes
    /// the supplied series the same way. No coordinates, or no data to
    /// index, yields [`WeatherBinding::Unavailable`].
    pub fn bind(
        trip: &Trip,
        selected_day: u32,
        live: Option<&ForecastSeries>,
        current_temp: Option<f64>,
    ) -> WeatherBinding {
        if trip.coordinates.is_none() {
            return WeatherBinding::Unavailable;
        }

        if trip.weather_mode == WeatherMode::Fixed {
            if let Some(snapshot) = trip.weather_snapshot.as_ref() {
                if !snapshot.is_empty() {
                    return Self::bind_series(snapshot, selected_day, None);
                }
            }
            // Fixed mode without a snapshot falls through to live data so
            // the capture-once fetch can still render something.
        }

        match live {
            Some(series) if !series.is_empty() => {
                Self::bind_series(series, selected_day, current_temp)
            }
            _ => WeatherBinding::Unavailable,
        }
    }

    fn bind_series(
        series: &ForecastSeries,
        selected_day: u32,
        current_temp: Option<f64>,
    ) -> WeatherBinding {
        let index = (selected_day.max(1) as usize - 1).min(series.len() - 1);
        match series.entry(index) {
            Some(entry) => WeatherBinding::Ready(DayWeather {
                high_temp: entry.high,
                low_temp: entry.low,
                feels_like_high: entry.feels_like_high,
                precipitation_probability: entry.precipitation_probability,
                condition: ConditionCategory::from_code(entry.weather_code),
                current_temp,
            }),
            None => WeatherBinding::Unavailable,
        }
    }
}

/// Maps bound weather to advisory strings for the packing list. Thresholds
/// are fixed constants.
pub fn packing_tips(weather: &DayWeather) -> Vec<String> {
    let mut tips = Vec::new();
    if weather.high_temp <= COLD_THRESHOLD {
        tips.push("Cold day: pack a heavy coat and thermal layers".to_string());
    }
    if weather.high_temp <= VERY_COLD_THRESHOLD {
        tips.push("Very cold: gloves, scarf, beanie, and hand warmers".to_string());
    }
    match weather.condition {
        ConditionCategory::Rain | ConditionCategory::Thunderstorm => {
            tips.push("Rain likely: bring an umbrella or rain jacket".to_string());
        }
        ConditionCategory::Snow => {
            tips.push("Snow likely: non-slip shoes, warm socks, hand warmers".to_string());
        }
        _ => {}
    }
    tips
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use tripkit_domain::Coordinates;

    fn series(days: usize) -> ForecastSeries {
        let start = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        ForecastSeries {
            dates: (0..days)
                .map(|offset| start + chrono::Duration::days(offset as i64))
                .collect(),
            daily_high: (0..days).map(|day| 10.0 + day as f64).collect(),
            daily_low: vec![5.0; days],
            feels_like_high: vec![9.0; days],
            weather_code: vec![61; days],
            precipitation_probability: Some(vec![70.0; days]),
        }
    }

    fn trip_at(coords: Option<Coordinates>) -> Trip {
        let mut trip = Trip::new("Test");
        trip.start_date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        trip.coordinates = coords;
        trip
    }

    #[test]
    fn classification_table_matches_provider_codes() {
        assert_eq!(ConditionCategory::from_code(0), ConditionCategory::Clear);
        assert_eq!(ConditionCategory::from_code(2), ConditionCategory::PartlyCloudy);
        assert_eq!(ConditionCategory::from_code(3), ConditionCategory::Overcast);
        assert_eq!(ConditionCategory::from_code(48), ConditionCategory::Fog);
        assert_eq!(ConditionCategory::from_code(63), ConditionCategory::Rain);
        assert_eq!(ConditionCategory::from_code(86), ConditionCategory::Snow);
        assert_eq!(ConditionCategory::from_code(99), ConditionCategory::Thunderstorm);
        assert_eq!(ConditionCategory::from_code(42), ConditionCategory::Variable);
    }

    #[test]
    fn missing_coordinates_is_unavailable_not_error() {
        let trip = trip_at(None);
        let data = series(5);
        assert_eq!(
            WeatherBinder::bind(&trip, 1, Some(&data), None),
            WeatherBinding::Unavailable
        );
    }

    #[test]
    fn live_mode_indexes_fetched_series_by_day() {
        let trip = trip_at(Some(Coordinates::new(43.06, 141.35)));
        let data = series(5);
        match WeatherBinder::bind(&trip, 3, Some(&data), Some(12.5)) {
            WeatherBinding::Ready(weather) => {
                assert!((weather.high_temp - 12.0).abs() < f64::EPSILON);
                assert_eq!(weather.current_temp, Some(12.5));
                assert_eq!(weather.condition, ConditionCategory::Rain);
            }
            other => panic!("expected bound weather, got {other:?}"),
        }
    }

    #[test]
    fn fixed_mode_reads_snapshot_and_clamps() {
        let mut trip = trip_at(Some(Coordinates::new(43.06, 141.35)));
        trip.weather_mode = WeatherMode::Fixed;
        trip.weather_snapshot = Some(series(3));
        trip.weather_updated_at = Some(Utc::now());
        trip.duration = 7;

        // Day 7 exceeds the 3-entry snapshot: clamp to the last entry.
        match WeatherBinder::bind(&trip, 7, None, Some(99.0)) {
            WeatherBinding::Ready(weather) => {
                assert!((weather.high_temp - 12.0).abs() < f64::EPSILON);
                assert_eq!(weather.current_temp, None, "snapshots carry no live reading");
            }
            other => panic!("expected bound weather, got {other:?}"),
        }
    }

    #[test]
    fn fixed_mode_without_snapshot_uses_live_series() {
        let mut trip = trip_at(Some(Coordinates::new(43.06, 141.35)));
        trip.weather_mode = WeatherMode::Fixed;
        assert!(WeatherBinder::should_capture_snapshot(&trip));
        let data = series(2);
        assert!(matches!(
            WeatherBinder::bind(&trip, 1, Some(&data), None),
            WeatherBinding::Ready(_)
        ));
    }

    #[test]
    fn forecast_day_count_caps_at_provider_limit() {
        assert_eq!(WeatherBinder::forecast_day_count(1), 1);
        assert_eq!(WeatherBinder::forecast_day_count(5), 5);
        assert_eq!(WeatherBinder::forecast_day_count(30), PROVIDER_MAX_DAYS);
        assert_eq!(WeatherBinder::forecast_day_count(0), 1);
    }

    #[test]
    fn tips_follow_fixed_thresholds() {
        let cold_rain = DayWeather {
            high_temp: 4.0,
            low_temp: -1.0,
            feels_like_high: 2.0,
            precipitation_probability: Some(80.0),
            condition: ConditionCategory::Rain,
            current_temp: None,
        };
        let tips = packing_tips(&cold_rain);
        assert_eq!(tips.len(), 3);

        let mild_clear = DayWeather {
            high_temp: 22.0,
            low_temp: 15.0,
            feels_like_high: 23.0,
            precipitation_probability: None,
            condition: ConditionCategory::Clear,
            current_temp: None,
        };
        assert!(packing_tips(&mild_clear).is_empty());
    }
}
