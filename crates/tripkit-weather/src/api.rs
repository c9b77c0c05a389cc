//! Wire types for the Open-Meteo forecast and geocoding APIs, and their
//! conversion into the domain's forecast series shape.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;

use tripkit_domain::ForecastSeries;

use crate::WeatherError;

/// Raw forecast response body. Only the fields the planner consumes.
#[derive(Debug, Deserialize)]
pub struct ForecastResponse {
    pub daily: Option<DailyBlock>,
    pub current_weather: Option<CurrentWeather>,
}

#[derive(Debug, Deserialize)]
pub struct DailyBlock {
    pub time: Vec<NaiveDate>,
    pub temperature_2m_max: Vec<f64>,
    pub temperature_2m_min: Vec<f64>,
    pub apparent_temperature_max: Vec<f64>,
    pub weathercode: Vec<u16>,
    #[serde(default)]
    pub precipitation_probability_max: Option<Vec<f64>>,
}

#[derive(Debug, Deserialize)]
pub struct CurrentWeather {
    pub temperature: f64,
}

impl DailyBlock {
    pub fn into_series(self) -> Result<ForecastSeries, WeatherError> {
        let series = ForecastSeries {
            dates: self.time,
            daily_high: self.temperature_2m_max,
            daily_low: self.temperature_2m_min,
            feels_like_high: self.apparent_temperature_max,
            weather_code: self.weathercode,
            precipitation_probability: self.precipitation_probability_max,
        };
        if series.is_empty() {
            return Err(WeatherError::Provider("daily block has no dates".into()));
        }
        if !series.is_consistent() {
            return Err(WeatherError::Provider(
                "daily block arrays have mismatched lengths".into(),
            ));
        }
        Ok(series)
    }
}

/// A completed forecast fetch, ready to bind or to freeze as a snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchedForecast {
    pub series: ForecastSeries,
    pub current_temp: Option<f64>,
    pub fetched_at: DateTime<Utc>,
}

/// Raw geocoding response body.
#[derive(Debug, Deserialize)]
pub struct GeocodeResponse {
    #[serde(default)]
    pub results: Option<Vec<GeoResult>>,
}

#[derive(Debug, Deserialize)]
pub struct GeoResult {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub timezone: Option<String>,
}

/// One geocoding hit, flattened for the trip editor.
#[derive(Debug, Clone, PartialEq)]
pub struct GeoMatch {
    pub display_name: String,
    pub lat: f64,
    pub lon: f64,
    pub timezone: Option<String>,
}

impl From<GeoResult> for GeoMatch {
    fn from(result: GeoResult) -> Self {
        let display_name = match &result.country {
            Some(country) => format!("{}, {}", result.name, country),
            None => result.name.clone(),
        };
        Self {
            display_name,
            lat: result.latitude,
            lon: result.longitude,
            timezone: result.timezone,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forecast_body_parses_into_aligned_series() {
        let body = r#"{
            "current_weather": {"temperature": 13.2, "windspeed": 8.4},
            "daily": {
                "time": ["2024-05-01", "2024-05-02"],
                "temperature_2m_max": [18.1, 20.4],
                "temperature_2m_min": [9.3, 10.8],
                "apparent_temperature_max": [17.0, 19.6],
                "weathercode": [2, 61],
                "precipitation_probability_max": [10.0, 85.0]
            }
        }"#;
        let parsed: ForecastResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.current_weather.unwrap().temperature, 13.2);
        let series = parsed.daily.unwrap().into_series().unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series.weather_code[1], 61);
    }

    #[test]
    fn ragged_daily_block_is_a_provider_error() {
        let block = DailyBlock {
            time: vec![NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()],
            temperature_2m_max: vec![18.0, 19.0],
            temperature_2m_min: vec![9.0],
            apparent_temperature_max: vec![17.0],
            weathercode: vec![0],
            precipitation_probability_max: None,
        };
        assert!(matches!(
            block.into_series(),
            Err(WeatherError::Provider(_))
        ));
    }

    #[test]
    fn geocode_match_includes_country_in_display_name() {
        let body = r#"{
            "results": [
                {"name": "Sapporo", "latitude": 43.06, "longitude": 141.35,
                 "country": "Japan", "timezone": "Asia/Tokyo"}
            ]
        }"#;
        let parsed: GeocodeResponse = serde_json::from_str(body).unwrap();
        let hit: GeoMatch = parsed.results.unwrap().remove(0).into();
        assert_eq!(hit.display_name, "Sapporo, Japan");
        assert_eq!(hit.timezone.as_deref(), Some("Asia/Tokyo"));
    }
}
