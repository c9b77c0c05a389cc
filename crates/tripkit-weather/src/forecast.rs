//! Daily forecast fetching against the Open-Meteo forecast endpoint.

use chrono::Utc;
use tracing::debug;

use tripkit_core::weather::PROVIDER_MAX_DAYS;
use tripkit_domain::Coordinates;

use crate::api::{FetchedForecast, ForecastResponse};
use crate::WeatherError;

pub const FORECAST_BASE_URL: &str = "https://api.open-meteo.com";

const DAILY_FIELDS: &str = "weathercode,temperature_2m_max,temperature_2m_min,\
apparent_temperature_max,precipitation_probability_max";

/// Parameters for one forecast fetch. `days` is clamped to the provider
/// maximum before the request goes out; `timezone` is usually `"auto"` so
/// the provider resolves it from the coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastRequest {
    pub coordinates: Coordinates,
    pub days: u32,
    pub timezone: String,
}

impl ForecastRequest {
    pub fn new(coordinates: Coordinates, days: u32, timezone: impl Into<String>) -> Self {
        Self {
            coordinates,
            days,
            timezone: timezone.into(),
        }
    }

    fn clamped_days(&self) -> u32 {
        self.days.clamp(1, PROVIDER_MAX_DAYS)
    }
}

/// Anything that can resolve a [`ForecastRequest`] into a fetched forecast.
/// The production implementation is [`WeatherClient`]; tests substitute fakes.
pub trait ForecastFetch: Send + Sync {
    fn fetch(
        &self,
        request: ForecastRequest,
    ) -> impl std::future::Future<Output = Result<FetchedForecast, WeatherError>> + Send;
}

#[derive(Debug, Clone)]
pub struct WeatherClient {
    http: reqwest::Client,
    base_url: String,
}

impl WeatherClient {
    pub fn new() -> Self {
        Self::with_base_url(FORECAST_BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    pub async fn fetch_daily(
        &self,
        request: ForecastRequest,
    ) -> Result<FetchedForecast, WeatherError> {
        let days = request.clamped_days();
        debug!(
            lat = request.coordinates.lat,
            lon = request.coordinates.lon,
            days,
            "fetching daily forecast"
        );
        let url = format!("{}/v1/forecast", self.base_url);
        let response = self
            .http
            .get(url)
            .query(&[
                ("latitude", request.coordinates.lat.to_string()),
                ("longitude", request.coordinates.lon.to_string()),
                ("daily", DAILY_FIELDS.to_string()),
                ("current_weather", "true".to_string()),
                ("timezone", request.timezone.clone()),
                ("forecast_days", days.to_string()),
            ])
            .send()
            .await?
            .error_for_status()?;
        let body: ForecastResponse = response.json().await?;
        let daily = body
            .daily
            .ok_or_else(|| WeatherError::Provider("response has no daily block".into()))?;
        Ok(FetchedForecast {
            series: daily.into_series()?,
            current_temp: body.current_weather.map(|current| current.temperature),
            fetched_at: Utc::now(),
        })
    }
}

impl Default for WeatherClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ForecastFetch for WeatherClient {
    async fn fetch(&self, request: ForecastRequest) -> Result<FetchedForecast, WeatherError> {
        self.fetch_daily(request).await
    }
}
