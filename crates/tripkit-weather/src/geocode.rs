//! Place-name lookup against the Open-Meteo geocoding endpoint.

use tracing::debug;

use crate::api::{GeoMatch, GeocodeResponse};
use crate::WeatherError;

pub const GEOCODE_BASE_URL: &str = "https://geocoding-api.open-meteo.com";

/// Queries shorter than this return no matches without touching the network.
pub const MIN_QUERY_LEN: usize = 2;

const RESULT_COUNT: u8 = 8;

pub trait GeocodeFetch: Send + Sync {
    fn search(
        &self,
        query: String,
    ) -> impl std::future::Future<Output = Result<Vec<GeoMatch>, WeatherError>> + Send;
}

#[derive(Debug, Clone)]
pub struct GeoClient {
    http: reqwest::Client,
    base_url: String,
}

impl GeoClient {
    pub fn new() -> Self {
        Self::with_base_url(GEOCODE_BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    pub async fn search_places(&self, query: &str) -> Result<Vec<GeoMatch>, WeatherError> {
        let query = query.trim();
        if query.chars().count() < MIN_QUERY_LEN {
            return Ok(Vec::new());
        }
        debug!(query, "searching places");
        let url = format!("{}/v1/search", self.base_url);
        let response = self
            .http
            .get(url)
            .query(&[
                ("name", query),
                ("count", &RESULT_COUNT.to_string()),
                ("language", "en"),
                ("format", "json"),
            ])
            .send()
            .await?
            .error_for_status()?;
        let body: GeocodeResponse = response.json().await?;
        Ok(body
            .results
            .unwrap_or_default()
            .into_iter()
            .map(GeoMatch::from)
            .collect())
    }
}

impl Default for GeoClient {
    fn default() -> Self {
        Self::new()
    }
}

impl GeocodeFetch for GeoClient {
    async fn search(&self, query: String) -> Result<Vec<GeoMatch>, WeatherError> {
        self.search_places(&query).await
    }
}
