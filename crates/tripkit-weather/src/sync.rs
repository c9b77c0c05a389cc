//! Supersession of in-flight weather requests.
//!
//! Editing a trip's location or dates can fire requests faster than the
//! provider answers them. Only the latest request may land: starting a new
//! one cancels whatever is still in flight, and a superseded fetch resolves
//! to `None` instead of delivering a stale result.

use std::future::Future;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::api::{FetchedForecast, GeoMatch};
use crate::forecast::{ForecastFetch, ForecastRequest};
use crate::geocode::GeocodeFetch;
use crate::WeatherError;

/// Hands out one cancellation token per request generation. Calling
/// [`RequestGate::begin`] cancels the previous generation.
#[derive(Debug)]
pub struct RequestGate {
    current: CancellationToken,
}

impl RequestGate {
    pub fn new() -> Self {
        Self {
            current: CancellationToken::new(),
        }
    }

    pub fn begin(&mut self) -> CancellationToken {
        self.current.cancel();
        self.current = CancellationToken::new();
        self.current.clone()
    }

    /// Cancels the in-flight generation without starting a new one.
    pub fn cancel_all(&mut self) {
        self.current.cancel();
    }
}

impl Default for RequestGate {
    fn default() -> Self {
        Self::new()
    }
}

/// Runs forecast fetches with last-request-wins semantics.
pub struct ForecastTask<F> {
    fetcher: Arc<F>,
    gate: RequestGate,
}

impl<F: ForecastFetch> ForecastTask<F> {
    pub fn new(fetcher: F) -> Self {
        Self {
            fetcher: Arc::new(fetcher),
            gate: RequestGate::new(),
        }
    }

    /// Starts a fetch, superseding any previous one. Resolves to `None` when
    /// a newer request arrives before this one finishes.
    pub fn begin(
        &mut self,
        request: ForecastRequest,
    ) -> impl Future<Output = Option<Result<FetchedForecast, WeatherError>>> {
        let token = self.gate.begin();
        let fetcher = Arc::clone(&self.fetcher);
        async move {
            tokio::select! {
                biased;
                _ = token.cancelled() => {
                    debug!("forecast fetch superseded");
                    None
                }
                result = fetcher.fetch(request) => Some(result),
            }
        }
    }
}

/// Runs geocode searches with last-request-wins semantics.
pub struct GeocodeTask<G> {
    fetcher: Arc<G>,
    gate: RequestGate,
}

impl<G: GeocodeFetch> GeocodeTask<G> {
    pub fn new(fetcher: G) -> Self {
        Self {
            fetcher: Arc::new(fetcher),
            gate: RequestGate::new(),
        }
    }

    pub fn begin(
        &mut self,
        query: String,
    ) -> impl Future<Output = Option<Result<Vec<GeoMatch>, WeatherError>>> {
        let token = self.gate.begin();
        let fetcher = Arc::clone(&self.fetcher);
        async move {
            tokio::select! {
                biased;
                _ = token.cancelled() => {
                    debug!("geocode search superseded");
                    None
                }
                result = fetcher.search(query) => Some(result),
            }
        }
    }
}
