//! tripkit-weather
//!
//! Async collaborators for the planner core: the daily-forecast provider
//! client, the geocoding client, and the supersession layer that guarantees
//! "last request wins" when inputs change while a call is in flight.
//!
//! Network failures never propagate into the core; callers map any
//! [`WeatherError`] to an explicit unavailable state.

pub mod api;
pub mod error;
pub mod forecast;
pub mod geocode;
pub mod sync;

pub use api::{FetchedForecast, GeoMatch};
pub use error::WeatherError;
pub use forecast::{ForecastFetch, ForecastRequest, WeatherClient};
pub use geocode::{GeoClient, GeocodeFetch};
pub use sync::{ForecastTask, GeocodeTask, RequestGate};
