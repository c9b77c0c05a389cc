//! Domain types for a single trip and its metadata.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::{Coordinates, Displayable, Identifiable};
use crate::weather::ForecastSeries;

pub const DEFAULT_TIMEZONE: &str = "Asia/Taipei";
const DEFAULT_DURATION_DAYS: u32 = 5;

/// Controls how forecast data is bound to the trip's itinerary days.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum WeatherMode {
    /// Re-fetched from the provider whenever inputs change.
    #[default]
    Live,
    /// Served from a frozen snapshot captured once.
    Fixed,
}

/// A single travel plan. Its itinerary, packing list, and expenses live in
/// the owning store record, not on the trip itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trip {
    pub id: Uuid,
    pub name: String,
    pub start_date: NaiveDate,
    /// Trip length in days, always >= 1.
    pub duration: u32,
    /// Ordered set of member display names; no duplicates.
    #[serde(default)]
    pub members: Vec<String>,
    #[serde(default)]
    pub location_query: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
    #[serde(default = "Trip::default_timezone")]
    pub timezone: String,
    #[serde(default)]
    pub weather_mode: WeatherMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weather_snapshot: Option<ForecastSeries>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weather_updated_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Trip {
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            start_date: now.date_naive(),
            duration: DEFAULT_DURATION_DAYS,
            members: Vec::new(),
            location_query: String::new(),
            cover_image: None,
            coordinates: None,
            timezone: Self::default_timezone(),
            weather_mode: WeatherMode::default(),
            weather_snapshot: None,
            weather_updated_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn default_timezone() -> String {
        DEFAULT_TIMEZONE.to_string()
    }

    /// Last calendar date covered by the trip.
    pub fn end_date(&self) -> NaiveDate {
        self.start_date + Duration::days(self.duration.max(1) as i64 - 1)
    }

    pub fn has_member(&self, name: &str) -> bool {
        self.members.iter().any(|member| member == name)
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl Identifiable for Trip {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Displayable for Trip {
    fn display_label(&self) -> String {
        format!("{} ({} days)", self.name, self.duration)
    }
}
