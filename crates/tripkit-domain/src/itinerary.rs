//! Domain types for day-indexed itinerary events.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::{Displayable, Identifiable};

/// How the traveller reaches the event's location.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TravelMode {
    Walk,
    #[default]
    Car,
    Transit,
    Plane,
}

/// One entry in a trip's itinerary. Position within a day follows the
/// collection order and only changes through explicit reorder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItineraryEvent {
    pub id: Uuid,
    /// Day index within the trip, 1-based.
    pub day: u32,
    pub time: NaiveTime,
    pub title: String,
    #[serde(default)]
    pub location: String,
    /// Free-form event kind label ("spot", "meal", ...).
    #[serde(default = "ItineraryEvent::default_kind")]
    pub kind: String,
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub travel_time_minutes: u32,
    #[serde(default)]
    pub travel_mode: TravelMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl ItineraryEvent {
    pub fn new(day: u32, time: NaiveTime, title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            day,
            time,
            title: title.into(),
            location: String::new(),
            kind: Self::default_kind(),
            note: String::new(),
            travel_time_minutes: 0,
            travel_mode: TravelMode::default(),
            image: None,
        }
    }

    pub fn default_kind() -> String {
        "spot".to_string()
    }
}

impl Identifiable for ItineraryEvent {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Displayable for ItineraryEvent {
    fn display_label(&self) -> String {
        format!("day {} {} {}", self.day, self.time.format("%H:%M"), self.title)
    }
}
