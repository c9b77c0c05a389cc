//! Domain types for the packing checklist and its tag palette.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::Identifiable;

/// Tag name every packing item falls back to when its own tag is deleted.
pub const GENERAL_TAG: &str = "general";

/// A palette entry. Referenced from packing items by name (soft reference).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Tag {
    pub name: String,
    pub color: String,
}

impl Tag {
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: color.into(),
        }
    }

    pub fn general() -> Self {
        Self::new(GENERAL_TAG, "gray")
    }
}

/// One checklist entry on a trip's packing list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackingItem {
    pub id: Uuid,
    pub text: String,
    #[serde(default = "PackingItem::default_tag")]
    pub tag: String,
    #[serde(default)]
    pub note: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default)]
    pub is_checked: bool,
}

impl PackingItem {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            tag: Self::default_tag(),
            note: String::new(),
            image: None,
            is_checked: false,
        }
    }

    pub fn default_tag() -> String {
        GENERAL_TAG.to_string()
    }
}

impl Identifiable for PackingItem {
    fn id(&self) -> Uuid {
        self.id
    }
}
