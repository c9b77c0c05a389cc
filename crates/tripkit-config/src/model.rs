use std::fmt;

use serde::{de::Deserializer, Deserialize, Serialize};

/// UI color theme. Unknown persisted values quietly fall back to the
/// default instead of failing the whole preferences load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Ocean,
    Sunset,
    Forest,
    Mono,
}

impl Theme {
    pub fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "sunset" => Theme::Sunset,
            "forest" => Theme::Forest,
            "mono" => Theme::Mono,
            _ => Theme::Ocean,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Theme::Ocean
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Theme::Ocean => "ocean",
            Theme::Sunset => "sunset",
            Theme::Forest => "forest",
            Theme::Mono => "mono",
        };
        f.write_str(label)
    }
}

impl<'de> Deserialize<'de> for Theme {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<String>::deserialize(deserializer)?;
        Ok(value
            .map(|v| Theme::from_str(&v))
            .unwrap_or_else(Theme::default))
    }
}

/// Top-level user preferences record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Preferences {
    #[serde(default)]
    pub theme: Theme,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
        }
    }
}
