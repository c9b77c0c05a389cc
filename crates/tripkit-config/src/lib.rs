//! tripkit-config
//!
//! User preferences persisted alongside the trip store: UI theme, the tag
//! palette, and the member profile directory. Each record lives in its own
//! JSON file and loads as its default when the file is absent; there is no
//! versioning or migration beyond that.

pub mod error;
pub mod manager;
pub mod model;

pub use error::ConfigError;
pub use manager::ConfigManager;
pub use model::{Preferences, Theme};
