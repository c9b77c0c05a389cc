//! Member profile metadata, shared across trips and keyed by display name.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Avatar and note attached to a member name.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct MemberProfile {
    #[serde(default)]
    pub note: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

/// Name-keyed profile directory. Rename/delete cascades from the store keep
/// the keys aligned with trip membership.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct MemberDirectory {
    #[serde(default, flatten)]
    pub profiles: BTreeMap<String, MemberProfile>,
}

impl MemberDirectory {
    pub fn profile(&self, name: &str) -> Option<&MemberProfile> {
        self.profiles.get(name)
    }

    pub fn upsert(&mut self, name: impl Into<String>, profile: MemberProfile) {
        self.profiles.insert(name.into(), profile);
    }

    /// Moves the profile stored under `old_name` to `new_name`, if any.
    pub fn rename(&mut self, old_name: &str, new_name: &str) {
        if let Some(profile) = self.profiles.remove(old_name) {
            self.profiles.insert(new_name.to_string(), profile);
        }
    }

    pub fn remove(&mut self, name: &str) -> Option<MemberProfile> {
        self.profiles.remove(name)
    }
}
