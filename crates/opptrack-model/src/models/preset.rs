//! Saved filter presets.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::filter_state::FilterState;

/// Name given to presets saved without an explicit name.
pub const DEFAULT_PRESET_NAME: &str = "My Preset";

/// A named, timestamped snapshot of filter criteria.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preset {
    /// Display name.
    pub name: String,
    /// The saved criteria.
    pub filters: FilterState,
    /// Save time in Unix milliseconds.
    pub timestamp: i64,
}

impl Preset {
    /// Creates a preset stamped with the given time.
    pub fn new(name: impl Into<String>, filters: FilterState, saved_at: DateTime<Utc>) -> Self {
        Self {
            name: name.into(),
            filters,
            timestamp: saved_at.timestamp_millis(),
        }
    }

    /// Returns the save time, if the stored timestamp is in range.
    pub fn saved_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.timestamp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_timestamp_roundtrip() {
        let saved_at = DateTime::from_timestamp_millis(1_790_000_000_123).unwrap();
        let preset = Preset::new(DEFAULT_PRESET_NAME, FilterState::default(), saved_at);
        assert_eq!(preset.timestamp, 1_790_000_000_123);
        assert_eq!(preset.saved_at(), Some(saved_at));
    }

    #[test]
    fn test_preset_deserialize_partial_filters() {
        let json = r#"{"name":"Cloud","filters":{"naics":"541512"},"timestamp":0}"#;
        let preset: Preset = serde_json::from_str(json).unwrap();
        assert_eq!(preset.filters.naics, "541512");
        assert!(preset.filters.keywords.is_empty());
    }
}
