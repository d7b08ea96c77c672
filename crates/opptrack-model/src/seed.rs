//! Bundled seed dataset.

use crate::models::Application;

const SEED_JSON: &str = include_str!("../data/applications.json");

/// Returns the bundled applications.
///
/// # Errors
///
/// Returns a JSON error if the bundled data is malformed.
pub fn applications() -> Result<Vec<Application>, serde_json::Error> {
    serde_json::from_str(SEED_JSON)
}
