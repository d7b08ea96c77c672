//! Application lookup by id with fuzzy suggestions.

use opptrack_model::models::Application;
use strsim::levenshtein;

use super::{Result, Tracker, TrackerError};
use crate::location::LocationPort;
use crate::store::StatePort;

/// Maximum Levenshtein distance to consider an id as a suggestion.
const MAX_SUGGESTION_DISTANCE: usize = 3;

/// Formats the "not found" error message, optionally including a suggestion.
pub(crate) fn format_not_found_error(identifier: &str, suggestion: Option<&str>) -> String {
    let base = format!("application '{}' not found.", identifier);
    match suggestion {
        Some(s) => format!("{} Did you mean '{}'?", base, s),
        None => base,
    }
}

/// Finds the closest candidate to `query` by case-insensitive edit distance.
///
/// Returns `None` for an exact match or when nothing is within the threshold.
pub(crate) fn find_similar_name<'a>(
    query: &str,
    candidates: impl Iterator<Item = &'a str>,
) -> Option<String> {
    let query_lower = query.to_lowercase();

    let (best_match, best_distance) = candidates
        .filter(|name| !name.is_empty())
        .map(|name| {
            let distance = levenshtein(&query_lower, &name.to_lowercase());
            (name.to_string(), distance)
        })
        .min_by_key(|(_, d)| *d)?;

    if best_distance > 0 && best_distance <= MAX_SUGGESTION_DISTANCE {
        Some(best_match)
    } else {
        None
    }
}

impl<P: StatePort, L: LocationPort> Tracker<P, L> {
    /// Finds an application by id. Ids compare case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns `TrackerError::NotFound`, with the closest existing id as a
    /// suggestion when one is near enough.
    pub fn find(&self, id: &str) -> Result<&Application> {
        self.applications
            .iter()
            .find(|app| app.id == id)
            .or_else(|| {
                self.applications
                    .iter()
                    .find(|app| app.id.eq_ignore_ascii_case(id))
            })
            .ok_or_else(|| TrackerError::NotFound {
                identifier: id.to_string(),
                suggestion: self.find_similar_id(id),
            })
    }

    /// Returns the id closest to `id`, if any is near enough.
    pub fn find_similar_id(&self, id: &str) -> Option<String> {
        find_similar_name(id, self.applications.iter().map(|app| app.id.as_str()))
    }
}
