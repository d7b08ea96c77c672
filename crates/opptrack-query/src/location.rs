//! Location sync port.
//!
//! The committed filters are mirrored into a query string so a view can be
//! shared as a link. The controller only needs to read the current query at
//! startup and replace it on every applied change.

/// Narrow interface to the current location's query string.
pub trait LocationPort {
    /// Returns the current query string, without a leading `?`.
    fn search(&self) -> String;

    /// Replaces the current query string.
    fn replace(&mut self, query: &str);
}

/// In-memory [`LocationPort`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryLocation {
    query: String,
    replacements: usize,
}

impl MemoryLocation {
    /// Creates an empty location.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a location holding `query`. A leading `?` is ignored.
    pub fn with_query(query: &str) -> Self {
        Self {
            query: query.trim_start_matches('?').to_string(),
            replacements: 0,
        }
    }

    /// Number of times the query was replaced.
    pub fn replacements(&self) -> usize {
        self.replacements
    }
}

impl LocationPort for MemoryLocation {
    fn search(&self) -> String {
        self.query.clone()
    }

    fn replace(&mut self, query: &str) {
        self.query = query.trim_start_matches('?').to_string();
        self.replacements += 1;
    }
}
