//! The owning controller for a tracking session.
//!
//! The `Tracker` holds:
//! - The application collection and its revision counter
//! - Draft, applied and settled filter states
//! - Quick filter toggles and the persisted sort/preset/theme state
//! - A persistence port and a location port
//!
//! Filter edits go to the draft. `apply` commits the draft, rewrites the
//! location's query string and hands the committed state to the debouncer;
//! only when the debouncer settles (via `tick` or `settle`) does the pipeline
//! see the new criteria.
//!
//! # Example
//!
//! ```
//! use opptrack_query::filter::FilterContext;
//! use opptrack_query::{MemoryLocation, MemoryStatePort, Tracker};
//! use tokio::time::{Duration, Instant};
//!
//! let apps = opptrack_model::seed::applications().unwrap();
//! let mut tracker = Tracker::new(apps, MemoryStatePort::new(), MemoryLocation::new());
//!
//! let start = Instant::now();
//! tracker.draft_mut().agency = vec!["GSA".to_string()];
//! tracker.apply(start).unwrap();
//! assert!(tracker.tick(start + Duration::from_millis(300)));
//!
//! let context = FilterContext::now();
//! assert!(tracker.view(&context).iter().all(|app| app.agency == "GSA"));
//! ```

mod lookups;

use std::time::Duration;

use chrono::{DateTime, Utc};
use opptrack_model::models::{
    Application, FilterState, Preset, QuickFilter, QuickFilters, SortConfig, DEFAULT_PRESET_NAME,
};
use opptrack_model::error::TransitionError;
use tokio::time::Instant;

use crate::debounce::{Debouncer, DEFAULT_DEBOUNCE};
use crate::filter::{decode_query_string, encode_query_string, validate, FilterContext, FilterError};
use crate::location::LocationPort;
use crate::pipeline::{QueryCache, QueryInputs};
use crate::store::{PersistedState, StatePort, StateStoreError};
use crate::summary::StatusSummary;

pub(crate) use lookups::format_not_found_error;

/// Errors that can occur while driving a tracker.
#[derive(Debug, thiserror::Error)]
pub enum TrackerError {
    /// The draft criteria cannot be applied.
    #[error(transparent)]
    Filter(#[from] FilterError),

    /// Persisting state failed. The in-memory state was still updated.
    #[error("state store error: {0}")]
    Store(#[from] StateStoreError),

    /// No application has the given id.
    #[error("{}", format_not_found_error(identifier, suggestion.as_deref()))]
    NotFound {
        /// The id that was searched for.
        identifier: String,
        /// Closest existing id, if any is near enough.
        suggestion: Option<String>,
    },
}

/// Result type for tracker operations.
pub type Result<T> = std::result::Result<T, TrackerError>;

/// Outcome of a mark-submitted request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The application moved to Submitted.
    Submitted,
    /// No application has the given id; nothing changed.
    NotFound,
    /// The application's status does not allow submission; nothing changed.
    Rejected(TransitionError),
}

/// Owns the collection and all filter, sort and preset state.
///
/// `Tracker` is generic over its persistence and location ports so the same
/// controller runs against files and a real query string in the CLI and
/// against in-memory ports in tests.
pub struct Tracker<P, L> {
    applications: Vec<Application>,
    revision: u64,

    draft: FilterState,
    applied: FilterState,
    settled: FilterState,
    debouncer: Debouncer<FilterState>,

    quick: QuickFilters,
    persisted: PersistedState,

    store: P,
    location: L,

    cache: QueryCache,
    closed: bool,
}

impl<P: StatePort, L: LocationPort> Tracker<P, L> {
    /// Creates a tracker over `applications`.
    ///
    /// The initial filters come from the location's query string when it
    /// carries any recognized parameter, otherwise the defaults. Persisted
    /// state is loaded from `store`. Neither source can block startup: a
    /// failure is logged and the defaults are used.
    pub fn new(applications: Vec<Application>, store: P, location: L) -> Self {
        Self::with_debounce(applications, store, location, DEFAULT_DEBOUNCE)
    }

    /// Creates a tracker with a custom debounce delay.
    pub fn with_debounce(
        applications: Vec<Application>,
        store: P,
        location: L,
        delay: Duration,
    ) -> Self {
        let initial = match decode_query_string(&location.search()) {
            Ok(filters) => filters.unwrap_or_default(),
            Err(e) => {
                tracing::warn!(error = %e, "ignoring unreadable query string");
                FilterState::default()
            }
        };

        let persisted = match store.load() {
            Ok(state) => state,
            Err(e) => {
                tracing::warn!(error = %e, "failed to load persisted state, using defaults");
                PersistedState::default()
            }
        };

        Self {
            applications,
            revision: 0,
            draft: initial.clone(),
            applied: initial.clone(),
            settled: initial,
            debouncer: Debouncer::new(delay),
            quick: QuickFilters::default(),
            persisted,
            store,
            location,
            cache: QueryCache::new(),
            closed: false,
        }
    }

    // ==================== Accessors ====================

    /// Returns the full collection in its original order.
    pub fn applications(&self) -> &[Application] {
        &self.applications
    }

    /// Returns the collection revision. It changes on every mutation.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Returns the in-progress criteria.
    pub fn draft(&self) -> &FilterState {
        &self.draft
    }

    /// Returns the last committed criteria.
    pub fn applied(&self) -> &FilterState {
        &self.applied
    }

    /// Returns the criteria currently driving the pipeline.
    pub fn settled(&self) -> &FilterState {
        &self.settled
    }

    /// Returns true while a committed change is waiting to settle.
    pub fn is_settling(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// Returns the quick filter toggles.
    pub fn quick_filters(&self) -> QuickFilters {
        self.quick
    }

    /// Returns the sort configuration.
    pub fn sort(&self) -> SortConfig {
        self.persisted.sort
    }

    /// Returns the saved preset, if any.
    pub fn preset(&self) -> Option<&Preset> {
        self.persisted.preset.as_ref()
    }

    /// Returns the dark-mode flag.
    pub fn dark_mode(&self) -> bool {
        self.persisted.dark_mode
    }

    /// Returns the location port.
    pub fn location(&self) -> &L {
        &self.location
    }

    /// Returns the persistence port.
    pub fn store(&self) -> &P {
        &self.store
    }

    /// Returns true once [`close`](Self::close) has been called.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    // ==================== Filter Commands ====================

    /// Replaces the draft criteria.
    pub fn set_draft(&mut self, filters: FilterState) {
        self.draft = filters;
    }

    /// Returns the draft criteria for editing.
    pub fn draft_mut(&mut self) -> &mut FilterState {
        &mut self.draft
    }

    /// Commits the draft.
    ///
    /// # Errors
    ///
    /// Returns `TrackerError::Filter` if the draft fails validation; nothing
    /// is committed in that case.
    pub fn apply(&mut self, now: Instant) -> Result<()> {
        validate(&self.draft)?;
        self.commit(self.draft.clone(), now);
        Ok(())
    }

    /// Restores the default criteria and clears every quick filter.
    pub fn reset(&mut self, now: Instant) {
        self.draft = FilterState::default();
        self.quick = QuickFilters::default();
        self.commit(FilterState::default(), now);
    }

    fn commit(&mut self, filters: FilterState, now: Instant) {
        match encode_query_string(&filters) {
            Ok(query) => self.location.replace(&query),
            Err(e) => tracing::warn!(error = %e, "failed to encode filters into query string"),
        }
        self.applied = filters.clone();
        self.debouncer.push(filters, now);
    }

    /// Flips a quick filter and returns its new state.
    pub fn toggle_quick(&mut self, filter: QuickFilter) -> bool {
        self.quick.toggle(filter)
    }

    /// Replaces all quick filter toggles.
    pub fn set_quick_filters(&mut self, quick: QuickFilters) {
        self.quick = quick;
    }

    /// Advances the debounce timer to `now`.
    ///
    /// Returns true if a committed change settled and now drives the
    /// pipeline. Always false after [`close`](Self::close).
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.closed {
            return false;
        }
        match self.debouncer.poll(now) {
            Some(filters) => {
                self.settle_with(filters);
                true
            }
            None => false,
        }
    }

    /// Sleeps until the pending change settles, then applies it.
    ///
    /// Returns false immediately when nothing is pending or the tracker is
    /// closed.
    pub async fn settle(&mut self) -> bool {
        if self.closed {
            return false;
        }
        match self.debouncer.settle().await {
            Some(filters) => {
                self.settle_with(filters);
                true
            }
            None => false,
        }
    }

    /// Returns the instant at which the pending change settles.
    pub fn settle_deadline(&self) -> Option<Instant> {
        self.debouncer.deadline()
    }

    fn settle_with(&mut self, filters: FilterState) {
        tracing::debug!(default = filters.is_default(), "filters settled");
        self.settled = filters;
    }

    // ==================== Persisted State ====================

    fn persist(&mut self) -> Result<()> {
        self.store.save(&self.persisted).map_err(|e| {
            tracing::warn!(error = %e, "failed to persist state");
            TrackerError::from(e)
        })
    }

    /// Changes the sort order and persists it.
    ///
    /// # Errors
    ///
    /// Returns `TrackerError::Store` if persisting fails. The new order is
    /// used either way.
    pub fn set_sort(&mut self, sort: SortConfig) -> Result<()> {
        self.persisted.sort = sort;
        self.persist()
    }

    /// Changes the theme flag and persists it.
    ///
    /// # Errors
    ///
    /// Returns `TrackerError::Store` if persisting fails.
    pub fn set_dark_mode(&mut self, dark: bool) -> Result<()> {
        self.persisted.dark_mode = dark;
        self.persist()
    }

    /// Saves the draft criteria as the single preset, replacing any earlier
    /// one.
    ///
    /// # Errors
    ///
    /// Returns `TrackerError::Store` if persisting fails.
    pub fn save_preset(&mut self, name: Option<&str>, saved_at: DateTime<Utc>) -> Result<()> {
        let preset = Preset::new(
            name.unwrap_or(DEFAULT_PRESET_NAME),
            self.draft.clone(),
            saved_at,
        );
        tracing::debug!(name = %preset.name, "preset saved");
        self.persisted.preset = Some(preset);
        self.persist()
    }

    /// Loads the saved preset into both the draft and the committed criteria.
    ///
    /// Returns false when no preset is saved.
    pub fn load_preset(&mut self, now: Instant) -> bool {
        let Some(filters) = self.persisted.preset.as_ref().map(|p| p.filters.clone()) else {
            return false;
        };
        self.draft = filters.clone();
        self.commit(filters, now);
        true
    }

    /// Drops the saved preset.
    ///
    /// # Errors
    ///
    /// Returns `TrackerError::Store` if persisting fails.
    pub fn clear_preset(&mut self) -> Result<bool> {
        let had_preset = self.persisted.preset.take().is_some();
        if had_preset {
            self.persist()?;
        }
        Ok(had_preset)
    }

    // ==================== Collection ====================

    /// Moves an application from Ready to Submitted.
    ///
    /// An unknown id or an illegal transition leaves the collection untouched.
    pub fn mark_submitted(&mut self, id: &str) -> SubmitOutcome {
        let Some(app) = self.applications.iter_mut().find(|app| app.id == id) else {
            tracing::debug!(id, "mark submitted: no such application");
            return SubmitOutcome::NotFound;
        };

        match app.mark_submitted() {
            Ok(()) => {
                self.revision += 1;
                tracing::debug!(id, revision = self.revision, "application submitted");
                SubmitOutcome::Submitted
            }
            Err(e) => {
                tracing::debug!(id, error = %e, "mark submitted rejected");
                SubmitOutcome::Rejected(e)
            }
        }
    }

    // ==================== Views ====================

    /// Returns the filtered and sorted view for `context`.
    ///
    /// The result is memoized; it is recomputed only when the settled
    /// criteria, quick filters, sort order, reference date or collection
    /// revision changed since the last call.
    pub fn view(&mut self, context: &FilterContext) -> Vec<&Application> {
        let inputs = QueryInputs {
            filters: &self.settled,
            quick: self.quick,
            sort: self.persisted.sort,
            context: *context,
        };
        let indices = self
            .cache
            .get_or_compute(&self.applications, self.revision, &inputs);
        indices.iter().map(|&idx| &self.applications[idx]).collect()
    }

    /// Returns the status summary of the current view.
    pub fn summary(&mut self, context: &FilterContext) -> StatusSummary {
        StatusSummary::from_applications(self.view(context))
    }

    /// Number of times the pipeline has actually run.
    pub fn recompute_count(&self) -> u64 {
        self.cache.recomputations()
    }

    /// Shuts the tracker down. Pending debounced changes are dropped and
    /// never reach the pipeline.
    pub fn close(&mut self) {
        if let Some(dropped) = self.debouncer.cancel() {
            tracing::debug!(default = dropped.is_default(), "dropped pending filters on close");
        }
        self.closed = true;
    }
}
