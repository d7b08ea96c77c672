//! Filtering, sorting and debounced querying of tracked opportunities.
//!
//! This crate turns a collection of [`Application`](opptrack_model::models::Application)s
//! and a set of criteria into a filtered, sorted view:
//!
//! - [`filter`] - the predicate evaluator, validation and query-string codec
//! - [`sort`] - the stable comparator
//! - [`pipeline`] - predicate, quick filters and sort in a fixed order, plus a
//!   memo cache
//! - [`debounce`] - the clock-driven debouncer for committed criteria
//! - [`Tracker`] - the controller that owns the collection and all state
//!
//! Persistence and query-string sync go through the [`StatePort`] and
//! [`LocationPort`] traits, so nothing in here reaches for ambient global
//! state.

pub mod debounce;
pub mod export;
pub mod filter;
pub mod highlight;
pub mod location;
pub mod pipeline;
pub mod sort;
pub mod store;
pub mod summary;
mod tracker;

pub use debounce::{Debouncer, DEFAULT_DEBOUNCE};
pub use export::{format_csv, ExportError, ExportOutcome, Exporter};
pub use filter::{FilterContext, FilterError};
pub use location::{LocationPort, MemoryLocation};
pub use pipeline::{run_query, QueryCache, QueryInputs};
pub use store::{MemoryStatePort, PersistedState, StatePort, StateStore, StateStoreError};
pub use summary::StatusSummary;
pub use tracker::{SubmitOutcome, Tracker, TrackerError};
