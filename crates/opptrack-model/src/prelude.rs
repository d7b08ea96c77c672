//! Prelude module for convenient imports.
//!
//! # Example
//!
//! ```
//! use opptrack_model::prelude::*;
//!
//! let filters = FilterState::default();
//! assert_eq!(filters.period_type, PeriodType::Custom);
//! ```

pub use crate::error::{ModelError, TransitionError};
pub use crate::models::{
    Application, ApplicationStatus, FilterState, PeriodType, Preset, QuickFilter, QuickFilters,
    SortConfig, SortDirection, SortField,
};
