//! Filter criteria evaluation, validation and query-string encoding.
//!
//! Every category in a [`FilterState`](opptrack_model::models::FilterState)
//! is AND-combined; within a category:
//!
//! - `naics`, `vehicle` - exact match when set
//! - `setAside` - the application must share at least one tag
//! - `agency` - the application's agency must be listed
//! - period - rolling `[today, today + N]` window, or the custom
//!   `[startDate, endDate]` window when both bounds are present
//! - `minCeiling` / `maxCeiling` - independent inclusive bounds
//! - `keywords` - any term appears, case-insensitively, in the title or tags
//!
//! Unparsable numbers and dates in the criteria are treated as absent.
//!
//! # Example
//!
//! ```
//! use opptrack_model::models::FilterState;
//! use opptrack_query::filter::{matches, FilterContext};
//!
//! let apps = opptrack_model::seed::applications().unwrap();
//! let context = FilterContext::now();
//! let filters = FilterState::default();
//!
//! assert!(apps.iter().all(|app| matches(app, &filters, &context)));
//! ```

mod error;
mod evaluator;
mod query_string;
mod validate;

pub use error::{FilterError, FilterResult};
pub use evaluator::{matches, FilterContext, FilterEvaluator};
pub use query_string::{decode_query_string, encode_query_string, LIST_SEPARATOR, RECOGNIZED_PARAMS};
pub use validate::validate;
