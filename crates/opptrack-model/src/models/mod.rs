//! Data types for the opportunity tracker.
//!
//! Applications are the tracked records; filter, sort and preset types
//! describe how a view over the collection is selected and ordered.

mod application;
mod filter_state;
mod preset;
mod sort;

pub use application::*;
pub use filter_state::*;
pub use preset::*;
pub use sort::*;
