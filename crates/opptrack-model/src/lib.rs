//! Data model for tracking government contracting opportunities.
//!
//! # Quick Start
//!
//! For convenient imports, use the prelude:
//!
//! ```
//! use opptrack_model::prelude::*;
//! ```
//!
//! This re-exports the application record, its status state machine, the
//! filter criteria types, sort configuration and presets.

pub mod catalog;
pub mod error;
pub mod models;
pub mod prelude;
pub mod seed;
