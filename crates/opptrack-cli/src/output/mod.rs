//! Output formatting utilities for the opp CLI.
//!
//! This module provides functions for formatting data as tables or JSON.
//! It is organized into submodules by what is shown:
//!
//! - [`applications`] - Application lists, details and submit results
//! - [`summary`] - Dashboard status breakdown
//! - [`catalog`] - Saved preset and filter option lists
//! - [`helpers`] - Common formatting utilities (truncation, dates, amounts)

mod applications;
mod catalog;
pub mod helpers;
mod summary;

// Applications
pub use applications::{
    format_application_details_json, format_application_details_table,
    format_applications_json, format_applications_table, format_submit_json, ListOutput,
    SubmitOutput,
};

// Dashboard
pub use summary::{format_summary_json, format_summary_table, DashboardOutput};

// Presets and options
pub use catalog::{format_options_table, format_preset_table};
