//! Error types for the data model.

use thiserror::Error;

use crate::models::ApplicationStatus;

/// An application status change that the lifecycle does not allow.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("cannot move application from {from} to {to}")]
pub struct TransitionError {
    /// Status the application was in.
    pub from: ApplicationStatus,
    /// Status that was requested.
    pub to: ApplicationStatus,
}

/// Errors raised while parsing model values from text.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ModelError {
    /// Unknown application status name.
    #[error("unknown status: {0} (expected Draft, Ready, Submitted, Awarded or Lost)")]
    UnknownStatus(String),

    /// Unknown period type.
    #[error("unknown period: {0} (expected custom, 30, 60 or 90)")]
    UnknownPeriod(String),

    /// Unknown sort field.
    #[error("unknown sort field: {0} (expected dueDate, percentComplete or fitScore)")]
    UnknownSortField(String),

    /// Unknown sort direction.
    #[error("unknown sort direction: {0} (expected asc or desc)")]
    UnknownSortDirection(String),

    /// Unknown quick filter name.
    #[error("unknown quick filter: {0} (expected due30, gsa or fit)")]
    UnknownQuickFilter(String),
}
