//! Application model.
//!
//! An application is one tracked contracting opportunity. Records are seeded
//! once and are otherwise read-only; the single permitted mutation is the
//! Ready to Submitted transition, see [`Application::mark_submitted`].

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{ModelError, TransitionError};

/// Lifecycle status of an application.
///
/// The lifecycle is `Draft -> Ready -> Submitted -> {Awarded | Lost}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ApplicationStatus {
    /// Being written.
    Draft,
    /// Complete and waiting to be submitted.
    Ready,
    /// Sent to the agency.
    Submitted,
    /// Contract won.
    Awarded,
    /// Contract lost.
    Lost,
}

impl ApplicationStatus {
    /// All statuses in display order.
    pub const ALL: [ApplicationStatus; 5] = [
        ApplicationStatus::Draft,
        ApplicationStatus::Ready,
        ApplicationStatus::Submitted,
        ApplicationStatus::Awarded,
        ApplicationStatus::Lost,
    ];

    /// Returns the status name as it appears in data files.
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Draft => "Draft",
            ApplicationStatus::Ready => "Ready",
            ApplicationStatus::Submitted => "Submitted",
            ApplicationStatus::Awarded => "Awarded",
            ApplicationStatus::Lost => "Lost",
        }
    }

    /// Returns the index of the lifecycle stage this status belongs to.
    ///
    /// Awarded and Lost share the final stage.
    pub fn stage_index(&self) -> usize {
        match self {
            ApplicationStatus::Draft => 0,
            ApplicationStatus::Ready => 1,
            ApplicationStatus::Submitted => 2,
            ApplicationStatus::Awarded | ApplicationStatus::Lost => 3,
        }
    }

    /// Returns true if the application can still be worked on.
    pub fn is_open(&self) -> bool {
        matches!(self, ApplicationStatus::Draft | ApplicationStatus::Ready)
    }

    /// Applies the submit transition.
    ///
    /// Only `Ready -> Submitted` is accepted.
    ///
    /// # Errors
    ///
    /// Returns a [`TransitionError`] for every other starting status.
    pub fn submit(self) -> Result<ApplicationStatus, TransitionError> {
        match self {
            ApplicationStatus::Ready => Ok(ApplicationStatus::Submitted),
            from => Err(TransitionError {
                from,
                to: ApplicationStatus::Submitted,
            }),
        }
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApplicationStatus {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ApplicationStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ModelError::UnknownStatus(s.to_string()))
    }
}

/// A tracked contracting opportunity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    /// Unique, stable identifier.
    pub id: String,

    /// Opportunity title.
    pub title: String,

    /// Agency code (e.g. "GSA").
    pub agency: String,

    /// NAICS industry code.
    pub naics: String,

    /// Set-aside eligibility categories.
    #[serde(default)]
    pub set_aside: Vec<String>,

    /// Contract vehicle.
    #[serde(default)]
    pub vehicle: String,

    /// Due date in YYYY-MM-DD format.
    pub due_date: String,

    /// Lifecycle status.
    pub status: ApplicationStatus,

    /// Percent complete, 0-100.
    #[serde(default)]
    pub percent_complete: u8,

    /// Fit score, 0-100.
    #[serde(default)]
    pub fit_score: u8,

    /// Contract ceiling in dollars.
    #[serde(default)]
    pub ceiling: f64,

    /// Tags used for keyword matching and highlighting.
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl Application {
    /// Parses the due date.
    ///
    /// Accepts a plain `YYYY-MM-DD` date or an RFC 3339 timestamp, whose date
    /// part is used. Returns `None` when the value cannot be parsed.
    pub fn due_date(&self) -> Option<NaiveDate> {
        parse_iso_date(&self.due_date)
    }

    /// Marks a Ready application as submitted.
    ///
    /// Status and percent complete change together; on error neither changes.
    ///
    /// # Errors
    ///
    /// Returns a [`TransitionError`] when the application is not Ready.
    pub fn mark_submitted(&mut self) -> Result<(), TransitionError> {
        self.status = self.status.submit()?;
        self.percent_complete = 100;
        Ok(())
    }
}

/// Parses an ISO-8601 date, or the date part of an RFC 3339 timestamp.
pub fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|dt| dt.date_naive())
        })
}
