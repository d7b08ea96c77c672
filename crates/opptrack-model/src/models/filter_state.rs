//! Filter criteria types.
//!
//! A [`FilterState`] holds the criteria exactly as entered: numeric and date
//! bounds stay as strings so that half-typed or malformed input can be kept
//! in a draft. The typed accessors return `None` for anything unparsable,
//! which callers treat as "no constraint".

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::application::parse_iso_date;
use crate::error::ModelError;

/// The time window a filter applies to due dates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PeriodType {
    /// Explicit start/end dates.
    #[default]
    #[serde(rename = "custom")]
    Custom,
    /// Due within the next 30 days.
    #[serde(rename = "30")]
    Next30,
    /// Due within the next 60 days.
    #[serde(rename = "60")]
    Next60,
    /// Due within the next 90 days.
    #[serde(rename = "90")]
    Next90,
}

impl PeriodType {
    /// Returns the wire value (`custom`, `30`, `60`, `90`).
    pub fn as_str(&self) -> &'static str {
        match self {
            PeriodType::Custom => "custom",
            PeriodType::Next30 => "30",
            PeriodType::Next60 => "60",
            PeriodType::Next90 => "90",
        }
    }

    /// Returns the window length in days, or `None` for a custom period.
    pub fn days(&self) -> Option<i64> {
        match self {
            PeriodType::Custom => None,
            PeriodType::Next30 => Some(30),
            PeriodType::Next60 => Some(60),
            PeriodType::Next90 => Some(90),
        }
    }
}

impl fmt::Display for PeriodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PeriodType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "custom" => Ok(PeriodType::Custom),
            "30" => Ok(PeriodType::Next30),
            "60" => Ok(PeriodType::Next60),
            "90" => Ok(PeriodType::Next90),
            other => Err(ModelError::UnknownPeriod(other.to_string())),
        }
    }
}

/// Filter criteria for the application list.
///
/// Categories are AND-combined; an empty field places no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterState {
    /// Exact NAICS code.
    pub naics: String,
    /// Accepted set-aside tags (any one must match).
    pub set_aside: Vec<String>,
    /// Exact contract vehicle.
    pub vehicle: String,
    /// Accepted agencies.
    pub agency: Vec<String>,
    /// Time window type.
    pub period_type: PeriodType,
    /// Custom window start (YYYY-MM-DD).
    pub start_date: String,
    /// Custom window end (YYYY-MM-DD).
    pub end_date: String,
    /// Minimum ceiling, as entered.
    pub min_ceiling: String,
    /// Maximum ceiling, as entered.
    pub max_ceiling: String,
    /// Free-text terms, OR-matched.
    pub keywords: Vec<String>,
}

impl FilterState {
    /// Returns true if no criterion is set.
    pub fn is_default(&self) -> bool {
        *self == FilterState::default()
    }

    /// Parsed minimum ceiling, `None` when empty or unparsable.
    pub fn min_ceiling_value(&self) -> Option<f64> {
        parse_amount(&self.min_ceiling)
    }

    /// Parsed maximum ceiling, `None` when empty or unparsable.
    pub fn max_ceiling_value(&self) -> Option<f64> {
        parse_amount(&self.max_ceiling)
    }

    /// Returns the custom date window when the period is custom and both
    /// bounds parse.
    pub fn custom_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        if self.period_type != PeriodType::Custom {
            return None;
        }
        let start = parse_iso_date(&self.start_date)?;
        let end = parse_iso_date(&self.end_date)?;
        Some((start, end))
    }

    /// Adds a keyword, ignoring blanks and exact duplicates.
    ///
    /// Returns true if the keyword was added.
    pub fn add_keyword(&mut self, keyword: &str) -> bool {
        let keyword = keyword.trim();
        if keyword.is_empty() || self.keywords.iter().any(|k| k == keyword) {
            return false;
        }
        self.keywords.push(keyword.to_string());
        true
    }

    /// Removes a keyword. Returns true if it was present.
    pub fn remove_keyword(&mut self, keyword: &str) -> bool {
        let before = self.keywords.len();
        self.keywords.retain(|k| k != keyword);
        self.keywords.len() != before
    }
}

fn parse_amount(value: &str) -> Option<f64> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    value.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// One of the quick filter toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuickFilter {
    /// Due within the next 30 days.
    Due30,
    /// Agency is GSA.
    GsaOnly,
    /// Fit score of at least 80.
    HighFit,
}

impl FromStr for QuickFilter {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "due30" | "due" => Ok(QuickFilter::Due30),
            "gsa" | "gsaonly" | "gsa-only" => Ok(QuickFilter::GsaOnly),
            "fit" | "highfit" | "high-fit" => Ok(QuickFilter::HighFit),
            _ => Err(ModelError::UnknownQuickFilter(s.to_string())),
        }
    }
}

/// Independent toggles applied after the main criteria.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuickFilters {
    /// Only items due within 30 days.
    pub due30: bool,
    /// Only GSA items.
    pub gsa_only: bool,
    /// Only items with a fit score of 80 or more.
    pub high_fit: bool,
}

impl QuickFilters {
    /// Flips one toggle and returns its new value.
    pub fn toggle(&mut self, filter: QuickFilter) -> bool {
        let flag = match filter {
            QuickFilter::Due30 => &mut self.due30,
            QuickFilter::GsaOnly => &mut self.gsa_only,
            QuickFilter::HighFit => &mut self.high_fit,
        };
        *flag = !*flag;
        *flag
    }

    /// Returns true if any toggle is on.
    pub fn any(&self) -> bool {
        self.due30 || self.gsa_only || self.high_fit
    }
}
