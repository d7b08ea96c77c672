//! Sort configuration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Field the application list is ordered by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    /// Due date, earliest first.
    #[default]
    DueDate,
    /// Percent complete.
    PercentComplete,
    /// Fit score.
    FitScore,
}

impl SortField {
    /// Returns the wire name of the field.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::DueDate => "dueDate",
            SortField::PercentComplete => "percentComplete",
            SortField::FitScore => "fitScore",
        }
    }

    /// Returns a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            SortField::DueDate => "Due Date",
            SortField::PercentComplete => "% Complete",
            SortField::FitScore => "Fit Score",
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortField {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect::<String>()
            .to_lowercase();
        match normalized.as_str() {
            "duedate" | "due" => Ok(SortField::DueDate),
            "percentcomplete" | "percent" | "complete" => Ok(SortField::PercentComplete),
            "fitscore" | "fit" => Ok(SortField::FitScore),
            _ => Err(ModelError::UnknownSortField(s.to_string())),
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Natural order.
    #[default]
    Asc,
    /// Reversed order.
    Desc,
}

impl SortDirection {
    /// Returns the opposite direction.
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    /// Returns the wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortDirection {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            _ => Err(ModelError::UnknownSortDirection(s.to_string())),
        }
    }
}

/// Field and direction the list is sorted by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortConfig {
    /// Sort key.
    pub field: SortField,
    /// Sort direction.
    pub direction: SortDirection,
}

impl SortConfig {
    /// Creates a sort configuration.
    pub fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_sort_is_due_date_ascending() {
        let sort = SortConfig::default();
        assert_eq!(sort.field, SortField::DueDate);
        assert_eq!(sort.direction, SortDirection::Asc);
    }

    #[test]
    fn test_sort_field_parse_variants() {
        assert_eq!("fitScore".parse::<SortField>(), Ok(SortField::FitScore));
        assert_eq!("fit-score".parse::<SortField>(), Ok(SortField::FitScore));
        assert_eq!(
            "percent_complete".parse::<SortField>(),
            Ok(SortField::PercentComplete)
        );
        assert!("title".parse::<SortField>().is_err());
    }

    #[test]
    fn test_sort_config_serde() {
        let sort = SortConfig::new(SortField::PercentComplete, SortDirection::Desc);
        let json = serde_json::to_string(&sort).unwrap();
        assert_eq!(json, r#"{"field":"percentComplete","direction":"desc"}"#);
        let back: SortConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, sort);
    }

    #[test]
    fn test_direction_flipped() {
        assert_eq!(SortDirection::Asc.flipped(), SortDirection::Desc);
        assert_eq!(SortDirection::Desc.flipped(), SortDirection::Asc);
    }
}
