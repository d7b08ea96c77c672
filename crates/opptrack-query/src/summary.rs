//! Aggregate status summary of a view.

use opptrack_model::models::{Application, ApplicationStatus};
use serde::Serialize;

/// Number of applications in one status.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StatusCount {
    /// The status.
    pub status: ApplicationStatus,
    /// Applications in this status.
    pub count: usize,
    /// Share of the total, 0-100.
    pub percentage: f64,
}

/// Status breakdown and average progress of a set of applications.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusSummary {
    /// Number of applications.
    pub total: usize,
    /// One entry per status, in lifecycle order.
    pub statuses: Vec<StatusCount>,
    /// Mean percent complete, rounded half up; 0 for an empty set.
    pub average_complete: u8,
}

impl StatusSummary {
    /// Summarizes the given applications.
    pub fn from_applications<'a, I>(apps: I) -> Self
    where
        I: IntoIterator<Item = &'a Application>,
    {
        let mut counts = [0usize; ApplicationStatus::ALL.len()];
        let mut total = 0usize;
        let mut complete_sum = 0u64;

        for app in apps {
            counts[status_slot(app.status)] += 1;
            total += 1;
            complete_sum += u64::from(app.percent_complete);
        }

        let statuses = ApplicationStatus::ALL
            .into_iter()
            .zip(counts)
            .map(|(status, count)| StatusCount {
                status,
                count,
                percentage: if total > 0 {
                    count as f64 / total as f64 * 100.0
                } else {
                    0.0
                },
            })
            .collect();

        let average_complete = if total > 0 {
            (complete_sum as f64 / total as f64).round() as u8
        } else {
            0
        };

        Self {
            total,
            statuses,
            average_complete,
        }
    }

    /// Returns the count for one status.
    pub fn count(&self, status: ApplicationStatus) -> usize {
        self.statuses
            .iter()
            .find(|s| s.status == status)
            .map_or(0, |s| s.count)
    }
}

fn status_slot(status: ApplicationStatus) -> usize {
    match status {
        ApplicationStatus::Draft => 0,
        ApplicationStatus::Ready => 1,
        ApplicationStatus::Submitted => 2,
        ApplicationStatus::Awarded => 3,
        ApplicationStatus::Lost => 4,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_app(status: ApplicationStatus, percent_complete: u8) -> Application {
        Application {
            id: format!("{status}-{percent_complete}"),
            title: String::new(),
            agency: "GSA".to_string(),
            naics: String::new(),
            set_aside: vec![],
            vehicle: String::new(),
            due_date: "2026-11-01".to_string(),
            status,
            percent_complete,
            fit_score: 0,
            ceiling: 0.0,
            keywords: vec![],
        }
    }

    #[test]
    fn test_empty_summary() {
        let summary = StatusSummary::from_applications(std::iter::empty::<&Application>());
        assert_eq!(summary.total, 0);
        assert_eq!(summary.average_complete, 0);
        assert_eq!(summary.statuses.len(), 5);
        assert!(summary.statuses.iter().all(|s| s.count == 0 && s.percentage == 0.0));
    }

    #[test]
    fn test_counts_and_percentages() {
        let apps = vec![
            make_app(ApplicationStatus::Draft, 10),
            make_app(ApplicationStatus::Draft, 20),
            make_app(ApplicationStatus::Ready, 90),
            make_app(ApplicationStatus::Awarded, 100),
        ];
        let summary = StatusSummary::from_applications(&apps);

        assert_eq!(summary.total, 4);
        assert_eq!(summary.count(ApplicationStatus::Draft), 2);
        assert_eq!(summary.count(ApplicationStatus::Lost), 0);
        assert_eq!(summary.statuses[0].percentage, 50.0);
        assert_eq!(summary.statuses[1].percentage, 25.0);
    }

    #[test]
    fn test_average_rounds_half_up() {
        let apps = vec![
            make_app(ApplicationStatus::Draft, 0),
            make_app(ApplicationStatus::Draft, 1),
        ];
        assert_eq!(StatusSummary::from_applications(&apps).average_complete, 1);
    }

    #[test]
    fn test_statuses_in_lifecycle_order() {
        let summary = StatusSummary::from_applications(std::iter::empty::<&Application>());
        let order: Vec<ApplicationStatus> = summary.statuses.iter().map(|s| s.status).collect();
        assert_eq!(order, ApplicationStatus::ALL.to_vec());
    }
}
