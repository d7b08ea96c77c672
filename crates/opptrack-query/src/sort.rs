//! Sort comparator for applications.
//!
//! Direction is applied by flipping the comparison, never by reversing a
//! sorted list, so equal keys keep their original relative order in both
//! directions when used with a stable sort.

use std::cmp::Ordering;

use opptrack_model::models::{Application, SortConfig, SortDirection, SortField};

/// Compares two applications by the configured field and direction.
///
/// Due dates compare by parsed date; an unparsable due date sorts after every
/// valid one regardless of direction, and two unparsable dates compare equal.
pub fn compare(a: &Application, b: &Application, sort: SortConfig) -> Ordering {
    match sort.field {
        SortField::DueDate => match (a.due_date(), b.due_date()) {
            (Some(a_date), Some(b_date)) => directed(a_date.cmp(&b_date), sort.direction),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        },
        SortField::PercentComplete => {
            directed(a.percent_complete.cmp(&b.percent_complete), sort.direction)
        }
        SortField::FitScore => directed(a.fit_score.cmp(&b.fit_score), sort.direction),
    }
}

fn directed(ordering: Ordering, direction: SortDirection) -> Ordering {
    match direction {
        SortDirection::Asc => ordering,
        SortDirection::Desc => ordering.reverse(),
    }
}

/// Stable-sorts applications in place.
pub fn sort_applications(apps: &mut [&Application], sort: SortConfig) {
    apps.sort_by(|a, b| compare(a, b, sort));
}
