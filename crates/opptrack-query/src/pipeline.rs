//! The query pipeline.
//!
//! Steps run in a fixed order: the criteria predicate, the due-in-30-days
//! quick filter, the GSA-only quick filter, the high-fit quick filter, then a
//! stable sort. [`run_query`] is the pure form; [`QueryCache`] memoizes its
//! result and only recomputes when one of its declared inputs changes.

use opptrack_model::models::{Application, FilterState, QuickFilters, SortConfig};

use crate::filter::{FilterContext, FilterEvaluator};
use crate::sort::compare;

/// Agency matched by the GSA-only quick filter.
pub const GSA_AGENCY: &str = "GSA";

/// Minimum fit score kept by the high-fit quick filter.
pub const HIGH_FIT_THRESHOLD: u8 = 80;

/// Window length of the due-soon quick filter, in days.
pub const DUE_SOON_DAYS: i64 = 30;

/// Everything the pipeline result depends on, apart from the collection.
#[derive(Debug, Clone, Copy)]
pub struct QueryInputs<'a> {
    /// Committed criteria.
    pub filters: &'a FilterState,
    /// Quick filter toggles.
    pub quick: QuickFilters,
    /// Sort order.
    pub sort: SortConfig,
    /// Reference date.
    pub context: FilterContext,
}

/// Runs the pipeline and returns the positions of the selected applications
/// in `apps`, in display order.
pub fn query_indices(apps: &[Application], inputs: &QueryInputs<'_>) -> Vec<usize> {
    let evaluator = FilterEvaluator::new(inputs.filters, &inputs.context);
    let due_soon = inputs.context.rolling_window(DUE_SOON_DAYS);

    let mut selected: Vec<usize> = apps
        .iter()
        .enumerate()
        .filter(|(_, app)| evaluator.matches(app))
        .map(|(idx, _)| idx)
        .collect();

    if inputs.quick.due30 {
        selected.retain(|&idx| {
            apps[idx]
                .due_date()
                .is_some_and(|due| due >= due_soon.0 && due <= due_soon.1)
        });
    }

    if inputs.quick.gsa_only {
        selected.retain(|&idx| apps[idx].agency == GSA_AGENCY);
    }

    if inputs.quick.high_fit {
        selected.retain(|&idx| apps[idx].fit_score >= HIGH_FIT_THRESHOLD);
    }

    selected.sort_by(|&a, &b| compare(&apps[a], &apps[b], inputs.sort));
    selected
}

/// Runs the pipeline and returns the selected applications in display order.
pub fn run_query<'a>(apps: &'a [Application], inputs: &QueryInputs<'_>) -> Vec<&'a Application> {
    query_indices(apps, inputs)
        .into_iter()
        .map(|idx| &apps[idx])
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
struct QueryKey {
    filters: FilterState,
    quick: QuickFilters,
    sort: SortConfig,
    context: FilterContext,
    revision: u64,
}

impl QueryKey {
    fn matches(&self, inputs: &QueryInputs<'_>, revision: u64) -> bool {
        self.revision == revision
            && self.quick == inputs.quick
            && self.sort == inputs.sort
            && self.context == inputs.context
            && self.filters == *inputs.filters
    }
}

/// Memoized pipeline result.
///
/// The caller passes a collection revision that it bumps on every mutation;
/// the cached result is reused while the revision and all [`QueryInputs`]
/// compare equal to those of the last computation.
#[derive(Debug, Default)]
pub struct QueryCache {
    key: Option<QueryKey>,
    indices: Vec<usize>,
    recomputations: u64,
}

impl QueryCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached result, recomputing it first if any input changed.
    pub fn get_or_compute(
        &mut self,
        apps: &[Application],
        revision: u64,
        inputs: &QueryInputs<'_>,
    ) -> &[usize] {
        let fresh = self
            .key
            .as_ref()
            .is_some_and(|key| key.matches(inputs, revision));

        if !fresh {
            self.indices = query_indices(apps, inputs);
            self.recomputations += 1;
            self.key = Some(QueryKey {
                filters: inputs.filters.clone(),
                quick: inputs.quick,
                sort: inputs.sort,
                context: inputs.context,
                revision,
            });
            tracing::debug!(
                matched = self.indices.len(),
                total = apps.len(),
                recomputations = self.recomputations,
                "recomputed query view"
            );
        }

        &self.indices
    }

    /// Drops the cached result so the next call recomputes.
    pub fn invalidate(&mut self) {
        self.key = None;
    }

    /// Number of times the pipeline has actually run.
    pub fn recomputations(&self) -> u64 {
        self.recomputations
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, NaiveDate};
    use opptrack_model::models::{
        ApplicationStatus, PeriodType, SortDirection, SortField,
    };

    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 17).unwrap()
    }

    fn make_app(id: &str, agency: &str, fit_score: u8, due_in_days: i64) -> Application {
        Application {
            id: id.to_string(),
            title: format!("Opportunity {id}"),
            agency: agency.to_string(),
            naics: "541512".to_string(),
            set_aside: vec![],
            vehicle: "GSA MAS".to_string(),
            due_date: (today() + Duration::days(due_in_days))
                .format("%Y-%m-%d")
                .to_string(),
            status: ApplicationStatus::Draft,
            percent_complete: 0,
            fit_score,
            ceiling: 100_000.0,
            keywords: vec![],
        }
    }

    fn inputs(filters: &FilterState, quick: QuickFilters) -> QueryInputs<'_> {
        QueryInputs {
            filters,
            quick,
            sort: SortConfig::default(),
            context: FilterContext::new(today()),
        }
    }

    fn ids(apps: &[&Application]) -> Vec<String> {
        apps.iter().map(|a| a.id.clone()).collect()
    }

    #[test]
    fn test_quick_filters_compose_by_and() {
        let apps = vec![make_app("doe", "DOE", 85, 5)];
        let filters = FilterState::default();

        let high_fit = QuickFilters {
            high_fit: true,
            ..Default::default()
        };
        assert_eq!(ids(&run_query(&apps, &inputs(&filters, high_fit))), vec!["doe"]);

        let both = QuickFilters {
            high_fit: true,
            gsa_only: true,
            ..Default::default()
        };
        assert!(run_query(&apps, &inputs(&filters, both)).is_empty());
    }

    #[test]
    fn test_due30_quick_filter_window() {
        let apps = vec![
            make_app("past", "GSA", 50, -1),
            make_app("today", "GSA", 50, 0),
            make_app("edge", "GSA", 50, 30),
            make_app("late", "GSA", 50, 31),
        ];
        let quick = QuickFilters {
            due30: true,
            ..Default::default()
        };
        let result = run_query(&apps, &inputs(&FilterState::default(), quick));
        assert_eq!(ids(&result), vec!["today", "edge"]);
    }

    #[test]
    fn test_high_fit_threshold_inclusive() {
        let apps = vec![make_app("79", "GSA", 79, 1), make_app("80", "GSA", 80, 1)];
        let quick = QuickFilters {
            high_fit: true,
            ..Default::default()
        };
        let result = run_query(&apps, &inputs(&FilterState::default(), quick));
        assert_eq!(ids(&result), vec!["80"]);
    }

    #[test]
    fn test_predicate_runs_before_quick_filters_and_sort() {
        let apps = vec![
            make_app("c", "GSA", 90, 20),
            make_app("a", "GSA", 95, 3),
            make_app("b", "DOE", 99, 10),
        ];
        let filters = FilterState {
            period_type: PeriodType::Next30,
            ..Default::default()
        };
        let quick = QuickFilters {
            gsa_only: true,
            ..Default::default()
        };
        let result = run_query(&apps, &inputs(&filters, quick));
        assert_eq!(ids(&result), vec!["a", "c"]);
    }

    #[test]
    fn test_malformed_due_date_excluded_only_by_date_steps() {
        let mut broken = make_app("broken", "GSA", 90, 0);
        broken.due_date = "TBD".to_string();
        let apps = vec![broken, make_app("ok", "GSA", 90, 2)];

        let none = run_query(&apps, &inputs(&FilterState::default(), QuickFilters::default()));
        assert_eq!(ids(&none), vec!["ok", "broken"]);

        let due30 = QuickFilters {
            due30: true,
            ..Default::default()
        };
        let filtered = run_query(&apps, &inputs(&FilterState::default(), due30));
        assert_eq!(ids(&filtered), vec!["ok"]);
    }

    #[test]
    fn test_cache_reuses_result_for_equal_inputs() {
        let apps = vec![make_app("a", "GSA", 90, 2)];
        let filters = FilterState::default();
        let mut cache = QueryCache::new();

        cache.get_or_compute(&apps, 0, &inputs(&filters, QuickFilters::default()));
        let same_value = filters.clone();
        cache.get_or_compute(&apps, 0, &inputs(&same_value, QuickFilters::default()));
        assert_eq!(cache.recomputations(), 1);
    }

    #[test]
    fn test_cache_recomputes_when_any_input_changes() {
        let apps = vec![make_app("a", "GSA", 90, 2)];
        let filters = FilterState::default();
        let mut cache = QueryCache::new();
        let base = inputs(&filters, QuickFilters::default());

        cache.get_or_compute(&apps, 0, &base);

        let sorted = QueryInputs {
            sort: SortConfig::new(SortField::FitScore, SortDirection::Desc),
            ..base
        };
        cache.get_or_compute(&apps, 0, &sorted);
        assert_eq!(cache.recomputations(), 2);

        cache.get_or_compute(&apps, 1, &sorted);
        assert_eq!(cache.recomputations(), 3);

        let tomorrow = QueryInputs {
            context: FilterContext::new(today() + Duration::days(1)),
            ..sorted
        };
        cache.get_or_compute(&apps, 1, &tomorrow);
        assert_eq!(cache.recomputations(), 4);

        cache.invalidate();
        cache.get_or_compute(&apps, 1, &tomorrow);
        assert_eq!(cache.recomputations(), 5);
    }
}
