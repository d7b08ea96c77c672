//! Filter evaluation against applications.
//!
//! This module provides the [`FilterEvaluator`] for testing applications
//! against committed [`FilterState`] criteria.
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use opptrack_model::models::FilterState;
//! use opptrack_query::filter::{FilterContext, FilterEvaluator};
//!
//! let filters = FilterState {
//!     naics: "541512".to_string(),
//!     ..Default::default()
//! };
//! let context = FilterContext::new(NaiveDate::from_ymd_opt(2026, 10, 17).unwrap());
//! let evaluator = FilterEvaluator::new(&filters, &context);
//!
//! let apps = opptrack_model::seed::applications().unwrap();
//! let matched = evaluator.filter_applications(&apps);
//! assert!(matched.iter().all(|app| app.naics == "541512"));
//! ```

use chrono::{Duration, Local, NaiveDate};
use opptrack_model::models::{Application, FilterState};

/// Context for filter evaluation.
///
/// Carries the reference date that rolling windows are measured from, so that
/// evaluation is a pure function of its inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FilterContext {
    today: NaiveDate,
}

impl FilterContext {
    /// Creates a context anchored at the given date.
    pub fn new(today: NaiveDate) -> Self {
        Self { today }
    }

    /// Creates a context anchored at the local current date.
    pub fn now() -> Self {
        Self::new(Local::now().date_naive())
    }

    /// Returns the reference date.
    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Returns the inclusive window `[today, today + days]`.
    pub fn rolling_window(&self, days: i64) -> (NaiveDate, NaiveDate) {
        (self.today, self.today + Duration::days(days))
    }
}

/// Evaluates committed filter criteria against applications.
///
/// Numeric and date bounds are parsed once at construction; a bound that
/// fails to parse is dropped and never constrains the result.
#[derive(Debug)]
pub struct FilterEvaluator<'a> {
    filters: &'a FilterState,
    window: Option<(NaiveDate, NaiveDate)>,
    min_ceiling: Option<f64>,
    max_ceiling: Option<f64>,
    keywords: Vec<String>,
}

impl<'a> FilterEvaluator<'a> {
    /// Creates a new filter evaluator.
    ///
    /// # Arguments
    ///
    /// * `filters` - The committed criteria
    /// * `context` - The reference date for rolling windows
    pub fn new(filters: &'a FilterState, context: &FilterContext) -> Self {
        let window = match filters.period_type.days() {
            Some(days) => Some(context.rolling_window(days)),
            None => filters.custom_range(),
        };

        Self {
            filters,
            window,
            min_ceiling: filters.min_ceiling_value(),
            max_ceiling: filters.max_ceiling_value(),
            keywords: filters.keywords.iter().map(|k| k.to_lowercase()).collect(),
        }
    }

    /// Returns true if the application satisfies every criterion.
    pub fn matches(&self, app: &Application) -> bool {
        self.matches_naics(app)
            && self.matches_set_aside(app)
            && self.matches_vehicle(app)
            && self.matches_agency(app)
            && self.matches_window(app)
            && self.matches_ceiling(app)
            && self.matches_keywords(app)
    }

    /// Filters a slice of applications, returning only those that match.
    pub fn filter_applications<'b>(&self, apps: &'b [Application]) -> Vec<&'b Application> {
        apps.iter().filter(|app| self.matches(app)).collect()
    }

    fn matches_naics(&self, app: &Application) -> bool {
        self.filters.naics.is_empty() || app.naics == self.filters.naics
    }

    fn matches_set_aside(&self, app: &Application) -> bool {
        self.filters.set_aside.is_empty()
            || self
                .filters
                .set_aside
                .iter()
                .any(|tag| app.set_aside.contains(tag))
    }

    fn matches_vehicle(&self, app: &Application) -> bool {
        self.filters.vehicle.is_empty() || app.vehicle == self.filters.vehicle
    }

    fn matches_agency(&self, app: &Application) -> bool {
        self.filters.agency.is_empty() || self.filters.agency.contains(&app.agency)
    }

    /// An unparsable due date never satisfies an active window.
    fn matches_window(&self, app: &Application) -> bool {
        let Some((start, end)) = self.window else {
            return true;
        };

        app.due_date()
            .is_some_and(|due| due >= start && due <= end)
    }

    fn matches_ceiling(&self, app: &Application) -> bool {
        if self.min_ceiling.is_some_and(|min| app.ceiling < min) {
            return false;
        }
        if self.max_ceiling.is_some_and(|max| app.ceiling > max) {
            return false;
        }
        true
    }

    /// Case-insensitive substring match over the title and keyword tags.
    fn matches_keywords(&self, app: &Application) -> bool {
        if self.keywords.is_empty() {
            return true;
        }

        let search_text = format!("{} {}", app.title, app.keywords.join(" ")).to_lowercase();
        self.keywords.iter().any(|kw| search_text.contains(kw.as_str()))
    }
}

/// Returns true if `app` satisfies `filters`, evaluated at `context`.
pub fn matches(app: &Application, filters: &FilterState, context: &FilterContext) -> bool {
    FilterEvaluator::new(filters, context).matches(app)
}
