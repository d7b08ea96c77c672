//! Opening a tracker for a one-shot command.
//!
//! Every view command loads the dataset, opens the persisted state, seeds the
//! location from `--url`, layers the filter flags on top and then settles the
//! debounce immediately: a one-shot command has no later input to wait for.

use std::fs;
use std::path::Path;

use opptrack_model::models::{Application, FilterState, PeriodType, QuickFilters};
use opptrack_model::seed;
use opptrack_query::store::Result as StoreResult;
use opptrack_query::{
    MemoryLocation, MemoryStatePort, PersistedState, StatePort, StateStore, Tracker,
};
use tokio::time::Instant;

use super::{CommandContext, CommandError, Result};
use crate::cli::FilterArgs;

/// The tracker as the CLI runs it.
pub type CliTracker = Tracker<CliStatePort, MemoryLocation>;

/// Persisted state for the CLI.
///
/// Uses the state file when a data directory exists and keeps state in memory
/// for this run otherwise.
#[derive(Debug)]
pub enum CliStatePort {
    File(StateStore),
    Memory(MemoryStatePort),
}

impl CliStatePort {
    /// Opens the state file at its default location.
    pub fn open() -> Self {
        Self::from_store(StateStore::new())
    }

    fn from_store(store: StoreResult<StateStore>) -> Self {
        match store {
            Ok(store) => Self::File(store),
            Err(e) => {
                tracing::warn!(error = %e, "state will not be saved for this run");
                Self::Memory(MemoryStatePort::new())
            }
        }
    }

    /// Path of the state file, `None` when state is kept in memory.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::File(store) => Some(store.path().as_path()),
            Self::Memory(_) => None,
        }
    }
}

impl StatePort for CliStatePort {
    fn load(&self) -> StoreResult<PersistedState> {
        match self {
            Self::File(store) => store.load(),
            Self::Memory(port) => port.load(),
        }
    }

    fn save(&mut self, state: &PersistedState) -> StoreResult<()> {
        match self {
            Self::File(store) => store.save(state),
            Self::Memory(port) => port.save(state),
        }
    }
}

/// Loads the applications from `path`, or the bundled dataset when `None`.
pub fn load_applications(path: Option<&Path>) -> Result<Vec<Application>> {
    match path {
        Some(path) => {
            let content = fs::read_to_string(path).map_err(|e| {
                CommandError::Data(format!("failed to read {}: {}", path.display(), e))
            })?;
            let apps: Vec<Application> = serde_json::from_str(&content).map_err(|e| {
                CommandError::Data(format!("failed to parse {}: {}", path.display(), e))
            })?;
            tracing::debug!(path = %path.display(), count = apps.len(), "loaded dataset");
            Ok(apps)
        }
        None => seed::applications()
            .map_err(|e| CommandError::Data(format!("bundled dataset is malformed: {}", e))),
    }
}

/// Opens a tracker whose location starts at `query`.
pub fn open_tracker(ctx: &CommandContext, query: Option<&str>) -> Result<CliTracker> {
    let applications = load_applications(ctx.data_path.as_deref())?;
    let store = CliStatePort::open();
    let location = query.map(MemoryLocation::with_query).unwrap_or_default();

    if ctx.verbose {
        match store.path() {
            Some(path) => eprintln!("Using state file {}", path.display()),
            None => eprintln!("Keeping state in memory"),
        }
    }

    Ok(Tracker::with_debounce(
        applications,
        store,
        location,
        ctx.debounce,
    ))
}

/// Opens a tracker and commits the criteria described by `args`.
///
/// # Errors
///
/// Returns an error if the dataset cannot be loaded or the resulting
/// criteria fail validation.
pub fn open_with_filters(ctx: &CommandContext, args: &FilterArgs) -> Result<CliTracker> {
    let mut tracker = open_tracker(ctx, args.url.as_deref())?;
    apply_filter_args(&mut tracker, args, Instant::now())?;
    Ok(tracker)
}

/// Commits the criteria described by `args` and settles them at once.
pub fn apply_filter_args(tracker: &mut CliTracker, args: &FilterArgs, now: Instant) -> Result<()> {
    if args.preset && !tracker.load_preset(now) {
        tracing::warn!("no preset saved, using default filters");
    }

    if has_criteria(args) {
        update_filters(tracker.draft_mut(), args);
        tracker.apply(now)?;
    }
    tracker.set_quick_filters(quick_filters(args));
    settle_now(tracker);
    Ok(())
}

/// Applies any pending committed change without waiting for the debounce.
pub fn settle_now(tracker: &mut CliTracker) {
    if let Some(deadline) = tracker.settle_deadline() {
        tracker.tick(deadline);
    }
}

/// Returns true if any criterion flag (not quick filter) was given.
pub fn has_criteria(args: &FilterArgs) -> bool {
    args.naics.is_some()
        || !args.set_aside.is_empty()
        || args.vehicle.is_some()
        || !args.agency.is_empty()
        || args.period.is_some()
        || args.start.is_some()
        || args.end.is_some()
        || args.min_ceiling.is_some()
        || args.max_ceiling.is_some()
        || !args.keyword.is_empty()
}

/// Overrides the fields of `filters` that `args` sets.
///
/// Giving `--start` or `--end` without `--period` selects a custom window.
pub fn update_filters(filters: &mut FilterState, args: &FilterArgs) {
    if let Some(naics) = &args.naics {
        filters.naics = naics.clone();
    }
    if !args.set_aside.is_empty() {
        filters.set_aside = args.set_aside.clone();
    }
    if let Some(vehicle) = &args.vehicle {
        filters.vehicle = vehicle.clone();
    }
    if !args.agency.is_empty() {
        filters.agency = args.agency.clone();
    }

    match args.period {
        Some(period) => filters.period_type = period.into(),
        None if args.start.is_some() || args.end.is_some() => {
            filters.period_type = PeriodType::Custom;
        }
        None => {}
    }
    if let Some(start) = &args.start {
        filters.start_date = start.clone();
    }
    if let Some(end) = &args.end {
        filters.end_date = end.clone();
    }

    if let Some(min) = &args.min_ceiling {
        filters.min_ceiling = min.clone();
    }
    if let Some(max) = &args.max_ceiling {
        filters.max_ceiling = max.clone();
    }
    for keyword in &args.keyword {
        filters.add_keyword(keyword);
    }
}

/// Quick filter toggles requested by `args`.
pub fn quick_filters(args: &FilterArgs) -> QuickFilters {
    QuickFilters {
        due30: args.due30,
        gsa_only: args.gsa_only,
        high_fit: args.high_fit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::PeriodArg;
    use opptrack_model::models::{SortConfig, SortDirection, SortField};
    use opptrack_query::StateStoreError;

    #[test]
    fn test_state_port_falls_back_to_memory() {
        let mut port = CliStatePort::from_store(Err(StateStoreError::NoDataDir));
        assert!(matches!(port, CliStatePort::Memory(_)));
        assert!(port.path().is_none());

        let state = PersistedState {
            sort: SortConfig::new(SortField::FitScore, SortDirection::Desc),
            preset: None,
            dark_mode: true,
        };
        port.save(&state).unwrap();
        let loaded = port.load().unwrap();
        assert!(loaded.dark_mode);
        assert_eq!(loaded.sort.field, SortField::FitScore);
    }

    #[test]
    fn test_state_port_uses_file_when_available() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("state.json");
        let mut port = CliStatePort::from_store(Ok(StateStore::with_path(path.clone())));
        assert_eq!(port.path(), Some(path.as_path()));

        port.save(&PersistedState::default()).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_update_filters_overrides_only_given_fields() {
        let mut filters = FilterState {
            naics: "541512".to_string(),
            vehicle: "GSA MAS".to_string(),
            ..Default::default()
        };
        let args = FilterArgs {
            agency: vec!["GSA".to_string()],
            vehicle: Some("CIO-SP3".to_string()),
            ..Default::default()
        };

        update_filters(&mut filters, &args);

        assert_eq!(filters.naics, "541512");
        assert_eq!(filters.vehicle, "CIO-SP3");
        assert_eq!(filters.agency, vec!["GSA"]);
    }

    #[test]
    fn test_dates_without_period_select_custom_window() {
        let mut filters = FilterState {
            period_type: PeriodType::Next60,
            ..Default::default()
        };
        let args = FilterArgs {
            start: Some("2026-11-01".to_string()),
            end: Some("2026-11-30".to_string()),
            ..Default::default()
        };

        update_filters(&mut filters, &args);

        assert_eq!(filters.period_type, PeriodType::Custom);
        assert_eq!(filters.start_date, "2026-11-01");
        assert_eq!(filters.end_date, "2026-11-30");
    }

    #[test]
    fn test_explicit_period_wins_over_dates() {
        let mut filters = FilterState::default();
        let args = FilterArgs {
            period: Some(PeriodArg::Next90),
            start: Some("2026-11-01".to_string()),
            ..Default::default()
        };

        update_filters(&mut filters, &args);
        assert_eq!(filters.period_type, PeriodType::Next90);
    }

    #[test]
    fn test_keywords_are_added_once() {
        let mut filters = FilterState {
            keywords: vec!["cloud".to_string()],
            ..Default::default()
        };
        let args = FilterArgs {
            keyword: vec!["cloud".to_string(), " data ".to_string(), "".to_string()],
            ..Default::default()
        };

        update_filters(&mut filters, &args);
        assert_eq!(filters.keywords, vec!["cloud", "data"]);
    }

    #[test]
    fn test_quick_filters_only_is_not_criteria() {
        let args = FilterArgs {
            due30: true,
            high_fit: true,
            ..Default::default()
        };
        assert!(!has_criteria(&args));

        let quick = quick_filters(&args);
        assert!(quick.due30);
        assert!(!quick.gsa_only);
        assert!(quick.high_fit);
    }

    #[test]
    fn test_load_applications_defaults_to_seed() {
        let apps = load_applications(None).unwrap();
        assert_eq!(apps.len(), 12);
    }

    #[test]
    fn test_load_applications_from_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("apps.json");
        fs::write(
            &path,
            r#"[{"id":"X-1","title":"Pilot","agency":"GSA","naics":"541512",
                "dueDate":"2026-12-01","status":"Ready"}]"#,
        )
        .unwrap();

        let apps = load_applications(Some(&path)).unwrap();
        assert_eq!(apps.len(), 1);
        assert_eq!(apps[0].id, "X-1");
        assert!(apps[0].set_aside.is_empty());
    }

    #[test]
    fn test_load_applications_reports_bad_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let missing = temp_dir.path().join("missing.json");
        let err = load_applications(Some(&missing)).unwrap_err();
        assert!(matches!(err, CommandError::Data(_)));
        assert!(err.to_string().contains("missing.json"));

        let broken = temp_dir.path().join("broken.json");
        fs::write(&broken, "[{").unwrap();
        assert!(matches!(
            load_applications(Some(&broken)),
            Err(CommandError::Data(_))
        ));
    }
}
