//! List command implementation.
//!
//! Lists applications matching the filters, in the persisted sort order.

use opptrack_model::models::{Application, SortConfig, SortDirection};
use opptrack_query::filter::encode_query_string;
use opptrack_query::FilterContext;

use super::workspace::{open_with_filters, CliTracker};
use super::{CommandContext, Result};
use crate::cli::{FilterArgs, SortArg};
use crate::output::{format_applications_json, format_applications_table, ListOutput};

/// Options for the list command.
#[derive(Debug)]
pub struct ListOptions {
    /// Filter criteria.
    pub filters: FilterArgs,
    /// Sort field to switch to.
    pub sort: Option<SortArg>,
    /// Sort descending.
    pub desc: bool,
    /// Sort ascending.
    pub asc: bool,
    /// Limit results.
    pub limit: Option<usize>,
}

/// Executes the list command.
///
/// # Errors
///
/// Returns an error if the dataset cannot be loaded, the criteria are
/// invalid, or a changed sort order cannot be persisted.
pub fn execute(ctx: &CommandContext, opts: &ListOptions) -> Result<()> {
    let mut tracker = open_with_filters(ctx, &opts.filters)?;

    let sort = requested_sort(tracker.sort(), opts);
    if sort != tracker.sort() {
        tracker.set_sort(sort)?;
    }

    let context = FilterContext::now();
    let query = encode_query_string(tracker.settled())?;
    let keywords = tracker.settled().keywords.clone();
    let quick_filters = tracker.quick_filters();
    let settled = tracker.settled().clone();

    let view = tracker.view(&context);
    let total = view.len();
    let shown = apply_limit(&view, opts.limit);

    if ctx.json_output {
        let output = ListOutput {
            applications: shown,
            total,
            filters: &settled,
            quick_filters,
            sort,
            query: &query,
        };
        println!("{}", format_applications_json(&output)?);
    } else if !ctx.quiet {
        print!(
            "{}",
            format_applications_table(shown, &keywords, context.today(), ctx.use_colors)
        );
        if shown.len() < total {
            println!("({} of {} shown)", shown.len(), total);
        }
    }

    Ok(())
}

/// Returns the sort order after applying `--sort`, `--desc` and `--asc`.
fn requested_sort(current: SortConfig, opts: &ListOptions) -> SortConfig {
    let mut sort = current;
    if let Some(field) = opts.sort {
        sort.field = field.into();
    }
    if opts.desc {
        sort.direction = SortDirection::Desc;
    } else if opts.asc {
        sort.direction = SortDirection::Asc;
    }
    sort
}

/// Applies the limit to the view.
fn apply_limit<'v, 'a>(view: &'v [&'a Application], limit: Option<usize>) -> &'v [&'a Application] {
    match limit {
        Some(limit) if limit < view.len() => &view[..limit],
        _ => view,
    }
}

/// Renders the current view of `tracker` as a table.
///
/// Used by the interactive session.
pub fn render_view(ctx: &CommandContext, tracker: &mut CliTracker, limit: Option<usize>) {
    let context = FilterContext::now();
    let keywords = tracker.settled().keywords.clone();
    let view = tracker.view(&context);
    let shown = apply_limit(&view, limit);
    print!(
        "{}",
        format_applications_table(shown, &keywords, context.today(), ctx.use_colors)
    );
    if shown.len() < view.len() {
        println!("({} of {} shown)", shown.len(), view.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use opptrack_model::models::SortField;
    use opptrack_model::seed;

    fn options() -> ListOptions {
        ListOptions {
            filters: FilterArgs::default(),
            sort: None,
            desc: false,
            asc: false,
            limit: None,
        }
    }

    #[test]
    fn test_requested_sort_keeps_current_by_default() {
        let current = SortConfig::new(SortField::FitScore, SortDirection::Desc);
        assert_eq!(requested_sort(current, &options()), current);
    }

    #[test]
    fn test_requested_sort_field_keeps_direction() {
        let current = SortConfig::new(SortField::DueDate, SortDirection::Desc);
        let opts = ListOptions {
            sort: Some(SortArg::Progress),
            ..options()
        };
        assert_eq!(
            requested_sort(current, &opts),
            SortConfig::new(SortField::PercentComplete, SortDirection::Desc)
        );
    }

    #[test]
    fn test_requested_sort_direction_only() {
        let opts = ListOptions {
            asc: true,
            ..options()
        };
        let current = SortConfig::new(SortField::FitScore, SortDirection::Desc);
        assert_eq!(
            requested_sort(current, &opts),
            SortConfig::new(SortField::FitScore, SortDirection::Asc)
        );
    }

    #[test]
    fn test_apply_limit() {
        let apps = seed::applications().unwrap();
        let view: Vec<&Application> = apps.iter().collect();

        assert_eq!(apply_limit(&view, None).len(), 12);
        assert_eq!(apply_limit(&view, Some(5)).len(), 5);
        assert_eq!(apply_limit(&view, Some(50)).len(), 12);
        assert_eq!(apply_limit(&view, Some(0)).len(), 0);
    }
}
