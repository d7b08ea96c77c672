//! Advisory validation of draft criteria.

use opptrack_model::models::FilterState;

use super::error::{FilterError, FilterResult};

/// Checks draft criteria before they are applied.
///
/// Only bounds that parse are compared; unparsable input is left to the
/// evaluator, which ignores it.
///
/// # Errors
///
/// - [`FilterError::CeilingRangeInverted`] when min ceiling exceeds max ceiling.
/// - [`FilterError::DateRangeInverted`] when a custom window starts after it ends.
pub fn validate(filters: &FilterState) -> FilterResult<()> {
    if let (Some(min), Some(max)) = (filters.min_ceiling_value(), filters.max_ceiling_value()) {
        if min > max {
            return Err(FilterError::CeilingRangeInverted { min, max });
        }
    }

    if let Some((start, end)) = filters.custom_range() {
        if start > end {
            return Err(FilterError::DateRangeInverted {
                start: filters.start_date.clone(),
                end: filters.end_date.clone(),
            });
        }
    }

    Ok(())
}
