//! Query-string encoding of filter criteria.
//!
//! Committed criteria are mirrored into a flat query string so a filtered view
//! can be shared as a link. List fields are comma-joined, scalar fields are
//! written as-is and empty fields are omitted. The period is always written,
//! so an otherwise default state encodes as `periodType=custom`.
//!
//! # Example
//!
//! ```
//! use opptrack_model::models::{FilterState, PeriodType};
//! use opptrack_query::filter::{decode_query_string, encode_query_string};
//!
//! let filters = FilterState {
//!     agency: vec!["GSA".to_string(), "DOE".to_string()],
//!     period_type: PeriodType::Next60,
//!     ..Default::default()
//! };
//!
//! let query = encode_query_string(&filters).unwrap();
//! assert_eq!(query, "agency=GSA%2CDOE&periodType=60");
//!
//! let decoded = decode_query_string(&query).unwrap().unwrap();
//! assert_eq!(decoded, filters);
//! ```

use opptrack_model::models::{FilterState, PeriodType};

use super::error::{FilterError, FilterResult};

/// Separator used for list-valued parameters.
pub const LIST_SEPARATOR: char = ',';

/// Parameter names recognized in a query string.
pub const RECOGNIZED_PARAMS: [&str; 10] = [
    "naics",
    "setAside",
    "vehicle",
    "agency",
    "periodType",
    "startDate",
    "endDate",
    "minCeiling",
    "maxCeiling",
    "keywords",
];

/// Raw parameters as they appear in the query string.
#[derive(Debug, Default)]
struct QueryParams {
    naics: Option<String>,
    set_aside: Option<String>,
    vehicle: Option<String>,
    agency: Option<String>,
    period_type: Option<String>,
    start_date: Option<String>,
    end_date: Option<String>,
    min_ceiling: Option<String>,
    max_ceiling: Option<String>,
    keywords: Option<String>,
}

impl QueryParams {
    /// Keeps the first value of each recognized key.
    fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "naics" => &mut params.naics,
                "setAside" => &mut params.set_aside,
                "vehicle" => &mut params.vehicle,
                "agency" => &mut params.agency,
                "periodType" => &mut params.period_type,
                "startDate" => &mut params.start_date,
                "endDate" => &mut params.end_date,
                "minCeiling" => &mut params.min_ceiling,
                "maxCeiling" => &mut params.max_ceiling,
                "keywords" => &mut params.keywords,
                _ => continue,
            };
            slot.get_or_insert(value);
        }
        params
    }

    fn is_empty(&self) -> bool {
        self.naics.is_none()
            && self.set_aside.is_none()
            && self.vehicle.is_none()
            && self.agency.is_none()
            && self.period_type.is_none()
            && self.start_date.is_none()
            && self.end_date.is_none()
            && self.min_ceiling.is_none()
            && self.max_ceiling.is_none()
            && self.keywords.is_none()
    }

    /// Every absent field falls back to its default independently.
    fn into_filter_state(self) -> FilterState {
        FilterState {
            naics: self.naics.unwrap_or_default(),
            set_aside: split_list(self.set_aside),
            vehicle: self.vehicle.unwrap_or_default(),
            agency: split_list(self.agency),
            period_type: self
                .period_type
                .and_then(|p| p.parse::<PeriodType>().ok())
                .unwrap_or_default(),
            start_date: self.start_date.unwrap_or_default(),
            end_date: self.end_date.unwrap_or_default(),
            min_ceiling: self.min_ceiling.unwrap_or_default(),
            max_ceiling: self.max_ceiling.unwrap_or_default(),
            keywords: split_list(self.keywords),
        }
    }
}

fn split_list(value: Option<String>) -> Vec<String> {
    value
        .map(|v| {
            v.split(LIST_SEPARATOR)
                .filter(|part| !part.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// Encodes filter criteria as a query string, without a leading `?`.
///
/// The period is always present, so the result is never empty.
///
/// # Errors
///
/// Returns [`FilterError::InvalidQueryString`] if the encoder rejects a value.
pub fn encode_query_string(filters: &FilterState) -> FilterResult<String> {
    let mut pairs: Vec<(&str, String)> = Vec::new();

    let mut push_scalar = |key: &'static str, value: &str| {
        if !value.is_empty() {
            pairs.push((key, value.to_string()));
        }
    };
    push_scalar("naics", &filters.naics);
    push_scalar("setAside", &join_list(&filters.set_aside));
    push_scalar("vehicle", &filters.vehicle);
    push_scalar("agency", &join_list(&filters.agency));
    push_scalar("periodType", filters.period_type.as_str());
    push_scalar("startDate", &filters.start_date);
    push_scalar("endDate", &filters.end_date);
    push_scalar("minCeiling", &filters.min_ceiling);
    push_scalar("maxCeiling", &filters.max_ceiling);
    push_scalar("keywords", &join_list(&filters.keywords));

    serde_urlencoded::to_string(&pairs)
        .map_err(|e| FilterError::invalid_query_string(e.to_string()))
}

fn join_list(values: &[String]) -> String {
    values.join(&LIST_SEPARATOR.to_string())
}

/// Decodes filter criteria from a query string.
///
/// A leading `?` is ignored. Returns `Ok(None)` when the query carries none of
/// the [`RECOGNIZED_PARAMS`], so the caller can fall back to its defaults.
/// Unknown parameters are ignored, an unknown `periodType` decodes as custom
/// and a repeated parameter keeps its first value.
///
/// # Errors
///
/// Returns [`FilterError::InvalidQueryString`] if the query is not valid
/// `application/x-www-form-urlencoded` data.
pub fn decode_query_string(query: &str) -> FilterResult<Option<FilterState>> {
    let query = query.trim().trim_start_matches('?');
    if query.is_empty() {
        return Ok(None);
    }

    let pairs: Vec<(String, String)> = serde_urlencoded::from_str(query)
        .map_err(|e| FilterError::invalid_query_string(e.to_string()))?;
    let params = QueryParams::from_pairs(pairs);

    if params.is_empty() {
        return Ok(None);
    }

    Ok(Some(params.into_filter_state()))
}
