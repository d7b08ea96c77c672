//! Option lists offered by the filter panel.
//!
//! These are the values a user picks from; the filter itself accepts any
//! string, so codes outside these lists simply match nothing.

use crate::models::PeriodType;

/// A selectable value and its display label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogOption {
    /// Value stored in the filter.
    pub value: &'static str,
    /// Label shown to the user.
    pub label: &'static str,
}

const fn option(value: &'static str, label: &'static str) -> CatalogOption {
    CatalogOption { value, label }
}

/// NAICS industry codes.
pub const NAICS_CODES: &[CatalogOption] = &[
    option("541511", "541511 - Custom Computer Programming"),
    option("541512", "541512 - Computer Systems Design"),
    option("541513", "541513 - Computer Facilities Management"),
    option("541519", "541519 - Other Computer Related Services"),
    option("517311", "517311 - Wired Telecom Carriers"),
];

/// Set-aside eligibility categories.
pub const SET_ASIDES: &[CatalogOption] = &[
    option("8(a)", "8(a) Business Development"),
    option("WOSB", "Women-Owned Small Business"),
    option("SB", "Small Business"),
    option("SDVOSB", "Service-Disabled Veteran-Owned"),
    option("HUBZone", "HUBZone"),
    option("VOSB", "Veteran-Owned Small Business"),
];

/// Contract vehicles.
pub const VEHICLES: &[CatalogOption] = &[
    option("GSA MAS", "GSA MAS"),
    option("Alliant 2", "Alliant 2"),
    option("CIO-SP3", "CIO-SP3"),
];

/// Agencies.
pub const AGENCIES: &[CatalogOption] = &[
    option("GSA", "General Services Administration (GSA)"),
    option("USDA", "Department of Agriculture (USDA)"),
    option("DOE", "Department of Energy (DOE)"),
    option("HHS", "Health & Human Services (HHS)"),
    option("VA", "Department of Veterans Affairs (VA)"),
    option("DHS", "Department of Homeland Security (DHS)"),
    option("DOC", "Department of Commerce (DOC)"),
    option("DOD", "Department of Defense (DOD)"),
    option("NOAA", "National Oceanic & Atmospheric Admin (NOAA)"),
    option("SSA", "Social Security Administration (SSA)"),
];

/// Rolling period chips.
pub const PERIODS: &[(PeriodType, &str)] = &[
    (PeriodType::Next30, "Next 30 days"),
    (PeriodType::Next60, "Next 60 days"),
    (PeriodType::Next90, "Next 90 days"),
];

/// Looks up the display label for an agency code.
pub fn agency_label(code: &str) -> Option<&'static str> {
    AGENCIES.iter().find(|o| o.value == code).map(|o| o.label)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_agency_label_lookup() {
        assert_eq!(
            agency_label("GSA"),
            Some("General Services Administration (GSA)")
        );
        assert_eq!(agency_label("NASA"), None);
    }

    #[test]
    fn test_period_chips_are_rolling_windows() {
        assert!(PERIODS.iter().all(|(period, _)| period.days().is_some()));
    }
}
