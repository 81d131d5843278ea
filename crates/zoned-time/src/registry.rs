//! Static registry of supported timezones and their display metadata.
//!
//! The registry only carries what formatting needs (preferred abbreviations,
//! nominal offsets, a fallback pattern). Actual offsets and DST status at a
//! given instant always come from an [`OffsetProvider`](crate::OffsetProvider).

use serde::Serialize;

use crate::error::{Result, ZonedTimeError};
use crate::validate::validate_timezone_format;

/// Timezone used by the `*_london` conveniences and as the configuration
/// default.
pub const DEFAULT_TIMEZONE: &str = "Europe/London";

/// Preferred abbreviations for standard and daylight time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PreferredAbbreviations {
    pub standard: &'static str,
    pub dst: Option<&'static str>,
}

/// Display metadata for one supported timezone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimezoneMetadata {
    /// IANA identifier.
    pub id: &'static str,
    /// Nominal UTC offset in minutes during standard time.
    pub standard_offset: i32,
    /// Nominal UTC offset in minutes during DST, if the zone observes it.
    pub dst_offset: Option<i32>,
    pub abbreviations: Option<PreferredAbbreviations>,
    /// Pattern used when no abbreviation applies; `{offset}` is replaced by
    /// `±HH:MM`.
    pub fallback_format: &'static str,
}

impl TimezoneMetadata {
    pub fn observes_dst(&self) -> bool {
        self.dst_offset.is_some()
    }
}

const fn abbreviations(
    standard: &'static str,
    dst: Option<&'static str>,
) -> Option<PreferredAbbreviations> {
    Some(PreferredAbbreviations { standard, dst })
}

static REGISTRY: [TimezoneMetadata; 7] = [
    TimezoneMetadata {
        id: "Europe/London",
        standard_offset: 0,
        dst_offset: Some(60),
        abbreviations: abbreviations("GMT", Some("BST")),
        fallback_format: "GMT{offset}",
    },
    TimezoneMetadata {
        id: "America/New_York",
        standard_offset: -300,
        dst_offset: Some(-240),
        abbreviations: abbreviations("EST", Some("EDT")),
        fallback_format: "GMT{offset}",
    },
    TimezoneMetadata {
        id: "America/Los_Angeles",
        standard_offset: -480,
        dst_offset: Some(-420),
        abbreviations: abbreviations("PST", Some("PDT")),
        fallback_format: "GMT{offset}",
    },
    TimezoneMetadata {
        id: "Europe/Paris",
        standard_offset: 60,
        dst_offset: Some(120),
        abbreviations: abbreviations("CET", Some("CEST")),
        fallback_format: "GMT{offset}",
    },
    TimezoneMetadata {
        id: "Europe/Berlin",
        standard_offset: 60,
        dst_offset: Some(120),
        abbreviations: abbreviations("CET", Some("CEST")),
        fallback_format: "GMT{offset}",
    },
    TimezoneMetadata {
        id: "Asia/Tokyo",
        standard_offset: 540,
        dst_offset: None,
        abbreviations: None,
        fallback_format: "GMT{offset}",
    },
    TimezoneMetadata {
        id: "Australia/Sydney",
        standard_offset: 600,
        dst_offset: Some(660),
        abbreviations: abbreviations("AEST", Some("AEDT")),
        fallback_format: "GMT{offset}",
    },
];

/// Look up the metadata for a supported timezone.
///
/// # Errors
///
/// Returns [`ZonedTimeError::UnsupportedTimezone`] if the identifier is
/// malformed or not in the registry. The message lists the supported zones.
pub fn metadata_for(timezone: &str) -> Result<&'static TimezoneMetadata> {
    validate_timezone_format(timezone)?;
    REGISTRY
        .iter()
        .find(|meta| meta.id == timezone)
        .ok_or_else(|| {
            let supported: Vec<&str> = supported_timezones().collect();
            ZonedTimeError::UnsupportedTimezone(format!(
                "'{timezone}'. Supported timezones: {}",
                supported.join(", ")
            ))
        })
}

pub fn is_supported_timezone(timezone: &str) -> bool {
    REGISTRY.iter().any(|meta| meta.id == timezone)
}

/// All supported identifiers, in registry order.
pub fn supported_timezones() -> impl Iterator<Item = &'static str> {
    REGISTRY.iter().map(|meta| meta.id)
}
