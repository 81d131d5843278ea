//! The `OffsetProvider` capability and its IANA-database implementation.
//!
//! Conversion and transition search never consult a timezone database
//! directly. They ask an injected provider for the offset in effect at a UTC
//! instant, so both engines can be exercised against synthetic schedules.

use chrono::{DateTime, Offset, TimeZone, Utc};
use chrono_tz::{OffsetComponents, Tz};

use crate::error::{Result, ZonedTimeError};
use crate::registry;
use crate::types::OffsetInfo;

/// Source of truth for "which UTC offset is in effect at this instant".
///
/// Implementations must be pure: the same `(timezone, instant)` pair always
/// yields the same answer, and queries may run concurrently.
pub trait OffsetProvider {
    /// Resolve the offset in effect in `timezone` at `instant`.
    ///
    /// # Errors
    ///
    /// Returns [`ZonedTimeError::UnsupportedTimezone`] if the provider does
    /// not recognize `timezone`.
    fn offset_at(&self, timezone: &str, instant: DateTime<Utc>) -> Result<OffsetInfo>;
}

impl<P: OffsetProvider + ?Sized> OffsetProvider for &P {
    fn offset_at(&self, timezone: &str, instant: DateTime<Utc>) -> Result<OffsetInfo> {
        (**self).offset_at(timezone, instant)
    }
}

/// Provider backed by the IANA database compiled into `chrono-tz`.
///
/// Only identifiers present in the [registry](crate::registry) are accepted.
#[derive(Debug, Clone, Copy, Default)]
pub struct TzdbProvider;

impl TzdbProvider {
    pub fn new() -> Self {
        Self
    }
}

impl OffsetProvider for TzdbProvider {
    fn offset_at(&self, timezone: &str, instant: DateTime<Utc>) -> Result<OffsetInfo> {
        let tz = parse_timezone(timezone)?;
        let offset = tz.offset_from_utc_datetime(&instant.naive_utc());
        let abbreviation = offset.to_string();

        Ok(OffsetInfo {
            utc_offset_minutes: offset.fix().local_minus_utc() / 60,
            is_dst: offset.dst_offset().num_seconds() != 0,
            abbreviation: (!abbreviation.is_empty()).then_some(abbreviation),
        })
    }
}

/// Parse a registered IANA timezone string into `Tz`.
fn parse_timezone(s: &str) -> Result<Tz> {
    registry::metadata_for(s)?;
    s.parse::<Tz>()
        .map_err(|_| ZonedTimeError::UnsupportedTimezone(format!("'{s}' not in tz database")))
}
