//! String formatting for instants, in local and UTC form.

use chrono::{DateTime, Utc};

use crate::convert::CivilTimeConverter;
use crate::error::Result;
use crate::provider::{OffsetProvider, TzdbProvider};
use crate::registry::{self, TimezoneMetadata, DEFAULT_TIMEZONE};
use crate::types::OffsetInfo;
use crate::validate::validate_instant;

/// Format an offset in minutes as `±HH:MM` (e.g. `+05:30`, `-04:00`).
pub fn format_offset(offset_minutes: i32) -> String {
    let sign = if offset_minutes >= 0 { "+" } else { "-" };
    let abs = offset_minutes.unsigned_abs();
    format!("{sign}{:02}:{:02}", abs / 60, abs % 60)
}

/// Format `instant` as `"YYYY-MM-DD HH:MM:SS ABBR"` in `timezone`, using
/// `provider` for the offset.
pub fn to_timezone_string_with<P: OffsetProvider>(
    provider: P,
    instant: DateTime<Utc>,
    timezone: &str,
) -> Result<String> {
    let metadata = registry::metadata_for(timezone)?;
    let converter = CivilTimeConverter::new(provider);
    let info = converter.offset_at(instant, timezone)?;
    let civil = converter.utc_to_civil(instant, timezone)?;

    Ok(format!("{civil} {}", abbreviation(metadata, &info)))
}

/// Format `instant` as `"YYYY-MM-DD HH:MM:SS ABBR"` in `timezone`.
///
/// ABBR is the registry's preferred abbreviation for the active regime, or
/// the zone's fallback pattern (e.g. `GMT+09:00`) when it has none.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use zoned_time::to_timezone_string;
///
/// let noon = Utc.with_ymd_and_hms(2024, 7, 15, 12, 0, 0).unwrap();
/// assert_eq!(to_timezone_string(noon, "Europe/London").unwrap(), "2024-07-15 13:00:00 BST");
/// assert_eq!(to_timezone_string(noon, "Asia/Tokyo").unwrap(), "2024-07-15 21:00:00 GMT+09:00");
/// ```
pub fn to_timezone_string(instant: DateTime<Utc>, timezone: &str) -> Result<String> {
    to_timezone_string_with(TzdbProvider, instant, timezone)
}

/// [`to_timezone_string`] for `Europe/London` (`BST`/`GMT`).
pub fn to_london_string(instant: DateTime<Utc>) -> Result<String> {
    to_timezone_string(instant, DEFAULT_TIMEZONE)
}

/// Format `instant` as `"YYYY-MM-DD HH:MM:SS.ffffffZ"`.
///
/// Fixed width, so lexicographic order matches chronological order.
///
/// # Examples
///
/// ```
/// use chrono::{TimeDelta, TimeZone, Utc};
/// use zoned_time::to_utc_string;
///
/// let t = Utc.with_ymd_and_hms(2024, 1, 5, 8, 5, 5).unwrap() + TimeDelta::milliseconds(7);
/// assert_eq!(to_utc_string(t).unwrap(), "2024-01-05 08:05:05.007000Z");
/// ```
pub fn to_utc_string(instant: DateTime<Utc>) -> Result<String> {
    validate_instant(&instant)?;
    Ok(instant.format("%Y-%m-%d %H:%M:%S%.6fZ").to_string())
}

fn abbreviation(metadata: &TimezoneMetadata, info: &OffsetInfo) -> String {
    let preferred = metadata.abbreviations.and_then(|abbr| {
        if info.is_dst && metadata.observes_dst() {
            abbr.dst
        } else {
            Some(abbr.standard)
        }
    });

    match preferred {
        Some(abbr) => abbr.to_string(),
        None => metadata
            .fallback_format
            .replace("{offset}", &format_offset(info.utc_offset_minutes)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeDelta, TimeZone};

    #[test]
    fn test_format_offset() {
        assert_eq!(format_offset(0), "+00:00");
        assert_eq!(format_offset(60), "+01:00");
        assert_eq!(format_offset(-300), "-05:00");
        assert_eq!(format_offset(330), "+05:30");
        assert_eq!(format_offset(-570), "-09:30");
    }

    #[test]
    fn test_timezone_string_summer() {
        let noon = Utc.with_ymd_and_hms(2024, 7, 15, 12, 0, 0).unwrap();
        assert_eq!(
            to_timezone_string(noon, "America/New_York").unwrap(),
            "2024-07-15 08:00:00 EDT"
        );
        assert_eq!(
            to_timezone_string(noon, "Europe/Paris").unwrap(),
            "2024-07-15 14:00:00 CEST"
        );
        assert_eq!(
            to_timezone_string(noon, "Australia/Sydney").unwrap(),
            "2024-07-15 22:00:00 AEST"
        );
    }

    #[test]
    fn test_timezone_string_winter() {
        let noon = Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap();
        assert_eq!(to_london_string(noon).unwrap(), "2024-01-15 12:00:00 GMT");
        assert_eq!(
            to_timezone_string(noon, "America/New_York").unwrap(),
            "2024-01-15 07:00:00 EST"
        );
        assert_eq!(
            to_timezone_string(noon, "America/Los_Angeles").unwrap(),
            "2024-01-15 04:00:00 PST"
        );
    }

    #[test]
    fn test_timezone_string_fallback_format() {
        let noon = Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap();
        assert_eq!(
            to_timezone_string(noon, "Asia/Tokyo").unwrap(),
            "2024-01-15 21:00:00 GMT+09:00"
        );
    }

    #[test]
    fn test_timezone_string_at_range_start() {
        // First second of 1970 in Tokyo, still 1969 in UTC
        let at = Utc.with_ymd_and_hms(1969, 12, 31, 15, 0, 0).unwrap();
        assert_eq!(
            to_timezone_string(at, "Asia/Tokyo").unwrap(),
            "1970-01-01 00:00:00 GMT+09:00"
        );
    }

    #[test]
    fn test_timezone_string_rejects_unsupported() {
        let noon = Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap();
        assert!(to_timezone_string(noon, "Asia/Kolkata").is_err());
    }

    #[test]
    fn test_utc_string_padding_and_order() {
        let base = Utc.with_ymd_and_hms(2024, 7, 15, 14, 35, 42).unwrap();
        let a = to_utc_string(base + TimeDelta::milliseconds(123)).unwrap();
        let b = to_utc_string(base + TimeDelta::milliseconds(124)).unwrap();
        assert_eq!(a, "2024-07-15 14:35:42.123000Z");
        assert!(a < b);

        let whole = to_utc_string(base).unwrap();
        assert_eq!(whole, "2024-07-15 14:35:42.000000Z");
    }

    #[test]
    fn test_utc_string_out_of_range() {
        let early = Utc.with_ymd_and_hms(1960, 1, 1, 0, 0, 0).unwrap();
        assert!(to_utc_string(early).is_err());
    }
}
