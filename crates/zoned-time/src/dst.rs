//! DST status at an instant.

use chrono::{DateTime, Utc};

use crate::convert::CivilTimeConverter;
use crate::error::Result;
use crate::provider::{OffsetProvider, TzdbProvider};
use crate::registry::{self, DEFAULT_TIMEZONE};

/// Whether `instant` falls in DST in `timezone`, using `provider`.
///
/// Zones registered without a DST offset are never in DST, regardless of
/// what the provider reports.
pub fn is_dst_with<P: OffsetProvider>(
    provider: P,
    instant: DateTime<Utc>,
    timezone: &str,
) -> Result<bool> {
    let metadata = registry::metadata_for(timezone)?;
    let info = CivilTimeConverter::new(provider).offset_at(instant, timezone)?;
    Ok(metadata.observes_dst() && info.is_dst)
}

/// Whether `instant` falls in DST in `timezone`.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use zoned_time::is_dst;
///
/// let summer = Utc.with_ymd_and_hms(2024, 7, 15, 12, 0, 0).unwrap();
/// assert!(is_dst(summer, "Europe/London").unwrap());
/// assert!(!is_dst(summer, "Asia/Tokyo").unwrap());
/// ```
pub fn is_dst(instant: DateTime<Utc>, timezone: &str) -> Result<bool> {
    is_dst_with(TzdbProvider, instant, timezone)
}

/// Whether `instant` falls in British Summer Time.
pub fn is_bst(instant: DateTime<Utc>) -> Result<bool> {
    is_dst(instant, DEFAULT_TIMEZONE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ZonedTimeError;
    use chrono::TimeZone;

    #[test]
    fn test_is_dst_by_season() {
        let summer = Utc.with_ymd_and_hms(2024, 7, 15, 12, 0, 0).unwrap();
        let winter = Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap();

        assert!(is_dst(summer, "America/New_York").unwrap());
        assert!(!is_dst(winter, "America/New_York").unwrap());
        // Southern hemisphere is inverted
        assert!(!is_dst(summer, "Australia/Sydney").unwrap());
        assert!(is_dst(winter, "Australia/Sydney").unwrap());
    }

    #[test]
    fn test_is_bst_at_transition_edges() {
        let start = Utc.with_ymd_and_hms(2024, 3, 31, 1, 0, 0).unwrap();
        assert!(is_bst(start).unwrap());
        assert!(!is_bst(start - chrono::TimeDelta::seconds(1)).unwrap());

        let end = Utc.with_ymd_and_hms(2024, 10, 27, 1, 0, 0).unwrap();
        assert!(!is_bst(end).unwrap());
        assert!(is_bst(end - chrono::TimeDelta::seconds(1)).unwrap());
    }

    #[test]
    fn test_is_dst_rejects_bad_input() {
        let at = Utc.with_ymd_and_hms(2024, 7, 15, 12, 0, 0).unwrap();
        assert!(matches!(
            is_dst(at, "Nowhere/Special"),
            Err(ZonedTimeError::UnsupportedTimezone(_))
        ));
        let too_late = Utc.with_ymd_and_hms(2150, 7, 15, 12, 0, 0).unwrap();
        assert!(matches!(
            is_dst(too_late, "Asia/Tokyo"),
            Err(ZonedTimeError::InvalidInstant(_))
        ));
    }
}
