//! Location of DST transitions.
//!
//! The provider's `is_dst` flag is a step function of UTC time. A year is
//! scanned on a day grid to bracket each flip, then each bracket is bisected
//! down to [`SEARCH_PRECISION_SECONDS`]. The reported instant is the first
//! instant of the new regime.

use chrono::{DateTime, Datelike, NaiveDate, TimeDelta, Utc};

use crate::error::{Result, ZonedTimeError};
use crate::provider::{OffsetProvider, TzdbProvider};
use crate::registry::DEFAULT_TIMEZONE;
use crate::types::{DstTransitions, TransitionEvent, TransitionKind, MAX_YEAR, MIN_YEAR};
use crate::validate::{validate_instant, validate_year};

/// Spacing of the coarse `is_dst` scan. Must be shorter than the shortest
/// DST season (or standard-time season) of any supported zone.
pub const SCAN_STEP_SECONDS: i64 = 86_400;

/// Padding on each side of the naive year boundary, covering the largest
/// possible UTC offset.
pub const YEAR_PADDING_SECONDS: i64 = 86_400;

/// Width below which a bracket is considered resolved.
pub const SEARCH_PRECISION_SECONDS: i64 = 1;

/// Hard cap on bisection rounds; a one-day bracket needs 17.
pub const MAX_BISECTION_STEPS: u32 = 64;

/// Years searched past the starting year by [`next_transition_after`].
pub const NEXT_TRANSITION_YEAR_HORIZON: i32 = 5;

/// Finds DST transitions using an injected [`OffsetProvider`].
#[derive(Debug, Clone, Default)]
pub struct TransitionSearchEngine<P> {
    provider: P,
}

impl<P: OffsetProvider> TransitionSearchEngine<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    /// DST start and end within `year` of the zone's local calendar.
    ///
    /// Returns `None` when the zone does not both enter and leave DST that
    /// year, which is always the case for zones without DST.
    ///
    /// # Errors
    ///
    /// Returns [`ZonedTimeError::YearOutOfRange`] outside 1970-2100 and
    /// [`ZonedTimeError::UnsupportedTimezone`] if the provider rejects the zone.
    pub fn transitions_for_year(
        &self,
        year: i32,
        timezone: &str,
    ) -> Result<Option<DstTransitions>> {
        let events = self.events_for_year(year, timezone)?;
        let first_of = |kind| {
            events
                .iter()
                .find(|event| event.kind == kind)
                .map(|event| event.instant)
        };

        Ok(match (first_of(TransitionKind::Start), first_of(TransitionKind::End)) {
            (Some(start), Some(end)) => Some(DstTransitions { start, end }),
            _ => None,
        })
    }

    /// Every DST flip whose local civil date falls in `year`, in
    /// chronological order.
    pub fn events_for_year(&self, year: i32, timezone: &str) -> Result<Vec<TransitionEvent>> {
        validate_year(year)?;

        let scan_start = naive_year_start(year)? - YEAR_PADDING_SECONDS;
        let scan_end = naive_year_start(year + 1)? + YEAR_PADDING_SECONDS;

        let mut events = Vec::with_capacity(2);
        let mut prev = scan_start;
        let mut prev_dst = self.is_dst_at(timezone, prev)?;

        while prev < scan_end {
            let next = (prev + SCAN_STEP_SECONDS).min(scan_end);
            let next_dst = self.is_dst_at(timezone, next)?;

            if next_dst != prev_dst {
                let instant = self.bisect(timezone, prev, next, next_dst)?;
                let offset = self.provider.offset_at(timezone, instant)?;
                let local_year =
                    (instant + TimeDelta::minutes(i64::from(offset.utc_offset_minutes))).year();

                if local_year == year {
                    let kind = if next_dst {
                        TransitionKind::Start
                    } else {
                        TransitionKind::End
                    };
                    tracing::trace!(timezone, year, %kind, %instant, "located DST transition");
                    events.push(TransitionEvent {
                        instant,
                        kind,
                        year,
                    });
                }
            }

            prev = next;
            prev_dst = next_dst;
        }

        Ok(events)
    }

    /// The earliest DST transition strictly after `instant`.
    ///
    /// # Errors
    ///
    /// Returns [`ZonedTimeError::NoTransitions`] if none occurs within
    /// [`NEXT_TRANSITION_YEAR_HORIZON`] years (or before 2100 ends), which is
    /// always the case for zones without DST.
    pub fn next_transition_after(
        &self,
        instant: DateTime<Utc>,
        timezone: &str,
    ) -> Result<TransitionEvent> {
        validate_instant(&instant)?;

        // Events are grouped by local year, which may trail the UTC year
        let first_year = (instant.year() - 1).max(MIN_YEAR);
        let last_year = (instant.year() + NEXT_TRANSITION_YEAR_HORIZON).min(MAX_YEAR);

        for year in first_year..=last_year {
            let next = self
                .events_for_year(year, timezone)?
                .into_iter()
                .filter(|event| event.instant > instant)
                .min_by_key(|event| event.instant);
            if let Some(event) = next {
                return Ok(event);
            }
        }

        Err(ZonedTimeError::NoTransitions(format!(
            "{timezone} has no DST transition after {} (searched through {last_year})",
            instant.to_rfc3339()
        )))
    }

    /// Narrow `[lo, hi]` around the flip to `target`, where `is_dst(lo) != target`
    /// and `is_dst(hi) == target`. Returns the first instant holding `target`.
    fn bisect(
        &self,
        timezone: &str,
        mut lo: i64,
        mut hi: i64,
        target: bool,
    ) -> Result<DateTime<Utc>> {
        let mut steps = 0;
        while hi - lo > SEARCH_PRECISION_SECONDS && steps < MAX_BISECTION_STEPS {
            let mid = lo + (hi - lo) / 2;
            if self.is_dst_at(timezone, mid)? == target {
                hi = mid;
            } else {
                lo = mid;
            }
            steps += 1;
        }
        to_instant(hi)
    }

    fn is_dst_at(&self, timezone: &str, secs: i64) -> Result<bool> {
        Ok(self.provider.offset_at(timezone, to_instant(secs)?)?.is_dst)
    }
}

/// Unix seconds of `year`-01-01T00:00 read as if it were UTC.
fn naive_year_start(year: i32) -> Result<i64> {
    NaiveDate::from_ymd_opt(year, 1, 1)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc().timestamp())
        .ok_or(ZonedTimeError::YearOutOfRange(year))
}

fn to_instant(secs: i64) -> Result<DateTime<Utc>> {
    DateTime::from_timestamp(secs, 0)
        .ok_or_else(|| ZonedTimeError::InvalidInstant(format!("unix seconds {secs}")))
}

/// DST start and end for `year` in `timezone`, using the IANA database.
///
/// # Examples
///
/// ```
/// use zoned_time::transitions_for_year;
///
/// let dst = transitions_for_year(2024, "Europe/London").unwrap().unwrap();
/// assert_eq!(dst.start.to_rfc3339(), "2024-03-31T01:00:00+00:00");
/// assert_eq!(dst.end.to_rfc3339(), "2024-10-27T01:00:00+00:00");
///
/// assert!(transitions_for_year(2024, "Asia/Tokyo").unwrap().is_none());
/// ```
pub fn transitions_for_year(year: i32, timezone: &str) -> Result<Option<DstTransitions>> {
    TransitionSearchEngine::new(TzdbProvider).transitions_for_year(year, timezone)
}

/// The next DST transition after `instant` in `timezone`, using the IANA
/// database.
pub fn next_transition_after(instant: DateTime<Utc>, timezone: &str) -> Result<TransitionEvent> {
    TransitionSearchEngine::new(TzdbProvider).next_transition_after(instant, timezone)
}

/// BST start and end for `year`.
pub fn clock_change_dates(year: i32) -> Result<Option<DstTransitions>> {
    transitions_for_year(year, DEFAULT_TIMEZONE)
}

/// The next GMT/BST clock change after `instant`.
pub fn next_clock_change(instant: DateTime<Utc>) -> Result<TransitionEvent> {
    next_transition_after(instant, DEFAULT_TIMEZONE)
}
