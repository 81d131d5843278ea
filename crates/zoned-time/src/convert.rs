//! Conversion between UTC instants and civil (wall-clock) time.
//!
//! UTC → civil is a single offset lookup. Civil → UTC is the hard direction:
//! a wall-clock reading may map to one instant, to two (autumn fallback), or
//! to none (spring-forward gap). Every reading is first classified into a
//! [`CivilTimeResolution`] and only then resolved:
//!
//! - **Unambiguous**: the single instant.
//! - **Ambiguous**: the earlier instant ("first occurrence wins").
//! - **Gap**: the first existing civil time found by stepping forward
//!   [`GAP_SEARCH_STEP_MINUTES`] at a time, up to
//!   [`GAP_SEARCH_HORIZON_MINUTES`].
//!
//! Classification uses a fixed-point check per candidate offset: interpret
//! the reading with the offset, look up the offset actually in effect at
//! that instant, reinterpret, and keep the instant only if it reproduces the
//! reading exactly.

use chrono::{DateTime, Datelike, NaiveDateTime, TimeDelta, Utc};

use crate::error::{Result, ZonedTimeError};
use crate::provider::{OffsetProvider, TzdbProvider};
use crate::registry::DEFAULT_TIMEZONE;
use crate::types::{CivilTime, OffsetInfo, MAX_YEAR, MIN_YEAR};

/// Granularity of the forward search out of a spring-forward gap.
pub const GAP_SEARCH_STEP_MINUTES: i64 = 1;

/// How far past a non-existent civil time the gap search may look. Real
/// world DST shifts are under two hours.
pub const GAP_SEARCH_HORIZON_MINUTES: i64 = 180;

/// Candidate offsets are sampled this far either side of the civil reading,
/// which brackets any transition that could affect it.
const OFFSET_SAMPLE_WINDOW_HOURS: i64 = 24;

/// Outcome of mapping a civil time onto the UTC timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CivilTimeResolution {
    Unambiguous(DateTime<Utc>),
    /// The reading falls in a spring-forward gap. Any instant resolving the
    /// gap lies at or after `lower_bound`.
    Gap { lower_bound: DateTime<Utc> },
    /// The reading occurs twice; `first < second`.
    Ambiguous {
        first: DateTime<Utc>,
        second: DateTime<Utc>,
    },
}

/// Converts between instants and civil time using an injected
/// [`OffsetProvider`].
#[derive(Debug, Clone, Default)]
pub struct CivilTimeConverter<P> {
    provider: P,
}

impl<P: OffsetProvider> CivilTimeConverter<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// The offset in effect in `timezone` at `instant`.
    ///
    /// The instant is in range when its civil reading in `timezone` is, so
    /// 1969-12-31T15:00Z is accepted for Tokyo (1970-01-01 00:00 JST).
    pub fn offset_at(&self, instant: DateTime<Utc>, timezone: &str) -> Result<OffsetInfo> {
        self.local_reading(instant, timezone).map(|(info, _)| info)
    }

    /// Express `instant` as a civil time in `timezone`.
    ///
    /// Sub-second precision is dropped.
    ///
    /// # Errors
    ///
    /// Returns [`ZonedTimeError::InvalidInstant`] if the civil time the
    /// instant maps to lies outside 1970-2100, and
    /// [`ZonedTimeError::UnsupportedTimezone`] if the provider rejects the zone.
    pub fn utc_to_civil(&self, instant: DateTime<Utc>, timezone: &str) -> Result<CivilTime> {
        self.local_reading(instant, timezone)
            .map(|(_, local)| CivilTime::from_naive(&local))
    }

    /// The provider's offset at `instant` and the wall-clock reading it
    /// produces, which must fall within 1970-2100.
    fn local_reading(
        &self,
        instant: DateTime<Utc>,
        timezone: &str,
    ) -> Result<(OffsetInfo, NaiveDateTime)> {
        let info = self.provider.offset_at(timezone, instant)?;
        let local = instant
            .naive_utc()
            .checked_add_signed(TimeDelta::minutes(i64::from(info.utc_offset_minutes)))
            .filter(|local| (MIN_YEAR..=MAX_YEAR).contains(&local.year()))
            .ok_or_else(|| {
                ZonedTimeError::InvalidInstant(format!(
                    "{} is outside {MIN_YEAR}-{MAX_YEAR} in {timezone}",
                    instant.to_rfc3339()
                ))
            })?;
        Ok((info, local))
    }

    /// Map a civil time in `timezone` to a UTC instant.
    ///
    /// Ambiguous readings resolve to the earlier instant; readings inside a
    /// gap resolve to the first existing civil time after them.
    ///
    /// # Errors
    ///
    /// Returns [`ZonedTimeError::InvalidCivilTime`] for out-of-range fields,
    /// [`ZonedTimeError::UnsupportedTimezone`] if the provider rejects the
    /// zone, and [`ZonedTimeError::UnresolvableCivilTime`] if no existing
    /// civil time is found within the gap search horizon.
    pub fn civil_to_utc(&self, civil: &CivilTime, timezone: &str) -> Result<DateTime<Utc>> {
        let naive = civil.to_naive()?;

        match self.classify(naive, timezone)? {
            CivilTimeResolution::Unambiguous(instant) => Ok(instant),
            CivilTimeResolution::Ambiguous { first, second } => {
                tracing::debug!(
                    timezone,
                    civil = %naive,
                    %first,
                    %second,
                    "ambiguous civil time resolved to first occurrence"
                );
                Ok(first)
            }
            CivilTimeResolution::Gap { lower_bound } => {
                self.resolve_gap(naive, timezone, lower_bound)
            }
        }
    }

    /// Classify a naive civil reading without choosing a resolution.
    pub(crate) fn classify(
        &self,
        naive: NaiveDateTime,
        timezone: &str,
    ) -> Result<CivilTimeResolution> {
        let offsets = self.candidate_offsets(naive, timezone)?;

        let mut valid: Vec<DateTime<Utc>> = Vec::with_capacity(offsets.len());
        for &offset in &offsets {
            if let Some(instant) = self.fixed_point(naive, offset, timezone)? {
                if !valid.contains(&instant) {
                    valid.push(instant);
                }
            }
        }
        valid.sort();

        Ok(match valid.as_slice() {
            [] => {
                // Interpreting the reading with the post-transition (larger)
                // offset lands before the transition instant.
                let largest = offsets.iter().copied().max().unwrap_or_default();
                CivilTimeResolution::Gap {
                    lower_bound: interpret(naive, largest),
                }
            }
            [only] => CivilTimeResolution::Unambiguous(*only),
            [first, .., last] => CivilTimeResolution::Ambiguous {
                first: *first,
                second: *last,
            },
        })
    }

    /// The distinct offsets in effect around `naive`, standard time first.
    ///
    /// A zone without a transition near the reading yields a single offset,
    /// which can be neither ambiguous nor gapped.
    fn candidate_offsets(&self, naive: NaiveDateTime, timezone: &str) -> Result<Vec<i32>> {
        let window = TimeDelta::hours(OFFSET_SAMPLE_WINDOW_HOURS);
        let before = self.provider.offset_at(timezone, naive.and_utc() - window)?;
        let after = self.provider.offset_at(timezone, naive.and_utc() + window)?;

        if before.utc_offset_minutes == after.utc_offset_minutes {
            return Ok(vec![before.utc_offset_minutes]);
        }
        let (standard, dst) = if before.is_dst && !after.is_dst {
            (after, before)
        } else {
            (before, after)
        };
        Ok(vec![standard.utc_offset_minutes, dst.utc_offset_minutes])
    }

    /// Interpret `naive` with `assumed_offset`, correct the offset once, and
    /// keep the result only if it reproduces `naive`.
    fn fixed_point(
        &self,
        naive: NaiveDateTime,
        assumed_offset: i32,
        timezone: &str,
    ) -> Result<Option<DateTime<Utc>>> {
        let guess_a = interpret(naive, assumed_offset);
        let offset_a = self.provider.offset_at(timezone, guess_a)?.utc_offset_minutes;

        let guess_b = interpret(naive, offset_a);
        let offset_b = self.provider.offset_at(timezone, guess_b)?.utc_offset_minutes;

        Ok((apply_offset(guess_b, offset_b) == naive).then_some(guess_b))
    }

    fn resolve_gap(
        &self,
        naive: NaiveDateTime,
        timezone: &str,
        lower_bound: DateTime<Utc>,
    ) -> Result<DateTime<Utc>> {
        let step = TimeDelta::minutes(GAP_SEARCH_STEP_MINUTES);
        let mut probe = naive;

        for _ in 0..(GAP_SEARCH_HORIZON_MINUTES / GAP_SEARCH_STEP_MINUTES) {
            probe += step;
            match self.classify(probe, timezone)? {
                CivilTimeResolution::Unambiguous(instant)
                | CivilTimeResolution::Ambiguous { first: instant, .. } => {
                    tracing::debug!(
                        timezone,
                        civil = %naive,
                        resolved_civil = %probe,
                        %instant,
                        %lower_bound,
                        "non-existent civil time advanced past gap"
                    );
                    return Ok(instant);
                }
                CivilTimeResolution::Gap { .. } => {}
            }
        }

        Err(ZonedTimeError::UnresolvableCivilTime(format!(
            "{naive} does not exist in {timezone} and no valid time was found within \
             {GAP_SEARCH_HORIZON_MINUTES} minutes"
        )))
    }
}

/// The instant at which a clock showing `naive` with `offset_minutes` reads.
fn interpret(naive: NaiveDateTime, offset_minutes: i32) -> DateTime<Utc> {
    (naive - TimeDelta::minutes(i64::from(offset_minutes))).and_utc()
}

/// The civil reading of `instant` under `offset_minutes`.
fn apply_offset(instant: DateTime<Utc>, offset_minutes: i32) -> NaiveDateTime {
    instant.naive_utc() + TimeDelta::minutes(i64::from(offset_minutes))
}

/// Express `instant` as civil time in `timezone` using the IANA database.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use zoned_time::utc_to_civil;
///
/// let noon = Utc.with_ymd_and_hms(2024, 7, 15, 12, 0, 0).unwrap();
/// let civil = utc_to_civil(noon, "Europe/London").unwrap();
/// // BST is UTC+1
/// assert_eq!(civil.hour, 13);
/// ```
pub fn utc_to_civil(instant: DateTime<Utc>, timezone: &str) -> Result<CivilTime> {
    CivilTimeConverter::new(TzdbProvider).utc_to_civil(instant, timezone)
}

/// Map a civil time in `timezone` to UTC using the IANA database.
///
/// # Examples
///
/// ```
/// use zoned_time::{civil_to_utc, CivilTime};
///
/// // 01:30 on 27 Oct 2024 happens twice in London; the BST reading wins.
/// let civil = CivilTime::new(2024, 10, 27, 1, 30, 0).unwrap();
/// let instant = civil_to_utc(&civil, "Europe/London").unwrap();
/// assert_eq!(instant.to_rfc3339(), "2024-10-27T00:30:00+00:00");
/// ```
pub fn civil_to_utc(civil: &CivilTime, timezone: &str) -> Result<DateTime<Utc>> {
    CivilTimeConverter::new(TzdbProvider).civil_to_utc(civil, timezone)
}

/// [`utc_to_civil`] for `Europe/London`.
pub fn to_london_civil(instant: DateTime<Utc>) -> Result<CivilTime> {
    utc_to_civil(instant, DEFAULT_TIMEZONE)
}

/// [`civil_to_utc`] for `Europe/London`.
pub fn from_london_civil(civil: &CivilTime) -> Result<DateTime<Utc>> {
    civil_to_utc(civil, DEFAULT_TIMEZONE)
}
