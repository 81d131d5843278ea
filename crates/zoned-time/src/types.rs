//! Value types shared by the converter, the transition search and the
//! formatting layers.

use std::fmt;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, ZonedTimeError};
use crate::validate::validate_civil_time;

/// Earliest supported calendar year.
pub const MIN_YEAR: i32 = 1970;
/// Latest supported calendar year.
pub const MAX_YEAR: i32 = 2100;

/// A naive wall-clock reading: calendar date and time of day with no UTC
/// offset attached.
///
/// Field order makes the derived `Ord` chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CivilTime {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
}

impl CivilTime {
    /// Build a civil time, rejecting out-of-range fields and years outside
    /// 1970-2100.
    ///
    /// # Examples
    ///
    /// ```
    /// use zoned_time::CivilTime;
    ///
    /// let civil = CivilTime::new(2024, 7, 15, 14, 30, 0).unwrap();
    /// assert_eq!(civil.to_string(), "2024-07-15 14:30:00");
    /// assert!(CivilTime::new(2024, 2, 30, 0, 0, 0).is_err());
    /// ```
    pub fn new(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
    ) -> Result<Self> {
        let civil = Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        };
        validate_civil_time(&civil)?;
        Ok(civil)
    }

    /// The equivalent chrono naive datetime. Validates first.
    pub fn to_naive(&self) -> Result<NaiveDateTime> {
        validate_civil_time(self)?;
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
            .and_then(|date| date.and_hms_opt(self.hour, self.minute, self.second))
            .ok_or_else(|| ZonedTimeError::InvalidCivilTime(self.to_string()))
    }

    /// Decompose a naive datetime, dropping sub-second precision.
    ///
    /// No range check is applied; callers validate where the result must
    /// satisfy the supported year range.
    pub(crate) fn from_naive(naive: &NaiveDateTime) -> Self {
        Self {
            year: naive.year(),
            month: naive.month(),
            day: naive.day(),
            hour: naive.hour(),
            minute: naive.minute(),
            second: naive.second(),
        }
    }
}

impl fmt::Display for CivilTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )
    }
}

/// The offset in effect for one `(timezone, instant)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OffsetInfo {
    /// Minutes to add to UTC to obtain local civil time.
    pub utc_offset_minutes: i32,
    /// Whether Daylight Saving Time is active.
    pub is_dst: bool,
    /// Zone abbreviation reported by the provider (e.g. "BST"), if any.
    pub abbreviation: Option<String>,
}

/// Direction of a DST transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransitionKind {
    /// Clocks move forward: standard time to DST.
    Start,
    /// Clocks move back: DST to standard time.
    End,
}

impl fmt::Display for TransitionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => "start",
            Self::End => "end",
        }
        .fmt(f)
    }
}

/// A single DST switch located by the transition search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TransitionEvent {
    /// First instant of the new regime.
    pub instant: DateTime<Utc>,
    pub kind: TransitionKind,
    /// Local calendar year the transition belongs to.
    pub year: i32,
}

/// Start and end of DST within one local calendar year.
///
/// In the southern hemisphere `end` precedes `start` within the year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DstTransitions {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}
