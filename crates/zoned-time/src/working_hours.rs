//! Working-hours and business-day predicates, evaluated on local civil time.

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, Timelike, Utc, Weekday};
use serde::{Deserialize, Serialize};

use crate::convert::utc_to_civil;
use crate::error::{Result, ZonedTimeError};
use crate::registry::DEFAULT_TIMEZONE;
use crate::validate::{parse_clock_time, validate_working_days};

/// A daily working window with minute resolution, inclusive at both ends.
///
/// A window whose start is later than its end spans midnight
/// (e.g. 22:00–06:00).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawWorkingHours", into = "RawWorkingHours")]
pub struct WorkingHours {
    start: NaiveTime,
    end: NaiveTime,
}

#[derive(Serialize, Deserialize)]
struct RawWorkingHours {
    start: String,
    end: String,
}

impl TryFrom<RawWorkingHours> for WorkingHours {
    type Error = ZonedTimeError;

    fn try_from(raw: RawWorkingHours) -> Result<Self> {
        Self::new(&raw.start, &raw.end)
    }
}

impl From<WorkingHours> for RawWorkingHours {
    fn from(hours: WorkingHours) -> Self {
        Self {
            start: hours.start.format("%H:%M").to_string(),
            end: hours.end.format("%H:%M").to_string(),
        }
    }
}

impl WorkingHours {
    /// Parse a window from two `HH:MM` strings.
    ///
    /// # Errors
    ///
    /// Returns [`ZonedTimeError::InvalidWorkingHours`] for malformed times or
    /// an empty window (`start == end`).
    pub fn new(start: &str, end: &str) -> Result<Self> {
        let start_time = parse_clock_time(start, "start")?;
        let end_time = parse_clock_time(end, "end")?;
        if start_time == end_time {
            return Err(ZonedTimeError::InvalidWorkingHours(format!(
                "start '{start}' and end '{end}' describe an empty window"
            )));
        }
        Ok(Self {
            start: start_time,
            end: end_time,
        })
    }

    pub fn start(&self) -> NaiveTime {
        self.start
    }

    pub fn end(&self) -> NaiveTime {
        self.end
    }

    pub fn spans_midnight(&self) -> bool {
        self.start > self.end
    }

    /// Whether a wall-clock time falls in the window. Seconds are ignored.
    pub fn contains(&self, time: NaiveTime) -> bool {
        let minutes = |t: NaiveTime| t.hour() * 60 + t.minute();
        let (now, start, end) = (minutes(time), minutes(self.start), minutes(self.end));
        if start <= end {
            start <= now && now <= end
        } else {
            now >= start || now <= end
        }
    }
}

impl Default for WorkingHours {
    /// 09:00–17:30.
    fn default() -> Self {
        Self {
            start: NaiveTime::from_hms_opt(9, 0, 0).unwrap_or_default(),
            end: NaiveTime::from_hms_opt(17, 30, 0).unwrap_or_default(),
        }
    }
}

/// A non-empty, duplicate-free set of working weekdays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Weekday>", into = "Vec<Weekday>")]
pub struct WorkingDays(Vec<Weekday>);

impl WorkingDays {
    pub fn new(days: Vec<Weekday>) -> Result<Self> {
        validate_working_days(&days)?;
        Ok(Self(days))
    }

    pub fn contains(&self, day: Weekday) -> bool {
        self.0.contains(&day)
    }

    pub fn days(&self) -> &[Weekday] {
        &self.0
    }
}

impl TryFrom<Vec<Weekday>> for WorkingDays {
    type Error = ZonedTimeError;

    fn try_from(days: Vec<Weekday>) -> Result<Self> {
        Self::new(days)
    }
}

impl From<WorkingDays> for Vec<Weekday> {
    fn from(days: WorkingDays) -> Self {
        days.0
    }
}

impl Default for WorkingDays {
    /// Monday to Friday.
    fn default() -> Self {
        Self(vec![
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
        ])
    }
}

/// Whether `instant`, read as local time in `timezone`, falls within `hours`.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use zoned_time::{in_working_hours, WorkingHours};
///
/// let one_pm = Utc.with_ymd_and_hms(2024, 7, 15, 13, 0, 0).unwrap();
/// let hours = WorkingHours::default();
/// assert!(in_working_hours(one_pm, "Europe/London", &hours).unwrap()); // 14:00 BST
/// assert!(!in_working_hours(one_pm, "Asia/Tokyo", &hours).unwrap()); // 22:00 JST
/// ```
pub fn in_working_hours(
    instant: DateTime<Utc>,
    timezone: &str,
    hours: &WorkingHours,
) -> Result<bool> {
    let civil = utc_to_civil(instant, timezone)?;
    let time = NaiveTime::from_hms_opt(civil.hour, civil.minute, civil.second)
        .ok_or_else(|| ZonedTimeError::InvalidCivilTime(civil.to_string()))?;
    Ok(hours.contains(time))
}

/// [`in_working_hours`] for `Europe/London`.
pub fn in_working_hours_london(instant: DateTime<Utc>, hours: &WorkingHours) -> Result<bool> {
    in_working_hours(instant, DEFAULT_TIMEZONE, hours)
}

/// Whether the local date of `instant` in `timezone` is one of `days`.
pub fn is_working_day(
    instant: DateTime<Utc>,
    timezone: &str,
    days: &WorkingDays,
) -> Result<bool> {
    let civil = utc_to_civil(instant, timezone)?;
    let date = NaiveDate::from_ymd_opt(civil.year, civil.month, civil.day)
        .ok_or_else(|| ZonedTimeError::InvalidCivilTime(civil.to_string()))?;
    Ok(days.contains(date.weekday()))
}
