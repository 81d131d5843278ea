//! Input validation shared by every public entry point.

use chrono::format::ParseErrorKind;
use chrono::{DateTime, Datelike, NaiveTime, Utc, Weekday};

use crate::error::{Result, ZonedTimeError};
use crate::types::{CivilTime, MAX_YEAR, MIN_YEAR};

pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in `month` (1-12) of `year`. Returns 0 for an invalid month.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

/// Reject years outside 1970-2100.
pub fn validate_year(year: i32) -> Result<()> {
    if (MIN_YEAR..=MAX_YEAR).contains(&year) {
        Ok(())
    } else {
        Err(ZonedTimeError::YearOutOfRange(year))
    }
}

/// Reject instants whose UTC year is outside 1970-2100.
pub fn validate_instant(instant: &DateTime<Utc>) -> Result<()> {
    let year = instant.year();
    if (MIN_YEAR..=MAX_YEAR).contains(&year) {
        Ok(())
    } else {
        Err(ZonedTimeError::InvalidInstant(format!(
            "{}: year {year} is outside {MIN_YEAR}-{MAX_YEAR}",
            instant.to_rfc3339()
        )))
    }
}

/// Check every field of a civil time against its calendar range.
pub fn validate_civil_time(civil: &CivilTime) -> Result<()> {
    let invalid = |msg: String| Err(ZonedTimeError::InvalidCivilTime(msg));

    if !(MIN_YEAR..=MAX_YEAR).contains(&civil.year) {
        return invalid(format!(
            "year {} must be between {MIN_YEAR} and {MAX_YEAR}",
            civil.year
        ));
    }
    if !(1..=12).contains(&civil.month) {
        return invalid(format!("month {} must be between 1 and 12", civil.month));
    }
    let max_day = days_in_month(civil.year, civil.month);
    if !(1..=max_day).contains(&civil.day) {
        return invalid(format!(
            "day {} must be between 1 and {max_day} for {:04}-{:02}",
            civil.day, civil.year, civil.month
        ));
    }
    if civil.hour > 23 {
        return invalid(format!("hour {} must be between 0 and 23", civil.hour));
    }
    if civil.minute > 59 {
        return invalid(format!("minute {} must be between 0 and 59", civil.minute));
    }
    if civil.second > 59 {
        return invalid(format!("second {} must be between 0 and 59", civil.second));
    }
    Ok(())
}

/// Check that an identifier is shaped like an IANA `Area/Location` name.
pub fn validate_timezone_format(timezone: &str) -> Result<()> {
    if timezone.trim().is_empty() {
        return Err(ZonedTimeError::UnsupportedTimezone(
            "empty identifier".to_string(),
        ));
    }
    if !timezone.contains('/') {
        return Err(ZonedTimeError::UnsupportedTimezone(format!(
            "'{timezone}': expected IANA format (e.g., 'Europe/London')"
        )));
    }
    Ok(())
}

/// Parse a strict `HH:MM` wall-clock time.
pub fn parse_clock_time(s: &str, label: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(s.trim(), "%H:%M").map_err(|e| {
        let reason = match e.kind() {
            ParseErrorKind::OutOfRange | ParseErrorKind::Impossible => {
                "must be between 00:00 and 23:59"
            }
            _ => "expected HH:MM format",
        };
        ZonedTimeError::InvalidWorkingHours(format!("{label} time '{s}': {reason}"))
    })
}

/// A working-day set must be non-empty and free of duplicates.
pub fn validate_working_days(days: &[Weekday]) -> Result<()> {
    if days.is_empty() {
        return Err(ZonedTimeError::InvalidWorkingDays("empty list".to_string()));
    }
    for (i, day) in days.iter().enumerate() {
        if days[..i].contains(day) {
            return Err(ZonedTimeError::InvalidWorkingDays(format!(
                "duplicate day {day}"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn civil(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> CivilTime {
        CivilTime {
            year: y,
            month: mo,
            day: d,
            hour: h,
            minute: mi,
            second: s,
        }
    }

    #[test]
    fn test_days_in_month_handles_leap_years() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(2100, 2), 28);
        assert_eq!(days_in_month(2000, 2), 29);
        assert_eq!(days_in_month(2024, 4), 30);
        assert_eq!(days_in_month(2024, 13), 0);
    }

    #[test]
    fn test_year_bounds() {
        assert!(validate_year(1970).is_ok());
        assert!(validate_year(2100).is_ok());
        assert_eq!(validate_year(1969), Err(ZonedTimeError::YearOutOfRange(1969)));
        assert_eq!(validate_year(2101), Err(ZonedTimeError::YearOutOfRange(2101)));
    }

    #[test]
    fn test_instant_bounds() {
        let ok = Utc.with_ymd_and_hms(1970, 1, 1, 0, 0, 0).unwrap();
        let late = Utc.with_ymd_and_hms(2101, 1, 1, 0, 0, 0).unwrap();
        let early = Utc.with_ymd_and_hms(1969, 12, 31, 23, 59, 59).unwrap();
        assert!(validate_instant(&ok).is_ok());
        assert!(matches!(
            validate_instant(&late),
            Err(ZonedTimeError::InvalidInstant(_))
        ));
        assert!(matches!(
            validate_instant(&early),
            Err(ZonedTimeError::InvalidInstant(_))
        ));
    }

    #[test]
    fn test_civil_time_field_ranges() {
        assert!(validate_civil_time(&civil(2024, 2, 29, 23, 59, 59)).is_ok());
        assert!(validate_civil_time(&civil(2023, 2, 29, 0, 0, 0)).is_err());
        assert!(validate_civil_time(&civil(2024, 0, 1, 0, 0, 0)).is_err());
        assert!(validate_civil_time(&civil(2024, 13, 1, 0, 0, 0)).is_err());
        assert!(validate_civil_time(&civil(2024, 4, 31, 0, 0, 0)).is_err());
        assert!(validate_civil_time(&civil(2024, 1, 0, 0, 0, 0)).is_err());
        assert!(validate_civil_time(&civil(2024, 1, 1, 24, 0, 0)).is_err());
        assert!(validate_civil_time(&civil(2024, 1, 1, 0, 60, 0)).is_err());
        assert!(validate_civil_time(&civil(2024, 1, 1, 0, 0, 60)).is_err());
        assert!(validate_civil_time(&civil(1969, 12, 31, 0, 0, 0)).is_err());
        assert!(validate_civil_time(&civil(2101, 1, 1, 0, 0, 0)).is_err());
    }

    #[test]
    fn test_civil_time_error_names_the_field() {
        let err = validate_civil_time(&civil(2024, 1, 1, 25, 0, 0))
            .unwrap_err()
            .to_string();
        assert!(err.contains("hour 25"), "got: {err}");
    }

    #[test]
    fn test_timezone_format() {
        assert!(validate_timezone_format("Europe/London").is_ok());
        assert!(validate_timezone_format("").is_err());
        assert!(validate_timezone_format("   ").is_err());
        assert!(validate_timezone_format("UTC").is_err());
    }

    #[test]
    fn test_parse_clock_time() {
        assert_eq!(
            parse_clock_time("09:00", "start").unwrap(),
            NaiveTime::from_hms_opt(9, 0, 0).unwrap()
        );
        assert_eq!(
            parse_clock_time("9:05", "start").unwrap(),
            NaiveTime::from_hms_opt(9, 5, 0).unwrap()
        );
        assert!(parse_clock_time("0900", "start").is_err());
        assert!(parse_clock_time("24:00", "end").is_err());
        assert!(parse_clock_time("12:60", "end").is_err());
        assert!(parse_clock_time("ab:cd", "end").is_err());
        assert!(parse_clock_time("+9:05", "start").is_err());
        assert!(parse_clock_time("-9:05", "start").is_err());

        let err = parse_clock_time("24:00", "end").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid working hours: end time '24:00': must be between 00:00 and 23:59"
        );
        let err = parse_clock_time("9am", "start").unwrap_err();
        assert!(err.to_string().contains("expected HH:MM"), "got: {err}");
        assert!(parse_clock_time("12:00:00", "end").is_err());
    }

    #[test]
    fn test_working_days() {
        assert!(validate_working_days(&[Weekday::Mon, Weekday::Fri]).is_ok());
        assert!(validate_working_days(&[]).is_err());
        assert!(validate_working_days(&[Weekday::Mon, Weekday::Mon]).is_err());
    }
}
