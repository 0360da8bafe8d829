//! Day-of-year date codec.
//!
//! GNSS products name days as `year doy` (e.g. `2024 065`) rather than
//! calendar dates. This module converts between the two, always in UTC.

use crate::error::{GnssError, Result};
use chrono::{DateTime, Datelike, NaiveDate, TimeDelta, Timelike, Utc};
use std::fmt;
use std::str::FromStr;

/// Milliseconds in one civil day.
pub const MS_PER_DAY: i64 = 86_400_000;

/// Leap when divisible by 4 and not by 100, unless also divisible by 400.
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in the given calendar year.
pub fn days_in_year(year: i32) -> u32 {
    if is_leap_year(year) {
        366
    } else {
        365
    }
}

fn start_of_year(year: i32) -> Result<DateTime<Utc>> {
    NaiveDate::from_ymd_opt(year, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
        .ok_or(GnssError::DateOutOfRange {
            year,
            day_of_year: 1,
        })
}

/// A `(year, day-of-year, hour, minute, second)` tuple.
///
/// Parsing is lenient about ranges, mirroring [`date_from_day`]: a day of
/// year past the end of the year rolls into the next one. Use
/// [`DayOfYearTimestamp::is_valid`] when a strict check is wanted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DayOfYearTimestamp {
    pub year: i32,
    pub day_of_year: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
}

impl DayOfYearTimestamp {
    /// Midnight of the given day.
    pub fn new(year: i32, day_of_year: u32) -> Self {
        DayOfYearTimestamp {
            year,
            day_of_year,
            hour: 0,
            minute: 0,
            second: 0,
        }
    }

    pub fn with_time(mut self, hour: u32, minute: u32, second: u32) -> Self {
        self.hour = hour;
        self.minute = minute;
        self.second = second;
        self
    }

    /// True when the day fits the year (leap years allow 366) and the
    /// time of day is a real wall-clock time.
    pub fn is_valid(&self) -> bool {
        (1..=days_in_year(self.year)).contains(&self.day_of_year)
            && self.hour < 24
            && self.minute < 60
            && self.second < 60
    }

    /// Resolve to a UTC instant: `year-01-01Thh:mm:ssZ` plus `doy - 1` days.
    pub fn to_datetime(&self) -> Result<DateTime<Utc>> {
        if self.hour > 23 || self.minute > 59 || self.second > 59 {
            return Err(GnssError::DateParse(format!(
                "invalid time of day {:02}:{:02}:{:02}",
                self.hour, self.minute, self.second
            )));
        }
        let base = start_of_year(self.year)?
            + TimeDelta::seconds(i64::from(
                self.hour * 3600 + self.minute * 60 + self.second,
            ));
        let days = i64::from(self.day_of_year) - 1;
        TimeDelta::try_milliseconds(days * MS_PER_DAY)
            .and_then(|delta| base.checked_add_signed(delta))
            .ok_or(GnssError::DateOutOfRange {
                year: self.year,
                day_of_year: i64::from(self.day_of_year),
            })
    }

    /// Split a UTC instant into year, ordinal day and time of day.
    /// Sub-second precision is dropped.
    pub fn from_datetime(date: &DateTime<Utc>) -> Self {
        DayOfYearTimestamp {
            year: date.year(),
            day_of_year: date.ordinal(),
            hour: date.hour(),
            minute: date.minute(),
            second: date.second(),
        }
    }
}

impl fmt::Display for DayOfYearTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {}",
            self.year, self.day_of_year, self.hour, self.minute, self.second
        )
    }
}

impl FromStr for DayOfYearTimestamp {
    type Err = GnssError;

    /// Accepts `"year doy [hour [minute [second]]]"`, separated by spaces
    /// or dots. Missing time fields default to zero; fields past the
    /// fifth are ignored.
    fn from_str(s: &str) -> Result<Self> {
        let fields: Vec<&str> = s
            .split(|c: char| c.is_whitespace() || c == '.')
            .filter(|f| !f.is_empty())
            .collect();
        if fields.len() < 2 {
            return Err(GnssError::DateParse(format!(
                "expected 'year doy [hour minute second]', got '{}'",
                s
            )));
        }
        let year = fields[0]
            .parse::<i32>()
            .map_err(|e| GnssError::DateParse(format!("year '{}': {}", fields[0], e)))?;
        let mut numbers = [0u32; 4];
        for (slot, field) in numbers.iter_mut().zip(&fields[1..]) {
            *slot = field
                .parse::<u32>()
                .map_err(|e| GnssError::DateParse(format!("field '{}': {}", field, e)))?;
        }
        let [day_of_year, hour, minute, second] = numbers;
        Ok(DayOfYearTimestamp {
            year,
            day_of_year,
            hour,
            minute,
            second,
        })
    }
}

/// Parse a day-of-year string into a UTC instant.
///
/// `"2024 65 12 30 0"` resolves to `2024-03-05T12:30:00Z`.
pub fn date_from_day(text: &str) -> Result<DateTime<Utc>> {
    text.parse::<DayOfYearTimestamp>()?.to_datetime()
}

/// Format a UTC instant as `"year doy hour minute second"` without padding.
pub fn day_from_date(date: &DateTime<Utc>) -> String {
    DayOfYearTimestamp::from_datetime(date).to_string()
}

/// Parse an RFC 3339 timestamp, a naive `YYYY-MM-DDTHH:MM:SS` (taken as
/// UTC) or a bare `YYYY-MM-DD`.
pub fn parse_utc(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = chrono::NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

/// Like [`day_from_date`] but starting from text. Unparseable input gives
/// every field as an empty string (`"    "`) instead of an error, so callers
/// displaying the result must handle blank fields.
pub fn day_from_date_str(text: &str) -> String {
    match parse_utc(text) {
        Some(date) => day_from_date(&date),
        None => {
            log::debug!("Unparseable date '{}', emitting blank fields", text);
            [""; 5].join(" ")
        }
    }
}

/// Legacy conversion that scales the day count by the year length over
/// one thousand: `start + (leap ? 366/1000 : 365/1000) * doy * 86_400_000` ms.
///
/// The fractional offset is added to the start instant in floating point
/// and the sum truncated to whole milliseconds, so results match existing
/// displays exactly. This does not land on whole days and does not
/// round-trip with [`day_from_date`]; use [`date_from_day`] for real
/// day-of-year arithmetic.
pub fn doy_to_date(year: i32, day_of_year: u32) -> Result<DateTime<Utc>> {
    let start = start_of_year(year)?;
    let factor = if is_leap_year(year) {
        366.0 / 1000.0
    } else {
        365.0 / 1000.0
    };
    let ms = start.timestamp_millis() as f64 + factor * f64::from(day_of_year) * MS_PER_DAY as f64;
    DateTime::from_timestamp_millis(ms.trunc() as i64).ok_or(GnssError::DateOutOfRange {
        year,
        day_of_year: i64::from(day_of_year),
    })
}
