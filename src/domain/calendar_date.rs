//! Timezone-free calendar date and time-of-day parsing
//!
//! Diary dates are plain calendar days. They are parsed component by
//! component and never go through a timestamp, so a date can never shift to
//! the neighbouring day because of the local UTC offset.

use crate::error::{MoodiaryError, Result};
use chrono::{Datelike, NaiveDate, NaiveTime};

/// A validated year-month-day triple
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl CalendarDate {
    /// `None` only for a hand-built triple that is not a real day
    pub fn to_naive(self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
    }
}

impl From<NaiveDate> for CalendarDate {
    fn from(date: NaiveDate) -> Self {
        CalendarDate {
            year: date.year(),
            month: date.month(),
            day: date.day(),
        }
    }
}

/// Parse a strict `YYYY-MM-DD` string into calendar components.
pub fn parse_calendar_date(input: &str) -> Result<CalendarDate> {
    parse_naive(input).map(CalendarDate::from)
}

/// Parse a date string straight to a `NaiveDate`.
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    parse_naive(input)
}

fn parse_naive(input: &str) -> Result<NaiveDate> {
    let invalid = || MoodiaryError::Validation(format!("invalid calendar date: '{}'", input));

    let trimmed = input.trim();
    let mut parts = trimmed.split('-');
    let (Some(y), Some(m), Some(d), None) = (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(invalid());
    };

    let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    if y.len() != 4 || m.len() != 2 || d.len() != 2 {
        return Err(invalid());
    }
    if !(all_digits(y) && all_digits(m) && all_digits(d)) {
        return Err(invalid());
    }

    let year: i32 = y.parse().map_err(|_| invalid())?;
    let month: u32 = m.parse().map_err(|_| invalid())?;
    let day: u32 = d.parse().map_err(|_| invalid())?;

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(invalid)
}

/// Parse a time of day as `HH:MM` or `HH:MM:SS`.
pub fn parse_time(input: &str) -> Result<NaiveTime> {
    let trimmed = input.trim();
    NaiveTime::parse_from_str(trimmed, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M"))
        .map_err(|_| MoodiaryError::Validation(format!("invalid time of day: '{}'", input)))
}

/// Parse a `YYYY-MM` month reference.
pub fn parse_year_month(input: &str) -> Result<(i32, u32)> {
    let date = parse_naive(&format!("{}-01", input.trim()))
        .map_err(|_| MoodiaryError::Validation(format!("invalid month (expected YYYY-MM): '{}'", input)))?;
    Ok((date.year(), date.month()))
}

/// First and last day of a calendar month, `None` when the month is out of range.
pub fn month_bounds(year: i32, month: u32) -> Option<(NaiveDate, NaiveDate)> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next_first = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some((first, next_first.pred_opt()?))
}
