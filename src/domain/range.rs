//! Trend time ranges

use crate::domain::calendar_date::month_bounds;
use crate::error::{MoodiaryError, Result};
use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Granularity of a trend view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TimeRange {
    /// The seven days ending today
    Week,
    /// The calendar month containing today
    #[default]
    Month,
    /// The calendar year containing today
    Year,
}

impl TimeRange {
    /// Inclusive start and end day of this range relative to `today`
    pub fn bounds(&self, today: NaiveDate) -> Result<(NaiveDate, NaiveDate)> {
        let bounds = match self {
            TimeRange::Week => today.checked_sub_days(Days::new(6)).map(|start| (start, today)),
            TimeRange::Month => month_bounds(today.year(), today.month()),
            TimeRange::Year => today
                .with_ordinal(1)
                .zip(NaiveDate::from_ymd_opt(today.year(), 12, 31)),
        };
        bounds.ok_or_else(|| {
            MoodiaryError::Validation(format!(
                "{} range around {} is out of range",
                self.as_str(),
                today
            ))
        })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeRange::Week => "week",
            TimeRange::Month => "month",
            TimeRange::Year => "year",
        }
    }
}

impl FromStr for TimeRange {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "week" => Ok(TimeRange::Week),
            "month" => Ok(TimeRange::Month),
            "year" => Ok(TimeRange::Year),
            _ => Err(format!(
                "Invalid range: '{}'. Valid ranges are: week, month, year",
                s
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_week_is_seven_days_ending_today() {
        let (start, end) = TimeRange::Week.bounds(day(2024, 3, 3)).unwrap();
        assert_eq!(start, day(2024, 2, 26));
        assert_eq!(end, day(2024, 3, 3));
    }

    #[test]
    fn test_month_covers_calendar_month() {
        let (start, end) = TimeRange::Month.bounds(day(2024, 2, 14)).unwrap();
        assert_eq!(start, day(2024, 2, 1));
        assert_eq!(end, day(2024, 2, 29));
    }

    #[test]
    fn test_year_covers_calendar_year() {
        let (start, end) = TimeRange::Year.bounds(day(2023, 7, 4)).unwrap();
        assert_eq!(start, day(2023, 1, 1));
        assert_eq!(end, day(2023, 12, 31));
    }

    #[test]
    fn test_week_before_earliest_date_is_invalid() {
        assert!(matches!(
            TimeRange::Week.bounds(NaiveDate::MIN),
            Err(MoodiaryError::Validation(_))
        ));
    }

    #[test]
    fn test_parse_ranges() {
        assert_eq!("week".parse::<TimeRange>().unwrap(), TimeRange::Week);
        assert_eq!("Month".parse::<TimeRange>().unwrap(), TimeRange::Month);
        assert_eq!("YEAR".parse::<TimeRange>().unwrap(), TimeRange::Year);
        assert!("decade".parse::<TimeRange>().is_err());
    }
}
