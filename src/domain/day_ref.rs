//! Day reference parsing and resolution

use crate::domain::calendar_date::parse_date;
use crate::error::{MoodiaryError, Result};
use chrono::{Days, NaiveDate};

/// A user-supplied day that resolves to a calendar date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayReference {
    Today,
    Yesterday,
    /// `N days ago`
    DaysAgo(u32),
    /// `YYYY-MM-DD`
    Specific(NaiveDate),
}

impl DayReference {
    pub fn parse(input: &str) -> Result<Self> {
        let normalized = input.trim().to_lowercase();

        match normalized.as_str() {
            "today" | "now" => Ok(DayReference::Today),
            "yesterday" => Ok(DayReference::Yesterday),
            _ if normalized.ends_with(" days ago") || normalized.ends_with(" day ago") => {
                let count = normalized
                    .split_whitespace()
                    .next()
                    .and_then(|n| n.parse::<u32>().ok())
                    .ok_or_else(|| {
                        MoodiaryError::Validation(format!("invalid day reference: '{}'", input))
                    })?;
                Ok(DayReference::DaysAgo(count))
            }
            _ => parse_date(&normalized)
                .map(DayReference::Specific)
                .map_err(|_| {
                    MoodiaryError::Validation(format!("invalid date or day reference: '{}'", input))
                }),
        }
    }

    /// Resolve against `today`; an offset reaching past the calendar's range is invalid.
    pub fn resolve(&self, today: NaiveDate) -> Result<NaiveDate> {
        let days_back = match self {
            DayReference::Today => 0,
            DayReference::Yesterday => 1,
            DayReference::DaysAgo(n) => u64::from(*n),
            DayReference::Specific(date) => return Ok(*date),
        };
        today.checked_sub_days(Days::new(days_back)).ok_or_else(|| {
            MoodiaryError::Validation(format!(
                "invalid day reference: {} days before {} is out of range",
                days_back, today
            ))
        })
    }
}
