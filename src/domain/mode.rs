//! Entry identity modes

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Entry modes determine what identifies an entry in the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EntryMode {
    /// One entry per calendar day, keyed by date
    #[default]
    Single,
    /// Several entries per day, keyed by date and time of day
    Multiple,
}

/// Identity of an entry inside the store
pub type EntryKey = (NaiveDate, Option<NaiveTime>);

impl EntryMode {
    /// Build the identity key for a date and optional time.
    /// Single mode ignores the time component.
    pub fn key_for(&self, date: NaiveDate, time: Option<NaiveTime>) -> EntryKey {
        match self {
            EntryMode::Single => (date, None),
            EntryMode::Multiple => (date, time),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EntryMode::Single => "single",
            EntryMode::Multiple => "multiple",
        }
    }
}

impl FromStr for EntryMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "single" => Ok(EntryMode::Single),
            "multiple" | "multi" => Ok(EntryMode::Multiple),
            _ => Err(format!(
                "Invalid entry mode: '{}'. Valid entry modes are: single, multiple",
                s
            )),
        }
    }
}
