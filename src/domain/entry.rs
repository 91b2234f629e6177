//! Diary entries and their unvalidated input form

use crate::domain::calendar_date::{parse_date, parse_time};
use crate::domain::mode::{EntryKey, EntryMode};
use crate::domain::mood::Mood;
use crate::error::Result;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// One persisted mood/note record.
///
/// Entries are value snapshots: a later write for the same key replaces the
/// whole record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    #[serde(with = "date_format")]
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<NaiveTime>,
    pub mood: Mood,
    #[serde(default)]
    pub text: String,
    pub updated_at: DateTime<Utc>,
}

impl Entry {
    pub fn key(&self, mode: EntryMode) -> EntryKey {
        mode.key_for(self.date, self.time)
    }

    /// Same observable content, ignoring the write stamp
    pub fn same_content(&self, other: &Entry) -> bool {
        self.date == other.date
            && self.time == other.time
            && self.mood == other.mood
            && self.text == other.text
    }
}

/// Unvalidated input for a save
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryDraft {
    pub date: String,
    pub mood: String,
    pub text: String,
    pub time: Option<String>,
}

impl EntryDraft {
    pub fn new(date: impl Into<String>, mood: impl Into<String>, text: impl Into<String>) -> Self {
        EntryDraft {
            date: date.into(),
            mood: mood.into(),
            text: text.into(),
            time: None,
        }
    }

    pub fn at(mut self, time: impl Into<String>) -> Self {
        self.time = Some(time.into());
        self
    }

    /// Validate the draft and stamp it. Single mode discards any time.
    pub fn into_entry(self, mode: EntryMode, updated_at: DateTime<Utc>) -> Result<Entry> {
        let date = parse_date(&self.date)?;
        let mood: Mood = self.mood.parse()?;
        let time = match (&self.time, mode) {
            (Some(raw), EntryMode::Multiple) => Some(parse_time(raw)?),
            _ => None,
        };

        Ok(Entry {
            date,
            time,
            mood,
            text: self.text,
            updated_at,
        })
    }
}

/// Strict `YYYY-MM-DD` (de)serialization for entry dates
pub(crate) mod date_format {
    use crate::domain::calendar_date::parse_date;
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&date.format("%Y-%m-%d").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse_date(&raw).map_err(serde::de::Error::custom)
    }
}
