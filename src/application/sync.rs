//! Remote change feed
//!
//! A hosted backend can push row changes at any time. Those changes travel
//! as typed [`ChangeEvent`]s over an in-process channel: whoever listens to
//! the remote side holds a [`ChangeSender`], and the owner of the
//! `EntryStore` drains the matching [`ChangeFeed`] with
//! `EntryStore::apply_pending`. Events are applied in arrival order with
//! last-write-wins on `updatedAt`.
//!
//! The wire shape mirrors the realtime payloads of the hosted table:
//!
//! ```json
//! {"eventType":"INSERT","new":{"date":"2024-03-10","mood":"happy","text":"ok","updatedAt":"..."}}
//! {"eventType":"DELETE","old":{"date":"2024-03-10"}}
//! ```

use crate::domain::calendar_date::{parse_date, parse_time};
use crate::domain::{Entry, EntryDraft, EntryMode};
use crate::error::{MoodiaryError, Result};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::mpsc;

/// Entry-shaped payload of an INSERT or UPDATE
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteEntry {
    pub date: String,
    pub mood: String,
    #[serde(default)]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default, alias = "updated_at", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl RemoteEntry {
    /// Validate like a local draft, keeping the remote stamp when present
    pub fn into_entry(self, mode: EntryMode, fallback_stamp: DateTime<Utc>) -> Result<Entry> {
        let stamp = self.updated_at.unwrap_or(fallback_stamp);
        EntryDraft {
            date: self.date,
            mood: self.mood,
            text: self.text,
            time: self.time,
        }
        .into_entry(mode, stamp)
    }
}

impl From<&Entry> for RemoteEntry {
    fn from(entry: &Entry) -> Self {
        RemoteEntry {
            date: entry.date.format("%Y-%m-%d").to_string(),
            mood: entry.mood.as_str().to_string(),
            text: entry.text.clone(),
            time: entry.time.map(|t| t.format("%H:%M:%S").to_string()),
            updated_at: Some(entry.updated_at),
        }
    }
}

/// Key payload of a DELETE; only `date` is required
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteKey {
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default, alias = "updated_at", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl RemoteKey {
    pub fn parse(&self) -> Result<(NaiveDate, Option<NaiveTime>)> {
        let date = parse_date(&self.date)?;
        let time = self.time.as_deref().map(parse_time).transpose()?;
        Ok((date, time))
    }
}

/// A change pushed by the remote channel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "eventType", rename_all = "UPPERCASE")]
pub enum ChangeEvent {
    Insert { new: RemoteEntry },
    Update { new: RemoteEntry },
    Delete { old: RemoteKey },
}

impl ChangeEvent {
    /// Parse one JSON-encoded event
    pub fn from_json(raw: &str) -> Result<Self> {
        serde_json::from_str(raw)
            .map_err(|e| MoodiaryError::Validation(format!("malformed change event: {}", e)))
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ChangeEvent::Insert { .. } => "INSERT",
            ChangeEvent::Update { .. } => "UPDATE",
            ChangeEvent::Delete { .. } => "DELETE",
        }
    }
}

/// Outcome of applying one remote event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    Inserted,
    Replaced,
    Deleted,
    /// The local entry is newer; the event was ignored
    Stale,
    /// Delete of an absent key
    NoOp,
}

/// Tally of a drained feed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplyReport {
    pub inserted: usize,
    pub replaced: usize,
    pub deleted: usize,
    pub stale: usize,
    pub no_op: usize,
    /// Events whose payload failed validation
    pub rejected: usize,
}

impl ApplyReport {
    pub fn record(&mut self, applied: Applied) {
        match applied {
            Applied::Inserted => self.inserted += 1,
            Applied::Replaced => self.replaced += 1,
            Applied::Deleted => self.deleted += 1,
            Applied::Stale => self.stale += 1,
            Applied::NoOp => self.no_op += 1,
        }
    }

    /// Events that changed the store
    pub fn changed(&self) -> usize {
        self.inserted + self.replaced + self.deleted
    }

    pub fn total(&self) -> usize {
        self.changed() + self.stale + self.no_op + self.rejected
    }
}

/// Sending half of the change channel
#[derive(Debug, Clone)]
pub struct ChangeSender {
    tx: mpsc::Sender<ChangeEvent>,
}

impl ChangeSender {
    /// Queue an event. Fails only when the feed has been dropped.
    pub fn send(&self, event: ChangeEvent) -> std::result::Result<(), mpsc::SendError<ChangeEvent>> {
        self.tx.send(event)
    }
}

/// Receiving half of the change channel, drained by the store owner
#[derive(Debug)]
pub struct ChangeFeed {
    rx: mpsc::Receiver<ChangeEvent>,
}

impl ChangeFeed {
    /// Events queued right now, without blocking
    pub fn pending(&self) -> impl Iterator<Item = ChangeEvent> + '_ {
        self.rx.try_iter()
    }
}

/// Create a connected sender/feed pair
pub fn channel() -> (ChangeSender, ChangeFeed) {
    let (tx, rx) = mpsc::channel();
    (ChangeSender { tx }, ChangeFeed { rx })
}
