//! # Entry Store
//!
//! The single authority for diary entry identity and persistence.
//!
//! The whole collection lives in memory, ordered by entry key, and is
//! mirrored to one slot of a [`StorageBackend`] under [`STORAGE_KEY`]:
//!
//! - **Load**: a missing slot is an empty diary; unparsable contents are a
//!   storage error and are never discarded.
//! - **Write-through**: every change serializes the full collection and
//!   overwrites the slot. The in-memory state is swapped only after the
//!   backend accepted the write, so a failed write changes nothing.
//! - **Identity**: one entry per [`EntryKey`]; the [`EntryMode`] decides
//!   whether the key is the date alone or the date plus time of day.
//! - **Remote changes**: applied with the same upsert/delete semantics,
//!   last-write-wins on `updated_at`.

use crate::application::sync::{Applied, ApplyReport, ChangeEvent, ChangeFeed};
use crate::domain::{Entry, EntryDraft, EntryKey, EntryMode};
use crate::error::{MoodiaryError, Result};
use crate::infrastructure::StorageBackend;
use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, Utc};
use tracing::{debug, info, warn};

/// Slot key holding the serialized entry collection
pub const STORAGE_KEY: &str = "mood-diary-entries";

/// Source of write stamps
pub type Clock = fn() -> DateTime<Utc>;

pub struct EntryStore<B: StorageBackend> {
    backend: B,
    mode: EntryMode,
    /// Sorted by key, keys unique
    entries: Vec<Entry>,
    clock: Clock,
}

impl<B: StorageBackend> EntryStore<B> {
    /// Open the store, loading whatever the backend holds.
    pub fn open(backend: B, mode: EntryMode) -> Result<Self> {
        let entries = load_entries(&backend, mode)?;
        debug!(count = entries.len(), mode = mode.as_str(), "opened entry store");
        Ok(EntryStore {
            backend,
            mode,
            entries,
            clock: Utc::now,
        })
    }

    /// Replace the time source used for write stamps
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn mode(&self) -> EntryMode {
        self.mode
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Re-read the backing slot, discarding the in-memory view
    pub fn reload(&mut self) -> Result<()> {
        self.entries = load_entries(&self.backend, self.mode)?;
        Ok(())
    }

    // --- Reads ---

    /// Every entry, ordered by key
    pub fn get_all(&self) -> &[Entry] {
        &self.entries
    }

    /// The entry for `date`; in multiple mode, the latest one of that day
    pub fn get_by_date(&self, date: NaiveDate) -> Option<&Entry> {
        self.entries.iter().rev().find(|e| e.date == date)
    }

    /// All entries of one day, ordered by time
    pub fn get_day(&self, date: NaiveDate) -> Vec<&Entry> {
        self.entries.iter().filter(|e| e.date == date).collect()
    }

    /// Entries of one calendar month, chronological. Month is 1-12.
    pub fn get_for_month(&self, year: i32, month: u32) -> Vec<&Entry> {
        self.entries
            .iter()
            .filter(|e| e.date.year() == year && e.date.month() == month)
            .collect()
    }

    // --- Writes ---

    /// Validate and upsert an entry, replacing any entry with the same key.
    pub fn save(&mut self, draft: EntryDraft) -> Result<Entry> {
        let mut entry = draft.into_entry(self.mode, (self.clock)())?;
        let key = entry.key(self.mode);

        let mut next = self.entries.clone();
        match self.position(&key) {
            Ok(i) => {
                // Stamps never go backwards for a key
                if next[i].updated_at > entry.updated_at {
                    entry.updated_at = next[i].updated_at;
                }
                next[i] = entry.clone();
            }
            Err(i) => next.insert(i, entry.clone()),
        }

        self.commit(next)?;
        debug!(date = %entry.date, mood = %entry.mood, "saved entry");
        Ok(entry)
    }

    /// Remove every entry on `date`. Returns how many were removed.
    pub fn delete(&mut self, date: NaiveDate) -> Result<usize> {
        let next: Vec<Entry> = self
            .entries
            .iter()
            .filter(|e| e.date != date)
            .cloned()
            .collect();
        let removed = self.entries.len() - next.len();
        if removed == 0 {
            return Ok(0);
        }

        self.commit(next)?;
        debug!(%date, removed, "deleted entries");
        Ok(removed)
    }

    /// Remove the single entry keyed by `date` and `time`.
    pub fn delete_at(&mut self, date: NaiveDate, time: NaiveTime) -> Result<bool> {
        let key = self.mode.key_for(date, Some(time));
        let Ok(i) = self.position(&key) else {
            return Ok(false);
        };

        let mut next = self.entries.clone();
        next.remove(i);
        self.commit(next)?;
        debug!(%date, %time, "deleted entry");
        Ok(true)
    }

    // --- Remote changes ---

    /// Apply one remote change with last-write-wins on `updated_at`.
    pub fn apply_remote(&mut self, event: ChangeEvent) -> Result<Applied> {
        let kind = event.kind();
        let applied = match event {
            ChangeEvent::Insert { new } | ChangeEvent::Update { new } => {
                let entry = new.into_entry(self.mode, (self.clock)())?;
                self.apply_upsert(entry)?
            }
            ChangeEvent::Delete { old } => {
                let (date, time) = old.parse()?;
                self.apply_delete(date, time, old.updated_at)?
            }
        };

        if applied == Applied::Stale {
            info!(kind, "ignored stale remote change");
        } else {
            debug!(kind, ?applied, "applied remote change");
        }
        Ok(applied)
    }

    /// Drain every queued remote change without blocking.
    ///
    /// Payloads that fail validation are counted and skipped; a storage
    /// failure stops the drain and is returned.
    pub fn apply_pending(&mut self, feed: &ChangeFeed) -> Result<ApplyReport> {
        let mut report = ApplyReport::default();
        for event in feed.pending() {
            match self.apply_remote(event) {
                Ok(applied) => report.record(applied),
                Err(MoodiaryError::Validation(msg)) => {
                    warn!(error = %msg, "rejected remote change");
                    report.rejected += 1;
                }
                Err(e) => return Err(e),
            }
        }
        Ok(report)
    }

    fn apply_upsert(&mut self, entry: Entry) -> Result<Applied> {
        let key = entry.key(self.mode);
        let mut next = self.entries.clone();

        let applied = match self.position(&key) {
            Ok(i) if next[i].updated_at > entry.updated_at => return Ok(Applied::Stale),
            Ok(i) => {
                next[i] = entry;
                Applied::Replaced
            }
            Err(i) => {
                next.insert(i, entry);
                Applied::Inserted
            }
        };

        self.commit(next)?;
        Ok(applied)
    }

    /// A delete without a time in multiple mode targets the whole day.
    fn apply_delete(
        &mut self,
        date: NaiveDate,
        time: Option<NaiveTime>,
        stamp: Option<DateTime<Utc>>,
    ) -> Result<Applied> {
        let mode = self.mode;
        let whole_day = mode == EntryMode::Multiple && time.is_none();
        let key = mode.key_for(date, time);
        let targeted = |e: &Entry| {
            if whole_day {
                e.date == date
            } else {
                e.key(mode) == key
            }
        };
        let newer = |e: &Entry| stamp.is_some_and(|s| e.updated_at > s);

        let targets = self.entries.iter().filter(|e| targeted(e)).count();
        if targets == 0 {
            return Ok(Applied::NoOp);
        }

        let next: Vec<Entry> = self
            .entries
            .iter()
            .filter(|e| !targeted(e) || newer(e))
            .cloned()
            .collect();
        if next.len() == self.entries.len() {
            return Ok(Applied::Stale);
        }

        self.commit(next)?;
        Ok(Applied::Deleted)
    }

    // --- Internals ---

    fn position(&self, key: &EntryKey) -> std::result::Result<usize, usize> {
        let mode = self.mode;
        self.entries.binary_search_by(|e| e.key(mode).cmp(key))
    }

    /// Persist `next` as the whole collection, then adopt it.
    fn commit(&mut self, next: Vec<Entry>) -> Result<()> {
        let serialized = serde_json::to_string_pretty(&next)
            .map_err(|e| MoodiaryError::storage("failed to serialize entries", e))?;

        if let Err(e) = self.backend.write(STORAGE_KEY, &serialized) {
            warn!(error = %e, "entry collection write failed");
            return Err(e);
        }

        self.entries = next;
        Ok(())
    }
}

/// Parse the slot contents into a key-ordered, key-unique collection.
///
/// Two records sharing a key are a storage error, never merged.
fn load_entries<B: StorageBackend>(backend: &B, mode: EntryMode) -> Result<Vec<Entry>> {
    let Some(raw) = backend.read(STORAGE_KEY)? else {
        return Ok(Vec::new());
    };
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }

    let mut entries: Vec<Entry> = serde_json::from_str(&raw)
        .map_err(|e| MoodiaryError::storage("malformed entry collection", e))?;

    entries.sort_by(|a, b| a.key(mode).cmp(&b.key(mode)));
    if let Some(pair) = entries
        .windows(2)
        .find(|pair| pair[0].key(mode) == pair[1].key(mode))
    {
        let clash = &pair[0];
        warn!(date = %clash.date, mode = mode.as_str(), "duplicate entry keys in slot");
        return Err(MoodiaryError::Storage(format!(
            "more than one entry for {}{} under {} entry_mode",
            clash.date.format("%Y-%m-%d"),
            clash
                .time
                .map(|t| t.format(" %H:%M:%S").to_string())
                .unwrap_or_default(),
            mode.as_str()
        )));
    }

    Ok(entries)
}
