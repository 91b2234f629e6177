//! Diary use cases behind the command line

use crate::application::entry_store::EntryStore;
use crate::application::sync::{channel, ApplyReport, ChangeEvent};
use crate::domain::calendar_date::parse_time;
use crate::domain::{
    bucket_by_calendar_month, bucket_by_range, DateBucket, DayReference, Entry, EntryDraft,
    EntryMode, TimeRange,
};
use crate::error::{MoodiaryError, Result};
use crate::infrastructure::{
    Config, DiaryRepository, FileSystemRepository, FsBackend, StorageBackend,
};
use chrono::{Local, NaiveDate};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Service tying an entry store to a diary's configuration
pub struct DiaryService<B: StorageBackend> {
    store: EntryStore<B>,
    config: Config,
    today: NaiveDate,
}

impl DiaryService<FsBackend> {
    /// Open the diary found at `repository`
    pub fn open(repository: &FileSystemRepository) -> Result<Self> {
        let config = repository.load_config()?;
        let mode = config.get_entry_mode()?;
        let store = EntryStore::open(repository.backend(), mode)?;
        Ok(DiaryService::new(store, config))
    }
}

impl<B: StorageBackend> DiaryService<B> {
    pub fn new(store: EntryStore<B>, config: Config) -> Self {
        DiaryService {
            store,
            config,
            today: Local::now().date_naive(),
        }
    }

    /// Pin "today" to a fixed date
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub fn store(&self) -> &EntryStore<B> {
        &self.store
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn resolve_day(&self, day: &str) -> Result<NaiveDate> {
        DayReference::parse(day)?.resolve(self.today)
    }

    /// Save the mood and note for a day
    pub fn save(&mut self, day: &str, mood: &str, text: &str, time: Option<&str>) -> Result<Entry> {
        let date = self.resolve_day(day)?;
        let mut draft = EntryDraft::new(date.format("%Y-%m-%d").to_string(), mood, text);
        draft.time = time.map(str::to_string);
        self.store.save(draft)
    }

    /// Quick memo for today; the note must not be blank.
    /// In multiple mode the memo is stamped with the current time of day.
    pub fn memo(&mut self, mood: &str, text: &str) -> Result<Entry> {
        if text.trim().is_empty() {
            return Err(MoodiaryError::Validation(
                "memo text must not be empty".to_string(),
            ));
        }
        let time = match self.store.mode() {
            EntryMode::Multiple => Some(Local::now().time().format("%H:%M:%S").to_string()),
            EntryMode::Single => None,
        };
        self.save("today", mood, text, time.as_deref())
    }

    /// Entries of one day, ordered by time
    pub fn show(&self, day: &str) -> Result<(NaiveDate, Vec<&Entry>)> {
        let date = self.resolve_day(day)?;
        Ok((date, self.store.get_day(date)))
    }

    /// Delete a day's entries, or one timed entry in multiple mode
    pub fn delete(&mut self, day: &str, time: Option<&str>) -> Result<usize> {
        let date = self.resolve_day(day)?;
        match time {
            Some(raw) => {
                let time = parse_time(raw)?;
                Ok(usize::from(self.store.delete_at(date, time)?))
            }
            None => self.store.delete(date),
        }
    }

    /// All entries, or the entries of one month
    pub fn list(&self, month: Option<(i32, u32)>) -> Vec<&Entry> {
        match month {
            Some((year, month)) => self.store.get_for_month(year, month),
            None => self.store.get_all().iter().collect(),
        }
    }

    pub fn calendar(&self, year: i32, month: u32) -> BTreeMap<NaiveDate, DateBucket> {
        bucket_by_calendar_month(self.store.get_all(), year, month)
    }

    /// Dense per-day trend. Explicit bounds override the range's own.
    pub fn trend(
        &self,
        range: Option<TimeRange>,
        from: Option<&str>,
        to: Option<&str>,
    ) -> Result<(TimeRange, Vec<DateBucket>)> {
        let range = range.unwrap_or(self.config.default_range);
        let (default_start, default_end) = range.bounds(self.today)?;
        let start = match from {
            Some(day) => self.resolve_day(day)?,
            None => default_start,
        };
        let end = match to {
            Some(day) => self.resolve_day(day)?,
            None => default_end,
        };

        debug!(%start, %end, range = range.as_str(), "computing trend");
        Ok((range, bucket_by_range(self.store.get_all(), start, end, range)))
    }

    /// Replay a JSON-lines file of remote change events.
    /// Blank lines are skipped; unparsable lines count as rejected.
    pub fn sync_file(&mut self, path: &Path) -> Result<ApplyReport> {
        let contents = fs::read_to_string(path)?;
        let (tx, feed) = channel();
        let mut unparsable = 0;

        for (line_no, line) in contents.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match ChangeEvent::from_json(line) {
                Ok(event) => {
                    if tx.send(event).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    warn!(line = line_no + 1, error = %e, "skipping change event");
                    unparsable += 1;
                }
            }
        }
        drop(tx);

        let mut report = self.store.apply_pending(&feed)?;
        report.rejected += unparsable;
        Ok(report)
    }
}
