//! Date-bucketed views over diary entries
//!
//! Two shapes are produced from a raw entry slice:
//!
//! - a **sparse** calendar map, one bucket per day that has entries, used to
//!   decorate calendar cells;
//! - a **dense** range sequence, one bucket per calendar day whether or not
//!   anything was written, so trend charts get a uniform axis.
//!
//! Aggregation is pure and never fails; inverted ranges are simply empty.

use crate::domain::calendar_date::month_bounds;
use crate::domain::entry::Entry;
use crate::domain::mood::Mood;
use crate::domain::range::TimeRange;
use chrono::{Datelike, NaiveDate};
use std::collections::BTreeMap;

/// A day's entries plus values derived from them
#[derive(Debug, Clone, PartialEq)]
pub struct DateBucket {
    pub date: NaiveDate,
    /// Ordered by time of day, then write stamp
    pub entries: Vec<Entry>,
}

impl DateBucket {
    fn new(date: NaiveDate, mut entries: Vec<Entry>) -> Self {
        entries.sort_by(|a, b| (a.time, a.updated_at).cmp(&(b.time, b.updated_at)));
        DateBucket { date, entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Arithmetic mean of the day's mood ordinals, `None` for an empty day
    pub fn mean(&self) -> Option<f64> {
        if self.entries.is_empty() {
            return None;
        }
        let total: u32 = self.entries.iter().map(|e| u32::from(e.mood.ordinal())).sum();
        Some(f64::from(total) / self.entries.len() as f64)
    }

    /// Mean rounded half-up onto the mood scale
    pub fn representative_mood(&self) -> Option<Mood> {
        self.mean().and_then(Mood::from_mean)
    }

    /// Most recent entry of the day
    pub fn latest(&self) -> Option<&Entry> {
        self.entries.last()
    }
}

/// One plotted entry on a continuous day axis
#[derive(Debug, Clone, PartialEq)]
pub struct ChartPoint {
    pub date: NaiveDate,
    /// Day index within the range plus the intra-day position
    pub x: f64,
    pub value: f64,
    pub mood: Mood,
    pub note: String,
}

fn group_by_date<'a>(entries: impl Iterator<Item = &'a Entry>) -> BTreeMap<NaiveDate, Vec<Entry>> {
    let mut grouped: BTreeMap<NaiveDate, Vec<Entry>> = BTreeMap::new();
    for entry in entries {
        grouped.entry(entry.date).or_default().push(entry.clone());
    }
    grouped
}

/// Group the entries of one calendar month by date.
///
/// Days without entries get no bucket. An out-of-range month yields an empty map.
pub fn bucket_by_calendar_month(
    entries: &[Entry],
    year: i32,
    month: u32,
) -> BTreeMap<NaiveDate, DateBucket> {
    if month_bounds(year, month).is_none() {
        return BTreeMap::new();
    }

    group_by_date(
        entries
            .iter()
            .filter(|e| e.date.year() == year && e.date.month() == month),
    )
    .into_iter()
    .map(|(date, day_entries)| (date, DateBucket::new(date, day_entries)))
    .collect()
}

/// One bucket per day in `[start, end]`, chronological, including empty days.
///
/// `granularity` only describes how the caller picked the bounds.
pub fn bucket_by_range(
    entries: &[Entry],
    start: NaiveDate,
    end: NaiveDate,
    _granularity: TimeRange,
) -> Vec<DateBucket> {
    if start > end {
        return Vec::new();
    }

    let mut grouped = group_by_date(entries.iter().filter(|e| e.date >= start && e.date <= end));

    start
        .iter_days()
        .take_while(|day| *day <= end)
        .map(|day| DateBucket::new(day, grouped.remove(&day).unwrap_or_default()))
        .collect()
}

/// Spread `count` same-day entries over `[0, 1]`; a lone entry sits at `0.5`.
pub fn intra_day_positions(count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![0.5],
        n => (0..n).map(|i| i as f64 / (n - 1) as f64).collect(),
    }
}

/// Flatten a dense bucket sequence into plot points. Empty days produce no point.
pub fn chart_points(buckets: &[DateBucket]) -> Vec<ChartPoint> {
    let mut points = Vec::new();
    for (day_index, bucket) in buckets.iter().enumerate() {
        let positions = intra_day_positions(bucket.entries.len());
        for (entry, offset) in bucket.entries.iter().zip(positions) {
            points.push(ChartPoint {
                date: bucket.date,
                x: day_index as f64 + offset,
                value: f64::from(entry.mood.ordinal()),
                mood: entry.mood,
                note: entry.text.clone(),
            });
        }
    }
    points
}
