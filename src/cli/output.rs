//! Output formatting utilities

use crate::application::ApplyReport;
use crate::domain::calendar_date::month_bounds;
use crate::domain::{DateBucket, Entry, TimeRange};
use chrono::{Datelike, NaiveDate};
use std::collections::BTreeMap;

fn entry_line(entry: &Entry) -> String {
    let time = entry
        .time
        .map(|t| t.format("%H:%M").to_string())
        .unwrap_or_else(|| "     ".to_string());
    let mut line = format!(
        "{}  {}  {} {:<9}",
        entry.date.format("%Y-%m-%d"),
        time,
        entry.mood.emoji(),
        entry.mood.as_str()
    );
    if !entry.text.is_empty() {
        line.push_str("  ");
        line.push_str(&entry.text);
    }
    line.trim_end().to_string()
}

/// Format a list of entries for display
pub fn format_entry_list(entries: &[&Entry]) -> String {
    if entries.is_empty() {
        return "No entries found".to_string();
    }

    let mut output = String::new();
    for entry in entries {
        output.push_str(&entry_line(entry));
        output.push('\n');
    }
    output
}

/// Format one day's entries
pub fn format_day(date: NaiveDate, entries: &[&Entry]) -> String {
    if entries.is_empty() {
        return format!("No entry for {}", date.format("%Y-%m-%d"));
    }
    format_entry_list(entries)
}

pub fn format_saved(entry: &Entry) -> String {
    format!(
        "Saved {} {} ({})",
        entry.date.format("%Y-%m-%d"),
        entry.mood.as_str(),
        entry.mood.label()
    )
}

/// Mood markers for a calendar cell: up to three ordinals, or two plus an overflow count.
pub fn cell_markers(bucket: &DateBucket) -> String {
    let ordinal = |e: &Entry| e.mood.ordinal().to_string();
    if bucket.entries.len() <= 3 {
        bucket.entries.iter().map(ordinal).collect()
    } else {
        let shown: String = bucket.entries.iter().take(2).map(ordinal).collect();
        format!("{}+{}", shown, bucket.entries.len() - 2)
    }
}

/// Month grid, Monday first. Days with entries carry their latest mood ordinal.
pub fn format_calendar(
    year: i32,
    month: u32,
    buckets: &BTreeMap<NaiveDate, DateBucket>,
) -> String {
    let Some((first, last)) = month_bounds(year, month) else {
        return format!("Invalid month: {}-{:02}", year, month);
    };

    let mut output = format!("{}\n", first.format("%B %Y"));
    output.push_str(" Mo   Tu   We   Th   Fr   Sa   Su\n");

    let offset = first.weekday().num_days_from_monday() as usize;
    let mut cells: Vec<String> = vec!["    ".to_string(); offset];
    for day in first.iter_days().take_while(|d| *d <= last) {
        let marker = buckets
            .get(&day)
            .and_then(|b| b.latest())
            .map(|e| e.mood.ordinal().to_string())
            .unwrap_or_else(|| ".".to_string());
        cells.push(format!("{:>2}:{}", day.day(), marker));
    }

    for week in cells.chunks(7) {
        output.push_str(week.join(" ").trim_end());
        output.push('\n');
    }

    if !buckets.is_empty() {
        output.push('\n');
        for (date, bucket) in buckets {
            let latest = bucket.latest().map(|e| e.mood.as_str()).unwrap_or("-");
            output.push_str(&format!(
                "{}  {:<9}  {}\n",
                date.format("%Y-%m-%d"),
                latest,
                cell_markers(bucket)
            ));
        }
    }

    output
}

/// Dense trend table; empty days show a gap marker instead of a value.
pub fn format_trend(range: TimeRange, buckets: &[DateBucket]) -> String {
    if buckets.is_empty() {
        return "No days in range".to_string();
    }

    let mut output = format!("Mood trend ({})\n", range.as_str());
    let mut total = 0.0;
    let mut days_with_entries = 0;

    for bucket in buckets {
        let date = bucket.date.format("%Y-%m-%d");
        match (bucket.mean(), bucket.representative_mood()) {
            (Some(mean), Some(mood)) => {
                total += mean;
                days_with_entries += 1;
                output.push_str(&format!(
                    "{}  {:.2}  {} {}\n",
                    date,
                    mean,
                    mood.emoji(),
                    mood.as_str()
                ));
            }
            _ => output.push_str(&format!("{}     -\n", date)),
        }
    }

    if days_with_entries > 0 {
        output.push_str(&format!(
            "Average {:.2} over {} of {} days\n",
            total / days_with_entries as f64,
            days_with_entries,
            buckets.len()
        ));
    } else {
        output.push_str("No entries in range\n");
    }
    output
}

pub fn format_sync_report(report: &ApplyReport) -> String {
    format!(
        "Applied {} change(s): {} inserted, {} replaced, {} deleted; {} stale, {} no-op, {} rejected",
        report.total(),
        report.inserted,
        report.replaced,
        report.deleted,
        report.stale,
        report.no_op,
        report.rejected
    )
}
