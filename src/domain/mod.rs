//! Domain layer - Entries, moods, and date-bucketed views

pub mod aggregate;
pub mod calendar_date;
pub mod day_ref;
pub mod entry;
pub mod mode;
pub mod mood;
pub mod range;

pub use aggregate::{
    bucket_by_calendar_month, bucket_by_range, chart_points, intra_day_positions, ChartPoint,
    DateBucket,
};
pub use calendar_date::{parse_calendar_date, CalendarDate};
pub use day_ref::DayReference;
pub use entry::{Entry, EntryDraft};
pub use mode::{EntryKey, EntryMode};
pub use mood::Mood;
pub use range::TimeRange;
