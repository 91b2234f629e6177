//! CLI layer - Command-line interface

pub mod commands;
pub mod output;

pub use commands::{Cli, Commands};
pub use output::{
    format_calendar, format_day, format_entry_list, format_saved, format_sync_report, format_trend,
};
