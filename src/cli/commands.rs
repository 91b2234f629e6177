//! CLI command definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "moodiary")]
#[command(about = "Personal mood diary", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a new diary
    Init {
        /// Directory to initialize (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Entries per day (single, multiple)
        #[arg(short, long, default_value = "single")]
        entries: String,
    },

    /// Save the mood and note for a day
    Save {
        /// Day (today, yesterday, N days ago, YYYY-MM-DD)
        day: String,

        /// Mood (verysad, sad, neutral, happy, veryhappy or 1-5)
        mood: String,

        /// Note text
        text: Vec<String>,

        /// Time of day for diaries with multiple entries per day (HH:MM)
        #[arg(short, long)]
        time: Option<String>,
    },

    /// Quick note for today
    Memo {
        /// Mood (verysad, sad, neutral, happy, veryhappy or 1-5)
        mood: String,

        /// Note text (required)
        text: Vec<String>,
    },

    /// Show a day's entries
    Show {
        #[arg(default_value = "today")]
        day: String,
    },

    /// Delete a day's entries
    Delete {
        day: String,

        /// Delete only the entry at this time (HH:MM)
        #[arg(short, long)]
        time: Option<String>,
    },

    /// List entries
    List {
        /// Only entries of this month (YYYY-MM)
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Show a month calendar with moods
    Calendar {
        /// Month to show (YYYY-MM, default: current month)
        month: Option<String>,
    },

    /// Show the mood trend per day
    Trend {
        /// Range (week, month, year); defaults to the configured range
        #[arg(short, long)]
        range: Option<String>,

        /// First day (overrides the range start)
        #[arg(long)]
        from: Option<String>,

        /// Last day (overrides the range end)
        #[arg(long)]
        to: Option<String>,
    },

    /// Apply remote change events from a JSON-lines file
    Sync {
        file: PathBuf,
    },

    /// View or modify configuration
    Config {
        /// Config key to get or set
        key: Option<String>,

        /// Value to set (if provided, sets the key)
        value: Option<String>,

        /// List all configuration
        #[arg(short, long)]
        list: bool,
    },
}
