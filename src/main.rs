use chrono::Datelike;
use clap::Parser;
use moodiary::application::{init::init, manage_config::ConfigService, DiaryService};
use moodiary::cli::{self, Cli, Commands};
use moodiary::domain::calendar_date::parse_year_month;
use moodiary::domain::{EntryMode, TimeRange};
use moodiary::error::MoodiaryError;
use moodiary::infrastructure::{FileSystemRepository, FsBackend};
use std::str::FromStr;
use tracing_subscriber::EnvFilter;

fn main() {
    init_tracing();

    let cli = Cli::parse();

    match run(cli) {
        Ok(_) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {}", e.display_with_suggestions());
            std::process::exit(e.exit_code());
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("MOODIARY_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn open_diary() -> Result<DiaryService<FsBackend>, MoodiaryError> {
    let repo = FileSystemRepository::discover()?;
    DiaryService::open(&repo)
}

fn run(cli: Cli) -> Result<(), MoodiaryError> {
    match cli.command {
        Some(Commands::Init { path, entries }) => {
            let entry_mode = EntryMode::from_str(&entries).map_err(MoodiaryError::Config)?;
            init(&path, entry_mode)?;
            println!(
                "Initialized mood diary in {} ({} entry mode)",
                path.display(),
                entry_mode.as_str()
            );
            Ok(())
        }
        Some(Commands::Save {
            day,
            mood,
            text,
            time,
        }) => {
            let mut diary = open_diary()?;
            let entry = diary.save(&day, &mood, &text.join(" "), time.as_deref())?;
            println!("{}", cli::format_saved(&entry));
            Ok(())
        }
        Some(Commands::Memo { mood, text }) => {
            let mut diary = open_diary()?;
            let entry = diary.memo(&mood, &text.join(" "))?;
            println!("{}", cli::format_saved(&entry));
            Ok(())
        }
        Some(Commands::Show { day }) => {
            let diary = open_diary()?;
            let (date, entries) = diary.show(&day)?;
            println!("{}", cli::format_day(date, &entries).trim_end());
            Ok(())
        }
        Some(Commands::Delete { day, time }) => {
            let mut diary = open_diary()?;
            let removed = diary.delete(&day, time.as_deref())?;
            if removed == 0 {
                println!("Nothing to delete");
            } else {
                println!("Deleted {} entr{}", removed, if removed == 1 { "y" } else { "ies" });
            }
            Ok(())
        }
        Some(Commands::List { month }) => {
            let diary = open_diary()?;
            let month = month.as_deref().map(parse_year_month).transpose()?;
            println!("{}", cli::format_entry_list(&diary.list(month)).trim_end());
            Ok(())
        }
        Some(Commands::Calendar { month }) => {
            let diary = open_diary()?;
            let (year, month) = match month {
                Some(raw) => parse_year_month(&raw)?,
                None => {
                    let today = diary.today();
                    (today.year(), today.month())
                }
            };
            let buckets = diary.calendar(year, month);
            print!("{}", cli::format_calendar(year, month, &buckets));
            Ok(())
        }
        Some(Commands::Trend { range, from, to }) => {
            let diary = open_diary()?;
            let range = range
                .as_deref()
                .map(TimeRange::from_str)
                .transpose()
                .map_err(MoodiaryError::Validation)?;
            let (range, buckets) = diary.trend(range, from.as_deref(), to.as_deref())?;
            println!("{}", cli::format_trend(range, &buckets).trim_end());
            Ok(())
        }
        Some(Commands::Sync { file }) => {
            let mut diary = open_diary()?;
            let report = diary.sync_file(&file)?;
            println!("{}", cli::format_sync_report(&report));
            Ok(())
        }
        Some(Commands::Config { key, value, list }) => {
            let repo = FileSystemRepository::discover()?;
            let service = ConfigService::new(repo);

            if list {
                let config = service.list()?;
                println!("entry_mode = {}", config.entry_mode.as_str());
                println!("default_range = {}", config.default_range.as_str());
                println!("created = {}", config.created.to_rfc3339());
                Ok(())
            } else if let Some(k) = key {
                if let Some(v) = value {
                    service.set(&k, &v)?;
                    println!("Set {} = {}", k, v);
                } else {
                    println!("{}", service.get(&k)?);
                }
                Ok(())
            } else {
                println!("Usage: moodiary config [--list | <key> [<value>]]");
                println!("Valid keys: entry_mode, default_range, created");
                Ok(())
            }
        }
        None => {
            println!("moodiary - Personal mood diary");
            println!("Use --help for usage information");
            Ok(())
        }
    }
}

