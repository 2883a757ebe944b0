//! `overlap` CLI: record your availability, exchange exports, and find when
//! a group is free.
//!
//! ## Usage
//!
//! ```sh
//! # One-time setup (stored in ./availability.json or $OVERLAP_STATE)
//! overlap init --name "Ada Lovelace" --evening 17:30
//!
//! # Mark days
//! overlap set 2026-03-14 ranges --range 18:00-20:00 --range 21:00-22:30
//! overlap set 2026-03-15 evening
//! overlap clear 2026-03-15
//!
//! # Share a month, or back up everything and restore it later
//! overlap export --month 2026-03 -o ada.json
//! overlap export --all -o backup.json
//! overlap import backup.json
//!
//! # Combine everyone's exports
//! overlap month --month 2026-03 ada.json bob.json
//! overlap day --day 2026-03-14 --evenings-only ada.json bob.json
//! ```

mod render;
mod state;

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::{Datelike, Local, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use overlap_engine::aggregate::DEFAULT_BUCKET_MINUTES;
use overlap_engine::export::ExportUser;
use overlap_engine::time::{format_hhmm, parse_hhmm};
use overlap_engine::{
    aggregate_month, compute_day_buckets, group_overlap, AvailabilityExport, DayKey, DayOverride,
    MonthKey, MonthScope, Roster, TimeRange,
};
use tracing_subscriber::EnvFilter;

use crate::state::LocalState;

#[derive(Parser)]
#[command(
    name = "overlap",
    version,
    about = "Record availability and find when a group is free"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Local state file holding your settings and day overrides
    #[arg(long, global = true, env = "OVERLAP_STATE", default_value = "availability.json")]
    state: PathBuf,

    /// Log level used when RUST_LOG is not set (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,
}

#[derive(Clone, Copy, ValueEnum)]
enum Kind {
    /// Busy all day (removes the day's override)
    None,
    /// Free the whole day
    AllDay,
    /// Free from your evening start until midnight
    Evening,
    /// Free during the given --range values
    Ranges,
}

#[derive(Subcommand)]
enum Commands {
    /// Set your name and evening start
    Init {
        /// Your display name (required for exports)
        #[arg(long)]
        name: String,
        /// When your evening begins, as HH:MM
        #[arg(long)]
        evening: Option<String>,
    },
    /// Set your availability for one day
    Set {
        /// Day as YYYY-MM-DD
        day: String,
        /// What kind of availability to record
        #[arg(value_enum)]
        kind: Kind,
        /// Free range as HH:MM-HH:MM (repeatable, only with `ranges`)
        #[arg(long = "range")]
        ranges: Vec<String>,
    },
    /// Remove your override for a day (or every day)
    Clear {
        /// Day as YYYY-MM-DD
        #[arg(required_unless_present = "all")]
        day: Option<String>,
        /// Remove every stored override
        #[arg(long, conflicts_with = "day")]
        all: bool,
    },
    /// List your stored overrides
    Show {
        /// Only show days in this month (YYYY-MM)
        #[arg(long)]
        month: Option<String>,
    },
    /// Write your availability as a portable JSON document
    Export {
        /// Month to export (YYYY-MM); defaults to the current month
        #[arg(long, conflicts_with = "all")]
        month: Option<String>,
        /// Export every stored day (backup)
        #[arg(long)]
        all: bool,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Restore your own availability from an export file (e.g. an `--all` backup)
    Import {
        /// Export file to load
        file: PathBuf,
        /// Drop every stored day before loading
        #[arg(long)]
        replace: bool,
    },
    /// Show how many people are free on each day of a month
    Month {
        /// Month as YYYY-MM
        #[arg(long)]
        month: String,
        /// Only count time after each person's evening start
        #[arg(long)]
        evenings_only: bool,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
        /// Leave a person out of the aggregate (by user id, repeatable)
        #[arg(long)]
        exclude: Vec<String>,
        /// Export files to combine
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Show the timeline and shared free time for one day
    Day {
        /// Day as YYYY-MM-DD
        #[arg(long)]
        day: String,
        /// Bucket width in minutes for the timeline
        #[arg(long, default_value_t = DEFAULT_BUCKET_MINUTES)]
        bucket: u16,
        /// Only count time after each person's evening start
        #[arg(long)]
        evenings_only: bool,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
        /// Leave a person out of the aggregate (by user id, repeatable)
        #[arg(long)]
        exclude: Vec<String>,
        /// Export files to combine
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    match cli.command {
        Commands::Init { name, evening } => {
            let name = name.trim().to_string();
            if name.is_empty() {
                bail!("Name must not be empty");
            }
            let mut state = LocalState::load(&cli.state)?;
            state.user.full_name = name;
            if let Some(evening) = evening {
                state.prefs.evening_start_mins = parse_time(&evening)?;
            }
            state.save(&cli.state)?;
            println!(
                "Saved settings for {} (id {}, evening starts {})",
                state.user.full_name,
                state.user.id,
                format_hhmm(state.prefs.evening_start_mins)
            );
        }
        Commands::Set { day, kind, ranges } => {
            let day = parse_day(&day)?;
            let ov = build_override(kind, &ranges)?;
            let mut state = LocalState::load(&cli.state)?;
            println!("{}: {}", day, describe(&ov, state.prefs.evening_start_mins));
            state.overrides.set(day.to_string(), ov);
            state.save(&cli.state)?;
        }
        Commands::Clear { day, all } => {
            let mut state = LocalState::load(&cli.state)?;
            if all {
                state.overrides.clear_all();
                println!("Cleared all days");
            } else if let Some(day) = day {
                let day = parse_day(&day)?;
                if state.overrides.clear(&day.to_string()) {
                    println!("Cleared {}", day);
                } else {
                    println!("{} had no override", day);
                }
            }
            state.save(&cli.state)?;
        }
        Commands::Show { month } => {
            let state = LocalState::load(&cli.state)?;
            let evening = state.prefs.evening_start_mins;
            match month.as_deref().map(parse_month).transpose()? {
                Some(month) => {
                    for (day, ov) in state.overrides.in_month(&month) {
                        println!("{}: {}", day, describe(ov, evening));
                    }
                }
                None => {
                    for (day, ov) in &state.overrides {
                        println!("{}: {}", day, describe(ov, evening));
                    }
                }
            }
        }
        Commands::Export { month, all, output } => {
            let state = LocalState::load(&cli.state)?;
            let scope = if all {
                MonthScope::All
            } else {
                match month {
                    Some(m) => MonthScope::Month(parse_month(&m)?),
                    None => {
                        let today = Local::now().date_naive();
                        MonthScope::Month(MonthKey::new(today.year(), today.month())?)
                    }
                }
            };
            let doc = AvailabilityExport::build(
                ExportUser {
                    id: state.user.id.clone(),
                    full_name: state.user.full_name.clone(),
                },
                state.prefs.evening_start_mins,
                &state.overrides,
                scope,
                uuid::Uuid::new_v4().to_string(),
                Utc::now(),
            )
            .context("Failed to build export (run `overlap init --name ...` first)")?;
            let json = doc.to_json_pretty()?;
            match output {
                Some(path) => {
                    std::fs::write(&path, json)
                        .with_context(|| format!("Failed to write file: {}", path))?;
                    eprintln!(
                        "Wrote {} day(s) to {} (suggested name: {})",
                        doc.overrides_by_day.len(),
                        path,
                        doc.suggested_filename()
                    );
                }
                None => println!("{}", json),
            }
        }
        Commands::Import { file, replace } => {
            let doc = read_export(&file)?;
            let mut state = LocalState::load(&cli.state)?;
            if replace {
                state.overrides.clear_all();
            }
            state.user.id = doc.user.id;
            state.user.full_name = doc.user.full_name;
            state.prefs.evening_start_mins = doc.prefs.evening_start_mins;
            let days = doc.overrides_by_day.len();
            for (day, ov) in doc.overrides_by_day {
                state.overrides.set(day, ov);
            }
            state.save(&cli.state)?;
            println!(
                "Imported {} day(s) for {} ({}), evening starts {}",
                days,
                state.user.full_name,
                doc.month,
                format_hhmm(state.prefs.evening_start_mins)
            );
        }
        Commands::Month {
            month,
            evenings_only,
            json,
            exclude,
            files,
        } => {
            let month = parse_month(&month)?;
            let roster = load_roster(&files, &exclude)?;
            let agg = aggregate_month(&roster.included(), &month, evenings_only);
            if json {
                println!("{}", render::month_json(&agg, &month, evenings_only)?);
            } else {
                print!("{}", render::month_text(&agg, &month, evenings_only));
            }
        }
        Commands::Day {
            day,
            bucket,
            evenings_only,
            json,
            exclude,
            files,
        } => {
            let day = parse_day(&day)?.to_string();
            let roster = load_roster(&files, &exclude)?;
            let included = roster.included();
            let buckets = compute_day_buckets(&included, &day, evenings_only, bucket)?;
            let overlap = group_overlap(&included, &day, evenings_only);
            if json {
                println!(
                    "{}",
                    render::day_json(&day, evenings_only, bucket, &buckets, &overlap)?
                );
            } else {
                print!(
                    "{}",
                    render::day_text(&day, evenings_only, bucket, &buckets, &overlap)
                );
            }
        }
    }

    Ok(())
}

/// Install a stderr subscriber. `RUST_LOG` wins over `--log-level`.
fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Import every readable, valid export file. Invalid files are reported and
/// skipped; it is an error only when none are usable.
fn load_roster(files: &[PathBuf], exclude: &[String]) -> Result<Roster> {
    let mut roster = Roster::new();
    let mut rejected = 0usize;

    for path in files {
        match read_export(path) {
            Ok(doc) => {
                if roster.import_export(doc) {
                    tracing::info!(file = %path.display(), "replaced earlier export for the same person");
                }
            }
            Err(e) => {
                rejected += 1;
                tracing::warn!(file = %path.display(), error = %e, "skipping invalid export");
                eprintln!("Skipping {}: {:#}", path.display(), e);
            }
        }
    }

    if roster.is_empty() {
        bail!(
            "No valid availability exports among {} file(s)",
            files.len()
        );
    }
    if rejected > 0 {
        tracing::info!(rejected, accepted = roster.len(), "finished importing exports");
    }

    for id in exclude {
        if !roster.set_included(id, false) {
            eprintln!("No imported person with id '{}'", id);
        }
    }
    Ok(roster)
}

fn read_export(path: &Path) -> Result<AvailabilityExport> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;
    AvailabilityExport::from_json(&raw).context("Not a valid availability export")
}

fn parse_day(raw: &str) -> Result<DayKey> {
    Ok(raw.parse::<DayKey>()?)
}

fn parse_month(raw: &str) -> Result<MonthKey> {
    Ok(raw.parse::<MonthKey>()?)
}

fn parse_time(raw: &str) -> Result<u16> {
    parse_hhmm(raw).with_context(|| format!("Invalid time '{}' (expected HH:MM)", raw))
}

/// Parse `HH:MM-HH:MM`. The end may be `24:00` and must come after the start.
fn parse_range(raw: &str) -> Result<TimeRange> {
    let Some((start, end)) = raw.split_once('-') else {
        bail!("Invalid range '{}' (expected HH:MM-HH:MM)", raw);
    };
    let start = parse_time(start)?;
    let end = parse_time(end)?;
    if end <= start {
        bail!("Invalid range '{}': end must be after start", raw);
    }
    Ok(TimeRange::new(start, end))
}

fn build_override(kind: Kind, ranges: &[String]) -> Result<DayOverride> {
    if !matches!(kind, Kind::Ranges) && !ranges.is_empty() {
        bail!("--range is only valid with the `ranges` kind");
    }
    Ok(match kind {
        Kind::None => DayOverride::None,
        Kind::AllDay => DayOverride::AllDayFree,
        Kind::Evening => DayOverride::EveningFree,
        Kind::Ranges => {
            if ranges.is_empty() {
                bail!("`ranges` needs at least one --range HH:MM-HH:MM");
            }
            let parsed = ranges
                .iter()
                .map(|r| parse_range(r))
                .collect::<Result<Vec<_>>>()?;
            DayOverride::ranges(parsed)
        }
    })
}

fn describe(ov: &DayOverride, evening_start: u16) -> String {
    match ov {
        DayOverride::None => "busy".to_string(),
        DayOverride::AllDayFree => "free all day".to_string(),
        DayOverride::EveningFree => format!("free from {}", format_hhmm(evening_start)),
        DayOverride::Ranges { ranges } => ranges
            .iter()
            .map(|r| format!("{}-{}", format_hhmm(r.start_mins), format_hhmm(r.end_mins)))
            .collect::<Vec<_>>()
            .join(", "),
    }
}
