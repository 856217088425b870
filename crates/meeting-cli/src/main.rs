//! `meetings` CLI: find, analyze, summarize, and check meeting times from the command line.
//!
//! The event feed is a JSON document produced by whatever fetches the calendar:
//! `{"events": [...]}` on success or `{"error": "..."}` on failure.
//!
//! ## Usage
//!
//! ```sh
//! # Suggest 30-minute slots over the next 7 days (feed on stdin)
//! fetch-calendar | meetings plan
//!
//! # Explicit window, duration, and suggestion count
//! meetings plan -e events.json --start 2026-03-16T09:00:00Z --end 2026-03-16T18:00:00Z \
//!     --duration 45 --max-suggestions 3
//!
//! # Break one day down by block type
//! meetings analyze -e events.json --date 2026-03-16
//!
//! # Meeting load over the last 14 days
//! meetings summarize -e events.json --days 14
//!
//! # Is a proposed time free? Flexible blocks only count with --respect-flexible
//! meetings check -e events.json --start 2026-03-16T14:00:00Z --end 2026-03-16T15:00:00Z
//! ```
//!
//! Preferences are read from `~/.config/calendar-mcp/config.json` unless
//! `--config` points elsewhere. Set `RUST_LOG` or pass `-v` for diagnostics.

use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, TimeDelta, Utc};
use clap::{Parser, Subcommand};
use meeting_engine::{
    analyze_day, check_availability, plan_meeting_times, summarize_meetings, Config, EventFeed,
    MeetingRequest, PlanError,
};
use serde_json::json;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "meetings", version, about = "Find and score meeting times")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Preferences file (defaults to ~/.config/calendar-mcp/config.json)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Suggest ranked meeting times
    Plan {
        /// Event feed JSON (reads from stdin if omitted or "-")
        #[arg(short, long)]
        events: Option<String>,
        /// Window start (RFC 3339); defaults to now
        #[arg(long, value_parser = parse_timestamp)]
        start: Option<DateTime<Utc>>,
        /// Window end (RFC 3339); defaults to start + --days
        #[arg(long, value_parser = parse_timestamp)]
        end: Option<DateTime<Utc>>,
        /// Days ahead to search when --end is not given
        #[arg(long, default_value_t = 7)]
        days: i64,
        /// Meeting duration in minutes
        #[arg(short, long, default_value_t = 30, allow_negative_numbers = true)]
        duration: i64,
        /// Maximum number of suggestions
        #[arg(short, long, default_value_t = 5)]
        max_suggestions: usize,
        /// Keep events you have declined
        #[arg(long)]
        include_declined: bool,
    },
    /// Break a day's calendar down by block type
    Analyze {
        /// Event feed JSON (reads from stdin if omitted or "-")
        #[arg(short, long)]
        events: Option<String>,
        /// Day to analyze (YYYY-MM-DD); defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Count meetings, hours, and frequent attendees over a period
    Summarize {
        /// Event feed JSON (reads from stdin if omitted or "-")
        #[arg(short, long)]
        events: Option<String>,
        /// Period start (RFC 3339); defaults to end - --days
        #[arg(long, value_parser = parse_timestamp)]
        start: Option<DateTime<Utc>>,
        /// Period end (RFC 3339); defaults to now
        #[arg(long, value_parser = parse_timestamp)]
        end: Option<DateTime<Utc>>,
        /// Days to look back when --start is not given
        #[arg(long, default_value_t = 7)]
        days: i64,
        /// Keep events you have declined
        #[arg(long)]
        include_declined: bool,
    },
    /// Check whether a proposed time is free
    Check {
        /// Event feed JSON (reads from stdin if omitted or "-")
        #[arg(short, long)]
        events: Option<String>,
        #[arg(long, value_parser = parse_timestamp)]
        start: DateTime<Utc>,
        #[arg(long, value_parser = parse_timestamp)]
        end: DateTime<Utc>,
        /// Treat flexible blocks as busy
        #[arg(long)]
        respect_flexible: bool,
        /// Keep events you have declined
        #[arg(long)]
        include_declined: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = load_config(cli.config.as_deref());
    let prefs = &config.preferences;

    let outcome = match cli.command {
        Commands::Plan {
            events,
            start,
            end,
            days,
            duration,
            max_suggestions,
            include_declined,
        } => {
            let feed = read_feed(events.as_deref())?.include_declined(include_declined);
            let window_start = start.unwrap_or_else(Utc::now);
            match end.or_else(|| days_after(window_start, days)) {
                Some(window_end) => {
                    let request =
                        MeetingRequest::new(window_start, window_end, duration, max_suggestions);
                    plan_meeting_times(&feed, &request, prefs).map(serde_json::to_value)
                }
                None => Err(PlanError::InvalidRequest(format!(
                    "--days {} is out of range",
                    days
                ))),
            }
        }
        Commands::Analyze { events, date } => {
            let feed = read_feed(events.as_deref())?;
            let tz = prefs.meeting_preferences.timezone;
            let date = date.unwrap_or_else(|| Utc::now().with_timezone(&tz).date_naive());
            analyze_day(&feed, date, prefs).map(serde_json::to_value)
        }
        Commands::Summarize {
            events,
            start,
            end,
            days,
            include_declined,
        } => {
            let feed = read_feed(events.as_deref())?.include_declined(include_declined);
            let period_end = end.unwrap_or_else(Utc::now);
            match start.or_else(|| days_before(period_end, days)) {
                Some(period_start) => summarize_meetings(&feed, period_start, period_end, prefs)
                    .map(serde_json::to_value),
                None => Err(PlanError::InvalidRequest(format!(
                    "--days {} is out of range",
                    days
                ))),
            }
        }
        Commands::Check {
            events,
            start,
            end,
            respect_flexible,
            include_declined,
        } => {
            let feed = read_feed(events.as_deref())?.include_declined(include_declined);
            check_availability(&feed, start, end, respect_flexible, prefs)
                .map(serde_json::to_value)
        }
    };

    match outcome {
        Ok(value) => {
            let pretty = serde_json::to_string_pretty(&value?)?;
            println!("{}", pretty);
        }
        Err(err) => {
            tracing::debug!(error = %err, "request failed");
            println!("{}", serde_json::to_string_pretty(&error_body(&err))?);
            process::exit(1);
        }
    }

    Ok(())
}

/// The `{"error": "..."}` body for a failed request. Upstream errors are
/// passed through untouched.
fn error_body(err: &PlanError) -> serde_json::Value {
    match err {
        PlanError::Upstream(fetch) => json!(fetch),
        PlanError::InvalidRequest(_) => json!({ "error": err.to_string() }),
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Load preferences, falling back to defaults when the file is unusable.
fn load_config(path: Option<&Path>) -> Config {
    let Some(path) = path.map(Path::to_path_buf).or_else(default_config_path) else {
        return Config::default();
    };
    match Config::load(&path) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "ignoring unusable config");
            Config::default()
        }
    }
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("calendar-mcp").join("config.json"))
}

/// `start` plus `days`, or `None` if the result is not representable.
fn days_after(start: DateTime<Utc>, days: i64) -> Option<DateTime<Utc>> {
    TimeDelta::try_days(days).and_then(|d| start.checked_add_signed(d))
}

fn days_before(end: DateTime<Utc>, days: i64) -> Option<DateTime<Utc>> {
    TimeDelta::try_days(days).and_then(|d| end.checked_sub_signed(d))
}

fn parse_timestamp(raw: &str) -> std::result::Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| format!("expected an RFC 3339 timestamp: {}", e))
}

fn read_feed(path: Option<&str>) -> Result<EventFeed> {
    let raw = read_input(path)?;
    EventFeed::from_json(&raw).context("Failed to parse event feed")
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) if path != "-" => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        _ => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}
