//! # zoned-time CLI
//!
//! Converts between UTC instants and civil time from the command line and
//! prints the results as JSON.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Datelike, NaiveDateTime, Timelike, Utc};
use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::json;
use tracing_subscriber::EnvFilter;

use zoned_time::{
    civil_to_utc, in_working_hours, is_working_day, metadata_for, next_transition_after,
    supported_timezones, to_timezone_string, to_utc_string, transitions_for_year, utc_to_civil,
    CivilTime, CivilTimeConverter, TransitionSearchEngine, TzdbProvider, ZonedTimeConfig,
};

/// DST-correct UTC and civil time conversion.
#[derive(Parser, Debug)]
#[command(name = "zoned-time", version, about, long_about = None)]
struct Cli {
    /// JSON configuration file (default timezone, working hours and days).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Pretty-print JSON output.
    #[arg(long, global = true)]
    pretty: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Express a UTC instant as civil time in a timezone.
    ToCivil {
        /// RFC 3339 instant (e.g. 2024-07-15T12:00:00Z). Defaults to now.
        #[arg(long)]
        at: Option<DateTime<Utc>>,
        /// IANA timezone. Defaults to the configured timezone.
        #[arg(long)]
        tz: Option<String>,
    },
    /// Map a civil time in a timezone to a UTC instant.
    ToUtc {
        /// Civil time as `YYYY-MM-DD HH:MM[:SS]` or `YYYY-MM-DDTHH:MM[:SS]`.
        civil: String,
        #[arg(long)]
        tz: Option<String>,
    },
    /// DST start and end instants for a year.
    Transitions {
        year: i32,
        #[arg(long)]
        tz: Option<String>,
        /// List every transition found, including partial years.
        #[arg(long)]
        all: bool,
    },
    /// The first DST transition strictly after an instant.
    NextTransition {
        #[arg(long)]
        after: Option<DateTime<Utc>>,
        #[arg(long)]
        tz: Option<String>,
    },
    /// Format an instant as local and UTC strings.
    Format {
        #[arg(long)]
        at: Option<DateTime<Utc>>,
        #[arg(long)]
        tz: Option<String>,
    },
    /// Check an instant against the configured working hours and days.
    Working {
        #[arg(long)]
        at: Option<DateTime<Utc>>,
        #[arg(long)]
        tz: Option<String>,
    },
    /// List supported timezones and their metadata.
    Zones,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => ZonedTimeConfig::from_path(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => ZonedTimeConfig::default(),
    };
    tracing::debug!(default_timezone = %config.default_timezone, "configuration loaded");

    let zone = |tz: Option<String>| tz.unwrap_or_else(|| config.default_timezone.clone());
    let instant = |at: Option<DateTime<Utc>>| at.unwrap_or_else(Utc::now);

    let output = match cli.command {
        Commands::ToCivil { at, tz } => {
            let (at, tz) = (instant(at), zone(tz));
            let converter = CivilTimeConverter::new(TzdbProvider);
            let civil = converter.utc_to_civil(at, &tz)?;
            let offset = converter.offset_at(at, &tz)?;
            json!({
                "timezone": tz,
                "instant": at,
                "civil": civil,
                "offset": offset,
            })
        }
        Commands::ToUtc { civil, tz } => {
            let tz = zone(tz);
            let civil = parse_civil(&civil)?;
            let at = civil_to_utc(&civil, &tz)?;
            json!({
                "timezone": tz,
                "civil": civil,
                "instant": at,
                "resolved_civil": utc_to_civil(at, &tz)?,
            })
        }
        Commands::Transitions { year, tz, all } => {
            let tz = zone(tz);
            if all {
                let events = TransitionSearchEngine::new(TzdbProvider).events_for_year(year, &tz)?;
                json!({ "timezone": tz, "year": year, "events": events })
            } else {
                let transitions = transitions_for_year(year, &tz)?;
                json!({ "timezone": tz, "year": year, "transitions": transitions })
            }
        }
        Commands::NextTransition { after, tz } => {
            let (after, tz) = (instant(after), zone(tz));
            let event = next_transition_after(after, &tz)?;
            json!({ "timezone": tz, "after": after, "transition": event })
        }
        Commands::Format { at, tz } => {
            let (at, tz) = (instant(at), zone(tz));
            json!({
                "timezone": tz,
                "local": to_timezone_string(at, &tz)?,
                "utc": to_utc_string(at)?,
            })
        }
        Commands::Working { at, tz } => {
            let (at, tz) = (instant(at), zone(tz));
            json!({
                "timezone": tz,
                "instant": at,
                "in_working_hours": in_working_hours(at, &tz, &config.working_hours)?,
                "is_working_day": is_working_day(at, &tz, &config.working_days)?,
                "working_hours": config.working_hours,
                "working_days": config.working_days,
            })
        }
        Commands::Zones => {
            let zones = supported_timezones()
                .map(metadata_for)
                .collect::<zoned_time::Result<Vec<_>>>()?;
            json!(zones)
        }
    };

    print_json(&output, cli.pretty)
}

/// Parse `YYYY-MM-DD HH:MM[:SS]`, with either a space or `T` separator.
fn parse_civil(input: &str) -> Result<CivilTime> {
    let naive = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(input, fmt).ok())
        .with_context(|| format!("'{input}' is not a civil time (expected YYYY-MM-DD HH:MM[:SS])"))?;
    // chrono reads second 60 as a leap second carried in the nanoseconds
    let second = naive.second() + naive.nanosecond() / 1_000_000_000;
    Ok(CivilTime::new(
        naive.year(),
        naive.month(),
        naive.day(),
        naive.hour(),
        naive.minute(),
        second,
    )?)
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let text = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{text}");
    Ok(())
}
