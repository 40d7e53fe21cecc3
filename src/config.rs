use std::path::PathBuf;

use chrono::{NaiveTime, TimeDelta};
use clap::Parser;

use crate::collector::DEFAULT_DAYS;
use crate::error::ConfigError;
use crate::scheduler::DailySchedule;
use crate::theaters::{Theater, load_theaters, nyc_theaters};

/// Scrapes New York movie showtimes daily and serves the latest snapshot over HTTP.
#[derive(Debug, Parser)]
#[command(version, about)]
pub struct Args {
    /// Address to bind the HTTP API to
    #[arg(long, default_value = "127.0.0.1")]
    pub bind: String,

    #[arg(long, default_value_t = 5000)]
    pub port: u16,

    /// JSON file holding the latest snapshot
    #[arg(long, default_value = "cached_showtimes.json")]
    pub cache_file: PathBuf,

    /// JSON list of {name, address, url} replacing the built-in theaters
    #[arg(long)]
    pub theaters: Option<PathBuf>,

    /// Days of listings per theater, starting today
    #[arg(long, default_value_t = DEFAULT_DAYS)]
    pub days: u32,

    /// Local time of the daily scrape (HH:MM)
    #[arg(long, default_value = "04:00", value_parser = parse_time_of_day)]
    pub refresh_at: NaiveTime,

    /// How late a daily scrape may start before it is skipped
    #[arg(long, default_value_t = 120)]
    pub misfire_grace_minutes: i64,

    /// Serve straight away instead of scraping once at startup
    #[arg(long)]
    pub skip_initial_scrape: bool,
}

impl Args {
    pub fn theater_list(&self) -> Result<Vec<Theater>, ConfigError> {
        match &self.theaters {
            Some(path) => load_theaters(path),
            None => Ok(nyc_theaters()),
        }
    }

    pub fn schedule(&self) -> DailySchedule {
        DailySchedule {
            at: self.refresh_at,
            grace: TimeDelta::minutes(self.misfire_grace_minutes),
        }
    }
}

pub fn parse_time_of_day(s: &str) -> Result<NaiveTime, ConfigError> {
    NaiveTime::parse_from_str(s.trim(), "%H:%M")
        .map_err(|_| ConfigError::TimeOfDay(s.to_string()))
}
