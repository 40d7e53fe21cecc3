use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub mod api;
pub mod cache;
pub mod collector;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod parser;
pub mod scheduler;
pub mod theaters;

pub use cache::{CacheRead, CacheStore};
pub use collector::Collector;
pub use fetcher::{HttpFetcher, PageOutcome, SkipReason};
pub use theaters::Theater;

/// One (movie, format) group scraped from a single listing page.
/// Theater and date are attached later by the collector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartialShowing {
    pub movie: String,
    pub format: String,
    pub showtimes: Vec<String>,
}

/// All bookable showtimes for one (theater, movie, format, date).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Showing {
    pub theater: String,
    pub movie: String,
    pub format: String,
    pub date: NaiveDate,
    pub showtimes: Vec<String>,
}

impl Showing {
    pub fn from_partial(partial: PartialShowing, theater: &str, date: NaiveDate) -> Self {
        Self {
            theater: theater.to_string(),
            movie: partial.movie,
            format: partial.format,
            date,
            showtimes: partial.showtimes,
        }
    }
}

/// The complete result of one collection run, as cached and served.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub scraped_date: NaiveDate,
    pub showings: Vec<Showing>,
}

/// Source of raw listing markup.
#[async_trait::async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch one listing page. Failures are reported as `PageOutcome::Skipped`, never as errors.
    async fn fetch(&self, url: &str) -> PageOutcome;
}
