use std::sync::Arc;

use chrono::{Days, Local, NaiveDate};
use tracing::{debug, info};

use crate::cache::CacheStore;
use crate::error::CollectError;
use crate::fetcher::{PageOutcome, listing_url};
use crate::parser::parse_listing;
use crate::{PageFetcher, Showing, Snapshot, Theater};

/// Today plus the following six days.
pub const DEFAULT_DAYS: u32 = 7;

/// Scrapes every theater for every day and replaces the cached snapshot.
///
/// Shared by the daily scheduler and the `/refresh` handler; the only state
/// it touches between runs is the cache file.
pub struct Collector {
    theaters: Vec<Theater>,
    fetcher: Arc<dyn PageFetcher>,
    cache: CacheStore,
    days: u32,
}

impl Collector {
    pub fn new(theaters: Vec<Theater>, fetcher: Arc<dyn PageFetcher>, cache: CacheStore) -> Self {
        Self {
            theaters,
            fetcher,
            cache,
            days: DEFAULT_DAYS,
        }
    }

    pub fn with_days(mut self, days: u32) -> Self {
        self.days = days;
        self
    }

    pub fn theaters(&self) -> &[Theater] {
        &self.theaters
    }

    pub fn cache(&self) -> &CacheStore {
        &self.cache
    }

    /// Run a full collection dated today (local time).
    pub async fn collect_all(&self) -> Result<Snapshot, CollectError> {
        self.collect_for(Local::now().date_naive()).await
    }

    /// Run a full collection treating `today` as offset 0.
    ///
    /// Pages that fail to fetch are skipped, so a run where every fetch fails
    /// still persists a snapshot with no showings.
    pub async fn collect_for(&self, today: NaiveDate) -> Result<Snapshot, CollectError> {
        info!(theaters = self.theaters.len(), days = self.days, "Scraping movie showtimes...");

        let mut showings = Vec::new();
        for theater in &self.theaters {
            let before = showings.len();
            for offset in 0..self.days {
                let Some(date) = today.checked_add_days(Days::new(offset.into())) else {
                    break;
                };
                let url = listing_url(&theater.listing_url, offset, date);

                match self.fetcher.fetch(&url).await {
                    PageOutcome::Fetched(body) => {
                        showings.extend(
                            parse_listing(&body)?
                                .into_iter()
                                .map(|p| Showing::from_partial(p, &theater.name, date)),
                        );
                    }
                    PageOutcome::Skipped(reason) => {
                        debug!(theater = %theater.name, %url, %reason, "Skipping listing page");
                    }
                }
            }
            debug!(theater = %theater.name, showings = showings.len() - before, "Theater done");
        }

        let snapshot = Snapshot {
            scraped_date: today,
            showings,
        };
        self.cache.write(&snapshot).await?;

        info!(showings = snapshot.showings.len(), "Scraping finished");
        Ok(snapshot)
    }
}
