use chrono::NaiveDate;
use reqwest::{Client, StatusCode, header};
use tracing::debug;

use crate::PageFetcher;

/// Fever rejects or strips listings for unknown clients.
pub const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/122.0.0.0 Safari/537.36";

/// Result of fetching one listing page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageOutcome {
    Fetched(String),
    Skipped(SkipReason),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Upstream answered with something other than 200.
    Status(u16),
    /// Connection, TLS or body read failure.
    Transport(String),
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::Status(code) => write!(f, "status {}", code),
            SkipReason::Transport(msg) => write!(f, "transport error: {}", msg),
        }
    }
}

/// Listing URL for `date`, `offset` days from today. Today's page takes no query.
pub fn listing_url(base: &str, offset: u32, date: NaiveDate) -> String {
    if offset == 0 {
        base.to_string()
    } else {
        format!("{}?date={}", base, date.format("%Y-%m-%d"))
    }
}

/// Plain GET fetcher with a desktop browser User-Agent.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self, reqwest::Error> {
        let client = Client::builder().cookie_store(true).build()?;
        Ok(Self { client })
    }
}

#[async_trait::async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> PageOutcome {
        let resp = match self
            .client
            .get(url)
            .header(header::USER_AGENT, USER_AGENT)
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => return PageOutcome::Skipped(SkipReason::Transport(e.to_string())),
        };

        let status = resp.status();
        if status != StatusCode::OK {
            debug!(url, status = status.as_u16(), "non-200 listing response");
            return PageOutcome::Skipped(SkipReason::Status(status.as_u16()));
        }

        match resp.text().await {
            Ok(body) => PageOutcome::Fetched(body),
            Err(e) => PageOutcome::Skipped(SkipReason::Transport(e.to_string())),
        }
    }
}
