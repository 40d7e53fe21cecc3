use std::sync::Arc;

use actix_web::{App, HttpServer};
use anyhow::Context;
use clap::Parser;
use showtimes_api::api::{self, AppState};
use showtimes_api::config::Args;
use showtimes_api::{CacheStore, Collector, HttpFetcher, scheduler};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let theaters = args.theater_list()?;
    let fetcher = HttpFetcher::new().context("failed to build http client")?;
    let collector = Arc::new(
        Collector::new(theaters, Arc::new(fetcher), CacheStore::new(&args.cache_file))
            .with_days(args.days),
    );

    let _scheduler = scheduler::spawn(collector.clone(), args.schedule());

    if !args.skip_initial_scrape {
        if let Err(e) = collector.collect_all().await {
            error!(error = %e, "Initial scrape failed");
        }
    }

    let state = AppState::new(collector);
    info!(bind = %args.bind, port = args.port, "Starting HTTP API");
    HttpServer::new(move || App::new().app_data(state.clone()).configure(api::configure))
        .bind((args.bind.as_str(), args.port))
        .with_context(|| format!("cannot bind {}:{}", args.bind, args.port))?
        .run()
        .await?;

    Ok(())
}
