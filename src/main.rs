//! # Linear FM Feed
//!
//! Scrapes the Linear FM video page and republishes it as a podcast RSS feed,
//! so the episodes can be followed from any podcast player.
//!
//! ## Usage
//!
//! ```sh
//! linear_fm_feed --bind 0.0.0.0:8000
//! ```
//!
//! ## Architecture
//!
//! The feed is built once, at startup:
//! 1. **Acquisition**: Fetch the listing page (plain HTTP or headless browser)
//! 2. **Extraction**: Pull title, description and video URL out of each list entry
//! 3. **Processing**: Drop entries without video, assign synthetic dates, order newest first
//! 4. **Rendering**: Produce the RSS 2.0 + iTunes document
//!
//! The rendered document is then served unchanged for every request. If the
//! page cannot be acquired the process exits with status 1 before binding.

use chrono::Utc;
use clap::Parser;
use std::error::Error;
use tracing::{debug, error, info};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;
mod extract;
mod models;
mod outputs;
mod process;
mod server;
mod sources;
mod utils;

use cli::{Cli, Strategy};
use outputs::rss::ChannelInfo;
use sources::{BrowserSource, DocumentSource, FeedError, HttpSource, generate_podcast_feed};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("linear_fm_feed starting up");

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    let feed = match build_feed(&args).await {
        Ok(feed) => feed,
        Err(e) => {
            error!(url = %args.url, strategy = ?args.strategy, error = %e, "Scraping videos failed");
            return Err(e.into());
        }
    };

    let elapsed = start_time.elapsed();
    info!(bytes = feed.len(), ?elapsed, "Podcast feed ready");

    if let Some(path) = &args.output {
        return outputs::write_feed(path, &feed).await;
    }

    server::serve(args.bind, feed.into()).await?;
    Ok(())
}

/// Acquire the page with the configured strategy and render the feed.
async fn build_feed(args: &Cli) -> Result<String, FeedError> {
    match args.strategy {
        Strategy::Http => render_with(&HttpSource::new(args.timeout())?, args).await,
        Strategy::Browser => {
            render_with(&BrowserSource::new(args.webdriver_url.clone(), args.timeout()), args).await
        }
    }
}

async fn render_with<S: DocumentSource>(source: &S, args: &Cli) -> Result<String, FeedError> {
    generate_podcast_feed(source, &args.url, &ChannelInfo::linear_fm(), Utc::now()).await
}
