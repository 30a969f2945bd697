//! Command-line interface definitions for the Linear FM feed server.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! Most arguments can be provided via command-line flags or environment variables.

use crate::sources::DEFAULT_SOURCE_URL;
use crate::sources::browser::DEFAULT_WEBDRIVER_URL;
use clap::{Parser, ValueEnum};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// How the listing page is acquired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Strategy {
    /// Plain HTTP GET, parsed server-side
    Http,
    /// Headless Chrome through WebDriver (requires the `browser` feature)
    Browser,
}

/// Command-line arguments for the feed server.
///
/// # Examples
///
/// ```sh
/// # Scrape https://linear.app/fm and serve the feed on port 8000
/// linear_fm_feed
///
/// # Render through a local chromedriver instead of a plain GET
/// linear_fm_feed --strategy browser --webdriver-url http://localhost:9515
///
/// # Write the feed to a file and exit
/// linear_fm_feed -o ./public/feed.xml
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Page listing the videos
    #[arg(short, long, env = "FEED_SOURCE_URL", default_value = DEFAULT_SOURCE_URL)]
    pub url: Url,

    /// Acquisition strategy
    #[arg(short, long, env = "FEED_STRATEGY", value_enum, default_value_t = Strategy::Http)]
    pub strategy: Strategy,

    /// Address the HTTP server listens on
    #[arg(short, long, env = "FEED_BIND_ADDR", default_value = "0.0.0.0:8000")]
    pub bind: SocketAddr,

    /// WebDriver endpoint used by the browser strategy
    #[arg(long, env = "WEBDRIVER_URL", default_value = DEFAULT_WEBDRIVER_URL)]
    pub webdriver_url: String,

    /// Seconds to wait for the page before giving up
    #[arg(long, env = "FEED_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,

    /// Write the feed to this file and exit instead of serving it
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl Cli {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
