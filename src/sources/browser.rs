//! Headless-browser acquisition of the listing page.
//!
//! Drives Chrome through a running WebDriver service (chromedriver listens on
//! `http://localhost:9515` by default), lets the page render, and returns the
//! resulting DOM. The session is closed on every path, including navigation
//! failures and timeouts.
//!
//! Only available with the `browser` cargo feature; without it the source
//! reports [`AcquisitionError::BrowserUnavailable`].

use super::{AcquisitionError, DocumentSource};
use std::time::Duration;
use url::Url;

/// Default WebDriver endpoint.
pub const DEFAULT_WEBDRIVER_URL: &str = "http://localhost:9515";

/// Loads pages in a headless browser session.
#[derive(Debug, Clone)]
pub struct BrowserSource {
    webdriver_url: String,
    timeout: Duration,
}

impl BrowserSource {
    pub fn new(webdriver_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            webdriver_url: webdriver_url.into(),
            timeout,
        }
    }
}

#[cfg(feature = "browser")]
mod driver {
    use super::*;
    use fantoccini::{Client, ClientBuilder};
    use serde_json::json;
    use tracing::{debug, info, instrument, warn};

    impl BrowserSource {
        fn timeout_error(&self, url: &Url) -> AcquisitionError {
            AcquisitionError::Timeout {
                url: url.to_string(),
                secs: self.timeout.as_secs(),
            }
        }
    }

    impl DocumentSource for BrowserSource {
        fn name(&self) -> &'static str {
            "browser"
        }

        #[instrument(level = "debug", skip_all, fields(%url, webdriver = %self.webdriver_url))]
        async fn fetch_html(&self, url: &Url) -> Result<String, AcquisitionError> {
            let client = tokio::time::timeout(self.timeout, connect(&self.webdriver_url))
                .await
                .map_err(|_| self.timeout_error(url))??;
            info!("Browser session started");

            let result = tokio::time::timeout(self.timeout, render(&client, url))
                .await
                .unwrap_or_else(|_| Err(self.timeout_error(url)));

            if let Err(e) = client.close().await {
                warn!(error = %e, "Failed to close browser session");
            } else {
                debug!("Browser session closed");
            }
            result
        }
    }

    async fn connect(webdriver_url: &str) -> Result<Client, AcquisitionError> {
        let mut caps = serde_json::Map::new();
        caps.insert(
            "goog:chromeOptions".to_string(),
            json!({ "args": ["--headless", "--disable-gpu", "--no-sandbox"] }),
        );

        let client = ClientBuilder::native()
            .capabilities(caps)
            .connect(webdriver_url)
            .await?;
        Ok(client)
    }

    async fn render(client: &Client, url: &Url) -> Result<String, AcquisitionError> {
        client.goto(url.as_str()).await?;
        let html = client.source().await?;
        debug!(bytes = html.len(), "Captured rendered DOM");
        Ok(html)
    }
}

#[cfg(not(feature = "browser"))]
impl DocumentSource for BrowserSource {
    fn name(&self) -> &'static str {
        "browser"
    }

    async fn fetch_html(&self, _url: &Url) -> Result<String, AcquisitionError> {
        tracing::error!(
            webdriver = %self.webdriver_url,
            timeout_secs = self.timeout.as_secs(),
            "Rebuild with `--features browser` to use the browser strategy"
        );
        Err(AcquisitionError::BrowserUnavailable)
    }
}
