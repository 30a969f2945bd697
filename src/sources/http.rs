//! Direct HTTP acquisition of the listing page.
//!
//! The page is fetched with a plain GET and parsed server-side. This works as
//! long as the episode list is present in the initial markup; use
//! [`super::BrowserSource`] when it is rendered client-side.

use super::{AcquisitionError, DocumentSource};
use std::time::Duration;
use tracing::{debug, instrument, warn};
use url::Url;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Fetches pages with a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpSource {
    /// Build a source whose requests give up after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns [`AcquisitionError::Http`] if the TLS backend cannot be
    /// initialized.
    pub fn new(timeout: Duration) -> Result<Self, AcquisitionError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { client, timeout })
    }

    fn classify(&self, err: reqwest::Error, url: &Url) -> AcquisitionError {
        if err.is_timeout() {
            AcquisitionError::Timeout {
                url: url.to_string(),
                secs: self.timeout.as_secs(),
            }
        } else {
            AcquisitionError::Http(err)
        }
    }
}

impl DocumentSource for HttpSource {
    fn name(&self) -> &'static str {
        "http"
    }

    #[instrument(level = "debug", skip_all, fields(%url))]
    async fn fetch_html(&self, url: &Url) -> Result<String, AcquisitionError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| self.classify(e, url))?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "Source page returned an error status");
            return Err(AcquisitionError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await.map_err(|e| self.classify(e, url))?;
        debug!(bytes = body.len(), "Received page body");
        Ok(body)
    }
}
