//! Page acquisition and the scrape pipeline built on top of it.
//!
//! A [`DocumentSource`] knows how to obtain the HTML of the listing page.
//! Two interchangeable variants exist:
//!
//! | Source | Module | Method | Notes |
//! |--------|--------|--------|-------|
//! | [`HttpSource`] | [`http`] | Direct GET | Default; server-rendered markup only |
//! | [`BrowserSource`] | [`browser`] | WebDriver | Needs the `browser` feature and a running driver |
//!
//! Everything downstream of the HTML is shared:
//!
//! 1. **Load**: fetch the page and parse it with `scraper`
//! 2. **Extract**: pull raw entries out of the document ([`crate::extract`])
//! 3. **Process**: filter, date and order them ([`crate::process`])
//! 4. **Render**: produce the RSS document ([`crate::outputs::rss`])
//!
//! Any acquisition failure surfaces as an [`AcquisitionError`], wrapped in a
//! [`FeedError`] by [`generate_podcast_feed`]; the caller is expected to abort
//! startup rather than serve a partial feed.

pub mod browser;
pub mod http;

pub use browser::BrowserSource;
pub use http::HttpSource;

use crate::extract::extract_videos;
use crate::models::VideoRecord;
use crate::outputs::rss::{ChannelInfo, RenderError, render_feed};
use crate::process::process_videos;
use chrono::{DateTime, Utc};
use scraper::Html;
use thiserror::Error;
use tracing::{info, instrument};
use url::Url;

/// Page scraped when no `--url` is given.
pub const DEFAULT_SOURCE_URL: &str = "https://linear.app/fm";

/// Failure to obtain a usable document for the listing page.
#[derive(Debug, Error)]
pub enum AcquisitionError {
    /// Network-level error (DNS, connection, TLS, body decoding)
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("empty document returned by {url}")]
    EmptyBody { url: String },

    #[error("timed out after {secs}s loading {url}")]
    Timeout { url: String, secs: u64 },

    #[cfg(not(feature = "browser"))]
    #[error("browser strategy requested but the `browser` feature is not compiled in")]
    BrowserUnavailable,

    #[cfg(feature = "browser")]
    #[error("WebDriver session could not be started: {0}")]
    Session(#[from] fantoccini::error::NewSessionError),

    #[cfg(feature = "browser")]
    #[error("browser command failed: {0}")]
    Browser(#[from] fantoccini::error::CmdError),
}

/// Failure anywhere in the pipeline, from fetching the page to rendering.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error(transparent)]
    Acquisition(#[from] AcquisitionError),

    #[error("failed to render feed: {0}")]
    Render(#[from] RenderError),
}

/// Something that can fetch the raw HTML of a page.
pub trait DocumentSource {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Fetch the page at `url` and return its markup.
    async fn fetch_html(&self, url: &Url) -> Result<String, AcquisitionError>;
}

/// Fetch `url` through `source` and parse it into a document.
///
/// # Errors
///
/// Propagates the source's error, and returns
/// [`AcquisitionError::EmptyBody`] when the page has no content at all.
#[instrument(level = "info", skip_all, fields(source = source.name(), %url))]
pub async fn load_document<S: DocumentSource>(
    source: &S,
    url: &Url,
) -> Result<Html, AcquisitionError> {
    let html = source.fetch_html(url).await?;
    if html.trim().is_empty() {
        return Err(AcquisitionError::EmptyBody {
            url: url.to_string(),
        });
    }

    info!(bytes = html.len(), "Fetched page");
    Ok(Html::parse_document(&html))
}

/// Scrape the listing page into ordered, dated records.
pub async fn scrape_videos<S: DocumentSource>(
    source: &S,
    url: &Url,
    now: DateTime<Utc>,
) -> Result<Vec<VideoRecord>, AcquisitionError> {
    info!(%url, source = source.name(), "Scraping videos");

    let document = load_document(source, url).await?;
    let raw = extract_videos(&document);
    info!(count = raw.len(), "Found videos");

    Ok(process_videos(raw, now))
}

/// Run the whole pipeline and return the rendered feed.
pub async fn generate_podcast_feed<S: DocumentSource>(
    source: &S,
    url: &Url,
    channel: &ChannelInfo,
    now: DateTime<Utc>,
) -> Result<String, FeedError> {
    let videos = scrape_videos(source, url, now).await?;

    info!(items = videos.len(), "Generating podcast RSS feed");
    Ok(render_feed(channel, &videos)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    /// Serves a fixed string, or fails with a fixed status.
    struct StaticSource(Result<&'static str, u16>);

    impl DocumentSource for StaticSource {
        fn name(&self) -> &'static str {
            "static"
        }

        async fn fetch_html(&self, url: &Url) -> Result<String, AcquisitionError> {
            match self.0 {
                Ok(html) => Ok(html.to_string()),
                Err(status) => Err(AcquisitionError::UnexpectedStatus {
                    status,
                    url: url.to_string(),
                }),
            }
        }
    }

    const TWO_ENTRIES: &str = r#"<html><body><ol>
        <li>
            <h2>Intro &amp; Welcome</h2>
            <p>Episode 1</p>
            <p>Episode one.</p>
            <video src="https://cdn.example/1.mp4"></video>
        </li>
        <li>
            <h2>Teaser</h2>
            <p>Episode 2</p>
            <p>No video yet.</p>
        </li>
    </ol></body></html>"#;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 5, 6, 20, 30, 0).unwrap()
    }

    fn page_url() -> Url {
        Url::parse(DEFAULT_SOURCE_URL).unwrap()
    }

    #[tokio::test]
    async fn test_scrape_videos_drops_entries_without_video() {
        let videos = scrape_videos(&StaticSource(Ok(TWO_ENTRIES)), &page_url(), now())
            .await
            .unwrap();

        assert_eq!(videos.len(), 1);
        assert_eq!(videos[0].title, "Intro & Welcome");
        assert_eq!(videos[0].description, "Episode one.");
        assert_eq!(videos[0].pub_date, now());
    }

    #[tokio::test]
    async fn test_generate_feed_for_page_without_entries() {
        let xml = generate_podcast_feed(
            &StaticSource(Ok("<html><body><main>Coming soon</main></body></html>")),
            &page_url(),
            &ChannelInfo::linear_fm(),
            now(),
        )
        .await
        .unwrap();

        assert!(xml.contains("<title>Linear FM Podcast</title>"));
        assert!(!xml.contains("<item>"));
    }

    #[tokio::test]
    async fn test_load_document_rejects_blank_page() {
        let err = load_document(&StaticSource(Ok("  \n ")), &page_url())
            .await
            .unwrap_err();
        assert!(
            matches!(err, AcquisitionError::EmptyBody { .. }),
            "expected EmptyBody, got: {err:?}"
        );
    }

    #[tokio::test]
    async fn test_scrape_videos_propagates_source_error() {
        let err = scrape_videos(&StaticSource(Err(503)), &page_url(), now())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AcquisitionError::UnexpectedStatus { status: 503, .. }
        ));
    }

    #[tokio::test]
    async fn test_generate_feed_over_http() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/fm"))
            .respond_with(ResponseTemplate::new(200).set_body_string(TWO_ENTRIES))
            .expect(1)
            .mount(&server)
            .await;

        let url = Url::parse(&format!("{}/fm", server.uri())).unwrap();
        let source = HttpSource::new(Duration::from_secs(5)).unwrap();
        let xml = generate_podcast_feed(&source, &url, &ChannelInfo::linear_fm(), now())
            .await
            .unwrap();

        assert_eq!(xml.matches("<item>").count(), 1);
        assert!(xml.contains("<title>Intro &amp; Welcome</title>"));
        assert!(xml.contains(
            r#"<enclosure url="https://cdn.example/1.mp4" length="0" type="video/mp4"/>"#
        ));
        assert!(!xml.contains("Teaser"));
    }

    #[tokio::test]
    async fn test_generate_feed_is_deterministic_for_same_page() {
        let source = StaticSource(Ok(TWO_ENTRIES));
        let first = generate_podcast_feed(&source, &page_url(), &ChannelInfo::linear_fm(), now())
            .await
            .unwrap();
        let second = generate_podcast_feed(&source, &page_url(), &ChannelInfo::linear_fm(), now())
            .await
            .unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_generate_feed_keeps_description_line_breaks() {
        let page = r#"<ol><li>
            <h2>Changelog</h2>
            <p>Episode 3</p>
            <p>line one

line two</p>
            <video src="https://cdn.example/3.mp4"></video>
        </li></ol>"#;
        let xml = generate_podcast_feed(
            &StaticSource(Ok(page)),
            &page_url(),
            &ChannelInfo::linear_fm(),
            now(),
        )
        .await
        .unwrap();

        assert!(xml.contains("<description><![CDATA[line one\n\nline two]]></description>"));
    }

    #[tokio::test]
    async fn test_generate_feed_wraps_acquisition_error() {
        let err = generate_podcast_feed(
            &StaticSource(Err(404)),
            &page_url(),
            &ChannelInfo::linear_fm(),
            now(),
        )
        .await
        .unwrap_err();

        assert!(matches!(
            err,
            FeedError::Acquisition(AcquisitionError::UnexpectedStatus { status: 404, .. })
        ));
        assert_eq!(err.to_string(), "unexpected HTTP status 404 from https://linear.app/fm");
    }
}
