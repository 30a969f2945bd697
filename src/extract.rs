//! Video entry extraction from the parsed source page.
//!
//! The page lists episodes as items of an ordered list. Each item carries a
//! heading, a metadata paragraph followed by the descriptive paragraph, and an
//! embedded `<video>`:
//!
//! ```html
//! <ol>
//!   <li>
//!     <h2>Episode title</h2>
//!     <p>Metadata</p>
//!     <p>Description</p>
//!     <video src="https://cdn.example/episode.mp4"></video>
//!   </li>
//! </ol>
//! ```

use crate::models::RawVideo;
use crate::utils::{normalize_whitespace, truncate_for_log};
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, instrument};

static ENTRY_SELECTOR: Lazy<Selector> = Lazy::new(|| parse_selector("ol > li"));
static TITLE_SELECTOR: Lazy<Selector> = Lazy::new(|| parse_selector("h2"));
static DESCRIPTION_SELECTOR: Lazy<Selector> = Lazy::new(|| parse_selector("p:nth-of-type(2)"));
static VIDEO_SELECTOR: Lazy<Selector> = Lazy::new(|| parse_selector("video"));

fn parse_selector(css: &str) -> Selector {
    Selector::parse(css).unwrap_or_else(|e| panic!("invalid built-in selector {css:?}: {e}"))
}

/// Extract every list entry of the page, in document order.
///
/// Entries without a video are still returned (with an empty `video_url`);
/// filtering is the processor's job. Titles have their whitespace collapsed;
/// descriptions keep their text as written, minus leading and trailing
/// whitespace.
#[instrument(level = "debug", skip_all)]
pub fn extract_videos(document: &Html) -> Vec<RawVideo> {
    let videos: Vec<RawVideo> = document.select(&ENTRY_SELECTOR).map(extract_entry).collect();
    debug!(count = videos.len(), "Extracted list entries");
    videos
}

fn extract_entry(entry: ElementRef<'_>) -> RawVideo {
    let title = normalize_whitespace(&first_text(entry, &TITLE_SELECTOR));
    let description = first_text(entry, &DESCRIPTION_SELECTOR).trim().to_string();
    let video_url = entry
        .select(&VIDEO_SELECTOR)
        .next()
        .and_then(|video| video.value().attr("src"))
        .map(str::trim)
        .unwrap_or_default()
        .to_string();

    debug!(
        title = %truncate_for_log(&title, 80),
        video_url = %video_url,
        "Parsed entry"
    );

    RawVideo {
        title,
        description,
        video_url,
    }
}

/// Raw text content of the first match, or `""` when nothing matches.
fn first_text(entry: ElementRef<'_>, selector: &Selector) -> String {
    entry
        .select(selector)
        .next()
        .map(|element| element.text().collect())
        .unwrap_or_default()
}
