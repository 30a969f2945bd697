//! Data models for scraped videos and the records rendered into the feed.
//!
//! - [`RawVideo`]: one list entry exactly as found in the page
//! - [`VideoRecord`]: a complete entry with its synthetic publication date
//!
//! Both live only for the duration of a single feed generation; the server
//! keeps the rendered XML, never the records.

use chrono::{DateTime, Utc};

/// A video entry as scraped from the source page.
///
/// Any sub-element missing from the markup is represented by an empty
/// string, so extraction never fails on a partial entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawVideo {
    /// Text of the entry's heading.
    pub title: String,
    /// Text of the entry's descriptive paragraph.
    pub description: String,
    /// The `src` of the embedded video; empty when the entry has none.
    pub video_url: String,
}

impl RawVideo {
    /// Whether the entry carries a media URL and can become a feed item.
    pub fn has_video(&self) -> bool {
        !self.video_url.is_empty()
    }
}

/// A video ready to be rendered as an RSS `<item>`.
///
/// `video_url` is always non-empty; [`crate::process::process_videos`] is the
/// only constructor used by the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoRecord {
    pub title: String,
    pub description: String,
    pub video_url: String,
    /// Synthetic date derived from the entry's position on the page.
    pub pub_date: DateTime<Utc>,
}

impl VideoRecord {
    /// Attach a publication date to a raw entry.
    pub fn from_raw(raw: RawVideo, pub_date: DateTime<Utc>) -> Self {
        Self {
            title: raw.title,
            description: raw.description,
            video_url: raw.video_url,
            pub_date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_raw_video_default_is_empty() {
        let raw = RawVideo::default();
        assert_eq!(raw.title, "");
        assert_eq!(raw.description, "");
        assert!(!raw.has_video());
    }

    #[test]
    fn test_raw_video_has_video() {
        let raw = RawVideo {
            video_url: "https://cdn.example/1.mp4".to_string(),
            ..Default::default()
        };
        assert!(raw.has_video());
    }

    #[test]
    fn test_video_record_from_raw() {
        let date = Utc.with_ymd_and_hms(2025, 5, 6, 12, 0, 0).unwrap();
        let record = VideoRecord::from_raw(
            RawVideo {
                title: "Intro".to_string(),
                description: "Episode one.".to_string(),
                video_url: "https://cdn.example/1.mp4".to_string(),
            },
            date,
        );

        assert_eq!(record.title, "Intro");
        assert_eq!(record.description, "Episode one.");
        assert_eq!(record.video_url, "https://cdn.example/1.mp4");
        assert_eq!(record.pub_date, date);
    }
}
