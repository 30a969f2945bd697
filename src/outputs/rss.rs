//! RSS 2.0 podcast feed rendering.
//!
//! The document declares the iTunes namespace and carries fixed channel
//! metadata followed by one `<item>` per video:
//!
//! ```text
//! <rss version="2.0" xmlns:itunes="...">
//!   <channel>
//!     <title/> <link/> <language/> <itunes:author/> <description/>
//!     <itunes:image/> <itunes:category/> <itunes:explicit/>
//!     <item>
//!       <title/> <description/> <pubDate/> <enclosure/> <guid/> <itunes:image/>
//!     </item>
//!   </channel>
//! </rss>
//! ```

use crate::models::VideoRecord;
use crate::utils::escape_xml;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::{DateTime, Utc};
use quick_xml::Writer;
use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use std::io::Cursor;
use thiserror::Error;
use tracing::{info, instrument};

const ITUNES_NAMESPACE: &str = "http://www.itunes.com/dtds/podcast-1.0.dtd";

/// HTTP-date flavour of RFC 2822, always in GMT.
const PUB_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Failure while serializing the feed document.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to write XML event: {0}")]
    Write(#[from] std::io::Error),

    #[error("generated feed is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Channel-level metadata rendered at the top of the feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelInfo {
    pub title: String,
    pub link: String,
    pub language: String,
    pub author: String,
    pub description: String,
    /// Artwork for the channel, repeated on every item.
    pub image_url: String,
    pub category: String,
    pub explicit: bool,
}

impl ChannelInfo {
    /// Metadata for the Linear FM podcast.
    pub fn linear_fm() -> Self {
        Self {
            title: "Linear FM Podcast".to_string(),
            link: "https://linear.app/fm".to_string(),
            language: "en-us".to_string(),
            author: "Linear App".to_string(),
            description: "Audio versions of Linear FM videos".to_string(),
            image_url: "https://linear.app/favicon.ico".to_string(),
            category: "Technology".to_string(),
            explicit: false,
        }
    }
}

type FeedWriter = Writer<Cursor<Vec<u8>>>;

/// Render the complete feed document.
///
/// Records with empty titles or descriptions render as empty elements, and an
/// empty slice yields a valid feed with no items. Descriptions are written as
/// CDATA; any `]]>` they contain is split across two sections by
/// [`BytesCData::escaped`].
///
/// # Errors
///
/// Only fails if the in-memory writer reports an I/O error or produces
/// invalid UTF-8, neither of which happens for `String` input in practice.
#[instrument(level = "info", skip_all, fields(items = videos.len()))]
pub fn render_feed(channel: &ChannelInfo, videos: &[VideoRecord]) -> Result<String, RenderError> {
    let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let mut rss = BytesStart::new("rss");
    rss.push_attribute(("version", "2.0"));
    rss.push_attribute(("xmlns:itunes", ITUNES_NAMESPACE));
    writer.write_event(Event::Start(rss))?;
    writer.write_event(Event::Start(BytesStart::new("channel")))?;

    write_text_element(&mut writer, "title", &channel.title)?;
    write_text_element(&mut writer, "link", &channel.link)?;
    write_text_element(&mut writer, "language", &channel.language)?;
    write_text_element(&mut writer, "itunes:author", &channel.author)?;
    write_text_element(&mut writer, "description", &channel.description)?;
    write_image(&mut writer, &channel.image_url)?;

    let mut category = BytesStart::new("itunes:category");
    category.push_attribute(("text", channel.category.as_str()));
    writer.write_event(Event::Empty(category))?;

    let explicit = if channel.explicit { "true" } else { "false" };
    write_text_element(&mut writer, "itunes:explicit", explicit)?;

    for video in videos {
        write_item(&mut writer, channel, video)?;
    }

    writer.write_event(Event::End(BytesEnd::new("channel")))?;
    writer.write_event(Event::End(BytesEnd::new("rss")))?;

    let xml = String::from_utf8(writer.into_inner().into_inner())?;
    info!(bytes = xml.len(), "Rendered podcast feed");
    Ok(xml)
}

/// Deterministic item identifier: standard base64 of the raw media URL.
pub fn guid_for(video_url: &str) -> String {
    STANDARD.encode(video_url.as_bytes())
}

/// Format a publication date the way feed readers expect it.
pub fn format_pub_date(date: &DateTime<Utc>) -> String {
    date.format(PUB_DATE_FORMAT).to_string()
}

fn write_item(
    writer: &mut FeedWriter,
    channel: &ChannelInfo,
    video: &VideoRecord,
) -> Result<(), RenderError> {
    writer.write_event(Event::Start(BytesStart::new("item")))?;

    write_text_element(writer, "title", &video.title)?;

    writer.write_event(Event::Start(BytesStart::new("description")))?;
    for section in BytesCData::escaped(&video.description) {
        writer.write_event(Event::CData(section))?;
    }
    writer.write_event(Event::End(BytesEnd::new("description")))?;

    write_text_element(writer, "pubDate", &format_pub_date(&video.pub_date))?;

    let mut enclosure = BytesStart::new("enclosure");
    enclosure.push_attribute(("url", video.video_url.as_str()));
    enclosure.push_attribute(("length", "0"));
    enclosure.push_attribute(("type", "video/mp4"));
    writer.write_event(Event::Empty(enclosure))?;

    write_text_element(writer, "guid", &guid_for(&video.video_url))?;
    write_image(writer, &channel.image_url)?;

    writer.write_event(Event::End(BytesEnd::new("item")))?;
    Ok(())
}

/// `<name>text</name>`, with the text escaped. An empty text event is still
/// written so empty values render as `<name></name>`.
fn write_text_element(writer: &mut FeedWriter, name: &str, text: &str) -> Result<(), RenderError> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    writer.write_event(Event::Text(BytesText::from_escaped(escape_xml(text))))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

fn write_image(writer: &mut FeedWriter, href: &str) -> Result<(), RenderError> {
    let mut image = BytesStart::new("itunes:image");
    image.push_attribute(("href", href));
    writer.write_event(Event::Empty(image))?;
    Ok(())
}
