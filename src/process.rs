//! Turning raw entries into dated, ordered feed records.
//!
//! The source page carries no publication timestamps, so each record gets a
//! synthetic date: the first surviving entry is dated `now`, the next one day
//! earlier, and so on. The dates exist to give feed readers a stable
//! newest-first ordering that matches the page.

use crate::models::{RawVideo, VideoRecord};
use chrono::{DateTime, Duration, Utc};
use tracing::debug;

/// Filter, date and order the raw entries.
///
/// 1. Entries without a video URL are dropped.
/// 2. The entry at filtered position `i` is dated `now - i days`.
/// 3. Records are sorted newest first.
///
/// # Arguments
///
/// * `raw` - Entries in page order, as returned by the extractor
/// * `now` - Reference time, captured once by the caller so every record is
///   dated from the same point
///
/// # Returns
///
/// Records that have a video URL, newest first. Empty if no entry has one.
pub fn process_videos(raw: Vec<RawVideo>, now: DateTime<Utc>) -> Vec<VideoRecord> {
    let total = raw.len();

    let mut records: Vec<VideoRecord> = raw
        .into_iter()
        .filter(RawVideo::has_video)
        .enumerate()
        .map(|(index, video)| VideoRecord::from_raw(video, synthetic_pub_date(now, index)))
        .collect();

    records.sort_by(|a, b| b.pub_date.cmp(&a.pub_date));

    debug!(
        total,
        kept = records.len(),
        dropped = total - records.len(),
        "Processed videos"
    );
    records
}

/// Date for the record at `index`, counting back whole days from `now`.
///
/// # Arguments
///
/// * `now` - Date of the first record
/// * `index` - Position of the record among those that have a video
///
/// # Returns
///
/// `now` minus `index` days; `index = 0` returns `now` itself.
pub fn synthetic_pub_date(now: DateTime<Utc>, index: usize) -> DateTime<Utc> {
    now - Duration::days(index as i64)
}
