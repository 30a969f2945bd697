//! Feed output: rendering and one-shot file output.
//!
//! # Submodules
//!
//! - [`rss`]: Renders processed videos as an RSS 2.0 podcast document
//!
//! The rendered document is normally served over HTTP (see `crate::server`);
//! [`write_feed`] covers the `--output` mode, where the feed is written once
//! and the process exits.

pub mod rss;

use std::error::Error;
use std::path::Path;
use tokio::fs;
use tracing::{error, info, instrument};

/// Write the rendered feed to `path`, creating parent directories as needed.
///
/// # Errors
///
/// Returns an error if the parent directory cannot be created or the file
/// cannot be written.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn write_feed(path: &Path, xml: &str) -> Result<(), Box<dyn Error>> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if let Err(e) = fs::create_dir_all(parent).await {
            error!(dir = %parent.display(), error = %e, "Failed to create output dir");
            return Err(e.into());
        }
    }

    fs::write(path, xml).await?;
    info!(bytes = xml.len(), "Wrote podcast feed");
    Ok(())
}
