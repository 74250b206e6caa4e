//! Overlay configuration and the fixed external markup contracts.
//!
//! The selector strings are versioned external schemas: they change when
//! the ratings site ships new markup, not with this crate's logic. Timing
//! tunables can be overridden from a TOML file.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Base URL of the ratings site.
pub const AOTY_BASE_URL: &str = "https://www.albumoftheyear.org";

/// Selector for the first album link on a search results page.
pub const SEARCH_RESULT_SELECTOR: &str = r#"div.image a[href^="/album/"]"#;
/// Selector for track rows on an album page.
pub const TRACK_ROW_SELECTOR: &str = "table.trackListTable tbody tr";
/// Selector for the title cell within a track row.
pub const TRACK_TITLE_SELECTOR: &str = "td.trackTitle a";
/// Selector for the rating cell within a track row.
pub const TRACK_RATING_SELECTOR: &str = "td.trackRating span";
/// Selector for the optional album-level user score.
pub const ALBUM_SCORE_SELECTOR: &str = "div.albumUserScore a";

/// Accept header sent with ratings-site requests.
pub(crate) const ACCEPT_HTML: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8";

const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/115.0.0.0 Safari/537.36";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    /// Base URL of the ratings site.
    pub base_url: String,
    /// Poll interval for element waits, in milliseconds.
    pub poll_interval_ms: u64,
    /// Bound on element waits, in milliseconds.
    pub wait_timeout_ms: u64,
    /// Debounce applied after a navigation event before the page is
    /// re-read. The host app fires several rapid history events per
    /// transition; reading the page before markup settles would attach
    /// widgets to elements about to be discarded.
    pub settle_delay_ms: u64,
    /// Timeout for each outbound HTTP request, in seconds.
    pub http_timeout_sec: u64,
    /// User-Agent header sent with ratings-site requests.
    pub user_agent: String,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            base_url: AOTY_BASE_URL.to_string(),
            poll_interval_ms: 100,
            wait_timeout_ms: 10_000,
            settle_delay_ms: 800,
            http_timeout_sec: 30,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl OverlayConfig {
    /// Load configuration from a TOML file. Missing keys fall back to the
    /// defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn wait_timeout(&self) -> Duration {
        Duration::from_millis(self.wait_timeout_ms)
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_sec)
    }
}
