//! In-page ratings overlay.
//!
//! Augments a music-streaming web page with community ratings scraped from
//! albumoftheyear.org: a two-stage search-then-album scrape, track-name
//! normalization to bridge the two naming vocabularies, and an idempotent
//! widget layer that survives the host app rebuilding its virtual DOM and
//! navigating client-side without a page reload.
//!
//! The host page's DOM and its navigation events are reached through the
//! traits in [`page`] and [`watch`]; a browser bridge implements them
//! against the real page, while [`page::fake::FakePage`] implements them in
//! memory for the test suite.

pub mod aoty;
pub mod config;
pub mod error;
pub mod normalize;
pub mod orchestrate;
pub mod page;
pub mod render;
pub mod wait;
pub mod watch;

// Re-export commonly used types for convenience
pub use aoty::{AotyClient, PageSource, RatingsFetcher, RatingsMap, ScrapeOutcome};
pub use config::OverlayConfig;
pub use error::{FetchFailure, WaitError};
pub use orchestrate::Overlay;
pub use page::{HostPage, Widget, WidgetState};
