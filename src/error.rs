//! Failure taxonomy for the overlay pipeline.
//!
//! Every failure here is recovered locally: a failed scrape renders the
//! unavailable state, a timed-out element wait aborts the pipeline with a
//! log line. Nothing propagates to the host page and nothing is retried.

use std::time::Duration;

use thiserror::Error;

/// Failure of one ratings scrape, tagged with the stage that failed.
#[derive(Debug, Error)]
pub enum FetchFailure {
    /// The search request returned a non-2xx status or a transport error.
    #[error("search request failed: {reason}")]
    Search { reason: String },

    /// The search page contained no album result link.
    #[error("no album found in search results")]
    NoResults,

    /// The album page request returned a non-2xx status or a transport error.
    #[error("album page request failed: {reason}")]
    AlbumFetch { reason: String },

    /// The album page rendered no track list at all.
    #[error("album page has no track list")]
    NoTracks,
}

impl FetchFailure {
    /// Short stage tag for diagnostics.
    pub fn stage(&self) -> &'static str {
        match self {
            FetchFailure::Search { .. } => "search",
            FetchFailure::NoResults => "no-results",
            FetchFailure::AlbumFetch { .. } => "album-fetch",
            FetchFailure::NoTracks => "no-tracks",
        }
    }
}

/// Failure of a bounded element wait.
#[derive(Debug, Error)]
pub enum WaitError {
    /// The probed element never appeared within the bound.
    #[error("timed out after {bound:?} waiting for {what}")]
    Timeout {
        bound: Duration,
        what: &'static str,
    },
}
