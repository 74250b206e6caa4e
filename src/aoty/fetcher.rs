//! Two-stage ratings scrape: search for the album, then parse its page.

use std::collections::HashMap;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::error::FetchFailure;
use crate::normalize::normalize;

use super::parser;

/// Normalized track title mapped to its user rating, for one album.
///
/// Built once per successful scrape and immutable afterwards. Absence of
/// the whole map (a failed or not-yet-run scrape) is distinct from an empty
/// map and is represented as `Option<RatingsMap>` by callers.
pub type RatingsMap = HashMap<String, u8>;

/// One fetched HTML page together with its HTTP status.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub status: u16,
    pub body: String,
}

/// Source of HTML pages.
///
/// Implemented by the reqwest-backed [`super::AotyClient`] and by in-memory
/// fakes in tests, keeping the two-stage algorithm testable without a
/// network.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetch one URL. `Err` means a transport-level failure; non-2xx
    /// statuses come back as `Ok` with the status set.
    async fn get_html(&self, url: &str) -> anyhow::Result<FetchedPage>;
}

#[async_trait]
impl<T: PageSource + ?Sized> PageSource for std::sync::Arc<T> {
    async fn get_html(&self, url: &str) -> anyhow::Result<FetchedPage> {
        (**self).get_html(url).await
    }
}

/// Everything one successful scrape produced.
///
/// The two fields have independent lifecycles: one fetch populates both,
/// but the album score may be absent while track ratings resolved.
#[derive(Debug, Clone, Default)]
pub struct ScrapeOutcome {
    pub ratings: RatingsMap,
    pub album_rating: Option<u8>,
}

/// Resolves an artist/album pair to track and album ratings.
pub struct RatingsFetcher<S> {
    source: S,
    base_url: String,
}

impl<S: PageSource> RatingsFetcher<S> {
    pub fn new(source: S, base_url: impl Into<String>) -> Self {
        Self {
            source,
            base_url: base_url.into(),
        }
    }

    /// Resolve ratings for one artist/album pair.
    ///
    /// Issues two sequential requests: the site search, then the first
    /// matching album page. A failure at either stage is returned as-is;
    /// the caller renders the unavailable state and does not retry. Rows
    /// with unparseable ratings are skipped silently and the album score is
    /// optional, so a successful outcome may carry fewer entries than the
    /// page has rows, down to an empty map when no rating parsed. Only a
    /// page with no track list at all fails.
    pub async fn fetch(&self, artist: &str, album: &str) -> Result<ScrapeOutcome, FetchFailure> {
        let query = urlencoding::encode(&format!("{} {}", artist, album)).into_owned();
        let search_url = format!("{}/search/?q={}", self.base_url, query);
        debug!("Searching ratings site: {}", search_url);

        let search_page = self
            .get_ok(&search_url)
            .await
            .map_err(|reason| FetchFailure::Search { reason })?;

        let album_path =
            parser::parse_search_page(&search_page.body).ok_or(FetchFailure::NoResults)?;
        let album_url = if album_path.starts_with("http") {
            album_path
        } else {
            format!("{}{}", self.base_url, album_path)
        };
        debug!("Fetching album page: {}", album_url);

        let album_page = self
            .get_ok(&album_url)
            .await
            .map_err(|reason| FetchFailure::AlbumFetch { reason })?;

        let parsed = parser::parse_album_page(&album_page.body);
        if parsed.row_count == 0 {
            return Err(FetchFailure::NoTracks);
        }

        let ratings: RatingsMap = parsed
            .track_ratings
            .into_iter()
            .map(|(title, rating)| (normalize(&title), rating))
            .collect();

        info!(
            "Scraped {} track ratings (album score: {:?})",
            ratings.len(),
            parsed.album_rating
        );

        Ok(ScrapeOutcome {
            ratings,
            album_rating: parsed.album_rating,
        })
    }

    /// GET a page, folding transport errors and non-2xx statuses into one
    /// reason string.
    async fn get_ok(&self, url: &str) -> Result<FetchedPage, String> {
        match self.source.get_html(url).await {
            Ok(page) if (200..300).contains(&page.status) => Ok(page),
            Ok(page) => Err(format!("status {}", page.status)),
            Err(e) => Err(e.to_string()),
        }
    }
}
