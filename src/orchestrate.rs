//! Pipeline sequencing and per-navigation lifecycle.
//!
//! One [`Overlay`] drives the whole flow for the lifetime of the page:
//! wait for the identifying elements, show placeholders, scrape, render,
//! observe. Client-side navigation tears the current state down and runs
//! the flow again for the new album.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::aoty::{PageSource, RatingsFetcher, RatingsMap, ScrapeOutcome};
use crate::config::OverlayConfig;
use crate::page::{is_album_view, HostPage};
use crate::render::Renderer;
use crate::wait::wait_for;
use crate::watch::{PageEvents, WatchSession};

/// Owns the overlay's only mutable lifecycle state: the last processed URL
/// and the single live watch session.
///
/// All state lives in explicit fields on this struct; there are no
/// module-level globals. The stop-before-start ordering on the watch
/// session is enforced here and nowhere else.
pub struct Overlay<S> {
    page: Arc<dyn HostPage>,
    events: Arc<dyn PageEvents>,
    fetcher: RatingsFetcher<S>,
    config: OverlayConfig,
    last_processed_url: Option<String>,
    session: Option<WatchSession>,
}

impl<S: PageSource> Overlay<S> {
    pub fn new(
        page: Arc<dyn HostPage>,
        events: Arc<dyn PageEvents>,
        source: S,
        config: OverlayConfig,
    ) -> Self {
        let fetcher = RatingsFetcher::new(source, config.base_url.clone());
        Self {
            page,
            events,
            fetcher,
            config,
            last_processed_url: None,
            session: None,
        }
    }

    /// Run the full pipeline for the current album view.
    ///
    /// Waits for the artist and album elements (a timeout aborts without
    /// touching the page), shows placeholders, scrapes ratings, renders the
    /// outcome, and starts a fresh watch session. A scrape failure renders
    /// the unavailable state; placeholders are never left behind. A result
    /// arriving after the user navigated away is discarded.
    pub async fn run_pipeline(&mut self) {
        let started_at = self.page.location();

        let Some(artist) = self.wait_for_element("artist name element", |page| {
            page.artist_name()
        })
        .await
        else {
            return;
        };
        let Some(album) = self.wait_for_element("album name element", |page| {
            page.album_name()
        })
        .await
        else {
            return;
        };

        info!("Resolving ratings for '{}' - '{}'", artist, album);

        {
            let renderer = Renderer::new(self.page.as_ref());
            renderer.show_track_placeholders();
            renderer.show_album_placeholder();
        }

        let outcome = self.fetcher.fetch(&artist, &album).await;

        // The user may have navigated while the scrape was in flight; a
        // result for a view that is no longer current must not touch the
        // page.
        if self.page.location() != started_at {
            debug!("Discarding scrape result for stale view {}", started_at);
            return;
        }

        let (ratings, album_rating) = match outcome {
            Ok(ScrapeOutcome {
                ratings,
                album_rating,
            }) => (Some(ratings), album_rating),
            Err(failure) => {
                warn!(
                    "Ratings scrape failed at stage '{}': {}",
                    failure.stage(),
                    failure
                );
                (None, None)
            }
        };

        {
            let renderer = Renderer::new(self.page.as_ref());
            renderer.render_tracks(ratings.as_ref());
            renderer.render_album(album_rating);
        }

        self.last_processed_url = Some(started_at);
        self.start_session(ratings);
    }

    /// React to navigation events until the host page goes away, running
    /// the pipeline once up front for the view that is already showing.
    ///
    /// Each event is debounced by the settle delay so the host app can
    /// finish its own re-render before the page is read; the rapid burst of
    /// history events a single transition fires collapses onto the same
    /// URL comparison.
    pub async fn run_event_loop(&mut self) {
        let mut navigations = self.events.subscribe_navigation();

        self.run_pipeline().await;

        while navigations.recv().await.is_some() {
            tokio::time::sleep(self.config.settle_delay()).await;
            // Collapse events that queued up during the settle delay.
            while navigations.try_recv().is_ok() {}
            self.handle_navigation().await;
        }
    }

    /// Compare the settled location against the last processed one and
    /// re-run the pipeline when a different album view is showing.
    async fn handle_navigation(&mut self) {
        let current = self.page.location();

        if self.last_processed_url.as_deref() == Some(current.as_str()) {
            debug!("Location unchanged after settle; ignoring");
            return;
        }
        if !is_album_view(&current) {
            debug!("Navigated off album views; leaving current state in place");
            return;
        }

        info!("Album view changed to {}; restarting pipeline", current);
        if let Some(previous) = self.session.take() {
            previous.stop();
        }
        self.run_pipeline().await;
    }

    /// Replace the live watch session. The previous session, if any, is
    /// always stopped first.
    fn start_session(&mut self, ratings: Option<RatingsMap>) {
        if let Some(previous) = self.session.take() {
            previous.stop();
        }
        self.session = Some(WatchSession::start(
            Arc::clone(&self.page),
            self.events.as_ref(),
            ratings,
        ));
    }

    /// Bounded wait for one identifying element; logs and yields `None` on
    /// timeout, which aborts the pipeline.
    async fn wait_for_element<T>(
        &self,
        what: &'static str,
        probe: impl Fn(&dyn HostPage) -> Option<T>,
    ) -> Option<T> {
        let page = self.page.as_ref();
        match wait_for(
            self.config.poll_interval(),
            self.config.wait_timeout(),
            what,
            || probe(page),
        )
        .await
        {
            Ok(value) => Some(value),
            Err(error) => {
                warn!("Aborting pipeline: {}", error);
                None
            }
        }
    }
}
