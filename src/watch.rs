//! Mutation observation scoped to one album view.
//!
//! The host app rebuilds its virtual DOM aggressively: rows scroll in and
//! out of a virtualized list and re-render without warning. A
//! [`WatchSession`] holds the ratings map resolved for the current album
//! and re-runs the render passes on every mutation batch, so re-rendered
//! rows regain their widgets without another network call.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::aoty::RatingsMap;
use crate::page::HostPage;
use crate::render::Renderer;

/// Event subscriptions the host environment exposes.
///
/// A browser bridge backs these with a MutationObserver on the track-list
/// container and with history interception plus the back/forward event.
/// The overlay only depends on being told "the track list changed" and
/// "the location changed"; each subscription call yields a fresh receiver.
pub trait PageEvents: Send + Sync {
    /// Notified once per batch of subtree mutations on the track list.
    fn subscribe_mutations(&self) -> mpsc::UnboundedReceiver<()>;

    /// Notified with the new URL whenever the host app's location changes,
    /// via either history entry point or back/forward.
    fn subscribe_navigation(&self) -> mpsc::UnboundedReceiver<String>;
}

/// One live mutation-observer session bound to one album view.
///
/// At most one session may be live at a time; the orchestrator stops the
/// previous session before starting the next. Dropping a session stops it.
pub struct WatchSession {
    handle: JoinHandle<()>,
}

impl WatchSession {
    /// Begin observing. Consumes mutation events until stopped; each batch
    /// re-runs the placeholder pass and a render pass over the ratings the
    /// session was started with (`None` when the scrape failed).
    pub fn start(
        page: Arc<dyn HostPage>,
        events: &dyn PageEvents,
        ratings: Option<RatingsMap>,
    ) -> Self {
        let mut mutations = events.subscribe_mutations();
        let handle = tokio::spawn(async move {
            while mutations.recv().await.is_some() {
                debug!("Track list mutated; re-rendering widgets");
                let renderer = Renderer::new(page.as_ref());
                renderer.show_track_placeholders();
                renderer.render_tracks(ratings.as_ref());
            }
        });

        Self { handle }
    }

    /// Disconnect observation. Idempotent.
    pub fn stop(&self) {
        self.handle.abort();
    }
}

impl Drop for WatchSession {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
