//! Idempotent widget rendering against the host page.
//!
//! The host app renders its identifying elements well before the scrape
//! round trip completes, so rendering is placeholder-first: rows get a
//! loading widget immediately and the real state once the scrape resolves.
//! Every operation tolerates repeated invocation and rows vanishing
//! mid-pass; a missing host element is a logged no-op, never an error.

use tracing::debug;

use crate::aoty::RatingsMap;
use crate::normalize::normalize;
use crate::page::{HostPage, Widget, WidgetState};

/// Renders rating widgets onto the host page.
pub struct Renderer<'a> {
    page: &'a dyn HostPage,
}

impl<'a> Renderer<'a> {
    pub fn new(page: &'a dyn HostPage) -> Self {
        Self { page }
    }

    /// Attach a loading placeholder to every row that has no widget yet.
    ///
    /// Rows already carrying a widget, in any state, are left untouched, so
    /// calling this repeatedly is safe.
    pub fn show_track_placeholders(&self) {
        let rows = self.page.track_rows();
        if rows.is_empty() {
            debug!("No track rows rendered yet");
            return;
        }
        for row in rows {
            if self.page.track_widget(row).is_none() {
                self.page.set_track_widget(row, Widget::loading());
            }
        }
    }

    /// Resolve every non-resolved widget against the ratings map.
    ///
    /// `None` means the scrape failed or has not produced a map: every
    /// touched widget becomes unavailable. With a map, the row's title is
    /// normalized and looked up; a hit renders the rating, a miss renders
    /// unavailable. A widget already showing a rating is never downgraded
    /// by a later pass.
    pub fn render_tracks(&self, ratings: Option<&RatingsMap>) {
        for row in self.page.track_rows() {
            if let Some(WidgetState::Resolved(_)) = self.page.track_widget(row) {
                continue;
            }
            let Some(title) = self.page.track_title(row) else {
                debug!("Row {:?} vanished before rendering", row);
                continue;
            };
            let widget = match ratings.and_then(|map| map.get(&normalize(&title))) {
                Some(&rating) => Widget::resolved(rating),
                None => Widget::unavailable(),
            };
            self.page.set_track_widget(row, widget);
        }
    }

    /// Attach a loading placeholder to the album header unless a widget is
    /// already there.
    pub fn show_album_placeholder(&self) {
        if self.page.album_widget().is_none() {
            self.page.set_album_widget(Widget::loading());
        }
    }

    /// Resolve the album header widget. Same rules as tracks, at the
    /// granularity of the single header instance.
    pub fn render_album(&self, album_rating: Option<u8>) {
        if let Some(WidgetState::Resolved(_)) = self.page.album_widget() {
            return;
        }
        let widget = match album_rating {
            Some(rating) => Widget::resolved(rating),
            None => Widget::unavailable(),
        };
        self.page.set_album_widget(widget);
    }
}
