//! In-memory host page used by the test suite.
//!
//! Behaves like the real page tree: rows appear and disappear, widgets
//! attach to rows, and mutation/navigation events arrive through the same
//! channels a browser bridge would use. Tests drive the page directly and
//! assert on the widgets the overlay attached.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use tokio::sync::mpsc;

use crate::watch::PageEvents;

use super::{HostPage, RowId, Widget, WidgetState};

#[derive(Default)]
struct PageState {
    location: String,
    artist: Option<String>,
    album: Option<String>,
    rows: Vec<(RowId, String)>,
    track_widgets: HashMap<RowId, Widget>,
    album_widget: Option<Widget>,
    next_row_id: u64,
}

/// In-memory [`HostPage`] and [`PageEvents`] implementation.
pub struct FakePage {
    state: Mutex<PageState>,
    mutation_senders: Mutex<Vec<mpsc::UnboundedSender<()>>>,
    navigation_senders: Mutex<Vec<mpsc::UnboundedSender<String>>>,
    widget_writes: AtomicU64,
}

impl FakePage {
    pub fn new(location: &str) -> Self {
        Self {
            state: Mutex::new(PageState {
                location: location.to_string(),
                ..PageState::default()
            }),
            mutation_senders: Mutex::new(Vec::new()),
            navigation_senders: Mutex::new(Vec::new()),
            widget_writes: AtomicU64::new(0),
        }
    }

    pub fn set_artist(&self, name: &str) {
        self.state.lock().unwrap().artist = Some(name.to_string());
    }

    pub fn set_album(&self, name: &str) {
        self.state.lock().unwrap().album = Some(name.to_string());
    }

    /// Render a new track row at the bottom of the list. Does not emit a
    /// mutation event; tests emit those explicitly.
    pub fn add_row(&self, title: &str) -> RowId {
        let mut state = self.state.lock().unwrap();
        let row = RowId(state.next_row_id);
        state.next_row_id += 1;
        state.rows.push((row, title.to_string()));
        row
    }

    /// Drop one row and its widget, as the host app's virtualized list
    /// does when a row scrolls out.
    pub fn remove_row(&self, row: RowId) {
        let mut state = self.state.lock().unwrap();
        state.rows.retain(|(id, _)| *id != row);
        state.track_widgets.remove(&row);
    }

    /// Drop every row, widget, and identifying element, as a client-side
    /// navigation does before the next view renders.
    pub fn clear_view(&self) {
        let mut state = self.state.lock().unwrap();
        state.rows.clear();
        state.track_widgets.clear();
        state.album_widget = None;
        state.artist = None;
        state.album = None;
    }

    /// Change the location without emitting a navigation event (the host
    /// router mutates the URL before its events are observed).
    pub fn set_location(&self, url: &str) {
        self.state.lock().unwrap().location = url.to_string();
    }

    /// Change the location and deliver a navigation event to every
    /// subscriber.
    pub fn navigate(&self, url: &str) {
        self.set_location(url);
        self.navigation_senders
            .lock()
            .unwrap()
            .retain(|sender| sender.send(url.to_string()).is_ok());
    }

    /// Deliver one mutation batch to every subscriber.
    pub fn emit_mutation(&self) {
        self.mutation_senders
            .lock()
            .unwrap()
            .retain(|sender| sender.send(()).is_ok());
    }

    /// Full widget (label, tooltip, background) attached to a row, for
    /// assertions beyond the state enum.
    pub fn track_widget_full(&self, row: RowId) -> Option<Widget> {
        self.state.lock().unwrap().track_widgets.get(&row).cloned()
    }

    pub fn album_widget_full(&self) -> Option<Widget> {
        self.state.lock().unwrap().album_widget.clone()
    }

    /// Number of widget writes performed so far, counting both track and
    /// album widgets. Lets tests detect duplicate render passes that
    /// idempotent end-state assertions would miss.
    pub fn widget_writes(&self) -> u64 {
        self.widget_writes.load(Ordering::SeqCst)
    }
}

impl HostPage for FakePage {
    fn location(&self) -> String {
        self.state.lock().unwrap().location.clone()
    }

    fn artist_name(&self) -> Option<String> {
        self.state.lock().unwrap().artist.clone()
    }

    fn album_name(&self) -> Option<String> {
        self.state.lock().unwrap().album.clone()
    }

    fn track_rows(&self) -> Vec<RowId> {
        self.state
            .lock()
            .unwrap()
            .rows
            .iter()
            .map(|(id, _)| *id)
            .collect()
    }

    fn track_title(&self, row: RowId) -> Option<String> {
        self.state
            .lock()
            .unwrap()
            .rows
            .iter()
            .find(|(id, _)| *id == row)
            .map(|(_, title)| title.clone())
    }

    fn track_widget(&self, row: RowId) -> Option<WidgetState> {
        self.state
            .lock()
            .unwrap()
            .track_widgets
            .get(&row)
            .map(|widget| widget.state)
    }

    fn set_track_widget(&self, row: RowId, widget: Widget) {
        let mut state = self.state.lock().unwrap();
        if state.rows.iter().any(|(id, _)| *id == row) {
            state.track_widgets.insert(row, widget);
            self.widget_writes.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn album_widget(&self) -> Option<WidgetState> {
        self.state
            .lock()
            .unwrap()
            .album_widget
            .as_ref()
            .map(|widget| widget.state)
    }

    fn set_album_widget(&self, widget: Widget) {
        self.state.lock().unwrap().album_widget = Some(widget);
        self.widget_writes.fetch_add(1, Ordering::SeqCst);
    }
}

impl PageEvents for FakePage {
    fn subscribe_mutations(&self) -> mpsc::UnboundedReceiver<()> {
        let (sender, receiver) = mpsc::unbounded_channel();
        self.mutation_senders.lock().unwrap().push(sender);
        receiver
    }

    fn subscribe_navigation(&self) -> mpsc::UnboundedReceiver<String> {
        let (sender, receiver) = mpsc::unbounded_channel();
        self.navigation_senders.lock().unwrap().push(sender);
        receiver
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_keep_page_order() {
        let page = FakePage::new("http://host.test/album/1");
        let first = page.add_row("First");
        let second = page.add_row("Second");
        assert_eq!(page.track_rows(), vec![first, second]);
        assert_eq!(page.track_title(first).as_deref(), Some("First"));
    }

    #[test]
    fn test_widget_write_to_removed_row_is_noop() {
        let page = FakePage::new("http://host.test/album/1");
        let row = page.add_row("Gone");
        page.remove_row(row);
        page.set_track_widget(row, Widget::loading());
        assert_eq!(page.track_widget(row), None);
        assert_eq!(page.widget_writes(), 0);
    }

    #[tokio::test]
    async fn test_mutation_events_reach_subscriber() {
        let page = FakePage::new("http://host.test/album/1");
        let mut mutations = page.subscribe_mutations();
        page.emit_mutation();
        assert!(mutations.recv().await.is_some());
    }

    #[tokio::test]
    async fn test_navigation_carries_new_url() {
        let page = FakePage::new("http://host.test/album/1");
        let mut navigations = page.subscribe_navigation();
        page.navigate("http://host.test/album/2");
        assert_eq!(
            navigations.recv().await.as_deref(),
            Some("http://host.test/album/2")
        );
        assert_eq!(page.location(), "http://host.test/album/2");
    }
}
