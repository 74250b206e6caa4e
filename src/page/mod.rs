//! Abstraction over the host page's DOM.
//!
//! The overlay never touches a concrete DOM API. It reads names and rows
//! and attaches widgets through [`HostPage`]; a browser bridge implements
//! the trait against the real page, [`fake::FakePage`] implements it in
//! memory for tests.

pub mod fake;

/// Opaque identity of one rendered track row.
///
/// Identities are stable for as long as the host app keeps the row
/// rendered; a re-rendered row gets a fresh identity and, with it, a fresh
/// widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowId(pub u64);

/// Visual state of a rating widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetState {
    /// Placeholder shown while the scrape is in flight.
    Loading,
    /// A matched rating.
    Resolved(u8),
    /// The scrape failed or the track has no rating.
    Unavailable,
}

/// One rating widget as handed to the host page.
///
/// Pure data; applying the background string and animating the placeholder
/// is the browser bridge's concern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Widget {
    pub state: WidgetState,
    /// Short text shown inside the widget.
    pub label: String,
    /// Human-readable hover text.
    pub tooltip: String,
    /// CSS background.
    pub background: String,
}

impl Widget {
    /// Pulsing placeholder shown before the scrape resolves.
    pub fn loading() -> Self {
        Self {
            state: WidgetState::Loading,
            label: String::new(),
            tooltip: String::new(),
            background: "#ccc".to_string(),
        }
    }

    /// A matched rating, color-coded by score.
    pub fn resolved(rating: u8) -> Self {
        let clamped = rating.min(100);
        Self {
            state: WidgetState::Resolved(clamped),
            label: clamped.to_string(),
            tooltip: format!("{} User Score", clamped),
            background: gradient_color(clamped),
        }
    }

    /// Terminal state for an unmatched track or a failed scrape.
    pub fn unavailable() -> Self {
        Self {
            state: WidgetState::Unavailable,
            label: "N/A".to_string(),
            tooltip: "No Ratings Available".to_string(),
            background: "grey".to_string(),
        }
    }
}

/// CSS gradient for a rating: red at 0 through green at 100.
///
/// Hue is a linear interpolation over 0..120 with the rating clamped to
/// [0, 100] first.
pub fn gradient_color(rating: u8) -> String {
    let hue = f64::from(rating.min(100)) * 1.2;
    format!(
        "linear-gradient(90deg, hsl({h}, 100%, 50%), hsl({h}, 100%, 50%))",
        h = hue
    )
}

/// Read/write access to the parts of the host page the overlay touches.
///
/// All methods are cheap, non-blocking, and called from the single
/// event-loop thread. Absence of an element is reported as `None`, never as
/// an error; the page may change between any two calls.
pub trait HostPage: Send + Sync {
    /// Current page URL as the host app's client-side router sees it.
    fn location(&self) -> String;

    /// Artist name, once the host app has rendered it.
    fn artist_name(&self) -> Option<String>;

    /// Album title, once the host app has rendered it.
    fn album_name(&self) -> Option<String>;

    /// Currently rendered track rows, in page order.
    fn track_rows(&self) -> Vec<RowId>;

    /// Raw title text of one row. `None` when the row has disappeared since
    /// it was observed.
    fn track_title(&self, row: RowId) -> Option<String>;

    /// State of the widget currently attached to a row, if any.
    fn track_widget(&self, row: RowId) -> Option<WidgetState>;

    /// Attach a widget to a row, replacing any existing one. A no-op when
    /// the row no longer exists.
    fn set_track_widget(&self, row: RowId, widget: Widget);

    /// State of the album header widget, if attached.
    fn album_widget(&self) -> Option<WidgetState>;

    /// Attach or replace the album header widget.
    fn set_album_widget(&self, widget: Widget);
}

/// Whether a URL denotes an album view on the host app.
pub fn is_album_view(url: &str) -> bool {
    url.contains("/album/")
}
