//! Pure HTML extraction for the ratings site's two page types.
//!
//! These functions take raw HTML and return structured data; they issue no
//! requests and touch no page state. The selectors live in [`crate::config`]
//! and track the site's markup, not this crate's logic.

use scraper::{Html, Selector};
use tracing::debug;

use crate::config;

/// Result of parsing one album page.
#[derive(Debug, Clone, Default)]
pub struct AlbumPage {
    /// Raw track title and rating, one entry per parseable row, in page
    /// order.
    pub track_ratings: Vec<(String, u8)>,
    /// Album-level user score, when the page exposes one.
    pub album_rating: Option<u8>,
    /// Number of track rows the page rendered, parseable or not. Zero means
    /// the page has no track list at all, which is distinct from a list
    /// whose every rating failed to parse.
    pub row_count: usize,
}

/// Extract the href of the first album link from a search results page.
pub fn parse_search_page(html: &str) -> Option<String> {
    // The selector literals are compile-time constants; parsing them cannot
    // fail at runtime.
    let result_selector = Selector::parse(config::SEARCH_RESULT_SELECTOR).unwrap();

    let document = Html::parse_document(html);
    document
        .select(&result_selector)
        .next()
        .and_then(|link| link.value().attr("href"))
        .map(|href| href.to_string())
}

/// Extract per-track ratings and the optional album score from an album
/// page.
///
/// A row with a missing title cell, missing rating cell, or unparseable
/// rating is skipped; it is not an error and leaves no entry behind. The
/// album score is extracted independently and its absence never fails the
/// parse.
pub fn parse_album_page(html: &str) -> AlbumPage {
    let row_selector = Selector::parse(config::TRACK_ROW_SELECTOR).unwrap();
    let title_selector = Selector::parse(config::TRACK_TITLE_SELECTOR).unwrap();
    let rating_selector = Selector::parse(config::TRACK_RATING_SELECTOR).unwrap();
    let score_selector = Selector::parse(config::ALBUM_SCORE_SELECTOR).unwrap();

    let document = Html::parse_document(html);

    let mut track_ratings = Vec::new();
    let mut row_count = 0;
    for row in document.select(&row_selector) {
        row_count += 1;
        let Some(title_element) = row.select(&title_selector).next() else {
            continue;
        };
        let Some(rating_element) = row.select(&rating_selector).next() else {
            continue;
        };

        let title = title_element.text().collect::<String>().trim().to_string();
        let rating_text = rating_element.text().collect::<String>();
        match rating_text.trim().parse::<u8>() {
            Ok(rating) => track_ratings.push((title, rating)),
            Err(_) => {
                debug!(
                    "Skipping track '{}' with unparseable rating '{}'",
                    title,
                    rating_text.trim()
                );
            }
        }
    }

    let album_rating = document
        .select(&score_selector)
        .next()
        .and_then(|element| element.text().collect::<String>().trim().parse::<u8>().ok());

    AlbumPage {
        track_ratings,
        album_rating,
        row_count,
    }
}
