//! Client for the ratings site (albumoftheyear.org).
//!
//! Split into transport ([`client`]), pure HTML extraction ([`parser`]),
//! and the two-stage search-then-album algorithm ([`fetcher`]).

mod client;
mod fetcher;
mod parser;

pub use client::AotyClient;
pub use fetcher::{FetchedPage, PageSource, RatingsFetcher, RatingsMap, ScrapeOutcome};
pub use parser::{parse_album_page, parse_search_page, AlbumPage};
