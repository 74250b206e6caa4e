//! Track-title normalization.
//!
//! The host page and the ratings site format track names independently; the
//! usual divergence is a featured-artist clause present on one side only.
//! Both sides are reduced to a canonical key before matching.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Whitespace-bounded so titles like "Defeat" survive intact. The
    // optional paren covers the "Song (feat. X)" form; the trailing ".+$"
    // swallows the closing paren along with the names.
    static ref FEAT_CLAUSE: Regex =
        Regex::new(r"(?i)\s+\(?(featuring|feat\.|feat|ft\.|ft)\s+.+$").unwrap();
}

/// Canonical matching key for a raw track title.
///
/// Strips a trailing `feat.` / `ft.` / `featuring` clause and everything
/// after it, trims surrounding whitespace, and lowercases. Pure, total, and
/// idempotent: applying it twice yields the same key as applying it once.
/// Empty input yields an empty key.
pub fn normalize(raw: &str) -> String {
    FEAT_CLAUSE.replace(raw, "").trim().to_lowercase()
}
