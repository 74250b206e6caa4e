//! Host-page URLs, HTML builders, and a fast test configuration.

use aoty_overlay::OverlayConfig;

use super::CannedSite;

pub const SITE_BASE: &str = "http://aoty.test";

pub const HOST_ALBUM_1: &str = "https://music.host.test/album/one";
pub const HOST_ALBUM_2: &str = "https://music.host.test/album/two";
pub const HOST_PLAYLIST: &str = "https://music.host.test/playlist/mix";

/// Configuration with test-friendly timings against the canned site.
pub fn test_config() -> OverlayConfig {
    OverlayConfig {
        base_url: SITE_BASE.to_string(),
        poll_interval_ms: 10,
        wait_timeout_ms: 500,
        settle_delay_ms: 20,
        ..OverlayConfig::default()
    }
}

/// The search URL the fetcher will build for an artist/album pair.
pub fn search_url(artist: &str, album: &str) -> String {
    format!(
        "{}/search/?q={}",
        SITE_BASE,
        urlencoding::encode(&format!("{} {}", artist, album))
    )
}

pub fn search_page_html(href: &str) -> String {
    format!(
        r#"<html><body><div class="image"><a href="{}"><img/></a></div></body></html>"#,
        href
    )
}

pub fn album_page_html(rows: &[(&str, &str)], album_score: Option<&str>) -> String {
    let rows_html: String = rows
        .iter()
        .map(|(title, rating)| {
            format!(
                r#"<tr><td class="trackTitle"><a>{}</a></td><td class="trackRating"><span>{}</span></td></tr>"#,
                title, rating
            )
        })
        .collect();
    let score_html = album_score
        .map(|score| format!(r#"<div class="albumUserScore"><a>{}</a></div>"#, score))
        .unwrap_or_default();
    format!(
        "<html><body>{}<table class=\"trackListTable\"><tbody>{}</tbody></table></body></html>",
        score_html, rows_html
    )
}

/// Register both stages for one album: the search result pointing at
/// `path`, and the album page itself.
pub fn register_album(
    site: &CannedSite,
    artist: &str,
    album: &str,
    path: &str,
    rows: &[(&str, &str)],
    album_score: Option<&str>,
) {
    site.insert(&search_url(artist, album), 200, &search_page_html(path));
    site.insert(
        &format!("{}{}", SITE_BASE, path),
        200,
        &album_page_html(rows, album_score),
    );
}
