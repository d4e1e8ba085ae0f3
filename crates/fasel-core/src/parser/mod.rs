//! HTML parsers for FaselHD pages
//!
//! Each view keeps an ordered table of extraction strategies, one per page
//! template the site has used. Strategies are tried in order and the first
//! one that yields data wins. Parsers never fail: missing elements give empty
//! fields or empty lists.

pub mod details;
pub mod episodes;
pub mod search;
pub mod stream;

pub use details::parse_details;
pub use episodes::parse_episodes;
pub use search::parse_search_results;
pub use stream::{find_inline_sources, find_player_url, parse_player_sources};

use regex::Regex;
use scraper::{ElementRef, Selector};

/// Text content of an element with runs of whitespace collapsed
pub(crate) fn element_text(element: &ElementRef) -> String {
    collapse_whitespace(&element.text().collect::<String>())
}

pub(crate) fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// First element under `scope` matching any selector of the list, in list order
pub(crate) fn select_first<'a>(scope: &ElementRef<'a>, selectors: &[&str]) -> Option<ElementRef<'a>> {
    selectors.iter().find_map(|css| {
        let selector = Selector::parse(css).ok()?;
        scope.select(&selector).next()
    })
}

/// Strips the "Movie" prefix and "translated/dubbed" suffix from a title
///
/// `فيلم Inception مترجم` becomes `Inception`.
pub(crate) fn clean_title(raw: &str) -> String {
    let mut title = collapse_whitespace(raw);

    if let Ok(prefix) = Regex::new(r"^فيلم\s+") {
        title = prefix.replace(&title, "").into_owned();
    }
    if let Ok(suffix) = Regex::new(r"\s+(?:مترجمة|مترجم|مدبلجة|مدبلج)$") {
        title = suffix.replace(&title, "").into_owned();
    }

    title
}
