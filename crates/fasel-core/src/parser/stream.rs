//! Stream parsers for FaselHD
//!
//! Detail pages list mirror "servers" as tabs whose `onclick` handler points
//! at a player page. The player page carries a JW Player config
//! (`file: "...m3u8"`) or, on older mirrors, a plain `<video>` element.

use std::collections::HashSet;

use regex::Regex;
use scraper::{Html, Selector};

use crate::types::StreamSource;
use crate::url::absolutize;

/// Server tab selectors, tried in order
const SERVER_TAB_SELECTORS: &[&str] = &["ul.tabs-ul li[onclick]", "li[onclick]"];

/// Finds JW Player `file: "<url>.m3u8"` entries in markup
///
/// A `label` in the same config object becomes the quality. Duplicate URLs are
/// dropped; relative URLs are resolved against `page_url`.
pub fn find_inline_sources(html: &str, page_url: &str) -> Vec<StreamSource> {
    let Ok(re) = Regex::new(
        r#"file\s*:\s*["']([^"'\s]+?\.m3u8)["'](?:[^{}]*?label\s*:\s*["']([^"']*)["'])?"#,
    ) else {
        return Vec::new();
    };

    let mut seen = HashSet::new();
    let mut sources = Vec::new();

    for caps in re.captures_iter(html) {
        let Some(raw) = caps.get(1) else {
            continue;
        };
        let Some(url) = absolutize(page_url, raw.as_str()) else {
            continue;
        };
        if !seen.insert(url.clone()) {
            continue;
        }
        let quality = caps.get(2).map(|m| m.as_str());
        sources.push(StreamSource::new(url, quality));
    }

    sources
}

/// Locates the player page URL behind the first usable server tab
///
/// The `onclick` handler may embed a `/video_player?...` path or assign
/// `location.href = '...'` / `href = '...'`. Only the first hit is returned;
/// later mirrors are not considered.
pub fn find_player_url(html: &str, base: &str) -> Option<String> {
    let document = Html::parse_document(html);

    for css in SERVER_TAB_SELECTORS {
        let Ok(selector) = Selector::parse(css) else {
            continue;
        };
        for tab in document.select(&selector) {
            if let Some(onclick) = tab.value().attr("onclick")
                && let Some(raw) = extract_onclick_url(onclick)
                && let Some(url) = absolutize(base, &raw)
            {
                return Some(url);
            }
        }
    }

    None
}

/// Pulls a player URL out of an inline event handler
fn extract_onclick_url(onclick: &str) -> Option<String> {
    let player = Regex::new(r#"(?:(?:https?:)?//[^'"\s]+)?/video_player[^'"\s]*"#).ok()?;
    if let Some(m) = player.find(onclick) {
        return Some(m.as_str().to_string());
    }

    let assignment = Regex::new(r#"(?:location\.)?href\s*=\s*['"]([^'"]+)['"]"#).ok()?;
    let caps = assignment.captures(onclick)?;
    caps.get(1).map(|m| m.as_str().to_string())
}

/// Extracts playable sources from a player page
///
/// Inline `file:` m3u8 entries win. Without them the first `<video>` source
/// that is not a `blob:` object URL is used.
pub fn parse_player_sources(html: &str, page_url: &str) -> Vec<StreamSource> {
    let sources = find_inline_sources(html, page_url);
    if !sources.is_empty() {
        return sources;
    }

    extract_from_video_element(html, page_url)
        .map(|url| vec![StreamSource::new(url, None)])
        .unwrap_or_default()
}

fn extract_from_video_element(html: &str, page_url: &str) -> Option<String> {
    let document = Html::parse_document(html);

    for css in ["video[src]", "video source[src]"] {
        let Ok(selector) = Selector::parse(css) else {
            continue;
        };
        for element in document.select(&selector) {
            if let Some(src) = element.value().attr("src")
                && !is_blob_url(src)
                && let Some(url) = absolutize(page_url, src)
            {
                return Some(url);
            }
        }
    }

    None
}

fn is_blob_url(url: &str) -> bool {
    url.trim_start().to_ascii_lowercase().starts_with("blob:")
}
