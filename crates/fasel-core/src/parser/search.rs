//! Search results parser for FaselHD
//!
//! Parses listing pages (search results, category pages) into [`SearchHit`]s.

use std::collections::HashSet;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use super::{clean_title, element_text, select_first};
use crate::types::SearchHit;
use crate::url::absolutize;

/// One listing-card layout the site has used
struct CardTemplate {
    name: &'static str,
    /// Selector for the repeated card element
    card: &'static str,
    /// Selectors for the title inside a card, tried in order
    title: &'static [&'static str],
    /// Cards without an image are not cards in this layout
    requires_image: bool,
}

const CARD_TEMPLATES: &[CardTemplate] = &[
    CardTemplate {
        name: "post-card",
        card: "div.postDiv",
        title: &["div.h1"],
        requires_image: false,
    },
    CardTemplate {
        name: "grid-column",
        card: "div.col-xl-2, div.col-lg-2, div.col-md-3",
        title: &["div.h1", "h3", "h2", ".title"],
        requires_image: false,
    },
    CardTemplate {
        name: "anchor",
        card: "a[href]",
        title: &["div.h1", "h3", "h2", ".title"],
        requires_image: true,
    },
];

/// Parses a listing page and returns its title cards
///
/// # Arguments
/// * `html` - Raw HTML of the listing page
/// * `base` - Site origin used to resolve relative links
///
/// # Returns
/// Hits in document order, deduplicated by `href`. Cards missing a title or
/// a link are skipped. Empty if no known card layout matches.
pub fn parse_search_results(html: &str, base: &str) -> Vec<SearchHit> {
    let document = Html::parse_document(html);

    for template in CARD_TEMPLATES {
        let hits = parse_with_template(&document, template, base);
        if !hits.is_empty() {
            debug!(template = template.name, count = hits.len(), "matched listing cards");
            return hits;
        }
    }

    Vec::new()
}

fn parse_with_template(document: &Html, template: &CardTemplate, base: &str) -> Vec<SearchHit> {
    let Ok(card_selector) = Selector::parse(template.card) else {
        return Vec::new();
    };

    let mut seen = HashSet::new();
    let mut hits = Vec::new();

    for card in document.select(&card_selector) {
        let Some(hit) = parse_card(&card, template, base) else {
            continue;
        };
        if seen.insert(hit.href.clone()) {
            hits.push(hit);
        }
    }

    hits
}

/// Parses a single card, `None` when it lacks a title or a link
fn parse_card(card: &ElementRef, template: &CardTemplate, base: &str) -> Option<SearchHit> {
    let anchor = card_anchor(card)?;
    let href = absolutize(base, anchor.value().attr("href")?)?;

    let title = select_first(card, template.title)
        .map(|el| clean_title(&element_text(&el)))
        .unwrap_or_default();
    if title.is_empty() {
        return None;
    }

    let image = extract_image(card, base).unwrap_or_default();
    if template.requires_image && image.is_empty() {
        return None;
    }

    Some(SearchHit { title, href, image })
}

/// The card's link: the card itself when it is an anchor, else its first anchor
fn card_anchor<'a>(card: &ElementRef<'a>) -> Option<ElementRef<'a>> {
    if card.value().name() == "a" && card.value().attr("href").is_some() {
        return Some(*card);
    }
    select_first(card, &["a[href]"])
}

/// Poster URL from an `<img>` or a `background-image` style
fn extract_image(card: &ElementRef, base: &str) -> Option<String> {
    if let Some(img) = select_first(card, &["img"]) {
        let attrs = ["data-src", "data-lazy-src", "src"];
        for attr in attrs {
            if let Some(value) = img.value().attr(attr)
                && let Some(url) = absolutize(base, value)
            {
                return Some(url);
            }
        }
    }

    let styled = std::iter::once(*card).chain(
        Selector::parse(r#"[style*="background-image"]"#)
            .ok()
            .into_iter()
            .flat_map(|selector| card.select(&selector).collect::<Vec<_>>()),
    );

    for element in styled {
        if let Some(style) = element.value().attr("style")
            && let Some(url) = extract_background_url(style)
            && let Some(url) = absolutize(base, &url)
        {
            return Some(url);
        }
    }

    None
}

/// Pulls the URL out of `background-image: url(...)`
fn extract_background_url(style: &str) -> Option<String> {
    let re = Regex::new(r#"background-image\s*:\s*url\(\s*['"]?([^'")]+?)['"]?\s*\)"#).ok()?;
    let caps = re.captures(style)?;
    caps.get(1).map(|m| m.as_str().trim().to_string())
}
