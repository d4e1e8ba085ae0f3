//! Episode list parser for FaselHD
//!
//! Series and season pages list episodes either as bare anchors labelled
//! "الحلقة N" or, on newer templates, as cards with a heading.

use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use super::{element_text, select_first};
use crate::types::Episode;
use crate::url::absolutize;

/// Localized word for "episode"
pub const EPISODE_WORD: &str = "الحلقة";

const EPISODE_CARD_SELECTORS: &str = "div.episode-card, div.epCard";
const EPISODE_HEADING_SELECTORS: &[&str] = &["h3", "h4", ".title", "a[href]"];

/// Parses an episode list page
///
/// # Arguments
/// * `html` - Raw HTML of a series or season page
/// * `base` - Site origin used to resolve relative links
///
/// # Returns
/// Episodes sorted by ascending number, one per number. Empty when the page
/// exposes no episode links.
pub fn parse_episodes(html: &str, base: &str) -> Vec<Episode> {
    let document = Html::parse_document(html);

    let mut episodes = parse_numbered_anchors(&document, base);
    if episodes.is_empty() {
        episodes = parse_episode_cards(&document, base);
        if !episodes.is_empty() {
            debug!(count = episodes.len(), "matched episode cards");
        }
    }

    order_episodes(episodes)
}

/// Anchors whose whole text is the episode word followed by a number
fn parse_numbered_anchors(document: &Html, base: &str) -> Vec<Episode> {
    let Ok(selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    document
        .select(&selector)
        .filter_map(|anchor| {
            let number = parse_episode_label(&element_text(&anchor))?;
            let href = absolutize(base, anchor.value().attr("href")?)?;
            Some(Episode { href, number })
        })
        .collect()
}

/// Cards pairing a link with a heading; the heading's last number is used
fn parse_episode_cards(document: &Html, base: &str) -> Vec<Episode> {
    let Ok(selector) = Selector::parse(EPISODE_CARD_SELECTORS) else {
        return Vec::new();
    };

    document
        .select(&selector)
        .filter_map(|card| parse_episode_card(&card, base))
        .collect()
}

fn parse_episode_card(card: &ElementRef, base: &str) -> Option<Episode> {
    let anchor = select_first(card, &["a[href]"])?;
    let href = absolutize(base, anchor.value().attr("href")?)?;
    let heading = select_first(card, EPISODE_HEADING_SELECTORS)?;
    let number = last_number(&element_text(&heading))?;
    Some(Episode { href, number })
}

/// Matches the exact label "الحلقة N" (space optional) and returns N
///
/// Any other text around the label rejects it.
pub fn parse_episode_label(text: &str) -> Option<String> {
    let pattern = format!(r"^{}\s*([0-9]+)$", EPISODE_WORD);
    let re = Regex::new(&pattern).ok()?;
    let caps = re.captures(text.trim())?;
    normalize_number(caps.get(1)?.as_str())
}

fn last_number(text: &str) -> Option<String> {
    let re = Regex::new(r"[0-9]+").ok()?;
    let last = re.find_iter(text).last()?;
    normalize_number(last.as_str())
}

/// Positive integer as canonical decimal text ("007" -> "7")
fn normalize_number(digits: &str) -> Option<String> {
    let value: u32 = digits.parse().ok()?;
    (value > 0).then(|| value.to_string())
}

/// Ascending by number; on duplicates the first link in page order is kept
fn order_episodes(mut episodes: Vec<Episode>) -> Vec<Episode> {
    episodes.sort_by_key(Episode::number_value);
    episodes.dedup_by_key(|episode| episode.number_value());
    episodes
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://www.faselhds.xyz";

    #[test]
    fn test_parse_episode_label_exact() {
        assert_eq!(parse_episode_label("الحلقة 3").as_deref(), Some("3"));
        assert_eq!(parse_episode_label("الحلقة12").as_deref(), Some("12"));
        assert_eq!(parse_episode_label("  الحلقة 07  ").as_deref(), Some("7"));
    }

    #[test]
    fn test_parse_episode_label_rejects_extra_text() {
        assert_eq!(parse_episode_label("الحلقة 3 خاصة"), None);
        assert_eq!(parse_episode_label("مشاهدة الحلقة 3"), None);
        assert_eq!(parse_episode_label("episode 3"), None);
        assert_eq!(parse_episode_label("الحلقة"), None);
        assert_eq!(parse_episode_label("الحلقة 0"), None);
    }

    #[test]
    fn test_parse_episodes_reverses_descending_page_order() {
        let html = r#"
        <div class="epAll">
            <a href="/episodes/show-3">الحلقة 3</a>
            <a href="/episodes/show-2">الحلقة 2</a>
            <a href="https://www.faselhds.xyz/episodes/show-1"> الحلقة 1 </a>
        </div>
        "#;

        let episodes = parse_episodes(html, BASE);
        assert_eq!(
            episodes,
            vec![
                Episode {
                    href: "https://www.faselhds.xyz/episodes/show-1".to_string(),
                    number: "1".to_string(),
                },
                Episode {
                    href: "https://www.faselhds.xyz/episodes/show-2".to_string(),
                    number: "2".to_string(),
                },
                Episode {
                    href: "https://www.faselhds.xyz/episodes/show-3".to_string(),
                    number: "3".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_parse_episodes_numeric_not_lexical_order() {
        let html = r#"
            <a href="/e10">الحلقة 10</a>
            <a href="/e9">الحلقة 9</a>
            <a href="/e1">الحلقة 1</a>
        "#;

        let numbers: Vec<_> = parse_episodes(html, BASE)
            .into_iter()
            .map(|e| e.number)
            .collect();
        assert_eq!(numbers, vec!["1", "9", "10"]);
    }

    #[test]
    fn test_parse_episodes_skips_other_anchors_and_duplicates() {
        let html = r#"
            <a href="/home">الرئيسية</a>
            <a href="/e2">الحلقة 2</a>
            <a href="/e2-special">الحلقة 2 خاصة</a>
            <a>الحلقة 4</a>
            <a href="/e1">الحلقة 1</a>
            <a href="/e1-mirror">الحلقة 1</a>
        "#;

        let episodes = parse_episodes(html, BASE);
        let hrefs: Vec<_> = episodes.iter().map(|e| e.href.as_str()).collect();
        assert_eq!(
            hrefs,
            vec!["https://www.faselhds.xyz/e1", "https://www.faselhds.xyz/e2"]
        );
    }

    #[test]
    fn test_parse_episode_cards_fallback() {
        let html = r#"
        <div class="episode-card"><a href="/s1e2"><img src="x.jpg"></a><h3>الموسم 1 الحلقة 2</h3></div>
        <div class="episode-card"><a href="/s1e1"><img src="x.jpg"></a><h3>الموسم 1 الحلقة 1</h3></div>
        <div class="episode-card"><a href="/trailer"></a><h3>Trailer</h3></div>
        "#;

        let episodes = parse_episodes(html, BASE);
        assert_eq!(episodes.len(), 2);
        assert_eq!(episodes[0].number, "1");
        assert_eq!(episodes[0].href, "https://www.faselhds.xyz/s1e1");
        assert_eq!(episodes[1].number, "2");
    }

    #[test]
    fn test_parse_episodes_empty_page() {
        assert!(parse_episodes("<html><body><p>movie</p></body></html>", BASE).is_empty());
    }
}
