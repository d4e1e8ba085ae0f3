//! Detail page parser for FaselHD
//!
//! Extracts title, description, poster, air year and aliases from a movie or
//! series page.

use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use super::{clean_title, element_text, select_first};
use crate::types::DetailRecord;
use crate::url::absolutize;

const TITLE_SELECTORS: &[&str] = &["div.h1.title", "div.h1", "h1"];
const DESCRIPTION_SELECTORS: &[&str] = &["div.singleDesc", ".description", ".story", "p"];
const POSTER_SELECTORS: &[&str] = &["div.posterImg img", "img.poster"];
const CALENDAR_SELECTORS: &[&str] = &["i.fa-calendar-alt", "i.fa-calendar"];
const TAXONOMY_ROW_SELECTORS: &[&str] = &["#singleList .col-xl-6", "ul.taxonomy li"];

/// Labels of the taxonomy row that holds the release date
const RELEASE_DATE_LABELS: &[&str] = &["تاريخ", "موعد الصدور"];

/// Parses a detail page
///
/// # Arguments
/// * `html` - Raw HTML of the title page
/// * `base` - Page URL or site origin used to resolve the poster link
///
/// # Returns
/// A record whose fields are empty strings when the page lacks them
pub fn parse_details(html: &str, base: &str) -> DetailRecord {
    let document = Html::parse_document(html);
    let root = document.root_element();

    let title = first_text(&root, TITLE_SELECTORS)
        .or_else(|| meta_content(&document, "og:title"))
        .map(|t| clean_title(&t))
        .unwrap_or_default();

    let description = first_text(&root, DESCRIPTION_SELECTORS).unwrap_or_default();

    let image = extract_poster(&root, base)
        .or_else(|| meta_content(&document, "og:image").and_then(|u| absolutize(base, &u)))
        .unwrap_or_default();

    DetailRecord {
        title,
        description,
        image,
        airdate: extract_airdate(&root).unwrap_or_default(),
        aliases: extract_aliases(&root),
    }
}

/// First non-empty text among the selectors, in order
fn first_text(root: &ElementRef, selectors: &[&str]) -> Option<String> {
    selectors.iter().find_map(|css| {
        let selector = Selector::parse(css).ok()?;
        root.select(&selector)
            .map(|el| element_text(&el))
            .find(|text| !text.is_empty())
    })
}

fn meta_content(document: &Html, property: &str) -> Option<String> {
    let css = format!(r#"meta[property="{}"]"#, property);
    let selector = Selector::parse(&css).ok()?;
    document
        .select(&selector)
        .filter_map(|el| el.value().attr("content"))
        .map(str::trim)
        .find(|content| !content.is_empty())
        .map(str::to_string)
}

fn extract_poster(root: &ElementRef, base: &str) -> Option<String> {
    let img = select_first(root, POSTER_SELECTORS)?;
    ["data-src", "src"]
        .iter()
        .filter_map(|attr| img.value().attr(attr))
        .find_map(|value| absolutize(base, value))
}

/// First four-digit run in the text around the calendar icon
fn extract_airdate(root: &ElementRef) -> Option<String> {
    let icon = select_first(root, CALENDAR_SELECTORS)?;
    let parent = icon.parent().and_then(ElementRef::wrap)?;
    first_year(&element_text(&parent))
}

fn first_year(text: &str) -> Option<String> {
    let re = Regex::new(r"[0-9]{4}").ok()?;
    re.find(text).map(|m| m.as_str().to_string())
}

/// Taxonomy rows joined with ", ", without the release-date row
fn extract_aliases(root: &ElementRef) -> String {
    let Ok(icon_selector) = Selector::parse(&CALENDAR_SELECTORS.join(", ")) else {
        return String::new();
    };

    let mut aliases: Vec<String> = Vec::new();

    for css in TAXONOMY_ROW_SELECTORS {
        let Ok(row_selector) = Selector::parse(css) else {
            continue;
        };

        for row in root.select(&row_selector) {
            if row.select(&icon_selector).next().is_some() {
                continue;
            }
            let text = element_text(&row);
            if text.is_empty() || RELEASE_DATE_LABELS.iter().any(|label| text.contains(label)) {
                continue;
            }
            if !aliases.contains(&text) {
                aliases.push(text);
            }
        }

        if !aliases.is_empty() {
            break;
        }
    }

    aliases.join(", ")
}
