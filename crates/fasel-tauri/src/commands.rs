//! Tauri commands for the FaselHD scraper
//!
//! Each command maps to one host-facing scraper operation. Lookups that find
//! nothing, or fail, resolve to an empty list or `null`; the host never sees a
//! rejected promise for a single title.

use fasel_core::{DetailRecord, Episode, SearchHit, StreamSource};
use tauri::State;

use crate::ScraperState;

/// Search titles by query
#[tauri::command]
pub async fn search(
    state: State<'_, ScraperState>,
    query: String,
) -> Result<Vec<SearchHit>, String> {
    Ok(state.scraper().search(&query).await)
}

/// Details of a title page, or null
#[tauri::command]
pub async fn get_details(
    state: State<'_, ScraperState>,
    url: String,
) -> Result<Option<DetailRecord>, String> {
    Ok(state.scraper().get_details(&url).await)
}

/// Episodes of a series page in ascending order
#[tauri::command]
pub async fn get_episodes(
    state: State<'_, ScraperState>,
    url: String,
) -> Result<Vec<Episode>, String> {
    Ok(state.scraper().get_episodes(&url).await)
}

/// Playable sources for a page URL or its markup
#[tauri::command]
pub async fn get_stream_url(
    state: State<'_, ScraperState>,
    url_or_markup: String,
) -> Result<Vec<StreamSource>, String> {
    Ok(state.scraper().get_stream_url(&url_or_markup).await)
}
