//! Main scraper API for FaselHD
//!
//! Combines the HTTP client with the parsers. Every operation comes in two
//! flavours: a `try_*` method returning [`Result`], and a host-facing method
//! that logs failures and returns an empty value instead.

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::client::FaselClient;
use crate::config::SiteConfig;
use crate::error::{FaselError, Result};
use crate::parser::{
    find_inline_sources, find_player_url, parse_details, parse_episodes, parse_player_sources,
    parse_search_results,
};
use crate::types::{DetailRecord, Episode, SearchHit, StreamSource};
use crate::url::{absolutize, build_search_url, is_absolute};

/// Main scraper API for FaselHD
///
/// # Example
/// ```no_run
/// # async fn example() -> fasel_core::Result<()> {
/// use fasel_core::FaselScraper;
/// let scraper = FaselScraper::new()?;
/// for hit in scraper.search("breaking bad").await {
///     println!("{} -> {}", hit.title, hit.href);
/// }
/// # Ok(())
/// # }
/// ```
pub struct FaselScraper {
    client: FaselClient,
}

impl FaselScraper {
    /// Create a new scraper with default configuration
    ///
    /// # Errors
    /// Returns error if HTTP client initialization fails
    pub fn new() -> Result<Self> {
        Ok(Self {
            client: FaselClient::new()?,
        })
    }

    /// Create a new scraper for a custom site configuration
    pub fn with_config(config: SiteConfig) -> Result<Self> {
        Ok(Self {
            client: FaselClient::with_config(config)?,
        })
    }

    /// Create a scraper around an existing client
    pub fn with_client(client: FaselClient) -> Self {
        Self { client }
    }

    /// Configuration in use
    pub fn config(&self) -> &SiteConfig {
        self.client.config()
    }

    fn origin(&self) -> &str {
        self.client.config().origin()
    }

    /// Search titles by query
    ///
    /// Never fails; errors are logged and yield an empty list.
    pub async fn search(&self, query: &str) -> Vec<SearchHit> {
        self.try_search(query).await.unwrap_or_else(|e| {
            warn!(query, error = %e, "search failed");
            Vec::new()
        })
    }

    /// Search titles by query, walking result pages
    ///
    /// Pages are fetched one after another until a page adds no new title,
    /// a later page fails to load, or `max_search_pages` is reached.
    ///
    /// # Errors
    /// - `InvalidQuery` if query is empty or whitespace only
    /// - `Status` / `Transport` if the first page cannot be fetched
    pub async fn try_search(&self, query: &str) -> Result<Vec<SearchHit>> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return Err(FaselError::InvalidQuery(
                "Search query cannot be empty".to_string(),
            ));
        }

        let max_pages = self.config().max_search_pages.max(1);
        let mut seen = HashSet::new();
        let mut hits = Vec::new();

        for page in 1..=max_pages {
            let url = build_search_url(self.origin(), trimmed, page);
            let html = match self.client.fetch(&url).await {
                Ok(html) => html,
                Err(e) if page == 1 => return Err(e),
                Err(e) => {
                    debug!(page, error = %e, "stopping search pagination");
                    break;
                }
            };

            let before = hits.len();
            for hit in parse_search_results(&html, self.origin()) {
                if seen.insert(hit.href.clone()) {
                    hits.push(hit);
                }
            }

            if hits.len() == before {
                break;
            }
        }

        debug!(query = trimmed, count = hits.len(), "search finished");
        Ok(hits)
    }

    /// Details for a title page
    ///
    /// Returns `None` when the page cannot be fetched or carries no details.
    pub async fn get_details(&self, url: &str) -> Option<DetailRecord> {
        match self.try_details(url).await {
            Ok(record) if !record.is_empty() => Some(record),
            Ok(_) => {
                debug!(url, "no details on page");
                None
            }
            Err(e) => {
                warn!(url, error = %e, "details lookup failed");
                None
            }
        }
    }

    /// Details for a title page, fields empty when missing
    pub async fn try_details(&self, url: &str) -> Result<DetailRecord> {
        let url = self.page_url(url)?;
        let html = self.client.fetch(&url).await?;
        Ok(parse_details(&html, &url))
    }

    /// Episodes of a series or season page, ascending
    ///
    /// Never fails; errors are logged and yield an empty list.
    pub async fn get_episodes(&self, url: &str) -> Vec<Episode> {
        self.try_episodes(url).await.unwrap_or_else(|e| {
            warn!(url, error = %e, "episode lookup failed");
            Vec::new()
        })
    }

    /// Episodes of a series or season page, ascending
    pub async fn try_episodes(&self, url: &str) -> Result<Vec<Episode>> {
        let url = self.page_url(url)?;
        let html = self.client.fetch(&url).await?;
        Ok(parse_episodes(&html, &url))
    }

    /// Playable sources for a title
    ///
    /// Accepts either the detail page URL or its markup. Never fails; errors
    /// are logged and yield an empty list.
    pub async fn get_stream_url(&self, url_or_markup: &str) -> Vec<StreamSource> {
        self.try_stream(url_or_markup).await.unwrap_or_else(|e| {
            warn!(error = %e, "stream resolution failed");
            Vec::new()
        })
    }

    /// Resolves playable sources in at most two hops
    ///
    /// Markup that already holds a `file: "...m3u8"` player config is used
    /// as is. Otherwise the first server tab's player page is fetched and
    /// parsed. Later mirrors are never tried.
    pub async fn try_stream(&self, url_or_markup: &str) -> Result<Vec<StreamSource>> {
        let input = url_or_markup.trim();
        let (detail_html, detail_url) = if looks_like_url(input) {
            let url = self.page_url(input)?;
            (self.client.fetch(&url).await?, url)
        } else {
            (input.to_string(), self.origin().to_string())
        };

        let inline = find_inline_sources(&detail_html, &detail_url);
        if !inline.is_empty() {
            debug!(count = inline.len(), "player config found inline");
            return Ok(inline);
        }

        let Some(player_url) = find_player_url(&detail_html, &detail_url) else {
            debug!(url = %detail_url, "no server tab with a player link");
            return Ok(Vec::new());
        };

        debug!(player = %player_url, "fetching player page");
        let player_html = self.client.fetch(&player_url).await?;
        Ok(parse_player_sources(&player_html, &player_url))
    }

    /// Absolute page URL for user input that may be site-relative
    fn page_url(&self, url: &str) -> Result<String> {
        absolutize(self.origin(), url).ok_or_else(|| FaselError::InvalidUrl(url.to_string()))
    }
}

/// Input that names a page rather than carrying its markup
fn looks_like_url(input: &str) -> bool {
    is_absolute(input) || (input.starts_with('/') && !input.contains(char::is_whitespace))
}
