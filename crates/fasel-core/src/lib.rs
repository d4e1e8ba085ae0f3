//! FaselHD Scraper Core Library
//!
//! Provides an async API for searching titles, reading details and episode
//! lists, and resolving playable stream URLs from the FaselHD streaming site.
//!
//! # Overview
//!
//! - [`FaselClient`] fetches pages, directly or through a rewriting proxy
//! - [`parser`] turns markup into records, trying each known page template
//! - [`FaselScraper`] ties both together behind four host-facing operations
//!
//! # Example
//!
//! ```no_run
//! use fasel_core::{FaselScraper, Result, SiteConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let scraper = FaselScraper::with_config(SiteConfig::from_env()?)?;
//!
//!     let hits = scraper.search("the office").await;
//!     if let Some(hit) = hits.first() {
//!         if let Some(details) = scraper.get_details(&hit.href).await {
//!             println!("{} ({})", details.title, details.airdate);
//!         }
//!         for episode in scraper.get_episodes(&hit.href).await {
//!             println!("episode {}: {}", episode.number, episode.href);
//!         }
//!         for source in scraper.get_stream_url(&hit.href).await {
//!             println!("{} [{}]", source.url, source.quality);
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Failure policy
//!
//! The host-facing methods never return errors: fetch failures are logged
//! through `tracing` and turned into empty lists or `None`. Use the `try_*`
//! variants to see the underlying [`FaselError`].
//!
//! Stream URLs are signed by the CDN and expire; do not cache them.

mod client;
mod config;
mod error;
pub mod parser;
mod scraper;
mod types;
pub mod url;

// Re-export client types
pub use client::{FaselClient, FetchOptions};

// Re-export configuration
pub use config::{CONFIG_ENV_VAR, ProxyConfig, SiteConfig};

// Re-export error types
pub use error::{FaselError, Result};

// Re-export parser functions
pub use parser::{parse_details, parse_episodes, parse_player_sources, parse_search_results};

// Re-export main scraper API
pub use scraper::FaselScraper;

// Re-export data types
pub use types::{DetailRecord, Episode, SearchHit, StreamSource};
