//! FaselHD Tauri Integration
//!
//! Provides a Tauri plugin exposing the scraper to a host media application.
//!
//! # Usage
//!
//! Register the plugin in your Tauri application:
//!
//! ```ignore
//! fn main() {
//!     tauri::Builder::default()
//!         .plugin(fasel_tauri::init())
//!         .run(tauri::generate_context!())
//!         .expect("error while running tauri application");
//! }
//! ```
//!
//! Then invoke commands from the frontend:
//!
//! ```javascript
//! import { invoke } from '@tauri-apps/api/core';
//!
//! const hits = await invoke('plugin:fasel|search', { query: 'dark' });
//! const details = await invoke('plugin:fasel|get_details', { url: hits[0].href });
//! const episodes = await invoke('plugin:fasel|get_episodes', { url: hits[0].href });
//! const streams = await invoke('plugin:fasel|get_stream_url', { urlOrMarkup: episodes[0].href });
//! ```
//!
//! The site origin and proxy come from the TOML file named by `FASEL_CONFIG`,
//! or the built-in defaults.

use std::sync::Arc;

use fasel_core::{FaselScraper, SiteConfig};
use tauri::{
    Manager, Runtime,
    plugin::{Builder, TauriPlugin},
};
use tracing::info;

mod commands;

/// Shared scraper handle managed by Tauri
///
/// The scraper holds no mutable state, so commands share it through an
/// `Arc` without locking.
pub struct ScraperState {
    scraper: Arc<FaselScraper>,
}

impl ScraperState {
    /// Create a state from the environment configuration
    ///
    /// # Errors
    /// Returns error string if the config file is invalid or the HTTP client
    /// cannot be created
    pub fn new() -> Result<Self, String> {
        let config = SiteConfig::from_env().map_err(|e| e.to_string())?;
        Self::with_config(config)
    }

    /// Create a state for an explicit configuration
    pub fn with_config(config: SiteConfig) -> Result<Self, String> {
        let scraper = FaselScraper::with_config(config).map_err(|e| e.to_string())?;
        Ok(Self {
            scraper: Arc::new(scraper),
        })
    }

    pub(crate) fn scraper(&self) -> Arc<FaselScraper> {
        Arc::clone(&self.scraper)
    }
}

/// Initialize the fasel plugin
///
/// # Returns
/// A configured TauriPlugin ready to be registered with the Tauri application
pub fn init<R: Runtime>() -> TauriPlugin<R> {
    Builder::new("fasel")
        .invoke_handler(tauri::generate_handler![
            commands::search,
            commands::get_details,
            commands::get_episodes,
            commands::get_stream_url
        ])
        .setup(|app, _api| {
            let state = ScraperState::new().map_err(Box::<dyn std::error::Error>::from)?;
            info!(origin = state.scraper.config().origin(), "fasel plugin ready");
            app.manage(state);
            Ok(())
        })
        .build()
}

// Re-export types for convenience
pub use fasel_core::{DetailRecord, Episode, SearchHit, StreamSource};
