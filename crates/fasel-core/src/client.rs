//! HTTP client for FaselHD
//!
//! Fetches pages directly or through a URL-rewriting proxy, with browser-like
//! headers. A failed request is reported once; there are no retries.

use std::time::Duration;

use reqwest::Method;
use reqwest::header::{ACCEPT_LANGUAGE, HeaderMap, HeaderValue, REFERER};
use tracing::debug;

use crate::config::SiteConfig;
use crate::error::{FaselError, Result};
use crate::url::build_proxied_url;

const DEFAULT_ACCEPT_LANGUAGE: &str = "ar,en-US;q=0.8,en;q=0.6";

/// Per-request options for [`FaselClient::fetch_with`]
#[derive(Debug, Clone, Default)]
pub struct FetchOptions {
    /// HTTP method (default: GET)
    pub method: Method,
    /// Extra headers, added on top of the client defaults
    pub headers: HeaderMap,
    /// Request body, rarely used
    pub body: Option<String>,
}

/// HTTP client wrapper for the site
///
/// Handles all HTTP communication, including:
/// - Proxy rewriting when a proxy is configured
/// - Browser-like `User-Agent` and `Referer` headers
/// - Mapping non-success statuses to [`FaselError::Status`]
pub struct FaselClient {
    client: reqwest::Client,
    config: SiteConfig,
}

impl FaselClient {
    /// Create a new client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(SiteConfig::default())
    }

    /// Create a new client with custom configuration
    ///
    /// # Errors
    /// - `InvalidUrl` if the origin or proxy endpoint is not an absolute
    ///   http(s) URL, or the referer is not a valid header value
    /// - `Transport` if the underlying client cannot be built
    pub fn with_config(config: SiteConfig) -> Result<Self> {
        config.validate()?;

        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT_LANGUAGE,
            HeaderValue::from_static(DEFAULT_ACCEPT_LANGUAGE),
        );
        let referer = config.referer();
        headers.insert(
            REFERER,
            HeaderValue::from_str(&referer)
                .map_err(|_| FaselError::InvalidUrl(format!("bad referer: {}", referer)))?,
        );

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_str())
            .cookie_store(true)
            .default_headers(headers)
            .build()?;

        Ok(Self { client, config })
    }

    /// Configuration this client was built with
    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    /// Fetch a page with GET
    ///
    /// # Arguments
    /// * `url` - Absolute target URL; proxied when a proxy is configured
    ///
    /// # Returns
    /// The response body as text
    ///
    /// # Errors
    /// - `Status` - Server answered with a non-success status
    /// - `Transport` - Network, TLS or timeout failure
    pub async fn fetch(&self, url: &str) -> Result<String> {
        self.fetch_with(url, FetchOptions::default()).await
    }

    /// Fetch a page with explicit method, headers and body
    pub async fn fetch_with(&self, url: &str, options: FetchOptions) -> Result<String> {
        let request_url = self.request_url(url);
        debug!(method = %options.method, url, via = %request_url, "fetching");

        let mut request = self
            .client
            .request(options.method, &request_url)
            .headers(options.headers);
        if let Some(body) = options.body {
            request = request.body(body);
        }

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(FaselError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(response.text().await?)
    }

    /// URL actually requested: the target itself or its proxied form
    pub fn request_url(&self, url: &str) -> String {
        match &self.config.proxy {
            Some(proxy) => build_proxied_url(proxy, url),
            None => url.to_string(),
        }
    }
}
