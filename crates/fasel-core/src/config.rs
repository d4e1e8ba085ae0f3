//! Site configuration
//!
//! Target origin, proxy and request headers are injected at construction so
//! the scraper can follow the site across domain changes without a rebuild.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{FaselError, Result};

/// Environment variable holding the path of a TOML config file
pub const CONFIG_ENV_VAR: &str = "FASEL_CONFIG";

const DEFAULT_BASE_URL: &str = "https://www.faselhds.xyz";
const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// URL-rewriting proxy used to get past origin blocking
///
/// The target URL is percent-encoded into the `param` query parameter of
/// `endpoint`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProxyConfig {
    /// Proxy endpoint, e.g. "https://api.allorigins.win/raw"
    pub endpoint: String,
    /// Query parameter carrying the target URL (default: "url")
    #[serde(default = "default_proxy_param")]
    pub param: String,
}

fn default_proxy_param() -> String {
    "url".to_string()
}

/// Process-wide configuration for the scraper
///
/// Every field has a default, so a TOML file only needs the keys it changes:
///
/// ```toml
/// base_url = "https://web184.faselhd.cafe"
/// max_search_pages = 2
///
/// [proxy]
/// endpoint = "https://api.allorigins.win/raw"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Site origin, without trailing slash
    pub base_url: String,
    /// Optional proxy; requests go direct when absent
    pub proxy: Option<ProxyConfig>,
    /// Browser User-Agent sent with every request
    pub user_agent: String,
    /// Referer header; the site origin when absent
    pub referer: Option<String>,
    /// Request timeout in seconds (default: 30)
    pub timeout_secs: u64,
    /// Upper bound on search result pages fetched per query (default: 3)
    pub max_search_pages: u32,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            proxy: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            referer: None,
            timeout_secs: 30,
            max_search_pages: 3,
        }
    }
}

impl SiteConfig {
    /// Config for a different origin, other fields default
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Parse a config from TOML text
    ///
    /// # Errors
    /// - `Config` if the TOML is malformed
    /// - `InvalidUrl` if `base_url` or the proxy endpoint is not an absolute
    ///   http(s) URL
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: SiteConfig =
            toml::from_str(text).map_err(|e| FaselError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| FaselError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&text)
    }

    /// Load the file named by `FASEL_CONFIG`, or the defaults when unset
    pub fn from_env() -> Result<Self> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Site origin with any trailing slash removed
    pub fn origin(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    /// Referer header value
    pub fn referer(&self) -> String {
        self.referer
            .clone()
            .unwrap_or_else(|| format!("{}/", self.origin()))
    }

    /// Checks that the origin and proxy endpoint are absolute http(s) URLs
    ///
    /// # Errors
    /// - `InvalidUrl` naming the offending URL
    pub fn validate(&self) -> Result<()> {
        check_http_url(&self.base_url)?;
        if let Some(proxy) = &self.proxy {
            check_http_url(&proxy.endpoint)?;
        }
        Ok(())
    }
}

fn check_http_url(raw: &str) -> Result<()> {
    let url = reqwest::Url::parse(raw)
        .map_err(|e| FaselError::InvalidUrl(format!("{}: {}", raw, e)))?;
    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
        return Err(FaselError::InvalidUrl(raw.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.base_url, "https://www.faselhds.xyz");
        assert_eq!(config.proxy, None);
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.max_search_pages, 3);
        assert_eq!(config.referer(), "https://www.faselhds.xyz/");
    }

    #[test]
    fn test_origin_strips_trailing_slash() {
        let config = SiteConfig::with_base_url("https://example.org/");
        assert_eq!(config.origin(), "https://example.org");
    }

    #[test]
    fn test_from_toml_partial() {
        let config = SiteConfig::from_toml_str(
            r#"
            base_url = "https://web184.faselhd.cafe"
            max_search_pages = 1

            [proxy]
            endpoint = "https://proxy.example/raw"
            "#,
        )
        .unwrap();

        assert_eq!(config.base_url, "https://web184.faselhd.cafe");
        assert_eq!(config.max_search_pages, 1);
        assert_eq!(config.timeout_secs, 30);
        let proxy = config.proxy.unwrap();
        assert_eq!(proxy.endpoint, "https://proxy.example/raw");
        assert_eq!(proxy.param, "url");
    }

    #[test]
    fn test_from_toml_empty_uses_defaults() {
        let config = SiteConfig::from_toml_str("").unwrap();
        assert_eq!(config, SiteConfig::default());
    }

    #[test]
    fn test_from_toml_malformed() {
        let result = SiteConfig::from_toml_str("base_url = ");
        assert!(matches!(result, Err(FaselError::Config(_))));
    }

    #[test]
    fn test_from_toml_rejects_relative_base() {
        let result = SiteConfig::from_toml_str(r#"base_url = "/relative""#);
        assert!(matches!(result, Err(FaselError::InvalidUrl(_))));
    }

    #[test]
    fn test_from_toml_rejects_bad_proxy_endpoint() {
        let result = SiteConfig::from_toml_str("[proxy]\nendpoint = \"not a url\"");
        match result {
            Err(FaselError::InvalidUrl(msg)) => assert!(msg.contains("not a url")),
            other => panic!("Expected InvalidUrl error, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_rejects_bad_base_url() {
        let config = SiteConfig::with_base_url("not a url");
        assert!(matches!(config.validate(), Err(FaselError::InvalidUrl(_))));
    }

    #[test]
    fn test_validate_rejects_non_http_proxy() {
        let config = SiteConfig {
            proxy: Some(ProxyConfig {
                endpoint: "ftp://proxy.example/raw".to_string(),
                param: "url".to_string(),
            }),
            ..SiteConfig::default()
        };
        assert!(matches!(config.validate(), Err(FaselError::InvalidUrl(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let result = SiteConfig::load("/nonexistent/fasel.toml");
        assert!(matches!(result, Err(FaselError::Config(_))));
    }

    #[test]
    fn test_custom_referer() {
        let config = SiteConfig {
            referer: Some("https://google.com/".to_string()),
            ..SiteConfig::default()
        };
        assert_eq!(config.referer(), "https://google.com/");
    }
}
