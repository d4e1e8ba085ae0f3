//! URL helper functions for FaselHD
//!
//! Builds search and proxy URLs and turns relative links found in markup
//! into absolute ones.

use reqwest::Url;

use crate::config::ProxyConfig;

/// Builds the search URL for a query and a 1-based result page
///
/// # Example
/// ```
/// use fasel_core::url::build_search_url;
/// let url = build_search_url("https://www.faselhds.xyz", "the office", 1);
/// assert_eq!(url, "https://www.faselhds.xyz/?s=the%20office");
/// let url = build_search_url("https://www.faselhds.xyz", "the office", 2);
/// assert_eq!(url, "https://www.faselhds.xyz/page/2/?s=the%20office");
/// ```
pub fn build_search_url(origin: &str, query: &str, page: u32) -> String {
    let origin = origin.trim_end_matches('/');
    let encoded = urlencoding::encode(query);
    if page <= 1 {
        format!("{}/?s={}", origin, encoded)
    } else {
        format!("{}/page/{}/?s={}", origin, page, encoded)
    }
}

/// Rewrites a target URL so the request goes through a proxy
///
/// # Example
/// ```
/// use fasel_core::ProxyConfig;
/// use fasel_core::url::build_proxied_url;
/// let proxy = ProxyConfig {
///     endpoint: "https://proxy.example/raw".to_string(),
///     param: "url".to_string(),
/// };
/// let url = build_proxied_url(&proxy, "https://www.faselhds.xyz/?s=x");
/// assert_eq!(
///     url,
///     "https://proxy.example/raw?url=https%3A%2F%2Fwww.faselhds.xyz%2F%3Fs%3Dx"
/// );
/// ```
pub fn build_proxied_url(proxy: &ProxyConfig, target: &str) -> String {
    let separator = if proxy.endpoint.contains('?') { '&' } else { '?' };
    format!(
        "{}{}{}={}",
        proxy.endpoint,
        separator,
        proxy.param,
        urlencoding::encode(target)
    )
}

/// Returns true for `http://` and `https://` URLs
pub fn is_absolute(url: &str) -> bool {
    let lower = url.trim_start().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Resolves a link found in markup against the page it came from
///
/// Absolute links are returned untouched. Relative ones (`/a`, `a`, `//host/a`)
/// are joined onto `base`. Empty links, fragments, `javascript:` and `blob:`
/// links yield `None`.
///
/// # Example
/// ```
/// use fasel_core::url::absolutize;
/// let base = "https://www.faselhds.xyz";
/// assert_eq!(absolutize(base, "/a").as_deref(), Some("https://www.faselhds.xyz/a"));
/// assert_eq!(absolutize(base, "http://site/b").as_deref(), Some("http://site/b"));
/// assert_eq!(absolutize(base, ""), None);
/// ```
pub fn absolutize(base: &str, href: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    if is_absolute(href) {
        return Some(href.to_string());
    }

    let lower = href.to_ascii_lowercase();
    if lower.starts_with("javascript:") || lower.starts_with("blob:") || lower.starts_with("data:") {
        return None;
    }

    let base = Url::parse(base).ok()?;
    let joined = base.join(href).ok()?;
    match joined.scheme() {
        "http" | "https" => Some(joined.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORIGIN: &str = "https://www.faselhds.xyz";

    #[test]
    fn test_build_search_url_first_page() {
        let url = build_search_url(ORIGIN, "breaking", 1);
        assert_eq!(url, "https://www.faselhds.xyz/?s=breaking");
    }

    #[test]
    fn test_build_search_url_page_zero_is_first() {
        let url = build_search_url(ORIGIN, "breaking", 0);
        assert_eq!(url, "https://www.faselhds.xyz/?s=breaking");
    }

    #[test]
    fn test_build_search_url_arabic_query() {
        let url = build_search_url("https://www.faselhds.xyz/", "باب الحارة", 3);
        assert_eq!(
            url,
            "https://www.faselhds.xyz/page/3/?s=%D8%A8%D8%A7%D8%A8%20%D8%A7%D9%84%D8%AD%D8%A7%D8%B1%D8%A9"
        );
    }

    #[test]
    fn test_build_proxied_url_with_existing_query() {
        let proxy = ProxyConfig {
            endpoint: "https://proxy.example/get?format=raw".to_string(),
            param: "target".to_string(),
        };
        let url = build_proxied_url(&proxy, "https://a.b/c d");
        assert_eq!(
            url,
            "https://proxy.example/get?format=raw&target=https%3A%2F%2Fa.b%2Fc%20d"
        );
    }

    #[test]
    fn test_absolutize_root_relative() {
        assert_eq!(
            absolutize(ORIGIN, "/movies/x").as_deref(),
            Some("https://www.faselhds.xyz/movies/x")
        );
    }

    #[test]
    fn test_absolutize_path_relative() {
        assert_eq!(
            absolutize(ORIGIN, "movies/x").as_deref(),
            Some("https://www.faselhds.xyz/movies/x")
        );
    }

    #[test]
    fn test_absolutize_relative_to_page() {
        assert_eq!(
            absolutize("https://cdn.example/player/index.php?id=9", "hls/master.m3u8").as_deref(),
            Some("https://cdn.example/player/hls/master.m3u8")
        );
    }

    #[test]
    fn test_absolutize_scheme_relative() {
        assert_eq!(
            absolutize(ORIGIN, "//img.example/p.jpg").as_deref(),
            Some("https://img.example/p.jpg")
        );
    }

    #[test]
    fn test_absolutize_keeps_absolute() {
        assert_eq!(
            absolutize(ORIGIN, "http://site/b").as_deref(),
            Some("http://site/b")
        );
    }

    #[test]
    fn test_absolutize_rejects_non_links() {
        assert_eq!(absolutize(ORIGIN, "   "), None);
        assert_eq!(absolutize(ORIGIN, "#top"), None);
        assert_eq!(absolutize(ORIGIN, "javascript:void(0)"), None);
        assert_eq!(absolutize(ORIGIN, "blob:https://x/1234"), None);
    }

    #[test]
    fn test_absolutize_bad_base() {
        assert_eq!(absolutize("not a url", "/a"), None);
    }
}
