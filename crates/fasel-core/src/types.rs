//! Core data types for the FaselHD scraper
//!
//! Records handed to the host. Missing values are empty strings so the
//! serialized shape never changes.

use serde::{Deserialize, Serialize};

/// One title card from a search listing
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SearchHit {
    /// Cleaned title text
    pub title: String,

    /// Absolute URL of the title's page
    pub href: String,

    /// Absolute poster URL, or empty
    pub image: String,
}

/// Details scraped from a title page
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DetailRecord {
    pub title: String,
    pub description: String,

    /// Absolute poster URL, or empty
    pub image: String,

    /// Four-digit air year, or empty
    pub airdate: String,

    /// Alternate titles and taxonomy entries, comma separated
    pub aliases: String,
}

impl DetailRecord {
    /// True when nothing at all was found on the page
    pub fn is_empty(&self) -> bool {
        self.title.is_empty()
            && self.description.is_empty()
            && self.image.is_empty()
            && self.airdate.is_empty()
            && self.aliases.is_empty()
    }
}

/// One episode link
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Episode {
    /// Absolute URL of the episode page
    pub href: String,

    /// Episode number as decimal text (e.g., "12")
    pub number: String,
}

impl Episode {
    /// Numeric value of `number`, 0 if it does not parse
    pub fn number_value(&self) -> u32 {
        self.number.parse().unwrap_or(0)
    }
}

/// A playable media URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamSource {
    /// Absolute media URL
    pub url: String,

    /// True when `url` ends in `.m3u8`
    #[serde(rename = "isM3U8")]
    pub is_m3u8: bool,

    /// Quality label from the player config, "auto" when absent
    pub quality: String,
}

impl StreamSource {
    /// Build a source, tagging HLS playlists and defaulting the quality label
    pub fn new(url: impl Into<String>, quality: Option<&str>) -> Self {
        let url = url.into();
        let path = url.split(['?', '#']).next().unwrap_or(&url);
        let is_m3u8 = path.to_ascii_lowercase().ends_with(".m3u8");
        let quality = quality
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .unwrap_or("auto")
            .to_string();

        Self {
            url,
            is_m3u8,
            quality,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stream_source_serializes_host_field_names() {
        let source = StreamSource::new("https://cdn.example/master.m3u8", None);
        let json = serde_json::to_value(&source).expect("Serialization should succeed");

        assert_eq!(json["url"], "https://cdn.example/master.m3u8");
        assert_eq!(json["isM3U8"], true);
        assert_eq!(json["quality"], "auto");
    }

    #[test]
    fn test_stream_source_mp4_is_not_m3u8() {
        let source = StreamSource::new("https://cdn.example/movie.mp4", Some("720p"));
        assert!(!source.is_m3u8);
        assert_eq!(source.quality, "720p");
    }

    #[test]
    fn test_stream_source_blank_quality_defaults() {
        let source = StreamSource::new("https://cdn.example/a.M3U8", Some("  "));
        assert!(source.is_m3u8);
        assert_eq!(source.quality, "auto");
    }

    #[test]
    fn test_detail_record_default_is_empty() {
        let record = DetailRecord::default();
        assert!(record.is_empty());

        let json = serde_json::to_string(&record).expect("Serialization should succeed");
        assert_eq!(
            json,
            r#"{"title":"","description":"","image":"","airdate":"","aliases":""}"#
        );
    }

    #[test]
    fn test_detail_record_with_airdate_is_not_empty() {
        let record = DetailRecord {
            airdate: "2019".to_string(),
            ..DetailRecord::default()
        };
        assert!(!record.is_empty());
    }

    #[test]
    fn test_episode_number_value() {
        let episode = Episode {
            href: "https://www.faselhds.xyz/episodes/x".to_string(),
            number: "12".to_string(),
        };
        assert_eq!(episode.number_value(), 12);
    }
}
