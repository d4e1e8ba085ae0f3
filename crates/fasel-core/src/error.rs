//! Error types for the FaselHD scraper
//!
//! Fetch failures are typed so the façade can log them precisely before
//! downgrading them to empty results. Markup that lacks an expected element
//! is never an error.

use serde::{Serialize, Serializer};
use thiserror::Error;

/// Error type for all FaselHD scraper operations
///
/// Implements Display for human-readable messages and Serialize
/// for Tauri command compatibility.
#[derive(Error, Debug)]
pub enum FaselError {
    /// Network-level failure: DNS, TLS, timeout or body read
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("HTTP {status} for {url}")]
    Status { status: u16, url: String },

    /// Base, proxy or target URL could not be used
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Search query was empty or whitespace only
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// Configuration file missing or malformed
    #[error("Configuration error: {0}")]
    Config(String),
}

impl FaselError {
    /// HTTP status code carried by the error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            FaselError::Status { status, .. } => Some(*status),
            FaselError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

impl Serialize for FaselError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

/// Result type alias for FaselHD operations
pub type Result<T> = std::result::Result<T, FaselError>;
