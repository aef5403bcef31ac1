//! Domain types for the crosspost pipeline.
//!
//! Wire names follow the site's published JSON contracts (`publishTimestamp`,
//! `mediumResponse`, `contentFormat`, `canonicalUrl`); Rust field names stay
//! snake_case behind `rename_all = "camelCase"`.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// The stable identifier shared between the site index and the persisted
/// publish records. Assigned once by the upstream site and never reused.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArticleId(pub String);

impl ArticleId {
    /// An empty id marks a malformed index entry; such entries are excluded
    /// from all processing.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ArticleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for ArticleId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ArticleId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Body format of an article payload, passed through to the publishing sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentFormat {
    Html,
    Markdown,
}

impl fmt::Display for ContentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentFormat::Html => write!(f, "html"),
            ContentFormat::Markdown => write!(f, "markdown"),
        }
    }
}

// ---------------------------------------------------------------------------
// Domain structs
// ---------------------------------------------------------------------------

/// One article already committed to the publishing platform.
///
/// Created only on a successful publish, never mutated afterwards. The full
/// record set is persisted wholesale at the end of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishedRecord {
    /// Canonical URL from the fetched article payload, not the index URL.
    pub url: String,
    pub id: ArticleId,
    pub publish_timestamp: DateTime<Utc>,
    /// The sink's response payload, stored verbatim for audit.
    pub medium_response: serde_json::Value,
}

/// One candidate article announced by the site's index. Ephemeral; produced
/// fresh each run and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexEntry {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub id: ArticleId,
}

/// Full payload for one article, fetched lazily for entries selected for
/// publishing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleContent {
    pub title: String,
    pub content_format: ContentFormat,
    pub content: String,
    pub canonical_url: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
