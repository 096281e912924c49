//! Data models for gist listings and the search API.
//!
//! # CHANGELOG (recent first, max 5 entries)
//! 10/17/2026 - Initial implementation

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One gist as returned by `GET /users/{username}/gists`.
///
/// Only the fields the search needs are kept; everything else in the
/// listing payload is ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GistSummary {
    pub html_url: String,
    /// Set by the platform when file contents were elided from the listing.
    #[serde(default)]
    pub truncated: bool,
    #[serde(default)]
    pub files: BTreeMap<String, FileRef>,
}

/// A single file inside a gist.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileRef {
    pub raw_url: String,
}

/// Body of `POST /api/v1/search`.
///
/// Both fields are optional at the serde level so that a missing field is
/// reported as an invalid request instead of a deserialization error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub pattern: Option<String>,
}

/// Successful search response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchResult {
    pub matches: Vec<String>,
    pub status: SearchStatus,
    pub username: String,
    pub pattern: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SearchStatus {
    Success,
}
