//! Remote snippet-hosting API: the operations the search consumes.

mod client;
#[cfg(test)]
pub mod fake;

pub use client::GitHubClient;

use async_trait::async_trait;

use crate::models::GistSummary;

/// Errors returned by the remote API.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{url} returned HTTP {status}")]
    Status { status: u16, url: String },

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("cannot build request URL from base {0}")]
    BaseUrl(String),
}

impl ApiError {
    /// Raw HTTP status, when the remote answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            Self::BaseUrl(_) => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

/// The two remote operations the search pipeline depends on.
#[async_trait]
pub trait GistApi: Send + Sync {
    /// Fetch one page of a user's public gists. Pages are 1-based.
    async fn list_gists_page(
        &self,
        username: &str,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<GistSummary>, ApiError>;

    /// Fetch the literal content of a gist file.
    async fn fetch_raw(&self, url: &str) -> Result<String, ApiError>;
}
