//! GitHub REST client for gist listings and raw file content.
//!
//! # CHANGELOG (recent first, max 5 entries)
//! 10/17/2026 - Initial implementation

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use reqwest::{Client, Response};
use std::time::Duration;
use url::Url;

use super::{ApiError, GistApi};
use crate::models::GistSummary;

/// GitHub API client with persistent connection pooling.
pub struct GitHubClient {
    client: Client,
    api_base: Url,
}

impl GitHubClient {
    /// Create a new client against `api_base` (e.g. `https://api.github.com`).
    ///
    /// `timeout` bounds every individual request, listing pages and raw
    /// fetches alike.
    pub fn new(api_base: &str, timeout: Duration) -> Result<Self> {
        let api_base = Url::parse(api_base)
            .with_context(|| format!("Invalid API base URL: {}", api_base))?;
        if api_base.cannot_be_a_base() {
            bail!("API base URL cannot carry a path: {}", api_base);
        }

        let client = Client::builder()
            .pool_max_idle_per_host(5)
            .timeout(timeout)
            .user_agent(concat!("gist-search/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { client, api_base })
    }

    /// `{api_base}/users/{username}/gists?per_page=N&page=P`, with the
    /// username encoded as a single path segment.
    fn gists_url(&self, username: &str, page: u32, per_page: u32) -> Result<Url, ApiError> {
        let mut url = self.api_base.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::BaseUrl(self.api_base.to_string()))?
            .pop_if_empty()
            .extend(["users", username, "gists"]);
        url.query_pairs_mut()
            .append_pair("per_page", &per_page.to_string())
            .append_pair("page", &page.to_string());
        Ok(url)
    }

    /// Turn a non-2xx response into `ApiError::Status`.
    fn check_status(response: Response) -> Result<Response, ApiError> {
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                url: response.url().to_string(),
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl GistApi for GitHubClient {
    async fn list_gists_page(
        &self,
        username: &str,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<GistSummary>, ApiError> {
        let url = self.gists_url(username, page, per_page)?;
        tracing::debug!(%url, "Listing gists");

        let response = self
            .client
            .get(url)
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28")
            .send()
            .await?;

        let gists = Self::check_status(response)?.json().await?;
        Ok(gists)
    }

    async fn fetch_raw(&self, url: &str) -> Result<String, ApiError> {
        let response = self.client.get(url).send().await?;
        let text = Self::check_status(response)?.text().await?;
        Ok(text)
    }
}
