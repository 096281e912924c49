//! Search orchestration: request validation, listing, searching.
//!
//! # CHANGELOG (recent first, max 5 entries)
//! 10/17/2026 - Initial implementation

use regex::Regex;
use std::sync::Arc;
use tracing::info;

use crate::api::GistApi;
use crate::config::SearchConfig;
use crate::error::{FailureReason, SearchFailure};
use crate::lister::list_gists;
use crate::models::{SearchRequest, SearchResult, SearchStatus};
use crate::searcher::search_gists;

/// Gist search service. Holds only immutable configuration and the API
/// handle, so one instance serves all requests concurrently.
pub struct GistSearchService {
    api: Arc<dyn GistApi>,
    config: SearchConfig,
}

impl GistSearchService {
    pub fn new(api: Arc<dyn GistApi>, config: SearchConfig) -> Self {
        Self { api, config }
    }

    /// Borrow a required string field of the request, if `present` accepts it.
    fn required<'a>(
        value: &'a Option<String>,
        name: &str,
        present: fn(&str) -> bool,
    ) -> Result<&'a str, FailureReason> {
        match value.as_deref() {
            Some(v) if present(v) => Ok(v),
            _ => Err(FailureReason::InvalidRequest(format!(
                "{} must be provided",
                name
            ))),
        }
    }

    /// Validate `request`, list the user's gists and search them.
    ///
    /// Validation failures never touch the network. Listing and searching
    /// together run under the configured search deadline.
    pub async fn handle_search(&self, request: SearchRequest) -> Result<SearchResult, SearchFailure> {
        let SearchRequest { username, pattern } = request;
        let fail = |reason| SearchFailure::new(reason, username.clone(), pattern.clone());

        // Whitespace is a meaningful pattern, so only an empty one is missing.
        let user = Self::required(&username, "username", |v| !v.trim().is_empty()).map_err(fail)?;
        let pat = Self::required(&pattern, "pattern", |v| !v.is_empty()).map_err(fail)?;

        let regex =
            Regex::new(pat).map_err(|e| fail(FailureReason::InvalidPattern(e.to_string())))?;

        let deadline = self.config.search_deadline;
        let matches = tokio::time::timeout(deadline, self.run(user, &regex))
            .await
            .map_err(|_| fail(FailureReason::deadline_exceeded(deadline)))?
            .map_err(fail)?;

        Ok(SearchResult {
            matches,
            status: SearchStatus::Success,
            username: user.to_string(),
            pattern: pat.to_string(),
        })
    }

    async fn run(&self, username: &str, pattern: &Regex) -> Result<Vec<String>, FailureReason> {
        let gists = list_gists(
            self.api.as_ref(),
            username,
            self.config.per_page,
            self.config.max_pages,
        )
        .await?;

        let outcome = search_gists(
            self.api.as_ref(),
            &gists,
            pattern,
            self.config.concurrency,
        )
        .await;

        info!(
            username,
            gists = gists.len(),
            matches = outcome.matches.len(),
            skipped_truncated = outcome.skipped_truncated,
            failed_fetches = outcome.failed_fetches,
            "Search complete"
        );

        Ok(outcome.matches)
    }
}
