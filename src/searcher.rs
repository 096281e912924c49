//! Fetches gist file contents and matches them against a pattern.

use futures::stream::{self, StreamExt};
use regex::Regex;
use tracing::{debug, warn};

use crate::api::GistApi;
use crate::models::GistSummary;

/// Matches plus what the search could not look at.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SearchOutcome {
    /// `html_url` of the owning gist, once per matching file, in gist order.
    pub matches: Vec<String>,
    /// Gists skipped because the platform marked them truncated.
    pub skipped_truncated: usize,
    /// Files whose raw content could not be fetched.
    pub failed_fetches: usize,
}

enum FileCheck<'a> {
    Matched(&'a str),
    Missed,
    Failed,
}

/// True if `pattern` matches at the very start of `content`.
///
/// Leftmost-first search returns the earliest starting match, so a match
/// exists at offset 0 exactly when the first match starts there.
pub fn matches_at_start(pattern: &Regex, content: &str) -> bool {
    pattern.find(content).is_some_and(|m| m.start() == 0)
}

/// Search every file of every non-truncated gist, at most `concurrency`
/// fetches in flight. A failed fetch counts as no match for that file.
pub async fn search_gists(
    api: &dyn GistApi,
    gists: &[GistSummary],
    pattern: &Regex,
    concurrency: usize,
) -> SearchOutcome {
    let mut outcome = SearchOutcome::default();
    let mut files = Vec::new();

    for gist in gists {
        if gist.truncated {
            debug!(gist = %gist.html_url, "Skipping truncated gist");
            outcome.skipped_truncated += 1;
            continue;
        }
        for (filename, file) in &gist.files {
            files.push((gist.html_url.as_str(), filename.as_str(), file.raw_url.as_str()));
        }
    }

    let checks: Vec<FileCheck<'_>> = stream::iter(files)
        .map(|(html_url, filename, raw_url)| async move {
            match api.fetch_raw(raw_url).await {
                Ok(content) if matches_at_start(pattern, &content) => {
                    debug!(gist = html_url, filename, "File matched");
                    FileCheck::Matched(html_url)
                }
                Ok(_) => FileCheck::Missed,
                Err(e) => {
                    warn!(gist = html_url, filename, error = %e, "Failed to fetch gist file");
                    FileCheck::Failed
                }
            }
        })
        .buffered(concurrency.max(1))
        .collect()
        .await;

    for check in checks {
        match check {
            FileCheck::Matched(html_url) => outcome.matches.push(html_url.to_string()),
            FileCheck::Missed => {}
            FileCheck::Failed => outcome.failed_fetches += 1,
        }
    }

    outcome
}
