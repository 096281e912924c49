//! In-memory `GistApi` that records every call.

use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;
use std::time::Duration;

use super::{ApiError, GistApi};
use crate::models::{FileRef, GistSummary};

enum PageReply {
    Gists(Vec<GistSummary>),
    Status(u16),
}

/// Users without registered pages answer 404; pages past the registered
/// ones answer with an empty array, like the real listing endpoint.
#[derive(Default)]
pub struct FakeGistApi {
    users: HashMap<String, Vec<PageReply>>,
    files: HashMap<String, Result<String, u16>>,
    delay: Option<Duration>,
    page_calls: Mutex<Vec<(String, u32, u32)>>,
    fetch_calls: Mutex<Vec<String>>,
}

impl FakeGistApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a user whose listing pages (1-based) return `pages` in order.
    pub fn with_user(mut self, username: &str, pages: Vec<Vec<GistSummary>>) -> Self {
        let pages = pages.into_iter().map(PageReply::Gists).collect();
        self.users.insert(username.to_string(), pages);
        self
    }

    /// Make `page` of an already registered user fail with `status`.
    pub fn with_page_status(mut self, username: &str, page: u32, status: u16) -> Self {
        let pages = self.users.entry(username.to_string()).or_default();
        let index = (page - 1) as usize;
        while pages.len() <= index {
            pages.push(PageReply::Gists(Vec::new()));
        }
        pages[index] = PageReply::Status(status);
        self
    }

    pub fn with_file(mut self, raw_url: &str, content: &str) -> Self {
        self.files.insert(raw_url.to_string(), Ok(content.to_string()));
        self
    }

    pub fn with_file_status(mut self, raw_url: &str, status: u16) -> Self {
        self.files.insert(raw_url.to_string(), Err(status));
        self
    }

    /// Delay every call, for deadline tests.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn page_calls(&self) -> Vec<(String, u32, u32)> {
        self.page_calls.lock().unwrap().clone()
    }

    pub fn fetch_calls(&self) -> Vec<String> {
        self.fetch_calls.lock().unwrap().clone()
    }

    async fn pause(&self) {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl GistApi for FakeGistApi {
    async fn list_gists_page(
        &self,
        username: &str,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<GistSummary>, ApiError> {
        self.page_calls
            .lock()
            .unwrap()
            .push((username.to_string(), page, per_page));
        self.pause().await;

        let url = format!("fake://users/{}/gists?page={}", username, page);
        let Some(pages) = self.users.get(username) else {
            return Err(ApiError::Status { status: 404, url });
        };

        match pages.get((page - 1) as usize) {
            Some(PageReply::Gists(gists)) => Ok(gists.clone()),
            Some(PageReply::Status(status)) => Err(ApiError::Status {
                status: *status,
                url,
            }),
            None => Ok(Vec::new()),
        }
    }

    async fn fetch_raw(&self, url: &str) -> Result<String, ApiError> {
        self.fetch_calls.lock().unwrap().push(url.to_string());
        self.pause().await;

        match self.files.get(url) {
            Some(Ok(content)) => Ok(content.clone()),
            Some(Err(status)) => Err(ApiError::Status {
                status: *status,
                url: url.to_string(),
            }),
            None => Err(ApiError::Status {
                status: 404,
                url: url.to_string(),
            }),
        }
    }
}

/// A gist whose files are `(filename, raw_url)` pairs.
pub fn gist(html_url: &str, files: &[(&str, &str)]) -> GistSummary {
    GistSummary {
        html_url: html_url.to_string(),
        truncated: false,
        files: files
            .iter()
            .map(|(name, raw_url)| {
                (
                    name.to_string(),
                    FileRef {
                        raw_url: raw_url.to_string(),
                    },
                )
            })
            .collect::<BTreeMap<_, _>>(),
    }
}

pub fn truncated_gist(html_url: &str, files: &[(&str, &str)]) -> GistSummary {
    GistSummary {
        truncated: true,
        ..gist(html_url, files)
    }
}

/// `count` distinct single-file gists, numbered from `start`.
pub fn numbered_gists(start: usize, count: usize) -> Vec<GistSummary> {
    (start..start + count)
        .map(|i| {
            gist(
                &format!("https://gist.github.com/{}", i),
                &[(
                    "file.txt",
                    format!("https://gist.githubusercontent.com/raw/{}", i).as_str(),
                )],
            )
        })
        .collect()
}
