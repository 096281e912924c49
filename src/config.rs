//! Immutable search configuration shared by all request handlers.

use std::time::Duration;

/// Largest page size the gist listing endpoint accepts.
pub const MAX_PER_PAGE: u32 = 100;

/// Most gists the listing endpoint serves for one user.
pub const MAX_LISTED_GISTS: u32 = 3000;

#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Gists requested per listing page.
    pub per_page: u32,
    /// Hard cap on listing pages fetched for one user. Never below what
    /// `per_page` needs to reach `MAX_LISTED_GISTS`.
    pub max_pages: u32,
    /// Simultaneous raw-content fetches per search.
    pub concurrency: usize,
    /// Overall deadline for listing plus searching.
    pub search_deadline: Duration,
}

impl SearchConfig {
    /// Validate the settings. `max_pages` is raised to cover the platform
    /// listing limit at the given `per_page`.
    pub fn new(
        per_page: u32,
        max_pages: u32,
        concurrency: usize,
        search_deadline: Duration,
    ) -> Result<Self, ConfigError> {
        if per_page == 0 || per_page > MAX_PER_PAGE {
            return Err(ConfigError::InvalidValue("per_page"));
        }
        if max_pages == 0 {
            return Err(ConfigError::InvalidValue("max_pages"));
        }
        if concurrency == 0 {
            return Err(ConfigError::InvalidValue("concurrency"));
        }
        if search_deadline.is_zero() {
            return Err(ConfigError::InvalidValue("search_deadline"));
        }

        Ok(Self {
            per_page,
            max_pages: max_pages.max(MAX_LISTED_GISTS.div_ceil(per_page)),
            concurrency,
            search_deadline,
        })
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            per_page: MAX_PER_PAGE,
            max_pages: 30,
            concurrency: 8,
            search_deadline: Duration::from_secs(120),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for setting: {0}")]
    InvalidValue(&'static str),
}
