//! Paginated listing of a user's public gists.

use tracing::{debug, warn};

use crate::api::GistApi;
use crate::error::FailureReason;
use crate::models::GistSummary;

/// Every public gist of a user in listing order, or why there are none.
pub type GistListing = Result<Vec<GistSummary>, FailureReason>;

/// Walk the listing pages of `username` until a short or empty page.
///
/// Any failing page fails the whole listing; a 404 means the user does not
/// exist, anything else is an upstream error. No partial listings are
/// returned.
pub async fn list_gists(
    api: &dyn GistApi,
    username: &str,
    per_page: u32,
    max_pages: u32,
) -> GistListing {
    let mut gists = Vec::new();

    for page in 1..=max_pages {
        let batch = match api.list_gists_page(username, page, per_page).await {
            Ok(batch) => batch,
            Err(e) if e.is_not_found() => {
                debug!(username, page, "Gist listing returned 404");
                return Err(FailureReason::UserNotFound);
            }
            Err(e) => {
                warn!(username, page, error = %e, "Gist listing failed");
                return Err(FailureReason::upstream(&e));
            }
        };

        let received = batch.len();
        debug!(username, page, received, "Fetched gist listing page");
        gists.extend(batch);

        if received < per_page as usize {
            break;
        }
        if page == max_pages {
            warn!(
                username,
                max_pages, "Stopped listing at the page cap; remaining gists are not searched"
            );
        }
    }

    if gists.is_empty() {
        return Err(FailureReason::NoPublicGists);
    }
    Ok(gists)
}
