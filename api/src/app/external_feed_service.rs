//! External feed service
//!
//! Fetches the upstream collection and serves it in fixed-size pages.

use std::sync::Arc;

use crate::domain::entities::{ExternalPost, Page, Paginator, EXTERNAL_PAGE_SIZE};
use crate::domain::ports::FeedClient;
use crate::error::AppError;

pub struct ExternalFeedService<FC>
where
    FC: FeedClient + ?Sized,
{
    client: Arc<FC>,
}

impl<FC> ExternalFeedService<FC>
where
    FC: FeedClient + ?Sized,
{
    pub fn new(client: Arc<FC>) -> Self {
        Self { client }
    }

    /// Fetch the upstream feed and return the requested page.
    ///
    /// `page_param` is the raw `page` query value; anything that is not an
    /// integer selects page 1 and out-of-range numbers clamp.
    pub async fn page(&self, page_param: Option<&str>) -> Result<Page<ExternalPost>, AppError> {
        let posts = self.client.fetch_posts().await.map_err(|e| {
            tracing::warn!(error = %e, "Upstream feed request failed");
            AppError::Feed(e)
        })?;

        let paginator = Paginator::new(posts, EXTERNAL_PAGE_SIZE);
        let page = paginator.page_from_param(page_param);

        tracing::debug!(
            page = page.number,
            num_pages = page.num_pages,
            count = page.count,
            "Serving external feed page"
        );

        Ok(page)
    }
}
