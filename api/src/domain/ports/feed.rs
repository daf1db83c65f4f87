//! Upstream feed port
//!
//! Abstracts the third-party JSON API behind the external-data view.

use async_trait::async_trait;

use crate::domain::entities::ExternalPost;
use crate::error::FeedError;

#[async_trait]
pub trait FeedClient: Send + Sync {
    /// Fetch the full upstream collection
    async fn fetch_posts(&self) -> Result<Vec<ExternalPost>, FeedError>;
}
