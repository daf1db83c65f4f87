//! Upstream feed HTTP client

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::domain::entities::ExternalPost;
use crate::domain::ports::FeedClient;
use crate::error::FeedError;

/// reqwest implementation of the FeedClient port
pub struct HttpFeedClient {
    http: Client,
    url: String,
}

impl HttpFeedClient {
    pub fn new(url: String, timeout: Duration) -> Result<Self, FeedError> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("pollster-api/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { http, url })
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, FeedError> {
        let status = response.status();

        if status.is_success() {
            response
                .json()
                .await
                .map_err(|e| FeedError::Deserialization(e.to_string()))
        } else {
            Err(FeedError::Status {
                status: status.as_u16(),
            })
        }
    }
}

#[async_trait]
impl FeedClient for HttpFeedClient {
    async fn fetch_posts(&self) -> Result<Vec<ExternalPost>, FeedError> {
        tracing::debug!(url = %self.url, "Fetching upstream feed");

        let response = self.http.get(&self.url).send().await?;
        self.handle_response(response).await
    }
}
