//! External data handler
//!
//! Paginated view over the upstream feed.

use axum::{
    extract::{Query, State},
    http::HeaderMap,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::domain::entities::{ExternalPost, Page};
use crate::error::AppError;
use crate::handlers::wants_json;
use crate::pages::render_external_page;
use crate::AppState;

/// Query params for the external feed
#[derive(Debug, Default, Deserialize)]
pub struct ExternalDataParams {
    /// Raw 1-based page number; validated by the paginator
    pub page: Option<String>,
}

#[derive(Serialize)]
pub struct ExternalDataResponse {
    #[serde(flatten)]
    pub page: Page<ExternalPost>,
    pub next_page_number: Option<usize>,
    pub previous_page_number: Option<usize>,
}

impl From<Page<ExternalPost>> for ExternalDataResponse {
    fn from(page: Page<ExternalPost>) -> Self {
        Self {
            next_page_number: page.next_page_number(),
            previous_page_number: page.previous_page_number(),
            page,
        }
    }
}

/// GET /external-data/
///
/// Upstream failures come back as JSON errors: a non-success upstream status
/// is forwarded as-is, anything else is a 500.
pub async fn external_data(
    State(state): State<AppState>,
    Query(params): Query<ExternalDataParams>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let page = state.feed_service.page(params.page.as_deref()).await?;

    if wants_json(&headers) {
        Ok(Json(ExternalDataResponse::from(page)).into_response())
    } else {
        Ok(render_external_page(&page).into_response())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{Paginator, EXTERNAL_PAGE_SIZE};
    use crate::test_utils::test_posts;

    #[test]
    fn response_flattens_page() {
        let page = Paginator::new(test_posts(15), EXTERNAL_PAGE_SIZE).page(1);

        let json = serde_json::to_value(ExternalDataResponse::from(page)).unwrap();

        assert_eq!(json["number"], 1);
        assert_eq!(json["num_pages"], 2);
        assert_eq!(json["items"].as_array().unwrap().len(), 10);
        assert_eq!(json["items"][0]["userId"], 1);
        assert_eq!(json["next_page_number"], 2);
        assert!(json["previous_page_number"].is_null());
    }
}
