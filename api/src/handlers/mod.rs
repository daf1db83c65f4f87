//! HTTP handlers
//!
//! Axum request handlers for the poll pages, accounts and the external feed.
//! Every page answers JSON when the client asks for it and plain text
//! otherwise.

pub mod accounts;
pub mod external;
pub mod polls;

use axum::{
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Redirect, Response},
    Json,
};
use serde::Serialize;

pub use accounts::{login, login_form, logout, register, register_form};
pub use external::external_data;
pub use polls::{detail, index, results, vote};

/// Check if the client wants JSON response
pub fn wants_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.contains("application/json"))
        .unwrap_or(false)
}

/// Body of a redirect sent to JSON clients
#[derive(Serialize)]
pub struct RedirectResponse {
    pub redirect: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// 303 redirect after a form post.
///
/// JSON clients also get the target and the flash message in the body.
pub fn see_other(headers: &HeaderMap, location: &str, message: Option<&str>) -> Response {
    if let Some(message) = message {
        tracing::debug!(location, message, "Redirecting");
    }

    if wants_json(headers) {
        (
            StatusCode::SEE_OTHER,
            [(header::LOCATION, location.to_string())],
            Json(RedirectResponse {
                redirect: location.to_string(),
                message: message.map(str::to_string),
            }),
        )
            .into_response()
    } else {
        Redirect::to(location).into_response()
    }
}
