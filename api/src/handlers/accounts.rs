//! Account handlers
//!
//! Registration, login and logout.

use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderValue},
    response::{IntoResponse, Response},
    Extension, Form, Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::app::RegistrationForm;
use crate::auth::{clear_session_cookie, session_cookie, CurrentUser, LOGIN_PATH};
use crate::error::{AppError, DomainError, FieldErrors};
use crate::handlers::{see_other, wants_json};
use crate::pages::{render_login_form, render_register_form};
use crate::AppState;

pub const REGISTERED_MESSAGE: &str = "Registration successful! You can now log in.";
pub const LOGGED_IN_MESSAGE: &str = "You have successfully logged in.";
pub const LOGGED_OUT_MESSAGE: &str = "You have been logged out.";

/// Submitted login form
#[derive(Debug, Default, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Serialize)]
pub struct RegisterFormResponse {
    pub username: String,
    pub email: String,
    pub errors: FieldErrors,
}

#[derive(Serialize)]
pub struct LoginFormResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

fn register_form_response(
    headers: &HeaderMap,
    form: &RegistrationForm,
    errors: FieldErrors,
) -> Response {
    if wants_json(headers) {
        Json(RegisterFormResponse {
            username: form.username.clone(),
            email: form.email.clone(),
            errors,
        })
        .into_response()
    } else {
        render_register_form(&errors, &form.username, &form.email).into_response()
    }
}

fn login_form_response(headers: &HeaderMap, error_message: Option<&str>) -> Response {
    if wants_json(headers) {
        Json(LoginFormResponse {
            error_message: error_message.map(str::to_string),
        })
        .into_response()
    } else {
        render_login_form(error_message).into_response()
    }
}

fn with_cookie(mut response: Response, cookie: &str) -> Result<Response, AppError> {
    let value = HeaderValue::from_str(cookie)
        .map_err(|e| AppError::Internal(format!("Invalid cookie header: {}", e)))?;
    response.headers_mut().append(header::SET_COOKIE, value);
    Ok(response)
}

/// GET /register/
pub async fn register_form(headers: HeaderMap) -> Response {
    register_form_response(&headers, &RegistrationForm::default(), FieldErrors::new())
}

/// POST /register/
///
/// Creates the account and redirects to the login page. Invalid input
/// re-renders the form with field-level messages.
pub async fn register(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<RegistrationForm>,
) -> Result<Response, AppError> {
    match state.auth_service.register(&form).await {
        Ok(_) => Ok(see_other(&headers, LOGIN_PATH, Some(REGISTERED_MESSAGE))),
        Err(AppError::Domain(DomainError::InvalidFields(errors))) => {
            Ok(register_form_response(&headers, &form, errors))
        }
        Err(e) => Err(e),
    }
}

/// GET /login/
pub async fn login_form(headers: HeaderMap) -> Response {
    login_form_response(&headers, None)
}

/// POST /login/
///
/// Opens a session, sets the session cookie and redirects to the index.
pub async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    match state.auth_service.login(&form.username, &form.password).await {
        Ok((_, session)) => {
            let max_age = (session.expires_at - Utc::now()).num_seconds().max(0);
            let cookie = session_cookie(&session.token, max_age, state.config.secure_cookies);
            with_cookie(see_other(&headers, "/", Some(LOGGED_IN_MESSAGE)), &cookie)
        }
        Err(AppError::Domain(DomainError::Unauthorized(message))) => {
            tracing::info!(username = %form.username, "Failed login attempt");
            Ok(login_form_response(&headers, Some(&message)))
        }
        Err(e) => Err(e),
    }
}

/// GET /logout/
///
/// Requires a session (see `require_session`). Ends it, clears the cookie and
/// redirects to the login page.
pub async fn logout(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    state.auth_service.logout(&current.token).await?;

    let cookie = clear_session_cookie(state.config.secure_cookies);
    with_cookie(see_other(&headers, LOGIN_PATH, Some(LOGGED_OUT_MESSAGE)), &cookie)
}
