//! Session middleware
//!
//! Resolves the session token from the `sessionid` cookie or an
//! `Authorization: Bearer` header and injects the logged-in user into
//! request extensions.

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, Request},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use crate::domain::entities::User;
use crate::error::AppError;
use crate::AppState;

/// Name of the session cookie
pub const SESSION_COOKIE: &str = "sessionid";

/// Where unauthenticated requests to protected routes are sent
pub const LOGIN_PATH: &str = "/login/";

/// The authenticated user of the current request
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user: User,
    /// Raw session token, needed to terminate the session
    pub token: String,
}

/// Extract the session token from the request headers.
///
/// The bearer header wins over the cookie when both are present.
pub fn extract_session_token(headers: &HeaderMap) -> Option<String> {
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty());

    if let Some(token) = bearer {
        return Some(token.to_string());
    }

    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|h| h.to_str().ok())
        .flat_map(|h| h.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, value)| *name == SESSION_COOKIE && !value.is_empty())
        .map(|(_, value)| value.to_string())
}

/// `Set-Cookie` value that stores a session token
pub fn session_cookie(token: &str, max_age_secs: i64, secure: bool) -> String {
    let mut cookie = format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        SESSION_COOKIE, token, max_age_secs
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// `Set-Cookie` value that removes the session cookie
pub fn clear_session_cookie(secure: bool) -> String {
    session_cookie("", 0, secure)
}

async fn resolve(state: &AppState, headers: &HeaderMap) -> Result<Option<CurrentUser>, AppError> {
    let Some(token) = extract_session_token(headers) else {
        return Ok(None);
    };

    let user = state.auth_service.current_user(&token).await?;
    Ok(user.map(|user| CurrentUser { user, token }))
}

/// Session-required middleware
///
/// Requests without a live session are redirected to the login page with a
/// `next` parameter pointing back at the original path.
pub async fn require_session(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    match resolve(&state, request.headers()).await? {
        Some(current) => {
            request.extensions_mut().insert(current);
            Ok(next.run(request).await)
        }
        None => {
            let path = request.uri().path();
            tracing::debug!(path, "No active session, redirecting to login");
            let location = format!("{}?next={}", LOGIN_PATH, urlencoding::encode(path));
            Ok(Redirect::to(&location).into_response())
        }
    }
}

/// Optional session middleware
///
/// Like `require_session` but never rejects. Lookup failures are logged and
/// the request continues anonymously.
pub async fn optional_session(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    match resolve(&state, request.headers()).await {
        Ok(Some(current)) => {
            request.extensions_mut().insert(current);
        }
        Ok(None) => {}
        Err(e) => {
            tracing::warn!(error = %e, "Failed to resolve session");
        }
    }

    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(pairs: &[(header::HeaderName, &str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.append(name.clone(), HeaderValue::from_str(value).unwrap());
        }
        map
    }

    #[test]
    fn token_from_cookie() {
        let map = headers(&[(header::COOKIE, "csrftoken=x; sessionid=abc123; theme=dark")]);
        assert_eq!(extract_session_token(&map), Some("abc123".to_string()));
    }

    #[test]
    fn token_from_second_cookie_header() {
        let map = headers(&[
            (header::COOKIE, "theme=dark"),
            (header::COOKIE, "sessionid=def456"),
        ]);
        assert_eq!(extract_session_token(&map), Some("def456".to_string()));
    }

    #[test]
    fn token_from_bearer_header() {
        let map = headers(&[
            (header::AUTHORIZATION, "Bearer tok-1"),
            (header::COOKIE, "sessionid=tok-2"),
        ]);
        assert_eq!(extract_session_token(&map), Some("tok-1".to_string()));
    }

    #[test]
    fn no_token() {
        assert_eq!(extract_session_token(&HeaderMap::new()), None);

        let map = headers(&[(header::COOKIE, "sessionid=")]);
        assert_eq!(extract_session_token(&map), None);

        let map = headers(&[(header::AUTHORIZATION, "Basic dXNlcjpwdw==")]);
        assert_eq!(extract_session_token(&map), None);
    }

    #[test]
    fn cookie_attributes() {
        let cookie = session_cookie("abc", 3600, false);
        assert_eq!(
            cookie,
            "sessionid=abc; Path=/; HttpOnly; SameSite=Lax; Max-Age=3600"
        );
        assert!(session_cookie("abc", 3600, true).ends_with("; Secure"));
    }

    #[test]
    fn clearing_cookie_expires_it() {
        assert!(clear_session_cookie(false).contains("Max-Age=0"));
        assert!(clear_session_cookie(false).starts_with("sessionid=;"));
    }
}
