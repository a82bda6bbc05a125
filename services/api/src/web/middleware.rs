//! services/api/src/web/middleware.rs
//!
//! Authentication middleware for protecting routes.

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use story_hub_core::Principal;
use tracing::debug;

use crate::web::{error::HttpError, state::AppState};

/// Name of the cookie that carries the signed session token.
pub const SESSION_COOKIE: &str = "session";

/// Every session token the request carries: the `session` cookie first, then
/// an `Authorization: Bearer` header.
pub fn session_tokens(headers: &HeaderMap) -> impl Iterator<Item = &str> {
    let from_cookie = headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .find_map(|c| {
            let (name, value) = c.trim().split_once('=')?;
            (name == SESSION_COOKIE && !value.is_empty()).then_some(value)
        });

    let from_bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty());

    from_cookie.into_iter().chain(from_bearer)
}

/// The principal behind the first token that verifies. A stale cookie does
/// not shadow a valid bearer token.
pub fn identify(state: &AppState, headers: &HeaderMap) -> Option<Principal> {
    session_tokens(headers).find_map(|token| state.sessions.identify(token))
}

/// Middleware that validates the session token and extracts the principal.
///
/// If valid, inserts the `Principal` into request extensions for handlers to use.
/// If invalid or missing, returns 401 Unauthorized before any data access.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Result<Response, HttpError> {
    let principal = identify(&state, req.headers()).ok_or_else(|| {
        debug!("Rejected request to {} without a valid session", req.uri().path());
        HttpError::Unauthorized
    })?;

    req.extensions_mut().insert(principal);
    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(pairs: &[(header::HeaderName, &'static str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.append(name.clone(), HeaderValue::from_static(*value));
        }
        map
    }

    fn tokens(map: &HeaderMap) -> Vec<&str> {
        session_tokens(map).collect()
    }

    #[test]
    fn token_is_found_among_other_cookies() {
        let map = headers(&[(header::COOKIE, "theme=dark; session=abc.def; lang=en")]);
        assert_eq!(tokens(&map), ["abc.def"]);
    }

    #[test]
    fn similarly_named_cookie_is_ignored() {
        let map = headers(&[(header::COOKIE, "old_session=zzz")]);
        assert!(tokens(&map).is_empty());
    }

    #[test]
    fn empty_cookie_falls_back_to_bearer() {
        let map = headers(&[
            (header::COOKIE, "session="),
            (header::AUTHORIZATION, "Bearer tok"),
        ]);
        assert_eq!(tokens(&map), ["tok"]);
    }

    #[test]
    fn cookie_is_tried_before_bearer() {
        let map = headers(&[
            (header::COOKIE, "session=stale"),
            (header::AUTHORIZATION, "Bearer fresh"),
        ]);
        assert_eq!(tokens(&map), ["stale", "fresh"]);
    }

    #[test]
    fn no_credentials_means_no_token() {
        assert!(tokens(&HeaderMap::new()).is_empty());
    }
}
