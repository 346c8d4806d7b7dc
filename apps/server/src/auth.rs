use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{
        header::{AUTHORIZATION, COOKIE},
        HeaderMap, Request,
    },
    middleware::Next,
    response::Response,
};
use networth_core::auth::AuthUser;

use crate::{error::ApiError, main_lib::AppState};

/// Cookie carrying the provider access token for browser sessions.
pub const SESSION_COOKIE: &str = "nw_session";
/// Cookie holding the PKCE verifier between the magic-link request and the callback.
pub const VERIFIER_COOKIE: &str = "nw_code_verifier";

const VERIFIER_MAX_AGE_SECS: i64 = 600;
const DEFAULT_SESSION_MAX_AGE_SECS: i64 = 3600;

/// The allowlisted user behind the current request.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub AuthUser);

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let header = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let mut parts = header.splitn(2, ' ');
    let (Some(scheme), Some(token)) = (parts.next(), parts.next()) else {
        return None;
    };
    if !scheme.eq_ignore_ascii_case("Bearer") {
        return None;
    }
    Some(token.trim()).filter(|t| !t.is_empty())
}

pub fn cookie_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim())
        .filter(|value| !value.is_empty())
}

/// Access token from the `Authorization` header, falling back to the session cookie.
pub fn session_token(headers: &HeaderMap) -> Option<&str> {
    bearer_token(headers).or_else(|| cookie_value(headers, SESSION_COOKIE))
}

fn build_cookie(name: &str, value: &str, max_age_secs: i64, secure: bool) -> String {
    let mut cookie =
        format!("{name}={value}; Path=/; HttpOnly; SameSite=Lax; Max-Age={max_age_secs}");
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

pub fn session_cookie(access_token: &str, expires_in: Option<i64>, secure: bool) -> String {
    let max_age = expires_in
        .filter(|secs| *secs > 0)
        .unwrap_or(DEFAULT_SESSION_MAX_AGE_SECS);
    build_cookie(SESSION_COOKIE, access_token, max_age, secure)
}

pub fn verifier_cookie(verifier: &str, secure: bool) -> String {
    build_cookie(VERIFIER_COOKIE, verifier, VERIFIER_MAX_AGE_SECS, secure)
}

pub fn clear_cookie(name: &str, secure: bool) -> String {
    build_cookie(name, "", 0, secure)
}

/// Rejects the request with 401 unless the session belongs to the allowed user.
pub async fn require_user(
    State(state): State<Arc<AppState>>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let token = session_token(request.headers()).map(str::to_string);
    let user = state
        .auth_service
        .current_user(token.as_deref())
        .await
        .ok_or(ApiError::Unauthorized)?;

    request.extensions_mut().insert(CurrentUser(user));
    Ok(next.run(request).await)
}
