use std::sync::Arc;

use crate::{
    auth::{
        clear_cookie, cookie_value, session_cookie, session_token, verifier_cookie, CurrentUser,
        SESSION_COOKIE, VERIFIER_COOKIE,
    },
    error::{ApiJson, ApiResult},
    main_lib::AppState,
};
use axum::{
    extract::{Query, State},
    http::{header::SET_COOKIE, HeaderMap},
    response::{AppendHeaders, IntoResponse, Redirect, Response},
    routing::{get, post},
    Extension, Json, Router,
};
use networth_core::auth::{AuthUser, CallbackOutcome, MagicLinkRequest};
use networth_identity::PkcePair;
use serde::Deserialize;
use serde_json::json;

/// Sign-in page the browser lands on when a callback is denied.
const SIGN_IN_PATH: &str = "/auth";

#[derive(Debug, Deserialize)]
struct CallbackParams {
    code: Option<String>,
    next: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct MagicLinkBody {
    email: String,
}

async fn callback(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(params): Query<CallbackParams>,
) -> Response {
    let verifier = cookie_value(&headers, VERIFIER_COOKIE);
    let outcome = state
        .auth_service
        .handle_callback(params.code.as_deref(), verifier, params.next.as_deref())
        .await;
    let clear_verifier = clear_cookie(VERIFIER_COOKIE, state.cookie_secure);

    match outcome {
        CallbackOutcome::Authorized {
            redirect_to,
            session,
        } => {
            tracing::info!("Sign-in completed, redirecting to {}", redirect_to);
            let cookie = session_cookie(
                &session.access_token,
                session.expires_in,
                state.cookie_secure,
            );
            (
                AppendHeaders([(SET_COOKIE, cookie), (SET_COOKIE, clear_verifier)]),
                Redirect::to(&redirect_to),
            )
                .into_response()
        }
        CallbackOutcome::Denied(reason) => {
            let target = format!("{}?error={}", SIGN_IN_PATH, reason.as_query());
            tracing::info!("Sign-in denied: {}", reason.as_query());
            (
                AppendHeaders([(SET_COOKIE, clear_verifier)]),
                Redirect::to(&target),
            )
                .into_response()
        }
    }
}

async fn send_magic_link(
    State(state): State<Arc<AppState>>,
    ApiJson(body): ApiJson<MagicLinkBody>,
) -> ApiResult<impl IntoResponse> {
    let pkce = PkcePair::generate();
    state
        .auth_service
        .send_magic_link(MagicLinkRequest {
            email: body.email,
            redirect_to: state.callback_url.clone(),
            code_challenge: pkce.challenge,
        })
        .await?;

    let cookie = verifier_cookie(&pkce.verifier, state.cookie_secure);
    Ok((
        AppendHeaders([(SET_COOKIE, cookie)]),
        Json(json!({ "message": "Check your email for the sign-in link" })),
    ))
}

async fn sign_out(State(state): State<Arc<AppState>>, headers: HeaderMap) -> impl IntoResponse {
    if let Some(token) = session_token(&headers) {
        state.auth_service.sign_out(token).await;
    }
    let cookie = clear_cookie(SESSION_COOKIE, state.cookie_secure);
    (
        AppendHeaders([(SET_COOKIE, cookie)]),
        Json(json!({ "success": true })),
    )
}

async fn me(Extension(CurrentUser(user)): Extension<CurrentUser>) -> Json<AuthUser> {
    Json(user)
}

/// Routes reachable without a session.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/callback", get(callback))
        .route("/auth/magic-link", post(send_magic_link))
        .route("/auth/signout", post(sign_out))
}

pub fn protected_router() -> Router<Arc<AppState>> {
    Router::new().route("/auth/me", get(me))
}
