//! Exercises the auth client against a local stand-in for the auth server.

use std::collections::HashMap;

use axum::extract::Query;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use networth_core::auth::{IdentityProviderTrait, MagicLinkRequest};
use networth_core::Error;
use networth_identity::SupabaseAuthClient;

const API_KEY: &str = "test-publishable-key";

fn has_api_key(headers: &HeaderMap) -> bool {
    headers.get("apikey").and_then(|v| v.to_str().ok()) == Some(API_KEY)
}

fn bearer(headers: &HeaderMap) -> Option<String> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::to_string)
}

async fn user(headers: HeaderMap) -> (StatusCode, Json<Value>) {
    if !has_api_key(&headers) {
        return (StatusCode::BAD_REQUEST, Json(json!({"msg": "missing apikey"})));
    }
    match bearer(&headers).as_deref() {
        Some("good-token") => (
            StatusCode::OK,
            Json(json!({"id": "user-1", "email": "owner@example.com", "aud": "authenticated"})),
        ),
        Some("boom") => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"msg": "database unavailable"})),
        ),
        _ => (
            StatusCode::UNAUTHORIZED,
            Json(json!({"msg": "invalid JWT"})),
        ),
    }
}

async fn token(
    Query(params): Query<HashMap<String, String>>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    if params.get("grant_type").map(String::as_str) != Some("pkce") {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "unsupported_grant_type"})),
        );
    }
    if body["auth_code"] == "good-code" && body["code_verifier"] == "verifier" {
        return (
            StatusCode::OK,
            Json(json!({
                "access_token": "good-token",
                "token_type": "bearer",
                "refresh_token": "refresh",
                "expires_in": 3600,
                "user": {"id": "user-1", "email": "owner@example.com"}
            })),
        );
    }
    (
        StatusCode::BAD_REQUEST,
        Json(json!({
            "error": "invalid_grant",
            "error_description": "invalid flow state, no valid flow state found"
        })),
    )
}

async fn logout(headers: HeaderMap) -> StatusCode {
    match bearer(&headers).as_deref() {
        Some("good-token") => StatusCode::NO_CONTENT,
        Some("expired") => StatusCode::UNAUTHORIZED,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

async fn otp(
    Query(params): Query<HashMap<String, String>>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    if body["email"] == "limited@example.com" {
        return (
            StatusCode::TOO_MANY_REQUESTS,
            Json(json!({"code": 429, "msg": "Email rate limit exceeded"})),
        );
    }
    let ok = params.get("redirect_to").map(String::as_str)
        == Some("http://localhost:8080/api/v1/auth/callback")
        && body["code_challenge_method"] == "s256"
        && body["code_challenge"] == "challenge"
        && body["create_user"] == true;
    if ok {
        (StatusCode::OK, Json(json!({})))
    } else {
        (StatusCode::BAD_REQUEST, Json(json!({"msg": "bad request"})))
    }
}

async fn spawn_auth_server() -> String {
    let app = Router::new()
        .route("/auth/v1/user", get(user))
        .route("/auth/v1/token", post(token))
        .route("/auth/v1/logout", post(logout))
        .route("/auth/v1/otp", post(otp));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}/", addr)
}

async fn client() -> SupabaseAuthClient {
    let base_url = spawn_auth_server().await;
    SupabaseAuthClient::new(&base_url, API_KEY).unwrap()
}

#[tokio::test]
async fn get_user_resolves_valid_token() {
    let client = client().await;
    let user = client.get_user("good-token").await.unwrap().unwrap();
    assert_eq!(user.id, "user-1");
    assert_eq!(user.email.as_deref(), Some("owner@example.com"));
}

#[tokio::test]
async fn get_user_returns_none_for_rejected_token() {
    let client = client().await;
    assert!(client.get_user("stale").await.unwrap().is_none());
}

#[tokio::test]
async fn get_user_surfaces_server_errors() {
    let client = client().await;
    let err = client.get_user("boom").await.unwrap_err();
    match err {
        Error::IdentityProvider(msg) => assert_eq!(msg, "database unavailable"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn exchange_code_returns_session_and_user() {
    let client = client().await;
    let exchange = client.exchange_code("good-code", "verifier").await.unwrap();
    assert_eq!(exchange.session.access_token, "good-token");
    assert_eq!(exchange.session.refresh_token.as_deref(), Some("refresh"));
    assert_eq!(exchange.session.expires_in, Some(3600));
    assert_eq!(
        exchange.user.and_then(|u| u.email).as_deref(),
        Some("owner@example.com")
    );
}

#[tokio::test]
async fn exchange_code_failure_carries_provider_message() {
    let client = client().await;
    let err = client.exchange_code("bad-code", "verifier").await.unwrap_err();
    match err {
        Error::AuthExchangeFailed(msg) => {
            assert_eq!(msg, "invalid flow state, no valid flow state found")
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn sign_out_accepts_success_and_expired_sessions() {
    let client = client().await;
    client.sign_out("good-token").await.unwrap();
    client.sign_out("expired").await.unwrap();
    assert!(client.sign_out("other").await.is_err());
}

#[tokio::test]
async fn send_magic_link_posts_pkce_challenge() {
    let client = client().await;
    client
        .send_magic_link(MagicLinkRequest {
            email: "owner@example.com".to_string(),
            redirect_to: "http://localhost:8080/api/v1/auth/callback".to_string(),
            code_challenge: "challenge".to_string(),
        })
        .await
        .unwrap();
}

#[tokio::test]
async fn send_magic_link_reports_rate_limit() {
    let client = client().await;
    let err = client
        .send_magic_link(MagicLinkRequest {
            email: "limited@example.com".to_string(),
            redirect_to: "http://localhost:8080/api/v1/auth/callback".to_string(),
            code_challenge: "challenge".to_string(),
        })
        .await
        .unwrap_err();
    assert_eq!(err.to_string().contains("Email rate limit exceeded"), true);
}

#[tokio::test]
async fn unreachable_server_is_a_provider_error() {
    let client = SupabaseAuthClient::new("http://127.0.0.1:9", API_KEY).unwrap();
    assert!(matches!(
        client.get_user("good-token").await,
        Err(Error::IdentityProvider(_))
    ));
}
