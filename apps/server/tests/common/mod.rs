#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{HeaderMap, Request, StatusCode},
    Router,
};
use networth_core::auth::{
    AuthUser, CodeExchange, IdentityProviderTrait, MagicLinkRequest, Session,
};
use networth_core::{Error, Result};
use networth_server::{api::app_router, build_state_with_provider, config::Config};
use tempfile::TempDir;
use tower::ServiceExt;

pub const OWNER_EMAIL: &str = "owner@example.com";
pub const OWNER_TOKEN: &str = "owner-token";
pub const INTRUDER_TOKEN: &str = "intruder-token";

/// Identity provider double with two known users.
#[derive(Default)]
pub struct MockIdentityProvider {
    pub signed_out: Mutex<Vec<String>>,
    pub magic_links: Mutex<Vec<MagicLinkRequest>>,
    pub verifiers: Mutex<Vec<String>>,
}

fn user_for_token(token: &str) -> Option<AuthUser> {
    match token {
        OWNER_TOKEN => Some(AuthUser {
            id: "owner-id".to_string(),
            email: Some(OWNER_EMAIL.to_string()),
        }),
        INTRUDER_TOKEN => Some(AuthUser {
            id: "intruder-id".to_string(),
            email: Some("intruder@example.com".to_string()),
        }),
        _ => None,
    }
}

#[async_trait]
impl IdentityProviderTrait for MockIdentityProvider {
    async fn get_user(&self, access_token: &str) -> Result<Option<AuthUser>> {
        Ok(user_for_token(access_token))
    }

    async fn exchange_code(&self, auth_code: &str, code_verifier: &str) -> Result<CodeExchange> {
        self.verifiers
            .lock()
            .unwrap()
            .push(code_verifier.to_string());
        let token = match auth_code {
            "owner-code" => OWNER_TOKEN,
            "intruder-code" => INTRUDER_TOKEN,
            _ => return Err(Error::AuthExchangeFailed("invalid flow state".to_string())),
        };
        Ok(CodeExchange {
            session: Session {
                access_token: token.to_string(),
                refresh_token: Some("refresh".to_string()),
                expires_in: Some(3600),
            },
            user: user_for_token(token),
        })
    }

    async fn sign_out(&self, access_token: &str) -> Result<()> {
        self.signed_out
            .lock()
            .unwrap()
            .push(access_token.to_string());
        Ok(())
    }

    async fn send_magic_link(&self, request: MagicLinkRequest) -> Result<()> {
        if request.email == "limited@example.com" {
            return Err(Error::IdentityProvider(
                "Email rate limit exceeded".to_string(),
            ));
        }
        self.magic_links.lock().unwrap().push(request);
        Ok(())
    }
}

pub struct TestApp {
    pub router: Router,
    pub provider: Arc<MockIdentityProvider>,
    _tmp: TempDir,
}

pub fn test_config(tmp: &TempDir) -> Config {
    Config {
        listen_addr: "127.0.0.1:0".parse().unwrap(),
        db_path: tmp.path().join("test.db").to_string_lossy().to_string(),
        cors_allow: vec!["*".to_string()],
        request_timeout: Duration::from_secs(30),
        allowed_email: OWNER_EMAIL.to_string(),
        auth_url: "http://auth.invalid".to_string(),
        auth_publishable_key: "test-key".to_string(),
        public_url: "http://localhost:8080".to_string(),
        cookie_secure: false,
    }
}

pub async fn spawn_app() -> TestApp {
    let tmp = tempfile::tempdir().unwrap();
    let config = test_config(&tmp);
    let provider = Arc::new(MockIdentityProvider::default());
    let state = build_state_with_provider(&config, provider.clone())
        .await
        .unwrap();
    TestApp {
        router: app_router(state, &config),
        provider,
        _tmp: tmp,
    }
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).unwrap()
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn set_cookies(&self) -> Vec<String> {
        self.headers
            .get_all("set-cookie")
            .iter()
            .filter_map(|v| v.to_str().ok())
            .map(str::to_string)
            .collect()
    }
}

impl TestApp {
    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
            .to_vec();
        TestResponse {
            status,
            headers,
            body,
        }
    }
}

pub fn authed(method: &str, uri: &str, body: Option<serde_json::Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("authorization", format!("Bearer {OWNER_TOKEN}"));
    match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}
