//! HTTP client for a Supabase (GoTrue) auth server.
//!
//! Only the handful of endpoints the tracker needs are covered: resolving an
//! access token to a user, redeeming a PKCE auth code, revoking a session and
//! sending a magic sign-in link.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::StatusCode;
use serde::Deserialize;

use networth_core::auth::{
    AuthUser, CodeExchange, IdentityProviderTrait, MagicLinkRequest, Session,
};
use networth_core::errors::{Error, Result};

/// Default timeout for auth requests.
const DEFAULT_TIMEOUT_SECS: u64 = 10;

// ─────────────────────────────────────────────────────────────────────────────
// API Response Types
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct ApiUser {
    id: String,
    #[serde(default)]
    email: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiTokenResponse {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    expires_in: Option<i64>,
    #[serde(default)]
    user: Option<ApiUser>,
}

/// GoTrue returns either OAuth-style or its own error shape depending on the endpoint.
#[derive(Debug, Default, Deserialize)]
struct ApiErrorResponse {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    error_description: Option<String>,
    #[serde(default)]
    msg: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

impl ApiErrorResponse {
    fn into_message(self) -> Option<String> {
        self.error_description
            .or(self.msg)
            .or(self.message)
            .or(self.error)
            .filter(|m| !m.is_empty())
    }
}

impl From<ApiUser> for AuthUser {
    fn from(api: ApiUser) -> Self {
        Self {
            id: api.id,
            email: api.email.filter(|e| !e.is_empty()),
        }
    }
}

/// Extracts a human readable message from an error response body.
fn error_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<ApiErrorResponse>(body)
        .ok()
        .and_then(ApiErrorResponse::into_message)
        .unwrap_or_else(|| format!("HTTP {}", status.as_u16()))
}

// ─────────────────────────────────────────────────────────────────────────────
// Auth Client
// ─────────────────────────────────────────────────────────────────────────────

/// Client for the Supabase auth API (`{base_url}/auth/v1/...`).
///
/// # Example
///
/// ```ignore
/// let client = SupabaseAuthClient::new("https://project.supabase.co", "publishable-key")?;
/// let user = client.get_user(&access_token).await?;
/// ```
#[derive(Debug, Clone)]
pub struct SupabaseAuthClient {
    client: reqwest::Client,
    base_url: String,
    api_key: HeaderValue,
}

impl SupabaseAuthClient {
    /// Create a new auth client.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is not a valid header value or the HTTP
    /// client cannot be initialized.
    pub fn new(base_url: &str, api_key: &str) -> Result<Self> {
        let api_key = HeaderValue::from_str(api_key)
            .map_err(|e| Error::IdentityProvider(format!("Invalid API key format: {}", e)))?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .map_err(|e| {
                Error::IdentityProvider(format!("Failed to initialize HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            base_url: base_url.trim().trim_end_matches('/').to_string(),
            api_key,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/auth/v1{}", self.base_url, path)
    }

    fn headers(&self, access_token: Option<&str>) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert("apikey", self.api_key.clone());
        if let Some(token) = access_token {
            let value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|e| Error::IdentityProvider(format!("Invalid access token: {}", e)))?;
            headers.insert(AUTHORIZATION, value);
        }
        Ok(headers)
    }

    async fn read_body(response: reqwest::Response) -> Result<(StatusCode, String)> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::IdentityProvider(format!("Failed to read response: {}", e)))?;
        Ok((status, body))
    }
}

fn transport_error(e: reqwest::Error) -> Error {
    Error::IdentityProvider(format!("Request to auth server failed: {}", e))
}

#[async_trait]
impl IdentityProviderTrait for SupabaseAuthClient {
    async fn get_user(&self, access_token: &str) -> Result<Option<AuthUser>> {
        let url = self.url("/user");
        debug!("[Auth] GET {}", url);

        let response = self
            .client
            .get(&url)
            .headers(self.headers(Some(access_token))?)
            .send()
            .await
            .map_err(transport_error)?;
        let (status, body) = Self::read_body(response).await?;

        match status {
            s if s.is_success() => {
                let user: ApiUser = serde_json::from_str(&body).map_err(|e| {
                    Error::IdentityProvider(format!("Failed to parse user response: {}", e))
                })?;
                Ok(Some(user.into()))
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                debug!("[Auth] Session rejected: {}", error_message(status, &body));
                Ok(None)
            }
            _ => Err(Error::IdentityProvider(error_message(status, &body))),
        }
    }

    async fn exchange_code(&self, auth_code: &str, code_verifier: &str) -> Result<CodeExchange> {
        let url = self.url("/token");
        debug!("[Auth] POST {} (pkce)", url);

        let response = self
            .client
            .post(&url)
            .query(&[("grant_type", "pkce")])
            .headers(self.headers(None)?)
            .json(&serde_json::json!({
                "auth_code": auth_code,
                "code_verifier": code_verifier,
            }))
            .send()
            .await
            .map_err(|e| Error::AuthExchangeFailed(e.to_string()))?;
        let (status, body) = Self::read_body(response).await?;

        if !status.is_success() {
            let msg = error_message(status, &body);
            warn!("[Auth] Code exchange failed: {}", msg);
            return Err(Error::AuthExchangeFailed(msg));
        }

        let token: ApiTokenResponse = serde_json::from_str(&body).map_err(|e| {
            Error::AuthExchangeFailed(format!("Failed to parse token response: {}", e))
        })?;

        Ok(CodeExchange {
            session: Session {
                access_token: token.access_token,
                refresh_token: token.refresh_token,
                expires_in: token.expires_in,
            },
            user: token.user.map(AuthUser::from),
        })
    }

    async fn sign_out(&self, access_token: &str) -> Result<()> {
        let url = self.url("/logout");
        debug!("[Auth] POST {}", url);

        let response = self
            .client
            .post(&url)
            .headers(self.headers(Some(access_token))?)
            .send()
            .await
            .map_err(transport_error)?;
        let (status, body) = Self::read_body(response).await?;

        // An already expired session is as good as signed out
        if status.is_success() || status == StatusCode::UNAUTHORIZED {
            return Ok(());
        }
        Err(Error::IdentityProvider(error_message(status, &body)))
    }

    async fn send_magic_link(&self, request: MagicLinkRequest) -> Result<()> {
        let url = self.url("/otp");
        debug!("[Auth] POST {} for {}", url, request.email);

        let response = self
            .client
            .post(&url)
            .query(&[("redirect_to", request.redirect_to.as_str())])
            .headers(self.headers(None)?)
            .json(&serde_json::json!({
                "email": request.email,
                "create_user": true,
                "code_challenge": request.code_challenge,
                "code_challenge_method": "s256",
            }))
            .send()
            .await
            .map_err(transport_error)?;
        let (status, body) = Self::read_body(response).await?;

        if !status.is_success() {
            return Err(Error::IdentityProvider(error_message(status, &body)));
        }
        Ok(())
    }
}
