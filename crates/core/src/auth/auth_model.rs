//! Auth domain models.

use serde::{Deserialize, Serialize};

/// A user as reported by the identity provider.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthUser {
    pub id: String,
    pub email: Option<String>,
}

/// Tokens issued by the identity provider after a successful sign-in.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: Option<String>,
    /// Lifetime of the access token in seconds
    pub expires_in: Option<i64>,
}

/// Result of redeeming an auth code at the provider.
#[derive(Debug, Clone, PartialEq)]
pub struct CodeExchange {
    pub session: Session,
    pub user: Option<AuthUser>,
}

/// Why a sign-in callback did not produce a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenialReason {
    /// The provider accepted the user but the email is not the allowed one.
    Unauthorized,
    /// Missing code, failed redemption, or the provider returned no user.
    AuthFailed,
}

impl DenialReason {
    /// Value of the `error` query parameter on the sign-in page.
    pub fn as_query(&self) -> &'static str {
        match self {
            DenialReason::Unauthorized => "unauthorized",
            DenialReason::AuthFailed => "auth_failed",
        }
    }
}

/// Outcome of the sign-in callback, consumed by the routing layer.
#[derive(Debug, Clone, PartialEq)]
pub enum CallbackOutcome {
    Authorized {
        redirect_to: String,
        session: Session,
    },
    Denied(DenialReason),
}

/// Request for the provider to email a one-time sign-in link.
#[derive(Debug, Clone, PartialEq)]
pub struct MagicLinkRequest {
    pub email: String,
    /// Where the link in the email should send the browser
    pub redirect_to: String,
    /// PKCE S256 challenge bound to the verifier kept by the browser
    pub code_challenge: String,
}
