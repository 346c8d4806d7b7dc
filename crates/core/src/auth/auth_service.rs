//! Allowlist-gated authentication on top of an external identity provider.
//!
//! Exactly one email address is authorized. Any other user that manages to
//! obtain a session is signed out again as soon as the gate sees it.

use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, info, warn};

use crate::errors::{Result, ValidationError};

use super::auth_model::{AuthUser, CallbackOutcome, DenialReason, MagicLinkRequest};
use super::auth_traits::{AuthServiceTrait, IdentityProviderTrait};

/// Redirect target used when the callback carries no usable `next`.
pub const DEFAULT_REDIRECT: &str = "/";

pub struct AuthService {
    provider: Arc<dyn IdentityProviderTrait>,
    allowed_email: String,
}

impl AuthService {
    pub fn new(provider: Arc<dyn IdentityProviderTrait>, allowed_email: impl Into<String>) -> Self {
        let allowed_email = allowed_email.into();
        if allowed_email.is_empty() {
            warn!("No allowed email configured; every sign-in will be rejected");
        }
        Self {
            provider,
            allowed_email,
        }
    }
}

/// Keeps `next` only when it is a same-origin absolute path that can be sent
/// back verbatim in a `Location` header.
pub fn sanitize_redirect(next: Option<&str>) -> String {
    match next {
        Some(path)
            if path.starts_with('/')
                && !path.starts_with("//")
                && !path.contains('\\')
                && path.chars().all(|c| c.is_ascii_graphic()) =>
        {
            path.to_string()
        }
        _ => DEFAULT_REDIRECT.to_string(),
    }
}

#[async_trait]
impl AuthServiceTrait for AuthService {
    fn is_allowed_email(&self, email: &str) -> bool {
        !self.allowed_email.is_empty() && email == self.allowed_email
    }

    async fn current_user(&self, access_token: Option<&str>) -> Option<AuthUser> {
        let token = access_token.filter(|t| !t.is_empty())?;

        let user = match self.provider.get_user(token).await {
            Ok(Some(user)) => user,
            Ok(None) => return None,
            Err(e) => {
                warn!("Failed to resolve session: {}", e);
                return None;
            }
        };

        let email = user.email.as_deref()?;
        if !self.is_allowed_email(email) {
            info!("Signing out user {} with non-allowlisted email", user.id);
            self.sign_out(token).await;
            return None;
        }

        Some(user)
    }

    async fn handle_callback(
        &self,
        auth_code: Option<&str>,
        code_verifier: Option<&str>,
        next: Option<&str>,
    ) -> CallbackOutcome {
        let Some(code) = auth_code.filter(|c| !c.is_empty()) else {
            debug!("Auth callback without code");
            return CallbackOutcome::Denied(DenialReason::AuthFailed);
        };

        let exchange = match self
            .provider
            .exchange_code(code, code_verifier.unwrap_or_default())
            .await
        {
            Ok(exchange) => exchange,
            Err(e) => {
                warn!("Auth code exchange failed: {}", e);
                return CallbackOutcome::Denied(DenialReason::AuthFailed);
            }
        };

        let Some(user) = exchange.user else {
            warn!("Auth code exchange returned no user");
            return CallbackOutcome::Denied(DenialReason::AuthFailed);
        };

        let allowed = user
            .email
            .as_deref()
            .map(|email| self.is_allowed_email(email))
            .unwrap_or(false);
        if !allowed {
            info!("Rejecting sign-in for user {}", user.id);
            self.sign_out(&exchange.session.access_token).await;
            return CallbackOutcome::Denied(DenialReason::Unauthorized);
        }

        CallbackOutcome::Authorized {
            redirect_to: sanitize_redirect(next),
            session: exchange.session,
        }
    }

    async fn sign_out(&self, access_token: &str) {
        if let Err(e) = self.provider.sign_out(access_token).await {
            warn!("Failed to sign out session: {}", e);
        }
    }

    async fn send_magic_link(&self, request: MagicLinkRequest) -> Result<()> {
        let email = request.email.trim();
        if email.is_empty() {
            return Err(ValidationError::MissingField("email".to_string()).into());
        }
        if !email.contains('@') {
            return Err(ValidationError::InvalidInput(format!("Invalid email '{}'", email)).into());
        }
        let request = MagicLinkRequest {
            email: email.to_string(),
            ..request
        };
        self.provider.send_magic_link(request).await
    }
}
