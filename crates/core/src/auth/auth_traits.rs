use crate::auth::auth_model::{AuthUser, CallbackOutcome, CodeExchange, MagicLinkRequest};
use crate::errors::Result;
use async_trait::async_trait;

/// External identity provider holding users and sessions.
#[async_trait]
pub trait IdentityProviderTrait: Send + Sync {
    /// Resolves an access token to its user. `Ok(None)` when the token is
    /// invalid or expired.
    async fn get_user(&self, access_token: &str) -> Result<Option<AuthUser>>;

    /// Redeems a one-time auth code for a session.
    async fn exchange_code(&self, auth_code: &str, code_verifier: &str) -> Result<CodeExchange>;

    /// Revokes the session behind an access token.
    async fn sign_out(&self, access_token: &str) -> Result<()>;

    /// Asks the provider to email a magic sign-in link.
    async fn send_magic_link(&self, request: MagicLinkRequest) -> Result<()>;
}

/// Allowlist gate in front of the identity provider.
#[async_trait]
pub trait AuthServiceTrait: Send + Sync {
    fn is_allowed_email(&self, email: &str) -> bool;
    async fn current_user(&self, access_token: Option<&str>) -> Option<AuthUser>;
    async fn handle_callback(
        &self,
        auth_code: Option<&str>,
        code_verifier: Option<&str>,
        next: Option<&str>,
    ) -> CallbackOutcome;
    async fn sign_out(&self, access_token: &str);
    async fn send_magic_link(&self, request: MagicLinkRequest) -> Result<()>;
}
