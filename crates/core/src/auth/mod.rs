//! Auth module - allowlist gate, provider trait, and session models.

mod auth_model;
mod auth_service;
mod auth_traits;

pub use auth_model::{
    AuthUser, CallbackOutcome, CodeExchange, DenialReason, MagicLinkRequest, Session,
};
pub use auth_service::{sanitize_redirect, AuthService, DEFAULT_REDIRECT};
pub use auth_traits::{AuthServiceTrait, IdentityProviderTrait};
