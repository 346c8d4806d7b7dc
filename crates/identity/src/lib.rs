//! Identity provider integration for the net worth tracker.
//!
//! Implements `networth_core::auth::IdentityProviderTrait` on top of the
//! Supabase auth HTTP API, plus the PKCE helpers used by the magic-link flow.

mod client;
pub mod pkce;

pub use client::SupabaseAuthClient;
pub use pkce::{challenge_for, PkcePair};
