use std::sync::Arc;

use crate::config::Config;
use networth_core::{
    auth::{AuthService, AuthServiceTrait, IdentityProviderTrait},
    entries::{EntryService, EntryServiceTrait},
    portfolio::summary::{SummaryService, SummaryServiceTrait},
};
use networth_identity::SupabaseAuthClient;
use networth_storage_sqlite::{
    db::{self, write_actor},
    entries::EntryRepository,
};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

pub struct AppState {
    pub entry_service: Arc<dyn EntryServiceTrait>,
    pub summary_service: Arc<dyn SummaryServiceTrait>,
    pub auth_service: Arc<dyn AuthServiceTrait>,
    /// Magic-link redirect target handed to the identity provider
    pub callback_url: String,
    pub cookie_secure: bool,
    pub db_path: String,
}

pub fn init_tracing() {
    let log_format = std::env::var("NW_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let provider = SupabaseAuthClient::new(&config.auth_url, &config.auth_publishable_key)?;
    tracing::info!("Identity provider: {}", config.auth_url);
    build_state_with_provider(config, Arc::new(provider)).await
}

/// Wires storage and services around an already constructed identity provider.
pub async fn build_state_with_provider(
    config: &Config,
    provider: Arc<dyn IdentityProviderTrait>,
) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    let writer = write_actor::spawn_writer((*pool).clone());

    let entry_repository = Arc::new(EntryRepository::new(pool, writer));
    let entry_service: Arc<dyn EntryServiceTrait> = Arc::new(EntryService::new(entry_repository));
    let summary_service = Arc::new(SummaryService::new(entry_service.clone()));

    let auth_service = Arc::new(AuthService::new(provider, config.allowed_email.clone()));

    Ok(Arc::new(AppState {
        entry_service,
        summary_service,
        auth_service,
        callback_url: config.callback_url(),
        cookie_secure: config.cookie_secure,
        db_path,
    }))
}
