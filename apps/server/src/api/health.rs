use std::sync::Arc;

use crate::main_lib::AppState;
use axum::{extract::State, http::StatusCode, routing::get, Router};

async fn healthz() -> &'static str {
    "ok"
}

/// Ready once the database file exists.
async fn readyz(State(state): State<Arc<AppState>>) -> (StatusCode, &'static str) {
    if std::path::Path::new(&state.db_path).exists() {
        (StatusCode::OK, "ok")
    } else {
        tracing::warn!("Database file {} is missing", state.db_path);
        (StatusCode::SERVICE_UNAVAILABLE, "database unavailable")
    }
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
}
