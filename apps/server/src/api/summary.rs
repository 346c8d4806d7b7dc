use std::sync::Arc;

use crate::{error::ApiResult, main_lib::AppState};
use axum::{extract::State, routing::get, Json, Router};
use networth_core::portfolio::summary::PortfolioSummary;

async fn get_summary(State(state): State<Arc<AppState>>) -> ApiResult<Json<PortfolioSummary>> {
    let summary = state.summary_service.get_summary()?;
    Ok(Json(summary))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/summary", get(get_summary))
}
