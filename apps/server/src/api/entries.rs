use std::sync::Arc;

use crate::{
    error::{ApiJson, ApiResult},
    main_lib::AppState,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, patch},
    Json, Router,
};
use networth_core::entries::{parse_amount, AssetEntry, AssetEntryUpdate, NewAssetEntry};
use serde::Deserialize;
use serde_json::{json, Value};

/// Amounts arrive either as JSON numbers or as numeric strings from form inputs.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum AmountInput {
    Number(serde_json::Number),
    Text(String),
}

impl AmountInput {
    fn as_text(&self) -> String {
        match self {
            AmountInput::Number(n) => n.to_string(),
            AmountInput::Text(s) => s.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CreateEntryBody {
    platform: String,
    asset_type: String,
    amount: AmountInput,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct UpdateEntryBody {
    #[serde(default)]
    platform: Option<String>,
    #[serde(default)]
    asset_type: Option<String>,
    #[serde(default)]
    amount: Option<AmountInput>,
}

impl TryFrom<UpdateEntryBody> for AssetEntryUpdate {
    type Error = networth_core::Error;

    fn try_from(body: UpdateEntryBody) -> Result<Self, Self::Error> {
        let amount = body
            .amount
            .map(|raw| parse_amount(&raw.as_text()))
            .transpose()?;
        Ok(AssetEntryUpdate {
            platform: body.platform,
            asset_type: body.asset_type,
            amount,
        })
    }
}

async fn list_entries(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<AssetEntry>>> {
    let entries = state.entry_service.get_entries()?;
    Ok(Json(entries))
}

async fn create_entry(
    State(state): State<Arc<AppState>>,
    ApiJson(body): ApiJson<CreateEntryBody>,
) -> ApiResult<(StatusCode, Json<AssetEntry>)> {
    let new_entry = NewAssetEntry::parse(&body.platform, &body.asset_type, &body.amount.as_text())?;
    let created = state.entry_service.create_entry(new_entry).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update_entry(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    ApiJson(body): ApiJson<UpdateEntryBody>,
) -> ApiResult<Json<AssetEntry>> {
    let changes = AssetEntryUpdate::try_from(body)?;
    let updated = state.entry_service.update_entry(id, changes).await?;
    Ok(Json(updated))
}

async fn delete_entry(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Value>> {
    state.entry_service.delete_entry(id).await?;
    Ok(Json(json!({ "success": true })))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/entries", get(list_entries).post(create_entry))
        .route("/entries/{id}", patch(update_entry).delete(delete_entry))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    #[test]
    fn amount_accepts_numbers_and_strings() {
        let body: CreateEntryBody =
            serde_json::from_str(r#"{"platform":"n26","asset_type":"cash","amount":1000.5}"#)
                .unwrap();
        assert_eq!(body.amount.as_text(), "1000.5");

        let body: CreateEntryBody =
            serde_json::from_str(r#"{"platform":"n26","asset_type":"cash","amount":"250"}"#)
                .unwrap();
        assert_eq!(body.amount.as_text(), "250");
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let result = serde_json::from_str::<UpdateEntryBody>(r#"{"id":"x","amount":1}"#);
        assert!(result.is_err());
    }

    #[test]
    fn update_body_parses_amount() {
        let body: UpdateEntryBody = serde_json::from_str(r#"{"amount":"12.50"}"#).unwrap();
        let update = AssetEntryUpdate::try_from(body).unwrap();
        assert_eq!(update.amount, Some(Decimal::from_str("12.5").unwrap()));
        assert_eq!(update.platform, None);
    }

    #[test]
    fn update_body_rejects_bad_amount() {
        let body: UpdateEntryBody = serde_json::from_str(r#"{"amount":"abc"}"#).unwrap();
        assert!(AssetEntryUpdate::try_from(body).is_err());
    }
}
