//! Database models for asset entries.

use chrono::{NaiveDateTime, TimeZone, Utc};
use diesel::prelude::*;
use rust_decimal::Decimal;
use std::str::FromStr;

use networth_core::entries::{AssetEntry, AssetEntryUpdate, NewAssetEntry};

/// Parses a stored amount, falling back to scientific notation and then to zero.
fn parse_stored_amount(value: &str, entry_id: &str) -> Decimal {
    Decimal::from_str(value)
        .or_else(|_| Decimal::from_scientific(value))
        .unwrap_or_else(|e| {
            log::error!(
                "Failed to parse amount '{}' of entry {}: {}. Falling back to ZERO.",
                value,
                entry_id,
                e
            );
            Decimal::ZERO
        })
}

/// Database model for asset entries
#[derive(Queryable, Identifiable, Selectable, Insertable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::asset_entries)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct AssetEntryDB {
    pub id: String,
    pub platform: String,
    pub asset_type: String,
    pub amount: String,
    pub created_at: NaiveDateTime,
}

/// Changeset for partial updates; `None` fields are left untouched.
#[derive(AsChangeset, Debug, Clone, Default)]
#[diesel(table_name = crate::schema::asset_entries)]
pub struct AssetEntryChangesetDB {
    pub platform: Option<String>,
    pub asset_type: Option<String>,
    pub amount: Option<String>,
}

impl AssetEntryDB {
    pub fn from_new(id: String, created_at: NaiveDateTime, domain: NewAssetEntry) -> Self {
        Self {
            id,
            platform: domain.platform,
            asset_type: domain.asset_type,
            amount: domain.amount.to_string(),
            created_at,
        }
    }
}

impl From<AssetEntryDB> for AssetEntry {
    fn from(db: AssetEntryDB) -> Self {
        let amount = parse_stored_amount(&db.amount, &db.id);
        Self {
            id: db.id,
            platform: db.platform,
            asset_type: db.asset_type,
            amount,
            created_at: Utc.from_utc_datetime(&db.created_at),
        }
    }
}

impl From<AssetEntryUpdate> for AssetEntryChangesetDB {
    fn from(domain: AssetEntryUpdate) -> Self {
        Self {
            platform: domain.platform,
            asset_type: domain.asset_type,
            amount: domain.amount.map(|a| a.to_string()),
        }
    }
}
