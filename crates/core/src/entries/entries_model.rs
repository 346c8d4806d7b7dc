//! Asset entry domain models.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{Result, ValidationError};

/// A single holding recorded by the user: some amount of an asset type on a platform.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AssetEntry {
    pub id: String,
    pub platform: String,
    pub asset_type: String,
    pub amount: Decimal,
    pub created_at: DateTime<Utc>,
}

/// Input model for creating a new entry. Id and timestamp are assigned by the store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewAssetEntry {
    pub platform: String,
    pub asset_type: String,
    pub amount: Decimal,
}

impl NewAssetEntry {
    /// Builds a validated entry from raw user input.
    pub fn parse(platform: &str, asset_type: &str, amount: &str) -> Result<Self> {
        let entry = Self {
            platform: platform.trim().to_string(),
            asset_type: asset_type.trim().to_string(),
            amount: parse_amount(amount)?,
        };
        entry.validate()?;
        Ok(entry)
    }

    pub fn validate(&self) -> Result<()> {
        require_non_empty("platform", &self.platform)?;
        require_non_empty("asset_type", &self.asset_type)?;
        require_non_negative(self.amount)?;
        Ok(())
    }
}

/// Partial update. Only the fields that are `Some` are written.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AssetEntryUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<Decimal>,
}

impl AssetEntryUpdate {
    pub fn is_empty(&self) -> bool {
        self.platform.is_none() && self.asset_type.is_none() && self.amount.is_none()
    }

    /// Trims the text fields in place and checks every provided field.
    pub fn normalize(mut self) -> Result<Self> {
        if let Some(platform) = self.platform.as_mut() {
            *platform = platform.trim().to_string();
            require_non_empty("platform", platform)?;
        }
        if let Some(asset_type) = self.asset_type.as_mut() {
            *asset_type = asset_type.trim().to_string();
            require_non_empty("asset_type", asset_type)?;
        }
        if let Some(amount) = self.amount {
            require_non_negative(amount)?;
        }
        Ok(self)
    }

    /// Applies the provided fields on top of an existing entry.
    pub fn apply_to(&self, entry: &mut AssetEntry) {
        if let Some(platform) = &self.platform {
            entry.platform = platform.clone();
        }
        if let Some(asset_type) = &self.asset_type {
            entry.asset_type = asset_type.clone();
        }
        if let Some(amount) = self.amount {
            entry.amount = amount;
        }
    }
}

/// Parses a user supplied amount. Accepts plain and scientific notation;
/// rejects anything that is not a number or is negative.
pub fn parse_amount(raw: &str) -> Result<Decimal> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingField("amount".to_string()).into());
    }
    if trimmed.contains('_') {
        return Err(ValidationError::InvalidAmount(trimmed.to_string()).into());
    }
    let amount = Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|_| ValidationError::InvalidAmount(trimmed.to_string()))?;
    require_non_negative(amount)?;
    Ok(amount.normalize())
}

fn require_non_negative(amount: Decimal) -> Result<()> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(ValidationError::InvalidAmount(amount.to_string()).into());
    }
    Ok(())
}

fn require_non_empty(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::MissingField(field.to_string()).into());
    }
    Ok(())
}
