//! Allocation models for the net worth breakdown.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Share of net worth held in one asset type.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AssetAllocation {
    pub asset_type: String,
    /// Sum of the amounts of every entry with this asset type
    pub total: Decimal,
    /// Percentage of net worth (0-100), 0 when net worth is 0
    pub percentage: Decimal,
    /// `percentage` rounded to one decimal, e.g. `80.0%`
    pub percentage_display: String,
    /// Distinct platforms holding this asset type, in order of first appearance
    pub platforms: Vec<String>,
}

/// Share of net worth held on one platform.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlatformAllocation {
    pub platform: String,
    pub total: Decimal,
    pub percentage: Decimal,
    pub percentage_display: String,
}
