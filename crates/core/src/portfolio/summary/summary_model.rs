use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::portfolio::allocation::{AssetAllocation, PlatformAllocation};

/// Everything the dashboard shows, derived from the current entry list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PortfolioSummary {
    pub net_worth: Decimal,
    pub net_worth_display: String,
    pub entry_count: usize,
    /// Newest `created_at` across all entries
    pub last_updated: Option<DateTime<Utc>>,
    pub by_asset_type: Vec<AssetAllocation>,
    pub by_platform: Vec<PlatformAllocation>,
}
