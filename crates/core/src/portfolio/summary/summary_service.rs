//! Dashboard summary built on top of the entry list.

use std::sync::Arc;

use crate::entries::{AssetEntry, EntryServiceTrait};
use crate::errors::Result;
use crate::portfolio::allocation::{
    calculate_asset_allocation, calculate_platform_allocation, grand_total,
};
use crate::utils::format_currency;

use super::PortfolioSummary;

/// Trait for summary service.
pub trait SummaryServiceTrait: Send + Sync {
    fn get_summary(&self) -> Result<PortfolioSummary>;
}

pub struct SummaryService {
    entry_service: Arc<dyn EntryServiceTrait>,
}

impl SummaryService {
    pub fn new(entry_service: Arc<dyn EntryServiceTrait>) -> Self {
        Self { entry_service }
    }
}

impl SummaryServiceTrait for SummaryService {
    fn get_summary(&self) -> Result<PortfolioSummary> {
        let mut entries = self.entry_service.get_entries()?;
        // Groups follow entry order, so aggregate oldest first
        entries.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(summarize(&entries))
    }
}

pub fn summarize(entries: &[AssetEntry]) -> PortfolioSummary {
    let net_worth = grand_total(entries);
    PortfolioSummary {
        net_worth,
        net_worth_display: format_currency(net_worth),
        entry_count: entries.len(),
        last_updated: entries.iter().map(|e| e.created_at).max(),
        by_asset_type: calculate_asset_allocation(entries),
        by_platform: calculate_platform_allocation(entries),
    }
}
