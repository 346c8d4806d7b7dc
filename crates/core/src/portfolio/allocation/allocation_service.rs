//! Grouping of asset entries into allocation breakdowns.
//!
//! Both breakdowns are pure functions of the entry list: they are recomputed on
//! every read and never persisted.

use std::collections::HashMap;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::entries::AssetEntry;
use crate::utils::format_percentage;

use super::{AssetAllocation, PlatformAllocation};

/// Net worth: the sum of every entry amount.
pub fn grand_total(entries: &[AssetEntry]) -> Decimal {
    entries
        .iter()
        .fold(Decimal::ZERO, |sum, entry| sum.saturating_add(entry.amount))
}

/// Percentage of `total` in `grand_total`, or 0 when there is nothing to divide by.
pub fn percentage_of(total: Decimal, grand_total: Decimal) -> Decimal {
    if grand_total <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    total
        .checked_div(grand_total)
        .and_then(|ratio| ratio.checked_mul(dec!(100)))
        .unwrap_or(Decimal::ZERO)
}

/// Groups entries by `key`, keeping groups in order of first appearance.
fn group_by<'a, K>(entries: &'a [AssetEntry], key: K) -> Vec<(&'a str, Vec<&'a AssetEntry>)>
where
    K: Fn(&'a AssetEntry) -> &'a str,
{
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<(&str, Vec<&AssetEntry>)> = Vec::new();
    for entry in entries {
        let k = key(entry);
        match index.get(k) {
            Some(&i) => groups[i].1.push(entry),
            None => {
                index.insert(k, groups.len());
                groups.push((k, vec![entry]));
            }
        }
    }
    groups
}

/// Breakdown by asset type, largest first.
pub fn calculate_asset_allocation(entries: &[AssetEntry]) -> Vec<AssetAllocation> {
    let net_worth = grand_total(entries);

    let mut allocations: Vec<AssetAllocation> = group_by(entries, |e| e.asset_type.as_str())
        .into_iter()
        .map(|(asset_type, members)| {
            let total = members
                .iter()
                .fold(Decimal::ZERO, |sum, e| sum.saturating_add(e.amount));
            let mut platforms: Vec<String> = Vec::new();
            for member in &members {
                if !platforms.iter().any(|p| p == &member.platform) {
                    platforms.push(member.platform.clone());
                }
            }
            let percentage = percentage_of(total, net_worth);
            AssetAllocation {
                asset_type: asset_type.to_string(),
                total,
                percentage,
                percentage_display: format_percentage(percentage),
                platforms,
            }
        })
        .collect();

    // sort_by is stable: equal totals keep first-appearance order
    allocations.sort_by(|a, b| b.total.cmp(&a.total));
    allocations
}

/// Breakdown by platform, largest first.
pub fn calculate_platform_allocation(entries: &[AssetEntry]) -> Vec<PlatformAllocation> {
    let net_worth = grand_total(entries);

    let mut allocations: Vec<PlatformAllocation> = group_by(entries, |e| e.platform.as_str())
        .into_iter()
        .map(|(platform, members)| {
            let total = members
                .iter()
                .fold(Decimal::ZERO, |sum, e| sum.saturating_add(e.amount));
            let percentage = percentage_of(total, net_worth);
            PlatformAllocation {
                platform: platform.to_string(),
                total,
                percentage,
                percentage_display: format_percentage(percentage),
            }
        })
        .collect();

    allocations.sort_by(|a, b| b.total.cmp(&a.total));
    allocations
}
