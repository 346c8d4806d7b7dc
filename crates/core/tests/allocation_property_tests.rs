//! Property-based integration tests for the allocation breakdowns.
//!
//! These tests verify that universal properties hold across random entry
//! lists, using the `proptest` crate for test case generation.

use chrono::Utc;
use networth_core::entries::AssetEntry;
use networth_core::portfolio::allocation::{
    calculate_asset_allocation, calculate_platform_allocation, grand_total,
};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// =============================================================================
// Generators
// =============================================================================

fn arb_platform() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("n26".to_string()),
        Just("binance".to_string()),
        Just("kraken".to_string()),
        Just("degiro".to_string()),
    ]
}

fn arb_asset_type() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("cash".to_string()),
        Just("crypto".to_string()),
        Just("stocks".to_string()),
    ]
}

/// Amounts in cents up to ten million, as a two-decimal Decimal.
fn arb_amount() -> impl Strategy<Value = Decimal> {
    (0i64..1_000_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

fn arb_entries() -> impl Strategy<Value = Vec<AssetEntry>> {
    prop::collection::vec((arb_platform(), arb_asset_type(), arb_amount()), 0..40).prop_map(
        |rows| {
            rows.into_iter()
                .enumerate()
                .map(|(i, (platform, asset_type, amount))| AssetEntry {
                    id: format!("entry-{i}"),
                    platform,
                    asset_type,
                    amount,
                    created_at: Utc::now(),
                })
                .collect()
        },
    )
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn percentages_sum_to_hundred(entries in arb_entries()) {
        let total = grand_total(&entries);
        let by_type: Decimal = calculate_asset_allocation(&entries).iter().map(|a| a.percentage).sum();
        let by_platform: Decimal = calculate_platform_allocation(&entries).iter().map(|a| a.percentage).sum();

        if total > Decimal::ZERO {
            prop_assert!((by_type - dec!(100)).abs() < dec!(0.000001));
            prop_assert!((by_platform - dec!(100)).abs() < dec!(0.000001));
        } else {
            prop_assert_eq!(by_type, Decimal::ZERO);
            prop_assert_eq!(by_platform, Decimal::ZERO);
        }
    }

    #[test]
    fn grouping_counts_every_entry_once(entries in arb_entries()) {
        let total = grand_total(&entries);
        let asset_groups = calculate_asset_allocation(&entries);
        let platform_groups = calculate_platform_allocation(&entries);

        let by_type: Decimal = asset_groups.iter().map(|a| a.total).sum();
        let by_platform: Decimal = platform_groups.iter().map(|a| a.total).sum();
        prop_assert_eq!(by_type, total);
        prop_assert_eq!(by_platform, total);

        for entry in &entries {
            prop_assert_eq!(asset_groups.iter().filter(|a| a.asset_type == entry.asset_type).count(), 1);
            prop_assert_eq!(platform_groups.iter().filter(|p| p.platform == entry.platform).count(), 1);
            let group = asset_groups.iter().find(|a| a.asset_type == entry.asset_type).unwrap();
            prop_assert!(group.platforms.contains(&entry.platform));
        }
    }

    #[test]
    fn groups_are_sorted_by_total(entries in arb_entries()) {
        let asset_groups = calculate_asset_allocation(&entries);
        for pair in asset_groups.windows(2) {
            prop_assert!(pair[0].total >= pair[1].total);
        }
        let platform_groups = calculate_platform_allocation(&entries);
        for pair in platform_groups.windows(2) {
            prop_assert!(pair[0].total >= pair[1].total);
        }
    }

    #[test]
    fn platform_lists_have_no_duplicates(entries in arb_entries()) {
        for group in calculate_asset_allocation(&entries) {
            let mut seen = group.platforms.clone();
            seen.sort();
            seen.dedup();
            prop_assert_eq!(seen.len(), group.platforms.len());
        }
    }
}
