use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::fields::{resolve_number, ListingField};
use crate::records::{MarketplaceListing, VendorProduct};

/// Rank assigned to variants with no sales-rank data, so unranked
/// siblings sort behind every ranked one.
pub const UNRANKED_SENTINEL: f64 = 9_999_999.0;

/// Popularity signals for one product inside its variant group, pulled
/// from the representative listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VariantCandidate {
    pub sku: String,
    pub group: String,
    pub review_count: f64,
    pub sales_rank: f64,
}

impl VariantCandidate {
    pub fn from_match(product: &VendorProduct, listing: Option<&MarketplaceListing>) -> Self {
        let review_count = listing
            .and_then(|l| resolve_number(l, &ListingField::ReviewCount.spec()))
            .unwrap_or(0.0);
        let sales_rank = listing
            .and_then(|l| resolve_number(l, &ListingField::RankCurrent.spec()))
            .unwrap_or(UNRANKED_SENTINEL);
        Self {
            sku: product.sku.clone(),
            group: product.variant_group().to_string(),
            review_count,
            sales_rank,
        }
    }

    /// Ranking order: review count descending, then sales rank ascending.
    /// Equality on both means "not better", which keeps the first-seen
    /// candidate on full ties.
    fn beats(&self, other: &Self) -> bool {
        if self.review_count != other.review_count {
            return self.review_count > other.review_count;
        }
        self.sales_rank < other.sales_rank
    }
}

/// Pick the winning sibling of every variant group. Each candidate
/// belongs to exactly one group (its parent SKU, or its own SKU when no
/// parent exists) and every non-empty group produces exactly one winner.
pub fn select_best(candidates: &[VariantCandidate]) -> BTreeSet<String> {
    let mut groups: BTreeMap<&str, &VariantCandidate> = BTreeMap::new();
    for candidate in candidates {
        groups
            .entry(candidate.group.as_str())
            .and_modify(|best| {
                if candidate.beats(best) {
                    *best = candidate;
                }
            })
            .or_insert(candidate);
    }
    groups
        .into_values()
        .map(|winner| winner.sku.clone())
        .collect()
}
