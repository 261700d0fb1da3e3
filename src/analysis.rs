use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::fields::{resolve_number, resolve_str, ListingField};
use crate::matching::MatchIndex;
use crate::profit::{self, Metrics};
use crate::records::{MarketplaceListing, VendorProduct};
use crate::variants::{self, VariantCandidate};

/// Shipping and misc costs shared by every product in a batch. Threaded
/// explicitly so the engine stays referentially transparent.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct CostInputs {
    pub shipping_cost: f64,
    pub misc_cost: f64,
}

/// One vendor product joined to its marketplace matches and derived
/// figures.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductAnalysis {
    pub product: VendorProduct,
    /// The head-of-list match used for scalar computations; the full
    /// match list stays available through `matched_skus`.
    pub representative: Option<MarketplaceListing>,
    pub matched_skus: Vec<String>,
    pub match_count: usize,
    pub metrics: Metrics,
    pub best_variant: bool,
}

impl ProductAnalysis {
    pub fn sales_rank(&self) -> Option<f64> {
        self.representative
            .as_ref()
            .and_then(|l| resolve_number(l, &ListingField::RankCurrent.spec()))
    }

    pub fn availability(&self) -> Option<String> {
        self.representative
            .as_ref()
            .and_then(|l| resolve_str(l, &ListingField::AmzAvailability.spec()))
    }
}

/// Output of one full reconciliation pass over the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub generated_at: DateTime<Utc>,
    pub costs: CostInputs,
    pub product_count: usize,
    pub matched_count: usize,
    pub rows: Vec<ProductAnalysis>,
}

/// Join every vendor product against the listing index, derive its
/// profitability metrics, and flag the best sibling of each variant
/// group. Pure and idempotent; safe to re-run on any input change.
pub fn analyze_catalog(
    products: Vec<VendorProduct>,
    index: &MatchIndex,
    costs: CostInputs,
) -> AnalysisReport {
    let mut rows = Vec::with_capacity(products.len());
    let mut candidates = Vec::with_capacity(products.len());

    for product in products {
        let matches = index.lookup(product.upc.as_deref(), Some(product.sku.as_str()));
        let matched_skus: Vec<String> = matches.iter().map(|l| l.sku.clone()).collect();
        let representative = matches.first().map(|l| (*l).clone());
        let metrics = profit::compute(
            &product,
            representative.as_ref(),
            costs.shipping_cost,
            costs.misc_cost,
        );
        candidates.push(VariantCandidate::from_match(
            &product,
            representative.as_ref(),
        ));
        rows.push(ProductAnalysis {
            match_count: matched_skus.len(),
            matched_skus,
            representative,
            product,
            metrics,
            best_variant: false,
        });
    }

    let winners = variants::select_best(&candidates);
    let mut seen_groups: BTreeSet<&str> = BTreeSet::new();
    for (row, candidate) in rows.iter_mut().zip(&candidates) {
        // One winner per group: the first row carrying the winning SKU
        // takes the flag, later duplicates of the same SKU do not.
        if winners.contains(candidate.sku.as_str()) && seen_groups.insert(candidate.group.as_str())
        {
            row.best_variant = true;
        }
    }

    let matched_count = rows.iter().filter(|row| row.match_count > 0).count();
    debug!(
        products = rows.len(),
        matched = matched_count,
        "catalog analysis complete"
    );
    AnalysisReport {
        generated_at: Utc::now(),
        costs,
        product_count: rows.len(),
        matched_count,
        rows,
    }
}
