use std::collections::BTreeMap;

use tracing::debug;

use crate::fields::{resolve_str, ListingField};
use crate::records::MarketplaceListing;

/// Identifier -> listings index over the marketplace export.
///
/// The index owns the listings; vendor products hold no references into
/// it, only the identifier strings used to query it. Rebuilt wholesale
/// whenever the listing set changes, read-only afterwards.
#[derive(Debug, Default)]
pub struct MatchIndex {
    listings: Vec<MarketplaceListing>,
    by_identifier: BTreeMap<String, Vec<usize>>,
}

impl MatchIndex {
    /// Register every listing under up to three identifiers: its import
    /// code (the UPC it was matched by at import time), its own ASIN, and
    /// any embedded `ASIN` column in the extra-data bag. One listing may
    /// live under several identifiers; one identifier may collect several
    /// listings, in import order.
    pub fn build(listings: Vec<MarketplaceListing>) -> Self {
        let mut by_identifier: BTreeMap<String, Vec<usize>> = BTreeMap::new();
        for (idx, listing) in listings.iter().enumerate() {
            let import_code = resolve_str(listing, &ListingField::ImportedBy.spec())
                .or_else(|| listing.upc.clone());
            if let Some(code) = import_code {
                register(&mut by_identifier, &code, idx);
            }
            register(&mut by_identifier, &listing.sku, idx);
            if let Some(embedded) = listing.additional_data.get("ASIN") {
                if let Some(asin) = embedded.as_str() {
                    register(&mut by_identifier, asin, idx);
                }
            }
        }
        debug!(
            listings = listings.len(),
            identifiers = by_identifier.len(),
            "built match index"
        );
        Self {
            listings,
            by_identifier,
        }
    }

    /// Probe by UPC first, then by SKU; the first identifier that hits
    /// returns its full match list. The two probes are never merged.
    pub fn lookup(&self, upc: Option<&str>, sku: Option<&str>) -> Vec<&MarketplaceListing> {
        for probe in [upc, sku].into_iter().flatten() {
            let key = probe.trim();
            if key.is_empty() {
                continue;
            }
            if let Some(indices) = self.by_identifier.get(key) {
                return indices.iter().map(|idx| &self.listings[*idx]).collect();
            }
        }
        Vec::new()
    }

    /// Head of the match list: the listing used for scalar computations
    /// when an identifier matched more than one listing.
    pub fn representative(&self, upc: Option<&str>, sku: Option<&str>) -> Option<&MarketplaceListing> {
        self.lookup(upc, sku).into_iter().next()
    }

    pub fn listing_count(&self) -> usize {
        self.listings.len()
    }

    pub fn identifier_count(&self) -> usize {
        self.by_identifier.len()
    }
}

fn register(by_identifier: &mut BTreeMap<String, Vec<usize>>, identifier: &str, idx: usize) {
    let key = identifier.trim();
    if key.is_empty() {
        return;
    }
    let slot = by_identifier.entry(key.to_string()).or_default();
    // The same listing can surface the same identifier twice (import code
    // equal to its ASIN); one entry per listing is enough.
    if slot.last() != Some(&idx) {
        slot.push(idx);
    }
}
