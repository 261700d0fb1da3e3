use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use crate::records::{MarketplaceListing, VendorProduct};

/// Load a vendor product export: a JSON array of plain records as
/// delivered by the external store.
pub fn load_products(path: &Path) -> Result<Vec<VendorProduct>> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("failed reading products file: {}", path.display()))?;
    let products: Vec<VendorProduct> = serde_json::from_str(&data)
        .with_context(|| format!("failed parsing products JSON: {}", path.display()))?;
    info!(
        count = products.len(),
        path = %path.display(),
        "loaded vendor products"
    );
    Ok(products)
}

/// Load a marketplace listing export, same shape as the product file.
pub fn load_listings(path: &Path) -> Result<Vec<MarketplaceListing>> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("failed reading listings file: {}", path.display()))?;
    let listings: Vec<MarketplaceListing> = serde_json::from_str(&data)
        .with_context(|| format!("failed parsing listings JSON: {}", path.display()))?;
    info!(
        count = listings.len(),
        path = %path.display(),
        "loaded marketplace listings"
    );
    Ok(listings)
}
