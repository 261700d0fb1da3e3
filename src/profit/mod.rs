pub mod calculator;

use serde::{Deserialize, Serialize};

pub use calculator::compute;

/// Marketplace commission assumed when the listing carries no referral
/// fee figure.
pub const DEFAULT_REFERRAL_FEE_PERCENT: f64 = 0.15;
/// Fulfillment fee assumed when the listing carries no pick & pack figure.
pub const DEFAULT_PICK_AND_PACK_FEE: f64 = 7.00;

/// Derived profitability figures for one (product, representative
/// listing) pair. Computed fresh on every input change; never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Metrics {
    /// Fractional commission rate (0.15, not 15).
    pub referral_fee_percent: f64,
    pub pick_and_pack_fee: f64,
    /// Buy-box waterfall result; MSRP fallback; 0 when no price exists.
    pub sale_price: f64,
    /// Product cost + pick & pack + shipping + misc.
    pub total_cost: f64,
    pub profit: f64,
    /// Percent return on out-of-pocket cost; marketplace fees excluded
    /// from the denominator.
    pub roi: f64,
    /// `None` means no buy box exists, which is a different state from a
    /// margin of zero.
    pub margin_buy_box: Option<f64>,
    pub margin_msrp: f64,
    pub msrp_diff: f64,
    pub investment: f64,
}

impl Metrics {
    /// Sale price over landed cost, used by the display layer's
    /// price-to-cost classification. `None` when there is no cost basis.
    pub fn price_to_cost_ratio(&self) -> Option<f64> {
        if self.total_cost > 0.0 {
            Some(self.sale_price / self.total_cost)
        } else {
            None
        }
    }
}
