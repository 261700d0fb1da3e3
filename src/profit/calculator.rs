use crate::fields::{parse_clean_number, resolve, ListingField};
use crate::profit::{Metrics, DEFAULT_PICK_AND_PACK_FEE, DEFAULT_REFERRAL_FEE_PERCENT};
use crate::records::{MarketplaceListing, VendorProduct};

/// Derive the full fee / price / margin waterfall for one product and its
/// representative listing. Every missing or malformed input has a defined
/// default, so this never fails and never emits NaN or infinity.
pub fn compute(
    product: &VendorProduct,
    listing: Option<&MarketplaceListing>,
    shipping_cost: f64,
    misc_cost: f64,
) -> Metrics {
    let referral_fee_percent = referral_fee_percent(listing);
    let pick_and_pack_fee = pick_and_pack_fee(listing);

    // Buy-box waterfall: current -> 30d -> 90d -> 180d -> MSRP.
    let msrp = parse_clean_number(&product.msrp);
    let sale_price = [
        listing_number(listing, ListingField::BuyBoxCurrent),
        listing_number(listing, ListingField::BuyBox30),
        listing_number(listing, ListingField::BuyBox90),
        listing_number(listing, ListingField::BuyBox180),
        msrp,
    ]
    .into_iter()
    .find(|price| *price > 0.0)
    .unwrap_or(0.0);

    let product_cost = parse_clean_number(&product.cost);
    let total_cost = product_cost + pick_and_pack_fee + shipping_cost + misc_cost;

    let revenue = sale_price * (1.0 - referral_fee_percent);
    let profit = revenue - total_cost;

    // ROI denominator is out-of-pocket cost only; marketplace fees are
    // excluded by design.
    let investment = product_cost + shipping_cost + misc_cost;
    let roi = if investment > 0.0 {
        profit / investment * 100.0
    } else {
        0.0
    };

    let margin_buy_box = if sale_price > 0.0 {
        Some(profit / sale_price * 100.0)
    } else {
        None
    };

    let margin_msrp = if msrp > 0.0 {
        let revenue_at_msrp = msrp * (1.0 - referral_fee_percent);
        (revenue_at_msrp - total_cost) / msrp * 100.0
    } else {
        0.0
    };

    let msrp_diff = if msrp > 0.0 && sale_price > 0.0 {
        (sale_price - msrp) / msrp * 100.0
    } else {
        0.0
    };

    Metrics {
        referral_fee_percent,
        pick_and_pack_fee,
        sale_price,
        total_cost,
        profit,
        roi,
        margin_buy_box,
        margin_msrp,
        msrp_diff,
        investment,
    }
}

/// Listings report the referral fee either as a whole-number percent (15)
/// or as a fraction (0.15). Values above 1 are treated as whole-number
/// percents; absent or zero falls back to the default.
fn referral_fee_percent(listing: Option<&MarketplaceListing>) -> f64 {
    let Some(raw) = listing.and_then(|l| resolve(l, &ListingField::ReferralFee.spec())) else {
        return DEFAULT_REFERRAL_FEE_PERCENT;
    };
    let value = parse_clean_number(&raw);
    if value > 1.0 {
        value / 100.0
    } else if value > 0.0 {
        value
    } else {
        DEFAULT_REFERRAL_FEE_PERCENT
    }
}

fn pick_and_pack_fee(listing: Option<&MarketplaceListing>) -> f64 {
    let Some(raw) = listing.and_then(|l| resolve(l, &ListingField::FbaFee.spec())) else {
        return DEFAULT_PICK_AND_PACK_FEE;
    };
    let value = parse_clean_number(&raw);
    if value > 0.0 {
        value
    } else {
        DEFAULT_PICK_AND_PACK_FEE
    }
}

fn listing_number(listing: Option<&MarketplaceListing>, field: ListingField) -> f64 {
    listing
        .and_then(|l| resolve(l, &field.spec()))
        .map(|value| parse_clean_number(&value))
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::compute;
    use crate::records::{MarketplaceListing, VendorProduct};

    fn product(cost: serde_json::Value, msrp: serde_json::Value) -> VendorProduct {
        VendorProduct {
            sku: "A1".to_string(),
            cost,
            msrp,
            ..Default::default()
        }
    }

    fn listing(extra: serde_json::Value) -> MarketplaceListing {
        MarketplaceListing {
            sku: "B0001".to_string(),
            additional_data: extra.as_object().cloned().unwrap_or_default(),
            ..Default::default()
        }
    }

    #[test]
    fn matched_listing_end_to_end() {
        let product = product(json!(5), json!(20));
        let listing = listing(json!({
            "ReferralFee": "15",
            "FBAFee": "5.50",
            "BuyBoxCurrent": "25.00",
        }));
        let metrics = compute(&product, Some(&listing), 0.0, 0.0);
        assert!((metrics.referral_fee_percent - 0.15).abs() < 1e-9);
        assert!((metrics.total_cost - 10.50).abs() < 1e-9);
        assert!((metrics.profit - 10.75).abs() < 1e-9);
        assert!((metrics.roi - 215.0).abs() < 1e-9);
        assert!((metrics.margin_buy_box.unwrap() - 43.0).abs() < 1e-9);
    }

    #[test]
    fn unmatched_product_uses_defaults_and_msrp_fallback() {
        let product = product(json!(20), json!(100));
        let metrics = compute(&product, None, 0.0, 0.0);
        assert!((metrics.referral_fee_percent - 0.15).abs() < 1e-9);
        assert!((metrics.pick_and_pack_fee - 7.0).abs() < 1e-9);
        assert!((metrics.sale_price - 100.0).abs() < 1e-9);
        assert!((metrics.total_cost - 27.0).abs() < 1e-9);
    }

    #[test]
    fn buy_box_waterfall_reaches_180_day_average() {
        let product = product(json!(5), json!(0));
        let listing = listing(json!({
            "BuyBoxCurrent": "0",
            "BuyBox30": "",
            "BuyBox90": "0.00",
            "BuyBox180": "12.50",
        }));
        let metrics = compute(&product, Some(&listing), 0.0, 0.0);
        assert!((metrics.sale_price - 12.50).abs() < 1e-9);
    }

    #[test]
    fn referral_fee_normalization() {
        let product = product(json!(10), json!(0));
        let whole = listing(json!({ "ReferralFee": "15", "BuyBoxCurrent": "10" }));
        assert!(
            (compute(&product, Some(&whole), 0.0, 0.0).referral_fee_percent - 0.15).abs() < 1e-9
        );
        let fractional = listing(json!({ "ReferralFee": 0.15, "BuyBoxCurrent": "10" }));
        assert!(
            (compute(&product, Some(&fractional), 0.0, 0.0).referral_fee_percent - 0.15).abs()
                < 1e-9
        );
        let zero = listing(json!({ "ReferralFee": "0" }));
        assert!((compute(&product, Some(&zero), 0.0, 0.0).referral_fee_percent - 0.15).abs() < 1e-9);
    }

    #[test]
    fn roi_guard_when_investment_is_zero() {
        let product = product(json!(0), json!(0));
        let listing = listing(json!({ "BuyBoxCurrent": "25.00" }));
        let metrics = compute(&product, Some(&listing), 0.0, 0.0);
        assert_eq!(metrics.roi, 0.0);
        assert!(metrics.roi.is_finite());
    }

    #[test]
    fn no_sale_price_yields_null_margin_not_zero() {
        let product = product(json!(5), json!(0));
        let metrics = compute(&product, None, 0.0, 0.0);
        assert_eq!(metrics.sale_price, 0.0);
        assert_eq!(metrics.margin_buy_box, None);
        assert_ne!(metrics.margin_buy_box, Some(0.0));
        assert_eq!(metrics.msrp_diff, 0.0);
        assert_eq!(metrics.margin_msrp, 0.0);
    }

    #[test]
    fn shipping_and_misc_costs_thread_into_totals() {
        let product = product(json!("$5.00"), json!(20));
        let listing = listing(json!({
            "ReferralFee": "15",
            "FBAFee": "5.50",
            "BuyBoxCurrent": "25.00",
        }));
        let metrics = compute(&product, Some(&listing), 2.0, 1.0);
        assert!((metrics.total_cost - 13.50).abs() < 1e-9);
        assert!((metrics.investment - 8.0).abs() < 1e-9);
    }

    #[test]
    fn legacy_raw_headers_resolve_for_fees_and_prices() {
        let product = product(json!(5), json!(0));
        let listing = listing(json!({
            "Referral Fee %": "12",
            "FBA Pick&Pack Fee": "$4.00",
            "Buy Box 🚚: Current": "$30.00",
        }));
        let metrics = compute(&product, Some(&listing), 0.0, 0.0);
        assert!((metrics.referral_fee_percent - 0.12).abs() < 1e-9);
        assert!((metrics.pick_and_pack_fee - 4.0).abs() < 1e-9);
        assert!((metrics.sale_price - 30.0).abs() < 1e-9);
    }
}
