use serde_json::Value;

use crate::fields::numeric::parse_clean_number;
use crate::fields::{FieldSource, FieldSpec};

/// Resolve a logical field against a record. Lookup order:
///
/// 1. the logical key among the record's declared fields,
/// 2. the logical key inside the extra-data bag (exact match),
/// 3. each legacy candidate key, in declared order, inside the extra-data
///    bag — compared case-insensitively after trimming, since raw
///    spreadsheet headers arrive with inconsistent casing and padding.
///
/// The first defined, non-empty-after-trim value wins. String values come
/// back trimmed.
pub fn resolve(source: &dyn FieldSource, spec: &FieldSpec) -> Option<Value> {
    if let Some(value) = source.declared(spec.logical).as_ref().and_then(usable) {
        return Some(value);
    }
    let extra = source.extra();
    if let Some(value) = extra.get(spec.logical).and_then(usable) {
        return Some(value);
    }
    for candidate in spec.candidates {
        let wanted = candidate.trim();
        let found = extra
            .iter()
            .find(|(key, _)| key.trim().eq_ignore_ascii_case(wanted))
            .map(|(_, value)| value);
        if let Some(value) = found.and_then(usable) {
            return Some(value);
        }
    }
    None
}

/// Resolve to text. Numbers are rendered; other JSON shapes are treated
/// as absent.
pub fn resolve_str(source: &dyn FieldSource, spec: &FieldSpec) -> Option<String> {
    match resolve(source, spec)? {
        Value::String(text) => Some(text),
        Value::Number(num) => Some(num.to_string()),
        _ => None,
    }
}

/// Resolve through the tolerant numeric parser. `None` means the field is
/// absent, which callers treat differently from a present `0`.
pub fn resolve_number(source: &dyn FieldSource, spec: &FieldSpec) -> Option<f64> {
    resolve(source, spec).map(|value| parse_clean_number(&value))
}

fn usable(value: &Value) -> Option<Value> {
    match value {
        Value::Null => None,
        Value::String(raw) => {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(Value::String(trimmed.to_string()))
            }
        }
        other => Some(other.clone()),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{resolve, resolve_number, resolve_str};
    use crate::fields::{ListingField, ListingFieldParseError};
    use crate::records::MarketplaceListing;

    fn listing(extra: serde_json::Value) -> MarketplaceListing {
        MarketplaceListing {
            sku: "B000TEST".to_string(),
            additional_data: extra.as_object().cloned().unwrap_or_default(),
            ..Default::default()
        }
    }

    #[test]
    fn clean_key_wins_over_legacy() {
        let record = listing(json!({
            "ReviewCount": "120",
            "Reviews: Review Count - Format Specific": "999",
        }));
        let value = resolve(&record, &ListingField::ReviewCount.spec());
        assert_eq!(value, Some(json!("120")));
    }

    #[test]
    fn legacy_key_matches_case_insensitively() {
        let record = listing(json!({
            " referral fee % ": "15",
        }));
        let value = resolve_number(&record, &ListingField::ReferralFee.spec());
        assert_eq!(value, Some(15.0));
    }

    #[test]
    fn blank_values_fall_through_to_next_key() {
        let record = listing(json!({
            "BuyBoxCurrent": "   ",
            "Buy Box 🚚: Current": "$25.00",
        }));
        let value = resolve_number(&record, &ListingField::BuyBoxCurrent.spec());
        assert_eq!(value, Some(25.0));
    }

    #[test]
    fn string_values_come_back_trimmed() {
        let record = listing(json!({
            "AmzAvailability": "  No Amazon offer exists  ",
        }));
        let value = resolve_str(&record, &ListingField::AmzAvailability.spec());
        assert_eq!(value.as_deref(), Some("No Amazon offer exists"));
    }

    #[test]
    fn declared_field_wins_over_extra_bag() {
        let record = listing(json!({}));
        let spec = crate::fields::FieldSpec {
            logical: "sku",
            candidates: &[],
        };
        let value = resolve_str(&record, &spec);
        assert_eq!(value.as_deref(), Some("B000TEST"));
    }

    #[test]
    fn missing_everywhere_is_none() {
        let record = listing(json!({}));
        assert!(resolve(&record, &ListingField::RankCurrent.spec()).is_none());
        let _typed: ListingFieldParseError = "bogus".parse::<ListingField>().unwrap_err();
    }
}
