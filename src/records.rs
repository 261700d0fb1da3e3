use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::fields::FieldSource;

/// A catalog item as delivered by the vendor import. `cost` and `msrp`
/// may arrive as numbers or as formatted strings ("$12.99").
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VendorProduct {
    #[serde(default)]
    pub sku: String,
    #[serde(default)]
    pub parent_sku: Option<String>,
    #[serde(default)]
    pub upc: Option<String>,
    #[serde(default)]
    pub cost: Value,
    #[serde(default)]
    pub msrp: Value,
    #[serde(default)]
    pub additional_data: Map<String, Value>,
}

impl VendorProduct {
    /// Variant grouping key: parent SKU, falling back to the product's
    /// own SKU when no parent is recorded.
    pub fn variant_group(&self) -> &str {
        match &self.parent_sku {
            Some(parent) if !parent.trim().is_empty() => parent,
            _ => &self.sku,
        }
    }
}

/// A marketplace listing. `sku` holds the ASIN; the metric columns live
/// in `additional_data` under clean or legacy raw-header keys.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MarketplaceListing {
    #[serde(default)]
    pub sku: String,
    #[serde(default)]
    pub parent_sku: Option<String>,
    #[serde(default)]
    pub upc: Option<String>,
    #[serde(default)]
    pub additional_data: Map<String, Value>,
}

impl FieldSource for VendorProduct {
    fn declared(&self, key: &str) -> Option<Value> {
        match key {
            "sku" => Some(Value::String(self.sku.clone())),
            "parent_sku" => self.parent_sku.clone().map(Value::String),
            "upc" => self.upc.clone().map(Value::String),
            "cost" => Some(self.cost.clone()),
            "msrp" => Some(self.msrp.clone()),
            _ => None,
        }
    }

    fn extra(&self) -> &Map<String, Value> {
        &self.additional_data
    }
}

impl FieldSource for MarketplaceListing {
    fn declared(&self, key: &str) -> Option<Value> {
        match key {
            "sku" | "asin" => Some(Value::String(self.sku.clone())),
            "parent_sku" | "parent_asin" => self.parent_sku.clone().map(Value::String),
            "upc" => self.upc.clone().map(Value::String),
            _ => None,
        }
    }

    fn extra(&self) -> &Map<String, Value> {
        &self.additional_data
    }
}
