use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::fields::parse_clean_str;

/// Severity tier for one displayed metric value.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Favorable,
    Caution,
    Unfavorable,
    Neutral,
}

/// The metrics the display layer asks the classifier about.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    SalesRank,
    Roi,
    MarginBuyBox,
    MsrpDiff,
    Profit,
    PriceToCostRatio,
    Availability,
}

impl Display for MetricKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::SalesRank => "sales_rank",
            Self::Roi => "roi",
            Self::MarginBuyBox => "margin_buy_box",
            Self::MsrpDiff => "msrp_diff",
            Self::Profit => "profit",
            Self::PriceToCostRatio => "price_to_cost_ratio",
            Self::Availability => "availability",
        };
        write!(f, "{label}")
    }
}

#[derive(Debug, Error)]
#[error("unknown metric kind: {0}")]
pub struct MetricKindParseError(pub String);

impl FromStr for MetricKind {
    type Err = MetricKindParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        match normalized.as_str() {
            "sales_rank" | "salesrank" | "rank" => Ok(Self::SalesRank),
            "roi" => Ok(Self::Roi),
            "margin_buy_box" | "marginbuybox" => Ok(Self::MarginBuyBox),
            "msrp_diff" | "msrpdiff" => Ok(Self::MsrpDiff),
            "profit" => Ok(Self::Profit),
            "price_to_cost_ratio" | "price_to_cost" | "pricetocostratio" => {
                Ok(Self::PriceToCostRatio)
            }
            "availability" => Ok(Self::Availability),
            _ => Err(MetricKindParseError(s.to_string())),
        }
    }
}

/// The value being classified: computed numbers for most metrics, raw
/// listing text for availability.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum MetricValue {
    Numeric(f64),
    Text(String),
}

impl MetricValue {
    fn as_number(&self) -> f64 {
        match self {
            Self::Numeric(value) => *value,
            Self::Text(raw) => parse_clean_str(raw),
        }
    }
}

/// Extra signals some rules need beyond the value itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClassifyContext {
    /// True when no buy box exists for the product; margin-buy-box is
    /// unfavorable in that state regardless of the number shown.
    pub no_buy_box: bool,
}

/// Bucket a computed metric into its display tier. Absent values are
/// neutral unless the metric's rules say otherwise (a missing sales rank
/// is unfavorable, a missing buy box makes the margin unfavorable).
pub fn classify(kind: MetricKind, value: Option<&MetricValue>, context: ClassifyContext) -> Tier {
    match kind {
        MetricKind::SalesRank => match value {
            None => Tier::Unfavorable,
            Some(v) => {
                let rank = v.as_number();
                if rank < 150_000.0 {
                    Tier::Favorable
                } else if rank <= 500_000.0 {
                    Tier::Caution
                } else {
                    Tier::Unfavorable
                }
            }
        },
        MetricKind::Roi => match value {
            None => Tier::Neutral,
            Some(v) => {
                let roi = v.as_number();
                if roi > 20.0 {
                    Tier::Favorable
                } else if roi >= 12.0 {
                    Tier::Caution
                } else {
                    Tier::Unfavorable
                }
            }
        },
        MetricKind::MarginBuyBox => {
            if context.no_buy_box {
                return Tier::Unfavorable;
            }
            match value {
                None => Tier::Neutral,
                Some(v) => {
                    let margin = v.as_number();
                    if margin > 20.0 {
                        Tier::Favorable
                    } else if margin >= 12.0 {
                        Tier::Caution
                    } else {
                        Tier::Unfavorable
                    }
                }
            }
        }
        MetricKind::MsrpDiff => match value {
            None => Tier::Neutral,
            Some(v) => {
                let diff = v.as_number();
                if diff > 0.0 {
                    Tier::Favorable
                } else if diff < 0.0 {
                    Tier::Unfavorable
                } else {
                    Tier::Neutral
                }
            }
        },
        MetricKind::Profit => match value {
            None => Tier::Neutral,
            Some(v) => {
                if v.as_number() >= 0.80 {
                    Tier::Favorable
                } else {
                    Tier::Unfavorable
                }
            }
        },
        MetricKind::PriceToCostRatio => match value {
            None => Tier::Neutral,
            Some(v) => {
                let ratio = v.as_number();
                if ratio > 1.5 {
                    Tier::Favorable
                } else if ratio >= 1.3 {
                    Tier::Caution
                } else {
                    Tier::Unfavorable
                }
            }
        },
        MetricKind::Availability => match value {
            Some(MetricValue::Text(raw)) => {
                let lower = raw.to_lowercase();
                if lower.contains("no amazon offer") || lower.contains("no offer") {
                    Tier::Favorable
                } else if lower.contains("stock") || lower.contains("available") {
                    Tier::Unfavorable
                } else {
                    Tier::Neutral
                }
            }
            _ => Tier::Neutral,
        },
    }
}
