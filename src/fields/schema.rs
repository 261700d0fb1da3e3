use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One logical field with its ordered physical-key fallback chain.
///
/// Every listing metric declares its candidate keys exactly once here;
/// call sites never improvise their own fallback order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub logical: &'static str,
    pub candidates: &'static [&'static str],
}

/// The listing metrics the engine reads. Each variant maps a clean key
/// (written by the current importer) to the legacy raw spreadsheet
/// header older exports carried.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum ListingField {
    ImportedBy,
    Rating,
    ReviewCount,
    BoughtLastMonth,
    BuyBoxCurrent,
    BuyBox30,
    BuyBox90,
    BuyBox180,
    RankCurrent,
    Rank30,
    AmzAvailability,
    AmzBuyBox90,
    ReferralFee,
    FbaFee,
    FbmOffers,
    FbaOffers,
    TotalOffers,
}

impl ListingField {
    pub const ALL: [ListingField; 17] = [
        ListingField::ImportedBy,
        ListingField::Rating,
        ListingField::ReviewCount,
        ListingField::BoughtLastMonth,
        ListingField::BuyBoxCurrent,
        ListingField::BuyBox30,
        ListingField::BuyBox90,
        ListingField::BuyBox180,
        ListingField::RankCurrent,
        ListingField::Rank30,
        ListingField::AmzAvailability,
        ListingField::AmzBuyBox90,
        ListingField::ReferralFee,
        ListingField::FbaFee,
        ListingField::FbmOffers,
        ListingField::FbaOffers,
        ListingField::TotalOffers,
    ];

    pub fn spec(&self) -> FieldSpec {
        match self {
            Self::ImportedBy => FieldSpec {
                logical: "ImportedBy",
                candidates: &["Imported by Code"],
            },
            Self::Rating => FieldSpec {
                logical: "Rating",
                candidates: &["Reviews: Rating Count"],
            },
            Self::ReviewCount => FieldSpec {
                logical: "ReviewCount",
                candidates: &["Reviews: Review Count - Format Specific"],
            },
            Self::BoughtLastMonth => FieldSpec {
                logical: "BoughtLastMonth",
                candidates: &["Bought in past month"],
            },
            Self::BuyBoxCurrent => FieldSpec {
                logical: "BuyBoxCurrent",
                candidates: &["Buy Box 🚚: Current"],
            },
            Self::BuyBox30 => FieldSpec {
                logical: "BuyBox30",
                candidates: &["Buy Box 🚚: 30 days avg."],
            },
            Self::BuyBox90 => FieldSpec {
                logical: "BuyBox90",
                candidates: &["Buy Box 🚚: 90 days avg."],
            },
            Self::BuyBox180 => FieldSpec {
                logical: "BuyBox180",
                candidates: &["Buy Box 🚚: 180 days avg."],
            },
            Self::RankCurrent => FieldSpec {
                logical: "RankCurrent",
                candidates: &["Sales Rank: Current"],
            },
            Self::Rank30 => FieldSpec {
                logical: "Rank30",
                candidates: &["Sales Rank: 30 days avg."],
            },
            Self::AmzAvailability => FieldSpec {
                logical: "AmzAvailability",
                candidates: &["Amazon: Availability of the Amazon offer"],
            },
            Self::AmzBuyBox90 => FieldSpec {
                logical: "AmzBuyBox90",
                candidates: &["Buy Box: % Amazon 90 days"],
            },
            Self::ReferralFee => FieldSpec {
                logical: "ReferralFee",
                candidates: &["Referral Fee %"],
            },
            Self::FbaFee => FieldSpec {
                logical: "FBAFee",
                candidates: &["FBA Pick&Pack Fee"],
            },
            Self::FbmOffers => FieldSpec {
                logical: "FBMOffers",
                candidates: &["Count of retrieved live offers: New, FBM"],
            },
            Self::FbaOffers => FieldSpec {
                logical: "FBAOffers",
                candidates: &["Count of retrieved live offers: New, FBA"],
            },
            Self::TotalOffers => FieldSpec {
                logical: "TotalOffers",
                candidates: &["Total Offer Count"],
            },
        }
    }
}

impl Display for ListingField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.spec().logical)
    }
}

#[derive(Debug, Error)]
#[error("unknown listing field: {0}")]
pub struct ListingFieldParseError(pub String);

impl FromStr for ListingField {
    type Err = ListingFieldParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        for field in Self::ALL {
            let spec = field.spec();
            if trimmed.eq_ignore_ascii_case(spec.logical) {
                return Ok(field);
            }
            if spec
                .candidates
                .iter()
                .any(|candidate| trimmed.eq_ignore_ascii_case(candidate))
            {
                return Ok(field);
            }
        }
        Err(ListingFieldParseError(s.to_string()))
    }
}
