//! # Pricing Module
//!
//! Maps a line item's quantity to the unit price that applies to it.
//!
//! ## Tier Table
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Volume Price Tiers                              │
//! │                                                                         │
//! │   quantity   1     2 ─────── 5     6 ─────── 14     15 ──────────►      │
//! │   tier      none       low             mid               high           │
//! │   label      -         2-5             6-14              15+            │
//! │                                                                         │
//! │  Fallback policy (default):                                             │
//! │    1. q >= 15      and high > 0  → high                                 │
//! │    2. 6 <= q <= 14 and mid  > 0  → mid                                  │
//! │    3. 2 <= q <= 5  and low  > 0  → low                                  │
//! │    4. first non-zero of (high, mid, low), else 0                        │
//! │                                                                         │
//! │  Strict bucket policy:                                                  │
//! │    q >= 15 → high, q >= 6 → mid, else → low (even when that is 0)       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Sellers often fill in only the tier columns they care about. Under the
//! fallback policy a sale is never reported at $0 just because the matching
//! column was left blank while another one was filled.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::LineItem;
use crate::{HIGH_TIER_MIN_QUANTITY, LOW_TIER_MIN_QUANTITY, MID_TIER_MIN_QUANTITY};

// =============================================================================
// Pricing Policy
// =============================================================================

/// How a zero-valued tier price is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum PricingPolicy {
    /// Matching tier first, then the first non-zero of high, mid, low.
    #[default]
    Fallback,

    /// Pick strictly by quantity bucket; a blank tier yields $0.
    StrictBucket,
}

impl fmt::Display for PricingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PricingPolicy::Fallback => write!(f, "fallback"),
            PricingPolicy::StrictBucket => write!(f, "strict_bucket"),
        }
    }
}

impl FromStr for PricingPolicy {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fallback" => Ok(PricingPolicy::Fallback),
            "strict_bucket" | "strict-bucket" | "strict" => Ok(PricingPolicy::StrictBucket),
            other => Err(ValidationError::InvalidFormat {
                field: "pricing policy".to_string(),
                reason: format!("unknown policy '{}', expected fallback or strict_bucket", other),
            }),
        }
    }
}

// =============================================================================
// Price Tier
// =============================================================================

/// The quantity bracket a line item falls into, for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum PriceTier {
    /// 15 units or more.
    High,
    /// 6 to 14 units.
    Mid,
    /// Up to 5 units.
    Low,
}

impl PriceTier {
    /// Returns the bucket for a quantity: >= 15 high, >= 6 mid, else low.
    ///
    /// Quantities below 2 are labelled low even though the low price range
    /// formally starts at 2.
    pub fn for_quantity(quantity: i64) -> Self {
        if quantity >= HIGH_TIER_MIN_QUANTITY {
            PriceTier::High
        } else if quantity >= MID_TIER_MIN_QUANTITY {
            PriceTier::Mid
        } else {
            PriceTier::Low
        }
    }

    /// Short label shown next to the applied price.
    pub fn label(&self) -> &'static str {
        match self {
            PriceTier::High => "15+",
            PriceTier::Mid => "6-14",
            PriceTier::Low => "2-5",
        }
    }

    /// The item's price for this tier, zero or not.
    pub fn price_of(&self, item: &LineItem) -> Money {
        match self {
            PriceTier::High => item.price_high(),
            PriceTier::Mid => item.price_mid(),
            PriceTier::Low => item.price_low(),
        }
    }
}

impl fmt::Display for PriceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Price Lookup
// =============================================================================

/// Returns the unit price for `item` under the default (fallback) policy.
pub fn applicable_price(item: &LineItem) -> Money {
    applicable_price_with(item, PricingPolicy::Fallback)
}

/// Returns the unit price for `item` under `policy`.
pub fn applicable_price_with(item: &LineItem, policy: PricingPolicy) -> Money {
    match policy {
        PricingPolicy::Fallback => fallback_price(item),
        PricingPolicy::StrictBucket => PriceTier::for_quantity(item.quantity).price_of(item),
    }
}

fn fallback_price(item: &LineItem) -> Money {
    let q = item.quantity;
    let (high, mid, low) = (item.price_high(), item.price_mid(), item.price_low());

    if q >= HIGH_TIER_MIN_QUANTITY && high.is_positive() {
        return high;
    }
    if (MID_TIER_MIN_QUANTITY..HIGH_TIER_MIN_QUANTITY).contains(&q) && mid.is_positive() {
        return mid;
    }
    if (LOW_TIER_MIN_QUANTITY..MID_TIER_MIN_QUANTITY).contains(&q) && low.is_positive() {
        return low;
    }

    [high, mid, low]
        .into_iter()
        .find(|price| !price.is_zero())
        .unwrap_or_default()
}

/// Applicable price × quantity under the default policy.
pub fn line_subtotal(item: &LineItem) -> Money {
    line_subtotal_with(item, PricingPolicy::Fallback)
}

/// Applicable price × quantity under `policy`.
pub fn line_subtotal_with(item: &LineItem, policy: PricingPolicy) -> Money {
    applicable_price_with(item, policy).multiply_quantity(item.quantity)
}

// =============================================================================
// Unit Tests
// =============================================================================
