//! # Domain Types
//!
//! Core domain types used throughout the wholesale ledger.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────────┐          ┌─────────────────────────────┐      │
//! │  │        Sale         │ 1      * │          LineItem           │      │
//! │  │  ─────────────────  │─────────►│  ─────────────────────────  │      │
//! │  │  id (UUID)          │          │  name, sku                  │      │
//! │  │  customer_name      │          │  quantity (>= 1)            │      │
//! │  │  date               │          │  price_high_cents  (15+)    │      │
//! │  │  observations       │          │  price_mid_cents   (6-14)   │      │
//! │  │  created_at         │          │  price_low_cents   (2-5)    │      │
//! │  └─────────────────────┘          └─────────────────────────────┘      │
//! │                                                                         │
//! │  NewSale   = Sale without id / created_at (create payload)             │
//! │  SalePatch = optional fields merged into a stored Sale (update)        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Duration, NaiveDate, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Line Item
// =============================================================================

/// One product entry within a sale, carrying its own quantity and tier prices.
///
/// A tier price of zero means the seller left that column blank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct LineItem {
    /// Descriptive product label.
    pub name: String,

    /// Stock Keeping Unit. Not unique.
    pub sku: String,

    /// Units sold (>= 1).
    pub quantity: i64,

    /// Unit price in cents when quantity >= 15.
    pub price_high_cents: i64,

    /// Unit price in cents when 6 <= quantity <= 14.
    pub price_mid_cents: i64,

    /// Unit price in cents when 2 <= quantity <= 5.
    pub price_low_cents: i64,
}

impl LineItem {
    /// Returns the 15+ tier price.
    #[inline]
    pub fn price_high(&self) -> Money {
        Money::from_cents(self.price_high_cents)
    }

    /// Returns the 6-14 tier price.
    #[inline]
    pub fn price_mid(&self) -> Money {
        Money::from_cents(self.price_mid_cents)
    }

    /// Returns the 2-5 tier price.
    #[inline]
    pub fn price_low(&self) -> Money {
        Money::from_cents(self.price_low_cents)
    }
}

// =============================================================================
// Sale
// =============================================================================

/// One transaction for one customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Sale {
    /// Unique identifier (UUID v4), assigned at creation.
    pub id: String,

    /// Grouping key for customer views. Exact-match when grouping,
    /// case-insensitive when looking up history.
    pub customer_name: String,

    /// Calendar date of the sale.
    #[ts(as = "String")]
    pub date: NaiveDate,

    /// Free-text notes; empty when none.
    pub observations: String,

    /// Ordered line items, never empty once validated.
    pub line_items: Vec<LineItem>,

    /// When the sale was recorded. Secondary sort key for history views.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

/// `now` rounded up to a whole millisecond, for `created_at`.
///
/// Stores keep millisecond precision. Rounding up keeps the stamp no
/// earlier than the call that created the sale.
pub fn created_at_from(now: DateTime<Utc>) -> DateTime<Utc> {
    let truncated = now.trunc_subsecs(3);
    if truncated < now {
        truncated + Duration::milliseconds(1)
    } else {
        truncated
    }
}

impl Sale {
    /// Builds a stored sale from a create payload plus the generated identity.
    pub fn from_new(id: impl Into<String>, created_at: DateTime<Utc>, new_sale: NewSale) -> Self {
        Sale {
            id: id.into(),
            customer_name: new_sale.customer_name,
            date: new_sale.date,
            observations: new_sale.observations,
            line_items: new_sale.line_items,
            created_at,
        }
    }

    /// Merges the fields present in `patch` into this sale.
    ///
    /// `id` and `created_at` are never touched. Line items are replaced as a
    /// whole sequence.
    pub fn apply_patch(&mut self, patch: SalePatch) {
        if let Some(customer_name) = patch.customer_name {
            self.customer_name = customer_name;
        }
        if let Some(date) = patch.date {
            self.date = date;
        }
        if let Some(observations) = patch.observations {
            self.observations = observations;
        }
        if let Some(line_items) = patch.line_items {
            self.line_items = line_items;
        }
    }
}

// =============================================================================
// New Sale
// =============================================================================

/// A sale as entered by the user, before the repository assigns identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct NewSale {
    pub customer_name: String,
    #[ts(as = "String")]
    pub date: NaiveDate,
    #[serde(default)]
    pub observations: String,
    pub line_items: Vec<LineItem>,
}

// =============================================================================
// Sale Patch
// =============================================================================

/// Partial update for a stored sale. `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SalePatch {
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    #[ts(as = "Option<String>")]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub observations: Option<String>,
    #[serde(default)]
    pub line_items: Option<Vec<LineItem>>,
}

impl SalePatch {
    /// Returns true when the patch would change nothing.
    pub fn is_empty(&self) -> bool {
        self.customer_name.is_none()
            && self.date.is_none()
            && self.observations.is_none()
            && self.line_items.is_none()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn item(name: &str, quantity: i64) -> LineItem {
        LineItem {
            name: name.to_string(),
            sku: format!("{}-001", name),
            quantity,
            price_high_cents: 0,
            price_mid_cents: 500,
            price_low_cents: 700,
        }
    }

    fn sample_sale() -> Sale {
        Sale::from_new(
            "id-1",
            Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap(),
            NewSale {
                customer_name: "Ana".to_string(),
                date: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
                observations: String::new(),
                line_items: vec![item("shirt", 10)],
            },
        )
    }

    #[test]
    fn test_tier_price_accessors() {
        let item = item("shirt", 10);
        assert_eq!(item.price_high(), Money::ZERO);
        assert_eq!(item.price_mid(), Money::from_cents(500));
        assert_eq!(item.price_low(), Money::from_cents(700));
    }

    #[test]
    fn test_apply_patch_merges_only_present_fields() {
        let mut sale = sample_sale();
        let original = sale.clone();

        sale.apply_patch(SalePatch {
            observations: Some("pay next week".to_string()),
            ..SalePatch::default()
        });

        assert_eq!(sale.observations, "pay next week");
        assert_eq!(sale.customer_name, original.customer_name);
        assert_eq!(sale.line_items, original.line_items);
        assert_eq!(sale.id, original.id);
        assert_eq!(sale.created_at, original.created_at);
    }

    #[test]
    fn test_apply_patch_replaces_line_items_wholesale() {
        let mut sale = sample_sale();
        sale.apply_patch(SalePatch {
            line_items: Some(vec![item("cap", 2), item("sock", 20)]),
            ..SalePatch::default()
        });

        let names: Vec<&str> = sale.line_items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["cap", "sock"]);
    }

    #[test]
    fn test_created_at_rounds_up_to_millis() {
        let now = Utc.with_ymd_and_hms(2026, 3, 1, 10, 0, 22).unwrap()
            + Duration::nanoseconds(182_121_103);
        let stamped = created_at_from(now);
        assert!(stamped >= now);
        assert_eq!(stamped.timestamp_subsec_nanos(), 183_000_000);

        let exact = Utc.with_ymd_and_hms(2026, 3, 1, 10, 0, 22).unwrap()
            + Duration::milliseconds(182);
        assert_eq!(created_at_from(exact), exact);
    }

    #[test]
    fn test_empty_patch() {
        assert!(SalePatch::default().is_empty());
        assert!(!SalePatch {
            date: NaiveDate::from_ymd_opt(2026, 1, 1),
            ..SalePatch::default()
        }
        .is_empty());
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_value(sample_sale()).unwrap();
        assert_eq!(json["customerName"], "Ana");
        assert_eq!(json["date"], "2026-03-01");
        assert_eq!(json["lineItems"][0]["priceMidCents"], 500);
    }
}
