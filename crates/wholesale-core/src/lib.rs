//! # wholesale-core: Pure Business Logic for the Wholesale Ledger
//!
//! This crate holds the rules every surface of the ledger must agree on:
//! which tier price applies to a line item, what a sale is worth, and how
//! sales roll up per customer. Everything here is a pure function with zero
//! I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Wholesale Ledger Architecture                       │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    apps/cli (`wholesale`)                       │   │
//! │  │    add / edit / delete ──► list / customers / history           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ wholesale-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │  pricing  │  │ aggregate │  │ validation│  │   │
//! │  │   │   Sale    │  │ tier rule │  │ totals &  │  │   rules   │  │   │
//! │  │   │ LineItem  │  │  policy   │  │  groups   │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 wholesale-db (Persistence Layer)                │   │
//! │  │            SaleStore trait, SQLite and in-memory stores         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (LineItem, Sale, NewSale, SalePatch)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`pricing`] - Tier price lookup and pricing policies
//! - [`aggregate`] - Sale totals, customer groups and history lookups
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Example Usage
//!
//! ```rust
//! use wholesale_core::money::Money;
//! use wholesale_core::pricing::applicable_price;
//! use wholesale_core::types::LineItem;
//!
//! let item = LineItem {
//!     name: "Basic T-Shirt".to_string(),
//!     sku: "TSH-001".to_string(),
//!     quantity: 10,
//!     price_high_cents: 0,
//!     price_mid_cents: 500,
//!     price_low_cents: 700,
//! };
//!
//! // 10 units fall in the 6-14 tier
//! assert_eq!(applicable_price(&item), Money::from_cents(500));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod aggregate;
pub mod error;
pub mod money;
pub mod pricing;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use aggregate::{CustomerGroup, CustomerHistory, GroupOrder, SalesOverview};
pub use error::ValidationError;
pub use money::Money;
pub use pricing::{PriceTier, PricingPolicy};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Minimum quantity for the high (15+) price tier.
pub const HIGH_TIER_MIN_QUANTITY: i64 = 15;

/// Minimum quantity for the mid (6-14) price tier.
pub const MID_TIER_MIN_QUANTITY: i64 = 6;

/// Minimum quantity for the low (2-5) price tier.
///
/// A single unit matches no tier at all and is priced by fallback.
pub const LOW_TIER_MIN_QUANTITY: i64 = 2;

/// Largest quantity accepted on one line item.
pub const MAX_QUANTITY: i64 = 1_000_000;

/// Largest tier price accepted, in cents ($1,000,000.00).
pub const MAX_PRICE_CENTS: i64 = 100_000_000;

/// Most line items one sale may carry.
///
/// With [`MAX_QUANTITY`] and [`MAX_PRICE_CENTS`] this caps a sale total at
/// 1e17 cents, well inside `i64`.
pub const MAX_LINE_ITEMS: usize = 1_000;

/// Maximum length of a customer name.
pub const MAX_CUSTOMER_NAME_LEN: usize = 200;

/// Maximum length of a product name on a line item.
pub const MAX_PRODUCT_NAME_LEN: usize = 200;

/// Maximum length of a SKU.
pub const MAX_SKU_LEN: usize = 50;

/// Maximum length of the free-text observations on a sale.
pub const MAX_OBSERVATIONS_LEN: usize = 2000;
