//! # Aggregation Module
//!
//! Derives totals and per-customer views from a snapshot of sales.
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Aggregation                                     │
//! │                                                                         │
//! │   &[Sale] (repository order)                                            │
//! │      │                                                                  │
//! │      ├──► sale_total / sale_unit_count / line_item_count   (per sale)   │
//! │      │                                                                  │
//! │      ├──► group_by_customer ──► Vec<CustomerGroup>                      │
//! │      │        key: exact customer_name                                  │
//! │      │        order: case-insensitive A→Z                               │
//! │      │                                                                  │
//! │      ├──► find_by_customer_name ──► Vec<Sale>                           │
//! │      │        match: case-insensitive exact                             │
//! │      │        order: created_at newest first                            │
//! │      │                                                                  │
//! │      └──► distinct_customer_count / overview                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing here is cached. Callers recompute from a fresh snapshot after
//! every write.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashSet};
use ts_rs::TS;

use crate::money::Money;
use crate::pricing::{line_subtotal_with, PricingPolicy};
use crate::types::Sale;

// =============================================================================
// Per-Sale Totals
// =============================================================================

/// Total value of a sale under the default pricing policy.
pub fn sale_total(sale: &Sale) -> Money {
    sale_total_with(sale, PricingPolicy::Fallback)
}

/// Total value of a sale under `policy`.
pub fn sale_total_with(sale: &Sale, policy: PricingPolicy) -> Money {
    sale.line_items
        .iter()
        .map(|item| line_subtotal_with(item, policy))
        .sum()
}

/// Sum of quantities across the sale's line items.
pub fn sale_unit_count(sale: &Sale) -> i64 {
    sale.line_items.iter().map(|item| item.quantity).sum()
}

/// Number of line items in the sale.
pub fn line_item_count(sale: &Sale) -> usize {
    sale.line_items.len()
}

// =============================================================================
// Customer Groups
// =============================================================================

/// Order of sales inside a [`CustomerGroup`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum GroupOrder {
    /// Same relative order as the input slice.
    #[default]
    Repository,
    /// `created_at` descending; equal timestamps keep repository order.
    NewestFirst,
}

/// All sales for one exact customer name, with rolled-up totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CustomerGroup {
    pub customer_name: String,
    pub sales: Vec<Sale>,
    pub total_amount: Money,
    pub sale_count: usize,
    pub total_line_items: usize,
    pub total_units: i64,
}

impl CustomerGroup {
    fn from_sales(customer_name: String, sales: Vec<Sale>, policy: PricingPolicy) -> Self {
        let total_amount = sales.iter().map(|s| sale_total_with(s, policy)).sum();
        let total_line_items = sales.iter().map(line_item_count).sum();
        let total_units = sales.iter().map(sale_unit_count).sum();

        CustomerGroup {
            customer_name,
            sale_count: sales.len(),
            sales,
            total_amount,
            total_line_items,
            total_units,
        }
    }
}

/// Case-insensitive alphabetical order, with the exact string as tiebreak
/// so that "ana" and "Ana" always come out in the same order.
fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

fn newest_first(sales: &mut [Sale]) {
    // sort_by is stable, so equal timestamps keep their input order
    sales.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

/// Partitions `sales` by exact customer name.
///
/// Groups come back sorted case-insensitively by name. Sales inside each
/// group keep the input order.
pub fn group_by_customer(sales: &[Sale]) -> Vec<CustomerGroup> {
    group_by_customer_with(sales, GroupOrder::Repository, PricingPolicy::Fallback)
}

/// [`group_by_customer`] with an explicit in-group order and pricing policy.
pub fn group_by_customer_with(
    sales: &[Sale],
    order: GroupOrder,
    policy: PricingPolicy,
) -> Vec<CustomerGroup> {
    let mut buckets: BTreeMap<&str, Vec<Sale>> = BTreeMap::new();
    for sale in sales {
        buckets
            .entry(sale.customer_name.as_str())
            .or_default()
            .push(sale.clone());
    }

    let mut groups: Vec<CustomerGroup> = buckets
        .into_iter()
        .map(|(name, mut group_sales)| {
            if order == GroupOrder::NewestFirst {
                newest_first(&mut group_sales);
            }
            CustomerGroup::from_sales(name.to_string(), group_sales, policy)
        })
        .collect();

    groups.sort_by(|a, b| compare_names(&a.customer_name, &b.customer_name));
    groups
}

// =============================================================================
// Customer Lookup
// =============================================================================

/// Sales whose customer name equals `name` ignoring case, newest first.
///
/// Matching is exact after Unicode lowercasing: "Juan" finds "JUAN" and
/// "juan" but not "Juana".
pub fn find_by_customer_name(sales: &[Sale], name: &str) -> Vec<Sale> {
    let wanted = name.to_lowercase();
    let mut matches: Vec<Sale> = sales
        .iter()
        .filter(|sale| sale.customer_name.to_lowercase() == wanted)
        .cloned()
        .collect();
    newest_first(&mut matches);
    matches
}

/// Number of distinct exact customer names.
pub fn distinct_customer_count(sales: &[Sale]) -> usize {
    sales
        .iter()
        .map(|sale| sale.customer_name.as_str())
        .collect::<HashSet<_>>()
        .len()
}

/// One customer's purchase history with totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CustomerHistory {
    /// The name as queried, not as stored.
    pub customer_name: String,
    pub sales: Vec<Sale>,
    pub sale_count: usize,
    pub total_units: i64,
    pub total_amount: Money,
}

impl CustomerHistory {
    /// Builds the totals over sales that are already filtered and ordered.
    pub fn from_sales(customer_name: impl Into<String>, sales: Vec<Sale>, policy: PricingPolicy) -> Self {
        CustomerHistory {
            customer_name: customer_name.into(),
            sale_count: sales.len(),
            total_units: sales.iter().map(sale_unit_count).sum(),
            total_amount: sales.iter().map(|s| sale_total_with(s, policy)).sum(),
            sales,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.sales.is_empty()
    }
}

/// Case-insensitive lookup plus totals, under the default policy.
pub fn customer_history(sales: &[Sale], name: &str) -> CustomerHistory {
    customer_history_with(sales, name, PricingPolicy::Fallback)
}

pub fn customer_history_with(sales: &[Sale], name: &str, policy: PricingPolicy) -> CustomerHistory {
    CustomerHistory::from_sales(name, find_by_customer_name(sales, name), policy)
}

// =============================================================================
// Overview
// =============================================================================

/// Header counts for the sales list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SalesOverview {
    pub customer_count: usize,
    pub sale_count: usize,
}

pub fn overview(sales: &[Sale]) -> SalesOverview {
    SalesOverview {
        customer_count: distinct_customer_count(sales),
        sale_count: sales.len(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
