//! # Repository Module
//!
//! The data-access contract for sales and its implementations.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Sale Store Contract                                  │
//! │                                                                         │
//! │  CLI command                                                            │
//! │       │                                                                 │
//! │       │  store.create(new_sale)  →  store.list()  (explicit re-fetch)   │
//! │       ▼                                                                 │
//! │  &dyn SaleStore                                                         │
//! │  ├── list()                    insertion order                         │
//! │  ├── get(id)                                                           │
//! │  ├── create(NewSale)           validates, assigns id + created_at      │
//! │  ├── update(id, SalePatch)     merges, validates merged record         │
//! │  ├── delete(id)                                                        │
//! │  └── find_by_customer(name)    case-insensitive, newest first          │
//! │       │                                                                 │
//! │       ├──► SaleRepository      (SQLite, sale.rs)                       │
//! │       └──► InMemorySaleStore   (Vec behind a lock, memory.rs)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `update` and `delete` on an unknown id fail with [`DbError::NotFound`].
//!
//! [`DbError::NotFound`]: crate::error::DbError::NotFound

pub mod memory;
pub mod sale;

use async_trait::async_trait;
use wholesale_core::{NewSale, Sale, SalePatch};

use crate::error::DbResult;

/// Persistence operations for sales.
///
/// Every successful write is visible to the next read on the same store.
#[async_trait]
pub trait SaleStore: Send + Sync {
    /// All sales in insertion order.
    async fn list(&self) -> DbResult<Vec<Sale>>;

    /// One sale by id, `None` when absent.
    async fn get(&self, id: &str) -> DbResult<Option<Sale>>;

    /// Validates and stores a new sale, returning it with its id and
    /// creation time.
    async fn create(&self, new_sale: NewSale) -> DbResult<Sale>;

    /// Merges `patch` into the stored sale and returns the result.
    async fn update(&self, id: &str, patch: SalePatch) -> DbResult<Sale>;

    /// Removes a sale and its line items.
    async fn delete(&self, id: &str) -> DbResult<()>;

    /// Sales whose customer name matches `name` ignoring case, newest first.
    async fn find_by_customer(&self, name: &str) -> DbResult<Vec<Sale>>;
}

// =============================================================================
// Contract Tests (run against every implementation)
// =============================================================================
