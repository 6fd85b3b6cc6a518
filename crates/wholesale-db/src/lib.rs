//! # wholesale-db: Persistence Layer for the Wholesale Ledger
//!
//! Stores sales behind the [`SaleStore`] contract. The SQLite implementation
//! is the default; the in-memory one backs tests and `--in-memory` runs.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Wholesale Ledger Data Flow                          │
//! │                                                                         │
//! │  CLI command (wholesale add ...)                                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  wholesale-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌────────────────────┐  ┌────────────┐  │   │
//! │  │   │   Database    │    │    Repositories    │  │ Migrations │  │   │
//! │  │   │   (pool.rs)   │    │                    │  │ (embedded) │  │   │
//! │  │   │               │    │ SaleStore (trait)  │  │            │  │   │
//! │  │   │  SqlitePool   │◄───│ SaleRepository     │  │ 001_...sql │  │   │
//! │  │   │               │    │ InMemorySaleStore  │  │            │  │   │
//! │  │   └───────────────┘    └────────────────────┘  └────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite database file (platform data dir, or configured path)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - `SaleStore` and its implementations
//!
//! ## Usage
//!
//! ```rust,ignore
//! use wholesale_db::{Database, DbConfig, SaleStore};
//!
//! let db = Database::new(DbConfig::new("ledger.db")).await?;
//! let sales = db.sales().list().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use repository::memory::InMemorySaleStore;
pub use repository::sale::SaleRepository;
pub use repository::SaleStore;
