//! # Sale Repository
//!
//! SQLite-backed [`SaleStore`].
//!
//! ## Storage Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Sale Storage                                      │
//! │                                                                         │
//! │  sales                               sale_line_items                    │
//! │  ┌────────────────────────┐         ┌──────────────────────────────┐   │
//! │  │ seq (insertion order)  │         │ sale_id ──► sales.id         │   │
//! │  │ id (UUID, unique)      │◄────────│ position (0, 1, 2, ...)      │   │
//! │  │ customer_name          │ cascade │ name, sku, quantity          │   │
//! │  │ customer_key (lower)   │ delete  │ price_{high,mid,low}_cents   │   │
//! │  │ sale_date, observations│         └──────────────────────────────┘   │
//! │  │ created_at             │                                            │
//! │  └────────────────────────┘                                            │
//! │                                                                         │
//! │  create / update: sale row + all line items in ONE transaction         │
//! │  update: line items are deleted and re-inserted as a whole             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{SqliteConnection, SqlitePool};
use std::collections::HashMap;
use tracing::{debug, info};
use uuid::Uuid;

use wholesale_core::aggregate::find_by_customer_name;
use wholesale_core::validation::{customer_key, validate_new_sale, validate_sale};
use wholesale_core::{created_at_from, LineItem, NewSale, Sale, SalePatch};

use super::SaleStore;
use crate::error::{DbError, DbResult};

// =============================================================================
// Row Types
// =============================================================================

#[derive(Debug, sqlx::FromRow)]
struct SaleRow {
    id: String,
    customer_name: String,
    sale_date: NaiveDate,
    observations: String,
    created_at: DateTime<Utc>,
}

#[derive(Debug, sqlx::FromRow)]
struct LineItemRow {
    sale_id: String,
    name: String,
    sku: String,
    quantity: i64,
    price_high_cents: i64,
    price_mid_cents: i64,
    price_low_cents: i64,
}

impl From<LineItemRow> for LineItem {
    fn from(row: LineItemRow) -> Self {
        LineItem {
            name: row.name,
            sku: row.sku,
            quantity: row.quantity,
            price_high_cents: row.price_high_cents,
            price_mid_cents: row.price_mid_cents,
            price_low_cents: row.price_low_cents,
        }
    }
}

/// Joins sale rows with their line items, keeping the sale rows' order.
fn assemble(sales: Vec<SaleRow>, items: Vec<LineItemRow>) -> Vec<Sale> {
    let mut items_by_sale: HashMap<String, Vec<LineItem>> = HashMap::new();
    for row in items {
        items_by_sale
            .entry(row.sale_id.clone())
            .or_default()
            .push(row.into());
    }

    sales
        .into_iter()
        .map(|row| Sale {
            line_items: items_by_sale.remove(&row.id).unwrap_or_default(),
            id: row.id,
            customer_name: row.customer_name,
            date: row.sale_date,
            observations: row.observations,
            created_at: row.created_at,
        })
        .collect()
}

const SALE_COLUMNS: &str = "id, customer_name, sale_date, observations, created_at";

const ITEM_COLUMNS: &str =
    "sale_id, name, sku, quantity, price_high_cents, price_mid_cents, price_low_cents";

// =============================================================================
// Repository
// =============================================================================

/// Repository for sale database operations.
#[derive(Debug, Clone)]
pub struct SaleRepository {
    pool: SqlitePool,
}

impl SaleRepository {
    /// Creates a new SaleRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SaleRepository { pool }
    }

    async fn insert_line_items(
        conn: &mut SqliteConnection,
        sale_id: &str,
        items: &[LineItem],
    ) -> DbResult<()> {
        for (position, item) in items.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO sale_line_items (
                    sale_id, position, name, sku, quantity,
                    price_high_cents, price_mid_cents, price_low_cents
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
                "#,
            )
            .bind(sale_id)
            .bind(position as i64)
            .bind(&item.name)
            .bind(&item.sku)
            .bind(item.quantity)
            .bind(item.price_high_cents)
            .bind(item.price_mid_cents)
            .bind(item.price_low_cents)
            .execute(&mut *conn)
            .await?;
        }
        Ok(())
    }
}

#[async_trait]
impl SaleStore for SaleRepository {
    async fn list(&self) -> DbResult<Vec<Sale>> {
        let sales: Vec<SaleRow> =
            sqlx::query_as(&format!("SELECT {SALE_COLUMNS} FROM sales ORDER BY seq"))
                .fetch_all(&self.pool)
                .await?;

        let items: Vec<LineItemRow> = sqlx::query_as(&format!(
            "SELECT {ITEM_COLUMNS} FROM sale_line_items ORDER BY sale_id, position"
        ))
        .fetch_all(&self.pool)
        .await?;

        debug!(count = sales.len(), "Listed sales");
        Ok(assemble(sales, items))
    }

    async fn get(&self, id: &str) -> DbResult<Option<Sale>> {
        let sale: Option<SaleRow> =
            sqlx::query_as(&format!("SELECT {SALE_COLUMNS} FROM sales WHERE id = ?1"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        let Some(sale) = sale else {
            return Ok(None);
        };

        let items: Vec<LineItemRow> = sqlx::query_as(&format!(
            "SELECT {ITEM_COLUMNS} FROM sale_line_items WHERE sale_id = ?1 ORDER BY position"
        ))
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        Ok(assemble(vec![sale], items).pop())
    }

    async fn create(&self, new_sale: NewSale) -> DbResult<Sale> {
        validate_new_sale(&new_sale)?;

        let id = Uuid::new_v4().to_string();
        let created_at = created_at_from(Utc::now());
        let sale = Sale::from_new(id, created_at, new_sale);

        debug!(id = %sale.id, customer = %sale.customer_name, "Creating sale");

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        sqlx::query(
            r#"
            INSERT INTO sales (id, customer_name, customer_key, sale_date, observations, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&sale.id)
        .bind(&sale.customer_name)
        .bind(customer_key(&sale.customer_name))
        .bind(sale.date)
        .bind(&sale.observations)
        .bind(sale.created_at)
        .execute(&mut *tx)
        .await?;

        Self::insert_line_items(&mut *tx, &sale.id, &sale.line_items).await?;

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        info!(id = %sale.id, items = sale.line_items.len(), "Sale created");
        Ok(sale)
    }

    async fn update(&self, id: &str, patch: SalePatch) -> DbResult<Sale> {
        let mut sale = self
            .get(id)
            .await?
            .ok_or_else(|| DbError::not_found("Sale", id))?;

        sale.apply_patch(patch);
        validate_sale(&sale)?;

        debug!(id = %sale.id, "Updating sale");

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        let result = sqlx::query(
            r#"
            UPDATE sales SET
                customer_name = ?2,
                customer_key = ?3,
                sale_date = ?4,
                observations = ?5
            WHERE id = ?1
            "#,
        )
        .bind(&sale.id)
        .bind(&sale.customer_name)
        .bind(customer_key(&sale.customer_name))
        .bind(sale.date)
        .bind(&sale.observations)
        .execute(&mut *tx)
        .await?;

        // deleted between the read and the write
        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Sale", id));
        }

        sqlx::query("DELETE FROM sale_line_items WHERE sale_id = ?1")
            .bind(&sale.id)
            .execute(&mut *tx)
            .await?;

        Self::insert_line_items(&mut *tx, &sale.id, &sale.line_items).await?;

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        info!(id = %sale.id, "Sale updated");
        Ok(sale)
    }

    async fn delete(&self, id: &str) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM sales WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Sale", id));
        }

        info!(id = %id, "Sale deleted");
        Ok(())
    }

    async fn find_by_customer(&self, name: &str) -> DbResult<Vec<Sale>> {
        let key = customer_key(name);

        let sales: Vec<SaleRow> = sqlx::query_as(&format!(
            "SELECT {SALE_COLUMNS} FROM sales WHERE customer_key = ?1 ORDER BY seq"
        ))
        .bind(&key)
        .fetch_all(&self.pool)
        .await?;

        let items: Vec<LineItemRow> = sqlx::query_as(&format!(
            r#"
            SELECT {ITEM_COLUMNS} FROM sale_line_items
            WHERE sale_id IN (SELECT id FROM sales WHERE customer_key = ?1)
            ORDER BY sale_id, position
            "#
        ))
        .bind(&key)
        .fetch_all(&self.pool)
        .await?;

        let matches = assemble(sales, items);
        debug!(customer = %name, count = matches.len(), "Found customer sales");

        // newest first, same tie rules as the in-memory lookup
        Ok(find_by_customer_name(&matches, name))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
