//! In-memory [`SaleStore`] for tests and throwaway sessions.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use wholesale_core::aggregate::find_by_customer_name;
use wholesale_core::validation::{validate_new_sale, validate_sale};
use wholesale_core::{created_at_from, NewSale, Sale, SalePatch};

use super::SaleStore;
use crate::error::{DbError, DbResult};

/// Sales kept in a vector, in insertion order.
///
/// Nothing survives the process.
#[derive(Debug, Default)]
pub struct InMemorySaleStore {
    sales: RwLock<Vec<Sale>>,
}

impl InMemorySaleStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SaleStore for InMemorySaleStore {
    async fn list(&self) -> DbResult<Vec<Sale>> {
        Ok(self.sales.read().await.clone())
    }

    async fn get(&self, id: &str) -> DbResult<Option<Sale>> {
        let sales = self.sales.read().await;
        Ok(sales.iter().find(|s| s.id == id).cloned())
    }

    async fn create(&self, new_sale: NewSale) -> DbResult<Sale> {
        validate_new_sale(&new_sale)?;

        let sale = Sale::from_new(
            Uuid::new_v4().to_string(),
            created_at_from(Utc::now()),
            new_sale,
        );

        debug!(id = %sale.id, "Storing sale in memory");
        self.sales.write().await.push(sale.clone());
        Ok(sale)
    }

    async fn update(&self, id: &str, patch: SalePatch) -> DbResult<Sale> {
        let mut sales = self.sales.write().await;
        let slot = sales
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| DbError::not_found("Sale", id))?;

        let mut merged = slot.clone();
        merged.apply_patch(patch);
        validate_sale(&merged)?;

        *slot = merged.clone();
        Ok(merged)
    }

    async fn delete(&self, id: &str) -> DbResult<()> {
        let mut sales = self.sales.write().await;
        let index = sales
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| DbError::not_found("Sale", id))?;

        // remove, not swap_remove: listing order is insertion order
        sales.remove(index);
        Ok(())
    }

    async fn find_by_customer(&self, name: &str) -> DbResult<Vec<Sale>> {
        let sales = self.sales.read().await;
        Ok(find_by_customer_name(&sales, name))
    }
}
