use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use crate::domain::models::product::{NewProduct, Product, ProductChanges};
use crate::error::AppError;
use crate::store::ProductStore;

/// In-memory store with the same contract as the MySQL one. Backs the
/// integration suite and database-less development runs.
#[derive(Default)]
pub struct MemoryProductStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    next_id: i64,
    rows: BTreeMap<i64, Product>,
}

impl MemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductStore for MemoryProductStore {
    async fn find_all(&self) -> Result<Vec<Product>, AppError> {
        let inner = self.inner.lock().await;
        // BTreeMap iterates ascending; the contract is newest id first.
        Ok(inner.rows.values().rev().cloned().collect())
    }

    async fn find(&self, id: i64) -> Result<Option<Product>, AppError> {
        let inner = self.inner.lock().await;
        Ok(inner.rows.get(&id).cloned())
    }

    async fn insert(&self, new: NewProduct) -> Result<Product, AppError> {
        let mut inner = self.inner.lock().await;
        inner.next_id += 1;
        let now = Utc::now();
        let product = Product {
            id: inner.next_id,
            name: new.name,
            price: new.price,
            availability: new.availability,
            created_at: now,
            updated_at: now,
        };
        inner.rows.insert(product.id, product.clone());
        Ok(product)
    }

    async fn update(&self, id: i64, changes: ProductChanges) -> Result<Option<Product>, AppError> {
        let mut inner = self.inner.lock().await;
        let Some(row) = inner.rows.get_mut(&id) else {
            return Ok(None);
        };
        row.name = changes.name;
        row.price = changes.price;
        row.availability = changes.availability;
        row.updated_at = Utc::now();
        Ok(Some(row.clone()))
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let mut inner = self.inner.lock().await;
        Ok(inner.rows.remove(&id).is_some())
    }
}
