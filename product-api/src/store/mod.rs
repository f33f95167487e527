//! Persistence seam for product records.

pub mod memory;
pub mod mysql;

use async_trait::async_trait;

use crate::domain::models::product::{NewProduct, Product, ProductChanges};
use crate::error::AppError;

/// The store owns every persisted record; handlers go through this trait and
/// never touch a connection directly. Constructed once at startup and handed
/// to the router via `AppState`.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// All records, newest id first.
    async fn find_all(&self) -> Result<Vec<Product>, AppError>;

    async fn find(&self, id: i64) -> Result<Option<Product>, AppError>;

    async fn insert(&self, new: NewProduct) -> Result<Product, AppError>;

    /// Overwrites the mutable fields; `None` when no row with `id` exists.
    async fn update(&self, id: i64, changes: ProductChanges) -> Result<Option<Product>, AppError>;

    /// `false` when no row with `id` existed.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;
}
