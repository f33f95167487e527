use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One stored product row. Timestamps are system-managed and never leave the
/// API (responses use [`crate::api::products::ProductResponse`]).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub availability: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for an insert; the store assigns `id` and timestamps.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub price: f64,
    pub availability: bool,
}

/// Full replacement of the three mutable fields.
#[derive(Debug, Clone)]
pub struct ProductChanges {
    pub name: String,
    pub price: f64,
    pub availability: bool,
}
