use async_trait::async_trait;
use sqlx::MySqlPool;
use sqlx::mysql::MySqlPoolOptions;

use crate::config::DatabaseConfig;
use crate::domain::models::product::{NewProduct, Product, ProductChanges};
use crate::error::AppError;
use crate::store::ProductStore;

const CREATE_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS products (
    id           BIGINT       NOT NULL AUTO_INCREMENT PRIMARY KEY,
    name         VARCHAR(255) NOT NULL,
    price        DOUBLE       NOT NULL,
    availability BOOLEAN      NOT NULL DEFAULT TRUE,
    created_at   TIMESTAMP    NOT NULL DEFAULT CURRENT_TIMESTAMP,
    updated_at   TIMESTAMP    NOT NULL DEFAULT CURRENT_TIMESTAMP ON UPDATE CURRENT_TIMESTAMP
)
"#;

pub struct MySqlProductStore {
    pool: MySqlPool,
}

impl MySqlProductStore {
    /// Builds a lazy pool: no connection is attempted here, so a down
    /// database delays failures to individual requests instead of startup.
    pub fn connect(config: &DatabaseConfig) -> Result<Self, AppError> {
        tracing::info!("Initializing MySQL connection pool");

        let pool = MySqlPoolOptions::new()
            .max_connections(config.max_connections)
            .connect_lazy(&config.url)?;

        Ok(Self { pool })
    }

    /// Initial table sync; idempotent.
    pub async fn sync_schema(&self) -> Result<(), AppError> {
        sqlx::query(CREATE_TABLE).execute(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl ProductStore for MySqlProductStore {
    async fn find_all(&self) -> Result<Vec<Product>, AppError> {
        let products = sqlx::query_as::<_, Product>(
            r#"SELECT id, name, price, availability, created_at, updated_at
               FROM products ORDER BY id DESC"#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    async fn find(&self, id: i64) -> Result<Option<Product>, AppError> {
        let product = sqlx::query_as::<_, Product>(
            r#"SELECT id, name, price, availability, created_at, updated_at
               FROM products WHERE id = ?"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    async fn insert(&self, new: NewProduct) -> Result<Product, AppError> {
        let result = sqlx::query(
            r#"INSERT INTO products (name, price, availability) VALUES (?, ?, ?)"#,
        )
        .bind(&new.name)
        .bind(new.price)
        .bind(new.availability)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_id() as i64;

        self.find(id)
            .await?
            .ok_or_else(|| AppError::Internal(format!("inserted product {} vanished", id)))
    }

    async fn update(&self, id: i64, changes: ProductChanges) -> Result<Option<Product>, AppError> {
        // rows_affected is 0 both for a missing row and for a no-op write,
        // so existence is decided by the read.
        if self.find(id).await?.is_none() {
            return Ok(None);
        }

        sqlx::query(r#"UPDATE products SET name = ?, price = ?, availability = ? WHERE id = ?"#)
            .bind(&changes.name)
            .bind(changes.price)
            .bind(changes.availability)
            .bind(id)
            .execute(&self.pool)
            .await?;

        self.find(id).await
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query(r#"DELETE FROM products WHERE id = ?"#)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
