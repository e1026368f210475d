//! # Stock Repository
//!
//! Inventory records. Independent of products and orders; quantities may
//! be fractional (kilograms of compost, litres of feed).

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::repository::MutationOutcome;
use garden_core::validation::validate_stock_item;
use garden_core::{generate_id, CoreError, StockItem};

/// Repository for stock item database operations.
#[derive(Debug, Clone)]
pub struct StockRepository {
    pool: SqlitePool,
}

impl StockRepository {
    /// Creates a new StockRepository.
    pub fn new(pool: SqlitePool) -> Self {
        StockRepository { pool }
    }

    /// Lists stock items ordered by name.
    pub async fn list(&self) -> DbResult<Vec<StockItem>> {
        let items = sqlx::query_as::<_, StockItem>(
            r#"
            SELECT
                id,
                name,
                COALESCE(description, '') AS description,
                quantity
            FROM stock_items
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Inserts a stock item, generating an id when blank.
    ///
    /// ## Returns
    /// The item as stored, id populated.
    pub async fn insert(&self, item: &StockItem) -> DbResult<StockItem> {
        validate_stock_item(item).map_err(CoreError::from)?;

        let mut saved = item.clone();
        if saved.id.trim().is_empty() {
            saved.id = generate_id();
        }

        debug!(id = %saved.id, name = %saved.name, "Inserting stock item");

        sqlx::query(
            "INSERT INTO stock_items (id, name, description, quantity) VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(&saved.id)
        .bind(&saved.name)
        .bind(&saved.description)
        .bind(saved.quantity)
        .execute(&self.pool)
        .await
        .map_err(|e| match DbError::from(e) {
            DbError::UniqueViolation { .. } => DbError::duplicate("id", &saved.id),
            other => other,
        })?;

        Ok(saved)
    }

    /// Rewrites a stock item by id.
    pub async fn update(&self, item: &StockItem) -> DbResult<MutationOutcome> {
        validate_stock_item(item).map_err(CoreError::from)?;

        debug!(id = %item.id, "Updating stock item");

        let result = sqlx::query(
            r#"
            UPDATE stock_items SET
                name = ?2,
                description = ?3,
                quantity = ?4
            WHERE id = ?1
            "#,
        )
        .bind(&item.id)
        .bind(&item.name)
        .bind(&item.description)
        .bind(item.quantity)
        .execute(&self.pool)
        .await?;

        Ok(MutationOutcome::from_rows_affected(result.rows_affected()))
    }

    /// Deletes a stock item by id.
    pub async fn delete(&self, id: &str) -> DbResult<MutationOutcome> {
        debug!(id = %id, "Deleting stock item");

        let result = sqlx::query("DELETE FROM stock_items WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(MutationOutcome::from_rows_affected(result.rows_affected()))
    }
}
