//! Sample catalog written into an empty store.
//!
//! Seeding is governed by the row count of `products`, not by the schema
//! version, so an emptied catalog is seeded again on the next startup.

use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};

/// One sample catalog row: (id, name, price, description).
pub type SampleProduct = (&'static str, &'static str, f64, &'static str);

/// The fixed sample catalog.
pub const SAMPLE_PRODUCTS: &[SampleProduct] = &[
    ("1", "Tomato Plant", 5.99, "Organic tomato seedling, ready to plant"),
    ("2", "Garden Soil", 12.99, "Premium organic soil mix for vegetables"),
    ("3", "Watering Can", 9.99, "Durable plastic 2-gallon watering can"),
];

/// Inserts [`SAMPLE_PRODUCTS`] if the catalog is empty.
///
/// ## Returns
/// Number of rows inserted (0 when the catalog already has products).
pub async fn seed_sample_products(pool: &SqlitePool) -> DbResult<usize> {
    let mut tx = pool.begin().await.map_err(DbError::transaction)?;

    let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
        .fetch_one(&mut *tx)
        .await?;

    if existing > 0 {
        debug!(existing, "Catalog not empty, skipping sample products");
        return Ok(0);
    }

    for (id, name, price, description) in SAMPLE_PRODUCTS {
        sqlx::query(
            "INSERT INTO products (id, name, price, description, status) VALUES (?1, ?2, ?3, ?4, ?5)",
        )
        .bind(*id)
        .bind(*name)
        .bind(*price)
        .bind(*description)
        .bind(garden_core::DEFAULT_PRODUCT_STATUS)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await.map_err(DbError::transaction)?;

    info!(count = SAMPLE_PRODUCTS.len(), "Seeded sample products");
    Ok(SAMPLE_PRODUCTS.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    #[tokio::test]
    async fn test_sample_rows_have_literal_ids() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let products = db.products().list().await.unwrap();
        let ids: Vec<&str> = products.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);

        let soil = &products[1];
        assert_eq!(soil.name, "Garden Soil");
        assert_eq!(soil.price, 12.99);
        assert_eq!(soil.status, "In Stock");
    }

    #[tokio::test]
    async fn test_seed_skips_non_empty_catalog() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        assert_eq!(seed_sample_products(db.pool()).await.unwrap(), 0);
        assert_eq!(db.products().count().await.unwrap(), 3);
    }
}
