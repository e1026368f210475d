//! # Product Repository
//!
//! Database operations for the product catalog.
//!
//! ## Key Operations
//! - List in natural row order
//! - Insert with generated id
//! - Update in place, delete by id
//!
//! ## Status Defaulting
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Where "In Stock" Comes From                          │
//! │                                                                         │
//! │  Row written before the status column existed                          │
//! │       │   status = NULL                                                 │
//! │       ▼                                                                 │
//! │  SELECT COALESCE(status, 'In Stock')     ← read path                   │
//! │                                                                         │
//! │  Product submitted with status = ""                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  stored as 'In Stock'                    ← write path                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Products are not referenced by foreign key; deleting one leaves the
//! name/price snapshots in existing orders untouched.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::repository::MutationOutcome;
use garden_core::validation::validate_product;
use garden_core::{generate_id, CoreError, Product, DEFAULT_PRODUCT_STATUS};

const SELECT_PRODUCT: &str = r#"
    SELECT
        id,
        name,
        price,
        COALESCE(description, '') AS description,
        COALESCE(status, ?1) AS status
    FROM products
"#;

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = ProductRepository::new(pool);
///
/// let products = repo.list().await?;
/// let id = repo.insert(&product).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Lists every product in the store's natural row order.
    pub async fn list(&self) -> DbResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(SELECT_PRODUCT)
            .bind(DEFAULT_PRODUCT_STATUS)
            .fetch_all(&self.pool)
            .await?;

        debug!(count = products.len(), "Listed products");
        Ok(products)
    }

    /// Gets a product by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - Product found
    /// * `Ok(None)` - Product not found
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Product>> {
        let sql = format!("{} WHERE id = ?2", SELECT_PRODUCT);

        let product = sqlx::query_as::<_, Product>(&sql)
            .bind(DEFAULT_PRODUCT_STATUS)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(product)
    }

    /// Inserts a new product.
    ///
    /// ## Arguments
    /// * `product` - Product to insert. A blank id is replaced by a new
    ///   UUID, a blank status by "In Stock".
    ///
    /// ## Returns
    /// * `Ok(String)` - The id the product was stored under
    /// * `Err(DbError::UniqueViolation)` - Id already exists
    pub async fn insert(&self, product: &Product) -> DbResult<String> {
        validate_product(product).map_err(CoreError::from)?;

        let id = if product.id.trim().is_empty() {
            generate_id()
        } else {
            product.id.clone()
        };

        debug!(id = %id, name = %product.name, "Inserting product");

        sqlx::query(
            r#"
            INSERT INTO products (id, name, price, description, status)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(&id)
        .bind(&product.name)
        .bind(product.price)
        .bind(&product.description)
        .bind(status_or_default(&product.status))
        .execute(&self.pool)
        .await
        .map_err(|e| match DbError::from(e) {
            DbError::UniqueViolation { .. } => DbError::duplicate("id", &id),
            other => other,
        })?;

        Ok(id)
    }

    /// Updates an existing product's name, price, description and status.
    ///
    /// ## Returns
    /// * `Ok(MutationOutcome::Updated)` - Row rewritten
    /// * `Ok(MutationOutcome::NotFound)` - No product has this id
    pub async fn update(&self, product: &Product) -> DbResult<MutationOutcome> {
        validate_product(product).map_err(CoreError::from)?;

        debug!(id = %product.id, "Updating product");

        let result = sqlx::query(
            r#"
            UPDATE products SET
                name = ?2,
                price = ?3,
                description = ?4,
                status = ?5
            WHERE id = ?1
            "#,
        )
        .bind(&product.id)
        .bind(&product.name)
        .bind(product.price)
        .bind(&product.description)
        .bind(status_or_default(&product.status))
        .execute(&self.pool)
        .await?;

        Ok(MutationOutcome::from_rows_affected(result.rows_affected()))
    }

    /// Deletes a product by id, whether or not orders reference it.
    ///
    /// ## Returns
    /// * `Err(DbError::NotFound)` - No product has this id
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting product");

        let result = sqlx::query("DELETE FROM products WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }

    /// Counts total products (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

fn status_or_default(status: &str) -> &str {
    if status.trim().is_empty() {
        DEFAULT_PRODUCT_STATUS
    } else {
        status
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::pool::{Database, DbConfig};
    use crate::repository::MutationOutcome;
    use crate::DbError;
    use garden_core::{NewOrder, OrderItem, Product};

    fn product(id: &str, name: &str, price: f64) -> Product {
        Product {
            id: id.to_string(),
            name: name.to_string(),
            price,
            description: String::new(),
            status: String::new(),
        }
    }

    #[tokio::test]
    async fn test_insert_generates_id_and_default_status() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.products();

        let id = repo.insert(&product("", "Rake", 14.5)).await.unwrap();
        assert!(!id.is_empty());

        let stored = repo.get_by_id(&id).await.unwrap().unwrap();
        assert_eq!(stored.name, "Rake");
        assert_eq!(stored.status, "In Stock");
        assert_eq!(stored.description, "");
    }

    #[tokio::test]
    async fn test_insert_keeps_caller_id() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.products();

        let id = repo.insert(&product("rake-01", "Rake", 14.5)).await.unwrap();
        assert_eq!(id, "rake-01");
        assert_eq!(repo.count().await.unwrap(), 4);
    }

    #[tokio::test]
    async fn test_insert_duplicate_id() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let err = db.products().insert(&product("1", "Clone", 1.0)).await.unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { ref value, .. } if value == "1"));
    }

    #[tokio::test]
    async fn test_insert_rejects_negative_price() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let err = db.products().insert(&product("", "Bad", -1.0)).await.unwrap_err();
        assert!(matches!(err, DbError::Validation(_)));
        assert_eq!(db.products().count().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_null_status_reads_as_in_stock() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        sqlx::query("INSERT INTO products (id, name, price, status) VALUES ('old', 'Trowel', 4.25, NULL)")
            .execute(db.pool())
            .await
            .unwrap();

        let listed = db.products().list().await.unwrap();
        let trowel = listed.iter().find(|p| p.id == "old").unwrap();
        assert_eq!(trowel.status, "In Stock");
        assert_eq!(trowel.description, "");
    }

    #[tokio::test]
    async fn test_update_existing_and_missing() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.products();

        let mut tomato = repo.get_by_id("1").await.unwrap().unwrap();
        tomato.price = 6.49;
        tomato.status = "Low Stock".to_string();
        assert_eq!(repo.update(&tomato).await.unwrap(), MutationOutcome::Updated);

        let stored = repo.get_by_id("1").await.unwrap().unwrap();
        assert_eq!(stored.price, 6.49);
        assert_eq!(stored.status, "Low Stock");

        let ghost = product("ghost", "Ghost", 1.0);
        assert_eq!(repo.update(&ghost).await.unwrap(), MutationOutcome::NotFound);
        assert_eq!(repo.count().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_delete_missing_is_not_found() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let err = db.products().delete("nope").await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(db.products().count().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_delete_ignores_order_references() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let tomato = db.products().get_by_id("1").await.unwrap().unwrap();
        let order = NewOrder::new("Alice", "", vec![OrderItem::from_product(&tomato, 2)]);
        let order_id = db.orders().create(&order).await.unwrap();

        db.products().delete("1").await.unwrap();

        assert!(db.products().get_by_id("1").await.unwrap().is_none());
        assert_eq!(db.products().count().await.unwrap(), 2);

        let stored = db.orders().get_by_id(&order_id).await.unwrap().unwrap();
        assert_eq!(stored.items[0].product_name, "Tomato Plant");
    }
}
