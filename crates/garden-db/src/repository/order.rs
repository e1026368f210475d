//! # Order Repository
//!
//! Database operations for orders and their item snapshots.
//!
//! ## Order Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Order Lifecycle                                   │
//! │                                                                         │
//! │  1. VALIDATE (no store access)                                         │
//! │     └── blank name / no items / bad quantity → DbError::Validation     │
//! │                                                                         │
//! │  2. CREATE (one transaction)                                           │
//! │     ├── id    = COALESCE(MAX(CAST(id AS INTEGER)), 0) + 1              │
//! │     ├── date  = local clock, "YYYY-MM-DD HH:MM:SS"                     │
//! │     ├── INSERT orders (status 'Pending', total = Σ price × qty)        │
//! │     └── INSERT order_items × N (fresh UUID each)                       │
//! │         any failure → ROLLBACK, nothing visible                        │
//! │                                                                         │
//! │  3. UPDATE STATUS (single statement)                                   │
//! │                                                                         │
//! │  4. DELETE (one transaction)                                           │
//! │     ├── DELETE order_items WHERE order_id = ?                          │
//! │     └── DELETE orders WHERE id = ?   (0 rows → ROLLBACK, NotFound)     │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Items are never edited after creation, and the stored total is never
//! recomputed.

use sqlx::{SqliteConnection, SqlitePool};
use tracing::{debug, info, warn};

use crate::error::{DbError, DbResult};
use crate::repository::MutationOutcome;
use garden_core::validation::validate_new_order;
use garden_core::{
    current_order_date, generate_id, next_order_id, order_total, NewOrder, Order, OrderItem,
    DEFAULT_ORDER_NAME_PREFIX, PENDING_ORDER_STATUS,
};

const SELECT_ORDER: &str = r#"
    SELECT
        id,
        date,
        COALESCE(name, ?1 || id) AS name,
        COALESCE(description, '') AS description,
        total,
        status
    FROM orders
"#;

/// Repository for order database operations.
#[derive(Debug, Clone)]
pub struct OrderRepository {
    pool: SqlitePool,
}

impl OrderRepository {
    /// Creates a new OrderRepository.
    pub fn new(pool: SqlitePool) -> Self {
        OrderRepository { pool }
    }

    /// Lists every order with its items.
    ///
    /// Issues one query for the orders and one more per order for its items.
    pub async fn list(&self) -> DbResult<Vec<Order>> {
        let mut orders = sqlx::query_as::<_, Order>(SELECT_ORDER)
            .bind(DEFAULT_ORDER_NAME_PREFIX)
            .fetch_all(&self.pool)
            .await?;

        for order in &mut orders {
            order.items = self.get_items(&order.id).await?;
        }

        debug!(count = orders.len(), "Listed orders");
        Ok(orders)
    }

    /// Gets an order with its items.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Order>> {
        let sql = format!("{} WHERE id = ?2", SELECT_ORDER);

        let order = sqlx::query_as::<_, Order>(&sql)
            .bind(DEFAULT_ORDER_NAME_PREFIX)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        match order {
            Some(mut order) => {
                order.items = self.get_items(&order.id).await?;
                Ok(Some(order))
            }
            None => Ok(None),
        }
    }

    /// Gets the item snapshots of an order in insertion order.
    pub async fn get_items(&self, order_id: &str) -> DbResult<Vec<OrderItem>> {
        let items = sqlx::query_as::<_, OrderItem>(
            r#"
            SELECT
                product_id,
                name AS product_name,
                price,
                quantity
            FROM order_items
            WHERE order_id = ?1
            "#,
        )
        .bind(order_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Creates an order and all of its items atomically.
    ///
    /// ## Arguments
    /// * `order` - Name, description and item snapshots. The total, id,
    ///   date and status are assigned here.
    ///
    /// ## Returns
    /// * `Ok(String)` - The new order id ("1", "2", ...)
    /// * `Err(DbError::Validation)` - Blank name, no items or a bad item;
    ///   the store was not touched
    /// * `Err(_)` - Any statement failed; nothing was written
    pub async fn create(&self, order: &NewOrder) -> DbResult<String> {
        validate_new_order(order)?;

        let total = order_total(&order.items);
        debug!(name = %order.name, items = order.items.len(), total, "Creating order");

        let mut tx = self.pool.begin().await.map_err(DbError::transaction)?;

        match insert_order_rows(&mut *tx, order, total).await {
            Ok(id) => {
                tx.commit().await.map_err(DbError::transaction)?;
                info!(id = %id, items = order.items.len(), total, "Order created");
                Ok(id)
            }
            Err(e) => {
                warn!(error = %e, "Order creation failed, rolling back");
                if let Err(rollback_err) = tx.rollback().await {
                    warn!(error = %rollback_err, "Rollback failed");
                }
                Err(e)
            }
        }
    }

    /// Sets an order's status. Any text is accepted.
    pub async fn update_status(&self, id: &str, status: &str) -> DbResult<MutationOutcome> {
        debug!(id = %id, status = %status, "Updating order status");

        let result = sqlx::query("UPDATE orders SET status = ?2 WHERE id = ?1")
            .bind(id)
            .bind(status)
            .execute(&self.pool)
            .await?;

        Ok(MutationOutcome::from_rows_affected(result.rows_affected()))
    }

    /// Deletes an order and its items in one transaction.
    ///
    /// ## Returns
    /// * `Ok(())` - Order removed (it may have had no items)
    /// * `Err(DbError::NotFound)` - No order has this id; nothing removed
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting order");

        let mut tx = self.pool.begin().await.map_err(DbError::transaction)?;

        let items = sqlx::query("DELETE FROM order_items WHERE order_id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let orders = sqlx::query("DELETE FROM orders WHERE id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if orders.rows_affected() == 0 {
            tx.rollback().await.map_err(DbError::transaction)?;
            return Err(DbError::not_found("Order", id));
        }

        tx.commit().await.map_err(DbError::transaction)?;

        info!(id = %id, items = items.rows_affected(), "Order deleted");
        Ok(())
    }

    /// Counts total orders (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

/// Writes the order row and every item row on an open transaction.
async fn insert_order_rows(
    conn: &mut SqliteConnection,
    order: &NewOrder,
    total: f64,
) -> DbResult<String> {
    let max_id: i64 =
        sqlx::query_scalar("SELECT COALESCE(MAX(CAST(id AS INTEGER)), 0) FROM orders")
            .fetch_one(&mut *conn)
            .await?;

    let id = next_order_id(max_id)?;
    let date = current_order_date();

    sqlx::query(
        r#"
        INSERT INTO orders (id, date, name, description, status, total)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6)
        "#,
    )
    .bind(&id)
    .bind(&date)
    .bind(&order.name)
    .bind(&order.description)
    .bind(PENDING_ORDER_STATUS)
    .bind(total)
    .execute(&mut *conn)
    .await?;

    for item in &order.items {
        sqlx::query(
            r#"
            INSERT INTO order_items (id, order_id, product_id, name, price, quantity)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(generate_id())
        .bind(&id)
        .bind(&item.product_id)
        .bind(&item.product_name)
        .bind(item.price)
        .bind(item.quantity)
        .execute(&mut *conn)
        .await?;
    }

    Ok(id)
}

// =============================================================================
// Unit Tests
// =============================================================================
