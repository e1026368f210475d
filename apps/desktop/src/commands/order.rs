//! # Order Commands
//!
//! Order creation, status changes and deletion.
//!
//! ## Create Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  create_order(name, description, items)                                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  NewOrder ──► OrderRepository::create                                   │
//! │                 ├── validation failure → VALIDATION_ERROR (no writes)  │
//! │                 ├── statement failure  → DATABASE_ERROR (rolled back)  │
//! │                 └── committed          → "4"                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use garden_core::{NewOrder, Order, OrderItem};
use garden_db::MutationOutcome;
use tracing::{debug, info, warn};

use crate::error::ApiError;
use crate::state::DbState;

/// Lists every order with its items.
pub async fn get_orders(db: &DbState) -> Result<Vec<Order>, ApiError> {
    let orders = db.inner().orders().list().await?;
    debug!(count = orders.len(), "get_orders complete");
    Ok(orders)
}

/// Creates an order from item snapshots.
///
/// ## Arguments
/// * `name` - Customer or order name, must not be blank
/// * `description` - Free text, may be empty
/// * `items` - At least one item
///
/// ## Returns
/// The new order id.
pub async fn create_order(
    db: &DbState,
    name: String,
    description: String,
    items: Vec<OrderItem>,
) -> Result<String, ApiError> {
    debug!(name = %name, items = items.len(), "create_order command");

    let order = NewOrder::new(name, description, items);
    let id = db.inner().orders().create(&order).await?;

    info!(id = %id, "Order created");
    Ok(id)
}

/// Sets an order's status. An unknown id is logged and otherwise ignored.
pub async fn update_order_status(db: &DbState, id: String, status: String) -> Result<(), ApiError> {
    debug!(id = %id, status = %status, "update_order_status command");

    if db.inner().orders().update_status(&id, &status).await? == MutationOutcome::NotFound {
        warn!(id = %id, "update_order_status matched no order");
    }

    Ok(())
}

/// Deletes an order and its items.
///
/// ## Returns
/// `ApiError` with code `NOT_FOUND` when no order has this id.
pub async fn delete_order(db: &DbState, id: String) -> Result<(), ApiError> {
    debug!(id = %id, "delete_order command");

    db.inner().orders().delete(&id).await.map_err(|e| {
        if e.is_not_found() {
            warn!(id = %id, "delete_order: no order found");
        }
        e
    })?;

    info!(id = %id, "Order deleted");
    Ok(())
}
