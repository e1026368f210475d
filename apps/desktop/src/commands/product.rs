//! # Product Commands
//!
//! Catalog listing and maintenance.

use garden_core::Product;
use garden_db::MutationOutcome;
use std::time::Instant;
use tracing::{debug, info, warn};

use crate::error::ApiError;
use crate::state::DbState;

/// Lists every product in the catalog.
///
/// ## Returns
/// Products in store order, status defaulted to "In Stock" when unset.
pub async fn get_products(db: &DbState) -> Result<Vec<Product>, ApiError> {
    let start = Instant::now();

    let products = db.inner().products().list().await?;

    info!(
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        count = products.len(),
        "get_products complete"
    );
    Ok(products)
}

/// Gets a single product by id.
///
/// ## Returns
/// `None` when no product has this id.
pub async fn get_product_by_id(db: &DbState, id: String) -> Result<Option<Product>, ApiError> {
    debug!(id = %id, "get_product_by_id command");
    Ok(db.inner().products().get_by_id(&id).await?)
}

/// Adds a product and returns the id it was stored under.
pub async fn add_product(db: &DbState, product: Product) -> Result<String, ApiError> {
    debug!(name = %product.name, "add_product command");

    let id = db.inner().products().insert(&product).await?;

    info!(id = %id, "Product added");
    Ok(id)
}

/// Updates a product in place.
///
/// Returns `true` whether or not a product with this id existed.
pub async fn update_product(db: &DbState, product: Product) -> Result<bool, ApiError> {
    debug!(id = %product.id, "update_product command");

    if db.inner().products().update(&product).await? == MutationOutcome::NotFound {
        warn!(id = %product.id, "update_product matched no product");
    }

    Ok(true)
}

/// Deletes a product by id.
///
/// ## Returns
/// `ApiError` with code `NOT_FOUND` when no product has this id.
pub async fn delete_product(db: &DbState, id: String) -> Result<(), ApiError> {
    debug!(id = %id, "delete_product command");

    db.inner().products().delete(&id).await.map_err(|e| {
        if e.is_not_found() {
            warn!(id = %id, "delete_product: no product found");
        }
        e
    })?;

    info!(id = %id, "Product deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use garden_db::{Database, DbConfig};

    async fn state() -> DbState {
        DbState::new(Database::new(DbConfig::in_memory()).await.unwrap())
    }

    fn product(id: &str, name: &str) -> Product {
        Product {
            id: id.to_string(),
            name: name.to_string(),
            price: 3.5,
            description: "Hand tool".to_string(),
            status: String::new(),
        }
    }

    #[tokio::test]
    async fn test_add_then_list() {
        let db = state().await;

        let id = add_product(&db, product("", "Dibber")).await.unwrap();
        let products = get_products(&db).await.unwrap();

        assert_eq!(products.len(), 4);
        let dibber = products.iter().find(|p| p.id == id).unwrap();
        assert_eq!(dibber.status, "In Stock");
    }

    #[tokio::test]
    async fn test_update_missing_still_true() {
        let db = state().await;

        assert!(update_product(&db, product("nope", "Ghost")).await.unwrap());
        assert!(get_product_by_id(&db, "nope".to_string()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_missing_is_not_found() {
        let db = state().await;

        let err = delete_product(&db, "nope".to_string()).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn test_duplicate_id_is_validation_error() {
        let db = state().await;

        let err = add_product(&db, product("2", "Duplicate")).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "id '2' already exists");
    }
}
