//! # Stock Commands

use garden_core::StockItem;
use tracing::{debug, info};

use crate::error::ApiError;
use crate::state::DbState;

/// Lists stock items ordered by name.
pub async fn get_stock_items(db: &DbState) -> Result<Vec<StockItem>, ApiError> {
    Ok(db.inner().stock().list().await?)
}

/// Adds a stock item and returns it with its id populated.
pub async fn add_stock_item(db: &DbState, item: StockItem) -> Result<StockItem, ApiError> {
    debug!(name = %item.name, "add_stock_item command");

    let saved = db.inner().stock().insert(&item).await?;

    info!(id = %saved.id, "Stock item added");
    Ok(saved)
}

/// Updates a stock item. `false` when no item has this id.
pub async fn update_stock_item(db: &DbState, item: StockItem) -> Result<bool, ApiError> {
    debug!(id = %item.id, "update_stock_item command");
    Ok(db.inner().stock().update(&item).await?.is_updated())
}

/// Deletes a stock item. `false` when no item has this id.
pub async fn delete_stock_item(db: &DbState, id: String) -> Result<bool, ApiError> {
    debug!(id = %id, "delete_stock_item command");
    Ok(db.inner().stock().delete(&id).await?.is_updated())
}

#[cfg(test)]
mod tests {
    use super::*;
    use garden_db::{Database, DbConfig};

    async fn state() -> DbState {
        DbState::new(Database::new(DbConfig::in_memory()).await.unwrap())
    }

    fn compost(quantity: f64) -> StockItem {
        StockItem {
            id: String::new(),
            name: "Compost".to_string(),
            description: String::new(),
            quantity,
        }
    }

    #[tokio::test]
    async fn test_stock_lifecycle() {
        let db = state().await;

        let mut saved = add_stock_item(&db, compost(12.5)).await.unwrap();
        assert!(!saved.id.is_empty());

        saved.quantity = 11.75;
        assert!(update_stock_item(&db, saved.clone()).await.unwrap());
        assert_eq!(get_stock_items(&db).await.unwrap(), vec![saved.clone()]);

        assert!(delete_stock_item(&db, saved.id.clone()).await.unwrap());
        assert!(!delete_stock_item(&db, saved.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_update_missing_is_false() {
        let db = state().await;

        let mut item = compost(1.0);
        item.id = "missing".to_string();
        assert!(!update_stock_item(&db, item).await.unwrap());
    }
}
