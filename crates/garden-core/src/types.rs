//! # Domain Types
//!
//! Core domain types used throughout Garden Product Manager.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │      Order      │   │   StockItem     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  id ("1","2")   │   │  id             │       │
//! │  │  name           │   │  date           │   │  name           │       │
//! │  │  price          │   │  status         │   │  quantity (f64) │       │
//! │  │  status         │   │  total          │   └─────────────────┘       │
//! │  └─────────────────┘   │  items ──┐      │                              │
//! │                        └──────────┼──────┘                              │
//! │                                   ▼                                     │
//! │                        ┌─────────────────┐                              │
//! │                        │   OrderItem     │                              │
//! │                        │  product_id     │                              │
//! │                        │  product_name ◄─┼── snapshot at order time     │
//! │                        │  price        ◄─┼── snapshot at order time     │
//! │                        │  quantity (int) │                              │
//! │                        └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Field names serialize as camelCase (`productId`, `productName`), the
//! shape the presentation layer consumes.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// =============================================================================
// Product
// =============================================================================

/// A product in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Product {
    /// Unique identifier. Blank on insert means "generate one".
    #[serde(default)]
    pub id: String,

    pub name: String,

    /// Unit price. Non-negative.
    pub price: f64,

    #[serde(default)]
    pub description: String,

    /// Free-text status ("In Stock", "Out of Stock", ...).
    #[serde(default)]
    pub status: String,
}

// =============================================================================
// Order Item
// =============================================================================

/// A line within an order.
///
/// Name and price are a snapshot taken when the order was created. They are
/// never refreshed from the live product, so historic orders keep their
/// totals when a product is edited or deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct OrderItem {
    pub product_id: String,
    /// Product name at time of order (frozen).
    pub product_name: String,
    /// Unit price at time of order (frozen).
    pub price: f64,
    /// Whole units ordered. Positive.
    #[ts(type = "number")]
    pub quantity: i64,
}

impl OrderItem {
    /// Creates an order line from a product snapshot.
    pub fn new(
        product_id: impl Into<String>,
        product_name: impl Into<String>,
        price: f64,
        quantity: i64,
    ) -> Self {
        OrderItem {
            product_id: product_id.into(),
            product_name: product_name.into(),
            price,
            quantity,
        }
    }

    /// Snapshots a catalog product into an order line.
    pub fn from_product(product: &Product, quantity: i64) -> Self {
        OrderItem::new(&product.id, &product.name, product.price, quantity)
    }

    /// `price * quantity`.
    #[inline]
    pub fn line_total(&self) -> f64 {
        self.price * self.quantity as f64
    }
}

// =============================================================================
// Order
// =============================================================================

/// A customer order together with its items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Order {
    /// Decimal string ("1", "2", ...).
    pub id: String,
    /// Creation time, `YYYY-MM-DD HH:MM:SS` on the local clock.
    pub date: String,
    pub name: String,
    pub description: String,
    #[cfg_attr(feature = "sqlx", sqlx(skip))]
    pub items: Vec<OrderItem>,
    /// Sum of `price * quantity` over the items, fixed at creation.
    pub total: f64,
    pub status: String,
}

/// Input for creating an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct NewOrder {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub items: Vec<OrderItem>,
}

impl NewOrder {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        items: Vec<OrderItem>,
    ) -> Self {
        NewOrder {
            name: name.into(),
            description: description.into(),
            items,
        }
    }
}

// =============================================================================
// Stock Item
// =============================================================================

/// An inventory record, independent of the product catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct StockItem {
    /// Unique identifier. Blank on insert means "generate one".
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Units on hand. Fractional amounts allowed (e.g. 2.5 kg of seed).
    pub quantity: f64,
}

// =============================================================================
// Diagnostics
// =============================================================================

/// Result of the connectivity probe shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct DatabaseStatus {
    pub connected: bool,
    #[ts(type = "number | null")]
    pub product_count: Option<i64>,
    /// Human-readable summary line.
    pub message: String,
}

impl DatabaseStatus {
    pub fn connected(product_count: i64) -> Self {
        DatabaseStatus {
            connected: true,
            product_count: Some(product_count),
            message: format!("Database connected, product count: {}", product_count),
        }
    }

    pub fn failed(reason: impl std::fmt::Display) -> Self {
        DatabaseStatus {
            connected: false,
            product_count: None,
            message: format!("Database error: {}", reason),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_total() {
        let item = OrderItem::new("2", "Garden Soil", 12.5, 4);
        assert!((item.line_total() - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_from_product_snapshots_name_and_price() {
        let product = Product {
            id: "3".to_string(),
            name: "Watering Can".to_string(),
            price: 9.99,
            description: String::new(),
            status: "In Stock".to_string(),
        };
        let item = OrderItem::from_product(&product, 2);
        assert_eq!(item.product_id, "3");
        assert_eq!(item.product_name, "Watering Can");
        assert_eq!(item.price, 9.99);
        assert_eq!(item.quantity, 2);
    }

    #[test]
    fn test_order_item_json_is_camel_case() {
        let item = OrderItem::new("1", "Tomato Plant", 5.99, 3);
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["productId"], "1");
        assert_eq!(json["productName"], "Tomato Plant");
        assert_eq!(json["quantity"], 3);
    }

    #[test]
    fn test_product_deserializes_without_id_or_status() {
        let product: Product =
            serde_json::from_str(r#"{"name":"Rake","price":14.5,"description":"Steel rake"}"#)
                .unwrap();
        assert!(product.id.is_empty());
        assert!(product.status.is_empty());
        assert_eq!(product.name, "Rake");
    }

    #[test]
    fn test_database_status_messages() {
        let ok = DatabaseStatus::connected(3);
        assert!(ok.connected);
        assert_eq!(ok.message, "Database connected, product count: 3");

        let err = DatabaseStatus::failed("disk I/O error");
        assert!(!err.connected);
        assert_eq!(err.product_count, None);
        assert_eq!(err.message, "Database error: disk I/O error");
    }
}
