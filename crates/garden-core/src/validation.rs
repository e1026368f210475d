//! # Validation Module
//!
//! Input checks that run before anything touches the store.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Frontend                                                     │
//! │  └── Immediate user feedback (empty fields)                            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Repository entry (Rust)                                      │
//! │  └── THIS MODULE: blank order name, empty item list, bad amounts       │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL constraints                                              │
//! │  ├── PRIMARY KEY uniqueness                                            │
//! │  └── order_items → orders foreign key                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use garden_core::validation::validate_new_order;
//! use garden_core::{NewOrder, OrderItem};
//!
//! let order = NewOrder::new("Alice", "", vec![OrderItem::new("1", "Tomato Plant", 5.99, 3)]);
//! assert!(validate_new_order(&order).is_ok());
//!
//! let empty = NewOrder::new("Alice", "", vec![]);
//! assert!(validate_new_order(&empty).is_err());
//! ```

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::types::{NewOrder, OrderItem, Product, StockItem};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Field Validators
// =============================================================================

/// Rejects empty or whitespace-only text.
pub fn validate_required(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Validates a monetary amount: finite and not negative.
///
/// ## Example
/// ```rust
/// use garden_core::validation::validate_price;
///
/// assert!(validate_price("price", 0.0).is_ok());
/// assert!(validate_price("price", -1.0).is_err());
/// assert!(validate_price("price", f64::NAN).is_err());
/// ```
pub fn validate_price(field: &str, value: f64) -> ValidationResult<()> {
    validate_finite(field, value)?;

    if value < 0.0 {
        return Err(ValidationError::MustNotBeNegative {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Rejects NaN and infinities.
pub fn validate_finite(field: &str, value: f64) -> ValidationResult<()> {
    if !value.is_finite() {
        return Err(ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: "must be a finite number".to_string(),
        });
    }
    Ok(())
}

/// Order quantities are whole, positive units.
pub fn validate_quantity(quantity: i64) -> ValidationResult<()> {
    if quantity <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Entity Validators
// =============================================================================

/// Validates a single order line.
pub fn validate_order_item(item: &OrderItem) -> ValidationResult<()> {
    validate_price("price", item.price)?;
    validate_quantity(item.quantity)
}

/// Validates an order before its transaction is opened.
///
/// ## Rules
/// - Name must not be blank
/// - At least one item
/// - Every item has a positive quantity and a non-negative price
pub fn validate_new_order(order: &NewOrder) -> CoreResult<()> {
    validate_required("name", &order.name)?;

    if order.items.is_empty() {
        return Err(CoreError::EmptyOrder);
    }

    for item in &order.items {
        validate_order_item(item)?;
    }

    Ok(())
}

/// Validates a product before insert or update.
pub fn validate_product(product: &Product) -> ValidationResult<()> {
    validate_price("price", product.price)
}

/// Validates a stock item before insert or update.
pub fn validate_stock_item(item: &StockItem) -> ValidationResult<()> {
    validate_finite("quantity", item.quantity)
}

// =============================================================================
// Unit Tests
// =============================================================================
