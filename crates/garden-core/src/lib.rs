//! # garden-core: Pure Domain Logic for Garden Product Manager
//!
//! Domain types and business rules with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                   Garden Product Manager Architecture                   │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Presentation layer (UI)                      │   │
//! │  │    Products ──► Create Order ──► Orders ──► Stock              │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    garden-desktop commands                      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ garden-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐                  │   │
//! │  │   │   types   │  │   order   │  │ validation│                  │   │
//! │  │   │  Product  │  │   total   │  │   rules   │                  │   │
//! │  │   │   Order   │  │  id/date  │  │  checks   │                  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘                  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    garden-db (Database Layer)                   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Order, OrderItem, StockItem)
//! - [`order`] - Order totals, order ids and order dates
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation
//!
//! ## Example Usage
//!
//! ```rust
//! use garden_core::{order_total, OrderItem};
//!
//! let items = vec![OrderItem::new("1", "Tomato Plant", 5.99, 3)];
//! assert!((order_total(&items) - 17.97).abs() < 1e-9);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod order;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use order::{current_order_date, format_order_date, next_order_id, order_total};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Status reported for products whose stored status is absent.
pub const DEFAULT_PRODUCT_STATUS: &str = "In Stock";

/// Status every new order starts in.
pub const PENDING_ORDER_STATUS: &str = "Pending";

/// Prefix of the display name given to orders stored without a name.
pub const DEFAULT_ORDER_NAME_PREFIX: &str = "Order #";

/// Generates a new globally-unique identifier (UUID v4).
///
/// Used for products and stock items submitted with a blank id, and for
/// every order item.
pub fn generate_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_id_is_unique() {
        let a = generate_id();
        let b = generate_id();
        assert!(!a.is_empty());
        assert_ne!(a, b);
    }
}
