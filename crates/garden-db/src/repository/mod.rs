//! # Repository Module
//!
//! Database repository implementations for Garden Product Manager.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  Desktop command                                                       │
//! │       │                                                                 │
//! │       │  db.orders().create(&new_order)                                │
//! │       ▼                                                                 │
//! │  OrderRepository                                                       │
//! │  ├── list(&self)                                                       │
//! │  ├── create(&self, new_order)        ← one transaction                 │
//! │  ├── update_status(&self, id, status)                                  │
//! │  └── delete(&self, id)               ← one transaction                 │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database (single connection)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Not-found Contract
//!
//! | Operation               | Zero rows matched          |
//! |-------------------------|----------------------------|
//! | product / order delete  | `Err(DbError::NotFound)`   |
//! | product update          | `Ok(MutationOutcome::NotFound)` |
//! | order status update     | `Ok(MutationOutcome::NotFound)` |
//! | stock update / delete   | `Ok(MutationOutcome::NotFound)` |
//!
//! ## Available Repositories
//!
//! - [`ProductRepository`](product::ProductRepository) - Catalog CRUD
//! - [`OrderRepository`](order::OrderRepository) - Orders and their item snapshots
//! - [`StockRepository`](stock::StockRepository) - Inventory records

pub mod order;
pub mod product;
pub mod stock;

/// Result of a mutate-by-id statement that does not fail on a missing row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationOutcome {
    /// At least one row matched.
    Updated,
    /// No row had the given id.
    NotFound,
}

impl MutationOutcome {
    pub(crate) fn from_rows_affected(rows: u64) -> Self {
        if rows == 0 {
            MutationOutcome::NotFound
        } else {
            MutationOutcome::Updated
        }
    }

    /// True when a row matched.
    pub fn is_updated(self) -> bool {
        self == MutationOutcome::Updated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_from_rows() {
        assert_eq!(MutationOutcome::from_rows_affected(0), MutationOutcome::NotFound);
        assert_eq!(MutationOutcome::from_rows_affected(1), MutationOutcome::Updated);
        assert!(!MutationOutcome::NotFound.is_updated());
    }
}
