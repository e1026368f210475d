//! # Database State
//!
//! Wraps the `Database` handle for use in commands.
//!
//! ## Usage in Commands
//! ```rust,ignore
//! pub async fn get_products(db: &DbState) -> Result<Vec<Product>, ApiError> {
//!     Ok(db.inner().products().list().await?)
//! }
//! ```

use garden_db::Database;

/// Wrapper around `Database` owned by [`App`](crate::App).
///
/// The handle holds a single connection; commands are awaited one at a
/// time by the caller.
#[derive(Debug, Clone)]
pub struct DbState {
    db: Database,
}

impl DbState {
    /// Creates a new DbState wrapping the database handle.
    pub fn new(db: Database) -> Self {
        DbState { db }
    }

    /// Returns a reference to the inner Database.
    pub fn inner(&self) -> &Database {
        &self.db
    }
}
