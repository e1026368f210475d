//! # Store Handle
//!
//! Opens and configures the SQLite store.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Store Lifecycle                                    │
//! │                                                                         │
//! │  App startup                                                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DbConfig::new(path) ← Configure handle settings                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Database::new(config).await                                           │
//! │       ├── create parent directory                                      │
//! │       ├── open ONE connection (single writer)                          │
//! │       └── migrations::ensure_schema (fatal on error)                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Repositories serve calls one at a time                                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Database::close().await ← App shutdown                                │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The handle is a `SqlitePool` capped at a single connection that is never
//! reaped, so an in-memory store survives for the lifetime of the handle.

use garden_core::DatabaseStatus;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use crate::migrations;
use crate::repository::order::OrderRepository;
use crate::repository::product::ProductRepository;
use crate::repository::stock::StockRepository;

const IN_MEMORY_PATH: &str = ":memory:";

// =============================================================================
// Configuration
// =============================================================================

/// Database configuration.
///
/// ## Example
/// ```rust,ignore
/// let config = DbConfig::new("/path/to/garden_db.sqlite")
///     .busy_timeout(Duration::from_secs(10));
/// ```
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// Path to the SQLite database file.
    pub database_path: PathBuf,

    /// How long to wait for the store connection.
    /// Default: 30 seconds
    pub connect_timeout: Duration,

    /// How long SQLite retries when the file is locked.
    /// Default: 5 seconds
    pub busy_timeout: Duration,

    /// Whether to migrate and seed on connect.
    /// Default: true
    pub run_migrations: bool,
}

impl DbConfig {
    /// Creates a new database configuration with the given path.
    ///
    /// ## Arguments
    /// * `path` - Path to the SQLite database file. The file and its parent
    ///   directory are created if they don't exist.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DbConfig {
            database_path: path.into(),
            connect_timeout: Duration::from_secs(30),
            busy_timeout: Duration::from_secs(5),
            run_migrations: true,
        }
    }

    /// Sets the connection timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Sets the SQLite busy timeout.
    pub fn busy_timeout(mut self, timeout: Duration) -> Self {
        self.busy_timeout = timeout;
        self
    }

    /// Sets whether to run migrations on connect.
    pub fn run_migrations(mut self, run: bool) -> Self {
        self.run_migrations = run;
        self
    }

    /// Creates an in-memory database configuration (for testing).
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let db = Database::new(DbConfig::in_memory()).await?;
    /// // Database is isolated, perfect for tests
    /// ```
    pub fn in_memory() -> Self {
        DbConfig {
            database_path: PathBuf::from(IN_MEMORY_PATH),
            connect_timeout: Duration::from_secs(5),
            busy_timeout: Duration::from_secs(5),
            run_migrations: true,
        }
    }

    /// True when the store lives in memory only.
    pub fn is_in_memory(&self) -> bool {
        self.database_path == Path::new(IN_MEMORY_PATH)
    }

    fn connect_options(&self) -> DbResult<SqliteConnectOptions> {
        let options = if self.is_in_memory() {
            SqliteConnectOptions::from_str("sqlite::memory:")
                .map_err(|e| DbError::ConnectionFailed(e.to_string()))?
        } else {
            SqliteConnectOptions::new()
                .filename(&self.database_path)
                .create_if_missing(true)
                // Readers don't block the single writer
                .journal_mode(SqliteJournalMode::Wal)
                .synchronous(SqliteSynchronous::Normal)
        };

        // order_items.order_id → orders.id is enforced
        Ok(options.foreign_keys(true).busy_timeout(self.busy_timeout))
    }
}

// =============================================================================
// Database
// =============================================================================

/// The store handle. Owned by the application for its whole lifetime and
/// handed to repositories by clone.
#[derive(Debug, Clone)]
pub struct Database {
    /// Single-connection pool.
    pool: SqlitePool,
}

impl Database {
    /// Opens the store and brings it to the current schema.
    ///
    /// ## What This Does
    /// 1. Creates the parent directory of the database file if needed
    /// 2. Opens one connection (WAL, foreign keys on)
    /// 3. Runs migrations and seeding (if enabled)
    ///
    /// ## Returns
    /// * `Ok(Database)` - Ready-to-use handle
    /// * `Err(DbError)` - Store unreachable or migration failed; the caller
    ///   must not serve any request
    pub async fn new(config: DbConfig) -> DbResult<Self> {
        info!(
            path = %config.database_path.display(),
            "Initializing database connection"
        );

        if !config.is_in_memory() {
            if let Some(parent) = config.database_path.parent() {
                if !parent.as_os_str().is_empty() {
                    tokio::fs::create_dir_all(parent).await.map_err(|e| {
                        DbError::ConnectionFailed(format!(
                            "failed to create database directory {}: {}",
                            parent.display(),
                            e
                        ))
                    })?;
                }
            }
        }

        let connect_options = config.connect_options()?;
        debug!("Connection options configured");

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .acquire_timeout(config.connect_timeout)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(connect_options)
            .await
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?;

        info!("Database connection opened");

        let db = Database { pool };

        if config.run_migrations {
            db.ensure_schema().await?;
        }

        Ok(db)
    }

    /// Runs migrations and seeds an empty catalog.
    ///
    /// Automatically called by `new()` when `run_migrations` is true.
    pub async fn ensure_schema(&self) -> DbResult<()> {
        migrations::ensure_schema(&self.pool).await
    }

    /// Returns a reference to the underlying pool.
    ///
    /// Prefer repository methods; this is for diagnostics and tests.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Returns the product repository.
    pub fn products(&self) -> ProductRepository {
        ProductRepository::new(self.pool.clone())
    }

    /// Returns the order repository.
    pub fn orders(&self) -> OrderRepository {
        OrderRepository::new(self.pool.clone())
    }

    /// Returns the stock repository.
    pub fn stock(&self) -> StockRepository {
        StockRepository::new(self.pool.clone())
    }

    /// Closes the store.
    ///
    /// After calling close, all repository operations will fail.
    pub async fn close(&self) {
        info!("Closing database connection");
        self.pool.close().await;
    }

    /// Checks if the database is healthy (can execute queries).
    pub async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }

    /// Connectivity probe: connection health plus current product count.
    pub async fn status(&self) -> DatabaseStatus {
        match self.products().count().await {
            Ok(count) => DatabaseStatus::connected(count),
            Err(e) => DatabaseStatus::failed(e),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory_database() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        assert!(db.health_check().await);
    }

    #[tokio::test]
    async fn test_status_reports_seeded_products() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let status = db.status().await;
        assert!(status.connected);
        assert_eq!(status.product_count, Some(3));
        assert_eq!(status.message, "Database connected, product count: 3");
    }

    #[tokio::test]
    async fn test_status_after_close() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.close().await;

        let status = db.status().await;
        assert!(!status.connected);
        assert!(status.message.starts_with("Database error: "));
        assert!(!db.health_check().await);
    }

    #[tokio::test]
    async fn test_file_database_creates_parent_directory() {
        let dir = std::env::temp_dir().join(format!("garden-db-test-{}", garden_core::generate_id()));
        let path = dir.join("nested").join("garden_db.sqlite");

        let db = Database::new(DbConfig::new(&path)).await.unwrap();
        assert!(path.exists());
        assert_eq!(db.products().count().await.unwrap(), 3);
        db.close().await;

        // Reopening keeps the data and does not re-seed
        let db = Database::new(DbConfig::new(&path)).await.unwrap();
        assert_eq!(db.products().count().await.unwrap(), 3);
        db.close().await;

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_config_builder() {
        let config = DbConfig::new("/tmp/test.db")
            .busy_timeout(Duration::from_secs(10))
            .run_migrations(false);

        assert_eq!(config.busy_timeout, Duration::from_secs(10));
        assert!(!config.run_migrations);
        assert!(!config.is_in_memory());
        assert!(DbConfig::in_memory().is_in_memory());
    }
}
