//! # Database Migrations
//!
//! Versioned, forward-only schema migrations for the garden store.
//!
//! ## How Migrations Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Migration Process                                  │
//! │                                                                         │
//! │  App Startup                                                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CREATE TABLE IF NOT EXISTS schema_version                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  current = MAX(version)   (0 for new or pre-versioning stores)         │
//! │       │                                                                 │
//! │       ├── v001 initial_schema          ✓ (already applied)             │
//! │       ├── v002 product_status          ✓ (already applied)             │
//! │       ├── v003 order_name_description  ⬜ (pending - runs now)          │
//! │       └── v004 stock_items             ⬜ (pending - runs now)          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Each pending migration: own transaction, version recorded on commit   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  seed::seed_sample_products (only if products is empty)                │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Pre-versioning Stores
//! Stores written before the version table existed may already contain
//! some of the columns later migrations add. Column additions therefore
//! check `pragma_table_info` first and skip columns that are present.
//!
//! ## Adding New Migrations
//! 1. Append an entry to [`MIGRATIONS`] with the next version number
//! 2. Bump [`LATEST_VERSION`]
//! 3. **NEVER** modify an applied migration - always add a new one

use chrono::Utc;
use sqlx::{SqliteConnection, SqlitePool};
use tracing::{debug, info, warn};

use crate::error::{DbError, DbResult};
use crate::seed;

/// Version of the newest migration.
pub const LATEST_VERSION: i64 = 4;

/// One schema change inside a migration.
#[derive(Debug)]
enum Step {
    /// A single DDL/DML statement.
    Execute(&'static str),

    /// `ALTER TABLE .. ADD COLUMN`, skipped when the column exists.
    /// `backfill` is written into NULL rows only when the column was added.
    AddColumn {
        table: &'static str,
        column: &'static str,
        definition: &'static str,
        backfill: Option<&'static str>,
    },
}

#[derive(Debug)]
struct Migration {
    version: i64,
    name: &'static str,
    steps: &'static [Step],
}

/// All migrations in order.
const MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        name: "initial_schema",
        steps: &[
            Step::Execute(
                r#"
                CREATE TABLE IF NOT EXISTS products (
                    id TEXT PRIMARY KEY,
                    name TEXT NOT NULL,
                    price REAL NOT NULL,
                    image TEXT,
                    description TEXT,
                    category TEXT
                )
                "#,
            ),
            Step::Execute(
                r#"
                CREATE TABLE IF NOT EXISTS orders (
                    id TEXT PRIMARY KEY,
                    date TEXT NOT NULL,
                    status TEXT NOT NULL,
                    total REAL NOT NULL
                )
                "#,
            ),
            Step::Execute(
                r#"
                CREATE TABLE IF NOT EXISTS order_items (
                    id TEXT PRIMARY KEY,
                    order_id TEXT NOT NULL,
                    product_id TEXT NOT NULL,
                    name TEXT NOT NULL,
                    price REAL NOT NULL,
                    quantity INTEGER NOT NULL,
                    FOREIGN KEY (order_id) REFERENCES orders(id)
                )
                "#,
            ),
        ],
    },
    Migration {
        version: 2,
        name: "product_status",
        steps: &[Step::AddColumn {
            table: "products",
            column: "status",
            definition: "TEXT",
            backfill: Some(garden_core::DEFAULT_PRODUCT_STATUS),
        }],
    },
    Migration {
        version: 3,
        name: "order_name_description",
        steps: &[
            Step::AddColumn {
                table: "orders",
                column: "name",
                definition: "TEXT DEFAULT 'Order'",
                backfill: None,
            },
            Step::AddColumn {
                table: "orders",
                column: "description",
                definition: "TEXT",
                backfill: None,
            },
        ],
    },
    Migration {
        version: 4,
        name: "stock_items",
        steps: &[Step::Execute(
            r#"
            CREATE TABLE IF NOT EXISTS stock_items (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                description TEXT,
                quantity REAL NOT NULL
            )
            "#,
        )],
    },
];

/// Brings the store to the current schema and seeds an empty catalog.
///
/// ## Safety
/// - Idempotent: a second call applies nothing and inserts nothing
/// - Each migration is transactional; a failure rolls back that migration
///   only and aborts startup
pub async fn ensure_schema(pool: &SqlitePool) -> DbResult<()> {
    run_migrations(pool).await?;

    seed::seed_sample_products(pool)
        .await
        .map_err(|e| DbError::MigrationFailed(format!("seeding sample products: {}", e)))?;

    Ok(())
}

/// Runs all pending migrations. Returns how many were applied.
pub async fn run_migrations(pool: &SqlitePool) -> DbResult<usize> {
    info!("Checking for pending migrations");

    create_version_table(pool)
        .await
        .map_err(|e| DbError::MigrationFailed(format!("creating schema_version: {}", e)))?;

    let current = current_version(pool)
        .await
        .map_err(|e| DbError::MigrationFailed(format!("reading schema version: {}", e)))?;

    if current >= LATEST_VERSION {
        debug!(version = current, "Database schema is up to date");
        return Ok(0);
    }

    info!(from = current, to = LATEST_VERSION, "Running migrations");

    let mut applied = 0;
    for migration in MIGRATIONS.iter().filter(|m| m.version > current) {
        apply_migration(pool, migration).await.map_err(|e| {
            warn!(
                version = migration.version,
                name = migration.name,
                error = %e,
                "Migration failed, rolled back"
            );
            DbError::MigrationFailed(format!(
                "v{:03} {}: {}",
                migration.version, migration.name, e
            ))
        })?;

        info!(version = migration.version, name = migration.name, "Applied migration");
        applied += 1;
    }

    info!(applied, version = LATEST_VERSION, "All migrations applied successfully");
    Ok(applied)
}

/// Returns the highest applied migration version (0 when none).
pub async fn current_version(pool: &SqlitePool) -> DbResult<i64> {
    let version: i64 = sqlx::query_scalar("SELECT COALESCE(MAX(version), 0) FROM schema_version")
        .fetch_one(pool)
        .await?;

    Ok(version)
}

/// Returns information about migrations.
///
/// ## Returns
/// Tuple of (total_migrations, applied_migrations)
pub async fn migration_status(pool: &SqlitePool) -> DbResult<(usize, usize)> {
    let total = MIGRATIONS.len();

    let applied: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM schema_version")
        .fetch_one(pool)
        .await?;

    Ok((total, applied as usize))
}

/// Checks a table's column metadata for `column`.
pub async fn column_exists(
    conn: &mut SqliteConnection,
    table: &str,
    column: &str,
) -> DbResult<bool> {
    let count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM pragma_table_info(?1) WHERE name = ?2")
            .bind(table)
            .bind(column)
            .fetch_one(&mut *conn)
            .await?;

    Ok(count > 0)
}

async fn create_version_table(pool: &SqlitePool) -> DbResult<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            applied_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn apply_migration(pool: &SqlitePool, migration: &Migration) -> DbResult<()> {
    debug!(version = migration.version, name = migration.name, "Applying migration");

    let mut tx = pool.begin().await.map_err(DbError::transaction)?;

    for step in migration.steps {
        apply_step(&mut *tx, step).await?;
    }

    sqlx::query("INSERT INTO schema_version (version, name, applied_at) VALUES (?1, ?2, ?3)")
        .bind(migration.version)
        .bind(migration.name)
        .bind(Utc::now().to_rfc3339())
        .execute(&mut *tx)
        .await?;

    tx.commit().await.map_err(DbError::transaction)?;
    Ok(())
}

async fn apply_step(conn: &mut SqliteConnection, step: &Step) -> DbResult<()> {
    match step {
        Step::Execute(sql) => {
            sqlx::query(*sql).execute(&mut *conn).await?;
        }
        Step::AddColumn {
            table,
            column,
            definition,
            backfill,
        } => {
            if column_exists(conn, table, column).await? {
                debug!(table, column, "Column already present");
                return Ok(());
            }

            info!(table, column, "Adding column");
            let ddl = format!("ALTER TABLE {} ADD COLUMN {} {}", table, column, definition);
            sqlx::query(&ddl).execute(&mut *conn).await?;

            if let Some(value) = backfill {
                let update = format!("UPDATE {} SET {} = ?1 WHERE {} IS NULL", table, column, column);
                let result = sqlx::query(&update).bind(*value).execute(&mut *conn).await?;
                info!(table, column, rows = result.rows_affected(), "Back-filled existing rows");
            }
        }
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    async fn unmigrated_db() -> Database {
        Database::new(DbConfig::in_memory().run_migrations(false))
            .await
            .unwrap()
    }

    async fn count(db: &Database, table: &str) -> i64 {
        sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", table))
            .fetch_one(db.pool())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_fresh_store_gets_all_tables_and_seed() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        assert_eq!(current_version(db.pool()).await.unwrap(), LATEST_VERSION);
        assert_eq!(count(&db, "products").await, 3);
        assert_eq!(count(&db, "orders").await, 0);
        assert_eq!(count(&db, "order_items").await, 0);
        assert_eq!(count(&db, "stock_items").await, 0);

        let mut conn = db.pool().acquire().await.unwrap();
        assert!(column_exists(&mut conn, "products", "status").await.unwrap());
        assert!(column_exists(&mut conn, "orders", "name").await.unwrap());
        assert!(column_exists(&mut conn, "orders", "description").await.unwrap());
        assert!(!column_exists(&mut conn, "orders", "nope").await.unwrap());
    }

    #[tokio::test]
    async fn test_ensure_schema_twice_is_noop() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        ensure_schema(db.pool()).await.unwrap();
        assert_eq!(run_migrations(db.pool()).await.unwrap(), 0);

        assert_eq!(count(&db, "products").await, 3);
        assert_eq!(
            migration_status(db.pool()).await.unwrap(),
            (MIGRATIONS.len(), MIGRATIONS.len())
        );
    }

    #[tokio::test]
    async fn test_migration_status_reports_query_errors() {
        let db = unmigrated_db().await;

        // No schema_version table yet
        let err = migration_status(db.pool()).await.unwrap_err();
        assert!(matches!(err, DbError::QueryFailed(ref msg) if msg.contains("schema_version")));

        run_migrations(db.pool()).await.unwrap();
        assert_eq!(
            migration_status(db.pool()).await.unwrap(),
            (MIGRATIONS.len(), MIGRATIONS.len())
        );
    }

    #[tokio::test]
    async fn test_run_migrations_reports_applied_count() {
        let db = unmigrated_db().await;

        assert_eq!(run_migrations(db.pool()).await.unwrap(), MIGRATIONS.len());
        assert_eq!(run_migrations(db.pool()).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_reseeds_only_when_catalog_is_empty() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        // A non-empty catalog is left alone
        sqlx::query("DELETE FROM products WHERE id = '1'")
            .execute(db.pool())
            .await
            .unwrap();
        ensure_schema(db.pool()).await.unwrap();
        assert_eq!(count(&db, "products").await, 2);

        // An emptied catalog is seeded again
        sqlx::query("DELETE FROM products")
            .execute(db.pool())
            .await
            .unwrap();
        ensure_schema(db.pool()).await.unwrap();
        assert_eq!(count(&db, "products").await, 3);
    }

    #[tokio::test]
    async fn test_legacy_store_is_upgraded_in_place() {
        let db = unmigrated_db().await;

        // Shape of a store written before status/name/description existed
        for ddl in [
            "CREATE TABLE products (id TEXT PRIMARY KEY, name TEXT NOT NULL, price REAL NOT NULL, image TEXT, description TEXT, category TEXT)",
            "CREATE TABLE orders (id TEXT PRIMARY KEY, date TEXT NOT NULL, status TEXT NOT NULL, total REAL NOT NULL)",
            "INSERT INTO products (id, name, price, description) VALUES ('legacy-1', 'Spade', 19.5, 'Steel spade')",
            "INSERT INTO orders (id, date, status, total) VALUES ('4', '2023-03-01 10:00:00', 'Shipped', 39.0)",
        ] {
            sqlx::query(ddl).execute(db.pool()).await.unwrap();
        }

        ensure_schema(db.pool()).await.unwrap();

        let status: Option<String> =
            sqlx::query_scalar("SELECT status FROM products WHERE id = 'legacy-1'")
                .fetch_one(db.pool())
                .await
                .unwrap();
        assert_eq!(status.as_deref(), Some("In Stock"));

        // Existing catalog means no seed rows
        assert_eq!(count(&db, "products").await, 1);

        // Column default, not a per-row write
        let name: Option<String> = sqlx::query_scalar("SELECT name FROM orders WHERE id = '4'")
            .fetch_one(db.pool())
            .await
            .unwrap();
        assert_eq!(name.as_deref(), Some("Order"));

        let description: Option<String> =
            sqlx::query_scalar("SELECT description FROM orders WHERE id = '4'")
                .fetch_one(db.pool())
                .await
                .unwrap();
        assert_eq!(description, None);

        assert_eq!(current_version(db.pool()).await.unwrap(), LATEST_VERSION);
        assert_eq!(count(&db, "stock_items").await, 0);
    }

    #[tokio::test]
    async fn test_store_with_columns_already_present_migrates() {
        let db = unmigrated_db().await;

        for ddl in [
            "CREATE TABLE products (id TEXT PRIMARY KEY, name TEXT NOT NULL, price REAL NOT NULL, image TEXT, description TEXT, category TEXT, status TEXT)",
            "CREATE TABLE orders (id TEXT PRIMARY KEY, date TEXT NOT NULL, name TEXT, description TEXT, status TEXT NOT NULL, total REAL NOT NULL)",
            "INSERT INTO products (id, name, price, description, status) VALUES ('p', 'Hoe', 8.0, '', NULL)",
        ] {
            sqlx::query(ddl).execute(db.pool()).await.unwrap();
        }

        ensure_schema(db.pool()).await.unwrap();

        // Column existed, so no back-fill ran
        let status: Option<String> = sqlx::query_scalar("SELECT status FROM products WHERE id = 'p'")
            .fetch_one(db.pool())
            .await
            .unwrap();
        assert_eq!(status, None);
        assert_eq!(current_version(db.pool()).await.unwrap(), LATEST_VERSION);
    }

    #[tokio::test]
    async fn test_failed_migration_is_reported_and_not_recorded() {
        let db = unmigrated_db().await;

        // A view named like a table makes CREATE TABLE IF NOT EXISTS a no-op
        // and the later ALTER TABLE fail.
        sqlx::query("CREATE VIEW products AS SELECT 1 AS id")
            .execute(db.pool())
            .await
            .unwrap();

        let err = ensure_schema(db.pool()).await.unwrap_err();
        assert!(matches!(err, DbError::MigrationFailed(ref msg) if msg.contains("v002")));

        assert_eq!(current_version(db.pool()).await.unwrap(), 1);
    }
}
