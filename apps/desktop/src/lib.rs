//! # Garden Desktop Library
//!
//! Backend library for the Garden Product Manager desktop application.
//! Owns startup, shutdown and the command surface the UI calls into.
//!
//! ## Module Organization
//! ```text
//! garden_desktop_lib/
//! ├── lib.rs          ◄─── You are here (App lifecycle, logging)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── db.rs       ◄─── Database state wrapper
//! │   └── config.rs   ◄─── Configuration from environment
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── product.rs  ◄─── Catalog commands
//! │   ├── order.rs    ◄─── Order commands
//! │   ├── stock.rs    ◄─── Stock commands
//! │   └── diagnostics.rs ◄─ Connectivity probe
//! └── error.rs        ◄─── API error type for commands
//! ```

pub mod commands;
pub mod error;
pub mod state;

use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use error::StartupError;
use garden_db::migrations::migration_status;
use garden_db::{Database, DbConfig};
use state::{AppConfig, DbState, DEFAULT_LOG_FILTER};

/// The running application: configuration plus the single store handle.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Application Startup                               │
/// │                                                                         │
/// │  1. Load AppConfig ───────────────────────────────────────────────────► │
/// │     • GARDEN_DB_PATH / GARDEN_LOG_DIR / GARDEN_LOG overrides            │
/// │                                                                         │
/// │  2. Initialize Logging ───────────────────────────────────────────────► │
/// │     • <data dir>/GardenProductManager/logs/app.log (append)             │
/// │     • stderr if the file can't be opened                                │
/// │                                                                         │
/// │  3. App::startup ─────────────────────────────────────────────────────► │
/// │     • open the store (directory created if missing)                     │
/// │     • migrate + seed; any failure is fatal                              │
/// │                                                                         │
/// │  4. Serve commands with &app.db()                                       │
/// │                                                                         │
/// │  5. App::shutdown closes the store                                      │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug)]
pub struct App {
    config: AppConfig,
    db: DbState,
}

impl App {
    /// Opens and migrates the store.
    ///
    /// ## Returns
    /// * `Err(StartupError)` - The store is unusable; no command may run
    pub async fn startup(config: AppConfig) -> Result<Self, StartupError> {
        info!(db_path = %config.database_path.display(), "Starting Garden Product Manager");

        let db = Database::new(DbConfig::new(&config.database_path)).await?;

        let (total, applied) = migration_status(db.pool()).await?;
        info!(total, applied, "Database connected and migrations applied");

        Ok(App {
            config,
            db: DbState::new(db),
        })
    }

    /// State handed to commands.
    pub fn db(&self) -> &DbState {
        &self.db
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Closes the store.
    pub async fn shutdown(self) {
        self.db.inner().close().await;
        info!("Garden Product Manager stopped");
    }
}

/// Initializes the tracing subscriber.
///
/// Logs go to `config.log_file()` in append mode without ANSI colours.
/// When the log directory or file can't be opened, logs go to stderr.
///
/// ## Log Levels
/// - `GARDEN_LOG=debug` - Show debug messages
/// - `RUST_LOG=garden_db=trace` - Used when `GARDEN_LOG` is unset
/// - Default: `info,garden=debug,sqlx=warn`
///
/// ## Returns
/// `true` when logging to the file.
pub fn init_tracing(config: &AppConfig) -> bool {
    let filter = EnvFilter::try_new(&config.log_filter)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let file = std::fs::create_dir_all(&config.log_dir).and_then(|_| {
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(config.log_file())
    });

    match file {
        Ok(file) => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init();
            true
        }
        Err(e) => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .try_init();
            warn!(
                path = %config.log_file().display(),
                error = %e,
                "Could not open log file, logging to stderr"
            );
            false
        }
    }
}
