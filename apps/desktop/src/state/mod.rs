//! # State Module
//!
//! Application state handed to commands.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │              App::startup(config)                                      │
//! │                     │                                                   │
//! │          ┌──────────┴──────────┐                                       │
//! │          ▼                     ▼                                        │
//! │  ┌──────────────┐      ┌──────────────────┐                            │
//! │  │   DbState    │      │    AppConfig     │                            │
//! │  │              │      │                  │                            │
//! │  │  Database    │      │  database_path   │                            │
//! │  │  (one SQLite │      │  log_dir         │                            │
//! │  │   connection)│      │  log_filter      │                            │
//! │  └──────────────┘      └──────────────────┘                            │
//! │                                                                         │
//! │  AppConfig is read-only after startup.                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod db;

pub use config::{AppConfig, ConfigError, DEFAULT_LOG_FILTER};
pub use db::DbState;
