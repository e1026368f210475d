//! # garden-db: Database Layer for Garden Product Manager
//!
//! This crate provides access to the local SQLite store. It is the only
//! component that writes to it.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                   Garden Product Manager Data Flow                      │
//! │                                                                         │
//! │  Desktop command (create_order)                                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     garden-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │               │    │  + seeding   │  │   │
//! │  │   │               │    │ ProductRepo   │    │              │  │   │
//! │  │   │ one SQLite    │◄───│ OrderRepo     │    │ v001..v004   │  │   │
//! │  │   │ connection    │    │ StockRepo     │    │ sample rows  │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database                             │   │
//! │  │   <data dir>/GardenProductManager/garden_db.sqlite             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Store handle creation and configuration
//! - [`migrations`] - Versioned schema migrations
//! - [`seed`] - Sample catalog for empty stores
//! - [`error`] - Database error types
//! - [`repository`] - Product, order and stock repositories
//!
//! ## Usage
//!
//! ```rust,ignore
//! use garden_db::{Database, DbConfig};
//!
//! // Opens the store, migrates it and seeds an empty catalog
//! let db = Database::new(DbConfig::new("path/to/garden_db.sqlite")).await?;
//!
//! let products = db.products().list().await?;
//! let order_id = db.orders().create(&new_order).await?;
//!
//! db.close().await;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod seed;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::order::OrderRepository;
pub use repository::product::ProductRepository;
pub use repository::stock::StockRepository;
pub use repository::MutationOutcome;
