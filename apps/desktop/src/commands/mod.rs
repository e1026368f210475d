//! # Commands Module
//!
//! All operations exposed to the presentation layer.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs          ◄─── You are here (exports)
//! ├── product.rs      ◄─── Catalog CRUD
//! ├── order.rs        ◄─── Order creation, status, deletion
//! ├── stock.rs        ◄─── Inventory CRUD
//! └── diagnostics.rs  ◄─── Store connectivity probe, wall clock
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  Presentation layer                                                    │
//! │       │  create_order(&db, "Alice", "", items)                          │
//! │       ▼                                                                 │
//! │  commands::order::create_order                                         │
//! │       │  NewOrder → db.inner().orders().create(..)                     │
//! │       ▼                                                                 │
//! │  Result<String, ApiError>                                              │
//! │       │  (serde camelCase / { code, message })                         │
//! │       ▼                                                                 │
//! │  Presentation layer receives "3" or { "code": "VALIDATION_ERROR" }     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every command takes the [`DbState`](crate::state::DbState) it needs and
//! owns no state of its own.

pub mod diagnostics;
pub mod order;
pub mod product;
pub mod stock;
