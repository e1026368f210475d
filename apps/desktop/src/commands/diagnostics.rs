//! # Diagnostics Commands
//!
//! Store connectivity probe and wall clock for the status bar.

use garden_core::DatabaseStatus;
use tracing::{debug, warn};

use crate::state::DbState;

/// Reports whether the store answers queries, with the product count.
///
/// Never fails; an unreachable store is reported in the returned status.
pub async fn database_status(db: &DbState) -> DatabaseStatus {
    let status = db.inner().status().await;

    if status.connected {
        debug!(product_count = ?status.product_count, "database_status command");
    } else {
        warn!(message = %status.message, "Database status check failed");
    }

    status
}

/// Current local time in RFC 2822 form, e.g. "Wed, 14 Oct 2026 09:30:00 +0200".
pub fn current_time() -> String {
    chrono::Local::now().to_rfc2822()
}
