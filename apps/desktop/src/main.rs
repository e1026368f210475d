//! # Garden Desktop Entry Point
//!
//! Starts the backend, reports the store status as JSON on stdout and
//! shuts down. Exits non-zero when the store can't be opened or migrated.
//!
//! ## Exit Codes
//! - `0` - Store ready
//! - `1` - Configuration or startup failure (details in the log)

use std::process::ExitCode;

use garden_desktop_lib::commands::diagnostics::database_status;
use garden_desktop_lib::state::AppConfig;
use garden_desktop_lib::{init_tracing, App};
use tracing::error;

#[tokio::main]
async fn main() -> ExitCode {
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    init_tracing(&config);

    let app = match App::startup(config).await {
        Ok(app) => app,
        Err(e) => {
            error!(error = %e, "Startup failed");
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let status = database_status(app.db()).await;
    match serde_json::to_string_pretty(&status) {
        Ok(json) => println!("{}", json),
        Err(e) => error!(error = %e, "Could not serialize database status"),
    }

    app.shutdown().await;
    ExitCode::SUCCESS
}
