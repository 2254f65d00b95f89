//! # VetCare Connect
//!
//! Headless driver for the clinic client.
//!
//! This is the application entry point that initializes:
//! - Tracing/logging subsystem
//! - Configuration loading
//! - Storage tiers and the navigation client
//! - The stdin command loop

use anyhow::Result;
use tracing::info;

use vetcare_connect::config::Settings;
use vetcare_connect::startup::Application;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber for structured logging
    vetcare_connect::telemetry::init_tracing();

    info!("Starting VetCare Connect client...");

    // Load configuration from environment and config files
    let settings = Settings::load()?;
    info!(
        base_url = %settings.navigation.base_url,
        debounce_ms = settings.search.debounce_ms,
        environment = %settings.environment,
        "Configuration loaded"
    );

    let application = Application::build(settings)?;

    info!("Client ready for commands");
    application.run_until_stopped().await?;

    Ok(())
}
