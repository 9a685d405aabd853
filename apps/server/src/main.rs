//! FHIR test server - startup entry point
//!
//! Loads configuration, initializes logging and resolves the persistence,
//! storage and validation profiles the storage engine is started with.

use anyhow::Context;
use fhirtest::{config::Config, logging, ServerProfiles};

fn main() -> anyhow::Result<()> {
    // Load configuration first to get logging settings
    let config = Config::load().context("Failed to load configuration")?;

    config.validate().context("Invalid configuration")?;

    let _logging_guard =
        logging::init_logging(&config.logging).context("Failed to initialize logging")?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        environment = config.logging.deployment_environment,
        mode = %config.mode,
        "Starting FHIR test server"
    );

    let profiles =
        ServerProfiles::from_config(&config).context("Failed to resolve server profiles")?;

    tracing::info!(
        mode = %profiles.persistence.mode(),
        "Server profiles ready"
    );

    Ok(())
}
