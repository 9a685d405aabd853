//! Static server configuration
//!
//! Sources, later ones overriding earlier ones:
//! 1. `.env` in the working directory (loaded into the process environment)
//! 2. optional `config.{toml,yaml,json,...}` in the working directory
//! 3. optional file named by `FHIRTEST_CONFIG`
//! 4. `FHIRTEST__*` environment variables, `__` separating nested keys
//!    (e.g. `FHIRTEST__DATABASE__PASSWORD`)
//!
//! The configuration is read once at startup and never changes afterwards.

use crate::dao::DaoBehaviorProfile;
use crate::persistence::{Credentials, PersistenceProfileResolver, RunMode, Secret};
use crate::validation::ValidationPolicy;
use crate::{Error, Result};
use serde::Deserialize;

const ENV_PREFIX: &str = "FHIRTEST";
const ENV_CONFIG_FILE: &str = "FHIRTEST_CONFIG";

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
const LOG_ROTATIONS: [&str; 4] = ["daily", "hourly", "minutely", "never"];

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// `local` runs against an embedded in-memory store; `production` against PostgreSQL
    pub mode: RunMode,
    pub database: DatabaseConfig,
    pub search: SearchIndexConfig,
    pub dao: DaoBehaviorProfile,
    pub validation: ValidationPolicy,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub username: String,
    pub password: Secret,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SearchIndexConfig {
    /// Filesystem directory holding the full-text index
    pub index_location: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub json: bool,
    pub file_enabled: bool,
    pub file_directory: String,
    pub file_prefix: String,
    /// daily, hourly, minutely or never
    pub file_rotation: String,
    pub service_name: String,
    pub deployment_environment: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file_enabled: false,
            file_directory: "logs".to_string(),
            file_prefix: "fhirtest".to_string(),
            file_rotation: "daily".to_string(),
            service_name: "fhirtest-server".to_string(),
            deployment_environment: "development".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from files and the environment
    pub fn load() -> Result<Self> {
        // A missing .env file is normal outside development.
        let _ = dotenvy::dotenv();

        let mut builder = config::Config::builder()
            .add_source(config::File::with_name("config").required(false));

        if let Ok(path) = std::env::var(ENV_CONFIG_FILE) {
            builder = builder.add_source(config::File::with_name(&path).required(true));
        }

        let settings = builder
            .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Build configuration from an in-memory TOML document
    pub fn from_toml_str(toml: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Check everything that can be checked without resolving secrets.
    ///
    /// Missing credentials are reported by the persistence resolver, which
    /// knows whether the run mode needs them.
    pub fn validate(&self) -> Result<()> {
        self.dao.validate()?;

        let level = self.logging.level.to_ascii_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(Error::InvalidProfile(format!(
                "unknown logging level '{}'",
                self.logging.level
            )));
        }
        let rotation = self.logging.file_rotation.to_ascii_lowercase();
        if !LOG_ROTATIONS.contains(&rotation.as_str()) {
            return Err(Error::InvalidProfile(format!(
                "unknown log file rotation '{}'",
                self.logging.file_rotation
            )));
        }
        Ok(())
    }

    pub fn credentials(&self) -> Credentials {
        Credentials {
            username: self.database.username.clone(),
            password: self.database.password.clone(),
        }
    }

    pub fn persistence_resolver(&self) -> PersistenceProfileResolver {
        PersistenceProfileResolver::new(self.mode)
    }
}
