//! Persistence profile resolution
//!
//! Turns the run mode and the externally supplied secrets into the one
//! datasource/search-index profile the storage engine is started with.
//! Resolution performs no I/O; connecting is the datasource's job.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

const LOCAL_DATASOURCE_URL: &str = "jdbc:derby:memory:fhirtest_dstu3;create=true";
const PRODUCTION_DATASOURCE_URL: &str = "jdbc:postgresql://localhost/fhirtest_dstu3";

/// Statement timeout applied by the datasource in every mode
pub const QUERY_TIMEOUT_SECONDS: u32 = 20;

/// JDBC batch size handed to the ORM
pub const JDBC_BATCH_SIZE: u32 = 20;

/// Model mapping the full-text index engine is configured with
pub const SEARCH_MODEL_MAPPING: &str = "ca.uhn.fhir.jpa.search.LuceneSearchMappingFactory";

pub mod keys {
    //! Property keys understood by the ORM and index engine

    pub const FORMAT_SQL: &str = "hibernate.format_sql";
    pub const SHOW_SQL: &str = "hibernate.show_sql";
    pub const SCHEMA_AUTO: &str = "hibernate.hbm2ddl.auto";
    pub const JDBC_BATCH_SIZE: &str = "hibernate.jdbc.batch_size";
    pub const CACHE_QUERY: &str = "hibernate.cache.use_query_cache";
    pub const CACHE_SECOND_LEVEL: &str = "hibernate.cache.use_second_level_cache";
    pub const CACHE_STRUCTURED_ENTRIES: &str = "hibernate.cache.use_structured_entries";
    pub const CACHE_MINIMAL_PUTS: &str = "hibernate.cache.use_minimal_puts";
    pub const SEARCH_MODEL_MAPPING: &str = "hibernate.search.model_mapping";
    pub const SEARCH_DIRECTORY_PROVIDER: &str = "hibernate.search.default.directory_provider";
    pub const SEARCH_INDEX_BASE: &str = "hibernate.search.default.indexBase";
    pub const SEARCH_LUCENE_VERSION: &str = "hibernate.search.lucene_version";
}

/// Process-wide operating mode, read once at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunMode {
    /// Embedded, ephemeral, in-process datastore for local testing
    Local,
    /// Networked datastore
    #[default]
    Production,
}

impl RunMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Production => "production",
        }
    }

    pub fn dialect(self) -> Dialect {
        match self {
            Self::Local => Dialect::EmbeddedDerby,
            Self::Production => Dialect::PostgreSql,
        }
    }

    fn datasource_url(self) -> &'static str {
        match self {
            Self::Local => LOCAL_DATASOURCE_URL,
            Self::Production => PRODUCTION_DATASOURCE_URL,
        }
    }
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// SQL dialect the ORM is told to speak
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dialect {
    EmbeddedDerby,
    PostgreSql,
}

impl Dialect {
    pub fn id(self) -> &'static str {
        match self {
            Self::EmbeddedDerby => "derby-10.7",
            Self::PostgreSql => "postgresql-9.4",
        }
    }

    pub fn is_embedded(self) -> bool {
        matches!(self, Self::EmbeddedDerby)
    }
}

/// A string that never shows up in `Debug` or `Display` output
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(\"***\")")
    }
}

impl fmt::Display for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("***")
    }
}

/// Database login supplied by the deployment
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: Secret,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: Secret::new(password),
        }
    }
}

/// Resolved datastore and search-index parameters for one run mode.
///
/// Only [`PersistenceProfileResolver`] builds these, so mode, dialect and
/// datasource URL always agree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistenceProfile {
    mode: RunMode,
    dialect: Dialect,
    datasource_url: String,
    username: String,
    password: Secret,
    query_timeout_seconds: u32,
    search_index_properties: BTreeMap<String, String>,
}

impl PersistenceProfile {
    pub fn mode(&self) -> RunMode {
        self.mode
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub fn dialect_id(&self) -> &'static str {
        self.dialect.id()
    }

    pub fn datasource_url(&self) -> &str {
        &self.datasource_url
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &Secret {
        &self.password
    }

    pub fn query_timeout_seconds(&self) -> u32 {
        self.query_timeout_seconds
    }

    pub fn query_timeout(&self) -> Duration {
        Duration::from_secs(u64::from(self.query_timeout_seconds))
    }

    /// Flat property map for the ORM and full-text index engine
    pub fn search_index_properties(&self) -> &BTreeMap<String, String> {
        &self.search_index_properties
    }

    pub fn index_base(&self) -> Option<&str> {
        self.search_index_properties
            .get(keys::SEARCH_INDEX_BASE)
            .map(String::as_str)
    }
}

/// Builds the [`PersistenceProfile`] for a fixed run mode
#[derive(Debug, Clone, Copy)]
pub struct PersistenceProfileResolver {
    mode: RunMode,
}

impl PersistenceProfileResolver {
    pub fn new(mode: RunMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> RunMode {
        self.mode
    }

    /// Resolve the profile.
    ///
    /// Credentials are copied verbatim. In production mode a blank username or
    /// password is a [`Error::ConfigurationGap`]; the embedded local store
    /// accepts whatever it is given. A blank index path is rejected in both
    /// modes.
    pub fn resolve(
        &self,
        credentials: &Credentials,
        index_path: &str,
    ) -> Result<PersistenceProfile> {
        if self.mode == RunMode::Production {
            if credentials.username.trim().is_empty() {
                return Err(Error::ConfigurationGap(
                    "database username is required in production mode".to_string(),
                ));
            }
            if credentials.password.is_blank() {
                return Err(Error::ConfigurationGap(
                    "database password is required in production mode".to_string(),
                ));
            }
        }
        if index_path.trim().is_empty() {
            return Err(Error::ConfigurationGap(
                "search index location is required".to_string(),
            ));
        }

        let profile = PersistenceProfile {
            mode: self.mode,
            dialect: self.mode.dialect(),
            datasource_url: self.mode.datasource_url().to_string(),
            username: credentials.username.clone(),
            password: credentials.password.clone(),
            query_timeout_seconds: QUERY_TIMEOUT_SECONDS,
            search_index_properties: search_index_properties(index_path),
        };

        tracing::debug!(
            mode = %profile.mode,
            dialect = profile.dialect_id(),
            datasource_url = profile.datasource_url(),
            index_base = index_path,
            "Resolved persistence profile"
        );

        Ok(profile)
    }
}

/// One-shot form of [`PersistenceProfileResolver::resolve`]
pub fn resolve(
    mode: RunMode,
    credentials: &Credentials,
    index_path: &str,
) -> Result<PersistenceProfile> {
    PersistenceProfileResolver::new(mode).resolve(credentials, index_path)
}

fn search_index_properties(index_path: &str) -> BTreeMap<String, String> {
    let batch_size = JDBC_BATCH_SIZE.to_string();
    [
        (keys::FORMAT_SQL, "false"),
        (keys::SHOW_SQL, "false"),
        (keys::SCHEMA_AUTO, "update"),
        (keys::JDBC_BATCH_SIZE, batch_size.as_str()),
        (keys::CACHE_QUERY, "false"),
        (keys::CACHE_SECOND_LEVEL, "false"),
        (keys::CACHE_STRUCTURED_ENTRIES, "false"),
        (keys::CACHE_MINIMAL_PUTS, "false"),
        (keys::SEARCH_MODEL_MAPPING, SEARCH_MODEL_MAPPING),
        (keys::SEARCH_DIRECTORY_PROVIDER, "filesystem"),
        (keys::SEARCH_INDEX_BASE, index_path),
        (keys::SEARCH_LUCENE_VERSION, "LUCENE_CURRENT"),
    ]
    .into_iter()
    .map(|(key, value)| (key.to_string(), value.to_string()))
    .collect()
}
