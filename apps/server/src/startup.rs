//! Startup assembly
//!
//! Resolves every profile the storage, search and validation collaborators
//! are started with. Runs once; the result is immutable and shared.

use crate::{
    config::Config,
    dao::DaoBehaviorProfile,
    persistence::PersistenceProfile,
    validation::ValidationPolicy,
    Result,
};
use std::sync::Arc;

/// Everything resolved at startup, handed out read-only to request handlers
#[derive(Debug, Clone)]
pub struct ServerProfiles {
    pub persistence: Arc<PersistenceProfile>,
    pub dao: Arc<DaoBehaviorProfile>,
    pub validation: Arc<ValidationPolicy>,
}

impl ServerProfiles {
    pub fn from_config(config: &Config) -> Result<Self> {
        let persistence = config
            .persistence_resolver()
            .resolve(&config.credentials(), &config.search.index_location)?;

        config.dao.validate()?;

        let profiles = Self {
            persistence: Arc::new(persistence),
            dao: Arc::new(config.dao.clone()),
            validation: Arc::new(config.validation.clone()),
        };
        profiles.log_summary();

        Ok(profiles)
    }

    fn log_summary(&self) {
        tracing::info!(
            mode = %self.persistence.mode(),
            dialect = self.persistence.dialect_id(),
            datasource_url = self.persistence.datasource_url(),
            query_timeout_seconds = self.persistence.query_timeout_seconds(),
            index_base = self.persistence.index_base().unwrap_or_default(),
            "Persistence profile resolved"
        );
        tracing::info!(
            subscriptions_enabled = self.dao.subscriptions_enabled,
            default_page_size = self.dao.default_page_size,
            max_page_size = self.dao.max_page_size,
            count_results_up_to = self.dao.count_results_up_to,
            expunge_enabled = self.dao.expunge_enabled,
            "Storage behavior profile loaded"
        );
        tracing::info!(
            fail_on = ?self.validation.fail_on_severity,
            header_on = ?self.validation.header_on_severity,
            outcome_header_on = ?self.validation.outcome_header_on_severity,
            ignore_validator_exceptions = self.validation.ignore_validator_exceptions,
            "Validation policy loaded"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::RunMode;
    use crate::Error;

    #[test]
    fn local_config_resolves_without_credentials() {
        let config = Config::from_toml_str(
            r#"
            mode = "local"
            [search]
            index_location = "target/lucene"
            "#,
        )
        .unwrap();

        let profiles = ServerProfiles::from_config(&config).unwrap();
        assert_eq!(profiles.persistence.mode(), RunMode::Local);
        assert_eq!(profiles.dao.max_page_size, 500);
        assert!(profiles.validation.ignore_validator_exceptions);
    }

    #[test]
    fn production_config_without_password_fails() {
        let config = Config::from_toml_str(
            r#"
            [database]
            username = "fhir"
            [search]
            index_location = "/var/lucene"
            "#,
        )
        .unwrap();

        let err = ServerProfiles::from_config(&config).unwrap_err();
        assert!(matches!(err, Error::ConfigurationGap(_)));
    }
}
