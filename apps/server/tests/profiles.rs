//! End-to-end resolution of the startup profiles from configuration

mod support;

use fhirtest::{
    dao::IndexMissingFields,
    persistence::{self, keys},
    Credentials, DaoBehaviorProfile, Error, RunMode, ServerProfiles, Severity, ValidationPolicy,
};
use support::{init_tracing, local_config, production_config, INDEX_LOCATION};

#[test]
fn local_and_production_profiles_are_disjoint() -> anyhow::Result<()> {
    init_tracing();

    let local = ServerProfiles::from_config(&local_config()?)?;
    let production = ServerProfiles::from_config(&production_config()?)?;

    assert_eq!(local.persistence.mode(), RunMode::Local);
    assert!(local.persistence.dialect().is_embedded());
    assert!(local.persistence.datasource_url().contains(":memory:"));

    assert_eq!(production.persistence.mode(), RunMode::Production);
    assert!(!production.persistence.dialect().is_embedded());
    assert!(production
        .persistence
        .datasource_url()
        .starts_with("jdbc:postgresql://localhost/"));

    assert_ne!(
        local.persistence.dialect_id(),
        production.persistence.dialect_id()
    );
    Ok(())
}

#[test]
fn index_properties_reach_the_search_engine() -> anyhow::Result<()> {
    init_tracing();

    let profiles = ServerProfiles::from_config(&production_config()?)?;
    let props = profiles.persistence.search_index_properties();

    assert_eq!(props[keys::SEARCH_DIRECTORY_PROVIDER], "filesystem");
    assert_eq!(props[keys::SEARCH_INDEX_BASE], INDEX_LOCATION);
    assert_eq!(props[keys::SEARCH_LUCENE_VERSION], "LUCENE_CURRENT");
    assert_eq!(props[keys::CACHE_QUERY], "false");
    assert_eq!(props[keys::JDBC_BATCH_SIZE], "20");
    assert_eq!(profiles.persistence.query_timeout_seconds(), 20);
    Ok(())
}

#[test]
fn production_secrets_are_injected_verbatim() -> anyhow::Result<()> {
    let profiles = ServerProfiles::from_config(&production_config()?)?;

    assert_eq!(profiles.persistence.username(), "fhirtest");
    assert_eq!(profiles.persistence.password().expose(), "correct-horse");
    assert!(!format!("{:?}", profiles.persistence).contains("correct-horse"));
    Ok(())
}

#[test]
fn production_without_credentials_is_a_configuration_gap() {
    let err = persistence::resolve(RunMode::Production, &Credentials::default(), INDEX_LOCATION)
        .unwrap_err();
    assert!(matches!(err, Error::ConfigurationGap(_)));
    assert!(err.to_string().starts_with("Configuration gap:"));
}

#[test]
fn default_storage_profile_limits() {
    let dao = DaoBehaviorProfile::default();

    assert!(dao.default_page_size > 0);
    assert!(dao.default_page_size <= dao.max_page_size);
    assert_eq!((dao.default_page_size, dao.max_page_size), (20, 500));
    assert_eq!(dao.subscription_poll_delay_ms, 5000);
    assert_eq!(dao.subscription_purge_inactive_after_ms, 3_600_000);
    assert_eq!(dao.fetch_size_max, 10_000);
    assert!(dao
        .local_base_urls
        .contains("https://fhirtest.uhn.ca/baseDstu3"));
}

#[test]
fn storage_profile_serializes_with_lowercase_enums() -> anyhow::Result<()> {
    let json = serde_json::to_value(DaoBehaviorProfile::default())?;
    assert_eq!(json["index_missing_fields"], "enabled");
    assert_eq!(json["local_base_urls"].as_array().map(Vec::len), Some(2));

    let disabled = DaoBehaviorProfile {
        index_missing_fields: IndexMissingFields::Disabled,
        ..Default::default()
    };
    assert_eq!(
        serde_json::to_value(disabled)?["index_missing_fields"],
        "disabled"
    );
    Ok(())
}

#[test]
fn default_validation_policy_only_adds_outcome_headers() {
    let policy = ValidationPolicy::default();

    assert_eq!(policy.fail_on_severity, None);
    assert_eq!(policy.header_on_severity, None);
    assert_eq!(policy.outcome_header_on_severity, Some(Severity::Information));
    assert!(policy.ignore_validator_exceptions);

    let decision = policy.evaluate([Severity::Error, Severity::Fatal]);
    assert!(!decision.reject);
    assert!(decision.outcome_header);
}

#[test]
fn validation_policy_override_from_config() -> anyhow::Result<()> {
    let config = fhirtest::Config::from_toml_str(
        r#"
        mode = "local"

        [search]
        index_location = "idx"

        [validation]
        fail_on_severity = "error"
        header_on_severity = "warning"
        ignore_validator_exceptions = false
        "#,
    )?;

    let profiles = ServerProfiles::from_config(&config)?;
    let decision = profiles.validation.evaluate([Severity::Warning]);
    assert!(!decision.reject);
    assert!(decision.response_header);
    assert!(profiles.validation.rejects(Severity::Fatal));
    assert!(profiles
        .validation
        .on_validator_exception("validator crashed")
        .is_err());
    Ok(())
}
