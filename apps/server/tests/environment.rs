//! Configuration loaded from the process environment.
//!
//! Kept to a single test: it mutates process-wide environment variables.

mod support;

use fhirtest::{Config, RunMode, ServerProfiles, Severity};
use support::init_tracing;

#[test]
fn environment_overrides_config_file() -> anyhow::Result<()> {
    init_tracing();

    let dir = std::env::temp_dir().join(format!("fhirtest-env-{}", std::process::id()));
    std::fs::create_dir_all(&dir)?;
    let file = dir.join("fhirtest.toml");
    std::fs::write(
        &file,
        r#"
        mode = "production"

        [database]
        username = "fileuser"
        password = "filepass"

        [search]
        index_location = "/file/idx"

        [validation]
        fail_on_severity = "error"
        "#,
    )?;

    std::env::set_var("FHIRTEST_CONFIG", &file);
    std::env::set_var("FHIRTEST__MODE", "local");
    std::env::set_var("FHIRTEST__DATABASE__USERNAME", "envuser");
    std::env::set_var("FHIRTEST__DATABASE__PASSWORD", "12345");
    std::env::set_var("FHIRTEST__SEARCH__INDEX_LOCATION", "/env/idx");
    std::env::set_var("FHIRTEST__DAO__MAX_PAGE_SIZE", "700");

    let loaded = Config::load();
    let _ = std::fs::remove_dir_all(&dir);
    let config = loaded?;
    config.validate()?;

    let profiles = ServerProfiles::from_config(&config)?;
    assert_eq!(profiles.persistence.mode(), RunMode::Local);
    assert_eq!(profiles.persistence.username(), "envuser");
    assert_eq!(profiles.persistence.password().expose(), "12345");
    assert_eq!(profiles.persistence.index_base(), Some("/env/idx"));
    assert_eq!(profiles.dao.max_page_size, 700);
    assert_eq!(profiles.dao.default_page_size, 20);

    // Sections the environment leaves alone come from the file
    assert_eq!(profiles.validation.fail_on_severity, Some(Severity::Error));
    Ok(())
}
