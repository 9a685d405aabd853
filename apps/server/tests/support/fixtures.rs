use fhirtest::Config;

pub const INDEX_LOCATION: &str = "/var/lib/fhirtest/lucene";

/// Local test mode with no database login
pub fn local_config() -> anyhow::Result<Config> {
    Ok(Config::from_toml_str(&format!(
        r#"
        mode = "local"

        [search]
        index_location = "{INDEX_LOCATION}"
        "#
    ))?)
}

/// Production mode with a complete database login
pub fn production_config() -> anyhow::Result<Config> {
    Ok(Config::from_toml_str(&format!(
        r#"
        mode = "production"

        [database]
        username = "fhirtest"
        password = "correct-horse"

        [search]
        index_location = "{INDEX_LOCATION}"
        "#
    ))?)
}
