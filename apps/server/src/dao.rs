//! Storage engine behavior profile
//!
//! Operational limits the resource storage engine honors: subscriptions,
//! reference handling, search result counting, indexing and paging.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::time::Duration;

/// Upper bound on how many search results are counted for `Bundle.total`
pub const COUNT_SEARCH_RESULTS_UP_TO: u32 = 50_000;

const MILLIS_PER_HOUR: u64 = 60 * 60 * 1000;

/// Whether resources get `:missing` index rows for absent search fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexMissingFields {
    Disabled,
    #[default]
    Enabled,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DaoBehaviorProfile {
    pub subscriptions_enabled: bool,
    pub subscription_poll_delay_ms: u64,
    pub subscription_purge_inactive_after_ms: u64,
    pub allow_multiple_delete: bool,
    pub allow_inline_match_url_references: bool,
    pub allow_external_references: bool,
    /// Absolute base URLs treated as references to this server
    pub local_base_urls: BTreeSet<String>,
    pub count_results_up_to: u32,
    pub index_missing_fields: IndexMissingFields,
    pub fetch_size_max: u32,
    pub reindex_thread_count: u32,
    pub expunge_enabled: bool,
    pub default_page_size: u32,
    pub max_page_size: u32,
}

impl Default for DaoBehaviorProfile {
    fn default() -> Self {
        Self {
            subscriptions_enabled: true,
            subscription_poll_delay_ms: 5000,
            subscription_purge_inactive_after_ms: MILLIS_PER_HOUR,
            allow_multiple_delete: true,
            allow_inline_match_url_references: true,
            allow_external_references: true,
            local_base_urls: BTreeSet::from([
                "http://fhirtest.uhn.ca/baseDstu3".to_string(),
                "https://fhirtest.uhn.ca/baseDstu3".to_string(),
            ]),
            count_results_up_to: COUNT_SEARCH_RESULTS_UP_TO,
            index_missing_fields: IndexMissingFields::Enabled,
            fetch_size_max: 10_000,
            reindex_thread_count: 1,
            expunge_enabled: true,
            default_page_size: 20,
            max_page_size: 500,
        }
    }
}

impl DaoBehaviorProfile {
    pub fn validate(&self) -> Result<()> {
        if self.default_page_size == 0 {
            return Err(Error::InvalidProfile(
                "default_page_size must be greater than 0".to_string(),
            ));
        }
        if self.default_page_size > self.max_page_size {
            return Err(Error::InvalidProfile(format!(
                "default_page_size ({}) must not exceed max_page_size ({})",
                self.default_page_size, self.max_page_size
            )));
        }
        if self.fetch_size_max == 0 {
            return Err(Error::InvalidProfile(
                "fetch_size_max must be greater than 0".to_string(),
            ));
        }
        if self.reindex_thread_count == 0 {
            return Err(Error::InvalidProfile(
                "reindex_thread_count must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Effective page size for a `_count` request
    pub fn page_size(&self, requested: Option<u32>) -> u32 {
        match requested {
            None | Some(0) => self.default_page_size,
            Some(n) => n.min(self.max_page_size),
        }
    }

    pub fn is_local_base_url(&self, url: &str) -> bool {
        let url = url.strip_suffix('/').unwrap_or(url);
        self.local_base_urls.contains(url)
    }

    pub fn subscription_poll_delay(&self) -> Duration {
        Duration::from_millis(self.subscription_poll_delay_ms)
    }

    pub fn subscription_purge_inactive_after(&self) -> Duration {
        Duration::from_millis(self.subscription_purge_inactive_after_ms)
    }
}
