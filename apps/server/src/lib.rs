//! FHIR test server profiles
//!
//! Startup configuration for the FHIR test server:
//! - Persistence profile resolution for local (embedded) and production modes
//! - Storage engine behavior limits (paging, subscriptions, indexing)
//! - Request validation severity policy
//! - Configuration loading and logging setup
//!
//! The standards-status maturity rules live in `fhirtest-standards`.

pub mod config;
pub mod dao;
pub mod error;
pub mod logging;
pub mod persistence;
pub mod startup;
pub mod validation;

pub use config::Config;
pub use dao::DaoBehaviorProfile;
pub use error::{Error, Result};
pub use persistence::{Credentials, PersistenceProfile, PersistenceProfileResolver, RunMode};
pub use startup::ServerProfiles;
pub use validation::{Severity, ValidationPolicy};
