//! Error types for standards status handling

use thiserror::Error;

use crate::StandardsStatus;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("Incorrect standards status '{0}'")]
    Format(String),

    #[error("{source_name} ({source_status}) cannot depend on {target_name} ({target_status})")]
    IncompatibleDependency {
        source_name: String,
        source_status: StandardsStatus,
        target_name: String,
        target_status: StandardsStatus,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
