//! Dependency edges between conformance resources
//!
//! A definition (profile, extension, value set, ...) declares what it relies
//! on. Each such edge is valid only if the source's status may depend on the
//! target's status.

use crate::error::{Error, Result};
use crate::StandardsStatus;

/// A declared reliance of one definition on another
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyEdge {
    /// Canonical URL or name of the depending definition
    pub source: String,
    pub source_status: StandardsStatus,
    /// Canonical URL or name of the definition depended on
    pub target: String,
    pub target_status: StandardsStatus,
}

impl DependencyEdge {
    pub fn new(
        source: impl Into<String>,
        source_status: StandardsStatus,
        target: impl Into<String>,
        target_status: StandardsStatus,
    ) -> Self {
        Self {
            source: source.into(),
            source_status,
            target: target.into(),
            target_status,
        }
    }

    pub fn is_allowed(&self) -> bool {
        self.source_status.can_depend_on(self.target_status)
    }
}

/// Check a single edge, naming both ends on failure
pub fn check_edge(edge: &DependencyEdge) -> Result<()> {
    if edge.is_allowed() {
        return Ok(());
    }
    Err(Error::IncompatibleDependency {
        source_name: edge.source.clone(),
        source_status: edge.source_status,
        target_name: edge.target.clone(),
        target_status: edge.target_status,
    })
}

/// Check every edge and collect all violations in input order
pub fn check_edges<'a, I>(edges: I) -> Vec<Error>
where
    I: IntoIterator<Item = &'a DependencyEdge>,
{
    edges
        .into_iter()
        .filter_map(|edge| check_edge(edge).err())
        .collect()
}
