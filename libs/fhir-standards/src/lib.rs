//! Standards status for FHIR conformance resources
//!
//! Every resource or profile definition published by HL7 carries a maturity
//! classification (draft, trial use, normative, ...). This crate provides:
//!
//! - [`StandardsStatus`]: the six-valued status type with its wire codes and
//!   rendering projections (display name, abbreviation, colors)
//! - [`StandardsStatus::can_depend_on`]: the rule deciding whether a definition
//!   may depend on another one of a given maturity
//! - [`dependency`]: checking declared dependency edges against that rule
//!
//! # Example
//!
//! ```rust
//! use fhirtest_standards::StandardsStatus;
//!
//! let status = StandardsStatus::parse("Trial Use").unwrap();
//! assert_eq!(status, Some(StandardsStatus::TrialUse));
//!
//! assert!(!StandardsStatus::Normative.can_depend_on(StandardsStatus::Draft));
//! assert!(StandardsStatus::TrialUse.can_depend_on(StandardsStatus::Normative));
//! ```

pub mod dependency;
pub mod error;
pub mod status;

pub use dependency::{check_edge, check_edges, DependencyEdge};
pub use error::{Error, Result};
pub use status::StandardsStatus;
