//! Request validation policy
//!
//! Severity thresholds read by the request-validating interceptor. The rules
//! themselves live in the validator; this only decides what happens to a
//! request once its issues are known.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Issue severity, ordered from least to most severe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Information,
    Warning,
    Error,
    Fatal,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Information => "information",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Fatal => "fatal",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown severity '{0}'")]
pub struct ParseSeverityError(pub String);

impl FromStr for Severity {
    type Err = ParseSeverityError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "information" => Ok(Self::Information),
            "warning" => Ok(Self::Warning),
            "error" => Ok(Self::Error),
            "fatal" => Ok(Self::Fatal),
            _ => Err(ParseSeverityError(s.to_string())),
        }
    }
}

/// What to do with a validated request.
///
/// A threshold of `None` disables the corresponding action. In configuration
/// files a threshold is written as a severity name or `"none"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationPolicy {
    /// Reject the request when an issue at or above this severity is found
    #[serde(deserialize_with = "deserialize_threshold")]
    pub fail_on_severity: Option<Severity>,
    /// Add a summary response header at or above this severity
    #[serde(deserialize_with = "deserialize_threshold")]
    pub header_on_severity: Option<Severity>,
    /// Add the OperationOutcome response header at or above this severity
    #[serde(deserialize_with = "deserialize_threshold")]
    pub outcome_header_on_severity: Option<Severity>,
    /// Swallow exceptions raised inside the validator instead of failing the request
    pub ignore_validator_exceptions: bool,
}

impl Default for ValidationPolicy {
    fn default() -> Self {
        Self {
            fail_on_severity: None,
            header_on_severity: None,
            outcome_header_on_severity: Some(Severity::Information),
            ignore_validator_exceptions: true,
        }
    }
}

/// Outcome of applying a [`ValidationPolicy`] to a set of issues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ValidationDecision {
    pub highest: Option<Severity>,
    pub reject: bool,
    pub response_header: bool,
    pub outcome_header: bool,
}

impl ValidationPolicy {
    pub fn with_fail_on(mut self, severity: Option<Severity>) -> Self {
        self.fail_on_severity = severity;
        self
    }

    pub fn with_response_header_on(mut self, severity: Option<Severity>) -> Self {
        self.header_on_severity = severity;
        self
    }

    pub fn with_outcome_header_on(mut self, severity: Option<Severity>) -> Self {
        self.outcome_header_on_severity = severity;
        self
    }

    pub fn with_ignore_validator_exceptions(mut self, ignore: bool) -> Self {
        self.ignore_validator_exceptions = ignore;
        self
    }

    pub fn rejects(&self, severity: Severity) -> bool {
        reaches(self.fail_on_severity, severity)
    }

    pub fn adds_response_header(&self, severity: Severity) -> bool {
        reaches(self.header_on_severity, severity)
    }

    pub fn adds_outcome_header(&self, severity: Severity) -> bool {
        reaches(self.outcome_header_on_severity, severity)
    }

    /// Decide on a request from the severities of all issues found
    pub fn evaluate<I>(&self, severities: I) -> ValidationDecision
    where
        I: IntoIterator<Item = Severity>,
    {
        let Some(highest) = severities.into_iter().max() else {
            return ValidationDecision::default();
        };
        ValidationDecision {
            highest: Some(highest),
            reject: self.rejects(highest),
            response_header: self.adds_response_header(highest),
            outcome_header: self.adds_outcome_header(highest),
        }
    }

    /// Handle an error raised by the validator itself.
    ///
    /// Returns `Ok(())` when the policy ignores validator exceptions, handing
    /// the error back otherwise.
    pub fn on_validator_exception<E>(&self, err: E) -> std::result::Result<(), E>
    where
        E: fmt::Display,
    {
        if self.ignore_validator_exceptions {
            tracing::warn!(error = %err, "Validator raised an exception, ignoring");
            Ok(())
        } else {
            Err(err)
        }
    }
}

fn deserialize_threshold<'de, D>(deserializer: D) -> std::result::Result<Option<Severity>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = Option::<String>::deserialize(deserializer)? else {
        return Ok(None);
    };
    let raw = raw.trim();
    if raw.is_empty() || raw.eq_ignore_ascii_case("none") {
        return Ok(None);
    }
    raw.parse().map(Some).map_err(serde::de::Error::custom)
}

fn reaches(threshold: Option<Severity>, severity: Severity) -> bool {
    threshold.is_some_and(|threshold| severity >= threshold)
}
