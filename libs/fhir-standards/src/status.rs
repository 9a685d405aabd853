//! The standards status value type

use crate::error::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Maturity classification of a conformance resource.
///
/// Variants are declared from least to most mature; the derived ordering is
/// what [`StandardsStatus::is_lower_than`] compares. That ordering is not the
/// dependency rule, see [`StandardsStatus::can_depend_on`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StandardsStatus {
    External,
    Informative,
    Draft,
    TrialUse,
    Deprecated,
    Normative,
}

/// Rendering row for one status
struct Descriptor {
    display: &'static str,
    code: &'static str,
    abbrev: &'static str,
    color: &'static str,
    color_svg: &'static str,
}

impl StandardsStatus {
    /// All statuses in declaration order
    pub const ALL: [StandardsStatus; 6] = [
        Self::External,
        Self::Informative,
        Self::Draft,
        Self::TrialUse,
        Self::Deprecated,
        Self::Normative,
    ];

    const fn descriptor(self) -> Descriptor {
        match self {
            Self::External => Descriptor {
                display: "External",
                code: "external",
                abbrev: "X",
                color: "#e6ffff",
                color_svg: "#ecffff",
            },
            Self::Informative => Descriptor {
                display: "Informative",
                code: "informative",
                abbrev: "I",
                color: "#ffffe6",
                color_svg: "#ffffec",
            },
            Self::Draft => Descriptor {
                display: "Draft",
                code: "draft",
                abbrev: "D",
                color: "#efefef",
                color_svg: "#f6f6f6",
            },
            Self::TrialUse => Descriptor {
                display: "Trial Use",
                code: "trial-use",
                abbrev: "TU",
                color: "#fff5e6",
                color_svg: "#fff9ec",
            },
            Self::Deprecated => Descriptor {
                display: "Deprecated",
                code: "deprecated",
                abbrev: "XD",
                color: "#ffcccc",
                color_svg: "#ffcccc",
            },
            Self::Normative => Descriptor {
                display: "Normative",
                code: "normative",
                abbrev: "N",
                color: "#e6ffe6",
                color_svg: "#ecffec",
            },
        }
    }

    /// Human readable name ("Trial Use")
    pub const fn display(self) -> &'static str {
        self.descriptor().display
    }

    /// Wire code used in resource metadata ("trial-use")
    pub const fn code(self) -> &'static str {
        self.descriptor().code
    }

    /// Short label used in tables ("TU")
    pub const fn abbrev(self) -> &'static str {
        self.descriptor().abbrev
    }

    /// Background color for HTML rendering
    pub const fn color(self) -> &'static str {
        self.descriptor().color
    }

    /// Background color for SVG diagrams
    pub const fn color_svg(self) -> &'static str {
        self.descriptor().color_svg
    }

    /// Parse a status code.
    ///
    /// Matching is case-insensitive. Trial use is additionally accepted as
    /// `trial_use` and `trial use`. A blank value means "no status" and
    /// returns `Ok(None)`; any other unknown value is a [`Error::Format`].
    pub fn parse(value: &str) -> Result<Option<Self>> {
        if value.trim().is_empty() {
            return Ok(None);
        }
        Self::from_code(value)
            .map(Some)
            .ok_or_else(|| Error::Format(value.to_string()))
    }

    /// Like [`StandardsStatus::parse`], treating a missing value as blank
    pub fn parse_opt(value: Option<&str>) -> Result<Option<Self>> {
        match value {
            Some(value) => Self::parse(value),
            None => Ok(None),
        }
    }

    fn from_code(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "external" => Some(Self::External),
            "informative" => Some(Self::Informative),
            "draft" => Some(Self::Draft),
            "trial-use" | "trial_use" | "trial use" => Some(Self::TrialUse),
            "deprecated" => Some(Self::Deprecated),
            "normative" => Some(Self::Normative),
            _ => None,
        }
    }

    /// Whether a definition with this status may depend on one with `target`.
    ///
    /// Drafts, informative and external content may depend on anything.
    /// Trial use may not depend on drafts. Normative content may only depend
    /// on normative or external content, and deprecated content only on other
    /// deprecated content.
    pub const fn can_depend_on(self, target: StandardsStatus) -> bool {
        match self {
            Self::Draft | Self::Informative | Self::External => true,
            Self::TrialUse => !matches!(target, Self::Draft),
            Self::Normative => matches!(target, Self::Normative | Self::External),
            Self::Deprecated => matches!(target, Self::Deprecated),
        }
    }

    /// Strict comparison by declaration order
    pub fn is_lower_than(self, other: StandardsStatus) -> bool {
        self < other
    }
}

impl fmt::Display for StandardsStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display())
    }
}

impl FromStr for StandardsStatus {
    type Err = Error;

    /// Strict parse; unlike [`StandardsStatus::parse`], a blank value is an error.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::from_code(s).ok_or_else(|| Error::Format(s.to_string()))
    }
}

impl Serialize for StandardsStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

impl<'de> Deserialize<'de> for StandardsStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let code = String::deserialize(deserializer)?;
        code.parse().map_err(serde::de::Error::custom)
    }
}
