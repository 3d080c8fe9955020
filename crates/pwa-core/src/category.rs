//! # Rule Category
//!
//! Every manifest check belongs to exactly one category. The category
//! decides which failure counter a failed check lands in and whether the
//! failure blocks packaging (only `required` does).

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::PwaError;

/// Severity bucket of a manifest rule.
///
/// | Category | Packaging impact |
/// |----------|------------------|
/// | Required | a failure blocks store packaging |
/// | Recommended | reported as a warning, does not block |
/// | Optional | informational |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Must pass for the manifest to be packageable.
    Required,
    /// Should pass; store listings and install prompts are poorer without it.
    Recommended,
    /// Nice to have.
    Optional,
}

impl Category {
    /// Returns all categories in presentation order.
    pub fn all() -> &'static [Category] {
        &[Self::Required, Self::Recommended, Self::Optional]
    }

    /// Returns the lowercase string identifier for this category.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::Recommended => "recommended",
            Self::Optional => "optional",
        }
    }

    /// Presentation rank: required failures sort before recommended ones,
    /// recommended before optional.
    pub fn rank(&self) -> u8 {
        match self {
            Self::Required => 0,
            Self::Recommended => 1,
            Self::Optional => 2,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = PwaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "required" => Ok(Self::Required),
            "recommended" => Ok(Self::Recommended),
            "optional" => Ok(Self::Optional),
            other => Err(PwaError::Config(format!("unknown rule category: {other:?}"))),
        }
    }
}
