use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ModelError;

/// Rule identifier.
///
/// Codes are numeric in the published rule list (`100`, `8500`) but some
/// carry an alphabetic suffix (`8898Q`). Both spellings normalize to one
/// trimmed string identity.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct RuleCode(String);

impl RuleCode {
    /// Parse a user-supplied code, rejecting blanks.
    pub fn parse(value: &str) -> Result<Self, ModelError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ModelError::InvalidRuleCode(value.to_string()));
        }
        Ok(Self(trimmed.to_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<u32> for RuleCode {
    fn from(value: u32) -> Self {
        Self(value.to_string())
    }
}

impl From<&str> for RuleCode {
    fn from(value: &str) -> Self {
        Self(value.trim().to_uppercase())
    }
}

impl From<String> for RuleCode {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl fmt::Display for RuleCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Whether a rule is a hard error or an advisory query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleType {
    #[default]
    Error,
    /// Soft warning; does not block a submission.
    Query,
}

impl RuleType {
    pub fn label(self) -> &'static str {
        match self {
            Self::Error => "Error",
            Self::Query => "Query",
        }
    }

    pub fn is_blocking(self) -> bool {
        matches!(self, Self::Error)
    }
}

impl fmt::Display for RuleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
