//! Validated name newtypes for negotiation sessions
//!
//! These newtypes ensure that names are valid by construction:
//! - Non-empty
//! - Within length limits
//! - Trimmed of leading/trailing whitespace

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;

/// Maximum length for name fields
const MAX_NAME_LENGTH: usize = 200;

fn validate_name(kind: &str, name: String) -> Result<String, DomainError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(DomainError::validation(format!("{} cannot be empty", kind)));
    }
    if trimmed.chars().count() > MAX_NAME_LENGTH {
        return Err(DomainError::validation(format!(
            "{} cannot exceed {} characters",
            kind, MAX_NAME_LENGTH
        )));
    }
    Ok(trimmed.to_string())
}

// ============================================================================
// NegotiationName
// ============================================================================

/// A validated negotiation title (non-empty, <=200 chars, trimmed)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NegotiationName(String);

impl NegotiationName {
    /// Create a new validated negotiation name.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if:
    /// - The name is empty after trimming
    /// - The name exceeds 200 characters after trimming
    pub fn new(name: impl Into<String>) -> Result<Self, DomainError> {
        validate_name("Negotiation name", name.into()).map(Self)
    }

    /// Returns the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NegotiationName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for NegotiationName {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<NegotiationName> for String {
    fn from(name: NegotiationName) -> String {
        name.0
    }
}

// ============================================================================
// NpcName
// ============================================================================

/// The display name of the NPC being negotiated with (non-empty, <=200 chars, trimmed)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NpcName(String);

impl NpcName {
    /// Create a new validated NPC name.
    pub fn new(name: impl Into<String>) -> Result<Self, DomainError> {
        validate_name("NPC name", name.into()).map(Self)
    }

    /// Returns the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NpcName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for NpcName {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<NpcName> for String {
    fn from(name: NpcName) -> String {
        name.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_whitespace() {
        let name = NegotiationName::new("  Bargain at the Bridge  ").unwrap();
        assert_eq!(name.as_str(), "Bargain at the Bridge");
    }

    #[test]
    fn rejects_blank_names() {
        assert!(NegotiationName::new("   ").is_err());
        assert!(NpcName::new("").is_err());
    }

    #[test]
    fn rejects_overlong_names() {
        let long = "x".repeat(201);
        let err = NpcName::new(long).unwrap_err();
        assert!(err.to_string().contains("200"));
    }

    #[test]
    fn deserialization_validates() {
        let result: Result<NpcName, _> = serde_json::from_str("\"   \"");
        assert!(result.is_err());

        let name: NpcName = serde_json::from_str("\"Baron Kell\"").unwrap();
        assert_eq!(name.as_str(), "Baron Kell");
    }
}
