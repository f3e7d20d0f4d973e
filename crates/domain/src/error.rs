//! Unified error types for the domain layer
//!
//! Provides a common error type that can be used across all negotiation
//! operations, so adapters never have to fall back to String or anyhow.

use thiserror::Error;

/// Unified error type for domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Validation failed (bad tier, unknown motivation reference, empty name...)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Invalid ID format
    #[error("Invalid ID format: {0}")]
    InvalidId(String),

    /// Entity not found
    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// Parse error (for value objects)
    #[error("Parse error: {0}")]
    Parse(String),

    /// Operation not allowed in the current status
    #[error("Invalid state transition: {0}")]
    InvalidStateTransition(String),
}

impl DomainError {
    /// Creates a validation error for malformed input.
    ///
    /// Use this when input is rejected before any state is touched:
    /// - Tier outside 1..=3
    /// - Motivation argument without a registered motivation type
    /// - Empty or duplicate setup fields
    ///
    /// # Example
    /// ```
    /// use parley_domain::DomainError;
    ///
    /// let err = DomainError::validation("Tier must be 1, 2 or 3");
    /// assert!(matches!(err, DomainError::Validation(_)));
    /// ```
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a not found error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Create an invalid ID error
    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    /// Creates a parse error for string-to-type conversion failures.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Create an invalid state transition error
    pub fn invalid_state_transition(msg: impl Into<String>) -> Self {
        Self::InvalidStateTransition(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error() {
        let err = DomainError::validation("tier must be 1, 2 or 3");
        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(err.to_string(), "Validation failed: tier must be 1, 2 or 3");
    }

    #[test]
    fn test_not_found_error() {
        let err = DomainError::not_found("Motivation", "greed");
        assert!(matches!(err, DomainError::NotFound { .. }));
        assert_eq!(err.to_string(), "Entity not found: Motivation with id greed");
    }

    #[test]
    fn test_invalid_state_transition_error() {
        let err = DomainError::invalid_state_transition("cannot start a completed negotiation");
        assert!(matches!(err, DomainError::InvalidStateTransition(_)));
        assert!(err.to_string().contains("completed"));
    }
}
