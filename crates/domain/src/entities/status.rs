//! Negotiation status lifecycle.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;

/// Lifecycle status of a negotiation session
///
/// `Preparing -> Active -> Completed`, with `Completed -> Active` allowed
/// only through an explicit reopen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NegotiationStatus {
    /// Setup phase; levers and starting values may still be edited
    #[default]
    Preparing,
    /// Arguments are being recorded
    Active,
    /// Negotiation has ended and has an outcome
    Completed,
}

impl NegotiationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Preparing => "preparing",
            Self::Active => "active",
            Self::Completed => "completed",
        }
    }
}

impl fmt::Display for NegotiationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NegotiationStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "preparing" => Ok(Self::Preparing),
            "active" => Ok(Self::Active),
            "completed" => Ok(Self::Completed),
            _ => Err(DomainError::parse(format!("Unknown negotiation status: {}", s))),
        }
    }
}
