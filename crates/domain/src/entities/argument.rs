//! Argument entities - what the players put forward at the table.
//!
//! An `ArgumentRecord` is an immutable fact once appended to a session's
//! history. It captures the deltas that were actually applied (after
//! clamping), not the raw rules-table values, so history stays meaningful
//! at the boundaries and if the rules table later changes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::ids::ArgumentId;

use crate::error::DomainError;

/// How an argument relates to the NPC's levers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArgumentType {
    /// Appeals to one of the NPC's motivations
    Motivation,
    /// Appeals to nothing in particular
    NoMotivation,
    /// Triggers one of the NPC's pitfalls
    Pitfall,
}

impl ArgumentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Motivation => "motivation",
            Self::NoMotivation => "no_motivation",
            Self::Pitfall => "pitfall",
        }
    }
}

impl fmt::Display for ArgumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ArgumentType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "motivation" => Ok(Self::Motivation),
            "no_motivation" | "nomotivation" => Ok(Self::NoMotivation),
            "pitfall" => Ok(Self::Pitfall),
            _ => Err(DomainError::parse(format!("Unknown argument type: {}", s))),
        }
    }
}

/// Strength class of an argument as presented at the table (1..=3)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum ArgumentTier {
    One,
    Two,
    Three,
}

impl ArgumentTier {
    pub fn value(self) -> u8 {
        match self {
            Self::One => 1,
            Self::Two => 2,
            Self::Three => 3,
        }
    }
}

impl TryFrom<u8> for ArgumentTier {
    type Error = DomainError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::One),
            2 => Ok(Self::Two),
            3 => Ok(Self::Three),
            other => Err(DomainError::validation(format!(
                "Argument tier must be 1, 2 or 3, got {}",
                other
            ))),
        }
    }
}

impl From<ArgumentTier> for u8 {
    fn from(tier: ArgumentTier) -> u8 {
        tier.value()
    }
}

impl fmt::Display for ArgumentTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tier {}", self.value())
    }
}

/// Raw argument as entered by the GM, validated by `NegotiationSession::record_argument`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArgumentInput {
    #[serde(rename = "type")]
    pub argument_type: ArgumentType,
    pub tier: u8,
    #[serde(default)]
    pub motivation_type: Option<String>,
    pub description: String,
    #[serde(default)]
    pub player_name: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl ArgumentInput {
    /// An argument appealing to the named motivation.
    pub fn motivation(
        tier: u8,
        motivation_type: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            argument_type: ArgumentType::Motivation,
            tier,
            motivation_type: Some(motivation_type.into()),
            description: description.into(),
            player_name: None,
            notes: None,
        }
    }

    /// An argument that appeals to no motivation.
    pub fn no_motivation(tier: u8, description: impl Into<String>) -> Self {
        Self {
            argument_type: ArgumentType::NoMotivation,
            tier,
            motivation_type: None,
            description: description.into(),
            player_name: None,
            notes: None,
        }
    }

    /// An argument that triggers a pitfall.
    pub fn pitfall(tier: u8, description: impl Into<String>) -> Self {
        Self {
            argument_type: ArgumentType::Pitfall,
            tier,
            motivation_type: None,
            description: description.into(),
            player_name: None,
            notes: None,
        }
    }

    pub fn with_player_name(mut self, player_name: impl Into<String>) -> Self {
        self.player_name = Some(player_name.into());
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

/// A recorded argument and the deltas it actually applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArgumentRecord {
    id: ArgumentId,
    description: String,
    player_name: Option<String>,
    notes: Option<String>,
    #[serde(rename = "type")]
    argument_type: ArgumentType,
    tier: ArgumentTier,
    motivation_type: Option<String>,
    interest_change: i32,
    patience_change: i32,
    recorded_at: DateTime<Utc>,
}

impl ArgumentRecord {
    /// Build a record from validated input and the applied deltas.
    pub(crate) fn new(
        id: ArgumentId,
        input: ArgumentInput,
        tier: ArgumentTier,
        interest_change: i32,
        patience_change: i32,
        recorded_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            description: input.description,
            player_name: input.player_name,
            notes: input.notes,
            argument_type: input.argument_type,
            tier,
            motivation_type: input.motivation_type,
            interest_change,
            patience_change,
            recorded_at,
        }
    }

    #[inline]
    pub fn id(&self) -> ArgumentId {
        self.id
    }

    #[inline]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[inline]
    pub fn player_name(&self) -> Option<&str> {
        self.player_name.as_deref()
    }

    #[inline]
    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    #[inline]
    pub fn argument_type(&self) -> ArgumentType {
        self.argument_type
    }

    #[inline]
    pub fn tier(&self) -> ArgumentTier {
        self.tier
    }

    /// The motivation appealed to (only for `motivation` arguments).
    #[inline]
    pub fn motivation_type(&self) -> Option<&str> {
        self.motivation_type.as_deref()
    }

    /// Interest delta actually applied, after clamping.
    #[inline]
    pub fn interest_change(&self) -> i32 {
        self.interest_change
    }

    /// Patience delta actually applied, after clamping.
    #[inline]
    pub fn patience_change(&self) -> i32 {
        self.patience_change
    }

    #[inline]
    pub fn recorded_at(&self) -> DateTime<Utc> {
        self.recorded_at
    }
}
