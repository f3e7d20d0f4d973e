//! Outcome classification for completed negotiations.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;
use crate::value_objects::Interest;

/// Final discrete result of a completed negotiation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NegotiationOutcome {
    /// The NPC refuses and turns against the party
    Hostile,
    /// The NPC offers something less than was asked
    LesserOffer,
    /// Both sides give ground
    Compromise,
    /// The party gets what it asked for
    SuccessFull,
    /// The party gets what it asked for, and then some
    SuccessFullBonus,
}

impl NegotiationOutcome {
    /// Classify an interest value into an outcome.
    pub fn from_interest(interest: Interest) -> Self {
        match interest.value() {
            0 => Self::Hostile,
            1 | 2 => Self::LesserOffer,
            3 => Self::Compromise,
            4 => Self::SuccessFull,
            _ => Self::SuccessFullBonus,
        }
    }

    /// All outcomes, worst first.
    pub fn all() -> &'static [NegotiationOutcome] {
        &[
            Self::Hostile,
            Self::LesserOffer,
            Self::Compromise,
            Self::SuccessFull,
            Self::SuccessFullBonus,
        ]
    }

    /// Get a display name for the outcome
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Hostile => "Hostile",
            Self::LesserOffer => "Lesser Offer",
            Self::Compromise => "Compromise",
            Self::SuccessFull => "Success",
            Self::SuccessFullBonus => "Success with Bonus",
        }
    }

    /// Whether the party got everything it asked for.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::SuccessFull | Self::SuccessFullBonus)
    }

    fn as_str(&self) -> &'static str {
        match self {
            Self::Hostile => "hostile",
            Self::LesserOffer => "lesser_offer",
            Self::Compromise => "compromise",
            Self::SuccessFull => "success_full",
            Self::SuccessFullBonus => "success_full_bonus",
        }
    }
}

/// Classify final interest into an outcome. Pure; no state.
pub fn classify(interest: Interest) -> NegotiationOutcome {
    NegotiationOutcome::from_interest(interest)
}

impl fmt::Display for NegotiationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NegotiationOutcome {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|outcome| outcome.as_str() == s.trim().to_ascii_lowercase())
            .ok_or_else(|| DomainError::parse(format!("Unknown negotiation outcome: {}", s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify_value(value: u8) -> NegotiationOutcome {
        classify(Interest::new(value).unwrap())
    }

    #[test]
    fn classifies_every_interest_level() {
        assert_eq!(classify_value(0), NegotiationOutcome::Hostile);
        assert_eq!(classify_value(1), NegotiationOutcome::LesserOffer);
        assert_eq!(classify_value(2), NegotiationOutcome::LesserOffer);
        assert_eq!(classify_value(3), NegotiationOutcome::Compromise);
        assert_eq!(classify_value(4), NegotiationOutcome::SuccessFull);
        assert_eq!(classify_value(5), NegotiationOutcome::SuccessFullBonus);
    }

    #[test]
    fn only_full_outcomes_are_successes() {
        let successes: Vec<_> = NegotiationOutcome::all()
            .iter()
            .filter(|o| o.is_success())
            .collect();
        assert_eq!(
            successes,
            vec![
                &NegotiationOutcome::SuccessFull,
                &NegotiationOutcome::SuccessFullBonus
            ]
        );
    }

    #[test]
    fn display_and_parse_agree_with_serde_names() {
        for outcome in NegotiationOutcome::all() {
            let json = serde_json::to_string(outcome).unwrap();
            assert_eq!(json, format!("\"{}\"", outcome));
            assert_eq!(outcome.to_string().parse::<NegotiationOutcome>().unwrap(), *outcome);
        }
        assert!("victory".parse::<NegotiationOutcome>().is_err());
    }
}
