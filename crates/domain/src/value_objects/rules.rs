//! Negotiation rules table.
//!
//! Argument resolution is a lookup keyed by `(ArgumentType, ArgumentTier)`.
//! The table is data so that alternate rule sets can be substituted (for
//! example loaded from a settings file) without touching the state machine.

use serde::{Deserialize, Serialize};

use crate::entities::{ArgumentTier, ArgumentType};
use crate::error::DomainError;
use crate::value_objects::{Interest, MAX_PATIENCE};

/// Raw interest/patience change produced by an argument, before clamping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ResourceDelta {
    pub interest: i32,
    pub patience: i32,
}

impl ResourceDelta {
    pub const fn new(interest: i32, patience: i32) -> Self {
        Self { interest, patience }
    }
}

/// One row of the rules table: the deltas for each tier of an argument type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TierDeltas {
    pub tier1: ResourceDelta,
    pub tier2: ResourceDelta,
    pub tier3: ResourceDelta,
}

impl TierDeltas {
    pub const fn new(tier1: ResourceDelta, tier2: ResourceDelta, tier3: ResourceDelta) -> Self {
        Self {
            tier1,
            tier2,
            tier3,
        }
    }

    pub fn get(&self, tier: ArgumentTier) -> ResourceDelta {
        match tier {
            ArgumentTier::One => self.tier1,
            ArgumentTier::Two => self.tier2,
            ArgumentTier::Three => self.tier3,
        }
    }
}

/// The full delta table used by argument resolution.
///
/// Rows missing from a deserialized table fall back to the reference rules.
///
/// # Examples
///
/// ```
/// use parley_domain::{ArgumentTier, ArgumentType, NegotiationRules, ResourceDelta};
///
/// let rules = NegotiationRules::default();
/// assert_eq!(
///     rules.deltas_for(ArgumentType::Pitfall, ArgumentTier::Three),
///     ResourceDelta::new(-2, -1)
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct NegotiationRules {
    pub motivation: TierDeltas,
    pub no_motivation: TierDeltas,
    pub pitfall: TierDeltas,
}

impl NegotiationRules {
    /// The reference rule set.
    pub const REFERENCE: Self = Self {
        motivation: TierDeltas::new(
            ResourceDelta::new(1, 0),
            ResourceDelta::new(1, 0),
            ResourceDelta::new(2, 0),
        ),
        no_motivation: TierDeltas::new(
            ResourceDelta::new(0, -1),
            ResourceDelta::new(1, -1),
            ResourceDelta::new(1, -1),
        ),
        pitfall: TierDeltas::new(
            ResourceDelta::new(-1, -1),
            ResourceDelta::new(-1, -1),
            ResourceDelta::new(-2, -1),
        ),
    };

    /// Largest delta magnitude a table may contain. Anything larger cannot
    /// have a different effect after clamping.
    pub const MAX_DELTA: i32 = Interest::MAX as i32 + MAX_PATIENCE as i32;

    /// Reject tables with deltas outside `-MAX_DELTA..=MAX_DELTA`.
    pub fn validate(&self) -> Result<(), DomainError> {
        for argument_type in [
            ArgumentType::Motivation,
            ArgumentType::NoMotivation,
            ArgumentType::Pitfall,
        ] {
            for tier in [ArgumentTier::One, ArgumentTier::Two, ArgumentTier::Three] {
                let delta = self.deltas_for(argument_type, tier);
                if delta.interest.abs() > Self::MAX_DELTA || delta.patience.abs() > Self::MAX_DELTA
                {
                    return Err(DomainError::validation(format!(
                        "Rules delta for {} {} must be within +/-{}, got {}/{}",
                        argument_type,
                        tier,
                        Self::MAX_DELTA,
                        delta.interest,
                        delta.patience
                    )));
                }
            }
        }
        Ok(())
    }

    /// Look up the raw deltas for an argument.
    pub fn deltas_for(&self, argument_type: ArgumentType, tier: ArgumentTier) -> ResourceDelta {
        self.row(argument_type).get(tier)
    }

    pub fn row(&self, argument_type: ArgumentType) -> &TierDeltas {
        match argument_type {
            ArgumentType::Motivation => &self.motivation,
            ArgumentType::NoMotivation => &self.no_motivation,
            ArgumentType::Pitfall => &self.pitfall,
        }
    }

    /// Replace the row for one argument type.
    pub fn with_row(mut self, argument_type: ArgumentType, deltas: TierDeltas) -> Self {
        match argument_type {
            ArgumentType::Motivation => self.motivation = deltas,
            ArgumentType::NoMotivation => self.no_motivation = deltas,
            ArgumentType::Pitfall => self.pitfall = deltas,
        }
        self
    }
}

impl Default for NegotiationRules {
    fn default() -> Self {
        Self::REFERENCE
    }
}
