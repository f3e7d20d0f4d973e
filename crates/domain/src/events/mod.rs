//! Domain Events
//!
//! Coarse-grained events representing significant state changes in the domain.
//! They get mapped to whatever the host uses for logging or cross-system
//! communication at the adapter boundary.
//!
//! ## Aggregate Mutation Events
//!
//! The `negotiation_events` submodule contains return types from aggregate
//! mutations, communicating what happened when state was modified.

pub mod negotiation_events;

pub use negotiation_events::*;

use serde::{Deserialize, Serialize};

use crate::entities::ArgumentType;
use crate::value_objects::NegotiationOutcome;
use crate::{ArgumentId, NegotiationId};

/// Domain event for significant state changes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DomainEvent {
    NegotiationStarted {
        negotiation_id: NegotiationId,
    },
    ArgumentRecorded {
        negotiation_id: NegotiationId,
        argument_id: ArgumentId,
        argument_type: ArgumentType,
        interest_change: i32,
        patience_change: i32,
    },
    NegotiationCompleted {
        negotiation_id: NegotiationId,
        outcome: NegotiationOutcome,
        interest: u8,
        automatic: bool,
    },
    NegotiationReopened {
        negotiation_id: NegotiationId,
    },
}

impl DomainEvent {
    /// Map an aggregate mutation to the coarse events it produced.
    ///
    /// An argument that auto-completes the session yields two events.
    pub fn from_update(negotiation_id: NegotiationId, update: &NegotiationUpdate) -> Vec<Self> {
        match update {
            NegotiationUpdate::Started => vec![Self::NegotiationStarted { negotiation_id }],
            NegotiationUpdate::ArgumentRecorded {
                argument,
                interest,
                auto_completed,
                ..
            } => {
                let mut events = vec![Self::ArgumentRecorded {
                    negotiation_id,
                    argument_id: argument.id(),
                    argument_type: argument.argument_type(),
                    interest_change: argument.interest_change(),
                    patience_change: argument.patience_change(),
                }];
                if let Some(outcome) = auto_completed {
                    events.push(Self::NegotiationCompleted {
                        negotiation_id,
                        outcome: *outcome,
                        interest: interest.value(),
                        automatic: true,
                    });
                }
                events
            }
            NegotiationUpdate::Completed { outcome, interest } => {
                vec![Self::NegotiationCompleted {
                    negotiation_id,
                    outcome: *outcome,
                    interest: interest.value(),
                    automatic: false,
                }]
            }
            NegotiationUpdate::Reopened { .. } => {
                vec![Self::NegotiationReopened { negotiation_id }]
            }
            NegotiationUpdate::MotivationRevealed { .. }
            | NegotiationUpdate::PitfallRevealed { .. }
            | NegotiationUpdate::SetupUpdated { .. } => Vec::new(),
        }
    }

    pub fn event_type(&self) -> &'static str {
        match self {
            Self::NegotiationStarted { .. } => "negotiation_started",
            Self::ArgumentRecorded { .. } => "argument_recorded",
            Self::NegotiationCompleted { .. } => "negotiation_completed",
            Self::NegotiationReopened { .. } => "negotiation_reopened",
        }
    }

    pub fn negotiation_id(&self) -> NegotiationId {
        match self {
            Self::NegotiationStarted { negotiation_id }
            | Self::ArgumentRecorded { negotiation_id, .. }
            | Self::NegotiationCompleted { negotiation_id, .. }
            | Self::NegotiationReopened { negotiation_id } => *negotiation_id,
        }
    }
}
