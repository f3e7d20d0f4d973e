//! NegotiationSession mutation outcomes.

use crate::entities::ArgumentRecord;
use crate::value_objects::{Interest, NegotiationOutcome, PatienceMeter};

/// Outcome of a state change on a negotiation session.
#[derive(Debug, Clone, PartialEq)]
pub enum NegotiationUpdate {
    Started,
    ArgumentRecorded {
        argument: ArgumentRecord,
        interest: Interest,
        patience: PatienceMeter,
        /// Set when the argument exhausted patience and the session completed.
        auto_completed: Option<NegotiationOutcome>,
    },
    Completed {
        outcome: NegotiationOutcome,
        interest: Interest,
    },
    Reopened {
        previous_outcome: Option<NegotiationOutcome>,
    },
    MotivationRevealed {
        motivation_type: String,
        newly_revealed: bool,
    },
    PitfallRevealed {
        description: String,
        newly_revealed: bool,
    },
    SetupUpdated {
        fields: Vec<&'static str>,
    },
}

impl NegotiationUpdate {
    /// The outcome reached by this update, whether explicit or automatic.
    pub fn completed_outcome(&self) -> Option<NegotiationOutcome> {
        match self {
            Self::Completed { outcome, .. } => Some(*outcome),
            Self::ArgumentRecorded { auto_completed, .. } => *auto_completed,
            _ => None,
        }
    }
}
